//! Session-level errors raised by the host before or around the render loop.

use oilrun_core::error::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("device SDK level {found} is below the required {required}")]
    UnsupportedSdk { found: u32, required: u32 },
    #[error("device OpenGL ES {found} is below the required {required}")]
    UnsupportedGles { found: f64, required: f64 },
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to spawn {name} thread: {source}")]
    LoopSpawn {
        name: &'static str,
        #[source]
        source: std::io::Error,
    },
}
