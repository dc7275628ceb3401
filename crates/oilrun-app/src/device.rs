//! Device capability gate, checked once before any session state exists.

use oilrun_core::config::DeviceConfig;
use oilrun_core::constants::{MIN_GLES_VERSION, MIN_SDK_LEVEL};

use crate::error::SessionError;

/// Reject devices below SDK 24 or without OpenGL ES 3.0.
pub fn check_supported_device(device: &DeviceConfig) -> Result<(), SessionError> {
    if device.sdk_level < MIN_SDK_LEVEL {
        tracing::error!(sdk_level = device.sdk_level, "Oil Run requires Android N or later");
        return Err(SessionError::UnsupportedSdk {
            found: device.sdk_level,
            required: MIN_SDK_LEVEL,
        });
    }
    if device.gles_version < MIN_GLES_VERSION {
        tracing::error!(gles_version = device.gles_version, "Oil Run requires OpenGL ES 3.0 or later");
        return Err(SessionError::UnsupportedGles {
            found: device.gles_version,
            required: MIN_GLES_VERSION,
        });
    }
    tracing::debug!(
        sdk_level = device.sdk_level,
        gles_version = device.gles_version,
        "device supported"
    );
    Ok(())
}
