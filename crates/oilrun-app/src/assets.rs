//! Simulated asynchronous model loading.
//!
//! On device the renderables resolve from bundled model files some time
//! after the view starts. Here a background thread waits for the configured
//! delay and then posts `RenderableLoaded` for each model.

use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::Duration;

use oilrun_core::commands::SceneInput;
use oilrun_core::components::RenderableHandle;
use oilrun_core::config::AssetConfig;
use oilrun_core::enums::ModelKind;

use crate::error::SessionError;
use crate::state::LoopCommand;

/// Models resolved by the loader, in delivery order.
pub const MODELS: [ModelKind; 2] = [ModelKind::Tank, ModelKind::OilDrum];

/// Renderable handle for a model, with bounds taken from the asset config.
pub fn renderable_for(model: ModelKind, assets: &AssetConfig) -> RenderableHandle {
    let (id, half_extents) = match model {
        ModelKind::Tank => (1, assets.tank_half_extents),
        ModelKind::OilDrum => (2, assets.drum_half_extents),
    };
    RenderableHandle { id, half_extents }
}

/// Spawn the loader thread. It exits early if the render loop has gone away.
pub fn spawn_asset_loader(
    assets: &AssetConfig,
    delay: Duration,
    tx: mpsc::Sender<LoopCommand>,
) -> Result<JoinHandle<()>, SessionError> {
    let handles: Vec<_> = MODELS
        .iter()
        .map(|&model| (model, renderable_for(model, assets)))
        .collect();

    std::thread::Builder::new()
        .name("oilrun-asset-loader".into())
        .spawn(move || {
            std::thread::sleep(delay);
            for (model, renderable) in handles {
                let input = SceneInput::RenderableLoaded { model, renderable };
                if tx.send(LoopCommand::Input(input)).is_err() {
                    tracing::debug!(?model, "render loop gone before model delivered");
                    return;
                }
                tracing::debug!(?model, id = renderable.id, "model resolved");
            }
        })
        .map_err(|source| SessionError::LoopSpawn {
            name: "asset loader",
            source,
        })
}
