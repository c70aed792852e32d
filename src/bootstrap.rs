//! Process bootstrap: registry construction and module lifecycle around the server.

use anyhow::Context;
use folio_kernel::{settings::Settings, InitCtx, ModuleRegistry};

use crate::modules;

/// Build the module registry for the configured deployment
pub fn build_registry(settings: &Settings) -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, settings);
    registry
}

/// Initialize modules, serve until shutdown, then stop modules
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    let registry = build_registry(&settings);
    let ctx = InitCtx {
        settings: &settings,
    };

    registry.init_modules(&ctx).await?;
    registry.start_modules(&ctx).await?;
    tracing::info!(modules = registry.len(), "folio bootstrap complete");

    let served = folio_http::start_server(&registry, &settings).await;

    registry
        .stop_modules()
        .await
        .context("failed to stop modules")?;

    served
}
