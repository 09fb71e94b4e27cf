use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::configs::{ConfigStore, Settings};
use crate::handles::*;
use crate::services::{HubService, SystemHost, SystemService};

pub fn create_app(settings: &Arc<Settings>) -> anyhow::Result<Router> {
    let config_store = Arc::new(ConfigStore::new(settings.config_path()));
    let system_service = Arc::new(SystemService::new(SystemHost {
        zoneinfo_dir: PathBuf::from(&settings.system.zoneinfo_dir),
        timezone_command: settings.system.timezone_command.clone(),
        ..SystemHost::default()
    }));
    let hub_service = Arc::new(HubService::new(&settings.hub)?);

    tracing::info!("clock config stored at {}", config_store.path().display());

    let config = config_router(ConfigState {
        config_store: config_store.clone(),
    });

    let system = system_router(SystemState {
        system_service: system_service.clone(),
    });

    let hub = hub_router(HubState {
        config_store: config_store.clone(),
        hub_service: hub_service.clone(),
    });

    Ok(Router::new()
        .merge(config)
        .merge(system)
        .merge(hub)
        .merge(docs_router())
        .fallback_service(frontend_service(Path::new(&settings.frontend.path)))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()))
}

/// Serves files under `root`, answering every other path with `index.html`.
fn frontend_service(root: &Path) -> ServeDir<ServeFile> {
    ServeDir::new(root)
        .append_index_html_on_directories(false)
        .fallback(ServeFile::new(root.join("index.html")))
}
