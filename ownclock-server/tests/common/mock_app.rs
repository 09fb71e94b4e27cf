use std::fs;
use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, Response};
use ownclock_api::models::ClockConfig;
use ownclock_server::app::create_app;
use ownclock_server::configs::{
    ConfigStore, Frontend, Hub, Logger, Server, Settings, Storage, System,
};
use tempfile::TempDir;
use tower::ServiceExt;

pub struct MockApp {
    pub router: Router,
    pub config_store: ConfigStore,
    pub dir: TempDir,
}

impl MockApp {
    pub fn new() -> Self {
        Self::with_hub_timeout(10)
    }

    pub fn with_hub_timeout(timeout_secs: u64) -> Self {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("state").join("config.json");
        let frontend_path = dir.path().join("frontend");
        let zoneinfo_path = dir.path().join("zoneinfo");

        let zone = zoneinfo_path.join("America").join("Lima");
        fs::create_dir_all(zone.parent().unwrap()).unwrap();
        fs::write(zone, "").unwrap();

        let settings = Arc::new(Settings {
            server: Server {
                host: String::from("127.0.0.1"),
                port: 0,
            },
            logger: Logger {
                level: String::from("debug"),
            },
            storage: Storage {
                config_path: Some(config_path.to_string_lossy().into_owned()),
            },
            frontend: Frontend {
                path: frontend_path.to_string_lossy().into_owned(),
            },
            hub: Hub {
                timeout_secs,
                accept_invalid_certs: true,
            },
            system: System {
                zoneinfo_dir: zoneinfo_path.to_string_lossy().into_owned(),
                // Stands in for a host where changing the timezone is denied.
                timezone_command: vec![
                    String::from("sh"),
                    String::from("-c"),
                    String::from("echo \"permission denied for $1\" >&2; exit 1"),
                    String::from("sh"),
                ],
            },
        });

        let router = create_app(&settings).unwrap();

        Self {
            router,
            config_store: ConfigStore::new(config_path),
            dir,
        }
    }

    pub fn with_frontend_file(self, name: &str, content: &str) -> Self {
        let path = self.dir.path().join("frontend").join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
        self
    }

    pub fn with_config(self, config: ClockConfig) -> Self {
        assert!(self.config_store.save(&config));
        self
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(uri);

        let body = match body {
            Some(json) => {
                builder = builder.header("Content-Type", "application/json");
                Body::from(serde_json::to_string(&json).unwrap())
            }
            None => Body::empty(),
        };

        self.router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.request(Method::GET, uri, None).await
    }
}

pub async fn read_json(response: Response<Body>) -> serde_json::Value {
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

pub async fn read_text(response: Response<Body>) -> String {
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}
