mod settings;
mod store;

pub use settings::{Frontend, Hub, Logger, Server, Settings, Storage, System};
pub use store::ConfigStore;
