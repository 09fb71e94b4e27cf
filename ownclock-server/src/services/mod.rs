pub mod calendar;
mod hub_service;
mod system_service;

pub use hub_service::*;
pub use system_service::*;
