mod config_handle;
mod docs_handle;
mod hub_handle;
mod system_handle;

pub use config_handle::*;
pub use docs_handle::*;
pub use hub_handle::*;
pub use system_handle::*;

use crate::errors::ApiError;

/// Runs file-backed work on the blocking pool.
async fn blocking<T, F>(work: F) -> Result<T, ApiError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| ApiError::InternalError(e.into()))
}
