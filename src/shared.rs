//! Process-wide client slot.
//!
//! Filled by the application **once**, during startup; thereafter read-only.
//! Prefer passing a [`SupabaseClient`] down explicitly. This slot is for code
//! that cannot be handed one.

use crate::client::SupabaseClient;
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use std::sync::OnceLock;
use tracing::info;

static SHARED_CLIENT: OnceLock<SupabaseClient> = OnceLock::new();

/// Stores `client` as the shared handle. The first call wins.
pub fn install(client: SupabaseClient) -> Result<&'static SupabaseClient> {
    SHARED_CLIENT
        .set(client)
        .map_err(|_| ClientError::AlreadyInitialized)?;
    let shared = SHARED_CLIENT.get().ok_or(ClientError::NotInitialized)?;
    info!(url = %shared.url(), "shared backend client installed");
    Ok(shared)
}

/// Builds a client from `config` and installs it.
pub fn init(config: ClientConfig) -> Result<&'static SupabaseClient> {
    if is_initialized() {
        return Err(ClientError::AlreadyInitialized);
    }
    install(SupabaseClient::new(config)?)
}

pub fn client() -> Result<&'static SupabaseClient> {
    SHARED_CLIENT.get().ok_or(ClientError::NotInitialized)
}

pub fn is_initialized() -> bool {
    SHARED_CLIENT.get().is_some()
}
