//! Client handle for a hosted Supabase-style backend.
//!
//! ```no_run
//! use supalink::{ClientConfig, Service, SupabaseClient};
//!
//! # async fn run() -> supalink::Result<()> {
//! let config = ClientConfig::new("https://xyzcompany.supabase.co", "public-anon-key");
//! let client = SupabaseClient::new(config)?;
//! let health = client.health().await?;
//! println!("{:?} at {}", health.version, client.endpoint(Service::Auth));
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod shared;

pub use client::{ApiResponse, Health, SupabaseClient};
pub use config::ClientConfig;
pub use endpoint::{Endpoints, Service};
pub use error::{ClientError, Result};
