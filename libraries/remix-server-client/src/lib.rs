//! Ram Remix Hub server client
//!
//! HTTP implementations of the player's collaborator services.
//!
//! # Endpoints
//!
//! - `GET /api/remixes`: catalog
//! - `GET /api/likes` and `POST /api/likes`: like set and toggle
//! - `POST /api/history`: listen history
//!
//! # Example
//!
//! ```ignore
//! use remix_server_client::{ClientConfig, RemixServerClient};
//! use remix_core::LikesService;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = RemixServerClient::new(ClientConfig::load()?)?;
//!
//!     let liked = client.fetch_likes().await?;
//!     println!("{} liked remixes", liked.len());
//!
//!     Ok(())
//! }
//! ```

mod catalog;
mod client;
mod config;
mod error;
mod history;
mod likes;
mod types;

pub use client::RemixServerClient;
pub use config::{ClientConfig, DEFAULT_CONFIG_FILE, ENV_PREFIX};
pub use error::{Result, ServerClientError};
pub use types::{LikesResponse, ToggleLikeRequest, ToggleLikeResponse};
