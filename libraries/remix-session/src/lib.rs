//! Ram Remix Hub player session
//!
//! Async glue between the synchronous playback core and the remote
//! catalog, likes, and history services.
//!
//! ```ignore
//! use remix_session::{PlayerSession, Services};
//! use remix_server_client::{ClientConfig, RemixServerClient};
//!
//! let client = Arc::new(RemixServerClient::new(ClientConfig::load()?)?);
//! let mut session = PlayerSession::new(output, PlayerConfig::default(), Services::from_backend(client));
//!
//! session.mount().await;
//! let remixes = session.load_catalog().await?;
//! session.play_queue(remixes, 0)?;
//! ```

mod services;
mod session;

pub use services::Services;
pub use session::PlayerSession;
