//! Ram Remix Hub Core
//!
//! Platform-agnostic core types, collaborator traits, and error handling
//! shared by the player, the HTTP client, and the session glue.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `TrackId`
//! - **Collaborator Traits**: `CatalogService`, `LikesService`, `HistoryService`
//! - **Error Handling**: Unified `RemixError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use remix_core::types::{Track, TrackId};
//!
//! let track = Track::new("r1", "Midnight Flip", "https://cdn.example.com/r1.mp3")
//!     .with_artist("DJ Ram");
//!
//! assert_eq!(track.id, TrackId::new("r1"));
//! assert_eq!(track.artist.as_deref(), Some("DJ Ram"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;

pub use error::{RemixError, Result};
pub use traits::{CatalogService, HistoryService, LikesService};
pub use types::{ListenRecord, Track, TrackId};
