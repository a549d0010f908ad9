/// Domain types for Ram Remix Hub
mod ids;
mod track;

pub use ids::TrackId;
pub use track::{ListenRecord, Track};
