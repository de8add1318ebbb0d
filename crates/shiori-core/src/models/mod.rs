mod envelope;
mod media;
mod player;
mod scalar;

pub use envelope::Envelope;
pub use media::{Artwork, LocalizedTitle, MediaSummary, ScheduleItem, SearchResult, Title};
pub use player::{AudioType, ServerCatalog, StreamServer, StreamServers};
pub use scalar::Scalar;
