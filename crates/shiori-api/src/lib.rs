//! HTTP contracts of the site backend and the artwork mappings service.

pub mod anizip;
pub mod client;
pub mod error;
pub mod traits;
pub mod types;

pub use anizip::AniZipClient;
pub use client::BackendClient;
pub use error::ApiError;
pub use traits::{ArtworkSource, HomeSection, SiteApi, WatchRequest};
