//! Model module - catalog data types and the session that serves them
//!
//! - `types`: raw service records and their flattened projections
//! - `cache`: load-once cache slots
//! - `index`: artist/album/genre groupings of the song list
//! - `session`: the catalog session wrapping the web and mobile clients

mod types;
mod cache;
mod index;
mod session;

pub use types::{
    AlbumInfo, ArtRef, ArtistInfo, DeviceType, Genre, IndexEntry, Playlist, PlaylistEntry,
    RegisteredDevice, SearchResults, Song, Station, Track, UserPlaylist, UserSettings,
};

pub use cache::Cached;

pub use index::{CatalogIndex, CatalogKind};

pub use session::{ArtistInfoOptions, CatalogSession};
