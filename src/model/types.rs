//! Core type definitions: raw service records and the projections built from them

use serde::{Deserialize, Serialize};

/// Artwork reference attached to songs, albums and artists
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtRef {
    pub url: String,
}

/// A song record as returned by the service, field names kept in its wire casing
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub id: String,
    pub title: String,
    pub album: String,
    pub artist: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub duration_millis: u64,
    #[serde(default)]
    pub track_number: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album_art_ref: Option<Vec<ArtRef>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist_art_ref: Option<Vec<ArtRef>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_id: Option<String>,
}

impl Song {
    pub fn album_thumb(&self) -> Option<&str> {
        first_url(self.album_art_ref.as_deref())
    }

    pub fn artist_thumb(&self) -> Option<&str> {
        first_url(self.artist_art_ref.as_deref())
    }
}

fn first_url(refs: Option<&[ArtRef]>) -> Option<&str> {
    refs.and_then(|r| r.first()).map(|r| r.url.as_str())
}

/// Flattened track handed to the consuming application
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub title: String,
    pub album: String,
    pub artist: String,
    pub duration_millis: u64,
    /// Carries the song's track number
    pub track_type: u32,
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album_art_ref: Option<Vec<ArtRef>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_id: Option<String>,
}

impl From<&Song> for Track {
    fn from(song: &Song) -> Self {
        Self {
            title: song.title.clone(),
            album: song.album.clone(),
            artist: song.artist.clone(),
            duration_millis: song.duration_millis,
            track_type: song.track_number,
            id: song.id.clone(),
            album_art_ref: song.album_art_ref.clone(),
            store_id: song.store_id.clone(),
        }
    }
}

/// A track paired with the artwork resolved for its grouping key
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub track: Track,
    pub thumb: Option<String>,
    pub id: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    pub id: String,
    pub name: String,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share_token: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistEntry {
    pub id: String,
    pub track_id: String,
    /// Only present for catalog tracks the user does not own
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track: Option<Song>,
}

/// A user playlist with its entries
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UserPlaylist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub tracks: Vec<PlaylistEntry>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre_id: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Genre {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub children: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistInfo {
    pub artist_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist_art_ref: Option<String>,
    #[serde(default)]
    pub albums: Vec<AlbumInfo>,
    #[serde(default)]
    pub top_tracks: Vec<Song>,
    #[serde(default)]
    pub related_artists: Vec<ArtistInfo>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumInfo {
    pub album_id: String,
    pub name: String,
    #[serde(default)]
    pub album_artist: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album_art_ref: Option<String>,
    #[serde(default)]
    pub tracks: Vec<Song>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    #[serde(default)]
    pub song_hits: Vec<Song>,
    #[serde(default)]
    pub album_hits: Vec<AlbumInfo>,
    #[serde(default)]
    pub artist_hits: Vec<ArtistInfo>,
    #[serde(default)]
    pub station_hits: Vec<Station>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.song_hits.is_empty()
            && self.album_hits.is_empty()
            && self.artist_hits.is_empty()
            && self.station_hits.is_empty()
    }
}

/// Kind of a device registered with the account
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeviceType {
    Phone,
    Ios,
    #[serde(other)]
    Other,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredDevice {
    pub id: String,
    #[serde(rename = "type")]
    pub device_type: DeviceType,
}

/// Account settings, reduced to what the session reads
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    #[serde(default)]
    pub is_subscription: bool,
}
