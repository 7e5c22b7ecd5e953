//! Offline client serving a library snapshot stored as JSON.
//!
//! Implements both client traits so a [`crate::CatalogSession`] can run
//! without the network: the binary uses it to browse an exported library, and
//! the end-to-end tests use it as a predictable service.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::client::{ClientResult, MobileClient, WebClient};
use crate::error::ClientError;
use crate::model::{
    AlbumInfo, ArtistInfo, Genre, Playlist, RegisteredDevice, SearchResults, Song, Station,
    UserPlaylist, UserSettings,
};

const DEFAULT_STREAM_BASE: &str = "snapshot://stream";
const USER_PLAYLIST_KIND: &str = "USER_GENERATED";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Account {
    pub email: String,
    pub password: String,
}

/// Everything the snapshot client can answer with
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Library {
    /// When present, logins must match these credentials
    #[serde(default)]
    pub account: Option<Account>,
    #[serde(default)]
    pub settings: UserSettings,
    #[serde(default)]
    pub devices: Vec<RegisteredDevice>,
    #[serde(default)]
    pub songs: Vec<Song>,
    #[serde(default)]
    pub playlists: Vec<UserPlaylist>,
    /// Share token to playlist songs
    #[serde(default)]
    pub shared_playlists: HashMap<String, Vec<Song>>,
    #[serde(default)]
    pub stations: Vec<Station>,
    /// Station id to the tracks it plays
    #[serde(default)]
    pub station_tracks: HashMap<String, Vec<Song>>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub artists: Vec<ArtistInfo>,
    #[serde(default)]
    pub albums: Vec<AlbumInfo>,
    #[serde(default)]
    pub stream_base: Option<String>,
}

pub struct SnapshotClient {
    library: Library,
    stations: RefCell<Vec<Station>>,
    logged_in: Cell<bool>,
}

impl SnapshotClient {
    pub fn new(library: Library) -> Self {
        let stations = RefCell::new(library.stations.clone());
        Self {
            library,
            stations,
            logged_in: Cell::new(false),
        }
    }

    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading library snapshot {}", path.display()))?;
        let library: Library = serde_json::from_str(&content)
            .with_context(|| format!("parsing library snapshot {}", path.display()))?;
        tracing::debug!(
            path = %path.display(),
            songs = library.songs.len(),
            "Loaded library snapshot"
        );
        Ok(Self::new(library))
    }

    pub fn is_logged_in(&self) -> bool {
        self.logged_in.get()
    }

    /// Drops the session, as an expired service token would.
    pub fn logout(&self) {
        self.logged_in.set(false);
    }

    fn sign_in(&self, email: &str, password: &str) -> ClientResult<bool> {
        if self.logged_in.get() {
            return Err(ClientError::AlreadyLoggedIn);
        }
        if let Some(account) = &self.library.account {
            if account.email != email || account.password != password {
                tracing::debug!(email, "Snapshot login refused");
                return Ok(false);
            }
        }
        self.logged_in.set(true);
        Ok(true)
    }

    fn require_login(&self) -> ClientResult<()> {
        if self.logged_in.get() {
            Ok(())
        } else {
            Err(ClientError::NotLoggedIn)
        }
    }
}

fn matches_query(query: &str, fields: &[&str]) -> bool {
    fields.iter().any(|f| f.to_lowercase().contains(query))
}

fn take<T>(items: impl Iterator<Item = T>, max: u32) -> Vec<T> {
    items.take(max as usize).collect()
}

impl WebClient for SnapshotClient {
    fn login(&self, email: &str, password: &str) -> ClientResult<bool> {
        self.sign_in(email, password)
    }

    fn get_registered_devices(&self) -> ClientResult<Vec<RegisteredDevice>> {
        self.require_login()?;
        Ok(self.library.devices.clone())
    }

    fn get_settings(&self) -> ClientResult<UserSettings> {
        self.require_login()?;
        Ok(self.library.settings.clone())
    }
}

impl MobileClient for SnapshotClient {
    fn login(&self, email: &str, password: &str) -> ClientResult<bool> {
        self.sign_in(email, password)
    }

    fn get_all_songs(&self) -> ClientResult<Vec<Song>> {
        self.require_login()?;
        Ok(self.library.songs.clone())
    }

    fn get_all_playlists(&self) -> ClientResult<Vec<Playlist>> {
        self.require_login()?;
        Ok(self
            .library
            .playlists
            .iter()
            .map(|p| Playlist {
                id: p.id.clone(),
                name: p.name.clone(),
                kind: Some(USER_PLAYLIST_KIND.to_string()),
                share_token: None,
            })
            .collect())
    }

    fn get_all_user_playlist_contents(&self) -> ClientResult<Vec<UserPlaylist>> {
        self.require_login()?;
        Ok(self.library.playlists.clone())
    }

    fn get_shared_playlist_contents(&self, share_token: &str) -> ClientResult<Vec<Song>> {
        self.require_login()?;
        self.library
            .shared_playlists
            .get(share_token)
            .cloned()
            .ok_or_else(|| {
                ClientError::call_failure(
                    "get_shared_playlist_contents",
                    format!("unknown share token {share_token}"),
                )
            })
    }

    fn get_all_stations(&self) -> ClientResult<Vec<Station>> {
        self.require_login()?;
        Ok(self.stations.borrow().clone())
    }

    fn get_station_tracks(&self, station_id: &str, num_tracks: u32) -> ClientResult<Vec<Song>> {
        self.require_login()?;
        if !self.stations.borrow().iter().any(|s| s.id == station_id) {
            return Err(ClientError::call_failure(
                "get_station_tracks",
                format!("unknown station {station_id}"),
            ));
        }
        let tracks = self.library.station_tracks.get(station_id);
        Ok(take(tracks.into_iter().flatten().cloned(), num_tracks))
    }

    fn get_genres(&self) -> ClientResult<Vec<Genre>> {
        self.require_login()?;
        Ok(self.library.genres.clone())
    }

    fn create_station(&self, name: &str, genre_id: &str) -> ClientResult<String> {
        self.require_login()?;
        let mut stations = self.stations.borrow_mut();
        let id = format!("station-{}", stations.len() + 1);
        stations.push(Station {
            id: id.clone(),
            name: name.to_string(),
            genre_id: Some(genre_id.to_string()),
        });
        tracing::debug!(station_id = %id, name, genre_id, "Snapshot station created");
        Ok(id)
    }

    fn search_all_access(&self, query: &str, max_results: u32) -> ClientResult<SearchResults> {
        self.require_login()?;
        let query = query.to_lowercase();
        let lib = &self.library;

        Ok(SearchResults {
            song_hits: take(
                lib.songs
                    .iter()
                    .filter(|s| matches_query(&query, &[s.title.as_str(), s.artist.as_str(), s.album.as_str()]))
                    .cloned(),
                max_results,
            ),
            album_hits: take(
                lib.albums
                    .iter()
                    .filter(|a| matches_query(&query, &[a.name.as_str(), a.album_artist.as_str()]))
                    .cloned(),
                max_results,
            ),
            artist_hits: take(
                lib.artists
                    .iter()
                    .filter(|a| matches_query(&query, &[a.name.as_str()]))
                    .cloned(),
                max_results,
            ),
            station_hits: take(
                self.stations
                    .borrow()
                    .iter()
                    .filter(|s| matches_query(&query, &[s.name.as_str()]))
                    .cloned(),
                max_results,
            ),
        })
    }

    fn get_artist_info(
        &self,
        artist_id: &str,
        include_albums: bool,
        max_top_tracks: u32,
        max_rel_artist: u32,
    ) -> ClientResult<ArtistInfo> {
        self.require_login()?;
        let mut info = self
            .library
            .artists
            .iter()
            .find(|a| a.artist_id == artist_id)
            .cloned()
            .ok_or_else(|| {
                ClientError::call_failure("get_artist_info", format!("unknown artist {artist_id}"))
            })?;

        if !include_albums {
            info.albums.clear();
        }
        info.top_tracks.truncate(max_top_tracks as usize);
        info.related_artists.truncate(max_rel_artist as usize);
        Ok(info)
    }

    fn get_album_info(&self, album_id: &str, include_tracks: bool) -> ClientResult<AlbumInfo> {
        self.require_login()?;
        let mut info = self
            .library
            .albums
            .iter()
            .find(|a| a.album_id == album_id)
            .cloned()
            .ok_or_else(|| {
                ClientError::call_failure("get_album_info", format!("unknown album {album_id}"))
            })?;

        if !include_tracks {
            info.tracks.clear();
        }
        Ok(info)
    }

    fn get_stream_url(&self, song_id: &str, device_id: &str) -> ClientResult<String> {
        self.require_login()?;
        if !self.library.songs.iter().any(|s| s.id == song_id) {
            return Err(ClientError::call_failure(
                "get_stream_url",
                format!("unknown song {song_id}"),
            ));
        }
        let base = self.library.stream_base.as_deref().unwrap_or(DEFAULT_STREAM_BASE);
        Ok(format!("{base}/{song_id}?device={device_id}"))
    }
}
