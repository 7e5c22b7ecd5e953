//! Catalog session: authentication, library indices and service queries

use indexmap::IndexMap;

use crate::auth::{accept_existing_session, resolve_device_id, Credentials};
use crate::client::{ClientResult, MobileClient, WebClient};
use crate::error::{CatalogError, ClientError, Result};

use super::cache::Cached;
use super::index::{CatalogIndex, CatalogKind};
use super::types::{
    AlbumInfo, ArtistInfo, Genre, IndexEntry, Playlist, PlaylistEntry, SearchResults, Song,
    Station, UserPlaylist,
};

/// Optional knobs for [`CatalogSession::get_artist_info`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArtistInfoOptions {
    pub include_albums: bool,
    pub max_top_tracks: u32,
    pub max_rel_artist: u32,
}

impl Default for ArtistInfoOptions {
    fn default() -> Self {
        Self {
            include_albums: true,
            max_top_tracks: 5,
            max_rel_artist: 5,
        }
    }
}

/// Session over a web client and a mobile client, caching what it fetches.
///
/// Every query runs through one policy: when the service reports the session
/// as logged out, log in again with the last credentials and retry once. If
/// that does not help, the query returns its empty value instead of failing.
pub struct CatalogSession<W, M> {
    web: W,
    mobile: M,
    credentials: Option<Credentials>,
    authenticated: bool,
    all_access: bool,
    device_id: Option<String>,
    library_loaded: bool,
    songs: Cached<Vec<Song>>,
    playlists: Cached<Vec<Playlist>>,
    playlist_contents: Cached<Vec<UserPlaylist>>,
    stations: Cached<Vec<Station>>,
    artists: CatalogIndex,
    albums: CatalogIndex,
    genres: CatalogIndex,
}

impl<W: WebClient, M: MobileClient> CatalogSession<W, M> {
    pub const DEFAULT_STATION_TRACKS: u32 = 200;
    pub const DEFAULT_SEARCH_RESULTS: u32 = 50;

    pub fn new(web: W, mobile: M) -> Self {
        Self {
            web,
            mobile,
            credentials: None,
            authenticated: false,
            all_access: false,
            device_id: None,
            library_loaded: false,
            songs: Cached::new(),
            playlists: Cached::new(),
            playlist_contents: Cached::new(),
            stations: Cached::new(),
            artists: CatalogIndex::new(CatalogKind::Artists),
            albums: CatalogIndex::new(CatalogKind::Albums),
            genres: CatalogIndex::new(CatalogKind::Genres),
        }
    }

    pub fn web(&self) -> &W {
        &self.web
    }

    pub fn mobile(&self) -> &M {
        &self.mobile
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Whether the account has a streaming subscription
    pub fn is_all_access(&self) -> bool {
        self.all_access
    }

    pub fn device_id(&self) -> Option<&str> {
        self.device_id.as_deref()
    }

    pub fn is_library_loaded(&self) -> bool {
        self.library_loaded
    }

    /// Logs both clients in. The credentials are kept for later re-authentication.
    pub fn authenticate(&mut self, email: &str, password: &str) -> Result<bool> {
        self.credentials = Some(Credentials::new(email, password));
        Ok(self.login()?)
    }

    /// Logs in again with the credentials of the last [`authenticate`](Self::authenticate) call.
    pub fn reauthenticate(&mut self) -> Result<bool> {
        Ok(self.login()?)
    }

    fn login(&mut self) -> ClientResult<bool> {
        let Some(creds) = self.credentials.clone() else {
            tracing::warn!("No credentials to log in with");
            return Ok(false);
        };

        tracing::debug!(email = %creds.email, "API: login");
        let mobile_ok = accept_existing_session(self.mobile.login(&creds.email, &creds.password))?;
        let web_ok = accept_existing_session(self.web.login(&creds.email, &creds.password))?;

        self.authenticated = mobile_ok && web_ok;
        if !self.authenticated {
            tracing::warn!(mobile_ok, web_ok, "Login refused");
            return Ok(false);
        }

        self.all_access = self.web.get_settings()?.is_subscription;
        self.device_id = resolve_device_id(&self.web.get_registered_devices()?);

        tracing::info!(
            all_access = self.all_access,
            device_id = ?self.device_id,
            "Authenticated"
        );
        Ok(true)
    }

    /// Runs `op` against the mobile client, re-authenticating once if it
    /// reports a lost session.
    ///
    /// `Ok(None)` means the session could not be recovered. Any other client
    /// error is passed through.
    fn with_reauth<T>(
        &mut self,
        call: &'static str,
        op: impl Fn(&M) -> ClientResult<T>,
    ) -> ClientResult<Option<T>> {
        match op(&self.mobile) {
            Err(ClientError::NotLoggedIn) => {}
            other => return other.map(Some),
        }

        tracing::warn!(call, "Client not logged in, re-authenticating");
        if !self.login()? {
            tracing::warn!(call, "Re-authentication failed, returning empty result");
            return Ok(None);
        }

        match op(&self.mobile) {
            Err(ClientError::NotLoggedIn) => {
                tracing::warn!(call, "Still not logged in after re-authentication");
                Ok(None)
            }
            other => other.map(Some),
        }
    }

    /// Fetches into `slot` unless it is already loaded.
    ///
    /// The slot is only filled by a successful fetch, so an unrecovered session
    /// leaves it empty and the next call tries again.
    fn fetch_once<T>(
        &mut self,
        call: &'static str,
        slot: impl Fn(&mut Self) -> &mut Cached<T>,
        op: impl Fn(&M) -> ClientResult<T>,
    ) -> Result<Option<&T>> {
        if !slot(&mut *self).is_loaded() {
            tracing::debug!(call, "API: fetching");
            match self.with_reauth(call, op)? {
                Some(value) => {
                    slot(&mut *self).fill(value);
                    tracing::debug!(call, "Cached result");
                }
                None => return Ok(None),
            }
        }
        Ok(slot(self).get())
    }

    /// Every song in the user's library, fetched once.
    pub fn load_songs(&mut self) -> Result<&[Song]> {
        let songs = self.fetch_once("get_all_songs", |s| &mut s.songs, |c| c.get_all_songs())?;
        Ok(songs.map(Vec::as_slice).unwrap_or(&[]))
    }

    fn index(&self, kind: CatalogKind) -> &CatalogIndex {
        match kind {
            CatalogKind::Artists => &self.artists,
            CatalogKind::Albums => &self.albums,
            CatalogKind::Genres => &self.genres,
        }
    }

    fn ensure_index(&mut self, kind: CatalogKind) -> Result<&CatalogIndex> {
        if !self.index(kind).is_built() {
            self.load_songs()?;

            let index = match kind {
                CatalogKind::Artists => &mut self.artists,
                CatalogKind::Albums => &mut self.albums,
                CatalogKind::Genres => &mut self.genres,
            };
            index.build(self.songs.value(), self.songs.is_loaded());
            tracing::info!(
                kind = kind.label(),
                groups = index.tracks().len(),
                built = index.is_built(),
                "Indexed library"
            );
        }
        Ok(self.index(kind))
    }

    /// Songs grouped by artist
    pub fn load_artists(&mut self) -> Result<&IndexMap<String, Vec<IndexEntry>>> {
        Ok(self.ensure_index(CatalogKind::Artists)?.tracks())
    }

    /// Songs of a single artist.
    pub fn artist_tracks(&mut self, name: &str) -> Result<&[IndexEntry]> {
        self.lookup(CatalogKind::Artists, name)
    }

    /// Songs grouped by album
    pub fn load_albums(&mut self) -> Result<&IndexMap<String, Vec<IndexEntry>>> {
        Ok(self.ensure_index(CatalogKind::Albums)?.tracks())
    }

    /// Songs grouped by genre
    pub fn load_genres(&mut self) -> Result<&IndexMap<String, Vec<IndexEntry>>> {
        Ok(self.ensure_index(CatalogKind::Genres)?.tracks())
    }

    pub fn artist_thumbs(&mut self) -> Result<&IndexMap<String, Option<String>>> {
        Ok(self.ensure_index(CatalogKind::Artists)?.thumbs())
    }

    pub fn album_thumbs(&mut self) -> Result<&IndexMap<String, Option<String>>> {
        Ok(self.ensure_index(CatalogKind::Albums)?.thumbs())
    }

    pub fn genre_thumbs(&mut self) -> Result<&IndexMap<String, Option<String>>> {
        Ok(self.ensure_index(CatalogKind::Genres)?.thumbs())
    }

    /// Fetches songs and builds all three indices.
    pub fn load_data(&mut self) -> Result<()> {
        self.load_songs()?;
        for kind in [CatalogKind::Artists, CatalogKind::Albums, CatalogKind::Genres] {
            self.ensure_index(kind)?;
        }
        self.library_loaded = self.songs.is_loaded();
        tracing::info!(
            songs = self.songs.value().len(),
            loaded = self.library_loaded,
            "Library data loaded"
        );
        Ok(())
    }

    fn lookup(&mut self, kind: CatalogKind, name: &str) -> Result<&[IndexEntry]> {
        self.ensure_index(kind)?
            .get(name)
            .ok_or_else(|| CatalogError::UnknownKey {
                kind: kind.label(),
                name: name.to_string(),
            })
    }

    /// Tracks of one artist, album or genre.
    ///
    /// `kind` is one of `artists`, `albums` or `genres` in any case; any other
    /// tag yields no tracks.
    pub fn get_tracks_for_type(&mut self, kind: &str, name: &str) -> Result<&[IndexEntry]> {
        match kind.parse::<CatalogKind>() {
            Ok(kind) => self.lookup(kind, name),
            Err(()) => {
                tracing::debug!(kind, "Unknown catalog type");
                Ok(&[])
            }
        }
    }

    /// Looks a song up in the already fetched library.
    pub fn get_song(&self, id: &str) -> Result<&Song> {
        self.songs
            .value()
            .iter()
            .find(|song| song.id == id)
            .ok_or_else(|| CatalogError::SongNotFound(id.to_string()))
    }

    pub fn get_all_playlists(&mut self) -> Result<Vec<Playlist>> {
        let playlists = self.fetch_once(
            "get_all_playlists",
            |s| &mut s.playlists,
            |c| c.get_all_playlists(),
        )?;
        Ok(playlists.cloned().unwrap_or_default())
    }

    /// Entries of one of the user's playlists; empty for an unknown id.
    pub fn get_all_user_playlist_contents(&mut self, playlist_id: &str) -> Result<Vec<PlaylistEntry>> {
        let contents = self.fetch_once(
            "get_all_user_playlist_contents",
            |s| &mut s.playlist_contents,
            |c| c.get_all_user_playlist_contents(),
        )?;
        Ok(contents
            .and_then(|all| all.iter().find(|p| p.id == playlist_id))
            .map(|p| p.tracks.clone())
            .unwrap_or_default())
    }

    pub fn get_shared_playlist_contents(&mut self, share_token: &str) -> Result<Vec<Song>> {
        tracing::debug!(share_token, "API: get_shared_playlist_contents");
        let songs = self.with_reauth("get_shared_playlist_contents", |c| {
            c.get_shared_playlist_contents(share_token)
        })?;
        Ok(songs.unwrap_or_default())
    }

    pub fn get_all_stations(&mut self) -> Result<Vec<Station>> {
        let stations = self.fetch_once(
            "get_all_stations",
            |s| &mut s.stations,
            |c| c.get_all_stations(),
        )?;
        Ok(stations.cloned().unwrap_or_default())
    }

    pub fn get_station_tracks(&mut self, station_id: &str, num_tracks: u32) -> Result<Vec<Song>> {
        tracing::debug!(station_id, num_tracks, "API: get_station_tracks");
        let tracks = self.with_reauth("get_station_tracks", |c| {
            c.get_station_tracks(station_id, num_tracks)
        })?;
        Ok(tracks.unwrap_or_default())
    }

    pub fn get_genres(&mut self) -> Result<Vec<Genre>> {
        tracing::debug!("API: get_genres");
        Ok(self.with_reauth("get_genres", |c| c.get_genres())?.unwrap_or_default())
    }

    /// Creates a station seeded by a genre and returns its id.
    pub fn create_station(&mut self, name: &str, genre_id: &str) -> Result<String> {
        tracing::debug!(name, genre_id, "API: create_station");
        let id = self.with_reauth("create_station", |c| c.create_station(name, genre_id))?;
        Ok(id.unwrap_or_default())
    }

    pub fn search_all_access(&mut self, query: &str, max_results: u32) -> Result<SearchResults> {
        tracing::debug!(query, max_results, "API: search_all_access");
        let results = self.with_reauth("search_all_access", |c| {
            c.search_all_access(query, max_results)
        })?;
        Ok(results.unwrap_or_default())
    }

    pub fn get_artist_info(&mut self, artist_id: &str, options: ArtistInfoOptions) -> Result<ArtistInfo> {
        tracing::debug!(artist_id, ?options, "API: get_artist_info");
        let info = self.with_reauth("get_artist_info", |c| {
            c.get_artist_info(
                artist_id,
                options.include_albums,
                options.max_top_tracks,
                options.max_rel_artist,
            )
        })?;
        Ok(info.unwrap_or_default())
    }

    pub fn get_album_info(&mut self, album_id: &str, include_tracks: bool) -> Result<AlbumInfo> {
        tracing::debug!(album_id, include_tracks, "API: get_album_info");
        let info = self.with_reauth("get_album_info", |c| c.get_album_info(album_id, include_tracks))?;
        Ok(info.unwrap_or_default())
    }

    /// Resolves a playable URL for a song on the registered device.
    ///
    /// Unlike the other queries, a failed call is reported as an error naming
    /// the song.
    pub fn get_stream_url(&mut self, song_id: &str) -> Result<String> {
        let Some(device_id) = self.device_id.clone() else {
            tracing::error!(song_id, "No device to stream to");
            return Err(CatalogError::NoDevice(song_id.to_string()));
        };

        tracing::debug!(song_id, device_id = %device_id, "API: get_stream_url");
        match self.with_reauth("get_stream_url", |c| c.get_stream_url(song_id, &device_id)) {
            Ok(url) => Ok(url.unwrap_or_default()),
            Err(source @ ClientError::CallFailure { .. }) => {
                tracing::error!(song_id, error = %source, "Stream URL lookup failed");
                Err(CatalogError::StreamUrl {
                    id: song_id.to_string(),
                    source,
                })
            }
            Err(e) => Err(e.into()),
        }
    }
}
