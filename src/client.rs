//! Capability traits for the two streaming-service clients the session wraps.
//!
//! The web client owns account-level data (registered devices and settings),
//! the mobile client owns everything catalog related. Both are synchronous:
//! each call is one blocking round trip to the service.

use crate::error::ClientError;
use crate::model::{
    AlbumInfo, ArtistInfo, Genre, Playlist, RegisteredDevice, SearchResults, Song, Station,
    UserPlaylist, UserSettings,
};

pub type ClientResult<T> = std::result::Result<T, ClientError>;

pub trait WebClient {
    /// Returns `Ok(false)` when the service refuses the credentials quietly.
    fn login(&self, email: &str, password: &str) -> ClientResult<bool>;

    fn get_registered_devices(&self) -> ClientResult<Vec<RegisteredDevice>>;

    fn get_settings(&self) -> ClientResult<UserSettings>;
}

pub trait MobileClient {
    fn login(&self, email: &str, password: &str) -> ClientResult<bool>;

    fn get_all_songs(&self) -> ClientResult<Vec<Song>>;

    fn get_all_playlists(&self) -> ClientResult<Vec<Playlist>>;

    /// Every user-owned playlist together with its entries
    fn get_all_user_playlist_contents(&self) -> ClientResult<Vec<UserPlaylist>>;

    fn get_shared_playlist_contents(&self, share_token: &str) -> ClientResult<Vec<Song>>;

    fn get_all_stations(&self) -> ClientResult<Vec<Station>>;

    fn get_station_tracks(&self, station_id: &str, num_tracks: u32) -> ClientResult<Vec<Song>>;

    fn get_genres(&self) -> ClientResult<Vec<Genre>>;

    /// Creates a genre-seeded station and returns its id
    fn create_station(&self, name: &str, genre_id: &str) -> ClientResult<String>;

    fn search_all_access(&self, query: &str, max_results: u32) -> ClientResult<SearchResults>;

    fn get_artist_info(
        &self,
        artist_id: &str,
        include_albums: bool,
        max_top_tracks: u32,
        max_rel_artist: u32,
    ) -> ClientResult<ArtistInfo>;

    fn get_album_info(&self, album_id: &str, include_tracks: bool) -> ClientResult<AlbumInfo>;

    fn get_stream_url(&self, song_id: &str, device_id: &str) -> ClientResult<String>;
}
