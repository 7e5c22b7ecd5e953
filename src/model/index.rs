//! Grouped views over the song list (by artist, album or genre)

use std::str::FromStr;

use indexmap::IndexMap;

use super::types::{IndexEntry, Song, Track};

/// Which grouping of the library a lookup targets
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CatalogKind {
    Artists,
    Albums,
    Genres,
}

impl CatalogKind {
    /// Singular name used in error messages
    pub fn label(self) -> &'static str {
        match self {
            CatalogKind::Artists => "artist",
            CatalogKind::Albums => "album",
            CatalogKind::Genres => "genre",
        }
    }

    fn key(self, song: &Song) -> &str {
        match self {
            CatalogKind::Artists => &song.artist,
            CatalogKind::Albums => &song.album,
            CatalogKind::Genres => &song.genre,
        }
    }

    fn thumb(self, song: &Song) -> Option<&str> {
        match self {
            CatalogKind::Artists => song.artist_thumb(),
            CatalogKind::Albums | CatalogKind::Genres => song.album_thumb(),
        }
    }
}

/// Parses the type tags `artists`, `albums` and `genres`, ignoring case.
impl FromStr for CatalogKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "artists" => Ok(CatalogKind::Artists),
            "albums" => Ok(CatalogKind::Albums),
            "genres" => Ok(CatalogKind::Genres),
            _ => Err(()),
        }
    }
}

/// Songs grouped under one key, plus one thumbnail URL per key.
///
/// Buckets and thumbnails keep the order in which keys first appeared in the
/// song list.
#[derive(Clone, Debug)]
pub struct CatalogIndex {
    kind: CatalogKind,
    tracks: IndexMap<String, Vec<IndexEntry>>,
    thumbs: IndexMap<String, Option<String>>,
    built: bool,
}

impl CatalogIndex {
    pub fn new(kind: CatalogKind) -> Self {
        Self {
            kind,
            tracks: IndexMap::new(),
            thumbs: IndexMap::new(),
            built: false,
        }
    }

    pub fn kind(&self) -> CatalogKind {
        self.kind
    }

    pub fn is_built(&self) -> bool {
        self.built
    }

    /// Rebuilds the index from `songs`.
    ///
    /// `complete` marks whether `songs` is the loaded library; an index built
    /// over a failed fetch stays unbuilt so the next call tries again.
    pub fn build(&mut self, songs: &[Song], complete: bool) {
        self.tracks.clear();
        self.thumbs.clear();

        for song in songs {
            let key = self.kind.key(song);
            let thumb = self.kind.thumb(song).map(str::to_owned);

            let known = self.thumbs.entry(key.to_owned()).or_insert(None);
            if thumb.is_some() {
                *known = thumb.clone();
            }

            self.tracks
                .entry(key.to_owned())
                .or_default()
                .push(IndexEntry {
                    track: Track::from(song),
                    thumb,
                    id: song.id.clone(),
                });
        }

        self.built = complete;
    }

    pub fn tracks(&self) -> &IndexMap<String, Vec<IndexEntry>> {
        &self.tracks
    }

    pub fn thumbs(&self) -> &IndexMap<String, Option<String>> {
        &self.thumbs
    }

    pub fn get(&self, name: &str) -> Option<&[IndexEntry]> {
        self.tracks.get(name).map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::types::ArtRef;

    fn song(id: &str, artist: &str, album: &str, genre: &str) -> Song {
        Song {
            id: id.to_string(),
            title: format!("title {id}"),
            album: album.to_string(),
            artist: artist.to_string(),
            genre: genre.to_string(),
            duration_millis: 1000,
            track_number: 1,
            ..Default::default()
        }
    }

    fn art(url: &str) -> Option<Vec<ArtRef>> {
        Some(vec![ArtRef { url: url.to_string() }])
    }

    #[test]
    fn test_kind_parses_case_insensitively() {
        assert_eq!("ARTISTS".parse::<CatalogKind>(), Ok(CatalogKind::Artists));
        assert_eq!("Albums".parse::<CatalogKind>(), Ok(CatalogKind::Albums));
        assert_eq!("genres".parse::<CatalogKind>(), Ok(CatalogKind::Genres));
        assert_eq!("playlists".parse::<CatalogKind>(), Err(()));
    }

    #[test]
    fn test_groups_by_key_in_first_seen_order() {
        let songs = vec![
            song("1", "B", "x", "Rock"),
            song("2", "A", "y", "Rock"),
            song("3", "B", "z", "Jazz"),
        ];
        let mut index = CatalogIndex::new(CatalogKind::Artists);
        index.build(&songs, true);

        let keys: Vec<&str> = index.tracks().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["B", "A"]);
        let ids: Vec<&str> = index.get("B").unwrap().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
        assert!(index.is_built());
    }

    #[test]
    fn test_artist_thumb_comes_from_artist_art_and_last_one_wins() {
        let mut first = song("1", "A", "x", "Rock");
        first.artist_art_ref = art("http://a/1");
        let plain = song("2", "A", "x", "Rock");
        let mut last = song("3", "A", "x", "Rock");
        last.artist_art_ref = art("http://a/3");
        last.album_art_ref = art("http://album");

        let mut index = CatalogIndex::new(CatalogKind::Artists);
        index.build(&[first, plain, last], true);

        let entries = index.get("A").unwrap();
        assert_eq!(entries[0].thumb.as_deref(), Some("http://a/1"));
        assert_eq!(entries[1].thumb, None);
        assert_eq!(entries[2].thumb.as_deref(), Some("http://a/3"));
        assert_eq!(index.thumbs()["A"].as_deref(), Some("http://a/3"));
    }

    #[test]
    fn test_thumb_stays_none_without_art() {
        let mut index = CatalogIndex::new(CatalogKind::Genres);
        index.build(&[song("1", "A", "x", "Rock")], true);
        assert_eq!(index.thumbs()["Rock"], None);
    }

    #[test]
    fn test_genre_and_album_thumbs_use_album_art() {
        let mut with_art = song("1", "A", "x", "Rock");
        with_art.album_art_ref = art("http://album/x");
        with_art.artist_art_ref = art("http://artist/a");

        for kind in [CatalogKind::Albums, CatalogKind::Genres] {
            let mut index = CatalogIndex::new(kind);
            index.build(std::slice::from_ref(&with_art), true);
            let entry = &index.tracks()[0][0];
            assert_eq!(entry.thumb.as_deref(), Some("http://album/x"));
            assert_eq!(entry.track.album_art_ref, with_art.album_art_ref);
        }
    }

    #[test]
    fn test_incomplete_build_is_not_marked_built() {
        let mut index = CatalogIndex::new(CatalogKind::Albums);
        index.build(&[], false);
        assert!(!index.is_built());
        assert!(index.tracks().is_empty());
    }
}
