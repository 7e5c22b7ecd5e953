use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use gmusic_rs::config::Config;
use gmusic_rs::logging;
use gmusic_rs::snapshot::SnapshotClient;
use gmusic_rs::{ArtistInfoOptions, CatalogSession};

type Session = CatalogSession<SnapshotClient, SnapshotClient>;

#[derive(Parser, Debug)]
#[clap(
    version = env!("CARGO_PKG_VERSION"),
    name = env!("CARGO_PKG_NAME"),
    about = env!("CARGO_PKG_DESCRIPTION"),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Account and library overview
    Summary,
    /// Songs grouped by artist
    Artists,
    /// Songs grouped by album
    Albums,
    /// Songs grouped by genre
    Genres,
    /// Tracks of one artist, album or genre
    Tracks { kind: String, name: String },
    /// A single song from the library
    Song { id: String },
    /// The user's playlists
    Playlists,
    /// Entries of one playlist
    Playlist { id: String },
    /// Entries of a shared playlist
    Shared { token: String },
    /// Radio stations
    Stations,
    /// Tracks of a station
    Station {
        id: String,
        #[clap(long, default_value_t = Session::DEFAULT_STATION_TRACKS)]
        count: u32,
    },
    /// Create a genre-seeded station
    CreateStation { name: String, genre_id: String },
    /// Genres known to the service
    GenreList,
    /// Search the catalog
    Search {
        query: String,
        #[clap(long, default_value_t = Session::DEFAULT_SEARCH_RESULTS)]
        max: u32,
    },
    /// Artist details
    Artist {
        id: String,
        #[clap(long)]
        no_albums: bool,
    },
    /// Album details
    Album {
        id: String,
        #[clap(long)]
        no_tracks: bool,
    },
    /// Stream URL of a song
    Stream { id: String },
}

fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[derive(Serialize)]
struct Summary {
    authenticated: bool,
    all_access: bool,
    device_id: Option<String>,
    songs: usize,
    artists: usize,
    albums: usize,
    genres: usize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    if let Err(e) = logging::init_logging(&config.log_dir) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::info!(command = ?cli.command, "=== gmusic-rs starting ===");

    let web = SnapshotClient::open(&config.library_path)?;
    let mobile = SnapshotClient::open(&config.library_path)?;
    let mut session = CatalogSession::new(web, mobile);

    if !session.authenticate(&config.email, &config.password)? {
        tracing::error!(email = %config.email, "Authentication failed");
        bail!("authentication failed for {}", config.email);
    }

    run(&mut session, cli.command)
}

fn run(session: &mut Session, command: Command) -> Result<()> {
    match command {
        Command::Summary => {
            session.load_data()?;
            let summary = Summary {
                authenticated: session.is_authenticated(),
                all_access: session.is_all_access(),
                device_id: session.device_id().map(str::to_owned),
                songs: session.load_songs()?.len(),
                artists: session.load_artists()?.len(),
                albums: session.load_albums()?.len(),
                genres: session.load_genres()?.len(),
            };
            print_json(&summary)
        }
        Command::Artists => print_json(session.load_artists()?),
        Command::Albums => print_json(session.load_albums()?),
        Command::Genres => print_json(session.load_genres()?),
        Command::Tracks { kind, name } => print_json(&session.get_tracks_for_type(&kind, &name)?),
        Command::Song { id } => {
            session.load_songs()?;
            print_json(session.get_song(&id)?)
        }
        Command::Playlists => print_json(&session.get_all_playlists()?),
        Command::Playlist { id } => print_json(&session.get_all_user_playlist_contents(&id)?),
        Command::Shared { token } => print_json(&session.get_shared_playlist_contents(&token)?),
        Command::Stations => print_json(&session.get_all_stations()?),
        Command::Station { id, count } => print_json(&session.get_station_tracks(&id, count)?),
        Command::CreateStation { name, genre_id } => {
            print_json(&session.create_station(&name, &genre_id)?)
        }
        Command::GenreList => print_json(&session.get_genres()?),
        Command::Search { query, max } => print_json(&session.search_all_access(&query, max)?),
        Command::Artist { id, no_albums } => {
            let options = ArtistInfoOptions {
                include_albums: !no_albums,
                ..Default::default()
            };
            print_json(&session.get_artist_info(&id, options)?)
        }
        Command::Album { id, no_tracks } => print_json(&session.get_album_info(&id, !no_tracks)?),
        Command::Stream { id } => print_json(&session.get_stream_url(&id)?),
    }
}
