use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tunedeck::catalog::SongCatalog;
use tunedeck::model::SongId;
use tunedeck::persist::PlaylistFile;
use tunedeck::playback::LogDevice;
use tunedeck::store::PlaylistStore;
use tunedeck::{Command, Error, Outcome, Session};

#[derive(Parser, Debug)]
#[command(name = "tunedeck")]
#[command(about = "Catalog local audio files and manage playlists", long_about = None)]
struct Args {
    /// Directory scanned for songs (mp3/wav, flat)
    #[arg(short = 's', long, default_value = "songs")]
    songs_dir: String,

    /// Path of the playlist document
    #[arg(short = 'f', long, default_value = "playlists.json")]
    playlists_file: String,

    /// Verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,

    #[command(subcommand)]
    command: Cli,
}

#[derive(Subcommand, Debug)]
enum Cli {
    /// List the audio files found in the songs directory
    Songs,

    /// List all playlists
    List,

    /// Show a playlist's entries in order
    Show { name: String },

    /// Create a playlist from song numbers reported by `songs`
    Create {
        name: String,
        /// 1-based song numbers from the `songs` listing
        #[arg(required = true)]
        songs: Vec<usize>,
    },

    /// Add a single picked audio file to a playlist
    Add { playlist: String, path: String },

    /// Remove every copy of the song at the given entry position
    Remove {
        playlist: String,
        /// 1-based entry position from the `show` listing
        position: usize,
    },

    /// Move an entry to a new position
    Reorder {
        playlist: String,
        /// 1-based position of the entry to move
        from: usize,
        /// 1-based position to move it to
        to: usize,
    },

    /// Delete a playlist
    Delete { name: String },

    /// Select a playlist and control playback interactively
    Play { name: String },
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Expand ~ in paths
    let songs_dir = PathBuf::from(shellexpand::tilde(&args.songs_dir).as_ref());
    let document_path = PathBuf::from(shellexpand::tilde(&args.playlists_file).as_ref());

    let file = PlaylistFile::new(document_path);
    let store = match PlaylistStore::open(file.clone()) {
        Ok(store) => store,
        Err(Error::CorruptData(msg)) => {
            // Keep the bad file on disk for inspection and carry on empty.
            log::warn!("Playlist document unreadable, starting empty: {msg}");
            PlaylistStore::new(file)
        }
        Err(e) => return Err(e).context("failed to load playlists"),
    };

    let mut session = Session::new(SongCatalog::new(), store, LogDevice::new());

    match args.command {
        Cli::Songs => {
            session.catalog_mut().scan(&songs_dir)?;
            if session.catalog().is_empty() {
                println!("No supported audio files in {:?}", songs_dir);
            }
            for (i, song) in session.catalog().songs().iter().enumerate() {
                println!("{:3}. {}", i + 1, song.display_name);
            }
        }

        Cli::List => render(session.dispatch(Command::ListPlaylists)?),

        Cli::Show { name } => render(session.dispatch(Command::ShowPlaylist { name })?),

        Cli::Create { name, songs } => {
            session.catalog_mut().scan(&songs_dir)?;
            let song_ids = songs
                .iter()
                .map(|&n| catalog_id(&session, n))
                .collect::<Result<Vec<_>>>()?;
            render(session.dispatch(Command::CreatePlaylist { name, song_ids })?);
        }

        Cli::Add { playlist, path } => {
            let path = PathBuf::from(shellexpand::tilde(&path).as_ref());
            let song = session.catalog_mut().add_picked(path);
            render(session.dispatch(Command::AddSong {
                playlist,
                song_id: song.id,
            })?);
        }

        Cli::Remove { playlist, position } => {
            let song_id = entry_id(&session, &playlist, position)?;
            render(session.dispatch(Command::RemoveSong { playlist, song_id })?);
        }

        Cli::Reorder { playlist, from, to } => {
            if from == 0 || to == 0 {
                bail!("entry positions are 1-based");
            }
            render(session.dispatch(Command::Reorder {
                playlist,
                from: from - 1,
                to: to - 1,
            })?);
        }

        Cli::Delete { name } => render(session.dispatch(Command::DeletePlaylist { name })?),

        Cli::Play { name } => play_loop(&mut session, name)?,
    }

    Ok(())
}

/// Map a 1-based number from the `songs` listing to a catalog id
fn catalog_id(session: &Session<LogDevice>, number: usize) -> Result<SongId> {
    session
        .catalog()
        .songs()
        .get(number.checked_sub(1).context("song numbers are 1-based")?)
        .map(|s| s.id.clone())
        .with_context(|| format!("no song number {number}; run `tunedeck songs`"))
}

/// Map a 1-based entry position from the `show` listing to its song id
fn entry_id(session: &Session<LogDevice>, playlist: &str, position: usize) -> Result<SongId> {
    let entries = match session.store().get(playlist) {
        Some(p) => &p.entries,
        None => bail!("{}", Error::NotFound(format!("playlist '{playlist}'"))),
    };
    entries
        .get(position.checked_sub(1).context("entry positions are 1-based")?)
        .map(|s| s.id.clone())
        .with_context(|| format!("playlist '{playlist}' has no entry {position}"))
}

/// Interactive playback controls for one selected playlist
fn play_loop(session: &mut Session<LogDevice>, name: String) -> Result<()> {
    render(session.dispatch(Command::SelectPlaylist { name })?);
    println!("Controls: p = play, s = stop, n = next, b = previous, q = quit");

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let command = match line.trim() {
            "p" => Command::Play { index: None },
            "s" => Command::Stop,
            "n" => Command::Next,
            "b" => Command::Previous,
            "q" => break,
            "" => continue,
            other => {
                println!("Unknown control '{other}' (p/s/n/b/q)");
                continue;
            }
        };

        // Playback errors are recoverable; report and keep the loop alive.
        match session.dispatch(command) {
            Ok(outcome) => render(outcome),
            Err(e) => eprintln!("{e}"),
        }
    }

    Ok(())
}

/// Print a command outcome for the terminal
fn render(outcome: Outcome) {
    match outcome {
        Outcome::Playlists(names) => {
            if names.is_empty() {
                println!("No playlists yet");
            }
            for name in names {
                println!("{name}");
            }
        }
        Outcome::Entries { name, entries } => {
            println!("{name} ({} entries)", entries.len());
            for (i, song) in entries.iter().enumerate() {
                println!("{:3}. {}", i + 1, song.display_name);
            }
        }
        Outcome::Changed { playlist } => println!("Playlist '{playlist}' updated"),
        Outcome::Position {
            playlist,
            index,
            state,
        } => println!("{playlist}: entry {} ({state:?})", index + 1),
        Outcome::Stopped => println!("Stopped"),
    }
}
