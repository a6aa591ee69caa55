use clap::Subcommand;
use focusdeck_core::music::{extract_video_id, AddOutcome, MusicLibrary, PlayerVolume};
use focusdeck_core::{Config, SqliteStore, Track};

#[derive(Subcommand)]
pub enum TracksAction {
    /// List the playlist (built-in and saved tracks)
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Save a YouTube link to the playlist
    Add {
        /// Display title
        title: String,
        /// YouTube link (watch, short, shorts or embed form)
        url: String,
    },
    /// Print the video id of a YouTube link
    Resolve {
        url: String,
    },
    /// Show or change the player volume
    Volume {
        /// New level between 0 and 1 (0 mutes)
        level: Option<f64>,
        /// Toggle mute, keeping the level to restore
        #[arg(long)]
        toggle_mute: bool,
    },
}

pub fn run(action: TracksAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        TracksAction::List { json } => {
            let library = MusicLibrary::open(SqliteStore::open()?);
            let tracks = library.playlist().tracks();
            if json {
                println!("{}", serde_json::to_string_pretty(tracks)?);
            } else {
                for (index, track) in tracks.iter().enumerate() {
                    println!("{}", format_row(index, track));
                }
            }
        }
        TracksAction::Add { title, url } => {
            let mut library = MusicLibrary::open(SqliteStore::open()?);
            let outcome = library
                .submit(&title, &url)
                .map_err(|e| format!("{}: {e}", e.code()))?;
            match outcome {
                AddOutcome::Added(index) => println!("added #{index}"),
                AddOutcome::Duplicate(index) => println!("already saved as #{index}"),
            }
        }
        TracksAction::Resolve { url } => match extract_video_id(&url) {
            Some(id) => println!("{id}"),
            None => return Err("INVALID_URL: Not a recognizable YouTube URL".into()),
        },
        TracksAction::Volume { level, toggle_mute } => {
            let mut config = Config::load()?;
            let mut player = PlayerVolume::from_config(&config.player);
            if let Some(level) = level {
                player.set(level);
            }
            if toggle_mute {
                player.toggle_mute();
            }
            if level.is_some() || toggle_mute {
                player.apply_to(&mut config.player);
                config.save()?;
            }
            println!("{}", format_volume(&player));
        }
    }
    Ok(())
}

fn format_volume(player: &PlayerVolume) -> String {
    let mut line = format!(
        "{}  {:.0}%",
        player.level().as_str(),
        player.volume() * 100.0
    );
    if player.is_muted() {
        line.push_str("  muted");
    }
    line
}

fn format_row(index: usize, track: &Track) -> String {
    let kind = if track.is_remote() { "remote" } else { "local" };
    format!(
        "{index:>3}  {kind:<6}  {:<12}  {} - {}",
        track.id(),
        track.title(),
        track.subtitle()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use focusdeck_core::music::builtin_tracks;

    #[test]
    fn row_shows_kind_and_id() {
        let track = &builtin_tracks()[0];
        let row = format_row(0, track);
        assert!(row.starts_with("  0  local"));
        assert!(row.contains("hz396"));
        assert!(row.contains("396 Hz - Release Fear"));
    }

    #[test]
    fn volume_line_shows_level_and_mute() {
        let mut player = PlayerVolume::new(0.7);
        assert_eq!(format_volume(&player), "volume_up  70%");
        player.toggle_mute();
        assert_eq!(format_volume(&player), "volume_off  70%  muted");
    }
}
