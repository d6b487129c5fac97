//! Terminal binary for Momentos.

use std::path::PathBuf;
use std::process;

use clap::Parser;

use momentos_core::playback::tracks;
use momentos_core::{SECTIONS, Session, SessionConfig, TabId};
use momentos_tui::app::TuiApp;
use momentos_tui::audio::{CommandPlayer, TerminalCues};

#[derive(Parser)]
#[command(
    name = "momentos",
    about = "Roulette of moments, heart die and score counter for two",
    version
)]
struct Args {
    /// Start on a specific tab (roulette, dice, score)
    #[arg(long, default_value = "roulette")]
    tab: String,

    /// RNG seed for spins and rolls (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Initial volume (0.0-1.0)
    #[arg(long, default_value = "0.7", value_parser = parse_volume)]
    volume: f32,

    /// Start muted
    #[arg(long)]
    muted: bool,

    /// Program used to play music tracks (e.g. mpv)
    #[arg(long)]
    player: Option<String>,

    /// Directory containing 1.mp3 .. 15.mp3
    #[arg(long, default_value = ".")]
    music_dir: PathBuf,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Ring the terminal bell for sound cues
    #[arg(long)]
    bell: bool,

    /// Print the roulette sections and exit
    #[arg(long)]
    list_sections: bool,

    /// Print the music tracks and exit
    #[arg(long)]
    list_tracks: bool,
}

/// Parse a volume and reject values outside 0.0-1.0.
fn parse_volume(s: &str) -> Result<f32, String> {
    let volume: f32 = s.parse().map_err(|_| format!("'{s}' is not a number"))?;
    if (0.0..=1.0).contains(&volume) {
        Ok(volume)
    } else {
        Err(format!("volume must be between 0.0 and 1.0, got {volume}"))
    }
}

fn main() {
    let args = Args::parse();

    if args.list_sections {
        for (i, section) in SECTIONS.iter().enumerate() {
            let kind = if section.is_good { "good" } else { "bad" };
            println!("{:>2}  {:<4}  {}", i + 1, kind, section.text);
        }
        return;
    }
    if args.list_tracks {
        for track in tracks() {
            println!("{:>2}  {}  {}", track.id, track.title, args.music_dir.join(&track.file).display());
        }
        return;
    }

    if let Err(e) = momentos_tui::logging::init(args.log_file.as_deref()) {
        eprintln!("error: {e}");
        process::exit(1);
    }

    let tab = TabId::from_name(&args.tab).unwrap_or_default();
    let mut config = SessionConfig::default()
        .with_volume(args.volume)
        .with_muted(args.muted)
        .with_tab(tab);
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let cues = TerminalCues::new(args.bell);
    let session = Session::new(config)
        .with_cue_sink(cues.clone())
        .with_player(CommandPlayer::new(args.player, args.music_dir));
    tracing::info!(tab = ?tab, seed = ?args.seed, "session started");

    let app = TuiApp::new(session, cues);
    if let Err(e) = momentos_tui::terminal::run(app) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
