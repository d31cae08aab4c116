use std::path::PathBuf;

use clap::Parser;

pub const DEFAULT_SONG_PATH: &str = "assets/demo.csv";
pub const DEFAULT_HIGHSCORE_PATH: &str = ".tui-rhythm-highscore.json";
pub const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 600;

/// Runtime configuration, read from `RHYTHM_*` environment variables
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub song_path: PathBuf,
    /// `None` disables the high-score file
    pub highscore_path: Option<PathBuf>,
    /// Fallback release delay for terminals that never report key releases
    pub key_release_timeout_ms: u32,
    pub mute: bool,
    pub log_path: Option<PathBuf>,
    pub log_filter: Option<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            song_path: PathBuf::from(DEFAULT_SONG_PATH),
            highscore_path: Some(PathBuf::from(DEFAULT_HIGHSCORE_PATH)),
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
            mute: false,
            log_path: None,
            log_filter: None,
        }
    }
}

impl GameConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup (the environment in production)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .and_then(|s| if s.is_empty() { None } else { Some(s) })
        };

        let song_path = non_empty("RHYTHM_SONG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SONG_PATH));

        // Unset means the default file; set-but-empty turns persistence off.
        let highscore_path = match lookup("RHYTHM_HIGHSCORE_PATH") {
            None => Some(PathBuf::from(DEFAULT_HIGHSCORE_PATH)),
            Some(s) if s.trim().is_empty() => None,
            Some(s) => Some(PathBuf::from(s.trim())),
        };

        let key_release_timeout_ms = non_empty("RHYTHM_KEY_RELEASE_TIMEOUT_MS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_KEY_RELEASE_TIMEOUT_MS);

        let mute = non_empty("RHYTHM_MUTE")
            .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Self {
            song_path,
            highscore_path,
            key_release_timeout_ms,
            mute,
            log_path: non_empty("RHYTHM_LOG_PATH").map(PathBuf::from),
            log_filter: non_empty("RHYTHM_LOG"),
        }
    }

    /// Layer parsed command-line flags over this config
    pub fn with_cli(mut self, cli: Cli) -> Self {
        if let Some(song) = cli.song {
            self.song_path = song;
        }
        if cli.no_highscore {
            self.highscore_path = None;
        } else if let Some(path) = cli.highscore {
            self.highscore_path = Some(path);
        }
        if let Some(ms) = cli.key_release_timeout_ms {
            self.key_release_timeout_ms = ms;
        }
        self.mute |= cli.mute;
        if cli.log_file.is_some() {
            self.log_path = cli.log_file;
        }
        if cli.log.is_some() {
            self.log_filter = cli.log;
        }
        self
    }
}

/// Command-line flags; anything left out falls back to `RHYTHM_*` variables
#[derive(Parser, Debug, Clone, Default, PartialEq)]
#[command(name = "tui-rhythm", version, about = "Four-lane terminal rhythm game")]
pub struct Cli {
    /// Score file to play (CSV)
    #[arg(value_name = "SONG")]
    pub song: Option<PathBuf>,

    /// High-score file
    #[arg(long, value_name = "PATH", conflicts_with = "no_highscore")]
    pub highscore: Option<PathBuf>,

    /// Do not read or write a high-score file
    #[arg(long, default_value_t = false)]
    pub no_highscore: bool,

    /// Release delay for terminals that never report key releases
    #[arg(long, value_name = "MS")]
    pub key_release_timeout_ms: Option<u32>,

    /// Discard sound commands
    #[arg(long, default_value_t = false)]
    pub mute: bool,

    /// Append logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `tui_rhythm_engine=trace`
    #[arg(long, value_name = "FILTER")]
    pub log: Option<String>,
}
