//! CLI argument parsing
//!
//! Flags here override the config file and the environment.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::ScoutConfig;
use crate::state::MetadataForm;

#[derive(Parser, Debug)]
#[command(name = "ball-scout")]
#[command(about = "Annotate match video with shots and cycles")]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to <config dir>/ball-scout/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Folder holding saved sessions
    #[arg(long, global = true)]
    pub store_dir: Option<PathBuf>,

    /// Scouting API base URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run an annotation session driven by keys read from stdin or a script
    Annotate(AnnotateArgs),
    /// Serve the saved metadata and cycles over HTTP
    Serve {
        /// Listen address
        #[arg(long)]
        addr: Option<String>,
    },
    /// List events from the scouting API
    Events,
    /// Print the alliance comparison card for a match
    MatchCard {
        #[arg(long)]
        event_id: String,
        #[arg(long)]
        match_number: u32,
        /// Use generated placeholder alliances instead of the scouting API
        #[arg(long, default_value = "false")]
        demo: bool,
    },
    /// List saved sessions, newest first
    Sessions,
}

#[derive(Args, Debug, Clone, Default)]
pub struct AnnotateArgs {
    /// YouTube link to annotate
    #[arg(long, conflicts_with = "file")]
    pub url: Option<String>,

    /// Local video file to annotate
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Read commands from this file instead of stdin
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Frame rate for frame stepping
    #[arg(long)]
    pub fps: Option<f64>,

    /// Seconds moved by the Left/Right keys
    #[arg(long)]
    pub seek_step: Option<f64>,

    #[arg(long, default_value = "")]
    pub user_name: String,

    #[arg(long, default_value = "")]
    pub event_code: String,

    #[arg(long, default_value = "")]
    pub match_number: String,

    #[arg(long, default_value = "")]
    pub team_number: String,
}

impl AnnotateArgs {
    /// Metadata form prefilled from the flags; validated only on save.
    pub fn metadata_form(&self) -> MetadataForm {
        MetadataForm {
            user_name: self.user_name.clone(),
            event_code: self.event_code.clone(),
            match_number: self.match_number.clone(),
            team_number: self.team_number.clone(),
        }
    }
}

impl Cli {
    /// Apply flag overrides on top of a loaded config.
    pub fn apply_to(&self, mut config: ScoutConfig) -> ScoutConfig {
        if let Some(store_dir) = &self.store_dir {
            config.store_dir = store_dir.clone();
        }
        config = config.with_api_url_override(self.api_url.clone());
        match &self.command {
            Command::Annotate(args) => {
                if let Some(fps) = args.fps {
                    config.fps = fps;
                }
                if let Some(seek_step) = args.seek_step {
                    config.seek_step_seconds = seek_step;
                }
            }
            Command::Serve { addr: Some(addr) } => config.server_addr = addr.clone(),
            _ => {}
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_annotate() {
        let cli = Cli::try_parse_from([
            "ball-scout",
            "annotate",
            "--url",
            "https://youtu.be/abc123",
            "--team-number",
            "4334",
            "--fps",
            "60",
        ])
        .unwrap();
        let Command::Annotate(args) = &cli.command else {
            panic!("expected annotate");
        };
        assert_eq!(args.url.as_deref(), Some("https://youtu.be/abc123"));
        assert_eq!(args.metadata_form().team_number, "4334");
        assert_eq!(args.metadata_form().user_name, "");

        let config = cli.apply_to(ScoutConfig::default());
        assert_eq!(config.fps, 60.0);
        assert_eq!(config.seek_step_seconds, 5.0);
    }

    #[test]
    fn test_url_conflicts_with_file() {
        let result = Cli::try_parse_from([
            "ball-scout",
            "annotate",
            "--url",
            "https://youtu.be/abc123",
            "--file",
            "match.mp4",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_overrides() {
        let cli = Cli::try_parse_from([
            "ball-scout",
            "serve",
            "--addr",
            "0.0.0.0:9000",
            "--store-dir",
            "/tmp/scout",
            "--api-url",
            "https://scout.example.com",
        ])
        .unwrap();
        let config = cli.apply_to(ScoutConfig::default());
        assert_eq!(config.server_addr, "0.0.0.0:9000");
        assert_eq!(config.store_dir, PathBuf::from("/tmp/scout"));
        assert_eq!(config.scouting_api_url.as_deref(), Some("https://scout.example.com"));
    }

    #[test]
    fn test_match_card_requires_ids() {
        assert!(Cli::try_parse_from(["ball-scout", "match-card", "--event-id", "2025onbar"]).is_err());
        let cli = Cli::try_parse_from([
            "ball-scout",
            "match-card",
            "--event-id",
            "2025onbar",
            "--match-number",
            "12",
            "--demo",
        ])
        .unwrap();
        assert!(matches!(cli.command, Command::MatchCard { demo: true, match_number: 12, .. }));
    }
}
