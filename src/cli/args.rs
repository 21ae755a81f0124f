//! CLI argument definitions.

use super::validators::{parse_dataset_name, parse_extension};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Cut utterance-level speech datasets out of annotated recordings.
#[derive(Debug, Parser)]
#[command(name = "uttercut")]
#[command(author, version, about, long_about = None)]
#[command(subcommand_negates_reqs = true)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Directory of source recordings.
    #[arg(value_name = "AUDIO_DIR", required_unless_present = "audio_path")]
    pub audio_dir: Option<PathBuf>,

    /// Directory of annotation documents.
    #[arg(value_name = "ANNOTATION_DIR", required_unless_present = "transcript_path")]
    pub annotation_dir: Option<PathBuf>,

    /// Directory the dataset is written into.
    #[arg(value_name = "OUTPUT_DIR", required_unless_present = "output_path")]
    pub output_dir: Option<PathBuf>,

    /// Directory of source recordings (named form of AUDIO_DIR).
    #[arg(long, conflicts_with = "audio_dir")]
    pub audio_path: Option<PathBuf>,

    /// Directory of annotation documents (named form of ANNOTATION_DIR).
    #[arg(long, conflicts_with = "annotation_dir")]
    pub transcript_path: Option<PathBuf>,

    /// Output directory (named form of OUTPUT_DIR).
    #[arg(long, conflicts_with = "output_dir")]
    pub output_path: Option<PathBuf>,

    /// Options for the dataset build.
    #[command(flatten)]
    pub build: BuildArgs,
}

impl Cli {
    /// Recording directory from either the positional or the named form.
    pub fn audio_input(&self) -> Option<PathBuf> {
        self.audio_path.clone().or_else(|| self.audio_dir.clone())
    }

    /// Annotation directory from either the positional or the named form.
    pub fn annotation_input(&self) -> Option<PathBuf> {
        self.transcript_path
            .clone()
            .or_else(|| self.annotation_dir.clone())
    }

    /// Output directory from either the positional or the named form.
    pub fn output_location(&self) -> Option<PathBuf> {
        self.output_path.clone().or_else(|| self.output_dir.clone())
    }
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Create default configuration file.
    Init,
    /// Display current configuration.
    Show,
    /// Print configuration file path.
    Path,
}

/// Options shared by every build.
#[derive(Debug, Args)]
pub struct BuildArgs {
    /// Configuration file to use instead of the default location.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Name of the dataset directory created inside the output directory.
    #[arg(long, value_parser = parse_dataset_name)]
    pub dataset_name: Option<String>,

    /// Take utterances from the interval tier with this name.
    #[arg(long, conflicts_with = "tier_index")]
    pub tier: Option<String>,

    /// Take utterances from the tier at this position (0-based).
    #[arg(long)]
    pub tier_index: Option<usize>,

    /// Recording file extension.
    #[arg(long, value_parser = parse_extension)]
    pub audio_extension: Option<String>,

    /// Annotation file extension.
    #[arg(long, value_parser = parse_extension)]
    pub annotation_extension: Option<String>,

    /// Stop on the first recording that cannot be processed.
    #[arg(long)]
    pub fail_fast: bool,

    /// Disable progress bars.
    #[arg(long)]
    pub no_progress: bool,

    /// Print the build summary as a JSON result event.
    #[arg(long)]
    pub json: bool,

    /// Suppress progress output.
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_positional_directories() {
        let cli = Cli::try_parse_from(["uttercut", "audio", "grids", "out"]).unwrap();
        assert_eq!(cli.audio_input(), Some(PathBuf::from("audio")));
        assert_eq!(cli.annotation_input(), Some(PathBuf::from("grids")));
        assert_eq!(cli.output_location(), Some(PathBuf::from("out")));
        assert!(!cli.build.fail_fast);
    }

    #[test]
    fn test_named_directories() {
        let cli = Cli::try_parse_from([
            "uttercut",
            "--audio-path",
            "audio",
            "--transcript-path",
            "grids",
            "--output-path",
            "out",
            "--fail-fast",
            "--tier",
            "Doctor",
        ])
        .unwrap();
        assert_eq!(cli.audio_input(), Some(PathBuf::from("audio")));
        assert_eq!(cli.annotation_input(), Some(PathBuf::from("grids")));
        assert_eq!(cli.output_location(), Some(PathBuf::from("out")));
        assert!(cli.build.fail_fast);
        assert_eq!(cli.build.tier.as_deref(), Some("Doctor"));
    }

    #[test]
    fn test_missing_directories_rejected() {
        assert!(Cli::try_parse_from(["uttercut", "audio"]).is_err());
    }

    #[test]
    fn test_tier_and_index_conflict() {
        let result = Cli::try_parse_from([
            "uttercut", "a", "b", "c", "--tier", "Doctor", "--tier-index", "1",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_dataset_name_validated() {
        assert!(Cli::try_parse_from(["uttercut", "a", "b", "c", "--dataset-name", "../x"]).is_err());
    }

    #[test]
    fn test_config_subcommand() {
        let cli = Cli::try_parse_from(["uttercut", "config", "path"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Config {
                action: ConfigAction::Path
            })
        ));
    }
}
