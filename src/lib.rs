//! Uttercut - utterance-level speech dataset builder.
//!
//! Reads a corpus of long recordings and their Praat TextGrid annotations,
//! cuts one clip per transcribed utterance, and writes the clips together
//! with a `metadata.csv` table ready for audio-dataset loaders.

#![warn(missing_docs)]

pub mod annotation;
pub mod audio;
pub mod cli;
pub mod config;
pub mod constants;
pub mod dataset;
pub mod error;
pub mod output;
pub mod text;

use clap::{CommandFactory, Parser};
use cli::{BuildArgs, Cli, Command, ConfigAction};
use config::{
    Config, config_file_path, load_config_file, load_default_config, save_default_config,
    validate_config,
};
use dataset::{BuildConfig, Dataset};
use output::{BuildResultPayload, ConfigPayload, emit_json_result};
use std::path::PathBuf;
use tracing::info;

pub use annotation::TierSelector;
pub use error::{Error, Result};

/// Main entry point for the uttercut CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.build.verbose, cli.build.quiet || cli.build.json);

    let config = load_config(&cli.build)?;

    if let Some(command) = cli.command {
        return match command {
            Command::Config { action } => handle_config_command(action, &config, &cli.build),
        };
    }

    let (Some(audio_dir), Some(annotation_dir), Some(output_dir)) = (
        cli.audio_input(),
        cli.annotation_input(),
        cli.output_location(),
    ) else {
        Cli::command()
            .error(
                clap::error::ErrorKind::MissingRequiredArgument,
                "AUDIO_DIR, ANNOTATION_DIR and OUTPUT_DIR are required",
            )
            .exit();
    };

    let build_config =
        build_config_from(audio_dir, annotation_dir, output_dir, &cli.build, &config)?;
    let dataset = dataset::build(&build_config)?;
    report_dataset(&dataset, cli.build.json);
    Ok(())
}

/// Load the configuration file named by `--config`, or the default one.
fn load_config(args: &BuildArgs) -> Result<Config> {
    match &args.config {
        Some(path) => {
            if !path.is_file() {
                return Err(Error::ConfigRead {
                    path: path.clone(),
                    source: std::io::Error::from(std::io::ErrorKind::NotFound),
                });
            }
            load_config_file(path)
        }
        None => load_default_config(),
    }
}

/// Merge CLI flags over file configuration.
///
/// Flags always win; a flag that is absent leaves the file value alone.
pub fn build_config_from(
    audio_dir: PathBuf,
    annotation_dir: PathBuf,
    output_dir: PathBuf,
    args: &BuildArgs,
    config: &Config,
) -> Result<BuildConfig> {
    let mut merged = config.clone();

    if let Some(name) = &args.dataset_name {
        merged.build.dataset_name.clone_from(name);
    }
    if let Some(name) = &args.tier {
        merged.tier = TierSelector::Name(name.clone());
    } else if let Some(index) = args.tier_index {
        merged.tier = TierSelector::Index(index);
    }
    if let Some(extension) = &args.audio_extension {
        merged.build.audio_extension.clone_from(extension);
    }
    if let Some(extension) = &args.annotation_extension {
        merged.build.annotation_extension.clone_from(extension);
    }
    if args.fail_fast {
        merged.build.fail_fast = true;
    }

    validate_config(&merged)?;

    let progress_enabled =
        merged.build.progress && !args.no_progress && !args.quiet && !args.json;

    Ok(BuildConfig {
        audio_dir,
        annotation_dir,
        output_dir,
        dataset_name: merged.build.dataset_name,
        tier: merged.tier,
        fail_fast: merged.build.fail_fast,
        audio_extension: merged.build.audio_extension,
        annotation_extension: merged.build.annotation_extension,
        progress: progress_enabled,
    })
}

#[allow(clippy::print_stdout)]
fn report_dataset(dataset: &Dataset, json: bool) {
    if json {
        emit_json_result(&BuildResultPayload::from(dataset));
    } else {
        println!("{}", dataset.root.display());
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter_str = if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    // stdout carries only the dataset path or JSON result
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[allow(clippy::print_stdout)]
fn handle_config_command(action: ConfigAction, config: &Config, args: &BuildArgs) -> Result<()> {
    match action {
        ConfigAction::Init => {
            let path = config_file_path()?;
            if path.exists() {
                println!("Configuration file already exists: {}", path.display());
            } else {
                let saved_path = save_default_config(&Config::default())?;
                info!("Created configuration file: {}", saved_path.display());
                println!("{}", saved_path.display());
            }
            Ok(())
        }
        ConfigAction::Show => {
            if args.json {
                let config_path = match &args.config {
                    Some(path) => path.clone(),
                    None => config_file_path()?,
                };
                let value = serde_json::to_value(config)
                    .map_err(|e| Error::JsonSerialize { source: e })?;
                emit_json_result(&ConfigPayload {
                    result_type: output::json_envelope::ResultType::Config,
                    config_path,
                    config: value,
                });
            } else {
                println!("{config:#?}");
            }
            Ok(())
        }
        ConfigAction::Path => {
            let path = config_file_path()?;
            println!("{}", path.display());
            Ok(())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    fn merge(cli: &Cli, config: &Config) -> Result<BuildConfig> {
        build_config_from(
            cli.audio_input().unwrap(),
            cli.annotation_input().unwrap(),
            cli.output_location().unwrap(),
            &cli.build,
            config,
        )
    }

    #[test]
    fn test_defaults_without_flags() {
        let cli = parse(&["uttercut", "audio", "grids", "out"]);
        let build = merge(&cli, &Config::default()).unwrap();
        assert_eq!(build.dataset_name, "primock57");
        assert_eq!(build.tier, TierSelector::First);
        assert!(!build.fail_fast);
        assert!(build.progress);
    }

    #[test]
    fn test_flags_override_file() {
        let mut config = Config::default();
        config.build.dataset_name = "from_file".to_string();
        config.tier = TierSelector::Name("Patient".to_string());

        let cli = parse(&[
            "uttercut",
            "audio",
            "grids",
            "out",
            "--dataset-name",
            "from_cli",
            "--tier-index",
            "1",
            "--fail-fast",
            "--json",
        ]);
        let build = merge(&cli, &config).unwrap();
        assert_eq!(build.dataset_name, "from_cli");
        assert_eq!(build.tier, TierSelector::Index(1));
        assert!(build.fail_fast);
        assert!(!build.progress);
    }

    #[test]
    fn test_file_values_kept_when_flags_absent() {
        let mut config = Config::default();
        config.build.fail_fast = true;
        config.build.progress = false;
        config.tier = TierSelector::Name("Doctor".to_string());

        let cli = parse(&["uttercut", "audio", "grids", "out"]);
        let build = merge(&cli, &config).unwrap();
        assert!(build.fail_fast);
        assert!(!build.progress);
        assert_eq!(build.tier, TierSelector::Name("Doctor".to_string()));
    }

    #[test]
    fn test_load_config_missing_explicit_file() {
        let cli = parse(&[
            "uttercut",
            "audio",
            "grids",
            "out",
            "--config",
            "/nonexistent/uttercut.toml",
        ]);
        assert!(matches!(
            load_config(&cli.build),
            Err(Error::ConfigRead { .. })
        ));
    }
}
