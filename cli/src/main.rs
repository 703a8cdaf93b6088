//! `lcc`: build, translate, save and replay Library of Congress
//! Classification outlines.

mod config;
mod source;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use lcc_materialize::DirectoryMaterializer;
use lcc_outline::{Tree, codec, parse_document};
use lcc_translate::{GoogleTranslateProvider, TreeTranslator};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::LccConfig;
use crate::source::{FileSource, OutlineSource, WikipediaSource};

#[derive(Debug, Parser)]
#[command(
    name = "lcc",
    version,
    about = "Library of Congress Classification (LCC) outline toolkit"
)]
struct Cli {
    /// Action to perform.
    #[arg(value_enum)]
    action: Action,

    /// Base directory for created folders.
    #[arg(long, value_name = "PATH", default_value = "./lcc/")]
    dir: PathBuf,

    /// YAML file to save to or read from.
    #[arg(long, value_name = "PATH", default_value = "./lcc/classification.yaml")]
    file: PathBuf,

    /// Target language; anything other than `en` translates the outline.
    #[arg(long, default_value = "en")]
    lang: String,

    /// Read the outline text from a local file instead of Wikipedia.
    #[arg(long, value_name = "PATH")]
    input: Option<PathBuf>,

    /// Maximum number of nested directory levels to create.
    #[arg(long, value_name = "N")]
    max_levels: Option<usize>,

    /// TOML configuration file.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// More log output (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Only log warnings and errors.
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Action {
    /// Fetch the outline and create one folder per class and subclass.
    #[value(alias = "create_folders")]
    CreateFolders,

    /// Fetch the outline and print it as YAML.
    #[value(alias = "print_yaml")]
    PrintYaml,

    /// Fetch the outline and save it as YAML to `--file`.
    #[value(alias = "save_yaml")]
    SaveYaml,

    /// Create folders from the YAML document at `--file`.
    #[value(alias = "yaml_to_dir")]
    YamlToDir,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);
    run(cli).await
}

fn init_logging(verbose: u8, quiet: bool) {
    let default_level = match (quiet, verbose) {
        (true, _) => "warn",
        (false, 0) => "info",
        (false, 1) => "debug",
        (false, _) => "trace",
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = LccConfig::load(cli.config.as_deref())?;
    if let Some(max_levels) = cli.max_levels {
        config.materialize.max_levels = max_levels;
    }

    match cli.action {
        Action::CreateFolders => {
            let tree = build_tree(&cli, &config).await?;
            materialize(&cli.dir, &tree, &config)?;
        }
        Action::PrintYaml => {
            let tree = build_tree(&cli, &config).await?;
            print!("{}", codec::serialize(&tree)?);
        }
        Action::SaveYaml => {
            let tree = build_tree(&cli, &config).await?;
            codec::save(&tree, &cli.file)?;
        }
        Action::YamlToDir => {
            let tree = codec::load(&cli.file)
                .with_context(|| format!("cannot load {}", cli.file.display()))?;
            materialize(&cli.dir, &tree, &config)?;
        }
    }

    Ok(())
}

/// Fetch, parse and (if requested) translate the outline.
async fn build_tree(cli: &Cli, config: &LccConfig) -> Result<Tree> {
    let source: Box<dyn OutlineSource> = match &cli.input {
        Some(path) => Box::new(FileSource::new(path)),
        None => Box::new(WikipediaSource::new(config.source.clone())),
    };

    let text = source.fetch().await?;
    let outcome = parse_document(&text, &config.outline)
        .with_context(|| format!("cannot locate the outline in {}", source.describe()))?;

    if !outcome.warnings.is_empty() {
        warn!("Skipped or replaced {} outline lines", outcome.warnings.len());
    }
    if outcome.scheme.is_empty() {
        warn!("No classes found in {}", source.describe());
    }

    let tree = outcome.scheme.to_tree();
    if !needs_translation(&cli.lang) {
        return Ok(tree);
    }

    let provider = Arc::new(
        GoogleTranslateProvider::new().with_base_url(config.translate.endpoint.clone()),
    );
    let translator = TreeTranslator::with_config(provider, config.translate.translator_config());

    translator
        .translate_tree(&tree, &cli.lang)
        .await
        .with_context(|| format!("translation into {:?} failed", cli.lang))
}

fn materialize(base: &Path, tree: &Tree, config: &LccConfig) -> Result<()> {
    let report = DirectoryMaterializer::new(config.materialize.clone())
        .materialize(base, tree)
        .with_context(|| format!("cannot create folders under {}", base.display()))?;

    info!(
        "{} folders under {} ({} new)",
        report.directories(),
        base.display(),
        report.created
    );
    Ok(())
}

/// The outline is published in English; other targets need translating.
fn needs_translation(lang: &str) -> bool {
    let lang = lang.trim();
    !lang.is_empty() && !lang.eq_ignore_ascii_case("en")
}
