use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use swcat::pipeline;
use swcat_core::config::Config;
use swcat_core::Blacklist;

#[derive(Parser)]
#[command(name = "swcat", about = "Software catalog for HPC resource providers")]
struct Cli {
    /// Configuration file (default: ~/.config/swcat/config.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write debug logs to the configured log file instead of stderr.
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Normalise an operations dump of {AppName, AppVersion} records.
    Ipf {
        #[arg(long)]
        input: Option<PathBuf>,
        #[arg(long)]
        output: Option<PathBuf>,
        /// Print the number of software per resource.
        #[arg(long)]
        print: bool,
    },
    /// Extract software from a directory of `module spider` listings.
    Spider {
        #[arg(long)]
        dir: Option<PathBuf>,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Upsert a parsed result into a JSON catalog.
    Catalog {
        #[arg(long)]
        parsed: PathBuf,
        #[arg(long)]
        catalog: PathBuf,
    },
    /// Fetch conda-forge metadata for every canonical name in a parsed result.
    Enrich {
        #[arg(long)]
        parsed: Option<PathBuf>,
        #[arg(long)]
        cache: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::load().context("failed to load config")?,
    };

    init_tracing(cli.debug, &config)?;

    let paths = &config.paths;
    match cli.command {
        Command::Ipf { input, output, print } => {
            let input = input.unwrap_or_else(|| paths.operations_data.clone());
            let output = output.unwrap_or_else(|| paths.parsed_software.clone());
            let parsed =
                pipeline::process_operations_file(&input, Blacklist::load(&paths.blacklist))?;
            pipeline::save_json(&output, &parsed)?;
            tracing::info!(path = %output.display(), resources = parsed.len(), "wrote parsed software");
            if print {
                for (resource, software) in &parsed {
                    println!("{resource}: {}", software.len());
                }
            }
        }
        Command::Spider { dir, output } => {
            let dir = dir.unwrap_or_else(|| paths.spider_output_dir.clone());
            let parsed = pipeline::process_spider_dir(&dir, Blacklist::load(&paths.blacklist))?;
            match output {
                Some(output) => pipeline::save_json(&output, &parsed)?,
                None => println!("{}", serde_json::to_string_pretty(&parsed)?),
            }
        }
        Command::Catalog { parsed, catalog } => {
            let software = pipeline::read_parsed(&parsed)?;
            let update = pipeline::update_catalog(&software, &catalog, &config.catalog)?;
            println!(
                "{} inserted, {} updated, {} rows",
                update.inserted, update.updated, update.total
            );
        }
        Command::Enrich { parsed, cache } => {
            let parsed = parsed.unwrap_or_else(|| paths.parsed_software.clone());
            let cache = cache.unwrap_or_else(|| paths.enrichment_cache.clone());
            let software = pipeline::read_parsed(&parsed)?;
            let metadata =
                pipeline::enrich_from_conda_forge(&software, &cache, &config.enrichment)?;
            println!("{} packages with metadata", metadata.len());
        }
    }
    Ok(())
}

fn init_tracing(debug: bool, config: &Config) -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;

    if debug {
        let log_file = &config.paths.log_file;
        if let Some(parent) = log_file.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_file)
            .with_context(|| format!("failed to open log file {}", log_file.display()))?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                EnvFilter::try_from_env("RUST_LOG").unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .init();
        tracing::info!(path = %log_file.display(), "swcat debug log started");
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                EnvFilter::try_from_env("RUST_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .init();
    }
    Ok(())
}
