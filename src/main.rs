use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use arti_metadata::config::CollectorConfig;
use arti_metadata::maven::diagnostics::TracingSink;
use arti_metadata::maven::metadata_xml::Versioning;
use arti_metadata::maven::{generate_snapshot_versioning, VersionCollectionRequest, VersionCollector};

#[derive(Parser)]
#[command(name = "arti-metadata")]
#[command(version, about = "Collects maven-metadata.xml versioning information from a repository directory")]
struct Cli {
    /// artifact directory, i.e. <repository>/<group path>/<artifactId>
    artifact_base_path: PathBuf,

    /// version directory to list timestamped snapshot builds for
    #[arg(long)]
    snapshots: Option<PathBuf>,

    /// JSON file with collector settings
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Output {
    collection: VersionCollectionRequest,
    #[serde(skip_serializing_if = "Option::is_none")]
    snapshot_versioning: Option<Versioning>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => CollectorConfig::load(path)?,
        None => CollectorConfig::default(),
    };
    let collector = VersionCollector::new(config);

    info!("collecting versions from {}", cli.artifact_base_path.display());
    let collection = collector.collect_versions(&cli.artifact_base_path, &TracingSink)?;

    let snapshot_versioning = match &cli.snapshots {
        Some(version_directory) => {
            info!("collecting timestamped snapshots from {}", version_directory.display());
            let snapshot_versions = collector.collect_timestamped_snapshot_versions(version_directory)?;
            Some(generate_snapshot_versioning(snapshot_versions))
        }
        None => None,
    };

    let output = Output {
        collection,
        snapshot_versioning,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
