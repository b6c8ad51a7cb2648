use std::io::Write;

use clap::Parser;
use pii_obfuscator::config::load_s3_config;
use pii_obfuscator::errors::ObfuscateError;
use pii_obfuscator::event::{Event, S3Location};
use pii_obfuscator::handler::obfuscate_file;
use pii_obfuscator::logger;
use pii_obfuscator::metrics::Metrics;
use pii_obfuscator::s3::S3Store;
use pii_obfuscator::store::ObjectStore;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "pii-obfuscator",
    version,
    about = "Replace named PII fields in S3-hosted CSV, JSON and Parquet files"
)]
struct Cli {
    /// Object to obfuscate, as s3://bucket/key
    file_to_obfuscate: String,

    /// Field names whose values are replaced with the marker
    #[arg(required = true)]
    pii_fields: Vec<String>,

    /// Destination: a local path or an s3:// URI; stdout when omitted
    #[arg(short, long)]
    output: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), ObfuscateError> {
    logger::init();
    let cli = Cli::parse();

    let registry = prometheus::Registry::new();
    let metrics = Metrics::new(&registry);

    let event = Event::new(cli.file_to_obfuscate, cli.pii_fields);
    let store = S3Store::new(load_s3_config()?);

    let buffer = obfuscate_file(&store, &event).await?;
    metrics.files_processed.inc();
    metrics.fields_requested.inc_by(event.pii_fields.len() as u64);

    let bytes = buffer.into_inner();
    match cli.output {
        Some(dest) if dest.starts_with("s3://") => {
            let location: S3Location = dest.parse()?;
            info!(%location, "writing obfuscated object");
            store
                .put_object(&location.bucket, &location.key, bytes.into())
                .await?;
        }
        Some(path) => {
            info!(%path, "writing obfuscated file");
            tokio::fs::write(&path, &bytes).await?;
        }
        None => {
            std::io::stdout().write_all(&bytes)?;
        }
    }
    Ok(())
}
