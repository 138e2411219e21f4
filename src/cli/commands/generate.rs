//! Generate-demo command implementation

use crate::config::{GeneratorConfig, IndexTarget};
use crate::generator::DemoDataset;
use crate::index::IndexClient;
use anyhow::Context;
use tracing::info;

/// Handle the generate-demo command: synthesize a dataset with the default
/// configuration and upload it document by document.
pub async fn handle_generate() -> anyhow::Result<()> {
    let config = GeneratorConfig::default();
    let target = IndexTarget::default();

    let dataset = DemoDataset::generate(&config, &mut rand::rng())
        .context("failed to generate demo dataset")?;
    info!(
        studies = dataset.studies.len(),
        data_objects = dataset.data_objects.len(),
        host = %target.host,
        "generated demo dataset"
    );

    let client = IndexClient::new(target.host.as_str());
    let outcomes = client.upload_dataset(&dataset, &target).await;

    let failed = outcomes.iter().filter(|o| !o.succeeded()).count();
    println!(
        "Uploaded {} of {} documents ({} failed)",
        outcomes.len() - failed,
        outcomes.len(),
        failed
    );
    Ok(())
}
