//! Upload-metadata command implementation

use crate::config::UploadConfig;
use crate::metadata::MetadataUploader;
use anyhow::Context;

/// Handle the upload-metadata command: recreate the destination container
/// and push the selected metadata files.
pub async fn handle_upload(
    provider: String,
    space: String,
    token: String,
    limit: usize,
    directory: String,
) -> anyhow::Result<()> {
    let config = UploadConfig::new(provider, space, token, limit, directory);
    let uploader = MetadataUploader::new(config).context("failed to set up metadata uploader")?;
    let outcomes = uploader.run().await.context("metadata upload failed")?;

    let failed = outcomes.iter().filter(|o| !o.succeeded()).count();
    println!(
        "Uploaded {} of {} metadata files ({} failed)",
        outcomes.len() - failed,
        outcomes.len(),
        failed
    );
    Ok(())
}
