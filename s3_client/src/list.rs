use anyhow::{Context, Result};
use aws_sdk_s3 as s3;

/// One object reference returned by a prefix listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedObject {
    pub key: String,
    /// Object size in bytes. Zero-byte entries are the placeholder
    /// objects stores create for "directories".
    pub size: i64,
}

/// Lists all the objects under a given key prefix
/// Returns a single page of results; listings beyond one page are truncated.
#[tracing::instrument(skip(client))]
pub async fn list_objects(
    client: &s3::Client,
    bucket: &str,
    prefix: &str,
) -> Result<Vec<ListedObject>> {
    let obj_list = client
        .list_objects_v2()
        .bucket(bucket.to_owned())
        .prefix(prefix.to_owned())
        .send()
        .await
        .context(format!(
            "could not list objects under {prefix} in bucket {bucket}"
        ))?;

    Ok(obj_list
        .contents()
        .iter()
        .filter_map(|obj| {
            obj.key().map(|key| ListedObject {
                key: key.to_string(),
                size: obj.size().unwrap_or(0),
            })
        })
        .collect())
}
