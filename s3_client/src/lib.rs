mod get;
mod list;

pub use list::ListedObject;

#[derive(Clone, Debug)]
pub struct S3 {
    inner: aws_sdk_s3::Client,
}

impl S3 {
    pub fn new(inner: aws_sdk_s3::Client) -> Self {
        Self { inner }
    }

    /// Retreives the provided key from the bucket.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, bucket: &str, key: &str) -> anyhow::Result<Vec<u8>> {
        get::get(&self.inner, bucket, key).await
    }

    /// Lists the objects under the provided key prefix.
    /// Returns one entry per object with its key and its size in bytes.
    #[tracing::instrument(skip(self))]
    pub async fn list_objects(
        &self,
        bucket: &str,
        prefix: &str,
    ) -> anyhow::Result<Vec<ListedObject>> {
        list::list_objects(&self.inner, bucket, prefix).await
    }
}
