use anyhow::Context;
use async_trait::async_trait;
use aws_config::{defaults, BehaviorVersion};
use aws_credential_types::Credentials;
use aws_sdk_s3::{
    config::{Builder as S3ConfigBuilder, Region},
    Client,
};
use aws_smithy_types::byte_stream::ByteStream;
use bytes::Bytes;

use crate::config::StorageConfig;

/// Where an uploaded object ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub key: String,
    pub url: String,
}

#[async_trait]
pub trait StorageClient: Send + Sync {
    async fn upload_file(
        &self,
        body: Bytes,
        key: &str,
        content_type: &str,
    ) -> anyhow::Result<UploadedFile>;
}

#[derive(Clone)]
pub struct S3Storage {
    client: Client,
    bucket: String,
    public_url: String,
}

impl S3Storage {
    pub async fn new(cfg: &StorageConfig) -> anyhow::Result<Self> {
        let shared = defaults(BehaviorVersion::latest())
            .region(Region::new(cfg.region.clone()))
            .credentials_provider(Credentials::new(
                &cfg.access_key,
                &cfg.secret_key,
                None,
                None,
                "static",
            ))
            .endpoint_url(&cfg.endpoint)
            .load()
            .await;

        let conf = S3ConfigBuilder::from(&shared)
            .endpoint_url(&cfg.endpoint)
            .force_path_style(true)
            .build();

        Ok(Self {
            client: Client::from_conf(conf),
            bucket: cfg.bucket.clone(),
            public_url: cfg.public_url.clone(),
        })
    }
}

pub(crate) fn object_url(base: &str, key: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), key.trim_start_matches('/'))
}

#[async_trait]
impl StorageClient for S3Storage {
    async fn upload_file(
        &self,
        body: Bytes,
        key: &str,
        content_type: &str,
    ) -> anyhow::Result<UploadedFile> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(body))
            .content_type(content_type)
            .send()
            .await
            .with_context(|| format!("s3 put_object {key}"))?;

        Ok(UploadedFile {
            key: key.to_string(),
            url: object_url(&self.public_url, key),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::object_url;

    #[test]
    fn object_url_joins_without_double_slashes() {
        assert_eq!(
            object_url("http://minio:9000/videos/", "abc"),
            "http://minio:9000/videos/abc"
        );
        assert_eq!(
            object_url("https://cdn.example.com", "/abc"),
            "https://cdn.example.com/abc"
        );
    }
}
