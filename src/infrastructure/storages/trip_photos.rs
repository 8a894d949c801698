use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use uuid::Uuid;

use crate::domain::{
    repositories::storage::PhotoStorageClient, value_objects::bookings::PhotoUpload,
};

use super::s3::{S3Config, build_s3_client};

/// S3-compatible store for pickup/drop evidence photos.
pub struct TripPhotoStorage {
    client: aws_sdk_s3::Client,
    bucket: String,
    public_base_url: String,
}

impl TripPhotoStorage {
    pub async fn new(config: S3Config) -> Result<Self> {
        let bucket = config.bucket.clone();
        let public_base_url = config.public_base_url.trim_end_matches('/').to_string();
        let client = build_s3_client(&config)
            .await
            .context("failed to build trip photo s3 client")?;

        Ok(Self {
            client,
            bucket,
            public_base_url,
        })
    }
}

#[async_trait]
impl PhotoStorageClient for TripPhotoStorage {
    async fn upload_photo(
        &self,
        reservation_id: Uuid,
        folder: &str,
        photo: &PhotoUpload,
    ) -> Result<String> {
        let object_key = format!(
            "{}/{}/{}-{}",
            folder,
            reservation_id,
            Uuid::new_v4(),
            photo.file_name
        );

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&object_key)
            .body(ByteStream::from(photo.bytes.clone()))
            .content_type(&photo.content_type)
            .send()
            .await
            .with_context(|| format!("failed to upload photo to bucket {}", self.bucket))?;

        Ok(format!("{}/{}", self.public_base_url, object_key))
    }
}
