use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::value_objects::bookings::PhotoUpload;

#[async_trait]
#[automock]
pub trait PhotoStorageClient {
    /// Uploads one trip photo and returns its public URL.
    async fn upload_photo(
        &self,
        reservation_id: Uuid,
        folder: &str,
        photo: &PhotoUpload,
    ) -> Result<String>;
}
