use async_trait::async_trait;

use crate::{AssetPayload, CatProfile, NewProfile, ProfileId, UploadResult};

/// Remote service that allocates profile records
#[async_trait]
pub trait ProfileService: Send + Sync {
    /// Create a new profile and return its allocated id
    async fn create_profile(&self, profile: &NewProfile) -> UploadResult<ProfileId>;

    /// Fetch one profile, including its stored photo list
    async fn get_profile(&self, id: ProfileId) -> UploadResult<CatProfile>;

    /// Fetch all profiles
    async fn list_profiles(&self) -> UploadResult<Vec<CatProfile>>;
}

/// Remote service that stores one photo per call. One call, one terminal
/// outcome: no retries, no ordering guarantees across calls.
#[async_trait]
pub trait PhotoUploadClient: Send + Sync {
    /// Upload a payload against an existing profile; returns the stored
    /// location descriptor
    async fn upload_photo(
        &self,
        profile_id: ProfileId,
        payload: AssetPayload,
    ) -> UploadResult<String>;
}
