use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

use crate::{
    AssetPayload, CatProfile, NewProfile, PhotoUploadClient, ProfileId, ProfileService,
    UploadError, UploadResult,
};

/// Typed client for the CatHub HTTP API
pub struct HttpCathubClient {
    http: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct CreateProfileResponse {
    id: i64,
    #[allow(dead_code)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct UploadPhotoResponse {
    path: String,
    #[allow(dead_code)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

impl HttpCathubClient {
    /// Create a client against a base URL like `http://10.0.2.2:5000`
    pub fn new<S: Into<String>>(base_url: S) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Create with a preconfigured reqwest client (timeouts, proxies)
    pub fn with_client<S: Into<String>>(http: Client, base_url: S) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Pull the backend's `{"error": ...}` message out of a failed response
    async fn error_message(response: reqwest::Response) -> String {
        let status = response.status();
        match response.text().await {
            Ok(body) => match serde_json::from_str::<ErrorBody>(&body) {
                Ok(parsed) => parsed.error,
                Err(_) => format!("status {status}"),
            },
            Err(_) => format!("status {status}"),
        }
    }
}

#[async_trait]
impl ProfileService for HttpCathubClient {
    async fn create_profile(&self, profile: &NewProfile) -> UploadResult<ProfileId> {
        let response = self
            .http
            .post(self.url("/api/cats"))
            .json(profile)
            .send()
            .await
            .map_err(|e| UploadError::profile_creation(e.to_string()))?;

        if !response.status().is_success() {
            let message = Self::error_message(response).await;
            return Err(UploadError::profile_creation(message));
        }

        let created: CreateProfileResponse = response.json().await?;
        debug!(id = created.id, "profile created");
        Ok(ProfileId::new(created.id))
    }

    async fn get_profile(&self, id: ProfileId) -> UploadResult<CatProfile> {
        let response = self
            .http
            .get(self.url(&format!("/api/cats/{id}")))
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(UploadError::profile_not_found(id.as_i64()));
        }
        let response = response.error_for_status()?;
        Ok(response.json().await?)
    }

    async fn list_profiles(&self) -> UploadResult<Vec<CatProfile>> {
        let response = self
            .http
            .get(self.url("/api/cats"))
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl PhotoUploadClient for HttpCathubClient {
    async fn upload_photo(
        &self,
        profile_id: ProfileId,
        payload: AssetPayload,
    ) -> UploadResult<String> {
        let part = Part::bytes(payload.bytes.to_vec())
            .file_name(payload.filename.clone())
            .mime_str(&payload.content_type)?;
        let form = Form::new().part("photo", part);

        let response = self
            .http
            .post(self.url(&format!("/api/cats/{profile_id}/photos")))
            .multipart(form)
            .send()
            .await
            .map_err(|e| UploadError::transport(e.to_string()))?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(UploadError::profile_not_found(profile_id.as_i64())),
            status if !status.is_success() => {
                let message = Self::error_message(response).await;
                Err(UploadError::transport(message))
            }
            _ => {
                let stored: UploadPhotoResponse = response.json().await?;
                debug!(
                    profile = %profile_id,
                    filename = %payload.filename,
                    location = %stored.path,
                    "photo stored"
                );
                Ok(stored.path)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalized() {
        let client = HttpCathubClient::new("http://localhost:5000/");
        assert_eq!(client.url("/api/cats"), "http://localhost:5000/api/cats");
    }

    #[test]
    fn error_body_parses_backend_shape() {
        let body: ErrorBody = serde_json::from_str(r#"{"error": "Invalid file type"}"#).unwrap();
        assert_eq!(body.error, "Invalid file type");
    }
}
