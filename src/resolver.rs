use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;

use crate::{AssetPayload, AssetRef, UploadConfig, UploadError, UploadResult};

/// Converts a user-selected asset reference into a ready-to-upload payload
#[async_trait]
pub trait AssetResolver: Send + Sync {
    /// Resolve one asset. Failure here means the source could not be read;
    /// the asset is reported as failed without any network call.
    async fn resolve(&self, asset: &AssetRef) -> UploadResult<AssetPayload>;
}

/// Filesystem-backed resolver. Validates the extension and size before
/// reading so oversized or unsupported files never leave the device.
pub struct FsResolver {
    config: UploadConfig,
}

impl FsResolver {
    pub fn new(config: UploadConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl AssetResolver for FsResolver {
    async fn resolve(&self, asset: &AssetRef) -> UploadResult<AssetPayload> {
        let filename = asset
            .file_name()
            .ok_or_else(|| UploadError::resolution("reference has no file name"))?;

        let extension = asset
            .extension()
            .ok_or_else(|| UploadError::resolution("reference has no file extension"))?;
        if !self.config.extension_allowed(&extension) {
            return Err(UploadError::resolution(format!(
                "unsupported file type: .{extension}"
            )));
        }

        let meta = tokio::fs::metadata(&asset.path)
            .await
            .map_err(|e| UploadError::resolution(format!("{}: {e}", asset.path.display())))?;
        if meta.len() > self.config.max_photo_bytes {
            return Err(UploadError::resolution(format!(
                "photo is {} bytes, max is {}",
                meta.len(),
                self.config.max_photo_bytes
            )));
        }

        let bytes = tokio::fs::read(&asset.path)
            .await
            .map_err(|e| UploadError::resolution(format!("{}: {e}", asset.path.display())))?;

        debug!(
            path = %asset.path.display(),
            size = bytes.len(),
            "resolved asset"
        );

        Ok(AssetPayload {
            bytes: Bytes::from(bytes),
            content_type: guess_mime(&extension).to_string(),
            filename,
        })
    }
}

/// Map a lowercase file extension to a mime type for the multipart part
pub fn guess_mime(extension: &str) -> &'static str {
    match extension {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guess_mime_known_types() {
        assert_eq!(guess_mime("jpg"), "image/jpeg");
        assert_eq!(guess_mime("jpeg"), "image/jpeg");
        assert_eq!(guess_mime("png"), "image/png");
        assert_eq!(guess_mime("gif"), "image/gif");
    }

    #[test]
    fn test_guess_mime_unknown_falls_back() {
        assert_eq!(guess_mime("tiff"), "application/octet-stream");
        assert_eq!(guess_mime(""), "application/octet-stream");
    }

    #[tokio::test]
    async fn resolve_rejects_unsupported_extension() {
        let resolver = FsResolver::new(UploadConfig::default());
        let err = resolver
            .resolve(&AssetRef::new("/tmp/notes.txt"))
            .await
            .unwrap_err();
        assert!(matches!(err, UploadError::Resolution { .. }));
    }

    #[tokio::test]
    async fn resolve_reports_missing_file() {
        let resolver = FsResolver::new(UploadConfig::default());
        let err = resolver
            .resolve(&AssetRef::new("/nonexistent/cat.jpg"))
            .await
            .unwrap_err();
        assert!(matches!(err, UploadError::Resolution { .. }));
    }

    #[tokio::test]
    async fn resolve_reads_file_and_guesses_mime() {
        let dir = std::env::temp_dir().join("cathub_resolver_test");
        tokio::fs::create_dir_all(&dir).await.unwrap();
        let path = dir.join("whiskers.png");
        tokio::fs::write(&path, b"png-bytes").await.unwrap();

        let resolver = FsResolver::new(UploadConfig::default());
        let payload = resolver.resolve(&AssetRef::new(&path)).await.unwrap();

        assert_eq!(payload.filename, "whiskers.png");
        assert_eq!(payload.content_type, "image/png");
        assert_eq!(payload.bytes.as_ref(), b"png-bytes");
    }

    #[tokio::test]
    async fn resolve_enforces_size_limit() {
        let dir = std::env::temp_dir().join("cathub_resolver_test");
        tokio::fs::create_dir_all(&dir).await.unwrap();
        let path = dir.join("huge.jpg");
        tokio::fs::write(&path, vec![0u8; 64]).await.unwrap();

        let config = UploadConfig::new().with_max_photo_bytes(16);
        let resolver = FsResolver::new(config);
        let err = resolver.resolve(&AssetRef::new(&path)).await.unwrap_err();
        assert!(err.to_string().contains("max is 16"));
    }
}
