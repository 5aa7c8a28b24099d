use std::path::PathBuf;

use anyhow::Context;
use axum::async_trait;
use bytes::Bytes;
use time::OffsetDateTime;
use uuid::Uuid;

/// Destination for uploaded images. Implementations own the naming of stored
/// objects; callers never influence the final path.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Persist the image bytes and return the stored path, suitable for
    /// persisting alongside the record that owns the image.
    async fn store(&self, body: Bytes, content_type: &str) -> anyhow::Result<String>;
}

/// Local-disk store. Filenames are generated (`<unix-ts>-<uuid>.<ext>`); the
/// client-supplied filename is untrusted and discarded.
pub struct DiskStore {
    root: PathBuf,
}

impl DiskStore {
    pub fn new(root: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)
            .with_context(|| format!("create upload dir {}", root.display()))?;
        Ok(Self { root })
    }
}

#[async_trait]
impl ImageStore for DiskStore {
    async fn store(&self, body: Bytes, content_type: &str) -> anyhow::Result<String> {
        let ext = ext_from_mime(content_type).unwrap_or("bin");
        let name = format!(
            "{}-{}.{}",
            OffsetDateTime::now_utc().unix_timestamp(),
            Uuid::new_v4(),
            ext
        );
        let path = self.root.join(&name);
        tokio::fs::write(&path, &body)
            .await
            .with_context(|| format!("write upload {}", path.display()))?;
        Ok(path.to_string_lossy().into_owned())
    }
}

fn ext_from_mime(ct: &str) -> Option<&'static str> {
    match ct {
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/webp" => Some("webp"),
        "image/gif" => Some("gif"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (DiskStore, PathBuf) {
        let dir = std::env::temp_dir().join(format!("pawhome-store-{}", Uuid::new_v4()));
        (DiskStore::new(&dir).expect("create store"), dir)
    }

    #[test]
    fn test_ext_from_mime() {
        assert_eq!(ext_from_mime("image/jpeg"), Some("jpg"));
        assert_eq!(ext_from_mime("image/jpg"), Some("jpg"));
        assert_eq!(ext_from_mime("image/png"), Some("png"));
        assert_eq!(ext_from_mime("image/webp"), Some("webp"));
        assert_eq!(ext_from_mime("application/octet-stream"), None);
        assert_eq!(ext_from_mime("whatever/else"), None);
    }

    #[tokio::test]
    async fn store_writes_bytes_under_a_generated_name() {
        let (store, dir) = temp_store();
        let path = store
            .store(Bytes::from_static(b"\x89PNG fake"), "image/png")
            .await
            .expect("store image");

        assert!(path.ends_with(".png"));
        let written = tokio::fs::read(&path).await.expect("read back");
        assert_eq!(written, b"\x89PNG fake");

        tokio::fs::remove_dir_all(&dir).await.ok();
    }

    #[tokio::test]
    async fn stored_name_never_echoes_client_input() {
        let (store, dir) = temp_store();
        // The content type is the only client input that reaches naming; an
        // unknown type falls back to .bin rather than being spliced in.
        let path = store
            .store(Bytes::from_static(b"data"), "../../etc/passwd")
            .await
            .expect("store image");

        assert!(path.ends_with(".bin"));
        assert!(!path.contains(".."));
        assert!(path.starts_with(dir.to_string_lossy().as_ref()));

        tokio::fs::remove_dir_all(&dir).await.ok();
    }
}
