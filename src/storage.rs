use actix_multipart::form::tempfile::TempFile;
use std::env;
use std::io;
use std::path::PathBuf;
use uuid::Uuid;

/// Filesystem-backed blob store. Files land under `MEDIA_ROOT` and are
/// served back at `/media/...` by the static files mount.
#[derive(Debug, Clone)]
pub struct BlobStore {
    root: PathBuf,
}

impl BlobStore {
    pub fn from_env() -> Self {
        let root = env::var("MEDIA_ROOT").unwrap_or_else(|_| "./media".to_string());
        Self { root: root.into() }
    }

    /// Persist an uploaded multipart file under `subdir`, returning its
    /// public URL path.
    pub fn save_temp(&self, subdir: &str, file: &TempFile) -> io::Result<String> {
        let original = file
            .file_name
            .as_deref()
            .map(sanitize_filename)
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| "upload".to_string());

        let filename = format!("{}_{}", Uuid::new_v4(), original);
        let dir = self.root.join(subdir);
        std::fs::create_dir_all(&dir)?;
        std::fs::copy(file.file.path(), dir.join(&filename))?;

        Ok(format!("/media/{subdir}/{filename}"))
    }

    /// Persist raw bytes (generated files such as QR codes) under `subdir`.
    pub fn save_bytes(&self, subdir: &str, filename: &str, bytes: &[u8]) -> io::Result<String> {
        let filename = sanitize_filename(filename);
        let dir = self.root.join(subdir);
        std::fs::create_dir_all(&dir)?;
        std::fs::write(dir.join(&filename), bytes)?;

        Ok(format!("/media/{subdir}/{filename}"))
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }
}

/// Keep only the final path component and drop characters that could break
/// out of the media directory.
fn sanitize_filename(name: &str) -> String {
    name.rsplit(['/', '\\'])
        .next()
        .unwrap_or(name)
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_path_components() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("photo du stand.png"), "photodustand.png");
        assert_eq!(sanitize_filename("cni-recto_01.jpg"), "cni-recto_01.jpg");
    }

    #[test]
    fn save_bytes_returns_public_path() {
        let dir = std::env::temp_dir().join(format!("blobstore-{}", Uuid::new_v4()));
        let store = BlobStore { root: dir.clone() };

        let path = store.save_bytes("qr_codes", "qr_test.png", b"png").unwrap();
        assert_eq!(path, "/media/qr_codes/qr_test.png");
        assert!(dir.join("qr_codes/qr_test.png").exists());

        std::fs::remove_dir_all(dir).unwrap();
    }
}
