use std::io;
use std::path::{Path, PathBuf};

use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};
use rocket::fs::TempFile;

/// Filesystem store for uploaded item photos. Blobs are written once under a
/// generated name and served back read-only from the public image route.
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    pub fn new(root: impl Into<PathBuf>) -> ImageStore {
        ImageStore { root: root.into() }
    }

    /// Create the storage directory if missing. Safe to call repeatedly.
    pub fn ensure_root(&self) -> io::Result<()> {
        std::fs::create_dir_all(&self.root)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_of(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Store an upload under a fresh random name and return the name. The
    /// original filename and extension are not kept.
    pub async fn save(&self, file: &mut TempFile<'_>) -> io::Result<String> {
        let name = generate_blob_name();
        file.copy_to(self.path_of(&name)).await?;

        Ok(name)
    }
}

fn generate_blob_name() -> String {
    const LEN: usize = 16;

    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(LEN)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn ensure_root_is_idempotent() {
        let dir = tempdir().unwrap();
        let store = ImageStore::new(dir.path().join("images"));

        store.ensure_root().unwrap();
        store.ensure_root().unwrap();

        assert!(dir.path().join("images").is_dir());
    }

    #[test]
    fn blob_names_are_opaque_tokens() {
        let name = generate_blob_name();

        assert_eq!(name.len(), 16);
        assert!(name.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn blob_names_do_not_collide() {
        let names: std::collections::HashSet<_> =
            (0..100).map(|_| generate_blob_name()).collect();

        assert_eq!(names.len(), 100);
    }

    #[test]
    fn path_of_stays_under_the_root() {
        let store = ImageStore::new("data/images");

        assert_eq!(
            store.path_of("abc123"),
            Path::new("data/images").join("abc123")
        );
    }
}
