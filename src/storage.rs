//! Upload store: uploaded corpus files on disk (save, list, read, delete).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Directory of uploaded corpus files.
pub struct UploadStore {
    dir: PathBuf,
}

/// Reduce a client-supplied filename to something safe to join onto the
/// upload directory: keep only the final path component and require a
/// conservative character set. Hidden files and empty names are rejected.
pub fn sanitize_filename(name: &str) -> Option<String> {
    let name = Path::new(name).file_name()?.to_str()?;
    if name.is_empty() || name.starts_with('.') {
        return None;
    }
    let ok = name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
    if !ok {
        return None;
    }
    Some(name.to_string())
}

impl UploadStore {
    /// Open the store, creating the directory if it does not exist yet.
    pub fn open(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, filename: &str) -> PathBuf {
        self.dir.join(filename)
    }

    /// Write uploaded bytes under `filename` (already sanitized by the caller).
    /// An existing file of the same name is overwritten.
    pub fn save(&self, filename: &str, bytes: &[u8]) -> io::Result<()> {
        fs::write(self.path_for(filename), bytes)
    }

    /// Stored filenames, sorted for a stable listing.
    pub fn list(&self) -> io::Result<Vec<String>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                if let Ok(name) = entry.file_name().into_string() {
                    files.push(name);
                }
            }
        }
        files.sort();
        Ok(files)
    }

    /// Read a stored file back. `None` when it is not there.
    pub fn read(&self, filename: &str) -> io::Result<Option<Vec<u8>>> {
        match fs::read(self.path_for(filename)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Delete a stored file. `Ok(false)` when it was not there.
    pub fn delete(&self, filename: &str) -> io::Result<bool> {
        match fs::remove_file(self.path_for(filename)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_list_read_delete_roundtrip() {
        let tmp = tempfile::tempdir().unwrap();
        let store = UploadStore::open(tmp.path().join("uploads")).unwrap();

        assert!(store.list().unwrap().is_empty());
        store.save("b.txt", b"beta").unwrap();
        store.save("a.txt", b"alpha").unwrap();

        assert_eq!(store.list().unwrap(), vec!["a.txt", "b.txt"]);
        assert_eq!(store.read("a.txt").unwrap().unwrap(), b"alpha");
        assert_eq!(store.read("missing.txt").unwrap(), None);

        assert!(store.delete("a.txt").unwrap());
        assert!(!store.delete("a.txt").unwrap());
        assert_eq!(store.list().unwrap(), vec!["b.txt"]);
    }

    #[test]
    fn overwrite_replaces_content() {
        let tmp = tempfile::tempdir().unwrap();
        let store = UploadStore::open(tmp.path()).unwrap();
        store.save("c.txt", b"old").unwrap();
        store.save("c.txt", b"new").unwrap();
        assert_eq!(store.read("c.txt").unwrap().unwrap(), b"new");
    }

    #[test]
    fn sanitize_keeps_plain_names() {
        assert_eq!(sanitize_filename("corpus.txt"), Some("corpus.txt".into()));
        assert_eq!(sanitize_filename("a-b_1.TXT"), Some("a-b_1.TXT".into()));
    }

    #[test]
    fn sanitize_strips_path_components() {
        assert_eq!(sanitize_filename("dir/corpus.txt"), Some("corpus.txt".into()));
        assert_eq!(sanitize_filename("../../etc/passwd"), Some("passwd".into()));
    }

    #[test]
    fn sanitize_rejects_unsafe_names() {
        assert_eq!(sanitize_filename(""), None);
        assert_eq!(sanitize_filename(".."), None);
        assert_eq!(sanitize_filename(".hidden"), None);
        assert_eq!(sanitize_filename("with space.txt"), None);
        assert_eq!(sanitize_filename("weird!.txt"), None);
        assert_eq!(sanitize_filename("файл.txt"), None);
    }
}
