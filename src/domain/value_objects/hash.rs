//! Content Hash Value Object
//!
//! A SHA-256 digest of a file's bytes. Used to tell a real content write
//! apart from an editor touching a file without changing it.

use std::fmt;
use std::path::Path;

/// Content hash value object
///
/// Displays as `sha256:<hex>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentHash([u8; 32]);

impl ContentHash {
    /// Compute the hash of raw bytes
    pub fn from_bytes(content: &[u8]) -> Self {
        use sha2::{Digest, Sha256};
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&Sha256::digest(content));
        Self(bytes)
    }

    /// Hash the current content of a file.
    ///
    /// Returns `None` for directories and unreadable paths.
    pub fn of_file(path: &Path) -> Option<Self> {
        if !path.is_file() {
            return None;
        }
        std::fs::read(path).ok().map(|bytes| Self::from_bytes(&bytes))
    }

}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("sha256:")?;
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_prefixed_hex_digest() {
        let hash = ContentHash::from_bytes(b"hello");
        assert_eq!(
            hash.to_string(),
            "sha256:2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[test]
    fn same_content_same_hash() {
        assert_eq!(
            ContentHash::from_bytes(b"def test(): pass\n"),
            ContentHash::from_bytes(b"def test(): pass\n")
        );
        assert_ne!(
            ContentHash::from_bytes(b"a"),
            ContentHash::from_bytes(b"b")
        );
    }

    #[test]
    fn of_file_ignores_directories() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ContentHash::of_file(dir.path()).is_none());

        let file = dir.path().join("test_models.py");
        std::fs::write(&file, "assert True\n").unwrap();
        assert_eq!(
            ContentHash::of_file(&file),
            Some(ContentHash::from_bytes(b"assert True\n"))
        );
    }
}
