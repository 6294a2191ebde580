//! # Hasher Module
//!
//! Computes content fingerprints used to recognise byte-identical files.
//!
//! Fingerprints are 128-bit XXH3 digests. The threat model is accidental
//! duplication, not adversarial collisions, so a fast non-cryptographic hash
//! is sufficient. Files are streamed through a fixed-size buffer and never
//! loaded into memory whole.

use crate::error::HashError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;
use xxhash_rust::xxh3::Xxh3;

/// Read buffer size for streaming file content
const READ_BUFFER_SIZE: usize = 64 * 1024;

/// A fixed-length digest of a file's full content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint([u8; 16]);

impl Fingerprint {
    /// Wrap raw digest bytes
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Get the raw digest bytes
    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Get the digest as a lowercase hexadecimal string
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{:02x}", b)).collect()
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Trait for content hashers
///
/// Implement this trait to swap the digest (or to stub it in tests).
pub trait ContentHasher: Send + Sync {
    /// Fingerprint the full content of the file at `path`
    fn fingerprint(&self, path: &Path) -> Result<Fingerprint, HashError>;
}

/// Streaming XXH3-128 hasher
#[derive(Debug, Clone, Copy, Default)]
pub struct Xxh3Hasher;

impl Xxh3Hasher {
    pub fn new() -> Self {
        Self
    }

    /// Fingerprint everything readable from `reader`
    pub fn fingerprint_reader<R: Read>(&self, mut reader: R) -> std::io::Result<Fingerprint> {
        let mut state = Xxh3::new();
        let mut buffer = vec![0u8; READ_BUFFER_SIZE];

        loop {
            match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => state.update(&buffer[..n]),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }

        Ok(Fingerprint(state.digest128().to_be_bytes()))
    }
}

impl ContentHasher for Xxh3Hasher {
    fn fingerprint(&self, path: &Path) -> Result<Fingerprint, HashError> {
        let file = File::open(path).map_err(|source| HashError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        self.fingerprint_reader(file).map_err(|source| HashError::Read {
            path: path.to_path_buf(),
            source,
        })
    }
}
