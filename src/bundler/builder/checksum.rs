//! Artifact checksum calculation.
//!
//! Streams files through a digest in fixed-size chunks so memory use does not
//! depend on artifact size, and renders the result as lowercase hex.

use crate::bundler::{
    Error,
    error::{ErrorExt, Result},
};
use sha1::Digest;
use std::{fmt, io::Read, path::Path, str::FromStr};

/// Read buffer size for hashing.
const CHUNK_SIZE: usize = 8192;

/// Digest algorithms supported for bundle checksum entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChecksumAlgorithm {
    Md5,
    Sha1,
    Sha256,
    Sha512,
}

impl ChecksumAlgorithm {
    /// Extension appended to the checksummed entry's name (`core-1.0.jar.sha1`).
    pub fn extension(self) -> &'static str {
        match self {
            ChecksumAlgorithm::Md5 => "md5",
            ChecksumAlgorithm::Sha1 => "sha1",
            ChecksumAlgorithm::Sha256 => "sha256",
            ChecksumAlgorithm::Sha512 => "sha512",
        }
    }
}

impl fmt::Display for ChecksumAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChecksumAlgorithm::Md5 => "MD5",
            ChecksumAlgorithm::Sha1 => "SHA-1",
            ChecksumAlgorithm::Sha256 => "SHA-256",
            ChecksumAlgorithm::Sha512 => "SHA-512",
        };
        f.write_str(name)
    }
}

impl FromStr for ChecksumAlgorithm {
    type Err = Error;

    /// Accepts `MD5`, `SHA-1`/`SHA1`, `SHA-256`/`SHA256`, `SHA-512`/`SHA512`, any case.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "MD5" => Ok(ChecksumAlgorithm::Md5),
            "SHA-1" | "SHA1" => Ok(ChecksumAlgorithm::Sha1),
            "SHA-256" | "SHA256" => Ok(ChecksumAlgorithm::Sha256),
            "SHA-512" | "SHA512" => Ok(ChecksumAlgorithm::Sha512),
            _ => Err(Error::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

/// Calculates the checksum of a file as lowercase hex.
///
/// # Errors
///
/// Fails if the file cannot be opened or read.
pub fn calculate_checksum(path: &Path, algorithm: ChecksumAlgorithm) -> Result<String> {
    match algorithm {
        ChecksumAlgorithm::Md5 => hash_file::<md5::Md5>(path),
        ChecksumAlgorithm::Sha1 => hash_file::<sha1::Sha1>(path),
        ChecksumAlgorithm::Sha256 => hash_file::<sha2::Sha256>(path),
        ChecksumAlgorithm::Sha512 => hash_file::<sha2::Sha512>(path),
    }
}

fn hash_file<D: Digest>(path: &Path) -> Result<String> {
    let mut file = std::fs::File::open(path).fs_context("opening file for hashing", path)?;
    let mut hasher = D::new();
    let mut buffer = vec![0u8; CHUNK_SIZE];

    loop {
        let n = file
            .read(&mut buffer)
            .fs_context("reading file for hash calculation", path)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn file_with(content: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn known_digests_of_abc() {
        let file = file_with(b"abc");
        let path = file.path();

        assert_eq!(
            calculate_checksum(path, ChecksumAlgorithm::Md5).unwrap(),
            "900150983cd24fb0d6963f7d28e17f72"
        );
        assert_eq!(
            calculate_checksum(path, ChecksumAlgorithm::Sha1).unwrap(),
            "a9993e364706816aba3e25717850c26c9cd0d89d"
        );
        assert_eq!(
            calculate_checksum(path, ChecksumAlgorithm::Sha256).unwrap(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn empty_file_digest() {
        let file = file_with(b"");
        assert_eq!(
            calculate_checksum(file.path(), ChecksumAlgorithm::Md5).unwrap(),
            "d41d8cd98f00b204e9800998ecf8427e"
        );
    }

    #[test]
    fn content_larger_than_one_chunk_matches_single_shot() {
        let content: Vec<u8> = (0..(CHUNK_SIZE * 3 + 17)).map(|i| (i % 251) as u8).collect();
        let file = file_with(&content);

        let expected = hex::encode(sha2::Sha256::digest(&content));
        assert_eq!(
            calculate_checksum(file.path(), ChecksumAlgorithm::Sha256).unwrap(),
            expected
        );
    }

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("sha-1".parse::<ChecksumAlgorithm>().unwrap(), ChecksumAlgorithm::Sha1);
        assert_eq!("SHA256".parse::<ChecksumAlgorithm>().unwrap(), ChecksumAlgorithm::Sha256);
        assert_eq!("Md5".parse::<ChecksumAlgorithm>().unwrap(), ChecksumAlgorithm::Md5);
        assert!(matches!(
            "CRC32".parse::<ChecksumAlgorithm>(),
            Err(Error::UnsupportedAlgorithm(_))
        ));
    }

    #[test]
    fn missing_file_is_fs_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = calculate_checksum(&dir.path().join("absent"), ChecksumAlgorithm::Md5)
            .unwrap_err();
        assert!(matches!(err, Error::Fs { .. }));
    }
}
