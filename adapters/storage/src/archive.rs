//! Single-line export format for score records.
//!
//! While the remote store is unreachable, finished-run records can still be
//! carried out-of-band as a compact string: a versioned prefix, the record
//! count, and a base64-encoded JSON payload, delimited by colons. The count
//! field lets a human sanity-check a pasted string before decoding it.

use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use serde::{Deserialize, Serialize};
use snake_arcade_core::ScoreRecord;
use thiserror::Error;

const ARCHIVE_DOMAIN: &str = "scores";
const ARCHIVE_VERSION: &str = "v1";

/// Identifier prefix emitted before the encoded archive payload.
pub const ARCHIVE_HEADER: &str = "scores:v1";
/// Delimiter used to separate the prefix, record count and payload.
const FIELD_DELIMITER: char = ':';

/// Portable snapshot of a set of score records.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreArchive {
    /// Records captured by the archive in their original order.
    pub records: Vec<ScoreRecord>,
}

impl ScoreArchive {
    /// Creates an archive wrapping the provided records.
    #[must_use]
    pub fn new(records: Vec<ScoreRecord>) -> Self {
        Self { records }
    }

    /// Encodes the archive into a single-line transfer string.
    #[must_use]
    pub fn encode(&self) -> String {
        let json =
            serde_json::to_vec(&self.records).expect("score archive serialization never fails");
        let encoded = STANDARD_NO_PAD.encode(json);
        format!("{ARCHIVE_HEADER}:{}:{encoded}", self.records.len())
    }

    /// Decodes an archive from its string representation.
    ///
    /// # Errors
    ///
    /// Returns an [`ArchiveError`] describing the first malformed field.
    pub fn decode(value: &str) -> Result<Self, ArchiveError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ArchiveError::EmptyPayload);
        }

        let mut parts = trimmed.split(FIELD_DELIMITER);
        let domain = parts.next().ok_or(ArchiveError::MissingPrefix)?;
        let version = parts.next().ok_or(ArchiveError::MissingVersion)?;
        let count = parts.next().ok_or(ArchiveError::MissingCount)?;
        let payload = parts.next().ok_or(ArchiveError::MissingPayload)?;

        if domain != ARCHIVE_DOMAIN {
            return Err(ArchiveError::InvalidPrefix(domain.to_owned()));
        }
        if version != ARCHIVE_VERSION {
            return Err(ArchiveError::UnsupportedVersion(version.to_owned()));
        }

        let expected: usize = count
            .parse()
            .map_err(|_| ArchiveError::InvalidCount(count.to_owned()))?;
        let bytes = STANDARD_NO_PAD
            .decode(payload.as_bytes())
            .map_err(ArchiveError::InvalidEncoding)?;
        let records: Vec<ScoreRecord> =
            serde_json::from_slice(&bytes).map_err(ArchiveError::InvalidPayload)?;

        if records.len() != expected {
            return Err(ArchiveError::CountMismatch {
                declared: expected,
                actual: records.len(),
            });
        }

        Ok(Self { records })
    }
}

/// Errors that can occur while decoding archive transfer strings.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The provided string was empty after trimming.
    #[error("archive string is empty")]
    EmptyPayload,
    /// The domain prefix was absent.
    #[error("archive string is missing its prefix")]
    MissingPrefix,
    /// The version field was absent.
    #[error("archive string is missing its version")]
    MissingVersion,
    /// The record count field was absent.
    #[error("archive string is missing its record count")]
    MissingCount,
    /// The payload field was absent.
    #[error("archive string is missing its payload")]
    MissingPayload,
    /// The domain prefix did not match [`ARCHIVE_HEADER`].
    #[error("unrecognized archive prefix: {0}")]
    InvalidPrefix(String),
    /// The version field named an unsupported format revision.
    #[error("unsupported archive version: {0}")]
    UnsupportedVersion(String),
    /// The record count field was not a number.
    #[error("invalid archive record count: {0}")]
    InvalidCount(String),
    /// The payload was not valid base64.
    #[error("archive payload is not valid base64")]
    InvalidEncoding(#[source] base64::DecodeError),
    /// The decoded payload was not a valid record list.
    #[error("archive payload does not decode to score records")]
    InvalidPayload(#[source] serde_json::Error),
    /// The declared count disagreed with the decoded record list.
    #[error("archive declares {declared} records but contains {actual}")]
    CountMismatch {
        /// Count named in the archive header.
        declared: usize,
        /// Number of records actually decoded.
        actual: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use snake_arcade_core::{Difficulty, PlayerId};

    fn sample_records() -> Vec<ScoreRecord> {
        vec![
            ScoreRecord::new(
                PlayerId::new("ada"),
                "Ada",
                "avatars/ada.png",
                120,
                Difficulty::Medium,
                1_700_000_000_000,
            ),
            ScoreRecord::new(
                PlayerId::new("bob"),
                "Bob",
                "",
                45,
                Difficulty::Easy,
                1_700_000_100_000,
            ),
        ]
    }

    #[test]
    fn encode_prefixes_header_and_count() {
        let archive = ScoreArchive::new(sample_records());
        let encoded = archive.encode();
        assert!(encoded.starts_with("scores:v1:2:"));
    }

    #[test]
    fn decode_restores_the_original_records() {
        let archive = ScoreArchive::new(sample_records());
        let decoded = ScoreArchive::decode(&archive.encode()).expect("decode archive");
        assert_eq!(decoded, archive);
    }

    #[test]
    fn decode_rejects_foreign_prefixes() {
        let result = ScoreArchive::decode("maze:v1:0:e30");
        assert!(matches!(result, Err(ArchiveError::InvalidPrefix(_))));
    }

    #[test]
    fn decode_rejects_count_mismatches() {
        let archive = ScoreArchive::new(sample_records());
        let tampered = archive.encode().replacen(":2:", ":9:", 1);
        let result = ScoreArchive::decode(&tampered);
        assert!(matches!(result, Err(ArchiveError::CountMismatch { .. })));
    }

    #[test]
    fn decode_rejects_empty_strings() {
        assert!(matches!(
            ScoreArchive::decode("   "),
            Err(ArchiveError::EmptyPayload)
        ));
    }
}
