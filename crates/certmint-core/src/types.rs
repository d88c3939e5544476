// SPDX-License-Identifier: MIT
//
// Core domain types for the certmint certificate pipeline.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fixed rendering of all dates on certificates and in durable metadata.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Unique identifier for an issued certificate.
///
/// A v4 UUID: 128 random bits, assigned exactly once at generation time and
/// never reused. Collision probability is negligible, so no uniqueness check
/// against the store is performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CertificateId(pub Uuid);

impl CertificateId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identifier from its canonical string form.
    ///
    /// Returns `None` for anything that is not a well-formed UUID — callers
    /// treat that the same as an unknown id.
    pub fn parse(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(Self)
    }
}

impl Default for CertificateId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CertificateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Caller input for one generation call. Transient — nothing here is stored
/// until validation has passed and an identity has been assigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateRequest {
    pub participant_name: String,
    pub course_name: String,
    /// `None` models an absent or unparseable date at the boundary; the
    /// validator rejects it before any side effect.
    pub completion_date: Option<NaiveDate>,
    pub issuer_name: String,
}

/// The immutable system of record for one issued certificate.
///
/// Written exactly once per successful generation, then only read or
/// regenerated-from. The QR bitmap is captured at generation time so that
/// artifacts can be re-rendered without re-invoking the encoder.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateMetadata {
    #[serde(rename = "certificateId")]
    pub id: CertificateId,
    pub participant_name: String,
    pub course_name: String,
    pub completion_date: NaiveDate,
    pub issuer_name: String,
    /// Server-assigned date of generation; never caller-supplied.
    pub issue_date: NaiveDate,
    pub verification_url: String,
    /// Encoded QR PNG for `verification_url`, stored base64 in the durable
    /// record under the stable field name `qrCodeEncoded`.
    #[serde(rename = "qrCodeEncoded", with = "base64_bytes")]
    pub qr_png: Vec<u8>,
}

/// The two rendered artifact formats derived from a metadata record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArtifactFormat {
    Pdf,
    Png,
}

impl ArtifactFormat {
    /// Parse a caller-supplied format string, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "png" => Some(Self::Png),
            _ => None,
        }
    }

    /// File extension used for the durable artifact resource.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Png => "png",
        }
    }

    /// MIME type for the HTTP Content-Type header.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Png => "image/png",
        }
    }
}

impl std::fmt::Display for ArtifactFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// What `generate` hands back to the boundary layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueReceipt {
    pub certificate_id: CertificateId,
    pub verification_url: String,
    pub pdf_download_url: String,
    pub png_download_url: String,
    pub issue_date: NaiveDate,
}

/// Serde adapter for raw bytes stored as standard base64 strings.
mod base64_bytes {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&BASE64_STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        BASE64_STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}
