// SPDX-License-Identifier: MIT
//
// Application configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::types::{ArtifactFormat, CertificateId};

/// Settings for the certificate pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL prefixed onto verification and download links.
    pub base_url: String,
    /// Directory holding `{id}.json` / `{id}.pdf` / `{id}.png` resources.
    /// Created at startup if absent.
    pub artifact_root: PathBuf,
    /// Logo composited onto the center of generated QR codes. Overlay is
    /// best-effort: a missing or undecodable file degrades to an
    /// undecorated code.
    pub logo_path: PathBuf,
    /// Side length in pixels of the square QR code (default 300).
    pub qr_size: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "https://certs.example.com".into(),
            artifact_root: PathBuf::from("certificates"),
            logo_path: PathBuf::from("assets/logo.png"),
            qr_size: 300,
        }
    }
}

impl AppConfig {
    /// Canonical verification link for a certificate, encoded into its QR code.
    pub fn verification_url(&self, id: CertificateId) -> String {
        format!("{}/api/certificates/{}/verify", self.base_url, id)
    }

    /// Download link for one artifact format of a certificate.
    pub fn download_url(&self, id: CertificateId, format: ArtifactFormat) -> String {
        format!(
            "{}/api/certificates/{}/download?format={}",
            self.base_url, id, format
        )
    }
}
