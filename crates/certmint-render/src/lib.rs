// SPDX-License-Identifier: MIT
//
// certmint-render — Rendering pipeline for certmint certificates.
//
// Provides QR encoding (with best-effort logo branding), a shared certificate
// content model, and two deterministic back-ends emitting the same content:
// a PDF document and a PNG raster image.

pub mod content;
pub mod pdf;
pub mod qr;
pub mod raster;

pub use qr::{Branding, EncodedQr, QrEncoder};

use certmint_core::{ArtifactFormat, CertificateMetadata, Result};

/// Render one artifact from a metadata record.
///
/// Pure and deterministic: given the same metadata this produces equivalent
/// bytes on every call, which is what makes lost artifacts recoverable and
/// concurrent regeneration of the same artifact harmless.
pub fn render(metadata: &CertificateMetadata, format: ArtifactFormat) -> Result<Vec<u8>> {
    match format {
        ArtifactFormat::Pdf => pdf::render_document(metadata),
        ArtifactFormat::Png => raster::render_image(metadata),
    }
}
