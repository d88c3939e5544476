// SPDX-License-Identifier: MIT
//
// Certificate service — validation, identity assignment, QR encoding,
// rendering, and persistence wired into the three boundary operations.

use chrono::{Local, NaiveDate};
use tracing::{error, info, instrument};

use certmint_core::error::{CertmintError, Result};
use certmint_core::types::{
    ArtifactFormat, CertificateId, CertificateMetadata, CertificateRequest, IssueReceipt,
};
use certmint_core::{AppConfig, validate_request};
use certmint_render::QrEncoder;
use certmint_store::ArtifactStore;

pub struct CertificateService {
    config: AppConfig,
    store: ArtifactStore,
    qr: QrEncoder,
}

impl CertificateService {
    /// Open the artifact store (creating its root if needed) and build the
    /// service. Fatal if the root cannot be created.
    pub fn new(config: AppConfig) -> Result<Self> {
        let store = ArtifactStore::open(&config.artifact_root)?;
        let qr = QrEncoder::new(config.qr_size, &config.logo_path);
        Ok(Self { config, store, qr })
    }

    /// Generate a certificate: validate, assign identity, encode the QR
    /// code, render both artifacts, and persist everything.
    ///
    /// Validation failures surface as `Validation` before any side effect.
    /// Everything after validation is wrapped as `Generation` with the
    /// cause logged server-side.
    #[instrument(skip_all)]
    pub fn generate(&self, request: &CertificateRequest) -> Result<IssueReceipt> {
        validate_request(request)?;
        // The validator guarantees the date is present; destructure it here
        // so an absent date can never be reclassified by the wrapping below.
        let completion_date = request
            .completion_date
            .ok_or_else(|| CertmintError::Validation("completion date is required".into()))?;

        self.issue(request, completion_date).map_err(|e| {
            error!(error = %e, "certificate generation failed");
            CertmintError::Generation(e.to_string())
        })
    }

    fn issue(
        &self,
        request: &CertificateRequest,
        completion_date: NaiveDate,
    ) -> Result<IssueReceipt> {
        let id = CertificateId::new();
        let issue_date = Local::now().date_naive();
        let verification_url = self.config.verification_url(id);

        let qr = self.qr.encode(&verification_url)?;

        let metadata = CertificateMetadata {
            id,
            participant_name: request.participant_name.clone(),
            course_name: request.course_name.clone(),
            completion_date,
            issuer_name: request.issuer_name.clone(),
            issue_date,
            verification_url: verification_url.clone(),
            qr_png: qr.png,
        };

        let pdf = certmint_render::render(&metadata, ArtifactFormat::Pdf)?;
        let png = certmint_render::render(&metadata, ArtifactFormat::Png)?;
        self.store.save(&metadata, &pdf, &png)?;

        info!(certificate_id = %id, participant = %metadata.participant_name, "certificate issued");
        Ok(IssueReceipt {
            certificate_id: id,
            verification_url,
            pdf_download_url: self.config.download_url(id, ArtifactFormat::Pdf),
            png_download_url: self.config.download_url(id, ArtifactFormat::Png),
            issue_date,
        })
    }

    /// Look up the metadata record for a certificate id. Ids that do not
    /// parse are treated the same as unknown ids.
    pub fn metadata(&self, id: &str) -> Result<CertificateMetadata> {
        let id = CertificateId::parse(id).ok_or_else(|| CertmintError::NotFound(id.to_string()))?;
        self.store.metadata(id)
    }

    /// Fetch one artifact's bytes plus its MIME type. The format string is
    /// checked first, so an unsupported format on an existing id is
    /// `UnsupportedFormat`, not `NotFound`.
    pub fn artifact(&self, id: &str, format: &str) -> Result<(Vec<u8>, &'static str)> {
        let format = ArtifactFormat::parse(format)
            .ok_or_else(|| CertmintError::UnsupportedFormat(format.to_string()))?;
        let id = CertificateId::parse(id).ok_or_else(|| CertmintError::NotFound(id.to_string()))?;

        let bytes = self.store.artifact(id, format)?;
        Ok((bytes, format.mime_type()))
    }
}
