// SPDX-License-Identifier: MIT
//
// Artifact store — three independently named resources per certificate
// ({id}.json, {id}.pdf, {id}.png) under one root directory, fronted by a
// concurrent id -> metadata cache.
//
// Metadata is the system of record: artifacts are pure functions of it, so a
// missing artifact file is repaired by re-rendering rather than failing the
// request. The cache holds immutable values under unique keys, so per-key
// reads and insert-if-absent need no global lock.

use std::path::{Path, PathBuf};

use dashmap::DashMap;
use tracing::{debug, info, instrument, warn};

use certmint_core::error::{CertmintError, Result};
use certmint_core::types::{ArtifactFormat, CertificateId, CertificateMetadata};

pub struct ArtifactStore {
    root: PathBuf,
    cache: DashMap<CertificateId, CertificateMetadata>,
}

impl ArtifactStore {
    /// Open the store, creating the root directory if absent. Idempotent;
    /// failure here is fatal for the process.
    #[instrument(skip_all, fields(root = %root.as_ref().display()))]
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        std::fs::create_dir_all(&root)?;
        info!("artifact store opened");
        Ok(Self {
            root,
            cache: DashMap::new(),
        })
    }

    fn metadata_path(&self, id: CertificateId) -> PathBuf {
        self.root.join(format!("{id}.json"))
    }

    fn artifact_path(&self, id: CertificateId, format: ArtifactFormat) -> PathBuf {
        self.root.join(format!("{id}.{}", format.extension()))
    }

    /// Durably write the metadata record and both artifacts, then populate
    /// the cache.
    ///
    /// The three resources are written independently; a partial failure
    /// leaves earlier writes in place. Writes overwrite, so retrying a
    /// failed save is self-healing.
    #[instrument(skip_all, fields(certificate_id = %metadata.id))]
    pub fn save(
        &self,
        metadata: &CertificateMetadata,
        pdf: &[u8],
        png: &[u8],
    ) -> Result<()> {
        let json = serde_json::to_vec_pretty(metadata)?;
        std::fs::write(self.metadata_path(metadata.id), json)?;
        std::fs::write(self.artifact_path(metadata.id, ArtifactFormat::Pdf), pdf)?;
        std::fs::write(self.artifact_path(metadata.id, ArtifactFormat::Png), png)?;

        self.cache.insert(metadata.id, metadata.clone());
        info!(
            pdf_bytes = pdf.len(),
            png_bytes = png.len(),
            "certificate persisted"
        );
        Ok(())
    }

    /// Look up a metadata record: cache first, then durable storage
    /// (populating the cache), else `NotFound`.
    #[instrument(skip(self), fields(certificate_id = %id))]
    pub fn metadata(&self, id: CertificateId) -> Result<CertificateMetadata> {
        if let Some(entry) = self.cache.get(&id) {
            debug!("cache hit");
            return Ok(entry.value().clone());
        }

        // Single read, no existence probe: a file deleted between a check
        // and the read would otherwise surface as Io instead of NotFound.
        let bytes = match std::fs::read(self.metadata_path(id)) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(CertmintError::NotFound(id.to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        let metadata: CertificateMetadata = serde_json::from_slice(&bytes)?;
        debug!("loaded metadata from disk");

        self.cache.insert(id, metadata.clone());
        Ok(metadata)
    }

    /// Fetch one artifact's bytes: the durable resource if present, else a
    /// fresh render from the stored metadata.
    ///
    /// Regeneration assigns no new identity and mutates nothing — rendering
    /// is pure, so concurrent regeneration of the same artifact is benign.
    #[instrument(skip(self), fields(certificate_id = %id, format = %format))]
    pub fn artifact(&self, id: CertificateId, format: ArtifactFormat) -> Result<Vec<u8>> {
        let metadata = self.metadata(id)?;

        let path = self.artifact_path(id, format);
        match std::fs::read(&path) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("artifact missing, regenerating from metadata");
                certmint_render::render(&metadata, format)
            }
            Err(e) => Err(e.into()),
        }
    }
}
