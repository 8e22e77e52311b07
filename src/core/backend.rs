// src/core/backend.rs
use async_trait::async_trait;

use crate::error::ClientError;
use crate::types::{
    CandidateProfile, EmailTemplate, JobDraft, MatchQuery, MatchResult, PdfExportResponse,
    UploadResponse,
};

/// Operations the job-search view needs from the matching service.
#[async_trait]
pub trait MatchingBackend: Send + Sync {
    async fn match_candidates(
        &self,
        job: &JobDraft,
        query: &MatchQuery,
    ) -> Result<Vec<MatchResult>, ClientError>;

    async fn candidate_profile(&self, candidate_id: &str) -> Result<CandidateProfile, ClientError>;

    async fn generate_email(
        &self,
        candidate_id: &str,
        job: &JobDraft,
    ) -> Result<EmailTemplate, ClientError>;

    async fn export_pdf(&self, candidate_id: &str) -> Result<PdfExportResponse, ClientError>;

    /// Retrieval URL of a rendered profile PDF. Pure, no request is made.
    fn pdf_url(&self, candidate_id: &str) -> String;

    async fn upload_candidates(
        &self,
        file_name: &str,
        content: Vec<u8>,
    ) -> Result<UploadResponse, ClientError>;

    async fn candidate_count(&self) -> Result<u64, ClientError>;
}
