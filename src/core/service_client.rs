// src/core/service_client.rs
//! HTTP client for the Hire3x matching service - JSON everywhere except
//! candidate upload (multipart) and PDF retrieval (binary)

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Response, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::app_log;
use crate::core::backend::MatchingBackend;
use crate::error::ClientError;
use crate::types::candidate::parse_matches;
use crate::types::response::{EmailRequest, MessageResponse};
use crate::types::{
    CandidateProfile, CountResponse, EmailTemplate, HealthResponse, JobDraft, MatchQuery,
    MatchResult, PdfExportResponse, UploadResponse,
};
use crate::utils::{encode_uri_component, upload_content_type};

const API_PREFIX: &str = "/api";
const JOBS_MATCH_ENDPOINT: &str = "/jobs/match/";
const CANDIDATES_ENDPOINT: &str = "/candidates/";
const EXPORT_PDF_ENDPOINT: &str = "/candidates/export-pdf/";
const PDF_ENDPOINT: &str = "/candidates/pdf/";
const UPLOAD_ENDPOINT: &str = "/candidates/upload/";
const COUNT_ENDPOINT: &str = "/candidates/count/";
const EMAIL_ENDPOINT: &str = "/email/generate";
const HEALTH_ENDPOINT: &str = "/health";

pub struct ServiceClient {
    client: reqwest::Client,
    api_root: String,
}

impl ServiceClient {
    /// Create a client for `base_url` (e.g. `http://localhost:8000`).
    ///
    /// No request timeout is installed: a hung backend keeps the caller
    /// waiting. `connect_timeout` only bounds connection establishment.
    pub fn new(base_url: &str, connect_timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Self::with_client(client, base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Result<Self> {
        Url::parse(base_url).with_context(|| format!("Invalid API URL: {}", base_url))?;

        Ok(Self {
            client,
            api_root: format!("{}{}", base_url.trim_end_matches('/'), API_PREFIX),
        })
    }

    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_root, path)
    }

    fn candidate_endpoint(&self, prefix: &str, candidate_id: &str) -> String {
        format!(
            "{}{}{}",
            self.api_root,
            prefix,
            encode_uri_component(candidate_id)
        )
    }

    /// Match URL with only the filters that are present in the query string.
    pub fn match_url(&self, query: &MatchQuery) -> Result<Url, ClientError> {
        let mut url = parse_url(&self.endpoint(JOBS_MATCH_ENDPOINT))?;
        url.query_pairs_mut().extend_pairs(query.pairs());
        Ok(url)
    }

    /// Read the body as text, mapping non-2xx to `ClientError::Status`.
    async fn read_body(response: Response) -> Result<String, ClientError> {
        let status = response.status();
        app_log!(trace, "Response status: {}", status);

        if status.is_success() {
            Ok(response.text().await?)
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            app_log!(error, "Matching service error response: {}", error_text);
            Err(ClientError::Status {
                status: status.as_u16(),
                body: error_text,
            })
        }
    }

    async fn read_json<R: DeserializeOwned>(response: Response) -> Result<R, ClientError> {
        let body = Self::read_body(response).await?;
        Ok(serde_json::from_str(&body)?)
    }

    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        let url = self.endpoint(HEALTH_ENDPOINT);
        app_log!(trace, "Calling health endpoint: {}", url);

        let response = self.client.get(&url).send().await?;
        Self::read_json(response).await
    }

    pub async fn delete_candidate(&self, candidate_id: &str) -> Result<String, ClientError> {
        let url = self.candidate_endpoint(CANDIDATES_ENDPOINT, candidate_id);
        app_log!(info, "Deleting candidate: {}", candidate_id);

        let response = self.client.delete(&url).send().await?;
        let deleted: MessageResponse = Self::read_json(response).await?;
        Ok(deleted.message)
    }

    /// Fetch the rendered PDF bytes produced by a prior `export_pdf`.
    pub async fn download_pdf(&self, candidate_id: &str) -> Result<Vec<u8>, ClientError> {
        let url = self.pdf_url(candidate_id);
        app_log!(trace, "Downloading PDF: {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(response.bytes().await?.to_vec())
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(ClientError::Status {
                status: status.as_u16(),
                body: error_text,
            })
        }
    }
}

fn parse_url(raw: &str) -> Result<Url, ClientError> {
    Url::parse(raw).map_err(|e| ClientError::InvalidUrl(format!("{}: {}", raw, e)))
}

#[async_trait]
impl MatchingBackend for ServiceClient {
    async fn match_candidates(
        &self,
        job: &JobDraft,
        query: &MatchQuery,
    ) -> Result<Vec<MatchResult>, ClientError> {
        let url = self.match_url(query)?;
        app_log!(info, "Calling job matching service: {}", url);

        let response = self.client.post(url).json(job).send().await?;
        let body = Self::read_body(response).await?;
        let matches = parse_matches(&body)?;

        app_log!(info, "Received {} candidate matches", matches.len());
        Ok(matches)
    }

    async fn candidate_profile(&self, candidate_id: &str) -> Result<CandidateProfile, ClientError> {
        let url = self.candidate_endpoint(CANDIDATES_ENDPOINT, candidate_id);
        app_log!(trace, "Fetching candidate profile: {}", url);

        let response = self.client.get(&url).send().await?;
        Self::read_json(response).await
    }

    async fn generate_email(
        &self,
        candidate_id: &str,
        job: &JobDraft,
    ) -> Result<EmailTemplate, ClientError> {
        let url = self.endpoint(EMAIL_ENDPOINT);
        app_log!(trace, "Calling email generation: {}", url);

        let payload = EmailRequest { candidate_id, job };
        let response = self.client.post(&url).json(&payload).send().await?;
        Self::read_json(response).await
    }

    async fn export_pdf(&self, candidate_id: &str) -> Result<PdfExportResponse, ClientError> {
        let url = self.candidate_endpoint(EXPORT_PDF_ENDPOINT, candidate_id);
        app_log!(info, "Requesting PDF export: {}", url);

        let response = self.client.post(&url).send().await?;
        Self::read_json(response).await
    }

    fn pdf_url(&self, candidate_id: &str) -> String {
        self.candidate_endpoint(PDF_ENDPOINT, candidate_id)
    }

    async fn upload_candidates(
        &self,
        file_name: &str,
        content: Vec<u8>,
    ) -> Result<UploadResponse, ClientError> {
        let url = self.endpoint(UPLOAD_ENDPOINT);
        let part = Part::bytes(content)
            .file_name(file_name.to_string())
            .mime_str(upload_content_type(file_name))?;
        let form = Form::new().part("file", part);

        app_log!(info, "Uploading candidates file {} to {}", file_name, url);

        let response = self.client.post(&url).multipart(form).send().await?;
        Self::read_json(response).await
    }

    async fn candidate_count(&self) -> Result<u64, ClientError> {
        let url = self.endpoint(COUNT_ENDPOINT);
        let response = self.client.get(&url).send().await?;
        let count: CountResponse = Self::read_json(response).await?;
        Ok(count.count)
    }
}
