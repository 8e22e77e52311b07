// src/view/mod.rs
//! Job-search view: form handling, search lifecycle, overlays and exports
//!
//! Every handler takes `&mut self`. Failures never propagate to the caller;
//! they end up in the view state as a panel, an alert, a notice or the
//! upload status.

pub mod form;
pub mod state;


use crate::app_log;
use crate::core::MatchingBackend;
use crate::desktop::Desktop;
use crate::error::ClientError;
use crate::render::{self, Node};
use crate::types::{JobDraft, MatchQuery, MatchResult};

pub use form::{AssessmentSelect, JobFile, JobForm, Key, Tag, TagId, TagList, TagListKind};
pub use state::{
    CountBadge, EmailDraft, EmailField, Notice, NoticeKind, Overlay, SearchPhase, UploadFile,
    UploadStatus, ViewState,
};

pub const PROFILE_FAILED: &str = "Failed to load candidate profile. Please try again.";
pub const EMAIL_FAILED: &str = "Failed to generate email. Please try again.";
pub const CLIPBOARD_FAILED: &str = "Failed to copy to clipboard";
pub const PDF_FAILED: &str = "Failed to export profile as PDF. Please try again.";
pub const NOTHING_TO_EXPORT: &str = "No candidates to export";
pub const NO_UPLOAD_FILE: &str = "Please select a file to upload";

pub struct JobSearchView<B, D> {
    backend: B,
    desktop: D,
    state: ViewState,
}

impl<B: MatchingBackend, D: Desktop> JobSearchView<B, D> {
    pub fn new(backend: B, desktop: D) -> Self {
        Self {
            backend,
            desktop,
            state: ViewState::default(),
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut ViewState {
        &mut self.state
    }

    pub fn form_mut(&mut self) -> &mut form::JobForm {
        &mut self.state.form
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn desktop(&self) -> &D {
        &self.desktop
    }

    fn alert(&mut self, message: &str) {
        self.state.push_notice(Notice::alert(message));
    }

    // ===== Search =====

    /// Submit the form: store the draft as current job, then match.
    pub async fn submit(&mut self) {
        let (job, query) = self.begin_search();
        let outcome = self.backend.match_candidates(&job, &query).await;
        self.finish_search(outcome);
    }

    /// Snapshot the form and enter `Loading`. The draft becomes the current
    /// job before any request is made.
    pub fn begin_search(&mut self) -> (JobDraft, MatchQuery) {
        let job = self.state.form.to_draft();
        let query = self.state.form.match_query();

        app_log!(
            info,
            "Submitting job search {} ({}), top_k={}",
            job.id,
            job.title,
            query.top_k
        );

        self.state.current_job = Some(job.clone());
        self.state.phase = SearchPhase::Loading;
        (job, query)
    }

    pub fn finish_search(&mut self, outcome: Result<Vec<MatchResult>, ClientError>) {
        match outcome {
            Ok(results) if results.is_empty() => {
                app_log!(info, "Search returned no candidates");
                self.state.results.clear();
                self.state.phase = SearchPhase::NoResults;
            }
            Ok(results) => {
                app_log!(info, "Search returned {} candidates", results.len());
                self.state.results = results;
                self.state.phase = SearchPhase::Results;
            }
            Err(err) => {
                app_log!(error, "Error matching candidates: {}", err);
                self.state.results.clear();
                self.state.phase = SearchPhase::Failed(err.to_string());
            }
        }
    }

    // ===== Overlays =====

    pub async fn show_profile(&mut self, candidate_id: &str) {
        match self.backend.candidate_profile(candidate_id).await {
            Ok(profile) => self.state.push_overlay(Overlay::Profile(profile)),
            Err(err) => {
                app_log!(error, "Error fetching candidate profile {}: {}", candidate_id, err);
                self.alert(PROFILE_FAILED);
            }
        }
    }

    pub fn close_overlay(&mut self) -> Option<Overlay> {
        self.state.pop_overlay()
    }

    // ===== Email =====

    pub async fn generate_email(&mut self, candidate_id: &str) {
        let Some(job) = self.state.current_job.clone() else {
            app_log!(warn, "Email requested before any job search");
            self.state
                .push_notice(Notice::notice(ClientError::MissingJob.to_string()));
            return;
        };

        match self.backend.generate_email(candidate_id, &job).await {
            Ok(template) => {
                let draft = EmailDraft::from_template(candidate_id, template);
                self.state.push_overlay(Overlay::Email(draft));
            }
            Err(err) => {
                app_log!(error, "Error generating email for {}: {}", candidate_id, err);
                self.alert(EMAIL_FAILED);
            }
        }
    }

    /// Edit a field of the open email. Returns false when no email is open.
    pub fn edit_email(&mut self, field: EmailField, value: impl Into<String>) -> bool {
        let Some(draft) = self.state.email_draft_mut() else {
            return false;
        };
        let value = value.into();
        match field {
            EmailField::To => draft.to = value,
            EmailField::Subject => draft.subject = value,
            EmailField::Body => draft.body = value,
        }
        draft.copied = false;
        true
    }

    pub fn copy_email(&mut self) {
        let Some(text) = self.state.email_draft().map(EmailDraft::clipboard_text) else {
            return;
        };

        match self.desktop.copy_text(&text) {
            Ok(()) => {
                if let Some(draft) = self.state.email_draft_mut() {
                    draft.copied = true;
                }
            }
            Err(err) => {
                app_log!(error, "Failed to copy email: {}", err);
                self.alert(CLIPBOARD_FAILED);
            }
        }
    }

    /// Hand the draft to the mail client via `mailto:`.
    pub fn send_email(&mut self) {
        let Some(url) = self.state.email_draft().map(EmailDraft::mailto_url) else {
            return;
        };
        if let Err(err) = self.desktop.open_url(&url) {
            app_log!(error, "Failed to open mail client: {}", err);
            self.alert(&err.to_string());
        }
    }

    // ===== Exports =====

    pub async fn export_candidate_pdf(&mut self, candidate_id: &str) {
        let filename = match self.backend.export_pdf(candidate_id).await {
            Ok(export) => export.filename,
            Err(err) => {
                app_log!(error, "Error exporting PDF for {}: {}", candidate_id, err);
                None
            }
        };

        let Some(filename) = filename else {
            self.alert(PDF_FAILED);
            return;
        };

        app_log!(info, "PDF {} ready for {}", filename, candidate_id);
        let url = self.backend.pdf_url(candidate_id);
        if let Err(err) = self.desktop.open_url(&url) {
            app_log!(error, "Failed to open PDF {}: {}", url, err);
            self.alert(PDF_FAILED);
        }
    }

    /// Standalone HTML of the held results, or `None` when there are none.
    pub fn results_document(&self) -> Option<String> {
        if self.state.results.is_empty() {
            return None;
        }
        Some(render::export_html(
            self.state.current_job.as_ref(),
            &self.state.results,
            chrono::Local::now().date_naive(),
        ))
    }

    /// Print the held results. No request is made.
    pub fn export_results(&mut self) {
        let Some(document) = self.results_document() else {
            self.alert(NOTHING_TO_EXPORT);
            return;
        };

        if let Err(err) = self.desktop.print_document(&document) {
            app_log!(error, "Error exporting results: {}", err);
            self.alert(&err.to_string());
        }
    }

    // ===== Form =====

    /// Restore the form to defaults. Results and the current job stay.
    pub fn reset_form(&mut self) {
        self.state.form.reset();
        app_log!(debug, "Job form reset");
    }

    // ===== Candidates =====

    pub async fn upload_candidates(&mut self) {
        let Some(file) = self.state.upload_file.clone() else {
            self.alert(NO_UPLOAD_FILE);
            return;
        };

        self.state.upload_status = Some(UploadStatus::Uploading);
        match self
            .backend
            .upload_candidates(&file.name, file.content)
            .await
        {
            Ok(receipt) => {
                app_log!(info, "Upload of {} succeeded: {}", file.name, receipt.message);
                self.state.upload_status = Some(UploadStatus::Succeeded(receipt.message));
                self.state.upload_file = None;
                self.refresh_candidate_count().await;
            }
            Err(err) => {
                app_log!(error, "Upload of {} failed: {}", file.name, err);
                self.state.upload_status = Some(UploadStatus::Failed(err.to_string()));
            }
        }
    }

    pub async fn refresh_candidate_count(&mut self) {
        self.state.candidate_count = match self.backend.candidate_count().await {
            Ok(count) => CountBadge::Known(count),
            Err(err) => {
                app_log!(warn, "Error fetching candidate count: {}", err);
                CountBadge::Unavailable
            }
        };
    }

    // ===== Rendering =====

    pub fn render_results(&self) -> Node {
        render::results_section(&self.state)
    }

    pub fn render_overlay(&self) -> Option<Node> {
        self.state.top_overlay().map(|overlay| match overlay {
            Overlay::Profile(profile) => render::profile_overlay(profile),
            Overlay::Email(draft) => render::email_overlay(draft),
        })
    }
}
