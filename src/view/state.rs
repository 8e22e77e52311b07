// src/view/state.rs
//! Session state owned by the job-search view

use std::fmt;

use crate::types::{CandidateProfile, EmailTemplate, JobDraft, MatchResult};
use crate::utils::encode_uri_component;
use crate::view::form::JobForm;

/// Search lifecycle: `Idle -> Loading -> (Results | NoResults | Failed)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SearchPhase {
    #[default]
    Idle,
    Loading,
    Results,
    NoResults,
    Failed(String),
}

impl SearchPhase {
    pub fn is_loading(&self) -> bool {
        matches!(self, SearchPhase::Loading)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Blocking failure message.
    Alert,
    /// Informational message; the action was refused before any request.
    Notice,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn alert(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Alert,
            message: message.into(),
        }
    }

    pub fn notice(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Notice,
            message: message.into(),
        }
    }
}

// ===== Email modal =====

/// Editable copy of a generated email.
#[derive(Debug, Clone, PartialEq)]
pub struct EmailDraft {
    pub candidate_id: String,
    pub to: String,
    pub subject: String,
    pub body: String,
    /// Set after a successful clipboard write, cleared by the next edit.
    pub copied: bool,
}

impl EmailDraft {
    pub fn from_template(candidate_id: &str, template: EmailTemplate) -> Self {
        Self {
            candidate_id: candidate_id.to_string(),
            to: template.to_email,
            subject: template.subject,
            body: template.body,
            copied: false,
        }
    }

    pub fn clipboard_text(&self) -> String {
        format!("Subject: {}\n\n{}", self.subject, self.body)
    }

    /// Hand-off URL for the default mail client. Nothing is sent by us.
    pub fn mailto_url(&self) -> String {
        format!(
            "mailto:{}?subject={}&body={}",
            self.to,
            encode_uri_component(&self.subject),
            encode_uri_component(&self.body)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailField {
    To,
    Subject,
    Body,
}

// ===== Overlays =====

#[derive(Debug, Clone, PartialEq)]
pub enum Overlay {
    Profile(CandidateProfile),
    Email(EmailDraft),
}

#[derive(Debug, Clone, PartialEq)]
struct OverlayEntry {
    overlay: Overlay,
    restore_scroll_locked: bool,
}

// ===== Upload & count =====

#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    pub name: String,
    pub content: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UploadStatus {
    Uploading,
    Succeeded(String),
    Failed(String),
}

impl UploadStatus {
    pub fn message(&self) -> String {
        match self {
            UploadStatus::Uploading => "Uploading...".to_string(),
            UploadStatus::Succeeded(message) => message.clone(),
            UploadStatus::Failed(message) => format!("Upload failed: {}", message),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, UploadStatus::Failed(_))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CountBadge {
    #[default]
    Pending,
    Known(u64),
    Unavailable,
}

impl fmt::Display for CountBadge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CountBadge::Pending => f.write_str("-"),
            CountBadge::Known(count) => write!(f, "{}", count),
            CountBadge::Unavailable => f.write_str("?"),
        }
    }
}

// ===== View state =====

#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub form: JobForm,
    pub current_job: Option<JobDraft>,
    pub results: Vec<MatchResult>,
    pub phase: SearchPhase,
    pub candidate_count: CountBadge,
    pub upload_file: Option<UploadFile>,
    pub upload_status: Option<UploadStatus>,
    notices: Vec<Notice>,
    overlays: Vec<OverlayEntry>,
    scroll_locked: bool,
}

impl ViewState {
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub(crate) fn push_notice(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    pub fn scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    pub fn overlay_count(&self) -> usize {
        self.overlays.len()
    }

    pub fn top_overlay(&self) -> Option<&Overlay> {
        self.overlays.last().map(|e| &e.overlay)
    }

    pub(crate) fn top_overlay_mut(&mut self) -> Option<&mut Overlay> {
        self.overlays.last_mut().map(|e| &mut e.overlay)
    }

    /// Open an overlay on top of the page, locking page scroll and
    /// remembering what to restore on close.
    pub(crate) fn push_overlay(&mut self, overlay: Overlay) {
        self.overlays.push(OverlayEntry {
            overlay,
            restore_scroll_locked: self.scroll_locked,
        });
        self.scroll_locked = true;
    }

    pub(crate) fn pop_overlay(&mut self) -> Option<Overlay> {
        let entry = self.overlays.pop()?;
        self.scroll_locked = entry.restore_scroll_locked;
        Some(entry.overlay)
    }

    pub fn email_draft(&self) -> Option<&EmailDraft> {
        match self.top_overlay() {
            Some(Overlay::Email(draft)) => Some(draft),
            _ => None,
        }
    }

    pub(crate) fn email_draft_mut(&mut self) -> Option<&mut EmailDraft> {
        match self.top_overlay_mut() {
            Some(Overlay::Email(draft)) => Some(draft),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> EmailDraft {
        EmailDraft::from_template(
            "fs001",
            EmailTemplate {
                to_email: "ana@example.com".to_string(),
                subject: "Interview: Backend & APIs".to_string(),
                body: "Hi Ana,\nLet's talk.".to_string(),
            },
        )
    }

    #[test]
    fn test_clipboard_text() {
        assert_eq!(
            draft().clipboard_text(),
            "Subject: Interview: Backend & APIs\n\nHi Ana,\nLet's talk."
        );
    }

    #[test]
    fn test_mailto_is_percent_encoded() {
        assert_eq!(
            draft().mailto_url(),
            "mailto:ana@example.com?subject=Interview%3A%20Backend%20%26%20APIs&body=Hi%20Ana%2C%0ALet's%20talk."
        );
    }

    #[test]
    fn test_overlays_restore_scroll_state() {
        let mut state = ViewState::default();
        assert!(!state.scroll_locked());

        state.push_overlay(Overlay::Email(draft()));
        state.push_overlay(Overlay::Email(draft()));
        assert!(state.scroll_locked());
        assert_eq!(state.overlay_count(), 2);

        state.pop_overlay();
        assert!(state.scroll_locked(), "lower overlay still open");
        state.pop_overlay();
        assert!(!state.scroll_locked());
        assert!(state.pop_overlay().is_none());
    }

    #[test]
    fn test_upload_and_badge_labels() {
        assert_eq!(UploadStatus::Uploading.message(), "Uploading...");
        assert_eq!(
            UploadStatus::Failed("API request failed with status 400".into()).message(),
            "Upload failed: API request failed with status 400"
        );
        assert_eq!(CountBadge::Known(42).to_string(), "42");
        assert_eq!(CountBadge::Unavailable.to_string(), "?");
    }
}
