pub mod candidate;
pub mod job;
pub mod response;

pub use candidate::{CandidateProfile, MatchResult};
pub use job::{EmploymentType, ExperienceLevel, JobDraft, MatchQuery, RemoteOption};
pub use response::{CountResponse, EmailTemplate, HealthResponse, PdfExportResponse, UploadResponse};
