// src/types/job.rs
//! Job draft submitted for matching, plus the match filters sent as query parameters

use serde::{Deserialize, Serialize};
use std::fmt;

// ===== Closed vocabularies =====

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum RemoteOption {
    #[default]
    #[serde(rename = "No Preference")]
    NoPreference,
    #[serde(rename = "Remote Only")]
    RemoteOnly,
    #[serde(rename = "Hybrid")]
    Hybrid,
    #[serde(rename = "On-Site")]
    OnSite,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum ExperienceLevel {
    #[default]
    #[serde(rename = "Entry Level")]
    EntryLevel,
    #[serde(rename = "Mid-Level")]
    MidLevel,
    #[serde(rename = "Senior")]
    Senior,
    #[serde(rename = "Expert")]
    Expert,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum EmploymentType {
    #[default]
    #[serde(rename = "Full-time")]
    FullTime,
    #[serde(rename = "Part-time")]
    PartTime,
    #[serde(rename = "Contract")]
    Contract,
    #[serde(rename = "Freelance")]
    Freelance,
}

impl fmt::Display for RemoteOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RemoteOption::NoPreference => "No Preference",
            RemoteOption::RemoteOnly => "Remote Only",
            RemoteOption::Hybrid => "Hybrid",
            RemoteOption::OnSite => "On-Site",
        })
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExperienceLevel::EntryLevel => "Entry Level",
            ExperienceLevel::MidLevel => "Mid-Level",
            ExperienceLevel::Senior => "Senior",
            ExperienceLevel::Expert => "Expert",
        })
    }
}

impl fmt::Display for EmploymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EmploymentType::FullTime => "Full-time",
            EmploymentType::PartTime => "Part-time",
            EmploymentType::Contract => "Contract",
            EmploymentType::Freelance => "Freelance",
        })
    }
}

/// Assessments a job can require, in the order the multi-select lists them.
pub const ASSESSMENT_CATALOG: &[&str] = &[
    "Frontend Development",
    "Backend Development",
    "Database Management",
    "Data Science",
    "Machine Learning",
    "DevOps",
    "Cloud Architecture",
    "Cybersecurity",
    "Mobile Development",
    "QA Automation",
    "UI/UX Design",
];

// ===== Job draft =====

/// Client-assembled job posting. Replaced wholesale on every submit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDraft {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub remote_option: RemoteOption,
    pub description: String,
    pub required_skills: Vec<String>,
    pub requirements: Vec<String>,
    pub responsibilities: Vec<String>,
    pub required_assessments: Vec<String>,
    pub min_assessment_score: Option<f64>,
    pub experience_level: ExperienceLevel,
    pub employment_type: EmploymentType,
}

/// Timestamp-derived draft id. Only distinguishes drafts within one session.
pub fn new_job_id() -> String {
    format!("job-{}", chrono::Utc::now().timestamp_millis())
}

// ===== Match filters =====

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchQuery {
    pub top_k: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_experience: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_assessment_score: Option<f64>,
}

pub const DEFAULT_TOP_K: u32 = 10;

impl Default for MatchQuery {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            min_experience: None,
            location_filter: None,
            min_assessment_score: None,
        }
    }
}

impl MatchQuery {
    /// Query pairs in wire order; absent filters are omitted entirely.
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("top_k", self.top_k.to_string())];

        if let Some(min_experience) = self.min_experience {
            pairs.push(("min_experience", min_experience.to_string()));
        }
        if let Some(location) = self
            .location_filter
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
        {
            pairs.push(("location_filter", location.to_string()));
        }
        if let Some(score) = self.min_assessment_score {
            pairs.push(("min_assessment_score", score.to_string()));
        }

        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabularies_serialize_as_display_strings() {
        assert_eq!(
            serde_json::to_string(&RemoteOption::OnSite).unwrap(),
            "\"On-Site\""
        );
        assert_eq!(
            serde_json::to_string(&ExperienceLevel::MidLevel).unwrap(),
            "\"Mid-Level\""
        );
        assert_eq!(
            serde_json::to_string(&EmploymentType::FullTime).unwrap(),
            "\"Full-time\""
        );
        assert_eq!(RemoteOption::RemoteOnly.to_string(), "Remote Only");
    }

    #[test]
    fn test_job_id_is_timestamp_token() {
        let id = new_job_id();
        let millis = id.strip_prefix("job-").expect("job- prefix");
        assert!(millis.parse::<i64>().is_ok());
    }

    #[test]
    fn test_default_query_only_has_top_k() {
        let pairs = MatchQuery::default().pairs();
        assert_eq!(pairs, vec![("top_k", "10".to_string())]);
    }

    #[test]
    fn test_blank_location_filter_is_omitted() {
        let query = MatchQuery {
            location_filter: Some("   ".to_string()),
            min_experience: Some(3.5),
            ..MatchQuery::default()
        };
        let keys: Vec<_> = query.pairs().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["top_k", "min_experience"]);
    }

    #[test]
    fn test_draft_wire_shape() {
        let draft = JobDraft {
            id: "job-1".to_string(),
            title: "Backend Engineer".to_string(),
            company: "Acme".to_string(),
            location: "Remote".to_string(),
            remote_option: RemoteOption::RemoteOnly,
            description: "Build APIs".to_string(),
            required_skills: vec!["Rust".to_string(), "Rust".to_string()],
            requirements: vec![],
            responsibilities: vec![],
            required_assessments: vec!["DevOps".to_string()],
            min_assessment_score: None,
            experience_level: ExperienceLevel::Senior,
            employment_type: EmploymentType::Contract,
        };

        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["remote_option"], "Remote Only");
        assert_eq!(value["required_skills"].as_array().unwrap().len(), 2);
        assert!(value["min_assessment_score"].is_null());
    }
}
