// src/types/candidate.rs
//! Candidate data as returned by the matching backend

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::ClientError;

// ===== Match results =====

/// One ranked candidate. Read-only on the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub candidate_id: String,
    pub candidate_name: String,
    #[serde(default)]
    pub headline: String,
    pub current_role: String,
    #[serde(default)]
    pub similarity_score: f64,
    pub profile_picture: Option<String>,
    pub years_of_experience: f64,
    pub location: String,
    #[serde(default)]
    pub skills: BTreeMap<String, f64>,
    pub matching_skills: Vec<String>,
    #[serde(default)]
    pub assessment_bonus: f64,
    pub overall_score: f64,
    pub ranking_factors: BTreeMap<String, f64>,
    pub github_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub portfolio_url: Option<String>,
}

impl MatchResult {
    /// Score as displayed on cards and exports.
    pub fn display_score(&self) -> i64 {
        percent(self.overall_score)
    }

    /// Headline, falling back to the current role when the backend sent none.
    pub fn subtitle(&self) -> &str {
        if self.headline.trim().is_empty() {
            &self.current_role
        } else {
            &self.headline
        }
    }

    pub fn validate(&self) -> Result<(), ClientError> {
        check_unit(
            &format!("{}.overall_score", self.candidate_id),
            self.overall_score,
        )?;
        // Factors are shown as-is; similarity may fall below zero.
        if let Some(factor) = self
            .ranking_factors
            .iter()
            .find_map(|(name, weight)| (!weight.is_finite()).then_some(name))
        {
            return Err(ClientError::Schema(format!(
                "{}.ranking_factors.{} is not a number",
                self.candidate_id, factor
            )));
        }
        if !self.assessment_bonus.is_finite() {
            return Err(ClientError::Schema(format!(
                "{}.assessment_bonus is not a number",
                self.candidate_id
            )));
        }
        Ok(())
    }
}

/// Decode and validate a match response body, keeping server order.
pub fn parse_matches(body: &str) -> Result<Vec<MatchResult>, ClientError> {
    let matches: Vec<MatchResult> = serde_json::from_str(body)?;
    for candidate in &matches {
        candidate.validate()?;
    }
    Ok(matches)
}

/// `round(value * 100)` the way every percentage in the UI is shown.
pub fn percent(value: f64) -> i64 {
    (value * 100.0).round() as i64
}

fn check_unit(field: &str, value: f64) -> Result<(), ClientError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ClientError::Schema(format!(
            "{} must be within [0, 1], got {}",
            field, value
        )))
    }
}

// ===== Full profile =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub profile_picture: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    pub portfolio_url: Option<String>,
    pub location: String,
    #[serde(default)]
    pub headline: String,
    #[serde(default)]
    pub summary: String,
    pub current_role: String,
    pub years_of_experience: f64,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub experience: Vec<WorkExperience>,
    #[serde(default)]
    pub skills: BTreeMap<String, f64>,
    pub projects: Option<Vec<Project>>,
    pub certifications: Option<Vec<Certification>>,
    pub languages: Option<BTreeMap<String, String>>,
    pub hire3x_data: Option<Hire3xData>,
    pub availability: Option<String>,
    pub desired_role: Option<String>,
    pub preferred_work_type: Option<String>,
}

impl CandidateProfile {
    pub fn subtitle(&self) -> &str {
        if self.headline.trim().is_empty() {
            &self.current_role
        } else {
            &self.headline
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub institution: String,
    pub degree: String,
    pub field_of_study: String,
    pub graduation_year: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkExperience {
    pub company: String,
    pub role: String,
    #[serde(default)]
    pub current: bool,
    pub start_date: Option<String>,
    pub end_date: Option<String>, // None means present
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub skills_used: Vec<String>,
    pub achievements: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    pub skills_gained: Option<Vec<String>>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certification {
    pub name: String,
    #[serde(default)]
    pub skills_validated: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hire3xData {
    pub joined_date: Option<String>,
    pub profile_completion: Option<u32>,
    pub activity_score: Option<u32>,
    #[serde(default)]
    pub assessments: Vec<Assessment>,
    #[serde(default)]
    pub courses: Vec<Course>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub assessment_id: String,
    pub name: String,
    pub score: f64, // 0-100
    pub percentile: f64,
    #[serde(default)]
    pub skills_evaluated: Vec<String>,
    pub completion_time: u32, // minutes
    pub allowed_time: u32,    // minutes
    pub completion_rate: f64,
    pub accuracy: f64,
    pub confidence_score: f64,
    pub taken_date: Option<String>,
    pub proficiency_level: Option<String>,
}

impl Assessment {
    /// Share of the allowed time that was used, in percent.
    pub fn time_used_percent(&self) -> f64 {
        if self.allowed_time == 0 {
            return 0.0;
        }
        f64::from(self.completion_time) / f64::from(self.allowed_time) * 100.0
    }

    pub fn efficiency_percent(&self) -> i64 {
        percent(1.0 - self.completion_rate)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub name: String,
    pub category: String,
    pub completion_status: String,
    pub completion_date: Option<String>,
    pub assignment_avg_score: Option<f64>,
}
