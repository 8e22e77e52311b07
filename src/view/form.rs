// src/view/form.rs
//! Job form: plain fields, the three tag lists and the assessment multi-select

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

use crate::core::FsOps;
use crate::types::job::{
    new_job_id, EmploymentType, ExperienceLevel, JobDraft, MatchQuery, RemoteOption,
    ASSESSMENT_CATALOG, DEFAULT_TOP_K,
};
use crate::utils::validate_file_extension;

// ===== Dynamic tag lists =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TagId(u64);

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    pub id: TagId,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagListKind {
    Skills,
    Requirements,
    Responsibilities,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Other,
}

/// Ordered free-text tags with their pending input buffer.
///
/// Duplicates are kept. Ids are never reused, so a stale id can only miss.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagList {
    pub input: String,
    tags: Vec<Tag>,
    next_id: u64,
}

impl TagList {
    pub fn set_input(&mut self, value: impl Into<String>) {
        self.input = value.into();
    }

    /// Append the trimmed input as a new tag and clear the input.
    /// Blank input is a silent no-op and is left in place.
    pub fn add(&mut self) -> Option<TagId> {
        let value = self.input.trim();
        if value.is_empty() {
            return None;
        }
        let id = TagId(self.next_id);
        self.next_id += 1;
        self.tags.push(Tag {
            id,
            text: value.to_string(),
        });
        self.input.clear();
        Some(id)
    }

    /// Enter in the input behaves exactly like the add control.
    pub fn key(&mut self, key: Key) -> Option<TagId> {
        match key {
            Key::Enter => self.add(),
            Key::Other => None,
        }
    }

    pub fn remove(&mut self, id: TagId) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t.id != id);
        self.tags.len() != before
    }

    pub fn extend<I, S>(&mut self, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for value in values {
            self.set_input(value);
            self.add();
        }
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn values(&self) -> Vec<String> {
        self.tags.iter().map(|t| t.text.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn clear(&mut self) {
        self.tags.clear();
        self.input.clear();
    }
}

// ===== Assessment multi-select =====

#[derive(Debug, Clone, PartialEq)]
pub struct AssessmentSelect {
    options: Vec<String>,
    selected: BTreeSet<usize>,
}

impl Default for AssessmentSelect {
    fn default() -> Self {
        Self::with_options(ASSESSMENT_CATALOG.iter().map(|s| s.to_string()).collect())
    }
}

impl AssessmentSelect {
    pub fn with_options(options: Vec<String>) -> Self {
        Self {
            options,
            selected: BTreeSet::new(),
        }
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Select an option by name (case-insensitive). Returns false for unknown names.
    pub fn select(&mut self, name: &str) -> bool {
        match self
            .options
            .iter()
            .position(|o| o.eq_ignore_ascii_case(name.trim()))
        {
            Some(index) => {
                self.selected.insert(index);
                true
            }
            None => false,
        }
    }

    pub fn toggle(&mut self, index: usize) {
        if index >= self.options.len() {
            return;
        }
        if !self.selected.remove(&index) {
            self.selected.insert(index);
        }
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }

    pub fn deselect_all(&mut self) {
        self.selected.clear();
    }

    /// Selected option values in list order.
    pub fn selected_values(&self) -> Vec<String> {
        self.selected
            .iter()
            .map(|&i| self.options[i].clone())
            .collect()
    }
}

// ===== Form =====

#[derive(Debug, Clone, PartialEq)]
pub struct JobForm {
    pub title: String,
    pub company: String,
    pub location: String,
    pub remote_option: RemoteOption,
    pub experience_level: ExperienceLevel,
    pub employment_type: EmploymentType,
    pub description: String,
    pub skills: TagList,
    pub requirements: TagList,
    pub responsibilities: TagList,
    pub assessments: AssessmentSelect,
    pub min_assessment_score: Option<f64>,
    pub top_k: u32,
    pub min_experience: Option<f64>,
    pub location_filter: String,
}

impl Default for JobForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            company: String::new(),
            location: String::new(),
            remote_option: RemoteOption::default(),
            experience_level: ExperienceLevel::default(),
            employment_type: EmploymentType::default(),
            description: String::new(),
            skills: TagList::default(),
            requirements: TagList::default(),
            responsibilities: TagList::default(),
            assessments: AssessmentSelect::default(),
            min_assessment_score: None,
            top_k: DEFAULT_TOP_K,
            min_experience: None,
            location_filter: String::new(),
        }
    }
}

impl JobForm {
    pub fn list(&self, kind: TagListKind) -> &TagList {
        match kind {
            TagListKind::Skills => &self.skills,
            TagListKind::Requirements => &self.requirements,
            TagListKind::Responsibilities => &self.responsibilities,
        }
    }

    pub fn list_mut(&mut self, kind: TagListKind) -> &mut TagList {
        match kind {
            TagListKind::Skills => &mut self.skills,
            TagListKind::Requirements => &mut self.requirements,
            TagListKind::Responsibilities => &mut self.responsibilities,
        }
    }

    /// Snapshot the form into a fresh draft with a new id.
    pub fn to_draft(&self) -> JobDraft {
        JobDraft {
            id: new_job_id(),
            title: self.title.clone(),
            company: self.company.clone(),
            location: self.location.clone(),
            remote_option: self.remote_option,
            description: self.description.clone(),
            required_skills: self.skills.values(),
            requirements: self.requirements.values(),
            responsibilities: self.responsibilities.values(),
            required_assessments: self.assessments.selected_values(),
            min_assessment_score: self.min_assessment_score,
            experience_level: self.experience_level,
            employment_type: self.employment_type,
        }
    }

    pub fn match_query(&self) -> MatchQuery {
        let location_filter = self.location_filter.trim();
        MatchQuery {
            top_k: self.top_k,
            min_experience: self.min_experience,
            location_filter: (!location_filter.is_empty()).then(|| location_filter.to_string()),
            min_assessment_score: self.min_assessment_score,
        }
    }

    /// Back to defaults. Tag ids keep counting so stale ids stay dead.
    pub fn reset(&mut self) {
        self.title.clear();
        self.company.clear();
        self.location.clear();
        self.remote_option = RemoteOption::default();
        self.experience_level = ExperienceLevel::default();
        self.employment_type = EmploymentType::default();
        self.description.clear();
        self.min_assessment_score = None;
        self.top_k = DEFAULT_TOP_K;
        self.min_experience = None;
        self.location_filter.clear();

        self.assessments.deselect_all();

        self.skills.clear();
        self.requirements.clear();
        self.responsibilities.clear();
    }

    /// Overlay values from a job file. Lists are appended, scalars replaced
    /// when present.
    pub fn apply_file(&mut self, file: JobFile) -> Result<()> {
        if let Some(title) = file.title {
            self.title = title;
        }
        if let Some(company) = file.company {
            self.company = company;
        }
        if let Some(location) = file.location {
            self.location = location;
        }
        if let Some(description) = file.description {
            self.description = description;
        }
        if let Some(remote_option) = file.remote_option {
            self.remote_option = remote_option;
        }
        if let Some(experience_level) = file.experience_level {
            self.experience_level = experience_level;
        }
        if let Some(employment_type) = file.employment_type {
            self.employment_type = employment_type;
        }

        self.skills.extend(file.required_skills);
        self.requirements.extend(file.requirements);
        self.responsibilities.extend(file.responsibilities);

        for assessment in &file.required_assessments {
            if !self.assessments.select(assessment) {
                anyhow::bail!(
                    "Unknown assessment '{}'. Available: {:?}",
                    assessment,
                    self.assessments.options()
                );
            }
        }

        if file.min_assessment_score.is_some() {
            self.min_assessment_score = file.min_assessment_score;
        }
        if let Some(top_k) = file.top_k {
            self.top_k = top_k;
        }
        if file.min_experience.is_some() {
            self.min_experience = file.min_experience;
        }
        if let Some(location_filter) = file.location_filter {
            self.location_filter = location_filter;
        }

        Ok(())
    }
}

// ===== Job files =====

/// Job description on disk (YAML, TOML or JSON). Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct JobFile {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub remote_option: Option<RemoteOption>,
    pub description: Option<String>,
    pub required_skills: Vec<String>,
    pub requirements: Vec<String>,
    pub responsibilities: Vec<String>,
    pub required_assessments: Vec<String>,
    pub min_assessment_score: Option<f64>,
    pub experience_level: Option<ExperienceLevel>,
    pub employment_type: Option<EmploymentType>,
    pub top_k: Option<u32>,
    pub min_experience: Option<f64>,
    pub location_filter: Option<String>,
}

const JOB_FILE_EXTENSIONS: &[&str] = &["yaml", "yml", "toml", "json"];

impl JobFile {
    pub fn parse(content: &str, extension: &str) -> Result<Self> {
        match extension {
            "yaml" | "yml" => serde_yaml::from_str(content).context("Failed to parse YAML job file"),
            "toml" => toml::from_str(content).context("Failed to parse TOML job file"),
            "json" => serde_json::from_str(content).context("Failed to parse JSON job file"),
            other => anyhow::bail!("Unsupported job file format: {}", other),
        }
    }

    pub async fn load(path: &Path) -> Result<Self> {
        let name = path.to_string_lossy();
        validate_file_extension(&name, JOB_FILE_EXTENSIONS)?;
        let extension = crate::utils::get_file_extension(&name).unwrap_or_default();

        let content = FsOps::read_file_safe(path).await?;
        Self::parse(&content, &extension)
            .with_context(|| format!("Invalid job file: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_with(values: &[&str]) -> TagList {
        let mut list = TagList::default();
        list.extend(values.iter().copied());
        list
    }

    #[test]
    fn test_add_appends_trimmed_and_clears_input() {
        let mut list = list_with(&["Rust"]);
        list.set_input("  Tokio  ");
        let id = list.add();
        assert!(id.is_some());
        assert_eq!(list.values(), vec!["Rust", "Tokio"]);
        assert!(list.input.is_empty());
    }

    #[test]
    fn test_blank_input_appends_nothing() {
        let mut list = list_with(&["Rust"]);
        for blank in ["", "   ", "\t\n"] {
            list.set_input(blank);
            assert_eq!(list.add(), None);
        }
        assert_eq!(list.values(), vec!["Rust"]);
    }

    #[test]
    fn test_enter_matches_add() {
        let mut list = TagList::default();
        list.set_input("SQL");
        assert_eq!(list.key(Key::Other), None);
        assert!(list.key(Key::Enter).is_some());
        assert_eq!(list.values(), vec!["SQL"]);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let list = list_with(&["Go", "Go"]);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_remove_only_touches_one_tag() {
        let mut list = list_with(&["a", "b", "b", "c"]);
        let second_b = list.tags()[2].id;
        assert!(list.remove(second_b));
        assert_eq!(list.values(), vec!["a", "b", "c"]);
        assert!(!list.remove(second_b));
    }

    #[test]
    fn test_ids_survive_clear() {
        let mut list = list_with(&["a"]);
        let stale = list.tags()[0].id;
        list.clear();
        list.extend(["b"]);
        assert!(!list.remove(stale));
        assert_eq!(list.values(), vec!["b"]);
    }

    #[test]
    fn test_assessments_keep_catalog_order() {
        let mut select = AssessmentSelect::default();
        assert!(select.select("devops"));
        assert!(select.select("Frontend Development"));
        assert!(!select.select("Underwater Basket Weaving"));
        assert_eq!(
            select.selected_values(),
            vec!["Frontend Development", "DevOps"]
        );
        select.toggle(0);
        assert_eq!(select.selected_values(), vec!["DevOps"]);
    }

    #[test]
    fn test_draft_reflects_form() {
        let mut form = JobForm {
            title: "Data Engineer".to_string(),
            min_assessment_score: Some(0.7),
            ..JobForm::default()
        };
        form.skills.extend(["Python", "SQL"]);
        form.requirements.extend(["3+ years"]);
        form.assessments.select("Data Science");

        let draft = form.to_draft();
        assert!(draft.id.starts_with("job-"));
        assert_eq!(draft.title, "Data Engineer");
        assert_eq!(draft.required_skills, vec!["Python", "SQL"]);
        assert_eq!(draft.requirements, vec!["3+ years"]);
        assert!(draft.responsibilities.is_empty());
        assert_eq!(draft.required_assessments, vec!["Data Science"]);
        assert_eq!(draft.min_assessment_score, Some(0.7));
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut form = JobForm {
            title: "x".to_string(),
            description: "y".to_string(),
            top_k: 25,
            min_experience: Some(2.0),
            location_filter: "Paris".to_string(),
            remote_option: RemoteOption::Hybrid,
            ..JobForm::default()
        };
        form.skills.extend(["a"]);
        form.responsibilities.extend(["b"]);
        form.assessments.select("DevOps");

        form.reset();

        assert!(form.title.is_empty());
        assert!(form.description.is_empty());
        assert!(form.skills.is_empty());
        assert!(form.requirements.is_empty());
        assert!(form.responsibilities.is_empty());
        assert!(form.assessments.selected_values().is_empty());
        assert_eq!(form.top_k, DEFAULT_TOP_K);
        assert_eq!(form.match_query(), MatchQuery::default());
        assert_eq!(form.remote_option, RemoteOption::NoPreference);
    }

    #[test]
    fn test_yaml_job_file() {
        let yaml = r#"
title: Platform Engineer
company: Acme
remote_option: Remote Only
experience_level: Senior
required_skills: [Kubernetes, Terraform]
required_assessments: [DevOps]
top_k: 5
location_filter: Berlin
"#;
        let file = JobFile::parse(yaml, "yaml").unwrap();
        let mut form = JobForm::default();
        form.apply_file(file).unwrap();

        assert_eq!(form.title, "Platform Engineer");
        assert_eq!(form.remote_option, RemoteOption::RemoteOnly);
        assert_eq!(form.experience_level, ExperienceLevel::Senior);
        assert_eq!(form.skills.values(), vec!["Kubernetes", "Terraform"]);
        assert_eq!(form.match_query().top_k, 5);
        assert_eq!(form.match_query().location_filter.as_deref(), Some("Berlin"));
    }

    #[test]
    fn test_toml_job_file_with_unknown_assessment_fails() {
        let toml = r#"
title = "QA Lead"
required_assessments = ["Telepathy"]
"#;
        let file = JobFile::parse(toml, "toml").unwrap();
        let err = JobForm::default().apply_file(file).unwrap_err();
        assert!(err.to_string().contains("Unknown assessment 'Telepathy'"));
    }

    #[tokio::test]
    async fn test_load_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("job.txt");
        std::fs::write(&path, "title: x").unwrap();
        assert!(JobFile::load(&path).await.is_err());

        let path = dir.path().join("job.yml");
        std::fs::write(&path, "title: Analyst").unwrap();
        let file = JobFile::load(&path).await.unwrap();
        assert_eq!(file.title.as_deref(), Some("Analyst"));
    }
}
