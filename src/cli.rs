// src/cli.rs
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use crate::app_log;
use crate::core::{ConfigManager, FsOps, MatchingBackend, ServiceClient};
use crate::desktop::CommandDesktop;
use crate::logging::DEFAULT_LOG_PATH;
use crate::render::{self, Node};
use crate::types::{EmploymentType, ExperienceLevel, RemoteOption};
use crate::view::{JobFile, JobForm, JobSearchView, NoticeKind, SearchPhase, UploadFile};

#[derive(Parser)]
#[command(name = "hire3x")]
#[command(about = "Search, inspect and contact candidates on a Hire3x matching backend")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Backend base URL, overrides HIRE3X_API_URL and hire3x.yaml
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    /// Also log to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, default_value = DEFAULT_LOG_PATH, global = true)]
    pub log_file: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Html,
}

#[derive(Subcommand)]
pub enum Command {
    /// Match candidates against a job description
    Search {
        #[command(flatten)]
        job: JobArgs,
        /// Write the printable results document to this path
        #[arg(long)]
        export: Option<PathBuf>,
        /// Send the results document to the print command
        #[arg(long)]
        print: bool,
    },
    /// Show a candidate's full profile
    Profile { candidate_id: String },
    /// Submit the job, then generate an outreach email for a candidate
    Email {
        candidate_id: String,
        #[command(flatten)]
        job: JobArgs,
        /// Copy subject and body to the clipboard
        #[arg(long)]
        copy: bool,
        /// Open the draft in the default mail client
        #[arg(long)]
        send: bool,
    },
    /// Render a candidate profile as PDF on the backend
    ExportPdf {
        candidate_id: String,
        /// Save the PDF here instead of opening it
        #[arg(long)]
        download: Option<PathBuf>,
    },
    /// Upload a candidates file (JSON or CSV)
    Upload { file: PathBuf },
    /// Number of candidates in the backend
    Count,
    /// Backend health check
    Health,
    /// Remove a candidate from the backend
    Delete { candidate_id: String },
}

/// Job description flags. A job file is applied first; flags override
/// its scalars and extend its lists.
#[derive(Args, Debug, Default)]
pub struct JobArgs {
    #[arg(long)]
    pub job_file: Option<PathBuf>,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub company: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long, value_enum)]
    pub remote: Option<RemoteOption>,
    #[arg(long, value_enum)]
    pub level: Option<ExperienceLevel>,
    #[arg(long, value_enum)]
    pub employment: Option<EmploymentType>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long = "skill")]
    pub skills: Vec<String>,
    #[arg(long = "requirement")]
    pub requirements: Vec<String>,
    #[arg(long = "responsibility")]
    pub responsibilities: Vec<String>,
    #[arg(long = "assessment")]
    pub assessments: Vec<String>,
    #[arg(long)]
    pub min_assessment_score: Option<f64>,
    #[arg(long)]
    pub top_k: Option<u32>,
    #[arg(long)]
    pub min_experience: Option<f64>,
    #[arg(long)]
    pub location_filter: Option<String>,
}

impl JobArgs {
    pub async fn apply(&self, form: &mut JobForm) -> Result<()> {
        if let Some(path) = &self.job_file {
            let file = JobFile::load(path).await?;
            form.apply_file(file)
                .with_context(|| format!("Invalid job file: {}", path.display()))?;
        }
        form.apply_file(self.to_job_file())
    }

    /// The flags as a job file overlay.
    pub fn to_job_file(&self) -> JobFile {
        JobFile {
            title: self.title.clone(),
            company: self.company.clone(),
            location: self.location.clone(),
            remote_option: self.remote,
            description: self.description.clone(),
            required_skills: self.skills.clone(),
            requirements: self.requirements.clone(),
            responsibilities: self.responsibilities.clone(),
            required_assessments: self.assessments.clone(),
            min_assessment_score: self.min_assessment_score,
            experience_level: self.level,
            employment_type: self.employment,
            top_k: self.top_k,
            min_experience: self.min_experience,
            location_filter: self.location_filter.clone(),
        }
    }
}

type ConsoleView = JobSearchView<ServiceClient, CommandDesktop>;

fn emit(node: &Node, format: OutputFormat) {
    match format {
        OutputFormat::Text => println!("{}", node.to_text()),
        OutputFormat::Html => println!("{}", node.to_html()),
    }
}

/// Print pending notices; the first alert fails the command.
fn drain_notices(view: &mut ConsoleView) -> Result<()> {
    let mut failure = None;
    for notice in view.state_mut().take_notices() {
        match notice.kind {
            NoticeKind::Notice => eprintln!("{}", notice.message),
            NoticeKind::Alert => {
                eprintln!("Error: {}", notice.message);
                failure.get_or_insert(notice.message);
            }
        }
    }
    match failure {
        Some(message) => anyhow::bail!(message),
        None => Ok(()),
    }
}

fn file_name(path: &Path) -> Result<String> {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .ok_or_else(|| anyhow::anyhow!("Not a file: {}", path.display()))
}

pub async fn handle_command(cli: Cli, config: ConfigManager) -> Result<()> {
    let api_url = cli.api_url.clone().unwrap_or_else(|| config.api_url.clone());
    app_log!(info, "Using matching backend at {}", api_url);

    let client = ServiceClient::new(&api_url, config.connect_timeout())?;
    let desktop = CommandDesktop::from_config(&config);
    let mut view = JobSearchView::new(client, desktop);
    let format = cli.format;

    match cli.command {
        Command::Search { job, export, print } => {
            job.apply(view.form_mut()).await?;
            view.submit().await;
            emit(&view.render_results(), format);

            if let SearchPhase::Failed(message) = &view.state().phase {
                anyhow::bail!("Search failed: {}", message);
            }

            if let Some(path) = export {
                match view.results_document() {
                    Some(document) => {
                        FsOps::write_file_safe(&path, &document).await?;
                        eprintln!("Results exported to {}", path.display());
                    }
                    None => eprintln!("{}", crate::view::NOTHING_TO_EXPORT),
                }
            }
            if print {
                view.export_results();
            }
            drain_notices(&mut view)?;
        }

        Command::Profile { candidate_id } => {
            view.show_profile(&candidate_id).await;
            drain_notices(&mut view)?;
            if let Some(overlay) = view.render_overlay() {
                emit(&overlay, format);
            }
        }

        Command::Email {
            candidate_id,
            job,
            copy,
            send,
        } => {
            job.apply(view.form_mut()).await?;
            view.submit().await;
            view.generate_email(&candidate_id).await;
            if copy {
                view.copy_email();
            }
            if send {
                view.send_email();
            }
            drain_notices(&mut view)?;
            if let Some(overlay) = view.render_overlay() {
                emit(&overlay, format);
            }
        }

        Command::ExportPdf {
            candidate_id,
            download,
        } => match download {
            Some(path) => {
                let export = view.backend().export_pdf(&candidate_id).await?;
                if export.filename.is_none() {
                    anyhow::bail!(crate::view::PDF_FAILED);
                }
                let bytes = view.backend().download_pdf(&candidate_id).await?;
                FsOps::write_bytes(&path, &bytes).await?;
                println!("Saved {}", path.display());
            }
            None => {
                view.export_candidate_pdf(&candidate_id).await;
                drain_notices(&mut view)?;
            }
        },

        Command::Upload { file } => {
            let content = FsOps::read_bytes(&file).await?;
            view.state_mut().upload_file = Some(UploadFile {
                name: file_name(&file)?,
                content,
            });
            view.upload_candidates().await;
            drain_notices(&mut view)?;

            let status = view.state().upload_status.clone();
            emit(&render::upload_status(status.as_ref()), format);
            if status.map(|s| s.is_error()).unwrap_or(false) {
                anyhow::bail!("Upload failed");
            }
            emit(&render::count_badge(view.state().candidate_count), format);
        }

        Command::Count => {
            view.refresh_candidate_count().await;
            emit(&render::count_badge(view.state().candidate_count), format);
        }

        Command::Health => {
            let health = view.backend().health().await?;
            println!(
                "{} ({})",
                health.status,
                health.version.as_deref().unwrap_or("unknown version")
            );
        }

        Command::Delete { candidate_id } => {
            let message = view.backend().delete_candidate(&candidate_id).await?;
            println!("{}", message);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search_flags() {
        let cli = Cli::try_parse_from([
            "hire3x",
            "search",
            "--title",
            "Backend Engineer",
            "--skill",
            "Rust",
            "--skill",
            "Tokio",
            "--remote",
            "remote-only",
            "--top-k",
            "5",
            "--format",
            "html",
        ])
        .unwrap();

        assert_eq!(cli.format, OutputFormat::Html);
        let Command::Search { job, export, print } = cli.command else {
            panic!("expected search");
        };
        assert_eq!(job.skills, vec!["Rust", "Tokio"]);
        assert_eq!(job.remote, Some(RemoteOption::RemoteOnly));
        assert_eq!(job.top_k, Some(5));
        assert!(export.is_none() && !print);
    }

    #[test]
    fn test_flags_fill_form() {
        let args = JobArgs {
            title: Some("Data Engineer".to_string()),
            skills: vec!["SQL".to_string(), "  ".to_string()],
            assessments: vec!["data science".to_string()],
            location_filter: Some("Berlin".to_string()),
            ..Default::default()
        };
        let mut form = JobForm::default();
        form.apply_file(args.to_job_file()).unwrap();

        assert_eq!(form.title, "Data Engineer");
        assert_eq!(form.skills.values(), vec!["SQL"]);
        assert_eq!(form.assessments.selected_values(), vec!["Data Science"]);
        assert_eq!(form.match_query().location_filter.as_deref(), Some("Berlin"));
    }

    #[tokio::test]
    async fn test_unknown_assessment_is_rejected() {
        let args = JobArgs {
            assessments: vec!["Underwater Basket Weaving".to_string()],
            ..Default::default()
        };
        let err = args.apply(&mut JobForm::default()).await.unwrap_err();
        assert!(err.to_string().contains("Unknown assessment"));
    }

    #[test]
    fn test_every_flag_reaches_the_job_file() {
        let args = JobArgs {
            title: Some("SRE".to_string()),
            company: Some("Acme".to_string()),
            location: Some("Remote".to_string()),
            remote: Some(RemoteOption::RemoteOnly),
            level: Some(ExperienceLevel::Senior),
            employment: Some(EmploymentType::Contract),
            description: Some("On call".to_string()),
            skills: vec!["Linux".to_string()],
            requirements: vec!["5 years".to_string()],
            responsibilities: vec!["Incidents".to_string()],
            assessments: vec!["DevOps".to_string()],
            min_assessment_score: Some(70.0),
            top_k: Some(3),
            min_experience: Some(4.5),
            location_filter: Some("EU".to_string()),
            ..Default::default()
        };
        let mut form = JobForm::default();
        form.apply_file(args.to_job_file()).unwrap();

        assert_eq!(form.title, "SRE");
        assert_eq!(form.company, "Acme");
        assert_eq!(form.location, "Remote");
        assert_eq!(form.remote_option, RemoteOption::RemoteOnly);
        assert_eq!(form.experience_level, ExperienceLevel::Senior);
        assert_eq!(form.employment_type, EmploymentType::Contract);
        assert_eq!(form.description, "On call");
        assert_eq!(form.requirements.values(), vec!["5 years"]);
        assert_eq!(form.responsibilities.values(), vec!["Incidents"]);
        assert_eq!(form.assessments.selected_values(), vec!["DevOps"]);

        let query = form.match_query();
        assert_eq!(query.top_k, 3);
        assert_eq!(query.min_experience, Some(4.5));
        assert_eq!(query.location_filter.as_deref(), Some("EU"));
        assert_eq!(form.to_draft().min_assessment_score, Some(70.0));
    }

    #[tokio::test]
    async fn test_job_file_then_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("job.toml");
        std::fs::write(
            &path,
            "title = \"From file\"\ncompany = \"Acme\"\nrequired_skills = [\"Go\"]\n",
        )
        .unwrap();

        let args = JobArgs {
            job_file: Some(path),
            title: Some("From flag".to_string()),
            skills: vec!["Rust".to_string()],
            ..Default::default()
        };
        let mut form = JobForm::default();
        args.apply(&mut form).await.unwrap();

        assert_eq!(form.title, "From flag");
        assert_eq!(form.company, "Acme");
        assert_eq!(form.skills.values(), vec!["Go", "Rust"]);
    }
}
