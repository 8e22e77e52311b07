// src/render/export.rs
//! Printable summary of the held result set

use chrono::NaiveDate;

use crate::render::{el, raw, Node};
use crate::types::{JobDraft, MatchResult};

const EXPORT_STYLE: &str = "body { font-family: Arial, sans-serif; }
h1 { color: #4f46e5; }
.candidate { margin-bottom: 20px; padding: 10px; border: 1px solid #e5e7eb; }
.name { font-size: 18px; font-weight: bold; }
.role { color: #6b7280; }
.score { float: right; font-weight: bold; }
.skills { margin-top: 10px; }
.skill { display: inline-block; background-color: #e0e7ff; color: #4f46e5; padding: 3px 8px; margin: 2px; border-radius: 10px; font-size: 12px; }";

const NOT_SPECIFIED: &str = "Not specified";

/// Minimal standalone document handed to the print pipeline.
pub fn export_document(job: Option<&JobDraft>, results: &[MatchResult], date: NaiveDate) -> Node {
    let title = job
        .map(|j| j.title.as_str())
        .filter(|t| !t.trim().is_empty())
        .unwrap_or(NOT_SPECIFIED);
    let company = job
        .map(|j| j.company.as_str())
        .filter(|c| !c.trim().is_empty())
        .unwrap_or(NOT_SPECIFIED);

    let candidates = results.iter().enumerate().map(|(i, candidate)| {
        el("div")
            .class("candidate")
            .child(
                el("div")
                    .child(
                        el("span")
                            .class("name")
                            .text(format!("{}. {}", i + 1, candidate.candidate_name)),
                    )
                    .child(
                        el("span")
                            .class("score")
                            .text(format!("{}%", candidate.display_score())),
                    ),
            )
            .child(el("div").class("role").text(&candidate.current_role))
            .child(el("div").class("meta").text(format!(
                "{} | {} years experience",
                candidate.location, candidate.years_of_experience
            )))
            .child(
                el("div")
                    .class("skills")
                    .child(el("strong").text("Matching Skills: "))
                    .children(
                        candidate
                            .matching_skills
                            .iter()
                            .map(|s| el("span").class("skill").text(s)),
                    ),
            )
    });

    el("html")
        .child(
            el("head")
                .child(el("meta").attr("charset", "utf-8"))
                .child(el("title").text("Candidate Search Results"))
                .child(el("style").child(raw(EXPORT_STYLE))),
        )
        .child(
            el("body")
                .child(el("h1").text("Candidate Search Results"))
                .child(el("p").text(format!("Job Title: {}", title)))
                .child(el("p").text(format!("Company: {}", company)))
                .child(el("p").text(format!("Date: {}", date.format("%Y-%m-%d"))))
                .child(el("hr"))
                .children(candidates),
        )
        .into()
}

pub fn export_html(job: Option<&JobDraft>, results: &[MatchResult], date: NaiveDate) -> String {
    format!(
        "<!DOCTYPE html>{}",
        export_document(job, results, date).to_html()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn result(name: &str, score: f64) -> MatchResult {
        MatchResult {
            candidate_id: name.to_lowercase(),
            candidate_name: name.to_string(),
            headline: String::new(),
            current_role: "Engineer".to_string(),
            similarity_score: 0.0,
            profile_picture: None,
            years_of_experience: 7.0,
            location: "Paris, France".to_string(),
            skills: BTreeMap::new(),
            matching_skills: vec!["Rust".to_string(), "Go".to_string()],
            assessment_bonus: 0.0,
            overall_score: score,
            ranking_factors: BTreeMap::new(),
            github_url: None,
            linkedin_url: None,
            portfolio_url: None,
        }
    }

    #[test]
    fn test_export_lists_candidates_in_order() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        let html = export_html(None, &[result("Ana", 0.91), result("Bo", 0.42)], date);

        assert!(html.starts_with("<!DOCTYPE html><html>"));
        let document = scraper::Html::parse_document(&html);
        let names = scraper::Selector::parse(".candidate .name").unwrap();
        let scores = scraper::Selector::parse(".candidate .score").unwrap();
        let paragraphs = scraper::Selector::parse("body > p").unwrap();

        let names: Vec<String> = document.select(&names).map(|n| n.text().collect()).collect();
        assert_eq!(names, vec!["1. Ana", "2. Bo"]);
        let scores: Vec<String> = document.select(&scores).map(|n| n.text().collect()).collect();
        assert_eq!(scores, vec!["91%", "42%"]);

        let header: Vec<String> = document
            .select(&paragraphs)
            .map(|n| n.text().collect())
            .collect();
        assert_eq!(
            header,
            vec![
                "Job Title: Not specified",
                "Company: Not specified",
                "Date: 2026-03-14"
            ]
        );
    }
}
