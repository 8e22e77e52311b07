// src/render/cards.rs
//! Result cards, result panels and the small form widgets

use crate::render::{el, Element, Node};
use crate::types::candidate::{percent, MatchResult};
use crate::view::form::{TagList, TagListKind};
use crate::view::state::{CountBadge, SearchPhase, UploadStatus, ViewState};

const MAX_CARD_SKILLS: usize = 5;

/// Score colour class: green from 0.8, yellow from 0.6, red below.
pub fn score_color(score: f64) -> &'static str {
    if score >= 0.8 {
        "text-green-600"
    } else if score >= 0.6 {
        "text-yellow-600"
    } else {
        "text-red-600"
    }
}

/// `skill_match` -> `skill match`
pub fn factor_label(name: &str) -> String {
    name.replace('_', " ")
}

// ===== Candidate card =====

pub fn candidate_card(candidate: &MatchResult, index: usize) -> Node {
    let score = candidate.display_score();

    let tooltip = el("span")
        .class("tooltip-text")
        .text(format!("Match score: {}%", score))
        .children(candidate.ranking_factors.iter().flat_map(|(name, weight)| {
            [
                Node::from(el("br")),
                Node::Text(format!("{}: {}%", factor_label(name), percent(*weight))),
            ]
        }));

    let header = el("header")
        .class("card-header")
        .child(
            el("div")
                .child(el("h3").class("candidate-name").text(&candidate.candidate_name))
                .child(el("p").class("candidate-subtitle").text(candidate.subtitle())),
        )
        .child(
            el("div")
                .class("card-score")
                .child(
                    el("span")
                        .class("tooltip")
                        .child(
                            el("span")
                                .class(format!("score {}", score_color(candidate.overall_score)))
                                .text(score.to_string()),
                        )
                        .child(tooltip),
                )
                .child(
                    el("button")
                        .class("view-profile-btn")
                        .attr("data-candidate-id", &candidate.candidate_id)
                        .text("View Profile"),
                ),
        );

    let facts = el("div")
        .class("card-facts")
        .child(el("div").class("current-role").text(&candidate.current_role))
        .child(el("div").class("location").text(&candidate.location))
        .child(
            el("div")
                .class("experience")
                .text(format!("{} years experience", candidate.years_of_experience)),
        )
        .child(
            el("div")
                .class("metrics-badge")
                .child(el("p").text("Hire3x Assessment"))
                .child(
                    el("span")
                        .class("assessment-bonus")
                        .text(format!("+{}% Score Boost", percent(candidate.assessment_bonus))),
                ),
        );

    let top_skills: Vec<&String> = candidate.matching_skills.iter().take(MAX_CARD_SKILLS).collect();
    let skills = if top_skills.is_empty() {
        el("div")
            .class("matching-skills")
            .child(el("span").class("empty").text("No matching skills found"))
    } else {
        el("div")
            .class("matching-skills")
            .children(top_skills.into_iter().map(|s| el("span").class("skill").text(s)))
    };

    el("article")
        .class("candidate-card")
        .attr("data-candidate-id", &candidate.candidate_id)
        .attr("data-rank", (index + 1).to_string())
        .child(header)
        .child(facts)
        .child(el("h4").text("Matching Skills"))
        .child(skills)
        .child(profile_links(
            candidate.github_url.as_deref(),
            candidate.linkedin_url.as_deref(),
            candidate.portfolio_url.as_deref(),
        ))
        .into()
}

/// Outbound profile links; absent ones are not rendered at all.
pub fn profile_links(
    github: Option<&str>,
    linkedin: Option<&str>,
    portfolio: Option<&str>,
) -> Element {
    let links = [
        ("github-link", "GitHub", github),
        ("linkedin-link", "LinkedIn", linkedin),
        ("portfolio-link", "Portfolio", portfolio),
    ];

    el("div").class("profile-links").children(
        links
            .into_iter()
            .filter_map(|(class, label, href)| {
                href.filter(|h| !h.trim().is_empty()).map(|href| {
                    el("a")
                        .class(class)
                        .attr("href", href)
                        .attr("target", "_blank")
                        .text(label)
                })
            }),
    )
}

// ===== Panels =====

pub fn error_panel(message: &str) -> Node {
    el("div")
        .class("error-panel")
        .child(el("h3").text("Error"))
        .child(el("p").class("error-message").text(message))
        .into()
}

pub fn no_results_panel() -> Node {
    el("div")
        .class("no-results-panel")
        .child(el("h3").text("No matching candidates found"))
        .child(el("p").text("Try adjusting the job requirements or relaxing the filters."))
        .into()
}

/// Search results area. Exactly one of loading, results container and
/// no-results panel is visible outside the idle phase.
pub fn results_section(state: &ViewState) -> Node {
    let phase = &state.phase;

    let results = el("div")
        .id("results-container")
        .hidden_if(*phase != SearchPhase::Results)
        .child(
            el("div")
                .class("results-header")
                .child(
                    el("h2")
                        .text("Matching Candidates ")
                        .child(el("span").id("result-count").text(state.results.len().to_string())),
                )
                .child(el("button").id("export-results-btn").text("Export Results")),
        )
        .child(
            el("div").id("candidates-list").children(
                state
                    .results
                    .iter()
                    .enumerate()
                    .map(|(i, candidate)| candidate_card(candidate, i)),
            ),
        );

    let no_results = el("div").id("no-results");
    let no_results = match phase {
        SearchPhase::NoResults => no_results.child(no_results_panel()),
        SearchPhase::Failed(message) => no_results.child(error_panel(message)),
        _ => no_results.hidden_if(true),
    };

    el("section")
        .id("candidates-section")
        .child(
            el("div")
                .id("loading")
                .hidden_if(!phase.is_loading())
                .text("Finding matching candidates..."),
        )
        .child(results)
        .child(no_results)
        .into()
}

// ===== Form widgets =====

pub fn tag_list(list: &TagList, kind: TagListKind) -> Node {
    let (id, item_class) = match kind {
        TagListKind::Skills => ("required-skills-list", "skill-tag"),
        TagListKind::Requirements => ("requirements-list", "list-item"),
        TagListKind::Responsibilities => ("responsibilities-list", "list-item"),
    };

    el("div")
        .id(id)
        .children(list.tags().iter().map(|tag| {
            let tag_id = tag.id.to_string();
            el("div")
                .class(item_class)
                .attr("data-tag-id", tag_id.clone())
                .child(el("span").text(&tag.text))
                .child(
                    el("button")
                        .class("remove-tag")
                        .attr("data-tag-id", tag_id)
                        .text("\u{d7}"),
                )
        }))
        .into()
}

pub fn count_badge(badge: CountBadge) -> Node {
    el("span")
        .id("candidate-count-badge")
        .text(badge.to_string())
        .into()
}

pub fn upload_status(status: Option<&UploadStatus>) -> Node {
    let Some(status) = status else {
        return el("div").id("upload-status").hidden_if(true).into();
    };

    let tone = if status.is_error() {
        "bg-red-50 border-red-400"
    } else {
        "bg-green-50 border-green-400"
    };

    el("div")
        .id("upload-status")
        .class(tone)
        .child(el("p").id("upload-message").text(status.message()))
        .into()
}
