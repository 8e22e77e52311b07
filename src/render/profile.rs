// src/render/profile.rs
//! Full candidate profile overlay

use crate::render::cards::profile_links;
use crate::render::{el, Element, Node};
use crate::types::candidate::{percent, Assessment, CandidateProfile};

fn section(title: &str, body: Element) -> Element {
    el("section")
        .class("profile-section")
        .child(el("h3").text(title))
        .child(body)
}

fn empty(message: &str) -> Element {
    el("p").class("empty").text(message)
}

fn pill(label: &str) -> Element {
    el("span").class("pill").text(label)
}

fn bar(class: &str, width_percent: f64) -> Element {
    el("div").class("bar").child(
        el("div")
            .class(class)
            .attr("style", format!("width: {}%", width_percent.clamp(0.0, 100.0))),
    )
}

pub fn profile_overlay(profile: &CandidateProfile) -> Node {
    let header = el("header")
        .class("overlay-header")
        .child(
            el("div")
                .child(el("h2").class("profile-name").text(&profile.name))
                .child(el("p").class("profile-subtitle").text(profile.subtitle())),
        )
        .child(el("button").id("close-profile-modal").text("\u{d7}"));

    let left = el("div")
        .class("profile-left")
        .child(contact(profile))
        .child(section("Skills", skills(profile)))
        .children(profile.languages.as_ref().map(|languages| {
            section(
                "Languages",
                el("div").children(languages.iter().map(|(language, proficiency)| {
                    el("p")
                        .class("language")
                        .text(format!("{} ({})", language, proficiency))
                })),
            )
        }))
        .child(section("Education", education(profile)));

    let right = el("div")
        .class("profile-right")
        .child(section(
            "Summary",
            el("p").class("summary").text(&profile.summary),
        ))
        .child(section("Work Experience", experience(profile)))
        .children(
            profile
                .projects
                .as_ref()
                .map(|_| section("Projects", projects(profile))),
        )
        .children(
            profile
                .hire3x_data
                .as_ref()
                .map(|data| section("Hire3x Assessments", assessments(&data.assessments))),
        );

    let footer = el("footer")
        .class("overlay-footer")
        .child(
            el("button")
                .id("export-profile-pdf")
                .attr("data-candidate-id", &profile.id)
                .text("Export as PDF"),
        )
        .child(
            el("button")
                .id("generate-email-btn")
                .attr("data-candidate-id", &profile.id)
                .text("Generate Email"),
        );

    el("div")
        .id("candidate-profile-modal")
        .class("overlay")
        .child(
            el("div")
                .class("overlay-panel")
                .child(header)
                .child(el("div").class("overlay-body").child(left).child(right))
                .child(footer),
        )
        .into()
}

fn contact(profile: &CandidateProfile) -> Element {
    el("div")
        .class("contact")
        .child(el("h3").text("Contact Information"))
        .child(el("p").class("email").text(&profile.email))
        .children(
            profile
                .phone
                .as_deref()
                .map(|phone| el("p").class("phone").text(phone)),
        )
        .child(el("p").class("location").text(&profile.location))
        .child(el("h4").text("Professional Links"))
        .child(profile_links(
            profile.github_url.as_deref(),
            profile.linkedin_url.as_deref(),
            profile.portfolio_url.as_deref(),
        ))
}

fn skills(profile: &CandidateProfile) -> Element {
    if profile.skills.is_empty() {
        return empty("No skills provided");
    }
    el("div").children(profile.skills.iter().map(|(skill, level)| {
        let pct = percent(*level);
        el("div")
            .class("skill-level")
            .child(el("span").class("skill-name").text(skill))
            .child(el("span").class("skill-percent").text(format!("{}%", pct)))
            .child(bar("bar-fill", pct as f64))
    }))
}

fn education(profile: &CandidateProfile) -> Element {
    if profile.education.is_empty() {
        return empty("No education details provided");
    }
    el("div").children(profile.education.iter().map(|edu| {
        let graduated = edu
            .graduation_year
            .map(|y| y.to_string())
            .unwrap_or_else(|| "N/A".to_string());
        el("div")
            .class("education")
            .child(el("h4").text(format!("{} in {}", edu.degree, edu.field_of_study)))
            .child(el("p").text(&edu.institution))
            .child(el("p").text(format!("Graduated: {}", graduated)))
    }))
}

fn experience(profile: &CandidateProfile) -> Element {
    if profile.experience.is_empty() {
        return empty("No work experience provided");
    }
    el("div").children(profile.experience.iter().map(|exp| {
        let period = match (exp.start_date.as_deref(), exp.end_date.as_deref()) {
            (Some(start), Some(end)) => format!("{} - {}", start, end),
            (Some(start), None) => format!("{} - Present", start),
            (None, _) if exp.current => "Present".to_string(),
            (None, Some(end)) => end.to_string(),
            (None, None) => String::new(),
        };

        el("div")
            .class("experience-entry")
            .child(el("h4").text(&exp.role))
            .child(el("span").class("period").text(period))
            .child(el("p").class("company").text(&exp.company))
            .child(el("p").class("description").text(&exp.description))
            .children(exp.achievements.as_ref().map(|achievements| {
                el("ul")
                    .class("achievements")
                    .children(achievements.iter().map(|a| el("li").text(a)))
            }))
            .children((!exp.skills_used.is_empty()).then(|| {
                el("div")
                    .class("skills-used")
                    .children(exp.skills_used.iter().map(|s| pill(s)))
            }))
    }))
}

fn projects(profile: &CandidateProfile) -> Element {
    let projects = profile.projects.as_deref().unwrap_or_default();
    if projects.is_empty() {
        return empty("No projects provided");
    }
    el("div").children(projects.iter().map(|project| {
        el("div")
            .class("project")
            .child(el("h4").text(&project.name))
            .child(el("p").text(&project.description))
            .child(el("div").children(project.technologies.iter().map(|t| pill(t))))
            .children(project.url.as_deref().map(|url| {
                el("a")
                    .attr("href", url)
                    .attr("target", "_blank")
                    .text("View Project")
            }))
    }))
}

fn assessments(assessments: &[Assessment]) -> Element {
    if assessments.is_empty() {
        return empty("No Hire3x assessments completed");
    }
    el("div").children(assessments.iter().map(|a| {
        el("div")
            .class("assessment")
            .child(el("h4").text(&a.name))
            .child(el("span").class("assessment-score").text(format!("{}", a.score.round())))
            .child(
                el("span")
                    .class("percentile")
                    .text(format!("{}th percentile", a.percentile)),
            )
            .child(
                el("div")
                    .class("completion")
                    .child(el("p").text(format!(
                        "{} min of {} min",
                        a.completion_time, a.allowed_time
                    )))
                    .child(bar("bar-time", a.time_used_percent()))
                    .child(
                        el("p")
                            .class("efficiency")
                            .text(format!("{}% efficiency", a.efficiency_percent())),
                    ),
            )
            .child(
                el("div")
                    .class("accuracy")
                    .child(el("p").text(format!("Accuracy {}%", percent(a.accuracy))))
                    .child(bar("bar-accuracy", a.accuracy * 100.0)),
            )
            .child(
                el("div")
                    .class("confidence")
                    .child(el("p").text(format!("Confidence {}%", percent(a.confidence_score))))
                    .child(bar("bar-confidence", a.confidence_score * 100.0)),
            )
            .child(
                el("div")
                    .class("skills-evaluated")
                    .children(a.skills_evaluated.iter().map(|s| pill(s))),
            )
    }))
}
