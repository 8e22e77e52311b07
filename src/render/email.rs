// src/render/email.rs
use crate::render::{el, Node};
use crate::view::state::EmailDraft;

/// Email modal with editable fields and the copy/send actions.
pub fn email_overlay(draft: &EmailDraft) -> Node {
    let copy_label = if draft.copied {
        "Copied!"
    } else {
        "Copy to Clipboard"
    };

    el("div")
        .id("email-template-modal")
        .class("overlay")
        .attr("data-candidate-id", &draft.candidate_id)
        .child(
            el("div")
                .class("overlay-panel")
                .child(
                    el("header")
                        .class("overlay-header")
                        .child(el("h2").text("Email Template"))
                        .child(el("button").id("close-email-modal").text("\u{d7}")),
                )
                .child(
                    el("div")
                        .class("overlay-body")
                        .child(el("label").attr("for", "email-to").text("To"))
                        .child(
                            el("input")
                                .id("email-to")
                                .attr("type", "text")
                                .attr("value", &draft.to),
                        )
                        .child(el("label").attr("for", "email-subject").text("Subject"))
                        .child(
                            el("input")
                                .id("email-subject")
                                .attr("type", "text")
                                .attr("value", &draft.subject),
                        )
                        .child(el("label").attr("for", "email-body").text("Body"))
                        .child(
                            el("textarea")
                                .id("email-body")
                                .attr("rows", "10")
                                .text(&draft.body),
                        ),
                )
                .child(
                    el("footer")
                        .class("overlay-footer")
                        .child(el("button").id("copy-email-btn").text(copy_label))
                        .child(
                            el("a")
                                .id("send-email-btn")
                                .attr("href", draft.mailto_url())
                                .text("Send Email"),
                        ),
                ),
        )
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EmailTemplate;

    #[test]
    fn test_fields_are_editable_values() {
        let mut draft = EmailDraft::from_template(
            "c1",
            EmailTemplate {
                to_email: "a@b.c".to_string(),
                subject: "Hello".to_string(),
                body: "Body <text>".to_string(),
            },
        );
        let node = email_overlay(&draft);
        assert_eq!(node.find_by_id("email-to").and_then(|n| n.attr("value")), Some("a@b.c"));
        assert_eq!(
            node.find_by_id("email-body").map(|n| n.text_content()),
            Some("Body <text>".to_string())
        );
        assert_eq!(
            node.find_by_id("send-email-btn").and_then(|n| n.attr("href")),
            Some("mailto:a@b.c?subject=Hello&body=Body%20%3Ctext%3E")
        );
        assert_eq!(
            node.find_by_id("copy-email-btn").map(|n| n.text_content()),
            Some("Copy to Clipboard".to_string())
        );

        draft.copied = true;
        let node = email_overlay(&draft);
        assert_eq!(
            node.find_by_id("copy-email-btn").map(|n| n.text_content()),
            Some("Copied!".to_string())
        );
    }
}
