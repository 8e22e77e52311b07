// src/render/mod.rs
//! Typed render tree replacing string-built HTML
//!
//! Every component returns a [`Node`]. Tests query the tree directly; the CLI
//! prints it either as escaped HTML or as plain text.

pub mod cards;
pub mod email;
pub mod export;
pub mod profile;

pub use cards::{
    candidate_card, count_badge, error_panel, no_results_panel, results_section, tag_list,
    upload_status,
};
pub use email::email_overlay;
pub use export::{export_document, export_html};
pub use profile::profile_overlay;

const VOID_TAGS: &[&str] = &["br", "hr", "img", "input", "meta"];
const BLOCK_TAGS: &[&str] = &[
    "article", "div", "h1", "h2", "h3", "h4", "header", "li", "p", "section", "textarea", "tr",
];

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
    /// Trusted static markup (stylesheets, doctype) emitted unescaped.
    Raw(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: &'static str,
    pub attrs: Vec<(&'static str, String)>,
    pub children: Vec<Node>,
}

/// Start an element: `el("div").class("card").child(text("hi"))`.
pub fn el(tag: &'static str) -> Element {
    Element {
        tag,
        attrs: Vec::new(),
        children: Vec::new(),
    }
}

pub fn text(content: impl Into<String>) -> Node {
    Node::Text(content.into())
}

pub fn raw(markup: impl Into<String>) -> Node {
    Node::Raw(markup.into())
}

impl Element {
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        let value = value.into();
        match self.attrs.iter().position(|(n, _)| *n == name) {
            Some(pos) => self.attrs[pos].1 = value,
            None => self.attrs.push((name, value)),
        }
        self
    }

    pub fn id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    pub fn class(self, classes: impl Into<String>) -> Self {
        self.attr("class", classes)
    }

    /// Append `hidden` to the class list when `hidden` is true.
    pub fn hidden_if(self, hidden: bool) -> Self {
        if !hidden {
            return self;
        }
        let classes = match self.get_attr("class") {
            Some(existing) if !existing.is_empty() => format!("{} hidden", existing),
            _ => "hidden".to_string(),
        };
        self.class(classes)
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn children<I, N>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.children.extend(nodes.into_iter().map(Into::into));
        self
    }

    pub fn text(self, content: impl Into<String>) -> Self {
        self.child(Node::Text(content.into()))
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(e) => Some(e),
            _ => None,
        }
    }

    pub fn tag(&self) -> Option<&'static str> {
        self.as_element().map(|e| e.tag)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.as_element().and_then(|e| e.get_attr(name))
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .map(|classes| classes.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Element(e) => &e.children,
            _ => &[],
        }
    }

    /// Depth-first search including `self`.
    pub fn find(&self, pred: &dyn Fn(&Node) -> bool) -> Option<&Node> {
        if pred(self) {
            return Some(self);
        }
        self.children().iter().find_map(|c| c.find(pred))
    }

    pub fn find_all<'a>(&'a self, pred: &dyn Fn(&Node) -> bool) -> Vec<&'a Node> {
        let mut found = Vec::new();
        self.collect(pred, &mut found);
        found
    }

    fn collect<'a>(&'a self, pred: &dyn Fn(&Node) -> bool, out: &mut Vec<&'a Node>) {
        if pred(self) {
            out.push(self);
        }
        for child in self.children() {
            child.collect(pred, out);
        }
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Node> {
        self.find(&|n| n.attr("id") == Some(id))
    }

    pub fn find_all_by_class(&self, class: &str) -> Vec<&Node> {
        self.find_all(&|n| n.has_class(class))
    }

    /// Concatenated text of the subtree, ignoring markup.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.push_text(&mut out);
        out
    }

    fn push_text(&self, out: &mut String) {
        match self {
            Node::Text(t) => out.push_str(t),
            Node::Raw(_) => {}
            Node::Element(e) => e.children.iter().for_each(|c| c.push_text(out)),
        }
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Text(t) => out.push_str(&escape_html(t)),
            Node::Raw(r) => out.push_str(r),
            Node::Element(e) => {
                out.push('<');
                out.push_str(e.tag);
                for (name, value) in &e.attrs {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    out.push_str(&escape_html(value));
                    out.push('"');
                }
                out.push('>');
                if VOID_TAGS.contains(&e.tag) {
                    return;
                }
                for child in &e.children {
                    child.write_html(out);
                }
                out.push_str("</");
                out.push_str(e.tag);
                out.push('>');
            }
        }
    }

    /// Plain-text rendering for terminals: block elements start new lines,
    /// hidden subtrees and inputs without a value are skipped.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        self.write_text(&mut out);
        let lines: Vec<&str> = out
            .lines()
            .map(str::trim_end)
            .filter(|l| !l.trim().is_empty())
            .collect();
        lines.join("\n")
    }

    fn write_text(&self, out: &mut String) {
        match self {
            Node::Text(t) => out.push_str(t),
            Node::Raw(_) => {}
            Node::Element(e) => {
                if self.has_class("hidden") || e.tag == "style" {
                    return;
                }
                let block = BLOCK_TAGS.contains(&e.tag);
                if block {
                    out.push('\n');
                }
                match e.tag {
                    "input" => {
                        if let Some(v) = e.get_attr("value") {
                            out.push_str(v);
                        }
                    }
                    "br" => out.push('\n'),
                    _ => e.children.iter().for_each(|c| {
                        c.write_text(out);
                        if c.tag() == Some("span") {
                            out.push(' ');
                        }
                    }),
                }
                if block {
                    out.push('\n');
                }
            }
        }
    }
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escapes_text_and_attributes() {
        let node: Node = el("p")
            .attr("title", "a \"quoted\" <value>")
            .text("<script>alert('x')</script> & more")
            .into();
        assert_eq!(
            node.to_html(),
            "<p title=\"a &quot;quoted&quot; &lt;value&gt;\">&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt; &amp; more</p>"
        );
    }

    #[test]
    fn test_void_elements_have_no_closing_tag() {
        let node: Node = el("div").child(el("input").attr("value", "x")).into();
        assert_eq!(node.to_html(), "<div><input value=\"x\"></div>");
    }

    #[test]
    fn test_hidden_if_appends_class() {
        let shown: Node = el("div").class("panel").hidden_if(false).into();
        let hidden: Node = el("div").class("panel").hidden_if(true).into();
        let bare: Node = el("div").hidden_if(true).into();
        assert!(!shown.has_class("hidden"));
        assert!(hidden.has_class("hidden") && hidden.has_class("panel"));
        assert_eq!(bare.attr("class"), Some("hidden"));
    }

    #[test]
    fn test_queries() {
        let tree: Node = el("section")
            .child(el("div").id("a").class("card").text("one"))
            .child(el("div").class("card").child(el("span").id("b").text("two")))
            .into();
        assert_eq!(tree.find_all_by_class("card").len(), 2);
        assert_eq!(tree.find_by_id("b").map(|n| n.text_content()), Some("two".into()));
        assert_eq!(tree.text_content(), "onetwo");
        assert!(tree.find_by_id("missing").is_none());
    }

    #[test]
    fn test_plain_text_skips_hidden_and_breaks_blocks() {
        let tree: Node = el("div")
            .child(el("h3").text("Title"))
            .child(el("p").class("hidden").text("secret"))
            .child(el("p").child(el("span").text("a")).child(el("span").text("b")))
            .into();
        assert_eq!(tree.to_text(), "Title\na b");
    }
}
