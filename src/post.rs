//! Renders a [`Topic`] into a complete post page. See [`PostPage`].

use crate::copy::section_copy;
use crate::template::{render, POST_TEMPLATE};
use crate::topic::Topic;
use crate::util::{escape_html, title_case, truncate_chars};
use chrono::NaiveDate;
use gtmpl_value::Value;

/// The call to action used when a topic doesn't provide one.
pub const DEFAULT_CTA: &str = "Want ready-to-use scripts and templates?";

/// Search engines truncate descriptions somewhere around here.
const DESCRIPTION_LIMIT: usize = 155;

/// The fields of a post page, ready for templating.
#[derive(Debug, Clone, PartialEq)]
pub struct PostPage {
    pub title: String,

    /// The contents of the description meta tag. Never contains `"`.
    pub description: String,

    /// The human-formatted publish date, e.g. `October 18, 2026`.
    pub date: String,

    /// The assembled HTML body: the summary card, then one heading and
    /// paragraph per section.
    pub body: String,

    pub cta_text: String,
    pub site_name: String,
    pub blog_name: String,
}

impl PostPage {
    pub fn new(topic: &Topic, published: NaiveDate, site_name: &str, blog_name: &str) -> PostPage {
        let slug = topic.canonical_slug();
        let title = match topic.title.trim() {
            "" => title_case(&slug.replace('-', " ")),
            title => title.to_owned(),
        };
        let description = match topic.summary.as_str() {
            "" => truncate_chars(&title, DESCRIPTION_LIMIT),
            summary => truncate_chars(summary, DESCRIPTION_LIMIT),
        }
        .replace('"', "");
        let cta_text = match topic.cta_text.as_str() {
            "" => DEFAULT_CTA.to_owned(),
            cta => cta.to_owned(),
        };

        PostPage {
            body: body(&slug, topic),
            title,
            description,
            date: published.format("%B %d, %Y").to_string(),
            cta_text,
            site_name: site_name.to_owned(),
            blog_name: blog_name.to_owned(),
        }
    }

    /// Applies the post template.
    pub fn render(&self) -> Result<String, String> {
        render(POST_TEMPLATE, Value::from(self))
    }
}

// Section headings are trusted markup and go in unescaped; the summary is
// plain text.
fn body(slug: &str, topic: &Topic) -> String {
    let mut parts: Vec<String> = Vec::new();
    if !topic.summary.is_empty() {
        parts.push(format!(r#"<p class="card">{}</p>"#, escape_html(&topic.summary)));
    }
    for heading in topic.sections() {
        parts.push(format!(
            "<h2>{}</h2>\n<p>{}</p>",
            heading,
            section_copy(slug, heading)
        ));
    }
    parts.join("\n\n")
}
