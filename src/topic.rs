//! Defines the [`Topic`] record, the CSV reader that loads topics from disk,
//! and [`next_topic`], which picks the topic to publish on this run.

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Alternate spellings of slugs that have curated copy. Keys are trimmed
/// and lower-cased.
const SLUG_ALIASES: &[(&str, &str)] = &[
    ("google-workspace-onboarding-automation", "onboarding"),
    ("google-workspace-offboarding-automation", "offboarding"),
    ("inboxzero", "inbox-zero-classifier"),
    ("inbox_zero_classifier", "inbox-zero-classifier"),
];

/// One row of the topics file. Every column but `slug` may be omitted or
/// left blank.
#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Topic {
    pub slug: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub summary: String,

    #[serde(default)]
    pub cta_text: String,

    /// Pipe-delimited section headings, e.g. `Intro|Tips`.
    #[serde(default)]
    pub sections: String,
}

impl Topic {
    /// The canonical slug, which names the post file. See [`canonical_slug`].
    pub fn canonical_slug(&self) -> String {
        canonical_slug(&self.slug)
    }

    /// The section headings in listed order, trimmed, with blanks dropped.
    pub fn sections(&self) -> Vec<&str> {
        self.sections
            .split('|')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// Trims and lower-cases `slug`, then resolves known aliases. Nothing else
/// is rewritten: the post file is named after exactly this string, and its
/// existence is what marks the topic as published.
pub fn canonical_slug(slug: &str) -> String {
    let s = slug.trim().to_lowercase();
    match SLUG_ALIASES.iter().find(|(alias, _)| *alias == s) {
        Some((_, canonical)) => (*canonical).to_owned(),
        None => s,
    }
}

/// Reads all topics from the CSV file at `path` in file order. The first row
/// must be a header naming the columns.
pub fn read_topics(path: &Path) -> Result<Vec<Topic>> {
    if !path.exists() {
        return Err(Error::NotFound(path.to_owned()));
    }
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_path(path)
        .map_err(|err| Error::Csv {
            path: path.to_owned(),
            err,
        })?;

    let mut topics = Vec::new();
    for result in reader.deserialize() {
        let topic: Topic = result.map_err(|err| Error::Csv {
            path: path.to_owned(),
            err,
        })?;
        topics.push(topic);
    }
    log::debug!("read {} topics from {}", topics.len(), path.display());
    Ok(topics)
}

/// Returns the first topic (in order) whose `<slug>.html` doesn't exist in
/// `blog_directory`, together with that path. Topics with an empty slug are
/// skipped. `None` means everything has already been published.
pub fn next_topic<'a>(topics: &'a [Topic], blog_directory: &Path) -> Option<(&'a Topic, PathBuf)> {
    for topic in topics {
        let slug = topic.canonical_slug();
        if slug.is_empty() {
            log::warn!("skipping topic with empty slug: {:?}", topic.title);
            continue;
        }
        let path = blog_directory.join(format!("{}.html", slug));
        if !path.exists() {
            return Some((topic, path));
        }
        log::debug!("{} already published", path.display());
    }
    None
}

/// The result of reading topics.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error reading the topics file.
#[derive(Debug)]
pub enum Error {
    /// Returned when the topics file doesn't exist.
    NotFound(PathBuf),

    /// Returned when the topics file can't be read or a row is malformed.
    Csv { path: PathBuf, err: csv::Error },
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::NotFound(path) => {
                write!(f, "topics file not found at {}", path.display())
            }
            Error::Csv { path, err } => {
                write!(f, "Reading topics file '{}': {}", path.display(), err)
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::NotFound(_) => None,
            Error::Csv { path: _, err } => Some(err),
        }
    }
}
