//! Exports the [`publish`] function which stitches together the steps of a
//! run: reading the topics ([`crate::topic`]), picking the next unpublished
//! one, rendering and writing its post page ([`crate::post`]), recording it
//! in the sitemap ([`crate::sitemap`]), and rebuilding the blog index
//! ([`crate::index`]).

use crate::config::Config;
use crate::index::{rebuild_index, Error as IndexError};
use crate::post::PostPage;
use crate::sitemap::{update_sitemap, Error as SitemapError};
use crate::topic::{next_topic, read_topics, Error as TopicError};
use chrono::NaiveDate;
use std::fmt;
use std::path::{Path, PathBuf};

/// What a [`publish`] run did.
#[derive(Debug, PartialEq)]
pub enum Outcome {
    /// A new post was written to `path`.
    Published { slug: String, path: PathBuf },

    /// Every topic already has a post. Nothing was written.
    NothingToPublish,
}

/// Publishes the next unpublished topic, dated `today`. At most one post is
/// written per call, and existing posts are never overwritten. The sitemap
/// and index are only touched when a post was written.
pub fn publish(config: &Config, today: NaiveDate) -> Result<Outcome> {
    create_dir(&config.blog_directory)?;
    if let Some(topics_dir) = config.topics_file.parent() {
        create_dir(topics_dir)?;
    }

    let topics = read_topics(&config.topics_file)?;
    let (topic, path) = match next_topic(&topics, &config.blog_directory) {
        Some(next) => next,
        None => return Ok(Outcome::NothingToPublish),
    };
    let slug = topic.canonical_slug();
    log::info!("publishing topic {:?} as {}", slug, path.display());

    let html = PostPage::new(topic, today, &config.site_name, &config.blog_name)
        .render()
        .map_err(Error::Template)?;
    std::fs::write(&path, html).map_err(|err| Error::Write {
        path: path.clone(),
        err,
    })?;

    let blog_url = config.blog_url()?;
    let post_url = blog_url.join(&format!("{}.html", slug))?;
    update_sitemap(&config.sitemap_file, &config.site_url, &blog_url, &post_url)?;

    rebuild_index(&config.blog_directory, &config.blog_name, &config.site_name)?;

    Ok(Outcome::Published { slug, path })
}

/// The status line printed after a run, e.g. `Generated: blog/foo.html`.
pub fn report(config: &Config, outcome: &Outcome) -> String {
    match outcome {
        Outcome::Published { path, .. } => format!(
            "Generated: {}/{}",
            config.blog_name,
            path.file_name()
                .map(|name| name.to_string_lossy())
                .unwrap_or_else(|| path.to_string_lossy())
        ),
        Outcome::NothingToPublish => format!(
            "No new topics to post — add rows to {}",
            config
                .topics_file
                .strip_prefix(&config.root_directory)
                .unwrap_or(&config.topics_file)
                .display()
        ),
    }
}

fn create_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|err| Error::Write {
        path: dir.to_owned(),
        err,
    })
}

/// The result of a publish run.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for a publish run. Errors can come from reading topics,
/// templating, writing the post, updating the sitemap, or rebuilding the
/// index.
#[derive(Debug)]
pub enum Error {
    /// Returned for errors reading the topics file.
    Topics(TopicError),

    /// Returned for errors applying the post template.
    Template(String),

    /// Returned for I/O problems writing the post or creating directories.
    Write { path: PathBuf, err: std::io::Error },

    /// Returned when the post URL can't be built from the site URL.
    Url(url::ParseError),

    /// Returned for errors updating the sitemap.
    Sitemap(SitemapError),

    /// Returned for errors rebuilding the index.
    Index(IndexError),
}

impl fmt::Display for Error {
    /// Implements [`fmt::Display`] for [`Error`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Topics(err) => err.fmt(f),
            Error::Template(err) => write!(f, "Rendering post: {}", err),
            Error::Write { path, err } => {
                write!(f, "Writing '{}': {}", path.display(), err)
            }
            Error::Url(err) => err.fmt(f),
            Error::Sitemap(err) => err.fmt(f),
            Error::Index(err) => write!(f, "Rebuilding index: {}", err),
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Topics(err) => Some(err),
            Error::Template(_) => None,
            Error::Write { path: _, err } => Some(err),
            Error::Url(err) => Some(err),
            Error::Sitemap(err) => Some(err),
            Error::Index(err) => Some(err),
        }
    }
}

impl From<TopicError> for Error {
    /// Converts [`TopicError`]s into [`Error`]. This allows us to use the `?`
    /// operator.
    fn from(err: TopicError) -> Error {
        Error::Topics(err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Error {
        Error::Url(err)
    }
}

impl From<SitemapError> for Error {
    /// Converts [`SitemapError`]s into [`Error`]. This allows us to use the
    /// `?` operator.
    fn from(err: SitemapError) -> Error {
        Error::Sitemap(err)
    }
}

impl From<IndexError> for Error {
    /// Converts [`IndexError`]s into [`Error`]. This allows us to use the `?`
    /// operator.
    fn from(err: IndexError) -> Error {
        Error::Index(err)
    }
}
