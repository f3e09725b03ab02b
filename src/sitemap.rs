//! Maintains the site's `sitemap.xml`. The document is treated as text: an
//! entry is added by splicing a `<url>` line in front of `</urlset>`, and a
//! URL counts as present if it occurs anywhere in the file.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

const CLOSING_TAG: &str = "</urlset>";

/// The sitemap written when none exists yet: the home page and the blog
/// index.
fn boilerplate(site_url: &Url, blog_url: &Url) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url><loc>{}</loc><priority>1.0</priority></url>
  <url><loc>{}</loc><priority>0.6</priority></url>
</urlset>"#,
        site_url, blog_url
    )
}

/// Adds `url` to the sitemap text `xml`. Returns `None` if the sitemap
/// already mentions `url` or has no `</urlset>` to insert before.
pub fn insert_url(xml: &str, url: &Url) -> Option<String> {
    if xml.contains(url.as_str()) || !xml.contains(CLOSING_TAG) {
        return None;
    }
    Some(xml.replacen(
        CLOSING_TAG,
        &format!(
            "  <url><loc>{}</loc><priority>0.8</priority></url>\n{}",
            url, CLOSING_TAG
        ),
        1,
    ))
}

/// Records the post at `post_url` in the sitemap at `path`, creating the
/// sitemap first if needed. Returns whether the file changed.
pub fn update_sitemap(path: &Path, site_url: &Url, blog_url: &Url, post_url: &Url) -> Result<bool> {
    let annotate = |err: std::io::Error| Error {
        path: path.to_owned(),
        err,
    };

    if !path.exists() {
        log::info!("creating {}", path.display());
        fs::write(path, boilerplate(site_url, blog_url)).map_err(annotate)?;
    }

    let xml = fs::read_to_string(path).map_err(annotate)?;
    match insert_url(&xml, post_url) {
        None if !xml.contains(CLOSING_TAG) => {
            log::warn!("{} has no `{}`, not adding {}", path.display(), CLOSING_TAG, post_url);
            Ok(false)
        }
        None => {
            log::debug!("{} already lists {}", path.display(), post_url);
            Ok(false)
        }
        Some(updated) => {
            fs::write(path, updated).map_err(annotate)?;
            log::info!("added {} to {}", post_url, path.display());
            Ok(true)
        }
    }
}

/// The result of a sitemap update.
pub type Result<T> = std::result::Result<T, Error>;

/// Returned for I/O problems reading or writing the sitemap.
#[derive(Debug)]
pub struct Error {
    path: PathBuf,
    err: std::io::Error,
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Updating sitemap '{}': {}", self.path.display(), self.err)
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.err)
    }
}
