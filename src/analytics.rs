//! Injects the Google Analytics (gtag.js) snippet into the site's pages.

use regex::Regex;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use walkdir::WalkDir;

const GTAG_SCRIPT_URL: &str = "googletagmanager.com/gtag/js?id=";

/// The gtag.js loader for the measurement id `id`.
pub fn snippet(id: &str) -> String {
    format!(
        r#"<!-- Google tag (gtag.js) -->
<script async src="https://www.{}{}"></script>
<script>
  window.dataLayer = window.dataLayer || [];
  function gtag(){{dataLayer.push(arguments);}}
  gtag('js', new Date());
  gtag('config', '{}');
</script>"#,
        GTAG_SCRIPT_URL, id, id
    )
}

/// Whether `html` already loads gtag.js, for `id` or any other property.
pub fn has_analytics(html: &str, id: &str) -> bool {
    html.contains(id) || html.contains(GTAG_SCRIPT_URL)
}

/// Inserts the snippet for `id` before the first `</head>` (matched without
/// regard to case). Returns `None` when the page has no head or already
/// carries analytics.
pub fn inject(html: &str, id: &str) -> Option<String> {
    if has_analytics(html, id) {
        return None;
    }
    static CLOSING_HEAD: OnceLock<Regex> = OnceLock::new();
    let head = CLOSING_HEAD.get_or_init(|| Regex::new("(?i)</head>").unwrap());
    let at = head.find(html)?.start();
    Some(format!("{}{}\n{}", &html[..at], snippet(id), &html[at..]))
}

/// Every `*.html` directly inside `directories`, in file-name order. Missing
/// directories are skipped.
fn html_files(directories: &[&Path]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for dir in directories.iter().filter(|d| d.is_dir()) {
        for result in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = result?;
            if entry.file_type().is_file() && entry.file_name().to_string_lossy().ends_with(".html") {
                files.push(entry.into_path());
            }
        }
    }
    Ok(files)
}

/// Injects analytics into the HTML files of `root_directory` and
/// `blog_directory`. Returns the paths of the files that changed.
pub fn inject_all(root_directory: &Path, blog_directory: &Path, id: &str) -> Result<Vec<PathBuf>> {
    let mut changed = Vec::new();
    for path in html_files(&[root_directory, blog_directory])? {
        let annotate = |err: std::io::Error| Error::Io {
            path: path.clone(),
            err,
        };
        let bytes = std::fs::read(&path).map_err(annotate)?;
        let html = String::from_utf8_lossy(&bytes);
        match inject(&html, id) {
            None => log::debug!("leaving {} untouched", path.display()),
            Some(updated) => {
                std::fs::write(&path, updated).map_err(annotate)?;
                changed.push(path);
            }
        }
    }
    Ok(changed)
}

/// The result of an analytics operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error injecting analytics.
#[derive(Debug)]
pub enum Error {
    /// Returned for I/O problems with a specific file.
    Io { path: PathBuf, err: std::io::Error },

    /// Returned for errors listing a directory.
    WalkDir(walkdir::Error),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io { path, err } => write!(f, "'{}': {}", path.display(), err),
            Error::WalkDir(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io { path: _, err } => Some(err),
            Error::WalkDir(err) => Some(err),
        }
    }
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Error {
        Error::WalkDir(err)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::fs;

    const ID: &str = "G-TEST123";

    #[test]
    fn test_inject_before_head() {
        let html = "<html><HEAD><title>x</title></HEAD><body></body></html>";
        let updated = inject(html, ID).unwrap();
        assert!(updated.starts_with("<html><HEAD><title>x</title><!-- Google tag (gtag.js) -->\n"));
        assert!(updated.contains("gtag('config', 'G-TEST123');\n</script>\n</HEAD><body>"));
        assert!(updated.contains("https://www.googletagmanager.com/gtag/js?id=G-TEST123"));
    }

    #[test]
    fn test_inject_only_first_head() {
        let updated = inject("<head></head><pre></head></pre>", ID).unwrap();
        assert_eq!(1, updated.matches("<!-- Google tag").count());
        assert!(updated.ends_with("</head><pre></head></pre>"));
    }

    #[test]
    fn test_inject_skips() {
        assert_eq!(None, inject("<p>no head</p>", ID));
        assert_eq!(None, inject("<head><!-- G-TEST123 --></head>", ID));
        assert_eq!(
            None,
            inject(
                r#"<head><script src="https://www.googletagmanager.com/gtag/js?id=G-OTHER"></script></head>"#,
                ID
            )
        );
    }

    #[test]
    fn test_inject_all() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let blog = dir.path().join("blog");
        fs::create_dir(&blog)?;
        fs::write(dir.path().join("index.html"), "<head></head>")?;
        fs::write(dir.path().join("fragment.html"), "<div></div>")?;
        fs::write(blog.join("foo.html"), "<head></head>")?;
        fs::create_dir(blog.join("drafts"))?;
        fs::write(blog.join("drafts").join("bar.html"), "<head></head>")?;

        let changed = inject_all(dir.path(), &blog, ID)?;
        assert_eq!(vec![dir.path().join("index.html"), blog.join("foo.html")], changed);
        assert!(fs::read_to_string(blog.join("foo.html"))?.contains(ID));
        assert_eq!("<div></div>", fs::read_to_string(dir.path().join("fragment.html"))?);

        assert!(inject_all(dir.path(), &blog, ID)?.is_empty());
        Ok(())
    }
}
