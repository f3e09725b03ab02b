//! Regenerates the blog's `index.html` from the post files on disk. Post
//! titles and snippets are scraped back out of the HTML with loose patterns,
//! so hand-edited or foreign pages are listed too; anything that can't be
//! found falls back to a default instead of failing.

use crate::template::{render, INDEX_TEMPLATE};
use crate::util::title_case;
use chrono::{DateTime, Local};
use gtmpl_value::Value;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::SystemTime;
use walkdir::WalkDir;

const INDEX_FILE: &str = "index.html";
const HTML_EXTENSION: &str = ".html";

/// One post as listed on the index page.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexEntry {
    /// The site-relative link, e.g. `/blog/foo.html`.
    pub url: String,
    pub title: String,
    pub snippet: String,

    /// The modification date, e.g. `Oct 18, 2026`.
    pub date: String,
    pub modified: SystemTime,
}

struct Patterns {
    heading: Regex,
    paragraph: Regex,
    tag: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        heading: Regex::new(r"(?is)<h1[^>]*>(.*?)</h1>").unwrap(),
        paragraph: Regex::new(r"(?is)<p[^>]*>(.*?)</p>").unwrap(),
        tag: Regex::new(r"<[^>]+>").unwrap(),
    })
}

fn first_match(re: &Regex, html: &str) -> Option<String> {
    re.captures(html).map(|caps| {
        patterns()
            .tag
            .replace_all(&caps[1], "")
            .trim()
            .to_owned()
    })
}

/// Extracts the title (the first `<h1>`) and the snippet (the first `<p>`)
/// from a post, with inner tags stripped. Without an `<h1>` the title is
/// derived from `stem`, e.g. `drive-tips` becomes `Drive Tips`.
pub fn scrape(html: &str, stem: &str) -> (String, String) {
    let p = patterns();
    let title = first_match(&p.heading, html).unwrap_or_else(|| title_case(&stem.replace('-', " ")));
    let snippet = first_match(&p.paragraph, html).unwrap_or_default();
    (title, snippet)
}

/// Drops entries whose title matches an earlier one (ignoring case), then
/// orders the rest newest first. The sort is stable, so entries with equal
/// modification times keep their listing order.
pub fn dedupe_and_sort(entries: Vec<IndexEntry>) -> Vec<IndexEntry> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut entries: Vec<IndexEntry> = entries
        .into_iter()
        .filter(|e| {
            let fresh = seen.insert(e.title.to_lowercase());
            if !fresh {
                log::debug!("skipping duplicate title {:?} ({})", e.title, e.url);
            }
            fresh
        })
        .collect();
    entries.sort_by(|a, b| b.modified.cmp(&a.modified));
    entries
}

/// Scans `blog_directory` (not recursively, in file-name order) for post
/// files, excluding the index itself.
pub fn collect_entries(blog_directory: &Path, blog_name: &str) -> Result<Vec<IndexEntry>> {
    let mut entries = Vec::new();
    for result in WalkDir::new(blog_directory)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = result?;
        let file_name = entry.file_name().to_string_lossy().to_string();
        if !entry.file_type().is_file()
            || !file_name.ends_with(HTML_EXTENSION)
            || file_name.eq_ignore_ascii_case(INDEX_FILE)
        {
            continue;
        }

        let annotate = |err: std::io::Error| Error::Io {
            path: entry.path().to_owned(),
            err,
        };
        let bytes = std::fs::read(entry.path()).map_err(annotate)?;
        let modified = entry.metadata()?.modified().map_err(annotate)?;

        let (title, snippet) = scrape(
            &String::from_utf8_lossy(&bytes),
            file_name.trim_end_matches(HTML_EXTENSION),
        );
        entries.push(IndexEntry {
            url: format!("/{}/{}", blog_name, file_name),
            title,
            snippet,
            date: DateTime::<Local>::from(modified).format("%b %d, %Y").to_string(),
            modified,
        });
    }
    Ok(dedupe_and_sort(entries))
}

/// Renders the index page for `entries`.
pub fn render_index(entries: &[IndexEntry], site_name: &str) -> Result<String> {
    let mut m: HashMap<String, Value> = HashMap::new();
    m.insert("site_name".to_owned(), Value::String(site_name.to_owned()));
    m.insert(
        "posts".to_owned(),
        Value::Array(entries.iter().map(Value::from).collect()),
    );
    Ok(render(INDEX_TEMPLATE, Value::Object(m))?)
}

/// Rebuilds `{blog_directory}/index.html` from scratch. Returns the number of
/// posts listed.
pub fn rebuild_index(blog_directory: &Path, blog_name: &str, site_name: &str) -> Result<usize> {
    let entries = collect_entries(blog_directory, blog_name)?;
    let html = render_index(&entries, site_name)?;
    let path = blog_directory.join(INDEX_FILE);
    std::fs::write(&path, html).map_err(|err| Error::Io {
        path: path.clone(),
        err,
    })?;
    log::info!("wrote {} with {} posts", path.display(), entries.len());
    Ok(entries.len())
}

/// The result of an index operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error rebuilding the index page.
#[derive(Debug)]
pub enum Error {
    /// Returned for I/O problems with a specific file.
    Io { path: PathBuf, err: std::io::Error },

    /// Returned for errors listing the blog directory.
    WalkDir(walkdir::Error),

    /// Returned for errors applying the index template.
    Template(String),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io { path, err } => write!(f, "'{}': {}", path.display(), err),
            Error::WalkDir(err) => err.fmt(f),
            Error::Template(err) => write!(f, "Rendering index: {}", err),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io { path: _, err } => Some(err),
            Error::WalkDir(err) => Some(err),
            Error::Template(_) => None,
        }
    }
}

impl From<walkdir::Error> for Error {
    /// Converts a [`walkdir::Error`] into an [`Error`]. It allows us to
    /// use the `?` operator while listing directories.
    fn from(err: walkdir::Error) -> Error {
        Error::WalkDir(err)
    }
}

impl From<String> for Error {
    /// Converts a template error message into an [`Error`].
    fn from(err: String) -> Error {
        Error::Template(err)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::fs::{self, File};
    use std::time::Duration;

    fn write_post(dir: &Path, name: &str, html: &str, age_secs: u64) -> std::io::Result<()> {
        let path = dir.join(name);
        fs::write(&path, html)?;
        let mtime = SystemTime::now() - Duration::from_secs(age_secs);
        File::options().write(true).open(&path)?.set_modified(mtime)
    }

    fn entry(title: &str, age_secs: u64) -> IndexEntry {
        IndexEntry {
            url: format!("/blog/{}.html", title),
            title: title.to_owned(),
            snippet: String::new(),
            date: String::new(),
            modified: SystemTime::UNIX_EPOCH + Duration::from_secs(1_000_000 - age_secs),
        }
    }

    #[test]
    fn test_scrape() {
        let html = "<html><body>\n<H1 class=\"big\">Foo <em>Guide</em>\n</H1>\n\
                    <p class=\"muted\">First <b>para</b></p><p>Second</p></body></html>";
        assert_eq!(
            ("Foo Guide".to_owned(), "First para".to_owned()),
            scrape(html, "foo")
        );
    }

    #[test]
    fn test_scrape_fallbacks() {
        assert_eq!(
            ("Drive Transfer Tips".to_owned(), String::new()),
            scrape("<div>no structure here</div>", "drive-transfer-tips")
        );
    }

    #[test]
    fn test_dedupe_keeps_first_occurrence() {
        let mut dupe = entry("FOO", 0);
        dupe.url = "/blog/dupe.html".to_owned();
        let entries = dedupe_and_sort(vec![entry("foo", 50), dupe, entry("bar", 10)]);
        let urls: Vec<&str> = entries.iter().map(|e| e.url.as_str()).collect();
        assert_eq!(vec!["/blog/bar.html", "/blog/foo.html"], urls);
    }

    #[test]
    fn test_sort_newest_first() {
        let entries = dedupe_and_sort(vec![entry("a", 30), entry("b", 10), entry("c", 20)]);
        let titles: Vec<&str> = entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(vec!["b", "c", "a"], titles);
    }

    #[test]
    fn test_rebuild_index() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        write_post(dir.path(), "old.html", "<h1>Old Post</h1><p>Old snippet</p>", 300)?;
        write_post(dir.path(), "new.html", "<h1>New &amp; Shiny</h1><p>New snippet</p>", 100)?;
        write_post(dir.path(), "copy.html", "<h1>old post</h1><p>Copy</p>", 10)?;
        write_post(dir.path(), "bare.html", "nothing to see", 200)?;
        write_post(dir.path(), "notes.txt", "<h1>Not a post</h1>", 0)?;
        write_post(dir.path(), "index.html", "<h1>Stale index</h1>", 0)?;

        assert_eq!(3, rebuild_index(dir.path(), "blog", "GWS Automate")?);
        let html = fs::read_to_string(dir.path().join("index.html"))?;

        assert!(html.contains("<h1>GWS Automate Blog</h1>"));
        assert!(!html.contains("Stale index"));
        assert!(!html.contains("Not a post"));
        // `copy.html` sorts before `old.html`, so its title wins
        assert!(html.contains(r#"<a href="/blog/copy.html">old post</a>"#));
        assert!(!html.contains("/blog/old.html"));
        assert!(html.contains(r#"<a href="/blog/new.html">New &amp;amp; Shiny</a>"#));

        let copy = html.find("/blog/copy.html").unwrap();
        let new = html.find("/blog/new.html").unwrap();
        let bare = html.find("/blog/bare.html").unwrap();
        assert!(copy < new && new < bare);
        assert!(html.contains(r#"<a href="/blog/bare.html">Bare</a>"#));
        Ok(())
    }

    #[test]
    fn test_snippet_truncated() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let mut e = entry("long", 0);
        e.snippet = "y".repeat(200);
        e.date = "Oct 18, 2026".to_owned();
        let html = render_index(&[e], "GWS Automate")?;
        assert!(html.contains(&format!("Oct 18, 2026 — {}</div>", "y".repeat(140))));
        assert!(!html.contains(&"y".repeat(141)));
        Ok(())
    }
}
