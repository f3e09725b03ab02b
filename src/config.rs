use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use url::Url;

const PROJECT_FILE: &str = "dripfeed.yaml";

#[derive(Deserialize)]
struct SiteUrl(Url);
impl Default for SiteUrl {
    fn default() -> Self {
        // constant, always parses
        SiteUrl(Url::parse("https://gwsautomate.com").unwrap())
    }
}

#[derive(Deserialize, Default)]
struct Project {
    #[serde(default)]
    site_url: SiteUrl,
    #[serde(default)]
    site_name: Option<String>,
    #[serde(default)]
    blog_directory: Option<String>,
    #[serde(default)]
    topics_file: Option<PathBuf>,
    #[serde(default)]
    sitemap_file: Option<PathBuf>,
    #[serde(default)]
    analytics_id: Option<String>,
}

pub struct Config {
    /// The project root. Root-level pages and the sitemap live here.
    pub root_directory: PathBuf,
    pub site_url: Url,
    pub site_name: String,
    /// The name of the blog directory, used both on disk and in URLs.
    pub blog_name: String,
    pub blog_directory: PathBuf,
    pub topics_file: PathBuf,
    pub sitemap_file: PathBuf,
    pub analytics_id: Option<String>,
}

impl Config {
    /// Searches `dir` and its ancestors for `dripfeed.yaml`. Unlike a missing
    /// topics file, a missing project file is fine: every setting has a
    /// default and the project root is then `dir` itself.
    pub fn from_directory(dir: &Path) -> Result<Config> {
        let mut current = Some(dir);
        while let Some(d) = current {
            let path = d.join(PROJECT_FILE);
            if path.exists() {
                return match Config::from_project_file(&path) {
                    Ok(config) => Ok(config),
                    Err(e) => Err(anyhow!("Loading configuration: {:?}", e)),
                };
            }
            current = d.parent();
        }
        log::debug!("no `{}` found above {}, using defaults", PROJECT_FILE, dir.display());
        Ok(Config::from_project(Project::default(), dir))
    }

    pub fn from_project_file(path: &Path) -> Result<Config> {
        use crate::util::open;
        let project: Project = serde_yaml::from_reader(open(path, "project")?)?;
        match path.parent() {
            None => Err(anyhow!(
                "Can't get parent directory for provided project file path '{:?}'",
                path
            )),
            Some(project_root) => {
                log::debug!("loaded project file {}", path.display());
                Ok(Config::from_project(project, project_root))
            }
        }
    }

    /// Builds a [`Config`] with the fixed defaults rooted at `root`.
    pub fn with_defaults(root: &Path) -> Config {
        Config::from_project(Project::default(), root)
    }

    fn from_project(project: Project, root: &Path) -> Config {
        let blog_name = project.blog_directory.unwrap_or_else(|| "blog".to_owned());
        Config {
            root_directory: root.to_owned(),
            site_url: project.site_url.0,
            site_name: project
                .site_name
                .unwrap_or_else(|| "GWS Automate".to_owned()),
            blog_directory: root.join(&blog_name),
            topics_file: root.join(
                project
                    .topics_file
                    .unwrap_or_else(|| PathBuf::from("content/topics.csv")),
            ),
            sitemap_file: root.join(
                project
                    .sitemap_file
                    .unwrap_or_else(|| PathBuf::from("sitemap.xml")),
            ),
            blog_name,
            analytics_id: project.analytics_id,
        }
    }

    /// The URL of the blog directory, e.g. `https://gwsautomate.com/blog/`.
    pub fn blog_url(&self) -> std::result::Result<Url, url::ParseError> {
        // the trailing slash keeps `Url::join` from treating the blog
        // directory as a file name
        self.site_url.join(&format!("{}/", self.blog_name))
    }
}
