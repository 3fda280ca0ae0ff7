//! Configuration file discovery and parsing
//!
//! Searches for `.config/tissage.yaml` walking up from the current directory.
//! The project root is the parent of `.config/`. Without a config file the
//! current directory is the root and every setting takes its default.

use camino::{Utf8Path, Utf8PathBuf};
use facet::Facet;
use std::env;
use std::sync::OnceLock;
use tracing::debug;

use crate::error::{Result, SiteError};
use crate::pages::{DEFAULT_TITLE, Page, default_pages};

const CONFIG_DIR: &str = ".config";
const CONFIG_FILE: &str = "tissage.yaml";

const DEFAULT_OUTPUT: &str = "output";
const DEFAULT_SCRIPTS: &str = "scripts";

/// tissage configuration from `.config/tissage.yaml`
#[derive(Debug, Clone, Default, Facet)]
#[facet(rename_all = "snake_case")]
pub struct TissageConfig {
    /// Output directory (relative to project root), `output` by default
    #[facet(default)]
    pub output: Option<String>,

    /// Script directory copied to `<output>/scripts`, `scripts` by default
    #[facet(default)]
    pub scripts: Option<String>,

    /// More directories copied into the output as-is
    #[facet(default)]
    pub assets: Option<Vec<String>>,

    /// Site title, also the navbar brand
    #[facet(default)]
    pub title: Option<String>,

    /// Path of the wasm-bindgen JS module, relative to the output
    /// (e.g. `pkg/tissage_applets.js`). Without it pages are static.
    #[facet(default)]
    pub wasm_bundle: Option<String>,

    /// Pages to generate; `index.html` and `about.html` when absent
    #[facet(default)]
    pub pages: Option<Vec<PageConfig>>,
}

#[derive(Debug, Clone, Facet)]
#[facet(rename_all = "snake_case")]
pub struct PageConfig {
    /// HTML file name, relative to the output directory
    pub filename: String,

    /// Content shown first (`home`, `about`, `file-explorer`, `text-editor`)
    pub entry: String,

    #[facet(default)]
    pub title: Option<String>,
}

/// Discovered configuration with resolved paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Project root (parent of .config/)
    pub root: Utf8PathBuf,
    /// Absolute path to the output directory
    pub output_dir: Utf8PathBuf,
    /// Directories to copy into the output, scripts first
    pub asset_dirs: Vec<Utf8PathBuf>,
    pub title: String,
    pub wasm_bundle: Option<String>,
    /// Pages with file names relative to the output directory
    pub pages: Vec<Page>,
}

impl ResolvedConfig {
    /// Discover and load configuration from current directory
    pub fn discover() -> Result<Option<Self>> {
        match find_config_file(&current_dir()?) {
            Some(path) => Ok(Some(load_config(&path)?)),
            None => Ok(None),
        }
    }

    /// Discover and load configuration from a specific project path
    pub fn discover_from(project_path: &Utf8Path) -> Result<Option<Self>> {
        let yaml_file = project_path.join(CONFIG_DIR).join(CONFIG_FILE);
        if yaml_file.exists() {
            Ok(Some(load_config(&yaml_file)?))
        } else {
            Ok(None)
        }
    }

    /// Discovered configuration, or the defaults rooted at the current
    /// directory.
    pub fn discover_or_default() -> Result<Self> {
        match Self::discover()? {
            Some(config) => Ok(config),
            None => {
                let root = current_dir()?;
                debug!(%root, "no {CONFIG_DIR}/{CONFIG_FILE}, using defaults");
                Ok(Self::defaults(root))
            }
        }
    }

    pub fn defaults(root: Utf8PathBuf) -> Self {
        resolve(root, TissageConfig::default())
    }

    /// Parse `yaml` as if it were the config file of project `root`.
    pub fn from_yaml(root: Utf8PathBuf, yaml: &str, path: &Utf8Path) -> Result<Self> {
        let config: TissageConfig = facet_yaml::from_str(yaml).map_err(|e| SiteError::Config {
            path: path.to_owned(),
            message: e.to_string(),
        })?;
        Ok(resolve(root, config))
    }

    /// Point the output somewhere else; relative paths are taken from the
    /// project root.
    pub fn with_output(mut self, output: &Utf8Path) -> Self {
        self.output_dir = self.root.join(output);
        self
    }
}

fn current_dir() -> Result<Utf8PathBuf> {
    let cwd = env::current_dir()?;
    Utf8PathBuf::try_from(cwd)
        .map_err(|e| SiteError::NonUtf8Path(e.as_path().display().to_string()))
}

/// Search for `.config/tissage.yaml` walking up from `start`
fn find_config_file(start: &Utf8Path) -> Option<Utf8PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
        .find(|candidate| candidate.exists())
}

/// Load and resolve configuration from a config file path
pub fn load_config(config_path: &Utf8Path) -> Result<ResolvedConfig> {
    let content = fs_err::read_to_string(config_path)?;

    // Project root is the parent of .config/
    let root = config_path
        .parent()
        .and_then(Utf8Path::parent)
        .ok_or_else(|| SiteError::Config {
            path: config_path.to_owned(),
            message: "config file is not inside a .config directory".to_string(),
        })?
        .to_owned();

    debug!(%config_path, %root, "loading config");
    ResolvedConfig::from_yaml(root, &content, config_path)
}

fn resolve(root: Utf8PathBuf, config: TissageConfig) -> ResolvedConfig {
    let output_dir = root.join(config.output.as_deref().unwrap_or(DEFAULT_OUTPUT));

    let scripts = config.scripts.as_deref().unwrap_or(DEFAULT_SCRIPTS);
    let asset_dirs = std::iter::once(scripts.to_string())
        .chain(config.assets.unwrap_or_default())
        .map(|dir| root.join(dir))
        .collect();

    let title = config.title.unwrap_or_else(|| DEFAULT_TITLE.to_string());

    let pages = match config.pages {
        Some(pages) => pages
            .into_iter()
            .map(|p| Page::new(p.filename, p.entry, p.title.unwrap_or_else(|| title.clone())))
            .collect(),
        None => default_pages(&title),
    };

    ResolvedConfig {
        root,
        output_dir,
        asset_dirs,
        title,
        wasm_bundle: config.wasm_bundle,
        pages,
    }
}

// ============================================================================
// Global config access
// ============================================================================

static RESOLVED_CONFIG: OnceLock<ResolvedConfig> = OnceLock::new();

/// Initialize the global config (call once at startup). Returns the config
/// back if one was already set.
pub fn set_global_config(config: ResolvedConfig) -> std::result::Result<(), ResolvedConfig> {
    RESOLVED_CONFIG.set(config)
}

/// Get the global config (returns None if not initialized)
pub fn global_config() -> Option<&'static ResolvedConfig> {
    RESOLVED_CONFIG.get()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let yaml = r#"
output: public/
title: Lab Notes
"#;

        let config: TissageConfig = facet_yaml::from_str(yaml).unwrap();
        assert_eq!(config.output.as_deref(), Some("public/"));
        assert_eq!(config.title.as_deref(), Some("Lab Notes"));
        assert!(config.pages.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
output: public
scripts: js
assets:
  - images
  - pkg
wasm_bundle: pkg/tissage_applets.js
pages:
  - filename: index.html
    entry: home
    title: Home
  - filename: editor.html
    entry: text-editor
"#;

        let path = Utf8Path::new("tissage.yaml");
        let config = ResolvedConfig::from_yaml("/project".into(), yaml, path).unwrap();
        assert_eq!(config.output_dir, "/project/public");
        assert_eq!(
            config.asset_dirs,
            ["/project/js", "/project/images", "/project/pkg"].map(Utf8PathBuf::from)
        );
        assert_eq!(config.wasm_bundle.as_deref(), Some("pkg/tissage_applets.js"));
        assert_eq!(config.pages.len(), 2);
        assert_eq!(config.pages[0].title, "Home");
        assert_eq!(config.pages[1].entry, "text-editor");
        assert_eq!(config.pages[1].title, DEFAULT_TITLE);
    }

    #[test]
    fn test_defaults() {
        let config = ResolvedConfig::defaults("/p".into());
        assert_eq!(config.output_dir, "/p/output");
        assert_eq!(config.asset_dirs, [Utf8PathBuf::from("/p/scripts")]);
        assert_eq!(config.title, DEFAULT_TITLE);
        assert!(config.wasm_bundle.is_none());
        let names: Vec<_> = config.pages.iter().map(|p| p.filename.as_str()).collect();
        assert_eq!(names, ["index.html", "about.html"]);
    }

    #[test]
    fn test_output_override() {
        let config = ResolvedConfig::defaults("/p".into()).with_output(Utf8Path::new("dist"));
        assert_eq!(config.output_dir, "/p/dist");

        let config = config.with_output(Utf8Path::new("/tmp/site"));
        assert_eq!(config.output_dir, "/tmp/site");
    }

    #[test]
    fn test_bad_yaml_names_the_file() {
        let err = ResolvedConfig::from_yaml("/p".into(), "pages: 12", Utf8Path::new("x.yaml"))
            .unwrap_err();
        assert!(err.to_string().starts_with("failed to parse x.yaml"));
    }

    #[test]
    fn test_find_config_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::try_from(dir.path().to_path_buf()).unwrap();
        fs_err::create_dir_all(root.join(".config")).unwrap();
        fs_err::write(root.join(".config/tissage.yaml"), "title: Found\n").unwrap();
        let nested = root.join("a/b");
        fs_err::create_dir_all(&nested).unwrap();

        let found = find_config_file(&nested).unwrap();
        assert_eq!(found, root.join(".config/tissage.yaml"));

        let config = load_config(&found).unwrap();
        assert_eq!(config.root, root);
        assert_eq!(config.title, "Found");
        assert!(ResolvedConfig::discover_from(&root).unwrap().is_some());
        assert!(ResolvedConfig::discover_from(&nested).unwrap().is_none());
    }
}
