//! Tool configuration.
//!
//! Loaded from `print-site.toml`. Config files are sparse — override just
//! the values you want; unknown keys are rejected to catch typos early.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! print_page_title = "Print Site"   # <title> of the generated document
//!
//! add_table_of_contents = true      # Insert a table of contents up front
//! toc_title = "Table of Contents"
//! toc_depth = 3                     # Heading depth numbered/listed (1-6)
//!
//! add_full_urls = false             # Print link targets after link text
//! enumerate_headings = true         # Number headings by nav position
//! enumerate_headings_depth = 6      # Deepest heading level numbered (1-6)
//! enumerate_figures = true          # Number figure captions
//!
//! add_cover_page = false
//! # cover_page_template = "templates/cover.html"   # Tera template override
//!
//! add_print_site_banner = false
//! # print_site_banner_template = "templates/banner.html"
//!
//! exclude = []                      # Glob patterns of source paths to omit
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
    #[error("template file not found: {path}")]
    TemplateNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Print page configuration loaded from `print-site.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PrintConfig {
    /// Document title of the generated print page.
    pub print_page_title: String,
    /// Insert a table of contents before the first page.
    pub add_table_of_contents: bool,
    /// Heading of the table of contents.
    pub toc_title: String,
    /// Heading depth covered by numbering and the table of contents (1-6).
    pub toc_depth: u8,
    /// Print each link's target URL after the link text (print media only).
    pub add_full_urls: bool,
    /// Number headings with their navigation position. Visual only; heading
    /// text is never modified.
    pub enumerate_headings: bool,
    /// Deepest heading level that receives a number (1-6).
    pub enumerate_headings_depth: u8,
    /// Number figure captions across the document.
    pub enumerate_figures: bool,
    /// Prepend a cover page rendered from a template.
    pub add_cover_page: bool,
    /// Tera template for the cover page. Built-in template when unset.
    pub cover_page_template: Option<PathBuf>,
    /// Prepend a banner (hidden in print) explaining what this page is.
    pub add_print_site_banner: bool,
    /// Tera template for the banner. Built-in template when unset.
    pub print_site_banner_template: Option<PathBuf>,
    /// Glob patterns of page source paths to leave out of the print page.
    pub exclude: Vec<String>,
}

impl Default for PrintConfig {
    fn default() -> Self {
        Self {
            print_page_title: "Print Site".to_string(),
            add_table_of_contents: true,
            toc_title: "Table of Contents".to_string(),
            toc_depth: 3,
            add_full_urls: false,
            enumerate_headings: true,
            enumerate_headings_depth: 6,
            enumerate_figures: true,
            add_cover_page: false,
            cover_page_template: None,
            add_print_site_banner: false,
            print_site_banner_template: None,
            exclude: Vec::new(),
        }
    }
}

impl PrintConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=6).contains(&self.toc_depth) {
            return Err(ConfigError::Validation(format!(
                "toc_depth must be between 1 and 6, got {}",
                self.toc_depth
            )));
        }
        if !(1..=6).contains(&self.enumerate_headings_depth) {
            return Err(ConfigError::Validation(format!(
                "enumerate_headings_depth must be between 1 and 6, got {}",
                self.enumerate_headings_depth
            )));
        }
        Ok(())
    }
}

/// Load and validate config from a TOML file.
///
/// A missing file yields the defaults; a present-but-invalid file is an
/// error.
pub fn load_config(path: &Path) -> Result<PrintConfig, ConfigError> {
    if !path.exists() {
        return Ok(PrintConfig::default());
    }
    let content = fs::read_to_string(path)?;
    let config: PrintConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// The stock config file with every option documented, for `gen-config`.
pub const STOCK_CONFIG_TOML: &str = r#"# print-site configuration.
# All options are optional - defaults shown below.

# <title> of the generated document
print_page_title = "Print Site"

# Insert a table of contents before the first page
add_table_of_contents = true
toc_title = "Table of Contents"
# Heading depth numbered and listed (1-6)
toc_depth = 3

# Print each link's target URL after the link text (applies when printing)
add_full_urls = false

# Number headings with their navigation position. Visual only; heading
# text is never modified.
enumerate_headings = true
# Deepest heading level that receives a number (1-6)
enumerate_headings_depth = 6

# Number figure captions across the document
enumerate_figures = true

# Prepend a cover page rendered from a Tera template. Templates receive
# `config` (site_name, site_url) and `page` (title) in context.
add_cover_page = false
# cover_page_template = "templates/cover.html"

# Prepend a banner (hidden when printing) explaining what this page is
add_print_site_banner = false
# print_site_banner_template = "templates/banner.html"

# Glob patterns of page source paths to leave out of the print page,
# e.g. ["drafts/*", "changelog.md"]
exclude = []
"#;
