//! Cover page and banner templates.
//!
//! Both are Tera templates rendered with `config` (site_name, site_url) and
//! `page` (title) in context. Built-in templates are embedded in the binary;
//! a config path overrides them. Template files are read up front so a bad
//! path fails the build before any composition work starts.

use std::fs;

use tera::{Context, Tera};

use crate::config::{ConfigError, PrintConfig};
use crate::site::Site;

const DEFAULT_COVER_PAGE: &str = include_str!("../static/cover_page.html");
const DEFAULT_BANNER: &str = include_str!("../static/banner.html");

/// Template sources, resolved from config. Only the templates the config
/// enables are loaded.
#[derive(Debug, Clone, Default)]
pub struct Templates {
    cover_page: Option<String>,
    banner: Option<String>,
}

impl Templates {
    /// Resolve template sources for the enabled features.
    ///
    /// A configured path that does not exist is an error; an unset path
    /// falls back to the built-in template.
    pub fn load(config: &PrintConfig) -> Result<Self, ConfigError> {
        let mut templates = Self::default();

        if config.add_cover_page {
            templates.cover_page = Some(match &config.cover_page_template {
                Some(path) => {
                    fs::read_to_string(path).map_err(|source| ConfigError::TemplateNotFound {
                        path: path.clone(),
                        source,
                    })?
                }
                None => DEFAULT_COVER_PAGE.to_string(),
            });
        }

        if config.add_print_site_banner {
            templates.banner = Some(match &config.print_site_banner_template {
                Some(path) => {
                    fs::read_to_string(path).map_err(|source| ConfigError::TemplateNotFound {
                        path: path.clone(),
                        source,
                    })?
                }
                None => DEFAULT_BANNER.to_string(),
            });
        }

        Ok(templates)
    }

    /// Render the cover page body, if enabled.
    pub fn render_cover_page(
        &self,
        site: &Site,
        config: &PrintConfig,
    ) -> Result<Option<String>, tera::Error> {
        self.cover_page
            .as_deref()
            .map(|tpl| render(tpl, site, config))
            .transpose()
    }

    /// Render the banner body, if enabled.
    pub fn render_banner(
        &self,
        site: &Site,
        config: &PrintConfig,
    ) -> Result<Option<String>, tera::Error> {
        self.banner
            .as_deref()
            .map(|tpl| render(tpl, site, config))
            .transpose()
    }
}

fn render(template: &str, site: &Site, config: &PrintConfig) -> Result<String, tera::Error> {
    let mut context = Context::new();
    context.insert(
        "config",
        &serde_json::json!({
            "site_name": site.site_name.as_deref().unwrap_or(""),
            "site_url": site.site_url.as_deref().unwrap_or(""),
        }),
    );
    context.insert(
        "page",
        &serde_json::json!({ "title": config.print_page_title }),
    );
    // Templates are trusted config-supplied files that emit HTML; autoescape
    // would mangle URLs in href attributes
    Tera::one_off(template, &context, false)
}
