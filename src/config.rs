//! Site configuration module.
//!
//! Handles loading and validating `config.toml`. Config files are sparse:
//! every field has a documented default and users override just the values
//! they want. Unknown keys are rejected to catch typos early.
//!
//! ```toml
//! [site]
//! title = "Kaodex"
//! base_url = "https://kaodex.example.com"
//! description = "Curated kaomoji, emoji, and symbols — search, copy, create."
//!
//! [colors.light]
//! background = "#f8fafc"
//! text = "#0f172a"
//! accent = "#0891b2"
//!
//! [colors.dark]
//! background = "#0f172a"
//! text = "#e2e8f0"
//! accent = "#22d3ee"
//!
//! [ai]
//! endpoint = "https://api.openai.com"
//! model = "gpt-4o-mini"
//! api_key_env = "OPENAI_API_KEY"
//! timeout_secs = 30
//! ```

use crate::ai::AiConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    pub site: SiteMeta,
    pub colors: ColorConfig,
    pub ai: AiConfig,
}

/// Identity of the generated site: title, canonical URL, meta description.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteMeta {
    pub title: String,
    /// Canonical base URL, used for the sitemap and canonical links.
    pub base_url: String,
    pub description: String,
}

impl Default for SiteMeta {
    fn default() -> Self {
        Self {
            title: "Kaodex".to_string(),
            base_url: "https://kaodex.example.com".to_string(),
            description: "Curated kaomoji, emoji, and symbols — search, copy, create."
                .to_string(),
        }
    }
}

/// Light and dark color schemes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub light: ColorScheme,
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme {
                background: "#f8fafc".to_string(),
                text: "#0f172a".to_string(),
                accent: "#0891b2".to_string(),
            },
            dark: ColorScheme {
                background: "#0f172a".to_string(),
                text: "#e2e8f0".to_string(),
                accent: "#22d3ee".to_string(),
            },
        }
    }
}

/// One scheme. When overriding a scheme in `config.toml`, all three values
/// must be given.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColorScheme {
    pub background: String,
    pub text: String,
    pub accent: String,
}

impl SiteConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.base_url.trim().is_empty() {
            return Err(ConfigError::Validation("site.base_url must not be empty".into()));
        }
        if !self.site.base_url.starts_with("http://") && !self.site.base_url.starts_with("https://")
        {
            return Err(ConfigError::Validation(
                "site.base_url must start with http:// or https://".into(),
            ));
        }
        if self.ai.timeout_secs == 0 {
            return Err(ConfigError::Validation("ai.timeout_secs must be non-zero".into()));
        }
        Ok(())
    }
}

/// Load `config.toml` from `path` when it exists, falling back to defaults.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    let config = if path.exists() {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content)?
    } else {
        SiteConfig::default()
    };
    config.validate()?;
    Ok(config)
}

/// CSS custom properties for both schemes, injected ahead of the static
/// stylesheet.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        ":root {{\n  --background: {};\n  --text: {};\n  --accent: {};\n}}\n\n\
         @media (prefers-color-scheme: dark) {{\n  :root {{\n    --background: {};\n    --text: {};\n    --accent: {};\n  }}\n}}",
        colors.light.background,
        colors.light.text,
        colors.light.accent,
        colors.dark.background,
        colors.dark.text,
        colors.dark.accent,
    )
}

/// A documented stock `config.toml`, printed by `kaodex gen-config`.
pub fn stock_config_toml() -> String {
    let colors = ColorConfig::default();
    let (light, dark) = (&colors.light, &colors.dark);
    let site = SiteMeta::default();
    let ai = AiConfig::default();
    format!(
        r##"# kaodex configuration. All values are optional — these are the defaults.

[site]
title = "{title}"
# Canonical base URL: sitemap and canonical links are absolute against this.
base_url = "{base_url}"
description = "{description}"

[colors.light]
background = "{lb}"
text = "{lt}"
accent = "{la}"

[colors.dark]
background = "{db}"
text = "{dt}"
accent = "{da}"

[ai]
# Any OpenAI-compatible chat-completions endpoint.
endpoint = "{endpoint}"
model = "{model}"
# The API key is read from this environment variable, never from this file.
api_key_env = "{key_env}"
timeout_secs = {timeout}
"##,
        title = site.title,
        base_url = site.base_url,
        description = site.description,
        lb = light.background,
        lt = light.text,
        la = light.accent,
        db = dark.background,
        dt = dark.text,
        da = dark.accent,
        endpoint = ai.endpoint,
        model = ai.model,
        key_env = ai.api_key_env,
        timeout = ai.timeout_secs,
    )
}
