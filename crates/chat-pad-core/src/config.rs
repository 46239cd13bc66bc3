use serde::{Deserialize, Serialize};

pub const DEFAULT_PAD_API_URL: &str = "http://127.0.0.1:8000/pad";
pub const DEFAULT_PANEL_WIDTH_PX: u32 = 420;
pub const DEFAULT_CHAT_MARKER: &str = "chat";
pub const MIN_PANEL_WIDTH_PX: u32 = 160;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("pad config is not valid JSON: {0}")]
    Malformed(String),
    #[error("api url must not be empty")]
    EmptyApiUrl,
    #[error("api url must use http:// or https:// and include a host")]
    InvalidApiUrl,
    #[error("panel width must be at least 160px")]
    PanelTooNarrow,
    #[error("chat marker must be a non-empty fragment key")]
    InvalidChatMarker,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PadConfig {
    pub api_url: String,
    pub panel_width_px: u32,
    pub chat_marker: String,
    pub debug_logging: bool,
}

impl Default for PadConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_PAD_API_URL.to_string(),
            panel_width_px: DEFAULT_PANEL_WIDTH_PX,
            chat_marker: DEFAULT_CHAT_MARKER.to_string(),
            debug_logging: false,
        }
    }
}

impl PadConfig {
    /// Parses a partial override object; absent fields keep their defaults.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let parsed: Self =
            serde_json::from_str(raw).map_err(|error| ConfigError::Malformed(error.to_string()))?;
        parsed.validated()
    }

    pub fn validated(self) -> Result<Self, ConfigError> {
        let api_url = normalize_api_url(&self.api_url)?;
        if self.panel_width_px < MIN_PANEL_WIDTH_PX {
            return Err(ConfigError::PanelTooNarrow);
        }
        let chat_marker = self.chat_marker.trim().to_string();
        if chat_marker.is_empty() || chat_marker.contains(['=', '&', '#']) {
            return Err(ConfigError::InvalidChatMarker);
        }
        Ok(Self {
            api_url,
            panel_width_px: self.panel_width_px,
            chat_marker,
            debug_logging: self.debug_logging,
        })
    }

    #[must_use]
    pub fn panel_width_css(&self) -> String {
        format!("{}px", self.panel_width_px)
    }
}

pub fn normalize_api_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(ConfigError::EmptyApiUrl);
    }
    let Some((scheme, remainder)) = trimmed.split_once("://") else {
        return Err(ConfigError::InvalidApiUrl);
    };
    if !matches!(scheme, "http" | "https") {
        return Err(ConfigError::InvalidApiUrl);
    }
    if remainder.trim().is_empty() || remainder.starts_with('/') {
        return Err(ConfigError::InvalidApiUrl);
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = PadConfig::default().validated();
        assert_eq!(config, Ok(PadConfig::default()));
    }

    #[test]
    fn partial_override_keeps_defaults() {
        let config = PadConfig::from_json(r#"{"api_url":" https://pads.example.com/pad/ "}"#)
            .expect("valid override");
        assert_eq!(config.api_url, "https://pads.example.com/pad");
        assert_eq!(config.panel_width_px, DEFAULT_PANEL_WIDTH_PX);
        assert_eq!(config.chat_marker, DEFAULT_CHAT_MARKER);
        assert!(!config.debug_logging);
    }

    #[test]
    fn rejects_non_http_api_url() {
        let error = PadConfig::from_json(r#"{"api_url":"ftp://pads.example.com"}"#)
            .expect_err("expected invalid url");
        assert_eq!(error, ConfigError::InvalidApiUrl);
        assert_eq!(normalize_api_url("pads.example.com"), Err(ConfigError::InvalidApiUrl));
        assert_eq!(normalize_api_url("https:///pad"), Err(ConfigError::InvalidApiUrl));
        assert_eq!(normalize_api_url("  "), Err(ConfigError::EmptyApiUrl));
    }

    #[test]
    fn rejects_narrow_panel_and_bad_marker() {
        assert_eq!(
            PadConfig::from_json(r#"{"panel_width_px":20}"#),
            Err(ConfigError::PanelTooNarrow)
        );
        assert_eq!(
            PadConfig::from_json(r#"{"chat_marker":"chat="}"#),
            Err(ConfigError::InvalidChatMarker)
        );
    }

    #[test]
    fn malformed_json_is_reported() {
        let error = PadConfig::from_json("{not json").expect_err("expected malformed");
        assert!(matches!(error, ConfigError::Malformed(_)));
    }

    #[test]
    fn panel_width_renders_as_css_pixels() {
        assert_eq!(PadConfig::default().panel_width_css(), "420px");
    }
}
