use std::fmt;

use serde::Serialize;

use crate::config::DEFAULT_CHAT_MARKER;
use crate::error::PadError;

/// Identifier of the conversation currently shown by the host app.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ChatId(String);

impl ChatId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Read access to the host page's navigation state.
pub trait HostLocation {
    /// Current location fragment, with or without the leading `#`.
    fn fragment(&self) -> String;
}

impl HostLocation for String {
    fn fragment(&self) -> String {
        self.clone()
    }
}

impl HostLocation for &str {
    fn fragment(&self) -> String {
        (*self).to_string()
    }
}

pub trait ViewDetector {
    fn chat_identifier(&self) -> Result<ChatId, PadError>;

    fn is_chat_view(&self) -> bool {
        self.chat_identifier().is_ok()
    }
}

/// Detects chat views from the location fragment alone (`#chat=<id>`).
#[derive(Debug, Clone)]
pub struct FragmentDetector<L> {
    location: L,
    marker: String,
}

impl<L: HostLocation> FragmentDetector<L> {
    pub fn new(location: L) -> Self {
        Self::with_marker(location, DEFAULT_CHAT_MARKER)
    }

    pub fn with_marker(location: L, marker: impl Into<String>) -> Self {
        Self {
            location,
            marker: marker.into(),
        }
    }
}

impl<L: HostLocation> ViewDetector for FragmentDetector<L> {
    fn chat_identifier(&self) -> Result<ChatId, PadError> {
        chat_id_from_fragment(&self.location.fragment(), &self.marker)
    }
}

pub fn chat_id_from_fragment(fragment: &str, marker: &str) -> Result<ChatId, PadError> {
    let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
    let raw = fragment
        .split('&')
        .filter_map(|segment| segment.split_once('='))
        .find_map(|(key, value)| (key == marker).then_some(value))
        .ok_or(PadError::IdentifierNotFound)?;

    let decoded = urlencoding::decode(raw).map_err(|_| PadError::IdentifierNotFound)?;
    if decoded.trim().is_empty() {
        return Err(PadError::IdentifierNotFound);
    }
    Ok(ChatId(decoded.into_owned()))
}
