pub(crate) const PAD_PANEL_ID: &str = "chat-pad-panel";
pub(crate) const PAD_STYLE_ID: &str = "chat-pad-style";
pub(crate) const INJECTED_ELEMENT_IDS: [&str; 2] = [PAD_PANEL_ID, PAD_STYLE_ID];
pub(crate) const PAD_REFRESH_ID: &str = "chat-pad-refresh";
pub(crate) const PAD_SAVE_ID: &str = "chat-pad-save";
pub(crate) const PAD_STATUS_ID: &str = "chat-pad-status";
pub(crate) const PAD_TEXT_ID: &str = "chat-pad-text";
pub(crate) const PAD_TEXT_PLACEHOLDER: &str = "Shared pad\u{2026}";
pub(crate) const PAD_CONFIG_GLOBAL: &str = "__CHAT_PAD_CONFIG__";
pub(crate) const PAD_Z_INDEX: &str = "2147483647";
pub(crate) const PAD_STATUS_COLOR: &str = "#555";
pub(crate) const PAD_STATUS_ERROR_COLOR: &str = "#b91c1c";
