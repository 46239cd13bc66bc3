use chat_pad_core::PadStatus;
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub(crate) struct PanelDiagnostics {
    pub(super) phase: String,
    pub(super) api_url: String,
    pub(super) attached_chat_id: Option<String>,
    pub(super) status: PadStatus,
    pub(super) mounts: u32,
    pub(super) unmounts: u32,
    pub(super) chat_switches: u32,
    pub(super) last_reevaluated_at_ms: Option<u64>,
    pub(super) last_error: Option<String>,
}
