use serde::Serialize;

/// Advisory status shown next to the pad controls. Nothing gates on it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PadStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    LoadFailed,
    Saving,
    Saved,
    SaveFailed,
}

impl PadStatus {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "",
            Self::Loading => "Loading\u{2026}",
            Self::Loaded => "Loaded",
            Self::LoadFailed => "Load failed",
            Self::Saving => "Saving\u{2026}",
            Self::Saved => "Saved",
            Self::SaveFailed => "Save failed",
        }
    }

    #[must_use]
    pub fn is_failure(self) -> bool {
        matches!(self, Self::LoadFailed | Self::SaveFailed)
    }
}
