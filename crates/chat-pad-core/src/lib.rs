//! Host-independent core of the chat pad panel.
//!
//! The browser binding lives in `apps/chat-pad/web-shell`; everything here is
//! driven through the [`view::HostLocation`], [`lifecycle::PanelHost`] and
//! [`pad::PadTransport`] seams so it can run natively under test.

pub mod config;
pub mod error;
pub mod lifecycle;
pub mod pad;
pub mod shortcut;
pub mod status;
pub mod view;

pub use config::{ConfigError, PadConfig};
pub use error::PadError;
pub use lifecycle::{PanelController, PanelHost, Reconcile};
pub use pad::{
    PadClient, PadOutcome, PadReply, PadRequest, PadTransport, load_pad, save_pad,
};
pub use shortcut::{KeyChord, ShortcutPlatform, is_save_shortcut};
pub use status::PadStatus;
pub use view::{ChatId, FragmentDetector, HostLocation, ViewDetector};
