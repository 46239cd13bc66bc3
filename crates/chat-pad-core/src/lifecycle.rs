use crate::status::PadStatus;
use crate::view::{ChatId, ViewDetector};

/// The host document as seen by the panel.
///
/// Every method takes `&self`: the browser DOM is shared, interior-mutable
/// state, and test doubles keep their bookkeeping in cells.
pub trait PanelHost {
    /// Presence lookup for the panel container. This is the only mount state.
    fn panel_present(&self) -> bool;

    /// Builds the panel surface and reserves the layout offset on the host body.
    fn mount_panel(&self) -> Result<(), String>;

    /// Removes the panel surface and restores the body's pre-mount offset.
    /// Must tolerate the panel already being gone.
    fn unmount_panel(&self);

    fn watch_mutations(&self) -> Result<(), String>;

    fn unwatch_mutations(&self);

    fn set_status(&self, status: PadStatus);

    /// Current text area content, `None` when the panel is not mounted.
    fn pad_text(&self) -> Option<String>;

    fn set_pad_text(&self, text: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconcile {
    Unchanged,
    Mounted(ChatId),
    ChatChanged(ChatId),
    Unmounted,
}

impl Reconcile {
    /// Whether the caller should start a pad load for the attached chat.
    #[must_use]
    pub fn needs_load(&self) -> Option<&ChatId> {
        match self {
            Self::Mounted(chat_id) | Self::ChatChanged(chat_id) => Some(chat_id),
            Self::Unchanged | Self::Unmounted => None,
        }
    }
}

/// Reconciles panel presence with the host's current view.
#[derive(Debug)]
pub struct PanelController<D> {
    detector: D,
    attached_chat: Option<ChatId>,
}

impl<D: ViewDetector> PanelController<D> {
    pub fn new(detector: D) -> Self {
        Self {
            detector,
            attached_chat: None,
        }
    }

    pub fn detector(&self) -> &D {
        &self.detector
    }

    pub fn attached_chat(&self) -> Option<&ChatId> {
        self.attached_chat.as_ref()
    }

    pub fn reevaluate<H: PanelHost + ?Sized>(&mut self, host: &H) -> Result<Reconcile, String> {
        let active_chat = self.detector.chat_identifier().ok();
        match (active_chat, host.panel_present()) {
            (Some(chat_id), false) => {
                if let Err(error) = host.mount_panel() {
                    host.unmount_panel();
                    return Err(error);
                }
                if let Err(error) = host.watch_mutations() {
                    host.unmount_panel();
                    return Err(error);
                }
                host.set_status(PadStatus::Idle);
                tracing::debug!(chat_id = %chat_id, "pad panel mounted");
                self.attached_chat = Some(chat_id.clone());
                Ok(Reconcile::Mounted(chat_id))
            }
            (Some(chat_id), true) => {
                if self.attached_chat.as_ref() == Some(&chat_id) {
                    return Ok(Reconcile::Unchanged);
                }
                host.set_pad_text("");
                host.set_status(PadStatus::Idle);
                tracing::debug!(chat_id = %chat_id, "pad panel switched chat");
                self.attached_chat = Some(chat_id.clone());
                Ok(Reconcile::ChatChanged(chat_id))
            }
            (None, true) => {
                self.detach(host);
                Ok(Reconcile::Unmounted)
            }
            // Host re-render dropped the panel; still release offset and watcher.
            (None, false) if self.attached_chat.is_some() => {
                self.detach(host);
                Ok(Reconcile::Unmounted)
            }
            (None, false) => Ok(Reconcile::Unchanged),
        }
    }

    fn detach<H: PanelHost + ?Sized>(&mut self, host: &H) {
        host.unwatch_mutations();
        host.unmount_panel();
        if let Some(chat_id) = self.attached_chat.take() {
            tracing::debug!(chat_id = %chat_id, "pad panel unmounted");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use super::*;
    use crate::view::FragmentDetector;

    #[derive(Default)]
    struct FakeHost {
        present: Cell<bool>,
        watching: Cell<bool>,
        fail_mount: Cell<bool>,
        text: RefCell<String>,
        mutations: Cell<u32>,
    }

    impl PanelHost for FakeHost {
        fn panel_present(&self) -> bool {
            self.present.get()
        }

        fn mount_panel(&self) -> Result<(), String> {
            if self.fail_mount.get() {
                return Err("document body is unavailable".to_string());
            }
            self.present.set(true);
            self.mutations.set(self.mutations.get() + 1);
            Ok(())
        }

        fn unmount_panel(&self) {
            self.present.set(false);
            self.mutations.set(self.mutations.get() + 1);
        }

        fn watch_mutations(&self) -> Result<(), String> {
            self.watching.set(true);
            Ok(())
        }

        fn unwatch_mutations(&self) {
            self.watching.set(false);
        }

        fn set_status(&self, _status: PadStatus) {}

        fn pad_text(&self) -> Option<String> {
            self.present.get().then(|| self.text.borrow().clone())
        }

        fn set_pad_text(&self, text: &str) {
            *self.text.borrow_mut() = text.to_string();
        }
    }

    fn controller(fragment: &str) -> PanelController<FragmentDetector<String>> {
        PanelController::new(FragmentDetector::new(fragment.to_string()))
    }

    #[test]
    fn mounts_once_and_starts_watcher() {
        let host = FakeHost::default();
        let mut controller = controller("#chat=abc");
        let outcome = controller.reevaluate(&host);
        assert!(matches!(outcome, Ok(Reconcile::Mounted(_))));
        assert!(host.present.get());
        assert!(host.watching.get());
        assert_eq!(controller.reevaluate(&host), Ok(Reconcile::Unchanged));
        assert_eq!(host.mutations.get(), 1);
    }

    #[test]
    fn non_chat_view_without_panel_is_a_no_op() {
        let host = FakeHost::default();
        let mut controller = controller("#settings");
        assert_eq!(controller.reevaluate(&host), Ok(Reconcile::Unchanged));
        assert_eq!(host.mutations.get(), 0);
    }

    #[test]
    fn failed_mount_leaves_nothing_attached() {
        let host = FakeHost::default();
        host.fail_mount.set(true);
        let mut controller = controller("#chat=abc");
        assert!(controller.reevaluate(&host).is_err());
        assert!(!host.present.get());
        assert!(!host.watching.get());
        assert!(controller.attached_chat().is_none());
    }

    #[test]
    fn needs_load_only_for_mount_and_switch() {
        let chat_id = FragmentDetector::new("#chat=a")
            .chat_identifier()
            .expect("chat id");
        assert!(Reconcile::Mounted(chat_id.clone()).needs_load().is_some());
        assert!(Reconcile::ChatChanged(chat_id).needs_load().is_some());
        assert!(Reconcile::Unchanged.needs_load().is_none());
        assert!(Reconcile::Unmounted.needs_load().is_none());
    }
}
