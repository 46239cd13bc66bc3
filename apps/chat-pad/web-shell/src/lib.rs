#[cfg(any(target_arch = "wasm32", test))]
mod body_offset;
#[cfg(target_arch = "wasm32")]
mod wasm_constants;
#[cfg(target_arch = "wasm32")]
mod wasm_state;

#[cfg(target_arch = "wasm32")]
mod wasm {
    use std::cell::RefCell;

    use chat_pad_core::{
        FragmentDetector, HostLocation, KeyChord, PadClient, PadConfig, PadError, PadOutcome,
        PadReply, PadRequest, PadStatus, PadTransport, PanelController, PanelHost, Reconcile,
        ShortcutPlatform, is_save_shortcut, load_pad, save_pad,
    };
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::spawn_local;
    use web_sys::{HtmlElement, HtmlTextAreaElement, MutationObserver, MutationObserverInit};

    use crate::body_offset::{BodyOffset, MarginRestore};
    use crate::wasm_constants::*;
    use crate::wasm_state::PanelDiagnostics;

    mod dom;
    mod lifecycle;
    mod logging;
    mod network;
    mod routing;

    use dom::*;
    use lifecycle::*;
    use logging::install_console_tracing;
    use network::GlooPadTransport;
    use routing::*;

    type BrowserController = PanelController<FragmentDetector<BrowserLocation>>;

    thread_local! {
        static CONFIG: RefCell<PadConfig> = RefCell::new(PadConfig::default());
        static CONTROLLER: RefCell<Option<BrowserController>> = const { RefCell::new(None) };
        static DIAGNOSTICS: RefCell<PanelDiagnostics> = RefCell::new(PanelDiagnostics::default());
        static MUTATION_WATCHER: RefCell<MutationWatcher> = RefCell::new(MutationWatcher::default());
        static BODY_OFFSET: RefCell<BodyOffset> = RefCell::new(BodyOffset::default());
        static REFRESH_CLICK_HANDLER: RefCell<Option<Closure<dyn FnMut(web_sys::Event)>>> = const { RefCell::new(None) };
        static SAVE_CLICK_HANDLER: RefCell<Option<Closure<dyn FnMut(web_sys::Event)>>> = const { RefCell::new(None) };
        static SAVE_SHORTCUT_HANDLER: RefCell<Option<Closure<dyn FnMut(web_sys::KeyboardEvent)>>> = const { RefCell::new(None) };
        static HASHCHANGE_HANDLER: RefCell<Option<Closure<dyn FnMut(web_sys::Event)>>> = const { RefCell::new(None) };
        static POPSTATE_HANDLER: RefCell<Option<Closure<dyn FnMut(web_sys::Event)>>> = const { RefCell::new(None) };
        static DOM_READY_HANDLER: RefCell<Option<Closure<dyn FnMut(web_sys::Event)>>> = const { RefCell::new(None) };
    }

    /// The real host document. All state lives in the DOM and the thread-locals above.
    #[derive(Debug, Clone, Copy, Default)]
    struct DomPanelHost;

    impl PanelHost for DomPanelHost {
        fn panel_present(&self) -> bool {
            pad_panel_present()
        }

        fn mount_panel(&self) -> Result<(), String> {
            let config = current_config();
            mount_pad_panel(&config)
        }

        fn unmount_panel(&self) {
            unmount_pad_panel();
        }

        fn watch_mutations(&self) -> Result<(), String> {
            MUTATION_WATCHER.with(|watcher| watcher.borrow_mut().start())
        }

        fn unwatch_mutations(&self) {
            MUTATION_WATCHER.with(|watcher| watcher.borrow_mut().stop());
        }

        fn set_status(&self, status: PadStatus) {
            DIAGNOSTICS.with(|state| state.borrow_mut().status = status);
            set_pad_status_dom(status);
        }

        fn pad_text(&self) -> Option<String> {
            pad_text_dom()
        }

        fn set_pad_text(&self, text: &str) {
            set_pad_text_dom(text);
        }
    }

    #[wasm_bindgen(start)]
    pub fn start() {
        console_error_panic_hook::set_once();

        let (config, config_error) = match read_config_override() {
            Ok(config) => (config, None),
            Err(error) => (PadConfig::default(), Some(error)),
        };
        install_console_tracing(config.debug_logging);
        if let Some(error) = config_error {
            tracing::warn!(error = %error, "ignoring invalid pad config override");
        }

        DIAGNOSTICS.with(|state| state.borrow_mut().api_url = config.api_url.clone());
        CONTROLLER.with(|slot| {
            *slot.borrow_mut() = Some(PanelController::new(FragmentDetector::with_marker(
                BrowserLocation,
                config.chat_marker.clone(),
            )));
        });
        CONFIG.with(|slot| *slot.borrow_mut() = config);

        install_browser_navigation_handlers();
        install_save_shortcut_handler();
        set_phase("listening");
        reevaluate();
    }

    #[wasm_bindgen]
    pub fn pad_diagnostics_json() -> String {
        DIAGNOSTICS.with(|state| {
            serde_json::to_string(&*state.borrow()).unwrap_or_else(|_| {
                "{\"phase\":\"error\",\"last_error\":\"diagnostics serialization failed\"}"
                    .to_string()
            })
        })
    }

    #[wasm_bindgen]
    pub fn pad_reevaluate() {
        reevaluate();
    }

    #[wasm_bindgen]
    pub fn pad_refresh() {
        spawn_pad_load();
    }

    #[wasm_bindgen]
    pub fn pad_save() {
        spawn_pad_save();
    }

    pub(super) fn current_config() -> PadConfig {
        CONFIG.with(|config| config.borrow().clone())
    }

    fn current_detector() -> Option<FragmentDetector<BrowserLocation>> {
        CONTROLLER.with(|slot| {
            slot.borrow()
                .as_ref()
                .map(|controller| controller.detector().clone())
        })
    }

    fn pad_client() -> PadClient<GlooPadTransport> {
        PadClient::new(GlooPadTransport::new(current_config().api_url))
    }

    /// Reconciles the panel with the current view. Safe to call from any event.
    pub(super) fn reevaluate() {
        let outcome = CONTROLLER.with(|slot| {
            let mut slot = slot.borrow_mut();
            slot.as_mut()
                .map(|controller| controller.reevaluate(&DomPanelHost))
        });
        match outcome {
            None => {}
            Some(Ok(reconcile)) => {
                record_reconcile(&reconcile);
                if reconcile.needs_load().is_some() {
                    spawn_pad_load();
                }
            }
            Some(Err(error)) => {
                tracing::error!(error = %error, "failed to mount pad panel");
                record_error(&error);
            }
        }
    }

    pub(super) fn spawn_pad_load() {
        let Some(detector) = current_detector() else {
            return;
        };
        let client = pad_client();
        spawn_local(async move {
            let result = load_pad(&detector, &client, &DomPanelHost).await;
            record_pad_result("load", result);
        });
    }

    pub(super) fn spawn_pad_save() {
        let Some(detector) = current_detector() else {
            return;
        };
        let client = pad_client();
        spawn_local(async move {
            let result = save_pad(&detector, &client, &DomPanelHost).await;
            record_pad_result("save", result);
        });
    }
}
