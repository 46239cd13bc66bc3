use super::*;

/// `window.location.hash` as seen at call time.
#[derive(Debug, Clone, Copy, Default)]
pub(super) struct BrowserLocation;

impl HostLocation for BrowserLocation {
    fn fragment(&self) -> String {
        web_sys::window()
            .and_then(|window| window.location().hash().ok())
            .unwrap_or_default()
    }
}

/// Navigation listeners live for the whole page; `reevaluate` is idempotent.
pub(super) fn install_browser_navigation_handlers() {
    let Some(window) = web_sys::window() else {
        return;
    };

    HASHCHANGE_HANDLER.with(|slot| {
        if slot.borrow().is_some() {
            return;
        }
        let callback = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |_event| {
            reevaluate();
        }));
        let _ = window
            .add_event_listener_with_callback("hashchange", callback.as_ref().unchecked_ref());
        *slot.borrow_mut() = Some(callback);
    });

    POPSTATE_HANDLER.with(|slot| {
        if slot.borrow().is_some() {
            return;
        }
        let callback = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |_event| {
            reevaluate();
        }));
        let _ = window
            .add_event_listener_with_callback("popstate", callback.as_ref().unchecked_ref());
        *slot.borrow_mut() = Some(callback);
    });

    let Some(document) = window.document() else {
        return;
    };
    if document.body().is_some() {
        return;
    }
    DOM_READY_HANDLER.with(|slot| {
        if slot.borrow().is_some() {
            return;
        }
        let callback = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |_event| {
            reevaluate();
        }));
        let _ = document.add_event_listener_with_callback(
            "DOMContentLoaded",
            callback.as_ref().unchecked_ref(),
        );
        *slot.borrow_mut() = Some(callback);
    });
}

fn shortcut_platform() -> ShortcutPlatform {
    let platform = web_sys::window()
        .and_then(|window| window.navigator().platform().ok())
        .unwrap_or_default();
    ShortcutPlatform::from_navigator_platform(&platform)
}

/// Captures Ctrl+S / Cmd+S before the host sees it, but only while the panel is mounted.
pub(super) fn install_save_shortcut_handler() {
    let Some(window) = web_sys::window() else {
        return;
    };

    SAVE_SHORTCUT_HANDLER.with(|slot| {
        if slot.borrow().is_some() {
            return;
        }
        let platform = shortcut_platform();
        let callback = Closure::<dyn FnMut(web_sys::KeyboardEvent)>::wrap(Box::new(
            move |event: web_sys::KeyboardEvent| {
                if !pad_panel_present() {
                    return;
                }
                let chord = KeyChord {
                    key: event.key(),
                    ctrl: event.ctrl_key(),
                    meta: event.meta_key(),
                    shift: event.shift_key(),
                    alt: event.alt_key(),
                };
                if is_save_shortcut(platform, &chord) {
                    event.prevent_default();
                    spawn_pad_save();
                }
            },
        ));
        let _ = window.add_event_listener_with_callback_and_bool(
            "keydown",
            callback.as_ref().unchecked_ref(),
            true,
        );
        *slot.borrow_mut() = Some(callback);
    });
}
