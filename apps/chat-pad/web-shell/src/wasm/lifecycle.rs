use super::*;

/// Subtree observer over the document root, active only while the panel is mounted.
///
/// `stop` disconnects the observer but keeps the callback alive: it may be the
/// very callback currently running `reevaluate`.
#[derive(Default)]
pub(super) struct MutationWatcher {
    observer: Option<MutationObserver>,
    callback: Option<Closure<dyn FnMut(js_sys::Array, MutationObserver)>>,
}

impl MutationWatcher {
    pub(super) fn start(&mut self) -> Result<(), String> {
        if self.observer.is_some() {
            return Ok(());
        }
        let root = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.document_element())
            .ok_or_else(|| "document root is unavailable".to_string())?;

        let callback = self.callback.get_or_insert_with(|| {
            Closure::<dyn FnMut(js_sys::Array, MutationObserver)>::wrap(Box::new(
                move |_records: js_sys::Array, _observer: MutationObserver| {
                    reevaluate();
                },
            ))
        });
        let observer = MutationObserver::new(callback.as_ref().unchecked_ref())
            .map_err(|_| "failed to create mutation observer".to_string())?;

        let options = MutationObserverInit::new();
        options.set_child_list(true);
        options.set_subtree(true);
        observer
            .observe_with_options(&root, &options)
            .map_err(|_| "failed to observe document mutations".to_string())?;

        self.observer = Some(observer);
        Ok(())
    }

    pub(super) fn stop(&mut self) {
        if let Some(observer) = self.observer.take() {
            observer.disconnect();
        }
    }
}

/// Reads the optional `window.__CHAT_PAD_CONFIG__` override (object or JSON string).
pub(super) fn read_config_override() -> Result<PadConfig, String> {
    let Some(window) = web_sys::window() else {
        return Ok(PadConfig::default());
    };
    let value = js_sys::Reflect::get(&window, &JsValue::from_str(PAD_CONFIG_GLOBAL))
        .map_err(|_| format!("failed to read window.{PAD_CONFIG_GLOBAL}"))?;
    if value.is_undefined() || value.is_null() {
        return Ok(PadConfig::default());
    }
    let raw = match value.as_string() {
        Some(raw) => raw,
        None => js_sys::JSON::stringify(&value)
            .map_err(|_| format!("window.{PAD_CONFIG_GLOBAL} is not serializable"))?
            .as_string()
            .unwrap_or_default(),
    };
    PadConfig::from_json(&raw).map_err(|error| error.to_string())
}

pub(super) fn set_phase(phase: &str) {
    DIAGNOSTICS.with(|state| state.borrow_mut().phase = phase.to_string());
}

pub(super) fn record_error(message: &str) {
    DIAGNOSTICS.with(|state| state.borrow_mut().last_error = Some(message.to_string()));
}

pub(super) fn record_reconcile(reconcile: &Reconcile) {
    DIAGNOSTICS.with(|state| {
        let mut state = state.borrow_mut();
        state.last_reevaluated_at_ms = Some(epoch_millis_now());
        match reconcile {
            Reconcile::Unchanged => {}
            Reconcile::Mounted(chat_id) => {
                state.mounts += 1;
                state.phase = "mounted".to_string();
                state.attached_chat_id = Some(chat_id.to_string());
            }
            Reconcile::ChatChanged(chat_id) => {
                state.chat_switches += 1;
                state.attached_chat_id = Some(chat_id.to_string());
            }
            Reconcile::Unmounted => {
                state.unmounts += 1;
                state.phase = "listening".to_string();
                state.attached_chat_id = None;
            }
        }
    });
}

pub(super) fn record_pad_result(operation: &str, result: Result<PadOutcome, PadError>) {
    match result {
        Ok(PadOutcome::Applied) => {
            tracing::debug!(operation, "pad operation applied");
        }
        Ok(PadOutcome::Discarded) => {
            tracing::debug!(operation, "pad operation discarded");
        }
        Err(error) => {
            record_error(&format!("{operation}: {error} ({})", error.code()));
        }
    }
}

pub(super) fn epoch_millis_now() -> u64 {
    let now = js_sys::Date::now();
    if !now.is_finite() || now.is_sign_negative() {
        return 0;
    }
    now.floor().min(u64::MAX as f64) as u64
}
