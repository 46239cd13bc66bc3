use super::*;

fn pad_stylesheet(config: &PadConfig) -> String {
    let width = config.panel_width_css();
    format!(
        "#{PAD_PANEL_ID} {{
  position: fixed; top: 0; right: 0; height: 100vh; width: {width};
  box-sizing: border-box; background: #fff; border-left: 1px solid #ccc;
  z-index: {PAD_Z_INDEX}; display: flex; flex-direction: column; font-family: monospace;
}}
#{PAD_PANEL_ID} header {{ padding: 6px 8px; border-bottom: 1px solid #ccc; }}
#{PAD_PANEL_ID} header button {{ font-family: monospace; margin-right: 6px; }}
#{PAD_STATUS_ID} {{ color: {PAD_STATUS_COLOR}; margin-left: 6px; }}
#{PAD_TEXT_ID} {{
  flex: 1; width: 100%; box-sizing: border-box; border: none; outline: none; resize: none;
  font: 14px/1.4 monospace; padding: 8px; background: #fff;
}}
"
    )
}

pub(super) fn pad_panel_present() -> bool {
    web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(PAD_PANEL_ID))
        .is_some()
}

pub(super) fn mount_pad_panel(config: &PadConfig) -> Result<(), String> {
    let window = web_sys::window().ok_or_else(|| "window is unavailable".to_string())?;
    let document = window
        .document()
        .ok_or_else(|| "document is unavailable".to_string())?;
    let body = document
        .body()
        .ok_or_else(|| "document body is unavailable".to_string())?;

    if document.get_element_by_id(PAD_PANEL_ID).is_some() {
        return Ok(());
    }

    if document.get_element_by_id(PAD_STYLE_ID).is_none() {
        let style = document
            .create_element("style")
            .map_err(|_| "failed to create pad style element".to_string())?;
        style.set_id(PAD_STYLE_ID);
        style.set_text_content(Some(&pad_stylesheet(config)));
        match document.head() {
            Some(head) => head
                .append_child(&style)
                .map_err(|_| "failed to append pad style element".to_string())?,
            None => body
                .append_child(&style)
                .map_err(|_| "failed to append pad style element".to_string())?,
        };
    }

    let panel = document
        .create_element("div")
        .map_err(|_| "failed to create pad panel".to_string())?;
    panel.set_id(PAD_PANEL_ID);

    let header = document
        .create_element("header")
        .map_err(|_| "failed to create pad header".to_string())?;

    let refresh_button = document
        .create_element("button")
        .map_err(|_| "failed to create pad refresh button".to_string())?
        .dyn_into::<HtmlElement>()
        .map_err(|_| "pad refresh button is not HtmlElement".to_string())?;
    refresh_button.set_id(PAD_REFRESH_ID);
    let _ = refresh_button.set_attribute("type", "button");
    refresh_button.set_inner_text("Refresh");
    let _ = header.append_child(&refresh_button);

    let save_button = document
        .create_element("button")
        .map_err(|_| "failed to create pad save button".to_string())?
        .dyn_into::<HtmlElement>()
        .map_err(|_| "pad save button is not HtmlElement".to_string())?;
    save_button.set_id(PAD_SAVE_ID);
    let _ = save_button.set_attribute("type", "button");
    save_button.set_inner_text("Save");
    let _ = header.append_child(&save_button);

    let status = document
        .create_element("span")
        .map_err(|_| "failed to create pad status".to_string())?;
    status.set_id(PAD_STATUS_ID);
    let _ = status.set_attribute("aria-live", "polite");
    let _ = header.append_child(&status);
    let _ = panel.append_child(&header);

    let text_area = document
        .create_element("textarea")
        .map_err(|_| "failed to create pad text area".to_string())?
        .dyn_into::<HtmlTextAreaElement>()
        .map_err(|_| "pad text area is not HtmlTextAreaElement".to_string())?;
    text_area.set_id(PAD_TEXT_ID);
    text_area.set_placeholder(PAD_TEXT_PLACEHOLDER);
    text_area.set_spellcheck(false);
    let _ = panel.append_child(&text_area);

    bind_panel_buttons(&refresh_button, &save_button);

    body.append_child(&panel)
        .map_err(|_| "failed to append pad panel".to_string())?;
    reserve_body_offset(&body, config)
}

fn bind_panel_buttons(refresh_button: &HtmlElement, save_button: &HtmlElement) {
    REFRESH_CLICK_HANDLER.with(|slot| {
        let mut slot = slot.borrow_mut();
        let callback = slot.get_or_insert_with(|| {
            Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |_event| {
                spawn_pad_load();
            }))
        });
        let _ = refresh_button
            .add_event_listener_with_callback("click", callback.as_ref().unchecked_ref());
    });
    SAVE_CLICK_HANDLER.with(|slot| {
        let mut slot = slot.borrow_mut();
        let callback = slot.get_or_insert_with(|| {
            Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |_event| {
                spawn_pad_save();
            }))
        });
        let _ = save_button
            .add_event_listener_with_callback("click", callback.as_ref().unchecked_ref());
    });
}

fn reserve_body_offset(body: &HtmlElement, config: &PadConfig) -> Result<(), String> {
    let style = body.style();
    let current = style
        .get_property_value("margin-right")
        .unwrap_or_default();
    BODY_OFFSET.with(|offset| offset.borrow_mut().reserve(&current));
    style
        .set_property("margin-right", &config.panel_width_css())
        .map_err(|_| "failed to reserve body offset".to_string())
}

pub(super) fn unmount_pad_panel() {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return;
    };
    for id in INJECTED_ELEMENT_IDS {
        if let Some(element) = document.get_element_by_id(id) {
            element.remove();
        }
    }

    let Some(restore) = BODY_OFFSET.with(|offset| offset.borrow_mut().release()) else {
        return;
    };
    let Some(body) = document.body() else {
        return;
    };
    let style = body.style();
    match restore {
        MarginRestore::Remove => {
            let _ = style.remove_property("margin-right");
        }
        MarginRestore::Set(margin) => {
            let _ = style.set_property("margin-right", &margin);
        }
    }
}

pub(super) fn set_pad_status_dom(status: PadStatus) {
    let Some(element) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(PAD_STATUS_ID))
    else {
        return;
    };
    element.set_text_content(Some(status.label()));
    if let Ok(element) = element.dyn_into::<HtmlElement>() {
        let color = if status.is_failure() {
            PAD_STATUS_ERROR_COLOR
        } else {
            PAD_STATUS_COLOR
        };
        let _ = element.style().set_property("color", color);
    }
}

fn pad_text_area() -> Option<HtmlTextAreaElement> {
    web_sys::window()?
        .document()?
        .get_element_by_id(PAD_TEXT_ID)?
        .dyn_into::<HtmlTextAreaElement>()
        .ok()
}

pub(super) fn pad_text_dom() -> Option<String> {
    pad_text_area().map(|text_area| text_area.value())
}

pub(super) fn set_pad_text_dom(text: &str) {
    if let Some(text_area) = pad_text_area() {
        text_area.set_value(text);
    }
}
