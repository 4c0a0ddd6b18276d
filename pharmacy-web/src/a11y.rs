// Accessibility helpers

use wasm_bindgen::JsCast;

const FOCUSABLE: &str =
    "button:not([disabled]), a[href], input:not([disabled]), select:not([disabled]), textarea:not([disabled]), [tabindex]:not([tabindex='-1'])";

/// CSS for visible focus indicators and the screen reader utility class.
///
/// Injected once at startup so keyboard users see focus before the
/// stylesheet arrives.
#[must_use]
pub const fn visible_focus_css() -> &'static str {
    ":focus-visible{outline:3px solid #16a34a;outline-offset:2px} .sr-only{position:absolute;width:1px;height:1px;margin:-1px;overflow:hidden;clip:rect(0 0 0 0);white-space:nowrap;}"
}

/// Announce `msg` through the `#status-live` region if present.
pub fn set_status(msg: &str) {
    if let Some(node) = web_sys::window()
        .and_then(|win| win.document())
        .and_then(|doc| doc.get_element_by_id("status-live"))
    {
        node.set_text_content(Some(msg));
    }
}

fn element_by_id(id: &str) -> Option<web_sys::HtmlElement> {
    web_sys::window()
        .and_then(|win| win.document())
        .and_then(|doc| doc.get_element_by_id(id))
        .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
}

/// Move focus to the first focusable element inside `container_id`.
pub fn trap_focus_in(container_id: &str) {
    let Some(container) = element_by_id(container_id) else {
        return;
    };
    let first = container
        .query_selector(FOCUSABLE)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok());
    if let Some(target) = first {
        let _ = target.focus();
    }
}

/// Return focus to the element that opened a dialog.
pub fn restore_focus(id: &str) {
    if let Some(el) = element_by_id(id) {
        let _ = el.focus();
    }
}

/// Add the early focus stylesheet to `<head>`.
pub fn inject_focus_css() {
    let Some(doc) = web_sys::window().and_then(|win| win.document()) else {
        return;
    };
    let (Some(head), Ok(style)) = (doc.head(), doc.create_element("style")) else {
        return;
    };
    style.set_text_content(Some(visible_focus_css()));
    let _ = head.append_child(&style);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_css_defines_screen_reader_class() {
        assert!(visible_focus_css().contains(".sr-only"));
    }
}
