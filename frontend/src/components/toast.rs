use common::ui::StyleType;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

fn background(style: StyleType) -> &'static str {
    match style {
        StyleType::Normal => "rgba(0, 0, 0, 0.8)",
        StyleType::Info => "#1976d2",
        StyleType::Success => "#2e7d32",
        StyleType::Danger => "#d32f2f",
        StyleType::Warning => "#ed6c02",
    }
}

/// Shows `message` at the bottom of the screen for three seconds.
pub fn show_toast(message: &str, style: StyleType) {
    if let Some(window) = web_sys::window() {
        if let Some(document) = window.document() {
            if let (Ok(toast), Some(body)) = (document.create_element("div"), document.body()) {
                toast.set_text_content(Some(message));
                toast.set_class_name(&format!("toast {}", style.css_class()));
                let html_toast: HtmlElement = toast.unchecked_into();
                let css = html_toast.style();
                css.set_property("position", "fixed").ok();
                css.set_property("bottom", "20px").ok();
                css.set_property("left", "50%").ok();
                css.set_property("transform", "translateX(-50%)").ok();
                css.set_property("background", background(style)).ok();
                css.set_property("color", "#fff").ok();
                css.set_property("padding", "10px 20px").ok();
                css.set_property("border-radius", "4px").ok();
                css.set_property("z-index", "10000").ok();

                if body.append_child(&html_toast).is_ok() {
                    wasm_bindgen_futures::spawn_local(async move {
                        gloo_timers::future::TimeoutFuture::new(3000).await;
                        if let Some(parent) = html_toast.parent_node() {
                            parent.remove_child(&html_toast).ok();
                        }
                    });
                }
            }
        }
    }
}
