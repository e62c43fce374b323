use wasm_bindgen::JsCast;
use web_sys as web;

use crate::dom;
use crate::input::{key_action, KeyAction};

pub fn handle_global_keydown(ev: &web::KeyboardEvent, canvas: &web::HtmlCanvasElement) {
    let Some(action) = key_action(&ev.key()) else {
        return;
    };
    let Some(doc) = dom::window_document() else {
        return;
    };
    match action {
        KeyAction::ToggleFullscreen => {
            if doc.fullscreen_element().is_some() {
                doc.exit_fullscreen();
            } else if let Err(e) = canvas.request_fullscreen() {
                log::warn!("[keys] fullscreen refused: {:?}", e);
            }
            ev.prevent_default();
        }
        KeyAction::ExitFullscreen => {
            if doc.fullscreen_element().is_some() {
                doc.exit_fullscreen();
            }
        }
    }
}

pub fn wire_global_keydown(canvas: web::HtmlCanvasElement) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                handle_global_keydown(&ev, &canvas);
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
