use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::dom;
use crate::input::PointerState;

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub pointer: Rc<RefCell<PointerState>>,
}

/// Movement and release are tracked on the window so a drag that leaves the
/// canvas still ends; hover and press only count on the canvas.
pub fn wire_input_handlers(w: InputWiring) {
    let Some(window) = web::window() else {
        log::warn!("[pointer] no window; input not wired");
        return;
    };
    let canvas: &web::EventTarget = w.canvas.as_ref();

    let mv = w.clone();
    listen(&window, &["pointermove"], move |ev| {
        let (x, y, width, height) = dom::pointer_in_canvas(&ev, &mv.canvas);
        mv.pointer.borrow_mut().on_move(x, y, width, height);
    });

    let leave = w.pointer.clone();
    listen(canvas, &["pointerleave"], move |_| leave.borrow_mut().on_leave());

    let down = w.clone();
    listen(canvas, &["pointerdown"], move |ev| {
        let (x, y, width, height) = dom::pointer_in_canvas(&ev, &down.canvas);
        down.pointer.borrow_mut().on_down(x, y, width, height);
        _ = down.canvas.set_pointer_capture(ev.pointer_id());
        log::debug!("[pointer] drag start");
        ev.prevent_default();
    });

    let up = w.pointer;
    listen(&window, &["pointerup", "pointercancel"], move |_| {
        up.borrow_mut().on_up();
    });
}

fn listen(
    target: &web::EventTarget,
    events: &[&str],
    handler: impl FnMut(web::PointerEvent) + 'static,
) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::PointerEvent)>);
    for event in events {
        _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
