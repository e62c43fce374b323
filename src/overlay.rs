use std::cell::RefCell;
use std::rc::Rc;

use scene_core::{AssetBoard, CarouselItem, EvasionController, UiControlState};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::constants::{
    ACCEPT_BUTTON_ID, ASK_VIEW_ID, CAROUSEL_TRACK_ID, EVADE_BUTTON_ID, SUCCESS_VIEW_ID,
};
use crate::dom;

fn apply_control(el: &web::HtmlElement, state: &UiControlState) {
    let style = el.style();
    let (left, top) = state.css_position();
    _ = style.set_property("position", "absolute");
    _ = style.set_property("left", &left);
    _ = style.set_property("top", &top);
    _ = style.set_property("transform", &state.css_transform());
}

/// Push both controls' current placement into the DOM.
pub fn apply_controls(document: &web::Document, evasion: &EvasionController) {
    if let Some(el) = dom::html_element(document, ACCEPT_BUTTON_ID) {
        apply_control(&el, evasion.accept());
    }
    if let Some(el) = dom::html_element(document, EVADE_BUTTON_ID) {
        apply_control(&el, evasion.evade());
    }
}

/// Hide the question and reveal the success view.
pub fn show_success(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(ASK_VIEW_ID) {
        dom::set_hidden(&el, true);
    }
    if let Some(el) = document.get_element_by_id(SUCCESS_VIEW_ID) {
        dom::set_hidden(&el, false);
    }
}

/// Fill the carousel track with the photo run twice over and return the
/// track. Photos that fail to load are swapped for a labelled placeholder.
pub fn build_carousel(
    document: &web::Document,
    board: &Rc<RefCell<AssetBoard>>,
) -> Option<web::HtmlElement> {
    let Some(track) = dom::html_element(document, CAROUSEL_TRACK_ID) else {
        log::warn!("[overlay] missing #{CAROUSEL_TRACK_ID}; carousel skipped");
        return None;
    };
    track.set_inner_html("");
    let items = board.borrow().manifest().carousel_items();
    for item in &items {
        match photo_element(document, board, item) {
            Ok(el) => {
                _ = track.append_child(&el);
            }
            Err(e) => log::error!("[overlay] photo {}: {:?}", item.key, e),
        }
    }
    log::info!("[overlay] carousel built with {} items", items.len());
    Some(track)
}

fn photo_element(
    document: &web::Document,
    board: &Rc<RefCell<AssetBoard>>,
    item: &CarouselItem,
) -> Result<web::Element, wasm_bindgen::JsValue> {
    let n = item.number;
    let frame = document.create_element("div")?;
    frame.set_class_name("photo-frame");
    _ = frame.set_attribute("data-key", &item.key);

    let img: web::HtmlImageElement = document.create_element("img")?.dyn_into()?;
    {
        let b = board.borrow();
        img.set_src(&b.manifest().path(n));
        img.set_alt(&b.manifest().alt(n));
    }
    img.set_class_name("photo");

    let board_load = board.clone();
    let on_load = Closure::wrap(Box::new(move || {
        board_load.borrow_mut().mark_loaded(n);
    }) as Box<dyn FnMut()>);
    img.set_onload(Some(on_load.as_ref().unchecked_ref()));
    on_load.forget();

    let board_err = board.clone();
    let doc = document.clone();
    let img_err = img.clone();
    let on_error = Closure::wrap(Box::new(move || {
        let label = board_err.borrow_mut().mark_missing(n);
        if let Ok(placeholder) = doc.create_element("div") {
            placeholder.set_class_name("photo-placeholder");
            placeholder.set_text_content(Some(&label));
            _ = img_err.replace_with_with_node_1(&placeholder);
        }
    }) as Box<dyn FnMut()>);
    img.set_onerror(Some(on_error.as_ref().unchecked_ref()));
    on_error.forget();

    frame.append_child(&img)?;
    Ok(frame)
}
