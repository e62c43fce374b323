#![cfg(target_arch = "wasm32")]
use rand::rngs::StdRng;
use rand::SeedableRng;
use scene_core::{
    AssetBoard, Carousel, EvasionController, FrameClock, Scene, SceneParams, Session,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod overlay;
mod render;
mod surface;

use constants::{ACCEPT_BUTTON_ID, CANVAS_ID, EVADE_BUTTON_ID};

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

/// Loops that must stop when the page goes away.
#[derive(Default)]
struct Loops {
    scene: Option<frame::FrameLoop>,
    carousel: Option<frame::FrameLoop>,
}

impl Loops {
    fn cancel_all(&mut self) {
        if let Some(mut l) = self.scene.take() {
            l.cancel();
        }
        if let Some(mut l) = self.carousel.take() {
            l.cancel();
        }
    }
}

fn wire_pagehide(loops: &Rc<RefCell<Loops>>, carousel: &Rc<RefCell<Carousel>>) {
    let loops = loops.clone();
    let carousel = carousel.clone();
    let closure = Closure::wrap(Box::new(move || {
        carousel.borrow_mut().stop();
        loops.borrow_mut().cancel_all();
        log::info!("[lifecycle] pagehide, loops cancelled");
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

/// Evade hover and accept click. Accepting flips the session, swaps the
/// views and starts the carousel.
fn wire_overlay_buttons(
    document: &web::Document,
    params: &SceneParams,
    session: &Rc<RefCell<Session>>,
    loops: &Rc<RefCell<Loops>>,
    carousel: &Rc<RefCell<Carousel>>,
) -> anyhow::Result<()> {
    let evasion = EvasionController::new(params.evasion.clone(), StdRng::from_entropy())
        .map_err(|e| anyhow::anyhow!("evasion config: {e}"))?;
    let evasion = Rc::new(RefCell::new(evasion));
    overlay::apply_controls(document, &evasion.borrow());

    let evasion_hover = evasion.clone();
    let doc_hover = document.clone();
    dom::add_listener(document, EVADE_BUTTON_ID, "mouseenter", move || {
        let mut e = evasion_hover.borrow_mut();
        e.on_evade_hover();
        overlay::apply_controls(&doc_hover, &e);
    });

    let board = Rc::new(RefCell::new(AssetBoard::new(params.photos.clone())));
    let session = session.clone();
    let loops = loops.clone();
    let carousel = carousel.clone();
    let doc_accept = document.clone();
    dom::add_listener(document, ACCEPT_BUTTON_ID, "click", move || {
        let Some(event) = evasion.borrow_mut().on_accept_activate() else {
            return;
        };
        if !session.borrow_mut().accept(event) {
            return;
        }
        overlay::show_success(&doc_accept);
        let Some(track) = overlay::build_carousel(&doc_accept, &board) else {
            return;
        };
        wire_carousel_hover(&track, &carousel);
        let ctx = frame::CarouselContext {
            carousel: carousel.clone(),
            track,
            clock: FrameClock::new(),
        };
        loops.borrow_mut().carousel = Some(frame::start_carousel_loop(ctx));
    });
    Ok(())
}

fn wire_carousel_hover(track: &web::HtmlElement, carousel: &Rc<RefCell<Carousel>>) {
    for (event, hovering) in [("mouseenter", true), ("mouseleave", false)] {
        let carousel = carousel.clone();
        let closure = Closure::wrap(Box::new(move || {
            carousel.borrow_mut().set_hovering(hovering);
        }) as Box<dyn FnMut()>);
        _ = track.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("heart-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    static STARTED: AtomicBool = AtomicBool::new(false);
    if STARTED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }

    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{CANVAS_ID}"))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    wire_canvas_resize(&canvas);

    let params = SceneParams::default();
    let session = Rc::new(RefCell::new(Session::new()));
    let loops = Rc::new(RefCell::new(Loops::default()));
    let carousel = Rc::new(RefCell::new(Carousel::new(params.carousel.clone())));

    // The overlay works without the 3D scene.
    wire_overlay_buttons(&document, &params, &session, &loops, &carousel)?;
    wire_pagehide(&loops, &carousel);
    events::wire_global_keydown(canvas.clone());

    let scene = Scene::new(params).map_err(|e| anyhow::anyhow!("scene config: {e}"))?;
    let gpu = frame::init_gpu(&canvas, &scene).await;

    let pointer = Rc::new(RefCell::new(input::PointerState::default()));
    events::wire_input_handlers(events::pointer::InputWiring {
        canvas: canvas.clone(),
        pointer: pointer.clone(),
    });

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        scene,
        session,
        pointer,
        canvas,
        gpu,
        clock: FrameClock::new(),
    }));
    loops.borrow_mut().scene = Some(frame::start_loop(frame_ctx));
    Ok(())
}
