use std::cell::{Cell, RefCell};
use std::rc::Rc;

use scene_core::{Carousel, FrameClock, Scene, Session};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::input::{self, PointerState};
use crate::render;
use crate::surface::{self, SurfaceRecovery};

/// Per-frame state for the 3D scene.
pub struct FrameContext<'a> {
    pub scene: Scene,
    pub session: Rc<RefCell<Session>>,
    pub pointer: Rc<RefCell<PointerState>>,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<render::GpuState<'a>>,
    pub clock: FrameClock,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let time = self.clock.tick();
        let w = self.canvas.width();
        let h = self.canvas.height();
        let frame_input = self
            .pointer
            .borrow_mut()
            .frame_input(time, input::aspect_of(w, h));
        let accepted = self.session.borrow().is_accepted();
        let out = self.scene.update(&frame_input, accepted);

        if let Some(g) = &mut self.gpu {
            g.resize_if_needed(w, h);
            if let Err(e) = g.render(&self.scene, &out) {
                match surface::surface_recovery(&e) {
                    SurfaceRecovery::Reconfigure => {
                        log::warn!("[gpu] surface {:?}; reconfiguring", e);
                        g.reconfigure();
                    }
                    SurfaceRecovery::SkipFrame => log::error!("render error: {:?}", e),
                }
            }
        }
    }
}

/// Auto-scroll state for the photo strip.
pub struct CarouselContext {
    pub carousel: Rc<RefCell<Carousel>>,
    pub track: web::HtmlElement,
    pub clock: FrameClock,
}

impl CarouselContext {
    /// Advance one frame; `false` once the carousel has been stopped.
    pub fn frame(&mut self) -> bool {
        let dt = input::clamp_delta(self.clock.tick()).delta;
        let mut carousel = self.carousel.borrow_mut();
        if !carousel.is_running() {
            return false;
        }
        let offset = carousel.tick(dt, self.track.scroll_width() as f32);
        self.track.set_scroll_left(offset.round() as i32);
        true
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    scene: &Scene,
) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas, scene).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// A `requestAnimationFrame` loop that can be stopped.
///
/// `step` runs once per animation frame and returns `false` to end the loop.
/// Cancelling (or dropping) the loop cancels the pending frame and releases
/// the callback.
pub struct FrameLoop {
    pending: Rc<Cell<Option<i32>>>,
    callback: FrameCallback,
}

impl FrameLoop {
    pub fn start(mut step: impl FnMut() -> bool + 'static) -> Self {
        let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
        let callback: FrameCallback = Rc::new(RefCell::new(None));

        let pending_tick = pending.clone();
        // weak to avoid a cycle between the closure and its own slot
        let callback_tick = Rc::downgrade(&callback);
        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            pending_tick.set(None);
            if !step() {
                return;
            }
            let Some(slot) = callback_tick.upgrade() else {
                return;
            };
            let next = slot.borrow().as_ref().and_then(request_frame);
            pending_tick.set(next);
        }) as Box<dyn FnMut()>));

        let first = callback.borrow().as_ref().and_then(request_frame);
        pending.set(first);
        Self { pending, callback }
    }

    pub fn cancel(&mut self) {
        if let Some(id) = self.pending.take() {
            if let Some(w) = web::window() {
                _ = w.cancel_animation_frame(id);
            }
        }
        self.callback.borrow_mut().take();
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn request_frame(callback: &Closure<dyn FnMut()>) -> Option<i32> {
    web::window()?
        .request_animation_frame(callback.as_ref().unchecked_ref())
        .ok()
}

/// Run the scene loop until cancelled.
pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) -> FrameLoop {
    FrameLoop::start(move || {
        frame_ctx.borrow_mut().frame();
        true
    })
}

pub fn start_carousel_loop(ctx: CarouselContext) -> FrameLoop {
    let mut ctx = ctx;
    FrameLoop::start(move || ctx.frame())
}
