//! Auto-scrolling photo strip that wraps at the midpoint of a duplicated run.

use crate::error::{ensure_positive, Result};

#[derive(Clone, Debug, PartialEq)]
pub struct CarouselParams {
    /// Scroll speed in CSS pixels per second.
    pub speed: f32,
}

impl Default for CarouselParams {
    fn default() -> Self {
        Self { speed: 60.0 }
    }
}

impl CarouselParams {
    pub fn validate(&self) -> Result<()> {
        ensure_positive("carousel.speed", self.speed)
    }
}

#[derive(Clone, Debug)]
pub struct Carousel {
    params: CarouselParams,
    offset: f32,
    hovering: bool,
    running: bool,
}

impl Carousel {
    pub fn new(params: CarouselParams) -> Self {
        Self {
            params,
            offset: 0.0,
            hovering: false,
            running: true,
        }
    }

    pub fn set_hovering(&mut self, hovering: bool) {
        self.hovering = hovering;
    }

    /// Advance by `dt` seconds for a track whose full scroll width is
    /// `scroll_width`. Returns the new offset.
    pub fn tick(&mut self, dt: f32, scroll_width: f32) -> f32 {
        if !self.running || self.hovering || !(dt > 0.0 && dt.is_finite()) {
            return self.offset;
        }
        self.offset += self.params.speed * dt;
        let half = scroll_width * 0.5;
        if !(half > 0.0) || self.offset >= half {
            self.offset = 0.0;
        }
        self.offset
    }

    /// Stop for good; later ticks leave the offset alone.
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }
}
