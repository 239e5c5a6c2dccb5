//! Input adapter and outbound events
//!
//! Raw pointer, wheel and resize notifications are normalized into
//!   [`CanvasEvent`](enum.CanvasEvent.html)s in viewport pixels and handed to
//!   an [`EventSink`](trait.EventSink.html). The adapter does no pan or zoom
//!   math; an external controller decides what the events mean and answers
//!   with canvas commands
//!
//!     use tilecanvas::{InputAdapter, CanvasEvent, ViewportPoint};
//!
//!     let mut input = InputAdapter::new(Vec::new(), 40.0, 600.0);
//!     input.set_offset(10.0, 20.0);
//!     input.mouse_down(15.0, 25.0);
//!     input.mouse_move(16.0, 25.0);
//!     assert_eq!(input.sink()[1], CanvasEvent::PointerMoved {
//!         viewport_pos: ViewportPoint::new(6.0, 5.0),
//!         is_down: true,
//!     });
//!

use crate::coords::ViewportPoint;

use serde::{Deserialize, Serialize};

/// Normalized event forwarded to the controller
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CanvasEvent {
    PointerMoved {
        #[serde(rename = "viewportPos")]
        viewport_pos: ViewportPoint,
        #[serde(rename = "isDown")]
        is_down: bool,
    },
    PointerDown {
        #[serde(rename = "viewportPos")]
        viewport_pos: ViewportPoint,
    },
    PointerUp,
    Wheel {
        /// Pixels, positive scrolls down
        delta: f64,
        #[serde(rename = "viewportPos")]
        viewport_pos: ViewportPoint,
    },
    Resized {
        width: usize,
        height: usize,
    },
}

/// Receiver of canvas events
pub trait EventSink {
    fn emit(&mut self, event: CanvasEvent);
}

impl EventSink for Vec<CanvasEvent> {
    fn emit(&mut self, event: CanvasEvent) {
        self.push(event);
    }
}

/// Sink calling a closure for each event
pub struct FnSink<F>(pub F) where F: FnMut(CanvasEvent);

impl<F> EventSink for FnSink<F> where F: FnMut(CanvasEvent) {
    fn emit(&mut self, event: CanvasEvent) {
        (self.0)(event)
    }
}

impl<F> std::fmt::Debug for FnSink<F> where F: FnMut(CanvasEvent) {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FnSink")
    }
}

/// Raw wheel delta in the unit reported by the platform
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WheelDelta {
    Pixels(f64),
    Lines(f64),
    Pages(f64),
}

impl WheelDelta {
    /// Delta in pixels
    pub fn normalize(&self, line_height: f64, page_height: f64) -> f64 {
        match *self {
            WheelDelta::Pixels(d) => d,
            WheelDelta::Lines(d)  => d * line_height,
            WheelDelta::Pages(d)  => d * page_height,
        }
    }
}

/// Converts raw input into canvas events
#[derive(Debug)]
pub struct InputAdapter<S: EventSink> {
    sink: S,
    offset: (f64, f64),
    line_height: f64,
    page_height: f64,
    is_down: bool,
}

impl<S: EventSink> InputAdapter<S> {
    /// Adapter for a surface `page_height` pixels tall
    ///
    /// Page sized wheel deltas scroll by `page_height` until the next
    ///   [`resize`](#method.resize)
    pub fn new(sink: S, line_height: f64, page_height: f64) -> Self {
        Self { sink, offset: (0.0, 0.0), line_height, page_height, is_down: false }
    }
    /// Position of the surface within the client area
    pub fn set_offset(&mut self, left: f64, top: f64) {
        self.offset = (left, top);
    }
    pub fn sink(&self) -> &S {
        &self.sink
    }
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
    pub fn into_sink(self) -> S {
        self.sink
    }
    /// A button is held
    pub fn is_down(&self) -> bool {
        self.is_down
    }
    fn viewport(&self, client_x: f64, client_y: f64) -> ViewportPoint {
        ViewportPoint::new(client_x - self.offset.0, client_y - self.offset.1)
    }
    pub fn mouse_move(&mut self, client_x: f64, client_y: f64) {
        let viewport_pos = self.viewport(client_x, client_y);
        let is_down = self.is_down;
        self.sink.emit(CanvasEvent::PointerMoved { viewport_pos, is_down });
    }
    pub fn mouse_down(&mut self, client_x: f64, client_y: f64) {
        self.is_down = true;
        let viewport_pos = self.viewport(client_x, client_y);
        self.sink.emit(CanvasEvent::PointerDown { viewport_pos });
    }
    pub fn mouse_up(&mut self) {
        self.is_down = false;
        self.sink.emit(CanvasEvent::PointerUp);
    }
    pub fn wheel(&mut self, delta: WheelDelta, client_x: f64, client_y: f64) {
        let delta = delta.normalize(self.line_height, self.page_height);
        let viewport_pos = self.viewport(client_x, client_y);
        self.sink.emit(CanvasEvent::Wheel { delta, viewport_pos });
    }
    /// Surface size changed, page sized wheel deltas follow the height
    pub fn resize(&mut self, width: usize, height: usize) {
        self.page_height = height as f64;
        self.sink.emit(CanvasEvent::Resized { width, height });
    }
}
