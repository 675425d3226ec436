//! Browser platform: requestAnimationFrame, setInterval and DOM readouts

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{Document, Window};

use super::{FrameId, Platform, TimerId};
use crate::Viewport;

/// Callback invoked with the token of the frame/timer that fired
pub type Dispatch<T> = Rc<dyn Fn(T)>;

/// Browser-backed [`Platform`]
///
/// Callbacks are routed through `on_frame`/`on_timer`, which the host wires
/// to its game instance (typically through a `Weak` reference).
pub struct WebPlatform {
    window: Window,
    document: Document,
    on_frame: Dispatch<FrameId>,
    on_timer: Dispatch<TimerId>,
    next_token: u32,
    /// Our token -> browser animation-frame id
    frame: Option<(FrameId, i32)>,
    /// Live interval plus the closure the browser calls (must outlive the interval)
    interval: Option<(TimerId, i32, Closure<dyn FnMut()>)>,
}

impl WebPlatform {
    pub fn new(
        window: Window,
        document: Document,
        on_frame: Dispatch<FrameId>,
        on_timer: Dispatch<TimerId>,
    ) -> Self {
        Self {
            window,
            document,
            on_frame,
            on_timer,
            next_token: 0,
            frame: None,
            interval: None,
        }
    }

    fn next_token(&mut self) -> u32 {
        let token = self.next_token;
        self.next_token = self.next_token.wrapping_add(1);
        token
    }

    fn set_text(&self, id: &str, text: &str) {
        if let Some(el) = self.document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_popup_visible(&self, visible: bool) {
        if let Some(el) = self.document.get_element_by_id("popup") {
            let class = if visible { "" } else { "hidden" };
            let _ = el.set_attribute("class", class);
        }
    }
}

impl Platform for WebPlatform {
    fn viewport(&self) -> Viewport {
        let width = self
            .window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(800.0);
        let height = self
            .window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(600.0);
        Viewport::new(width as f32, height as f32)
    }

    fn start_interval(&mut self, period_ms: u32) -> TimerId {
        let id = TimerId(self.next_token());
        let on_timer = self.on_timer.clone();
        let closure = Closure::<dyn FnMut()>::new(move || on_timer(id));
        match self
            .window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                period_ms as i32,
            ) {
            Ok(handle) => self.interval = Some((id, handle, closure)),
            Err(e) => log::error!("setInterval failed: {:?}", e),
        }
        id
    }

    fn clear_interval(&mut self, id: TimerId) {
        if let Some((live, handle, closure)) = self.interval.take() {
            if live == id {
                self.window.clear_interval_with_handle(handle);
            } else {
                self.interval = Some((live, handle, closure));
            }
        }
    }

    fn request_frame(&mut self) -> FrameId {
        let id = FrameId(self.next_token());
        let on_frame = self.on_frame.clone();
        let closure = Closure::once(move |_time: f64| on_frame(id));
        match self
            .window
            .request_animation_frame(closure.as_ref().unchecked_ref())
        {
            Ok(handle) => self.frame = Some((id, handle)),
            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
        }
        closure.forget();
        id
    }

    fn cancel_frame(&mut self, id: FrameId) {
        if let Some((live, handle)) = self.frame {
            if live == id {
                let _ = self.window.cancel_animation_frame(handle);
                self.frame = None;
            }
        }
    }

    fn round_started(&mut self) {
        self.set_popup_visible(false);
    }

    fn score_changed(&mut self, score: u64) {
        self.set_text("score", &score.to_string());
    }

    fn round_over(&mut self, final_score: u64) {
        self.set_text("final-score", &final_score.to_string());
        self.set_popup_visible(true);
    }
}
