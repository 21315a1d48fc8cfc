//! 2D canvas renderer for the clock face

use clock_core::{Renderer, Snapshot};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

const BACKGROUND: &str = "#000";
const FOREGROUND: &str = "#fff";
const HINT: &str = "#777";
const FOOTER_TEXT: &str = "To exit full screen, press Esc";

const CENTRE_LINE_WIDTH: f64 = 4.0;
const DASH_LENGTH: f64 = 15.0;
const DASH_PERIOD: f64 = 25.0;

const DIGIT_SIZE_MIN: f64 = 40.0;
const DIGIT_SIZE_MAX: f64 = 112.0;
const DIGIT_SIZE_FRACTION: f64 = 0.1;
const DIGIT_TOP_MARGIN: f64 = 24.0;
const FOOTER_SIZE: f64 = 14.0;
const FOOTER_MARGIN: f64 = 12.0;

pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    failed: bool,
}

impl CanvasRenderer {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2D context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| JsValue::from_str("Not a 2D context"))?;
        Ok(Self {
            canvas,
            ctx,
            failed: false,
        })
    }

    /// Match the backing store to the viewport size in CSS pixels
    pub fn set_size(&self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn paint(&self, snap: &Snapshot) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let w = snap.width as f64;
        let h = snap.height as f64;

        ctx.set_fill_style_str(BACKGROUND);
        ctx.fill_rect(0.0, 0.0, w, h);

        self.centre_line(w, h)?;

        ctx.set_fill_style_str(FOREGROUND);
        for paddle in [snap.left_paddle, snap.right_paddle] {
            ctx.fill_rect(
                paddle.x as f64,
                paddle.y as f64,
                paddle.w as f64,
                paddle.h as f64,
            );
        }

        if !snap.paused {
            ctx.begin_path();
            ctx.arc(
                snap.ball.x as f64,
                snap.ball.y as f64,
                snap.ball.r as f64,
                0.0,
                std::f64::consts::TAU,
            )?;
            ctx.fill();
        }

        self.digits(snap, w)?;
        self.footer(w, h)
    }

    fn centre_line(&self, w: f64, h: f64) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let dash = js_sys::Array::of2(
            &JsValue::from_f64(DASH_LENGTH),
            &JsValue::from_f64(DASH_PERIOD - DASH_LENGTH),
        );
        ctx.set_stroke_style_str(FOREGROUND);
        ctx.set_line_width(CENTRE_LINE_WIDTH);
        ctx.set_line_dash(&dash)?;
        ctx.begin_path();
        ctx.move_to(w / 2.0, 0.0);
        ctx.line_to(w / 2.0, h);
        ctx.stroke();
        ctx.set_line_dash(&js_sys::Array::new())
    }

    /// Hour left of the colon, minute right of it
    fn digits(&self, snap: &Snapshot, w: f64) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let size = digit_size(w);
        let mid = w / 2.0;

        ctx.set_fill_style_str(FOREGROUND);
        ctx.set_font(&format!("bold {}px \"Courier New\", monospace", size.round()));
        ctx.set_text_baseline("top");

        ctx.set_text_align("right");
        ctx.fill_text(&format!("{:02}", snap.hour_shown), mid - size * 0.3, DIGIT_TOP_MARGIN)?;
        ctx.set_text_align("center");
        ctx.fill_text(":", mid, DIGIT_TOP_MARGIN)?;
        ctx.set_text_align("left");
        ctx.fill_text(&format!("{:02}", snap.minute_shown), mid + size * 0.3, DIGIT_TOP_MARGIN)
    }

    fn footer(&self, w: f64, h: f64) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        ctx.set_fill_style_str(HINT);
        ctx.set_font(&format!("{}px sans-serif", FOOTER_SIZE));
        ctx.set_text_align("center");
        ctx.set_text_baseline("bottom");
        ctx.fill_text(FOOTER_TEXT, w / 2.0, h - FOOTER_MARGIN)
    }
}

impl Renderer for CanvasRenderer {
    fn draw(&mut self, snapshot: &Snapshot) {
        match self.paint(snapshot) {
            Ok(()) => self.failed = false,
            // Log once per run of failures, not every frame
            Err(err) if !self.failed => {
                self.failed = true;
                log::error!("Canvas draw failed: {:?}", err);
            }
            Err(_) => {}
        }
    }
}

fn digit_size(width: f64) -> f64 {
    (width * DIGIT_SIZE_FRACTION).clamp(DIGIT_SIZE_MIN, DIGIT_SIZE_MAX)
}
