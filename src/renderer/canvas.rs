//! Canvas 2D renderer (browser only)

use std::f64::consts::TAU;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{Frame, Renderer};
use crate::sim::Circle;

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { ctx })
    }

    fn circle_path(&self, circle: &Circle) -> Result<(), JsValue> {
        self.ctx.begin_path();
        self.ctx.arc(
            circle.position.x as f64,
            circle.position.y as f64,
            circle.radius as f64,
            0.0,
            TAU,
        )?;
        self.ctx.close_path();
        Ok(())
    }
}

impl Renderer for CanvasRenderer {
    type Error = JsValue;

    fn draw(&mut self, frame: &Frame) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        ctx.set_fill_style_str("black");
        ctx.fill_rect(0.0, 0.0, frame.width as f64, frame.height as f64);

        // Ship: filled body, outlined hull
        self.circle_path(&frame.ship.body)?;
        ctx.set_fill_style_str("red");
        ctx.fill();

        let [nose, rear_right, rear_left] = frame.ship.hull;
        ctx.begin_path();
        ctx.move_to(nose.x as f64, nose.y as f64);
        ctx.line_to(rear_right.x as f64, rear_right.y as f64);
        ctx.line_to(rear_left.x as f64, rear_left.y as f64);
        ctx.close_path();
        ctx.set_stroke_style_str("white");
        ctx.stroke();

        ctx.set_fill_style_str("white");
        for projectile in &frame.projectiles {
            self.circle_path(projectile)?;
            ctx.fill();
        }

        for asteroid in &frame.asteroids {
            self.circle_path(asteroid)?;
            ctx.stroke();
        }

        Ok(())
    }
}
