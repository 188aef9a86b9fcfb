//! Canvas2D rendering
//!
//! Drawing is a pure function of the session state: background gradient,
//! then particles, then robots, back to front in each live set's insertion
//! order so later spawns land on top.

use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::sim::state::{Particle, Robot, SessionState};

pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into()?;
        Ok(Self { canvas, ctx })
    }

    /// Draw one frame of the session
    pub fn render(&self, state: &SessionState) -> Result<(), JsValue> {
        let w = self.canvas.width() as f64;
        let h = self.canvas.height() as f64;

        self.ctx.clear_rect(0.0, 0.0, w, h);

        let gradient = self.ctx.create_linear_gradient(0.0, 0.0, 0.0, h);
        gradient.add_color_stop(0.0, "#667eea")?;
        gradient.add_color_stop(1.0, "#764ba2")?;
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.ctx.fill_rect(0.0, 0.0, w, h);

        for particle in &state.particles {
            self.draw_particle(particle)?;
        }
        for robot in &state.robots {
            self.draw_robot(robot)?;
        }
        Ok(())
    }

    fn draw_particle(&self, particle: &Particle) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        ctx.save();
        ctx.set_global_alpha(particle.life.clamp(0.0, 1.0) as f64);
        ctx.set_fill_style_str(&hsl(particle.hue));
        ctx.begin_path();
        ctx.arc(
            particle.pos.x as f64,
            particle.pos.y as f64,
            particle.radius as f64,
            0.0,
            TAU,
        )?;
        ctx.fill();
        ctx.restore();
        Ok(())
    }

    fn draw_robot(&self, robot: &Robot) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let color = hsl(robot.hue);

        ctx.save();
        ctx.translate(robot.pos.x as f64, robot.pos.y as f64)?;

        // Head
        ctx.set_fill_style_str(&color);
        ctx.begin_path();
        ctx.arc(0.0, -10.0, 20.0, 0.0, TAU)?;
        ctx.fill();

        // Antennae
        ctx.set_stroke_style_str(&color);
        ctx.set_line_width(3.0);
        ctx.begin_path();
        ctx.move_to(-10.0, -25.0);
        ctx.line_to(-15.0, -35.0);
        ctx.move_to(10.0, -25.0);
        ctx.line_to(15.0, -35.0);
        ctx.stroke();

        // Eyes
        ctx.set_fill_style_str("#fff");
        ctx.begin_path();
        ctx.arc(-7.0, -12.0, 3.0, 0.0, TAU)?;
        ctx.arc(7.0, -12.0, 3.0, 0.0, TAU)?;
        ctx.fill();

        // Body, arms, legs
        ctx.set_fill_style_str(&color);
        ctx.fill_rect(-15.0, 5.0, 30.0, 25.0);
        ctx.fill_rect(-22.0, 8.0, 7.0, 20.0);
        ctx.fill_rect(15.0, 8.0, 7.0, 20.0);
        ctx.fill_rect(-12.0, 30.0, 7.0, 15.0);
        ctx.fill_rect(5.0, 30.0, 7.0, 15.0);

        ctx.restore();
        Ok(())
    }
}

fn hsl(hue: f32) -> String {
    format!("hsl({hue:.0}, 70%, 60%)")
}
