//! Debug drawing of constraints
//!
//! Springs are zigzag coils, ropes are dashed, every other kind is a solid
//! line. Anchors get a filled dot. Broken or hidden constraints are skipped.

use std::f64::consts::TAU;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::core::Vec2;
use crate::domain::{Body, Constraint, ConstraintKind};

const SPRING_COILS: usize = 12;
const SPRING_AMPLITUDE: f32 = 6.0;
const ROPE_DASH: [f32; 2] = [6.0, 4.0];

/// Drawing sink with the canvas 2D path primitives the overlay needs
pub trait DrawSurface {
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f32, y: f32);
    fn line_to(&mut self, x: f32, y: f32);
    fn arc(&mut self, x: f32, y: f32, radius: f32, start: f32, end: f32);
    fn stroke(&mut self);
    fn fill(&mut self);
    fn set_stroke_style(&mut self, color: &str);
    fn set_fill_style(&mut self, color: &str);
    fn set_line_width(&mut self, width: f32);
    /// Empty pattern = solid line
    fn set_line_dash(&mut self, pattern: &[f32]);
}

impl DrawSurface for CanvasRenderingContext2d {
    fn begin_path(&mut self) {
        CanvasRenderingContext2d::begin_path(self);
    }

    fn move_to(&mut self, x: f32, y: f32) {
        CanvasRenderingContext2d::move_to(self, x as f64, y as f64);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        CanvasRenderingContext2d::line_to(self, x as f64, y as f64);
    }

    fn arc(&mut self, x: f32, y: f32, radius: f32, start: f32, end: f32) {
        if let Err(e) = CanvasRenderingContext2d::arc(self, x as f64, y as f64, radius as f64, start as f64, end as f64) {
            log_warn!("arc at ({}, {}) radius {} rejected: {:?}", x, y, radius, e);
        }
    }

    fn stroke(&mut self) {
        CanvasRenderingContext2d::stroke(self);
    }

    fn fill(&mut self) {
        CanvasRenderingContext2d::fill(self);
    }

    fn set_stroke_style(&mut self, color: &str) {
        self.set_stroke_style_str(color);
    }

    fn set_fill_style(&mut self, color: &str) {
        self.set_fill_style_str(color);
    }

    fn set_line_width(&mut self, width: f32) {
        CanvasRenderingContext2d::set_line_width(self, width as f64);
    }

    fn set_line_dash(&mut self, pattern: &[f32]) {
        let segments = js_sys::Array::new();
        for v in pattern {
            segments.push(&JsValue::from_f64(*v as f64));
        }
        if let Err(e) = CanvasRenderingContext2d::set_line_dash(self, &segments) {
            log_warn!("line dash {:?} rejected: {:?}", pattern, e);
        }
    }
}

/// Draw every visible, unbroken constraint whose bodies are present
pub fn render_constraints<S: DrawSurface + ?Sized>(constraints: &[Constraint], bodies: &[Body], surface: &mut S) {
    for c in constraints {
        if c.is_broken() || !c.render.visible {
            continue;
        }
        let Some(a) = bodies.iter().find(|b| b.id == c.body_a) else {
            continue;
        };
        let start = a.local_to_world(c.anchor_a);
        let end = match c.body_b {
            Some(id) => match bodies.iter().find(|b| b.id == id) {
                Some(b) => b.local_to_world(c.anchor_b),
                None => continue,
            },
            None => c.world_point,
        };

        surface.set_stroke_style(&c.render.color);
        surface.set_line_width(c.render.line_width);

        match c.kind {
            ConstraintKind::Spring => draw_coil(surface, start, end),
            ConstraintKind::Rope => {
                surface.set_line_dash(&ROPE_DASH);
                draw_line(surface, start, end);
                surface.set_line_dash(&[]);
            }
            ConstraintKind::Distance
            | ConstraintKind::Pin
            | ConstraintKind::Revolute
            | ConstraintKind::Prismatic
            | ConstraintKind::Weld => draw_line(surface, start, end),
        }

        if c.render.anchor_radius < 0.0 {
            log_warn!("constraint {}: negative anchor radius {}, dots skipped", c.id, c.render.anchor_radius);
            continue;
        }
        surface.set_fill_style(&c.render.color);
        draw_dot(surface, start, c.render.anchor_radius);
        draw_dot(surface, end, c.render.anchor_radius);
    }
}

fn draw_line<S: DrawSurface + ?Sized>(surface: &mut S, from: Vec2, to: Vec2) {
    surface.begin_path();
    surface.move_to(from.x, from.y);
    surface.line_to(to.x, to.y);
    surface.stroke();
}

fn draw_dot<S: DrawSurface + ?Sized>(surface: &mut S, center: Vec2, radius: f32) {
    surface.begin_path();
    surface.arc(center.x, center.y, radius, 0.0, TAU as f32);
    surface.fill();
}

/// Zigzag between the anchors with short straight leads at each end
fn draw_coil<S: DrawSurface + ?Sized>(surface: &mut S, from: Vec2, to: Vec2) {
    let axis = to - from;
    let length = axis.length();
    if length <= f32::EPSILON {
        return;
    }
    let dir = axis / length;
    let side = dir.perp() * SPRING_AMPLITUDE.min(length * 0.25);
    let lead = length * 0.1;
    let coil_len = length - 2.0 * lead;

    surface.begin_path();
    surface.move_to(from.x, from.y);
    let coil_start = from + dir * lead;
    surface.line_to(coil_start.x, coil_start.y);
    for i in 0..SPRING_COILS {
        let t = (i as f32 + 0.5) / SPRING_COILS as f32;
        let offset = if i % 2 == 0 { side } else { -side };
        let p = coil_start + dir * (coil_len * t) + offset;
        surface.line_to(p.x, p.y);
    }
    let coil_end = to - dir * lead;
    surface.line_to(coil_end.x, coil_end.y);
    surface.line_to(to.x, to.y);
    surface.stroke();
}
