//! Connection geometry: where a terminal sits on the canvas.

use super::types::{Point, Side, Terminal};
use crate::components::Component;

/// Resolves terminals to canvas points for components of a fixed size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub width: f64,
    pub height: f64,
}

impl Geometry {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Midpoint of the left or right edge of the component's box.
    pub fn terminal_point(&self, component: &Component, terminal: Terminal) -> Point {
        let Point { x, y } = component.position;
        let mid_y = y + self.height / 2.0;
        match terminal.side() {
            Side::Left => Point::new(x, mid_y),
            Side::Right => Point::new(x + self.width, mid_y),
        }
    }
}
