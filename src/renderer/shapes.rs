//! Shape generation for 2D primitives
//!
//! Pixel space: origin top-left, y down. Everything is a triangle list.

use glam::Vec2;

use super::vertex::Vertex;

/// Outline thickness for blocks and the bar (px)
pub const OUTLINE_WIDTH: f32 = 2.0;
/// Grid line thickness (px)
pub const GRID_LINE_WIDTH: f32 = 1.0;

/// Filled axis-aligned rectangle (two triangles)
pub fn rect(pos: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let (x0, y0) = (pos.x, pos.y);
    let (x1, y1) = (pos.x + size.x, pos.y + size.y);

    vec![
        Vertex::new(x0, y0, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x1, y1, color),
    ]
}

/// Filled rectangle with a border drawn inside its edges
pub fn outlined_rect(pos: Vec2, size: Vec2, fill: [f32; 4], outline: [f32; 4]) -> Vec<Vertex> {
    let w = OUTLINE_WIDTH.min(size.x / 2.0).min(size.y / 2.0).max(0.0);

    let mut vertices = Vec::with_capacity(30);
    vertices.extend(rect(pos, size, fill));
    // Top, bottom, left, right
    vertices.extend(rect(pos, Vec2::new(size.x, w), outline));
    vertices.extend(rect(
        Vec2::new(pos.x, pos.y + size.y - w),
        Vec2::new(size.x, w),
        outline,
    ));
    vertices.extend(rect(pos, Vec2::new(w, size.y), outline));
    vertices.extend(rect(
        Vec2::new(pos.x + size.x - w, pos.y),
        Vec2::new(w, size.y),
        outline,
    ));
    vertices
}

/// Background grid with one line every `spacing` px, starting at 0
pub fn grid(width: f32, height: f32, spacing: f32, color: [f32; 4]) -> Vec<Vertex> {
    if spacing <= 0.0 || width <= 0.0 || height <= 0.0 {
        return Vec::new();
    }

    let cols = (width / spacing).floor() as u32 + 1;
    let rows = (height / spacing).floor() as u32 + 1;
    let mut vertices = Vec::with_capacity(((cols + rows) * 6) as usize);

    for i in 0..cols {
        let x = i as f32 * spacing;
        vertices.extend(rect(Vec2::new(x, 0.0), Vec2::new(GRID_LINE_WIDTH, height), color));
    }
    for j in 0..rows {
        let y = j as f32 * spacing;
        vertices.extend(rect(Vec2::new(0.0, y), Vec2::new(width, GRID_LINE_WIDTH), color));
    }

    vertices
}
