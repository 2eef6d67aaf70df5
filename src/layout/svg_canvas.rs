//! [`Canvas`] that emits an SVG document.

use std::fmt::Write as _;
use std::mem;

use glam::Vec2;
use svg::node::element::{Ellipse, Line, Polygon, Rectangle, Text};
use svg::Document;

use super::canvas::{Canvas, PixelRect, TextAlign};
use crate::color::Rgb;

/// SVG surface of a fixed pixel size with a solid background.
#[derive(Debug)]
pub struct SvgCanvas {
    document: Document,
}

const FONT_FAMILY: &str = "monospace";

impl SvgCanvas {
    /// Surface of `size` pixels filled with `background`.
    #[must_use]
    pub fn new(size: Vec2, background: Rgb) -> Self {
        let document = Document::new()
            .set("viewBox", (0.0, 0.0, size.x, size.y))
            .set("width", size.x)
            .set("height", size.y)
            .add(
                Rectangle::new()
                    .set("x", 0)
                    .set("y", 0)
                    .set("width", size.x)
                    .set("height", size.y)
                    .set("fill", background.to_hex()),
            );
        Self { document }
    }

    fn push(&mut self, node: impl Into<Box<dyn svg::Node>>) {
        let document = mem::replace(&mut self.document, Document::new());
        self.document = document.add(node);
    }

    /// Serialized SVG text.
    #[must_use]
    pub fn finish(self) -> String {
        self.document.to_string()
    }
}

impl Canvas for SvgCanvas {
    fn fill_rect(&mut self, rect: PixelRect, radius: f32, color: Rgb) {
        let mut node = Rectangle::new()
            .set("x", rect.min.x)
            .set("y", rect.min.y)
            .set("width", rect.width().max(0.0))
            .set("height", rect.height().max(0.0))
            .set("fill", color.to_hex());
        if radius > 0.0 {
            node = node.set("rx", radius).set("ry", radius);
        }
        self.push(node);
    }

    fn fill_ellipse(&mut self, rect: PixelRect, color: Rgb) {
        let center = rect.center();
        self.push(
            Ellipse::new()
                .set("cx", center.x)
                .set("cy", center.y)
                .set("rx", rect.width().max(0.0) * 0.5)
                .set("ry", rect.height().max(0.0) * 0.5)
                .set("fill", color.to_hex()),
        );
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Rgb) {
        let mut data = String::new();
        for p in points {
            if !data.is_empty() {
                data.push(' ');
            }
            let _ = write!(data, "{},{}", p.x, p.y);
        }
        self.push(
            Polygon::new()
                .set("points", data)
                .set("fill", color.to_hex()),
        );
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgb) {
        self.push(
            Line::new()
                .set("x1", from.x)
                .set("y1", from.y)
                .set("x2", to.x)
                .set("y2", to.y)
                .set("stroke", color.to_hex())
                .set("stroke-width", width),
        );
    }

    fn draw_text(
        &mut self,
        position: Vec2,
        text: &str,
        size: f32,
        align: TextAlign,
        color: Rgb,
    ) {
        let anchor = match align {
            TextAlign::Start => "start",
            TextAlign::Middle => "middle",
            TextAlign::End => "end",
        };
        let node = Text::new(text)
            .set("x", position.x)
            .set("y", position.y)
            .set("text-anchor", anchor)
            .set("font-family", FONT_FAMILY)
            .set("font-size", size)
            .set("fill", color.to_hex());
        self.push(node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emits_shapes_and_text() {
        let mut canvas = SvgCanvas::new(Vec2::new(200.0, 50.0), Rgb::new(255, 255, 255));
        let blue = Rgb::new(0, 0, 255);
        canvas.fill_rect(PixelRect::from_bounds(1.0, 11.0, 2.0, 8.0), 2.0, blue);
        canvas.fill_ellipse(PixelRect::from_bounds(0.0, 10.0, 0.0, 4.0), blue);
        canvas.fill_polygon(&[Vec2::ZERO, Vec2::new(4.0, 0.0), Vec2::new(2.0, 3.0)], blue);
        canvas.stroke_line(Vec2::ZERO, Vec2::ONE, 1.5, blue);
        canvas.draw_text(Vec2::new(5.0, 20.0), "A-B", 12.0, TextAlign::End, blue);
        let svg = canvas.finish();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("<rect"));
        assert!(svg.contains("rx=\"2\""));
        assert!(svg.contains("<ellipse"));
        assert!(svg.contains("points=\"0,0 4,0 2,3\""));
        assert!(svg.contains("<line"));
        assert!(svg.contains("text-anchor=\"end\""));
        assert!(svg.contains("A-B"));
        assert!(svg.contains("#0000ff"));
    }
}
