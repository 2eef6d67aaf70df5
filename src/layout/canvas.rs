//! Drawing surface interface and an in-memory recorder.

use glam::Vec2;

use crate::color::Rgb;

/// Axis-aligned pixel rectangle, `min` inclusive, `max` exclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    /// Top-left corner.
    pub min: Vec2,
    /// Bottom-right corner.
    pub max: Vec2,
}

impl PixelRect {
    /// Rectangle from its corners.
    #[must_use]
    pub const fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Rectangle from `x_min..x_max` and `y_min..y_max`.
    #[must_use]
    pub const fn from_bounds(x_min: f32, x_max: f32, y_min: f32, y_max: f32) -> Self {
        Self::new(Vec2::new(x_min, y_min), Vec2::new(x_max, y_max))
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Centre point.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Rectangle shrunk by `dx` on the left/right and `dy` on top/bottom.
    #[must_use]
    pub fn inset(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.min + Vec2::new(dx, dy), self.max - Vec2::new(dx, dy))
    }
}

/// Horizontal anchoring of text relative to its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    /// Text starts at the position.
    #[default]
    Start,
    /// Text is centred on the position.
    Middle,
    /// Text ends at the position.
    End,
}

/// A surface that fills shapes and draws text at pixel coordinates.
pub trait Canvas {
    /// Fill a rectangle. `radius` rounds the corners.
    fn fill_rect(&mut self, rect: PixelRect, radius: f32, color: Rgb);

    /// Fill the ellipse inscribed in `rect`.
    fn fill_ellipse(&mut self, rect: PixelRect, color: Rgb);

    /// Fill a closed polygon.
    fn fill_polygon(&mut self, points: &[Vec2], color: Rgb);

    /// Stroke a straight line.
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgb);

    /// Draw text with its baseline at `position.y`.
    fn draw_text(
        &mut self,
        position: Vec2,
        text: &str,
        size: f32,
        align: TextAlign,
        color: Rgb,
    );
}

/// One recorded canvas call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// [`Canvas::fill_rect`].
    Rect {
        /// Filled area.
        rect: PixelRect,
        /// Corner radius.
        radius: f32,
        /// Fill colour.
        color: Rgb,
    },
    /// [`Canvas::fill_ellipse`].
    Ellipse {
        /// Bounding box.
        rect: PixelRect,
        /// Fill colour.
        color: Rgb,
    },
    /// [`Canvas::fill_polygon`].
    Polygon {
        /// Vertices in drawing order.
        points: Vec<Vec2>,
        /// Fill colour.
        color: Rgb,
    },
    /// [`Canvas::stroke_line`].
    Line {
        /// Start point.
        from: Vec2,
        /// End point.
        to: Vec2,
        /// Stroke width.
        width: f32,
        /// Stroke colour.
        color: Rgb,
    },
    /// [`Canvas::draw_text`].
    Text {
        /// Anchor point.
        position: Vec2,
        /// Drawn text.
        text: String,
        /// Font size.
        size: f32,
        /// Anchoring.
        align: TextAlign,
        /// Text colour.
        color: Rgb,
    },
}

/// Canvas that records every call, for inspection and replay.
#[derive(Debug, Clone, Default)]
pub struct RecordingCanvas {
    commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    /// Empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls in the order they were made.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Replay the recorded calls onto another canvas.
    pub fn replay(&self, target: &mut dyn Canvas) {
        for command in &self.commands {
            match command {
                DrawCommand::Rect { rect, radius, color } => {
                    target.fill_rect(*rect, *radius, *color);
                }
                DrawCommand::Ellipse { rect, color } => {
                    target.fill_ellipse(*rect, *color);
                }
                DrawCommand::Polygon { points, color } => {
                    target.fill_polygon(points, *color);
                }
                DrawCommand::Line {
                    from,
                    to,
                    width,
                    color,
                } => target.stroke_line(*from, *to, *width, *color),
                DrawCommand::Text {
                    position,
                    text,
                    size,
                    align,
                    color,
                } => target.draw_text(*position, text, *size, *align, *color),
            }
        }
    }
}

impl Canvas for RecordingCanvas {
    fn fill_rect(&mut self, rect: PixelRect, radius: f32, color: Rgb) {
        self.commands.push(DrawCommand::Rect {
            rect,
            radius,
            color,
        });
    }

    fn fill_ellipse(&mut self, rect: PixelRect, color: Rgb) {
        self.commands.push(DrawCommand::Ellipse { rect, color });
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Rgb) {
        self.commands.push(DrawCommand::Polygon {
            points: points.to_vec(),
            color,
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgb) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            width,
            color,
        });
    }

    fn draw_text(
        &mut self,
        position: Vec2,
        text: &str,
        size: f32,
        align: TextAlign,
        color: Rgb,
    ) {
        self.commands.push(DrawCommand::Text {
            position,
            text: text.to_owned(),
            size,
            align,
            color,
        });
    }
}
