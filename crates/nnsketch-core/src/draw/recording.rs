//! A surface that records drawing calls instead of painting them.

use crate::{
    color::Color,
    draw::{Image, Surface},
    geometry::Point,
};

/// One recorded [`Surface`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    BeginPath,
    MoveTo(Point),
    LineTo(Point),
    QuadraticCurveTo { control: Point, end: Point },
    BezierCurveTo {
        control1: Point,
        control2: Point,
        end: Point,
    },
    ClosePath,
    SetStrokeColor(Color),
    SetFillColor(Color),
    SetLineWidth(f32),
    Fill,
    /// A stroke, together with the global alpha in effect when it was issued.
    Stroke { alpha: f32 },
    SetGlobalAlpha(f32),
    DrawImage { image: Image, position: Point },
}

/// Records every drawing call in order.
///
/// Useful for tests and for embedders that replay a diagram onto a backend of
/// their own. Global alpha starts at `1.0`.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    commands: Vec<Command>,
    global_alpha: f32,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            global_alpha: 1.0,
        }
    }

    /// All recorded commands, oldest first.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Number of `stroke` calls recorded.
    pub fn stroke_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|command| matches!(command, Command::Stroke { .. }))
            .count()
    }

    /// Every recorded cubic bezier segment as `(start, control1, control2, end)`.
    ///
    /// The start is the most recent `move_to` before the segment.
    pub fn bezier_segments(&self) -> Vec<(Point, Point, Point, Point)> {
        let mut current = Point::default();
        let mut segments = Vec::new();
        for command in &self.commands {
            match command {
                Command::MoveTo(point) | Command::LineTo(point) => current = *point,
                Command::QuadraticCurveTo { end, .. } => current = *end,
                Command::BezierCurveTo {
                    control1,
                    control2,
                    end,
                } => {
                    segments.push((current, *control1, *control2, *end));
                    current = *end;
                }
                _ => {}
            }
        }
        segments
    }
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for RecordingSurface {
    fn begin_path(&mut self) {
        self.commands.push(Command::BeginPath);
    }

    fn move_to(&mut self, point: Point) {
        self.commands.push(Command::MoveTo(point));
    }

    fn line_to(&mut self, point: Point) {
        self.commands.push(Command::LineTo(point));
    }

    fn quadratic_curve_to(&mut self, control: Point, end: Point) {
        self.commands.push(Command::QuadraticCurveTo { control, end });
    }

    fn bezier_curve_to(&mut self, control1: Point, control2: Point, end: Point) {
        self.commands.push(Command::BezierCurveTo {
            control1,
            control2,
            end,
        });
    }

    fn close_path(&mut self) {
        self.commands.push(Command::ClosePath);
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.commands.push(Command::SetStrokeColor(color));
    }

    fn set_fill_color(&mut self, color: Color) {
        self.commands.push(Command::SetFillColor(color));
    }

    fn set_line_width(&mut self, width: f32) {
        self.commands.push(Command::SetLineWidth(width));
    }

    fn fill(&mut self) {
        self.commands.push(Command::Fill);
    }

    fn stroke(&mut self) {
        self.commands.push(Command::Stroke {
            alpha: self.global_alpha,
        });
    }

    fn global_alpha(&self) -> f32 {
        self.global_alpha
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.global_alpha = alpha;
        self.commands.push(Command::SetGlobalAlpha(alpha));
    }

    fn draw_image(&mut self, image: &Image, position: Point) {
        self.commands.push(Command::DrawImage {
            image: image.clone(),
            position,
        });
    }
}
