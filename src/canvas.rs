use egui::epaint::CubicBezierShape;
use egui::{Align2, Color32, FontId, Pos2, Rect, Stroke, TextureId, Vec2};

/// Text measurement capability used by the layout engine and the canvas
pub trait TextMeasure {
    /// Width in pixels of `text` laid out on a single line in `font`
    fn text_width(&self, text: &str, font: &FontId) -> f32;
}

/// Measures text with the fonts of a running egui context.
///
/// Only valid inside a frame, since egui loads its fonts on the first pass.
#[derive(Debug, Clone)]
pub struct EguiMeasure {
    ctx: egui::Context,
}

impl EguiMeasure {
    pub fn new(ctx: &egui::Context) -> Self {
        Self { ctx: ctx.clone() }
    }
}

impl TextMeasure for EguiMeasure {
    fn text_width(&self, text: &str, font: &FontId) -> f32 {
        self.ctx.fonts(|fonts| {
            fonts
                .layout_no_wrap(text.to_owned(), font.clone(), Color32::BLACK)
                .size()
                .x
        })
    }
}

/// Horizontal anchor of a text run. Text is always anchored at its top edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

impl TextAlign {
    fn anchor(self) -> Align2 {
        match self {
            TextAlign::Left => Align2::LEFT_TOP,
            TextAlign::Center => Align2::CENTER_TOP,
        }
    }
}

/// One segment of a stroked path
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathOp {
    MoveTo(Pos2),
    LineTo(Pos2),
    CubicTo { c1: Pos2, c2: Pos2, to: Pos2 },
}

/// Immediate-mode 2D drawing surface.
///
/// Coordinates are canvas-local pixels with the origin at the top-left corner.
pub trait Surface: TextMeasure {
    fn clear_rect(&mut self, rect: Rect);
    fn fill_rect(&mut self, rect: Rect, color: Color32);
    fn fill_text(&mut self, text: &str, pos: Pos2, align: TextAlign, font: &FontId, color: Color32);
    fn stroke_path(&mut self, path: &[PathOp], stroke: Stroke);
    fn draw_image(&mut self, texture: TextureId, rect: Rect);
}

/// A recorded drawing operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear {
        rect: Rect,
    },
    FillRect {
        rect: Rect,
        color: Color32,
    },
    Text {
        text: String,
        pos: Pos2,
        align: TextAlign,
        font: FontId,
        color: Color32,
        bounds: Rect,
    },
    Path {
        ops: Vec<PathOp>,
        stroke: Stroke,
        bounds: Rect,
    },
    Image {
        texture: TextureId,
        rect: Rect,
    },
}

impl DrawCommand {
    /// Area this command may have painted
    pub fn bounds(&self) -> Rect {
        match self {
            DrawCommand::Clear { rect }
            | DrawCommand::FillRect { rect, .. }
            | DrawCommand::Image { rect, .. } => *rect,
            DrawCommand::Text { bounds, .. } | DrawCommand::Path { bounds, .. } => *bounds,
        }
    }
}

/// Retained drawing surface.
///
/// Keeps everything drawn so far as a display list and replays it onto an
/// `egui::Painter` every frame. Clearing a rect drops every
/// earlier command that lies fully inside it, so repeated clear+redraw cycles
/// keep the list bounded.
pub struct Canvas {
    commands: Vec<DrawCommand>,
    background: Color32,
    measure: Box<dyn TextMeasure>,
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("commands", &self.commands.len())
            .field("background", &self.background)
            .finish()
    }
}

impl Canvas {
    pub fn new(measure: Box<dyn TextMeasure>, background: Color32) -> Self {
        Self {
            commands: Vec::new(),
            background,
            measure,
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Forgets everything drawn so far
    pub fn clear_all(&mut self) {
        self.commands.clear();
    }

    /// Replays the display list with the canvas' top-left corner at `origin`
    pub fn paint(&self, painter: &egui::Painter, origin: Pos2) {
        let offset = origin.to_vec2();
        for command in &self.commands {
            match command {
                DrawCommand::Clear { rect } => {
                    painter.rect_filled(rect.translate(offset), 0.0, self.background);
                }
                DrawCommand::FillRect { rect, color } => {
                    painter.rect_filled(rect.translate(offset), 0.0, *color);
                }
                DrawCommand::Text {
                    text,
                    pos,
                    align,
                    font,
                    color,
                    ..
                } => {
                    painter.text(*pos + offset, align.anchor(), text, font.clone(), *color);
                }
                DrawCommand::Path { ops, stroke, .. } => paint_path(painter, ops, *stroke, offset),
                DrawCommand::Image { texture, rect } => {
                    let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
                    painter.image(*texture, rect.translate(offset), uv, Color32::WHITE);
                }
            }
        }
    }
}

fn paint_path(painter: &egui::Painter, ops: &[PathOp], stroke: Stroke, offset: Vec2) {
    let mut cursor: Option<Pos2> = None;
    for op in ops {
        match *op {
            PathOp::MoveTo(to) => cursor = Some(to + offset),
            PathOp::LineTo(to) => {
                let to = to + offset;
                if let Some(from) = cursor {
                    painter.line_segment([from, to], stroke);
                }
                cursor = Some(to);
            }
            PathOp::CubicTo { c1, c2, to } => {
                let to = to + offset;
                if let Some(from) = cursor {
                    painter.add(CubicBezierShape::from_points_stroke(
                        [from, c1 + offset, c2 + offset, to],
                        false,
                        Color32::TRANSPARENT,
                        stroke,
                    ));
                }
                cursor = Some(to);
            }
        }
    }
}

fn path_bounds(ops: &[PathOp], stroke: Stroke) -> Rect {
    let mut bounds = Rect::NOTHING;
    for op in ops {
        match *op {
            PathOp::MoveTo(p) | PathOp::LineTo(p) => bounds.extend_with(p),
            PathOp::CubicTo { c1, c2, to } => {
                bounds.extend_with(c1);
                bounds.extend_with(c2);
                bounds.extend_with(to);
            }
        }
    }
    bounds.expand(stroke.width / 2.0)
}

impl TextMeasure for Canvas {
    fn text_width(&self, text: &str, font: &FontId) -> f32 {
        self.measure.text_width(text, font)
    }
}

impl Surface for Canvas {
    fn clear_rect(&mut self, rect: Rect) {
        self.commands.retain(|command| !rect.contains_rect(command.bounds()));
        if self.commands.iter().any(|command| command.bounds().intersects(rect)) {
            self.commands.push(DrawCommand::Clear { rect });
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Color32) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn fill_text(&mut self, text: &str, pos: Pos2, align: TextAlign, font: &FontId, color: Color32) {
        let width = self.text_width(text, font);
        let left = match align {
            TextAlign::Left => pos.x,
            TextAlign::Center => pos.x - width / 2.0,
        };
        let bounds = Rect::from_min_size(Pos2::new(left, pos.y), Vec2::new(width, font.size));
        self.commands.push(DrawCommand::Text {
            text: text.to_owned(),
            pos,
            align,
            font: font.clone(),
            color,
            bounds,
        });
    }

    fn stroke_path(&mut self, path: &[PathOp], stroke: Stroke) {
        self.commands.push(DrawCommand::Path {
            ops: path.to_vec(),
            stroke,
            bounds: path_bounds(path, stroke),
        });
    }

    fn draw_image(&mut self, texture: TextureId, rect: Rect) {
        self.commands.push(DrawCommand::Image { texture, rect });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};

    struct HalfEm;

    impl TextMeasure for HalfEm {
        fn text_width(&self, text: &str, font: &FontId) -> f32 {
            text.chars().count() as f32 * font.size / 2.0
        }
    }

    fn canvas() -> Canvas {
        Canvas::new(Box::new(HalfEm), Color32::WHITE)
    }

    #[test]
    fn test_text_bounds_follow_alignment() {
        let mut canvas = canvas();
        let font = FontId::proportional(20.0);
        canvas.fill_text("abcd", pos2(100.0, 10.0), TextAlign::Center, &font, Color32::BLACK);
        canvas.fill_text("ab", pos2(100.0, 10.0), TextAlign::Left, &font, Color32::BLACK);

        assert_eq!(
            canvas.commands()[0].bounds(),
            Rect::from_min_size(pos2(80.0, 10.0), vec2(40.0, 20.0))
        );
        assert_eq!(
            canvas.commands()[1].bounds(),
            Rect::from_min_size(pos2(100.0, 10.0), vec2(20.0, 20.0))
        );
    }

    #[test]
    fn test_clear_drops_contained_commands() {
        let mut canvas = canvas();
        let font = FontId::proportional(10.0);
        canvas.fill_rect(Rect::from_min_size(pos2(0.0, 0.0), vec2(10.0, 10.0)), Color32::RED);
        canvas.fill_text("x", pos2(200.0, 0.0), TextAlign::Left, &font, Color32::BLACK);

        canvas.clear_rect(Rect::from_min_size(pos2(-1.0, -1.0), vec2(20.0, 20.0)));

        assert_eq!(canvas.commands().len(), 1);
        assert!(matches!(canvas.commands()[0], DrawCommand::Text { .. }));
    }

    #[test]
    fn test_clear_over_partial_overlap_is_recorded() {
        let mut canvas = canvas();
        canvas.fill_rect(Rect::from_min_size(pos2(0.0, 0.0), vec2(100.0, 100.0)), Color32::RED);

        let cleared = Rect::from_min_size(pos2(10.0, 10.0), vec2(10.0, 10.0));
        canvas.clear_rect(cleared);

        assert_eq!(canvas.commands().len(), 2);
        assert_eq!(canvas.commands()[1], DrawCommand::Clear { rect: cleared });
    }

    #[test]
    fn test_clear_on_empty_area_records_nothing() {
        let mut canvas = canvas();
        canvas.clear_rect(Rect::from_min_size(pos2(10.0, 10.0), vec2(10.0, 10.0)));
        assert!(canvas.commands().is_empty());
    }

    #[test]
    fn test_path_bounds_include_control_points_and_stroke() {
        let mut canvas = canvas();
        let ops = [
            PathOp::MoveTo(pos2(0.0, 50.0)),
            PathOp::CubicTo {
                c1: pos2(10.0, 40.0),
                c2: pos2(30.0, 40.0),
                to: pos2(40.0, 50.0),
            },
        ];
        canvas.stroke_path(&ops, Stroke::new(2.0, Color32::RED));
        assert_eq!(
            canvas.commands()[0].bounds(),
            Rect::from_min_max(pos2(-1.0, 39.0), pos2(41.0, 51.0))
        );
    }
}
