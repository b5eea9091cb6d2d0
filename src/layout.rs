//! Pixel geometry of the exercise.
//!
//! Everything here is derived from the canvas size, the ruler sprite size, the
//! exercise and the font metrics. A [`Layout`] is always computed as a whole and
//! replaced as a whole; nothing patches it afterwards.
//!
//! Intermediate values are truncated toward zero to whole pixels so the
//! arrows line up with the ticks of a pixel ruler sprite.

use crate::canvas::TextMeasure;
use crate::config::Theme;
use crate::exercise::{Exercise, Operand};
use egui::{Align, Color32, FontId, Pos2, Rect, Stroke, Vec2, pos2, vec2};

pub const EQUATION_FONT_SIZE: f32 = 48.0;
pub const EQUATION_TOP: f32 = 30.0;
pub const MARK_PADDING: f32 = 2.0;

/// Offset of the "0" tick from the left edge of the ruler sprite
pub const RULER_ZERO_POS: f32 = 35.0;
/// Distance between two unit ticks of the ruler sprite
pub const RULER_STEP: f32 = 39.0;
pub const RULER_BOTTOM_MARGIN: f32 = 20.0;
/// Vertical position of the arrows' endpoints below the ruler's top edge
pub const ARROW_BASELINE: f32 = 20.0;

pub const ARROW_CAP_WIDTH: f32 = 5.0;
pub const ARROW_CAP_LENGTH: f32 = 3.0 * ARROW_CAP_WIDTH;
pub const ARROW_LINE_WIDTH: f32 = 2.0;
pub const ARROW_FONT_SIZE: f32 = 36.0;
/// Space between the arrow's top and its value label or input field
pub const ARROW_VALUE_GAP: f32 = 20.0;

/// Empirical correction of the arrow's apex, in pixels per ruler unit.
///
/// Only accurate (to about a pixel) when the control points sit at a quarter of
/// the arrow's span; other bend amounts need their own constant.
pub const ARROW_TOP_CORRECTION: f32 = 22.0 / 9.0;

/// Top line holding `a + b = ?`
#[derive(Debug, Clone, PartialEq)]
pub struct EquationLayout {
    pub equation_text: String,
    pub result_text: String,
    pub font: FontId,
    /// Width of the full solved equation
    pub width: f32,
    pub left: f32,
    pub top: f32,
    pub op_left: [f32; 2],
    pub op_width: [f32; 2],
    pub result_left: f32,
    pub text_color: Color32,
    pub mark_color: Color32,
    pub mark_padding: f32,
}

impl EquationLayout {
    pub fn compute(canvas_width: f32, exercise: &Exercise, theme: &Theme, measure: &dyn TextMeasure) -> Self {
        let font = FontId::proportional(EQUATION_FONT_SIZE);
        let equation_text = exercise.equation_text();
        let result_text = exercise.result_text();

        let width = measure
            .text_width(&format!("{equation_text}{result_text}"), &font)
            .trunc();
        let left = ((canvas_width - width) / 2.0).trunc();
        let op_left = [
            left,
            (left + measure.text_width(&format!("{} + ", exercise.a()), &font)).trunc(),
        ];
        let op_width = [
            measure.text_width(&exercise.a().to_string(), &font).trunc(),
            measure.text_width(&exercise.b().to_string(), &font).trunc(),
        ];
        let result_left = (left + measure.text_width(&equation_text, &font)).trunc();

        Self {
            equation_text,
            result_text,
            font,
            width,
            left,
            top: EQUATION_TOP,
            op_left,
            op_width,
            result_left,
            text_color: theme.text.color(),
            mark_color: theme.mark.color(),
            mark_padding: MARK_PADDING,
        }
    }

    /// Area wiped before the line is redrawn, wide enough to cover any mark
    pub fn clear_rect(&self) -> Rect {
        Rect::from_min_size(
            pos2(self.left - self.mark_padding, self.top),
            vec2(self.width + 2.0 * self.mark_padding, self.font.size),
        )
    }

    /// Highlight behind one operand
    pub fn mark_rect(&self, operand: Operand) -> Rect {
        let i = operand.index();
        Rect::from_min_size(
            pos2(self.op_left[i] - self.mark_padding, self.top),
            vec2(self.op_width[i] + 2.0 * self.mark_padding, self.font.size),
        )
    }

    pub fn text_pos(&self) -> Pos2 {
        pos2(self.left, self.top)
    }

    pub fn result_pos(&self) -> Pos2 {
        pos2(self.result_left, self.top)
    }

    /// Two-character input over the result slot
    pub fn result_field(&self) -> FieldPlacement {
        FieldPlacement {
            pos: pos2(self.result_left, self.top - 1.0),
            width: 2.0 * self.font.size,
            font: self.font.clone(),
            align: Align::LEFT,
            max_len: 2,
        }
    }
}

/// Ruler sprite placement: centered, a fixed margin above the canvas bottom
#[derive(Debug, Clone, PartialEq)]
pub struct RulerLayout {
    pub left: f32,
    pub top: f32,
    pub size: Vec2,
    pub zero_pos: f32,
    pub step: f32,
}

impl RulerLayout {
    pub fn compute(canvas: Vec2, sprite_size: Vec2) -> Self {
        Self {
            left: ((canvas.x - sprite_size.x) / 2.0).trunc(),
            top: canvas.y - sprite_size.y - RULER_BOTTOM_MARGIN,
            size: sprite_size,
            zero_pos: RULER_ZERO_POS,
            step: RULER_STEP,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_min_size(pos2(self.left, self.top), self.size)
    }

    /// Canvas x coordinate of ruler position `unit`
    pub fn unit_x(&self, unit: u32) -> f32 {
        self.left + self.zero_pos + unit as f32 * self.step
    }
}

/// Span between two ruler positions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arrow {
    pub start: u32,
    pub end: u32,
}

impl Arrow {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn value(self) -> u32 {
        self.end - self.start
    }
}

/// Geometry of one arrow, its cap, and its label or input slot
#[derive(Debug, Clone, PartialEq)]
pub struct ArrowLayout {
    pub arrow: Arrow,
    pub left: f32,
    pub right: f32,
    pub center: f32,
    /// Length of the bezier control arms; sets how far the arrow bends
    pub control: f32,
    pub bottom: f32,
    /// Approximate apex of the curve, within a pixel
    pub top: f32,
    pub cap_width: f32,
    pub cap_length: f32,
    pub stroke: Stroke,
    pub font: FontId,
    pub label_color: Color32,
    pub value_gap: f32,
}

impl ArrowLayout {
    pub fn compute(arrow: Arrow, ruler: &RulerLayout, theme: &Theme) -> Self {
        let left = ruler.unit_x(arrow.start);
        let right = ruler.unit_x(arrow.end);
        let control = ((right - left) / 4.0).trunc();
        let bottom = ruler.top + ARROW_BASELINE;
        let top = (bottom - control + arrow.value() as f32 * ARROW_TOP_CORRECTION).trunc();

        Self {
            arrow,
            left,
            right,
            center: ((left + right) / 2.0).trunc(),
            control,
            bottom,
            top,
            cap_width: ARROW_CAP_WIDTH,
            cap_length: ARROW_CAP_LENGTH,
            stroke: Stroke::new(ARROW_LINE_WIDTH, theme.arrow.color()),
            font: FontId::proportional(ARROW_FONT_SIZE),
            label_color: theme.text.color(),
            value_gap: ARROW_VALUE_GAP,
        }
    }

    pub fn start(&self) -> Pos2 {
        pos2(self.left, self.bottom)
    }

    pub fn end(&self) -> Pos2 {
        pos2(self.right, self.bottom)
    }

    /// The two bezier control points
    pub fn controls(&self) -> [Pos2; 2] {
        let y = self.bottom - self.control;
        [pos2(self.left + self.control, y), pos2(self.right - self.control, y)]
    }

    /// Outer ends of the two cap strokes meeting at the right endpoint
    pub fn cap_points(&self) -> [Pos2; 2] {
        [
            pos2(self.right - self.cap_width, self.bottom - self.cap_length),
            pos2(self.right - self.cap_length, self.bottom - self.cap_width),
        ]
    }

    /// Top-center anchor of the value label
    pub fn label_pos(&self) -> Pos2 {
        pos2(self.center, self.top - self.value_gap - self.font.size)
    }

    /// One-character input over the arrow, where the label would go
    pub fn field(&self) -> FieldPlacement {
        FieldPlacement {
            pos: pos2(
                self.center - (self.font.size / 2.0).trunc(),
                self.top - self.value_gap - 1.0 - self.font.size,
            ),
            width: self.font.size,
            font: self.font.clone(),
            align: Align::Center,
            max_len: 1,
        }
    }
}

/// Where and how an input field sits over the canvas
#[derive(Debug, Clone, PartialEq)]
pub struct FieldPlacement {
    /// Top-left corner in canvas coordinates
    pub pos: Pos2,
    pub width: f32,
    pub font: FontId,
    pub align: Align,
    pub max_len: usize,
}

/// Complete geometry for one canvas size and one exercise
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub canvas: Vec2,
    pub equation: EquationLayout,
    pub ruler: RulerLayout,
    pub arrows: [ArrowLayout; 2],
}

impl Layout {
    pub fn compute(
        canvas: Vec2,
        ruler_sprite: Vec2,
        exercise: &Exercise,
        theme: &Theme,
        measure: &dyn TextMeasure,
    ) -> Self {
        let canvas = vec2(canvas.x.trunc(), canvas.y.trunc());
        let equation = EquationLayout::compute(canvas.x, exercise, theme, measure);
        let ruler = RulerLayout::compute(canvas, ruler_sprite);
        let arrows = [Operand::A, Operand::B].map(|operand| {
            let (start, end) = exercise.span(operand);
            ArrowLayout::compute(Arrow::new(start, end), &ruler, theme)
        });

        Self {
            canvas,
            equation,
            ruler,
            arrows,
        }
    }

    pub fn arrow(&self, operand: Operand) -> &ArrowLayout {
        &self.arrows[operand.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every glyph is half an em wide
    struct HalfEm;

    impl TextMeasure for HalfEm {
        fn text_width(&self, text: &str, font: &FontId) -> f32 {
            text.chars().count() as f32 * font.size / 2.0
        }
    }

    fn layout() -> Layout {
        Layout::compute(
            vec2(800.0, 400.0),
            vec2(616.0, 52.0),
            &Exercise::new(6, 5),
            &Theme::default(),
            &HalfEm,
        )
    }

    #[test]
    fn test_equation_is_centered() {
        let equation = layout().equation;
        // "6 + 5 = 11" is 10 glyphs of 24px
        assert_eq!(equation.width, 240.0);
        assert_eq!(equation.left, 280.0);
        assert_eq!(equation.op_left, [280.0, 280.0 + 4.0 * 24.0]);
        assert_eq!(equation.op_width, [24.0, 24.0]);
        assert_eq!(equation.result_left, 280.0 + 8.0 * 24.0);
    }

    #[test]
    fn test_ruler_is_centered_above_bottom_margin() {
        let ruler = layout().ruler;
        assert_eq!(ruler.left, 92.0);
        assert_eq!(ruler.top, 400.0 - 52.0 - 20.0);
        assert_eq!(ruler.unit_x(0), 127.0);
        assert_eq!(ruler.unit_x(6), 127.0 + 6.0 * 39.0);
    }

    #[test]
    fn test_first_arrow_geometry() {
        let layout = layout();
        let arrow = layout.arrow(Operand::A);
        assert_eq!(arrow.arrow.value(), 6);
        assert_eq!(arrow.left, 127.0);
        assert_eq!(arrow.right, 361.0);
        assert_eq!(arrow.center, 244.0);
        assert_eq!(arrow.control, 58.0);
        assert_eq!(arrow.bottom, 348.0);
        // 348 - 58 + 6 * 22 / 9 = 304.67
        assert_eq!(arrow.top, 304.0);
        assert_eq!(arrow.label_pos(), pos2(244.0, 304.0 - 20.0 - 36.0));
        assert_eq!(arrow.controls(), [pos2(185.0, 290.0), pos2(303.0, 290.0)]);
        assert_eq!(arrow.cap_points(), [pos2(356.0, 333.0), pos2(346.0, 343.0)]);
    }

    #[test]
    fn test_second_arrow_starts_where_first_ends() {
        let layout = layout();
        assert_eq!(layout.arrow(Operand::B).arrow, Arrow::new(6, 11));
        assert_eq!(layout.arrow(Operand::B).left, layout.arrow(Operand::A).right);
    }

    #[test]
    fn test_field_placements() {
        let layout = layout();
        let operand = layout.arrow(Operand::A).field();
        assert_eq!(operand.pos, pos2(244.0 - 18.0, 304.0 - 20.0 - 1.0 - 36.0));
        assert_eq!(operand.width, 36.0);
        assert_eq!(operand.max_len, 1);

        let result = layout.equation.result_field();
        assert_eq!(result.pos, pos2(472.0, 29.0));
        assert_eq!(result.width, 96.0);
        assert_eq!(result.max_len, 2);
    }

    #[test]
    fn test_layout_is_deterministic() {
        assert_eq!(layout(), layout());
    }

    #[test]
    fn test_fractional_canvas_is_truncated() {
        let layout = Layout::compute(
            vec2(800.7, 400.9),
            vec2(616.0, 52.0),
            &Exercise::new(6, 5),
            &Theme::default(),
            &HalfEm,
        );
        assert_eq!(layout.canvas, vec2(800.0, 400.0));
        assert_eq!(layout.ruler.top, 328.0);
    }
}
