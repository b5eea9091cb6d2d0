// src/renderer.rs
use crate::canvas::{PathOp, Surface, TextAlign};
use crate::exercise::Operand;
use crate::layout::{ArrowLayout, EquationLayout, RulerLayout};
use egui::{FontId, TextureId, pos2};

/// Options for redrawing the equation line
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExerciseOptions {
    /// Operand to highlight behind its text
    pub mark: Option<Operand>,
    /// Draw the literal result instead of "?"
    pub solved: bool,
}

impl ExerciseOptions {
    pub fn neutral() -> Self {
        Self::default()
    }

    pub fn marked(mark: Option<Operand>) -> Self {
        Self { mark, solved: false }
    }

    pub fn solved() -> Self {
        Self {
            mark: None,
            solved: true,
        }
    }
}

/// Ruler image plus, for sprites without printed numbers, tick labels
#[derive(Debug, Clone, Copy)]
pub struct RulerArt {
    pub texture: TextureId,
    /// Number of unit ticks to label, `None` if the sprite carries its own
    pub labels: Option<u32>,
}

pub const RULER_LABEL_FONT_SIZE: f32 = 16.0;
/// Offset of the tick labels below the ruler's top edge
pub const RULER_LABEL_TOP: f32 = 32.0;

/// Wipes and redraws the equation line
pub fn draw_exercise<S: Surface + ?Sized>(surface: &mut S, equation: &EquationLayout, options: ExerciseOptions) {
    surface.clear_rect(equation.clear_rect());

    if let Some(operand) = options.mark {
        surface.fill_rect(equation.mark_rect(operand), equation.mark_color);
    }

    surface.fill_text(
        &equation.equation_text,
        equation.text_pos(),
        TextAlign::Left,
        &equation.font,
        equation.text_color,
    );

    let tail = if options.solved {
        equation.result_text.as_str()
    } else {
        "?"
    };
    surface.fill_text(
        tail,
        equation.result_pos(),
        TextAlign::Left,
        &equation.font,
        equation.text_color,
    );
}

/// Curved body from left to right endpoint plus a two-stroke cap at the right end
pub fn draw_arrow<S: Surface + ?Sized>(surface: &mut S, arrow: &ArrowLayout) {
    let [c1, c2] = arrow.controls();
    let [cap_top, cap_side] = arrow.cap_points();
    let path = [
        PathOp::MoveTo(arrow.start()),
        PathOp::CubicTo {
            c1,
            c2,
            to: arrow.end(),
        },
        PathOp::MoveTo(cap_top),
        PathOp::LineTo(arrow.end()),
        PathOp::LineTo(cap_side),
    ];
    surface.stroke_path(&path, arrow.stroke);
}

/// Arrow's numeric value centered above its apex
pub fn draw_value_label<S: Surface + ?Sized>(surface: &mut S, arrow: &ArrowLayout) {
    surface.fill_text(
        &arrow.arrow.value().to_string(),
        arrow.label_pos(),
        TextAlign::Center,
        &arrow.font,
        arrow.label_color,
    );
}

pub fn draw_ruler<S: Surface + ?Sized>(
    surface: &mut S,
    ruler: &RulerLayout,
    art: RulerArt,
    label_color: egui::Color32,
) {
    surface.draw_image(art.texture, ruler.rect());

    if let Some(count) = art.labels {
        let font = FontId::proportional(RULER_LABEL_FONT_SIZE);
        for unit in 0..=count {
            surface.fill_text(
                &unit.to_string(),
                pos2(ruler.unit_x(unit), ruler.top + RULER_LABEL_TOP),
                TextAlign::Center,
                &font,
                label_color,
            );
        }
    }
}
