use crate::canvas::Canvas;
use crate::config::Theme;
use crate::exercise::Operand;
use crate::field::{FieldId, FieldOverlay, FieldSlot, FieldTone};
use crate::layout::Layout;
use crate::renderer::{self, ExerciseOptions, RulerArt};
use egui::Color32;

/// What the stage controller draws and edits through
pub trait View {
    fn draw_exercise(&mut self, options: ExerciseOptions);
    /// Draws the arrow of `operand` together with its value label
    fn draw_arrow(&mut self, operand: Operand);
    fn draw_value_label(&mut self, operand: Operand);
    /// Attaches a focused one-digit field over the arrow of `operand`
    fn create_operand_input(&mut self, operand: Operand) -> FieldId;
    /// Attaches a focused two-digit field over the result slot
    fn create_result_input(&mut self) -> FieldId;
    fn set_field_tone(&mut self, field: FieldId, tone: FieldTone);
    fn remove_field(&mut self, field: FieldId);
}

/// The concrete view: a retained canvas plus the field overlay on top of it
#[derive(Debug)]
pub struct CanvasView {
    layout: Layout,
    canvas: Canvas,
    overlay: FieldOverlay,
    ruler: RulerArt,
    text_color: Color32,
    error_color: Color32,
}

impl CanvasView {
    /// Takes over `canvas` and draws the ruler on it
    pub fn new(layout: Layout, canvas: Canvas, ruler: RulerArt, theme: &Theme) -> Self {
        let mut view = Self {
            layout,
            canvas,
            overlay: FieldOverlay::new(),
            ruler,
            text_color: theme.text.color(),
            error_color: theme.error.color(),
        };
        view.draw_ruler();
        view
    }

    fn draw_ruler(&mut self) {
        renderer::draw_ruler(&mut self.canvas, &self.layout.ruler, self.ruler, self.text_color);
    }

    /// Switches to freshly computed geometry.
    ///
    /// The canvas is wiped down to the ruler; redrawing the rest is up to the
    /// controller. Open fields keep their text and move to their new slots.
    pub fn relayout(&mut self, layout: Layout) {
        self.layout = layout;
        self.canvas.clear_all();
        self.draw_ruler();

        let moves: Vec<_> = self
            .overlay
            .fields()
            .iter()
            .map(|field| (field.id(), field.slot()))
            .collect();
        for (id, slot) in moves {
            let placement = match slot {
                FieldSlot::Operand(operand) => self.layout.arrow(operand).field(),
                FieldSlot::Result => self.layout.equation.result_field(),
            };
            self.overlay.set_placement(id, placement);
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn overlay(&self) -> &FieldOverlay {
        &self.overlay
    }

    pub fn overlay_mut(&mut self) -> &mut FieldOverlay {
        &mut self.overlay
    }

    fn tone_color(&self, tone: FieldTone) -> Color32 {
        match tone {
            FieldTone::Neutral => self.text_color,
            FieldTone::Error => self.error_color,
        }
    }
}

impl View for CanvasView {
    fn draw_exercise(&mut self, options: ExerciseOptions) {
        renderer::draw_exercise(&mut self.canvas, &self.layout.equation, options);
    }

    fn draw_arrow(&mut self, operand: Operand) {
        renderer::draw_arrow(&mut self.canvas, self.layout.arrow(operand));
        self.draw_value_label(operand);
    }

    fn draw_value_label(&mut self, operand: Operand) {
        renderer::draw_value_label(&mut self.canvas, self.layout.arrow(operand));
    }

    fn create_operand_input(&mut self, operand: Operand) -> FieldId {
        let placement = self.layout.arrow(operand).field();
        self.overlay
            .create(FieldSlot::Operand(operand), placement, self.text_color)
    }

    fn create_result_input(&mut self) -> FieldId {
        let placement = self.layout.equation.result_field();
        self.overlay.create(FieldSlot::Result, placement, self.text_color)
    }

    fn set_field_tone(&mut self, field: FieldId, tone: FieldTone) {
        let color = self.tone_color(tone);
        self.overlay.set_color(field, color);
    }

    fn remove_field(&mut self, field: FieldId) {
        if self.overlay.remove(field).is_none() {
            log::warn!("Tried to remove unknown field {:?}", field);
        }
    }
}
