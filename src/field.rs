use crate::answer;
use crate::id_generator::generate_id;
use crate::layout::FieldPlacement;
use egui::Color32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldId(u64);

impl FieldId {
    fn next() -> Self {
        Self(generate_id())
    }

    pub fn egui_id(self) -> egui::Id {
        egui::Id::new(("answer_field", self.0))
    }
}

/// Text color state of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldTone {
    #[default]
    Neutral,
    Error,
}

/// Which slot a field answers; decides where it sits after a relayout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSlot {
    Operand(crate::exercise::Operand),
    Result,
}

/// A single-line, digits-only text input floating over the canvas
#[derive(Debug, Clone)]
pub struct InputField {
    id: FieldId,
    slot: FieldSlot,
    placement: FieldPlacement,
    text: String,
    color: Color32,
    focus_pending: bool,
}

impl InputField {
    pub fn id(&self) -> FieldId {
        self.id
    }

    pub fn slot(&self) -> FieldSlot {
        self.slot
    }

    pub fn placement(&self) -> &FieldPlacement {
        &self.placement
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn max_len(&self) -> usize {
        self.placement.max_len
    }

    /// Applies edited text, keeping only what the field accepts.
    ///
    /// Returns true if the stored text changed.
    pub fn set_text(&mut self, text: &str) -> bool {
        let clean = answer::sanitize(text, self.max_len());
        if clean == self.text {
            return false;
        }
        self.text = clean;
        true
    }

    /// Returns true exactly once, right after creation
    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_pending)
    }
}

/// Container the answer fields are attached to
#[derive(Debug, Default)]
pub struct FieldOverlay {
    fields: Vec<InputField>,
}

impl FieldOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a new empty field and marks it for focus
    pub fn create(&mut self, slot: FieldSlot, placement: FieldPlacement, color: Color32) -> FieldId {
        let id = FieldId::next();
        self.fields.push(InputField {
            id,
            slot,
            placement,
            text: String::new(),
            color,
            focus_pending: true,
        });
        id
    }

    pub fn get(&self, id: FieldId) -> Option<&InputField> {
        self.fields.iter().find(|field| field.id == id)
    }

    pub fn get_mut(&mut self, id: FieldId) -> Option<&mut InputField> {
        self.fields.iter_mut().find(|field| field.id == id)
    }

    pub fn text(&self, id: FieldId) -> Option<&str> {
        self.get(id).map(InputField::text)
    }

    pub fn set_color(&mut self, id: FieldId, color: Color32) {
        if let Some(field) = self.get_mut(id) {
            field.color = color;
        }
    }

    pub fn set_placement(&mut self, id: FieldId, placement: FieldPlacement) {
        if let Some(field) = self.get_mut(id) {
            field.placement = placement;
        }
    }

    pub fn remove(&mut self, id: FieldId) -> Option<InputField> {
        let index = self.fields.iter().position(|field| field.id == id)?;
        Some(self.fields.remove(index))
    }

    pub fn fields(&self) -> &[InputField] {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut [InputField] {
        &mut self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exercise::Operand;
    use egui::{Align, FontId, pos2};

    fn placement(max_len: usize) -> FieldPlacement {
        FieldPlacement {
            pos: pos2(10.0, 20.0),
            width: 36.0,
            font: FontId::proportional(36.0),
            align: Align::Center,
            max_len,
        }
    }

    #[test]
    fn test_create_and_remove() {
        let mut overlay = FieldOverlay::new();
        let id = overlay.create(FieldSlot::Operand(Operand::A), placement(1), Color32::BLACK);
        assert_eq!(overlay.text(id), Some(""));
        assert_eq!(overlay.fields().len(), 1);

        assert!(overlay.remove(id).is_some());
        assert!(overlay.is_empty());
        assert!(overlay.remove(id).is_none());
        assert_eq!(overlay.text(id), None);
    }

    #[test]
    fn test_ids_are_unique() {
        let mut overlay = FieldOverlay::new();
        let first = overlay.create(FieldSlot::Result, placement(2), Color32::BLACK);
        let second = overlay.create(FieldSlot::Result, placement(2), Color32::BLACK);
        assert_ne!(first, second);
        assert_ne!(first.egui_id(), second.egui_id());
    }

    #[test]
    fn test_set_text_filters_and_limits() {
        let mut overlay = FieldOverlay::new();
        let id = overlay.create(FieldSlot::Result, placement(2), Color32::BLACK);
        let field = overlay.get_mut(id).unwrap();

        assert!(!field.set_text("a"));
        assert_eq!(field.text(), "");
        assert!(field.set_text("1-"));
        assert_eq!(field.text(), "1");
        assert!(field.set_text("112"));
        assert_eq!(field.text(), "11");
        assert!(!field.set_text("11"));
    }

    #[test]
    fn test_focus_is_requested_once() {
        let mut overlay = FieldOverlay::new();
        let id = overlay.create(FieldSlot::Result, placement(2), Color32::BLACK);
        let field = overlay.get_mut(id).unwrap();
        assert!(field.take_focus_request());
        assert!(!field.take_focus_request());
    }

    #[test]
    fn test_color_updates() {
        let mut overlay = FieldOverlay::new();
        let id = overlay.create(FieldSlot::Result, placement(2), Color32::BLACK);
        overlay.set_color(id, Color32::RED);
        assert_eq!(overlay.get(id).unwrap().color(), Color32::RED);
    }
}
