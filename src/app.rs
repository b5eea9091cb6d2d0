use crate::answer;
use crate::canvas::{Canvas, EguiMeasure};
use crate::config::Config;
use crate::controller::{StageController, StageDelays};
use crate::exercise::Exercise;
use crate::field::FieldId;
use crate::layout::Layout;
use crate::renderer::RulerArt;
use crate::ruler::{RULER_UNITS, RulerSprite};
use crate::scheduler::FrameTimers;
use crate::view::CanvasView;
use egui::{Pos2, Vec2};

/// One exercise session: the stage controller plus everything it draws on
pub struct NumberLineApp {
    config: Config,
    controller: StageController,
    timers: FrameTimers,
    // Built on the first frame, once the canvas size is known
    view: Option<CanvasView>,
    ruler_texture: egui::TextureHandle,
    ruler_size: Vec2,
    ruler_labels: Option<u32>,
}

impl std::fmt::Debug for NumberLineApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NumberLineApp")
            .field("controller", &self.controller)
            .field("view", &self.view)
            .finish_non_exhaustive()
    }
}

impl NumberLineApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: Config) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::light());
        let exercise = Exercise::generate(&mut rand::thread_rng());
        Self::with_exercise(&cc.egui_ctx, config, exercise)
    }

    pub fn with_exercise(ctx: &egui::Context, config: Config, exercise: Exercise) -> Self {
        let sprite = load_ruler(&config);
        let ruler_size = sprite.size();
        let ruler_labels = sprite.needs_labels().then_some(RULER_UNITS);
        let ruler_texture = ctx.load_texture("ruler", sprite.into_image(), egui::TextureOptions::LINEAR);

        let delays = StageDelays {
            operand: config.stage_delay(),
            result: config.result_delay(),
        };

        Self {
            controller: StageController::new(exercise, delays),
            timers: FrameTimers::new(),
            view: None,
            ruler_texture,
            ruler_size,
            ruler_labels,
            config,
        }
    }

    pub fn controller(&self) -> &StageController {
        &self.controller
    }

    pub fn view(&self) -> Option<&CanvasView> {
        self.view.as_ref()
    }

    /// Feeds edited field text to the controller, as a keystroke in the field would
    pub fn handle_field_text(&mut self, field: FieldId, text: &str) {
        let Some(view) = self.view.as_mut() else {
            return;
        };
        let Some(input) = view.overlay_mut().get_mut(field) else {
            return;
        };
        if !input.set_text(text) {
            return;
        }
        let text = input.text().to_owned();
        self.controller.on_input(field, &text, view, &mut self.timers);
    }

    /// Runs one frame of the session
    pub fn ui(&mut self, ctx: &egui::Context) {
        self.timers.set_now(ctx.input(|input| input.time));

        let background = self.config.theme.background.color();
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(background))
            .show(ctx, |ui| {
                let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::hover());
                let rect = response.rect;

                self.sync_canvas(ctx, rect.size());
                self.fire_timers();

                if let Some(view) = &self.view {
                    view.canvas().paint(&painter, rect.min);
                }
                if self.show_fields(ctx, rect.min) {
                    // The canvas was already painted this frame
                    ctx.request_repaint();
                }
            });

        if let Some(wakeup) = self.timers.next_wakeup() {
            ctx.request_repaint_after(wakeup);
        }
    }

    /// Builds the view on the first frame and relays it out whenever the canvas size changes
    fn sync_canvas(&mut self, ctx: &egui::Context, size: Vec2) {
        let canvas_size = Vec2::new(size.x.trunc(), size.y.trunc());
        if self
            .view
            .as_ref()
            .is_some_and(|view| view.layout().canvas == canvas_size)
        {
            return;
        }

        let measure = EguiMeasure::new(ctx);
        let theme = self.config.theme;
        let layout = Layout::compute(
            canvas_size,
            self.ruler_size,
            self.controller.exercise(),
            &theme,
            &measure,
        );

        match self.view.as_mut() {
            Some(view) => {
                log::debug!("Canvas resized to {:?}", canvas_size);
                view.relayout(layout);
                self.controller.restore(view);
            }
            None => {
                let canvas = Canvas::new(Box::new(measure), theme.background.color());
                let art = RulerArt {
                    texture: self.ruler_texture.id(),
                    labels: self.ruler_labels,
                };
                let mut view = CanvasView::new(layout, canvas, art, &theme);
                self.controller.run(&mut view, &mut self.timers);
                self.view = Some(view);
            }
        }
    }

    fn fire_timers(&mut self) {
        let Some(view) = self.view.as_mut() else {
            return;
        };
        for stage in self.timers.take_due() {
            self.controller.on_timer(stage, view);
        }
    }

    /// Shows every open field over the canvas. Returns true if any text changed.
    fn show_fields(&mut self, ctx: &egui::Context, origin: Pos2) -> bool {
        let Some(view) = self.view.as_mut() else {
            return false;
        };
        if view.overlay().is_empty() {
            return false;
        }
        ctx.input_mut(|input| filter_text_events(&mut input.events));

        let mut edits = Vec::new();
        for field in view.overlay_mut().fields_mut() {
            let id = field.id();
            let placement = field.placement().clone();
            let wants_focus = field.take_focus_request();
            let mut buffer = field.text().to_owned();

            egui::Area::new(id.egui_id().with("area"))
                .order(egui::Order::Foreground)
                .fixed_pos(origin + placement.pos.to_vec2())
                .show(ctx, |ui| {
                    let response = ui.add(
                        egui::TextEdit::singleline(&mut buffer)
                            .id(id.egui_id())
                            .char_limit(placement.max_len)
                            .font(placement.font.clone())
                            .text_color(field.color())
                            .horizontal_align(placement.align)
                            .desired_width(placement.width),
                    );
                    if wants_focus {
                        response.request_focus();
                    }
                    if response.changed() && field.set_text(&buffer) {
                        edits.push((id, field.text().to_owned()));
                    }
                });
        }

        let changed = !edits.is_empty();
        for (id, text) in edits {
            self.controller.on_input(id, &text, view, &mut self.timers);
        }
        changed
    }
}

impl eframe::App for NumberLineApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui(ctx);
    }
}

fn load_ruler(config: &Config) -> RulerSprite {
    let generated = || RulerSprite::generated(config.theme.text.color());
    let Some(path) = &config.ruler_image else {
        return generated();
    };
    match RulerSprite::load(path) {
        Ok(sprite) => {
            log::info!("Loaded ruler sprite from {}", path.display());
            sprite
        }
        Err(err) => {
            log::warn!("{err}; falling back to the generated ruler");
            generated()
        }
    }
}

/// Drops rejected characters from typed and pasted text before any widget sees it
pub fn filter_text_events(events: &mut Vec<egui::Event>) {
    events.retain_mut(|event| match event {
        egui::Event::Text(text) | egui::Event::Paste(text) => {
            text.retain(answer::accepts_char);
            !text.is_empty()
        }
        _ => true,
    });
}
