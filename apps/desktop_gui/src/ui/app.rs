use std::time::Duration;

use card_stack::{
    round::{MAX_PLAYERS, MAX_SPIES, MIN_PLAYERS, MIN_SPIES},
    CardEvent, DefaultPalette, EngineConfig, RoundSetup, StackManager, StackSpec,
};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::{
    domain::{Size, Vec2},
    protocol::StackEvent,
};

use crate::backend_bridge::commands::DealerCommand;
use crate::controller::events::{err_label, DeckKind, UiError, UiEvent};
use crate::controller::orchestration::{dispatch_dealer_command, forward_stack_events};
use crate::controller::reducer::{reduce, ScreenPhase};
use crate::ui::{card_view, theme};

pub const SETTINGS_STORAGE_KEY: &str = "card_table.round_setup";

/// Long frames (window drag, breakpoint) are clamped so springs never jump.
const MAX_FRAME_DT: f32 = 1.0 / 20.0;
/// The table is laid out as a portrait column even in a wide window.
const TABLE_ASPECT: f32 = 0.55;
const FALLBACK_TABLE: Size = Size::new(430.0, 780.0);

#[derive(Debug, Clone, Default)]
pub struct StartupConfig {
    pub setup: RoundSetup,
    pub seed: Option<u64>,
    pub how_to_play: bool,
}

/// In-progress pointer drag on the top card.
#[derive(Debug, Clone, Copy, PartialEq)]
struct DragTracking {
    last_point: Vec2,
}

pub struct CardTableApp {
    cmd_tx: Sender<DealerCommand>,
    ui_tx: Sender<UiEvent>,
    ui_rx: Receiver<UiEvent>,
    config: EngineConfig,
    palette: DefaultPalette,
    stack: Option<StackManager>,
    phase: ScreenPhase,
    setup: RoundSetup,
    seed: Option<u64>,
    table: Size,
    drag: Option<DragTracking>,
    status: String,
    status_banner: Option<UiError>,
}

impl CardTableApp {
    pub fn new(
        cmd_tx: Sender<DealerCommand>,
        ui_tx: Sender<UiEvent>,
        ui_rx: Receiver<UiEvent>,
        config: EngineConfig,
        startup: StartupConfig,
    ) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_tx,
            ui_rx,
            config,
            palette: DefaultPalette,
            stack: None,
            phase: ScreenPhase::Waiting,
            setup: startup.setup,
            seed: startup.seed,
            table: FALLBACK_TABLE,
            drag: None,
            status: String::new(),
            status_banner: None,
        };

        let first = if startup.how_to_play {
            DealerCommand::HowToPlay
        } else {
            app.deal_command()
        };
        dispatch_dealer_command(&app.cmd_tx, first, &mut app.status);
        app
    }

    fn deal_command(&mut self) -> DealerCommand {
        // A fixed seed only applies to the first deal so later rounds differ.
        DealerCommand::DealRound {
            setup: self.setup.clone(),
            seed: self.seed.take(),
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.phase = reduce(self.phase, &event);
            match event {
                UiEvent::DeckReady { kind, descriptors } => self.install_deck(kind, descriptors),
                UiEvent::Stack(StackEvent::StackEmptied) => {
                    self.drag = None;
                    self.status = self.phase.headline();
                }
                UiEvent::Stack(StackEvent::CardFlipped { card_id }) => {
                    tracing::debug!(card_id = card_id.0, "card revealed on table");
                }
                UiEvent::Stack(_) => {}
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::Error(err) => {
                    tracing::warn!(category = err_label(err.category()), "{}", err.message());
                    self.status_banner = Some(err);
                }
            }
        }
    }

    fn install_deck(&mut self, kind: DeckKind, descriptors: Vec<shared::domain::CardDescriptor>) {
        let mut spec = StackSpec::new(descriptors, self.table);
        if kind == DeckKind::HowToPlay {
            spec = spec.without_flip();
        }
        self.drag = None;
        self.status_banner = None;
        self.status = self.phase.headline();
        self.stack = Some(StackManager::new(self.config, spec));
    }

    fn show_controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal_wrapped(|ui| {
            ui.label("Players");
            ui.add(
                egui::DragValue::new(&mut self.setup.player_count).range(MIN_PLAYERS..=MAX_PLAYERS),
            );
            ui.label("Spies");
            let max_spies = MAX_SPIES.min(self.setup.player_count.saturating_sub(1));
            ui.add(egui::DragValue::new(&mut self.setup.spy_count).range(MIN_SPIES..=max_spies));
            self.setup.spy_count = self.setup.spy_count.clamp(MIN_SPIES, max_spies.max(MIN_SPIES));
            ui.checkbox(&mut self.setup.show_hints, "Hints for spies");

            ui.separator();
            if ui.button("New round").clicked() {
                let cmd = self.deal_command();
                dispatch_dealer_command(&self.cmd_tx, cmd, &mut self.status);
            }
            if ui.button("How to play").clicked() {
                dispatch_dealer_command(&self.cmd_tx, DealerCommand::HowToPlay, &mut self.status);
            }
        });

        ui.label(egui::RichText::new(self.phase.headline()).strong());
        if let Some(banner) = &self.status_banner {
            ui.colored_label(
                theme::ERROR_TEXT,
                format!("{}: {}", err_label(banner.category()), banner.message()),
            );
        } else if !self.status.is_empty() && self.status != self.phase.headline() {
            ui.label(&self.status);
        }
    }

    fn show_table(&mut self, ui: &mut egui::Ui) {
        let available = ui.available_rect_before_wrap();
        let width = available.width().min(available.height() * TABLE_ASPECT);
        let rect = egui::Rect::from_center_size(
            available.center(),
            egui::vec2(width, available.height()),
        );
        if rect.width() > 0.0 && rect.height() > 0.0 {
            self.table = Size::new(rect.width(), rect.height());
        }

        let response = ui.allocate_rect(available, egui::Sense::click_and_drag());
        let anchor = rect.center();
        self.route_input(ui.ctx(), &response, anchor);

        let painter = ui.painter_at(available);
        painter.rect_filled(rect, 18.0, theme::TABLE_BACKGROUND);
        if let Some(stack) = &self.stack {
            for visual in stack.visuals(&self.palette) {
                card_view::paint_card(&painter, anchor, &visual);
            }
        }
        if self.phase.is_finished() {
            painter.text(
                anchor,
                egui::Align2::CENTER_CENTER,
                self.phase.headline(),
                egui::FontId::proportional(20.0),
                ui.visuals().text_color(),
            );
        }
    }

    /// Maps egui pointer activity on the table onto card events for the top card.
    fn route_input(&mut self, ctx: &egui::Context, response: &egui::Response, anchor: egui::Pos2) {
        let palette = self.palette;
        let Some(stack) = self.stack.as_mut() else {
            return;
        };
        let pointer_velocity = ctx.input(|input| input.pointer.velocity());
        let velocity = Vec2::new(pointer_velocity.x, pointer_velocity.y);
        let pointer = response
            .interact_pointer_pos()
            .map(|pos| Vec2::new(pos.x, pos.y));
        let top_card = stack
            .visuals(&palette)
            .last()
            .filter(|visual| visual.interactive)
            .map(|visual| card_view::project(anchor, visual));
        let on_top_card = |point: Vec2| {
            top_card.is_some_and(|corners| card_view::contains(&corners, egui::pos2(point.x, point.y)))
        };

        if response.drag_started() {
            if let Some(point) = pointer.filter(|&point| on_top_card(point)) {
                stack.handle(CardEvent::PointerDown { point });
                self.drag = Some(DragTracking { last_point: point });
            }
        }

        if let Some(tracking) = self.drag.as_mut() {
            if ctx.input(|input| input.key_pressed(egui::Key::Escape)) {
                stack.handle(CardEvent::PointerCancel);
                self.drag = None;
            } else if response.drag_stopped() {
                stack.handle(CardEvent::PointerUp { velocity });
                self.drag = None;
            } else if let Some(point) = pointer.filter(|&point| point != tracking.last_point) {
                tracking.last_point = point;
                stack.handle(CardEvent::PointerMove { point, velocity });
            }
        }

        if response.clicked() && pointer.is_some_and(|point| on_top_card(point)) {
            stack.handle(CardEvent::Tap);
        }
    }

    /// Advances the engine one frame and forwards its events to the reducer queue.
    fn advance(&mut self, ctx: &egui::Context) -> bool {
        let Some(stack) = self.stack.as_mut() else {
            return false;
        };
        let dt = ctx.input(|input| input.stable_dt).min(MAX_FRAME_DT);
        stack.tick(dt);
        let events = stack.drain_events();
        if !events.is_empty() {
            forward_stack_events(&self.ui_tx, events, &mut self.status);
            ctx.request_repaint();
        }
        !stack.is_empty()
    }
}

impl eframe::App for CardTableApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        egui::TopBottomPanel::top("round_controls").show(ctx, |ui| self.show_controls(ui));
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(theme::PANEL_BACKGROUND))
            .show(ctx, |ui| self.show_table(ui));

        if self.advance(ctx) {
            ctx.request_repaint_after(Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        if let Ok(serialized) = serde_json::to_string(&self.setup) {
            storage.set_string(SETTINGS_STORAGE_KEY, serialized);
        }
    }
}

pub fn load_persisted_setup(storage: Option<&dyn eframe::Storage>) -> Option<RoundSetup> {
    storage
        .and_then(|storage| storage.get_string(SETTINGS_STORAGE_KEY))
        .and_then(|text| serde_json::from_str::<RoundSetup>(&text).ok())
        .filter(|setup| setup.validate().is_ok())
}
