//! Status window and break overlay implemented with egui/eframe

use std::time::Instant;

use anyhow::{anyhow, Result};
use crossbeam_channel::{unbounded, Receiver};
use eframe::{egui, CreationContext, NativeOptions};
use tokio::runtime::Handle;
use tracing::info;

use super::constants::*;
use super::{Presenters, UiDispatcher, UiUpdate};
use crate::cycle::{BreakCycleController, Signals};
use crate::types::CycleDurations;

pub struct EyeCareApp {
    controller: BreakCycleController,
    updates: Receiver<UiUpdate>,
    presenters: Presenters,
}

impl EyeCareApp {
    fn new(cc: &CreationContext<'_>, runtime: Handle, signals: Signals) -> Self {
        info!("Initializing eye care window");

        let (tx, updates) = unbounded();
        let egui_ctx = cc.egui_ctx.clone();
        let dispatcher = UiDispatcher::new(tx).with_waker(move || egui_ctx.request_repaint());

        let controller =
            BreakCycleController::new(runtime, CycleDurations::default(), signals, dispatcher);

        Self {
            controller,
            updates,
            presenters: Presenters::default(),
        }
    }

    fn status_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(SECTION_SPACING);
                ui.label(
                    egui::RichText::new(self.presenters.status.text()).size(STATUS_FONT_SIZE),
                );
                ui.add_space(SECTION_SPACING);

                let start = ui.add_enabled(
                    self.presenters.status.start_enabled(),
                    egui::Button::new("Start"),
                );
                if start.clicked() {
                    self.controller.start();
                }

                let stop = ui.add_enabled(
                    self.presenters.status.stop_enabled(),
                    egui::Button::new("Stop"),
                );
                if stop.clicked() {
                    self.controller.stop();
                }
            });
        });
    }

    fn break_overlay(&self, ctx: &egui::Context) {
        let overlay = &self.presenters.overlay;
        let message = overlay.message();
        let emoji = overlay.emoji();
        let countdown = overlay.countdown_text();

        let builder = egui::ViewportBuilder::default()
            .with_title(OVERLAY_TITLE)
            .with_fullscreen(true)
            .with_decorations(false)
            .with_transparent(true)
            .with_always_on_top();

        ctx.show_viewport_immediate(
            egui::ViewportId::from_hash_of(OVERLAY_VIEWPORT),
            builder,
            |ctx, _class| {
                // Only stop() ends a break.
                if ctx.input(|i| i.viewport().close_requested()) {
                    ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
                }

                egui::CentralPanel::default()
                    .frame(egui::Frame::new().fill(OVERLAY_BACKGROUND))
                    .show(ctx, |ui| {
                        ui.add_space(ui.available_height() * 0.25);
                        ui.vertical_centered(|ui| {
                            ui.label(
                                egui::RichText::new(message)
                                    .size(MESSAGE_FONT_SIZE)
                                    .strong()
                                    .color(OVERLAY_FOREGROUND),
                            );
                            ui.add_space(SECTION_SPACING * 4.0);
                            ui.label(
                                egui::RichText::new(emoji)
                                    .size(EMOJI_FONT_SIZE)
                                    .color(OVERLAY_FOREGROUND),
                            );
                            ui.add_space(SECTION_SPACING * 4.0);
                            ui.label(
                                egui::RichText::new(&countdown)
                                    .size(COUNTDOWN_FONT_SIZE)
                                    .color(OVERLAY_FOREGROUND),
                            );
                        });
                    });
            },
        );
    }
}

impl eframe::App for EyeCareApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.presenters.drain(&self.updates);

        self.status_panel(ctx);

        if self.presenters.overlay.is_visible() {
            self.break_overlay(ctx);
        }

        if let Some(delay) = self.presenters.overlay.poll_animation(Instant::now()) {
            ctx.request_repaint_after(delay);
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        // Issues any owed media resume before the process goes away.
        self.controller.stop();
        info!("Eye care exiting");
    }
}

/// Opens the status window and blocks until it is closed.
pub fn run_gui(runtime: Handle, signals: Signals) -> Result<()> {
    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([WINDOW_WIDTH, WINDOW_HEIGHT])
            .with_resizable(false)
            .with_always_on_top()
            .with_title(WINDOW_TITLE),
        ..Default::default()
    };

    eframe::run_native(
        APP_ID,
        options,
        Box::new(move |cc| Ok(Box::new(EyeCareApp::new(cc, runtime, signals)))),
    )
    .map_err(|err| anyhow!("Failed to launch status window: {err}"))
}
