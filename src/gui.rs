// src/gui.rs
use eframe::egui;
use egui::{Color32, RichText};
use egui_plot::{Legend, Line, Plot, PlotBounds, PlotPoints};
use std::sync::mpsc::Sender;
use std::time::{Duration, Instant};
use crate::config::MonitorConfig;
use crate::drivers::{
    LiveFrame, LiveSession, MonitorError, PngSummaryExporter, SessionSummary,
};
use crate::types::SamplerStatus;
pub type FinalizeOutcome = Result<SessionSummary, MonitorError>;
pub struct PowerMonitorApp {
    session: LiveSession,
    exporter: PngSummaryExporter,
    metric: String,
    // render tick
    tick_interval: Duration,
    next_tick: Instant,
    frame: Option<LiveFrame>,
    // finalizer result back to main
    outcome_tx: Sender<FinalizeOutcome>,
}
impl PowerMonitorApp {
    pub fn new(
        session: LiveSession,
        exporter: PngSummaryExporter,
        config: &MonitorConfig,
        outcome_tx: Sender<FinalizeOutcome>,
    ) -> Self {
        Self {
            session,
            exporter,
            metric: config.metric.clone(),
            tick_interval: config.update_interval(),
            next_tick: Instant::now(),
            frame: None,
            outcome_tx,
        }
    }
    fn tick_if_due(&mut self) {
        let now = Instant::now();
        if now < self.next_tick {
            return;
        }
        if let Some(frame) = self.session.tick() {
            self.frame = Some(frame);
        }
        self.next_tick = now + self.tick_interval;
    }
    fn finalize(&mut self) {
        match self.session.close(&mut self.exporter) {
            Ok(Some(summary)) => {
                self.outcome_tx.send(Ok(summary)).ok();
            }
            Ok(None) => {}
            Err(err) => {
                self.outcome_tx.send(Err(err)).ok();
            }
        }
    }
    fn status_line(&self, ui: &mut egui::Ui) {
        let Some(frame) = &self.frame else {
            ui.label("Waiting for samples...");
            return;
        };
        ui.horizontal(|ui| {
            match frame.latest {
                Some(v) => {
                    ui.label(RichText::new(format!("{}: {:.2} W", self.metric, v)).strong())
                }
                None => ui.label(format!("{}: --", self.metric)),
            };
            ui.separator();
            ui.label(format!("{} samples this session", frame.total_samples));
            ui.separator();
            match &frame.sampler {
                SamplerStatus::Streaming => ui.label("sampler running"),
                SamplerStatus::Stopped(reason) => ui.label(
                    RichText::new(format!("sampler stopped ({reason})")).color(Color32::YELLOW),
                ),
            };
        });
    }
}
impl eframe::App for PowerMonitorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.tick_if_due();
        ctx.set_visuals(egui::Visuals::dark());
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| self.status_line(ui));
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Wattage");
            Plot::new("live_plot")
                .legend(Legend::default())
                .x_axis_label("Sample")
                .y_axis_label(self.metric.as_str())
                .allow_drag(false)
                .allow_zoom(false)
                .allow_scroll(false)
                .show(ui, |plot_ui| {
                    if let Some(frame) = &self.frame {
                        plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                            [0.0, 0.0],
                            [frame.x_max, frame.y_max],
                        ));
                        plot_ui.line(
                            Line::new(PlotPoints::new(frame.points.clone()))
                                .name(&self.metric)
                                .color(Color32::RED),
                        );
                    }
                });
        });
        ctx.request_repaint_after(self.next_tick.saturating_duration_since(Instant::now()));
    }
    // window close is the only way out of the Running state
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.finalize();
    }
}
