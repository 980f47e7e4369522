// src/main.rs
mod bootstrap;
mod config;
mod drivers;
mod gui;
mod types;
use anyhow::{anyhow, Context, Result};
use eframe::egui;
use log::{error, info, warn};
use std::process::ExitCode;
use std::sync::mpsc::{channel, TryRecvError};
use drivers::{
    sample_channel, spawn_sampler, LiveSession, PngSummaryExporter, SamplerCommand,
    SamplerProcess,
};
fn run() -> Result<()> {
    let config = config::load_config().context("loading configuration")?;
    bootstrap::ensure_installed(&config).context("preparing turbostat")?;
    // producer: turbostat -> parser -> channel, on its own thread
    let (tx, rx) = sample_channel();
    let process = SamplerProcess::spawn(&SamplerCommand::turbostat(&config))?;
    spawn_sampler(process, tx).context("starting sampler thread")?;
    // consumer: render tick owns both history buffers
    let session = LiveSession::new(rx, &config);
    let exporter = PngSummaryExporter::new(
        config.output_path.clone(),
        config.metric.clone(),
        config.max_metric,
    );
    let (outcome_tx, outcome_rx) = channel();
    let app = gui::PowerMonitorApp::new(session, exporter, &config, outcome_tx);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 480.0])
            .with_title("Wattage"),
        ..Default::default()
    };
    eframe::run_native("pkgwatt", options, Box::new(move |_cc| Box::new(app)))
        .map_err(|err| anyhow!("display surface failed: {err}"))?;
    match outcome_rx.try_recv() {
        Ok(Ok(summary)) => {
            info!(
                "summary of {} samples written to {}",
                summary.samples,
                summary.path.display()
            );
            Ok(())
        }
        Ok(Err(err)) => Err(err).context("exporting session summary"),
        Err(TryRecvError::Empty | TryRecvError::Disconnected) => {
            warn!("window closed without finalizing the session");
            Ok(())
        }
    }
}
// entry point
fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
