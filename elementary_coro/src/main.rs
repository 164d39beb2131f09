// main.rs - Elementary cellular automata viewer with row coroutines
// Each render run is a tokio task that releases rows on a pacing schedule.

use std::io::Write;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use eframe::egui;
use egui::Color32;
use elementary::{Config, Curation, Pacing, Renderer, curation, generate};
use tokio::runtime::Runtime;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod canvas;    // Surface that keeps painted cells for drawing
mod cli;       // Command line options
mod ui;        // egui front end

use canvas::Canvas;

fn main() -> Result<()> {
    let args = cli::Args::parse();
    init_tracing(args.log.as_deref());

    let config = args.config();
    let pacing = args.pacing();
    let runtime = Runtime::new().context("failed to start tokio runtime")?;

    if args.headless {
        return print_headless(&runtime, &config, pacing);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([args.width as f32 + 40.0, 950.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Elementary Cellular Automata",
        options,
        Box::new(move |_cc| Box::new(RuleViewer::new(runtime, config, pacing))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}

fn init_tracing(directive: Option<&str>) {
    let filter = directive
        .map(EnvFilter::new)
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Streams the automaton to stdout as text, one line per row as it is released.
fn print_headless(runtime: &Runtime, config: &Config, pacing: Pacing) -> Result<()> {
    let rows = generate(config).context("invalid configuration")?;
    let mut canvas = Canvas::default();
    canvas.set_geometry(rows.geometry());
    let mut renderer = Renderer::new(pacing);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    runtime.block_on(async {
        renderer.start(runtime.handle(), rows);
        let mut printed = 0;
        loop {
            let done = renderer.is_finished();
            renderer.drain(&mut canvas);
            let complete = canvas.complete_rows();
            for row in printed..complete {
                writeln!(out, "{}", canvas.row_text(row))?;
            }
            printed = complete;
            if done {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        out.flush()?;
        Ok::<_, anyhow::Error>(())
    })
}

/// Viewer state. `config` is what the controls edit; `running` is the
/// snapshot the current render run was started from.
pub struct RuleViewer {
    pub config: Config,
    running: Option<Config>,
    pub pace_ms: u64,
    pub canvas: Canvas,
    pub status: Option<String>,
    pub live_color: Color32,
    pub dead_color: Color32,
    pub selected_group: Curation,

    renderer: Renderer,
    /// Set when a run starts; cleared once a drain follows the run's last send.
    pending: bool,
    runtime: Runtime,
}

impl RuleViewer {
    pub fn new(runtime: Runtime, config: Config, pacing: Pacing) -> Self {
        Self {
            selected_group: curation(u8::try_from(config.rule_number).unwrap_or(0)),
            config,
            running: None,
            pace_ms: pacing.per_row.as_millis() as u64,
            canvas: Canvas::default(),
            status: None,
            live_color: Color32::from_rgb(0, 200, 0),
            dead_color: Color32::from_rgb(40, 40, 40),
            renderer: Renderer::new(pacing),
            pending: false,
            runtime,
        }
    }

    /// Starts a fresh run whenever the edited config differs from the running one.
    pub fn sync(&mut self) {
        let pacing_changed = self.renderer.pacing().per_row != Duration::from_millis(self.pace_ms);
        if pacing_changed || self.running.as_ref() != Some(&self.config) {
            self.restart();
        }
    }

    /// Starts a new run from the current config, even if nothing changed.
    pub fn restart(&mut self) {
        let snapshot = self.config.clone();
        self.renderer.set_pacing(Pacing::per_row(Duration::from_millis(self.pace_ms)));

        match generate(&snapshot) {
            Ok(rows) => {
                info!(rule = snapshot.rule_number, cols = rows.geometry().n_cols, "new run");
                self.canvas.set_geometry(rows.geometry());
                self.renderer.start(self.runtime.handle(), rows);
                self.pending = true;
                self.status = None;
            }
            Err(e) => {
                warn!(error = %e, "run not started");
                self.renderer.cancel();
                self.pending = false;
                self.canvas.reset();
                self.status = Some(e.to_string());
            }
        }
        self.running = Some(snapshot);
    }

    /// Applies paint commands queued since the last frame.
    pub fn pump(&mut self) -> usize {
        // A run that had finished before this drain has nothing left queued.
        let finished = self.renderer.is_finished();
        let applied = self.renderer.drain(&mut self.canvas);
        if finished {
            self.pending = false;
        }
        applied
    }

    /// True until every command of the current run has reached the canvas.
    pub fn is_rendering(&self) -> bool {
        self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewer(row_count: u32) -> RuleViewer {
        let runtime = Runtime::new().unwrap();
        let config = Config { viewport_width: 90, scale: 10, row_count, ..Config::default() };
        RuleViewer::new(runtime, config, Pacing::none())
    }

    fn wait_for_task(viewer: &RuleViewer) {
        for _ in 0..1000 {
            if viewer.renderer.is_finished() {
                return;
            }
            std::thread::sleep(Duration::from_millis(1));
        }
        panic!("render task did not finish");
    }

    #[test]
    fn test_rendering_until_finished_run_is_drained() {
        let mut viewer = viewer(5);
        viewer.sync();
        wait_for_task(&viewer);

        // The task is done but its rows are still queued.
        assert!(viewer.is_rendering());
        assert_eq!(viewer.canvas.complete_rows(), 0);

        viewer.pump();
        assert!(!viewer.is_rendering());
        assert_eq!(viewer.canvas.complete_rows(), 5);
    }

    #[test]
    fn test_frames_pump_until_every_row_lands() {
        let mut viewer = viewer(50);
        viewer.sync();
        for _ in 0..1000 {
            viewer.pump();
            if !viewer.is_rendering() {
                break;
            }
            std::thread::sleep(Duration::from_millis(1));
        }
        assert!(!viewer.is_rendering());
        assert_eq!(viewer.canvas.complete_rows(), 50);
    }

    #[test]
    fn test_invalid_config_is_not_rendering() {
        let mut viewer = viewer(5);
        viewer.config.rule_number = 256;
        viewer.sync();
        assert!(!viewer.is_rendering());
        assert!(viewer.status.as_deref().is_some_and(|s| s.contains("256")));
    }
}
