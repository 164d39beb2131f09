//! Incremental rendering of a row stream onto a drawing surface.
//!
//! Each run is a coroutine that walks a [`Generator`], waits for the row's
//! presentation deadline and queues one paint command per cell. The
//! [`Renderer`] applies queued commands to a [`Surface`] and drops anything
//! queued by a run that has since been superseded.

use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, warn};

use crate::generator::Generator;
use crate::grid::Cell;

/// Something cells can be drawn on.
pub trait Surface {
    /// Forget everything painted so far.
    fn clear(&mut self);
    /// Draw or update one cell.
    fn paint(&mut self, cell: Cell);
}

/// A request toward the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Clear,
    Paint(Cell),
}

impl Command {
    pub fn apply<S: Surface + ?Sized>(self, surface: &mut S) {
        match self {
            Command::Clear => surface.clear(),
            Command::Paint(cell) => surface.paint(cell),
        }
    }
}

/// Identifies one run of the renderer.
pub type RunId = u64;

/// Cosmetic delay between rows. Row `r` is released `r * per_row` after
/// the run starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pacing {
    pub per_row: Duration,
}

impl Pacing {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn per_row(per_row: Duration) -> Self {
        Self { per_row }
    }

    pub fn delay_for(&self, row: usize) -> Duration {
        self.per_row.saturating_mul(u32::try_from(row).unwrap_or(u32::MAX))
    }
}

pub struct Renderer {
    run: RunId,
    task: Option<JoinHandle<()>>,
    tx: UnboundedSender<(RunId, Command)>,
    rx: UnboundedReceiver<(RunId, Command)>,
    pacing: Pacing,
}

impl Renderer {
    pub fn new(pacing: Pacing) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { run: 0, task: None, tx, rx, pacing }
    }

    pub fn pacing(&self) -> Pacing {
        self.pacing
    }

    /// Takes effect from the next run.
    pub fn set_pacing(&mut self, pacing: Pacing) {
        self.pacing = pacing;
    }

    pub fn current_run(&self) -> RunId {
        self.run
    }

    /// Cancels the current run and starts streaming `rows` on `handle`.
    pub fn start(&mut self, handle: &Handle, rows: Generator) -> RunId {
        self.cancel();
        let run = self.run;

        // The receiver lives in `self`, so this send cannot fail.
        let _ = self.tx.send((run, Command::Clear));
        debug!(run, rule = rows.rule().number(), rows = rows.len(), "render run started");

        let task = handle.spawn(paint_rows(run, rows, self.pacing, self.tx.clone()));
        self.task = Some(task);
        run
    }

    /// Stops the current run and discards everything it queued.
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            if !task.is_finished() {
                debug!(run = self.run, "render run superseded");
            }
            task.abort();
        }
        // Commands still in the channel now carry a stale id.
        self.run += 1;
    }

    /// True once the current run has queued its last command.
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Resolves when the current run has queued everything.
    pub async fn wait(&mut self) {
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                if e.is_panic() {
                    warn!(run = self.run, "render run panicked");
                }
            }
        }
    }

    /// Applies every queued command of the current run to `surface` and
    /// returns how many were applied. Commands from older runs are dropped.
    pub fn drain<S: Surface + ?Sized>(&mut self, surface: &mut S) -> usize {
        let mut applied = 0;
        while let Ok((run, command)) = self.rx.try_recv() {
            if run != self.run {
                continue;
            }
            command.apply(surface);
            applied += 1;
        }
        applied
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Row coroutine: releases each row at its pacing deadline.
async fn paint_rows(run: RunId, rows: Generator, pacing: Pacing, tx: UnboundedSender<(RunId, Command)>) {
    let started = Instant::now();
    for row in rows {
        if pacing.per_row.is_zero() {
            tokio::task::yield_now().await;
        } else {
            sleep_until(started + pacing.delay_for(row.index)).await;
        }
        for cell in row.cells() {
            if tx.send((run, Command::Paint(cell))).is_err() {
                return;
            }
        }
    }
    debug!(run, "render run complete");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{Config, generate};

    #[derive(Default)]
    struct Recorder {
        commands: Vec<Command>,
    }

    impl Surface for Recorder {
        fn clear(&mut self) {
            self.commands.push(Command::Clear);
        }

        fn paint(&mut self, cell: Cell) {
            self.commands.push(Command::Paint(cell));
        }
    }

    fn rows(rule_number: u32, row_count: u32) -> Generator {
        let config = Config { rule_number, scale: 10, viewport_width: 90, row_count, ..Config::default() };
        generate(&config).unwrap()
    }

    #[test]
    fn test_pacing_is_proportional_to_row() {
        let pacing = Pacing::per_row(Duration::from_millis(25));
        assert_eq!(pacing.delay_for(0), Duration::ZERO);
        assert_eq!(pacing.delay_for(4), Duration::from_millis(100));
        assert_eq!(Pacing::none().delay_for(1000), Duration::ZERO);
    }

    #[tokio::test]
    async fn test_full_run_paints_every_cell_after_clear() {
        let mut renderer = Renderer::new(Pacing::none());
        let mut surface = Recorder::default();
        renderer.start(&Handle::current(), rows(30, 4));
        renderer.wait().await;
        assert!(renderer.is_finished());

        assert_eq!(renderer.drain(&mut surface), 1 + 4 * 9);
        assert_eq!(surface.commands[0], Command::Clear);
        assert_eq!(surface.commands[1], Command::Paint(Cell { row: 0, col: 0, state: false }));
        assert_eq!(surface.commands[5], Command::Paint(Cell { row: 0, col: 4, state: true }));
    }

    #[tokio::test]
    async fn test_stale_commands_are_dropped() {
        let mut renderer = Renderer::new(Pacing::none());
        let mut surface = Recorder::default();
        let first = renderer.start(&Handle::current(), rows(30, 2));
        let second = renderer.start(&Handle::current(), rows(0, 2));
        assert_ne!(first, second);
        assert_eq!(renderer.current_run(), second);

        let stale = Cell { row: 0, col: 3, state: true };
        renderer.tx.send((first, Command::Paint(stale))).unwrap();
        renderer.wait().await;
        renderer.drain(&mut surface);

        assert_eq!(surface.commands.iter().filter(|c| **c == Command::Clear).count(), 1);
        assert!(!surface.commands.contains(&Command::Paint(stale)));
        assert_eq!(surface.commands.len(), 1 + 2 * 9);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rows_released_on_schedule() {
        let mut renderer = Renderer::new(Pacing::per_row(Duration::from_millis(10)));
        let mut surface = Recorder::default();
        renderer.start(&Handle::current(), rows(90, 6));

        tokio::time::sleep(Duration::from_millis(25)).await;
        renderer.drain(&mut surface);
        let painted_rows: Vec<usize> = surface
            .commands
            .iter()
            .filter_map(|c| match c {
                Command::Paint(cell) => Some(cell.row),
                Command::Clear => None,
            })
            .collect();
        assert_eq!(painted_rows.len(), 3 * 9);
        assert!(painted_rows.iter().all(|&r| r <= 2));
        assert!(!renderer.is_finished());
    }
}
