//! Grid generation: seeding row 0 and streaming the derived rows.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace, warn};

use crate::error::Result;
use crate::grid::{Geometry, Grid, Row, State};
use crate::rules::{Rule, rule_table_for};
use crate::transition::derive;

/// How row 0 is initialised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeedPolicy {
    /// One live cell at the center column.
    #[default]
    Single,
    /// A random number of live interior cells, possibly overlapping.
    Random,
}

/// Immutable snapshot describing one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub rule_number: u32,
    /// Pixels per cell.
    pub scale: u32,
    pub viewport_width: u32,
    pub row_count: u32,
    pub seed_policy: SeedPolicy,
    /// Fixes the random source for `SeedPolicy::Random`.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rule_number: 30,
            scale: 10,
            viewport_width: 800,
            row_count: 100,
            seed_policy: SeedPolicy::Single,
            seed: None,
        }
    }
}

/// Validates `config`, seeds row 0 and returns the lazy row sequence.
pub fn generate(config: &Config) -> Result<Generator> {
    match config.seed {
        Some(seed) => generate_with_rng(config, &mut StdRng::seed_from_u64(seed)),
        None => generate_with_rng(config, &mut rand::rng()),
    }
}

/// Like [`generate`], drawing any randomness from `rng`.
pub fn generate_with_rng<R: Rng + ?Sized>(config: &Config, rng: &mut R) -> Result<Generator> {
    let validated = rule_table_for(config.rule_number).and_then(|rule| {
        Geometry::from_viewport(config.viewport_width, config.scale, config.row_count)
            .map(|geometry| (rule, geometry))
    });
    let (rule, geometry) = match validated {
        Ok(v) => v,
        Err(e) => {
            warn!(error = %e, "rejected configuration");
            return Err(e);
        }
    };

    let seed_row = seed(&geometry, config.seed_policy, rng);
    debug!(
        rule = rule.number(),
        cols = geometry.n_cols,
        rows = geometry.n_rows,
        policy = ?config.seed_policy,
        "starting generation"
    );

    Ok(Generator { rule, geometry, current: Some(seed_row), next_index: 0 })
}

fn seed<R: Rng + ?Sized>(geometry: &Geometry, policy: SeedPolicy, rng: &mut R) -> Vec<State> {
    let mut row = vec![false; geometry.n_cols];
    match policy {
        SeedPolicy::Single => row[geometry.center_col()] = true,
        SeedPolicy::Random => {
            let interior = geometry.interior();
            let count = rng.random_range(1..geometry.n_cols);
            for _ in 0..count {
                row[rng.random_range(interior.clone())] = true;
            }
        }
    }
    row
}

/// Forward-only sequence of rows: the seed row first, then each derived row.
#[derive(Debug, Clone)]
pub struct Generator {
    rule: Rule,
    geometry: Geometry,
    current: Option<Vec<State>>,
    next_index: usize,
}

impl Generator {
    pub fn rule(&self) -> Rule {
        self.rule
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Drains the remaining rows into a [`Grid`].
    pub fn collect_grid(self) -> Grid {
        let geometry = self.geometry;
        Grid { geometry, rows: self.collect() }
    }
}

impl Iterator for Generator {
    type Item = Row;

    fn next(&mut self) -> Option<Row> {
        if self.next_index >= self.geometry.n_rows {
            return None;
        }
        let states = self.current.take()?;
        let index = self.next_index;
        self.next_index += 1;
        if self.next_index < self.geometry.n_rows {
            self.current = Some(derive(&states, &self.rule));
        }
        trace!(row = index, live = states.iter().filter(|&&s| s).count(), "row ready");
        Some(Row { index, states })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.geometry.n_rows - self.next_index;
        (left, Some(left))
    }
}

impl ExactSizeIterator for Generator {}
