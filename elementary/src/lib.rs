//! Elementary cellular automata: rule catalog, row derivation, grid
//! generation and incremental rendering.
//!
//! ```
//! use elementary::{Config, generate};
//!
//! let config = Config { rule_number: 30, row_count: 16, ..Config::default() };
//! for row in generate(&config)? {
//!     assert_eq!(row.states.len(), 79);
//! }
//! # Ok::<(), elementary::Error>(())
//! ```

pub mod error;
pub mod generator;
pub mod grid;
pub mod neighborhood;
pub mod render;
pub mod rules;
pub mod transition;

pub use error::{Error, Result};
pub use generator::{Config, Generator, SeedPolicy, generate, generate_with_rng};
pub use grid::{Cell, Geometry, Grid, Row, State};
pub use neighborhood::{Neighborhood, encode};
pub use render::{Command, Pacing, Renderer, RunId, Surface};
pub use rules::{Curation, Rule, curation, rule_number_for, rule_table_for, rules_in};
pub use transition::next_row;
