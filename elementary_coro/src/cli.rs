// cli.rs - Command line options for the initial configuration

use std::time::Duration;

use clap::Parser;
use elementary::{Config, Pacing, SeedPolicy};

#[derive(Debug, Parser)]
#[command(name = "elementary_coro", about = "Elementary cellular automata, drawn row by row")]
pub struct Args {
    /// Wolfram rule number (0-255)
    #[arg(long, default_value_t = 30)]
    pub rule: u32,

    /// Pixels per cell
    #[arg(long, default_value_t = 10)]
    pub scale: u32,

    /// Number of rows to generate
    #[arg(long, default_value_t = 100)]
    pub rows: u32,

    /// Viewport width in pixels
    #[arg(long, default_value_t = 800)]
    pub width: u32,

    /// Seed row 0 randomly instead of with a single center cell
    #[arg(long)]
    pub random: bool,

    /// Fix the random source so random seeding is reproducible
    #[arg(long)]
    pub seed: Option<u64>,

    /// Delay between rows in milliseconds
    #[arg(long, default_value_t = 20)]
    pub pace_ms: u64,

    /// Print rows to stdout instead of opening a window
    #[arg(long)]
    pub headless: bool,

    /// Tracing filter, e.g. `elementary=debug`. Falls back to RUST_LOG, then `info`.
    #[arg(long)]
    pub log: Option<String>,
}

impl Args {
    pub fn config(&self) -> Config {
        Config {
            rule_number: self.rule,
            scale: self.scale,
            viewport_width: self.width,
            row_count: self.rows,
            seed_policy: if self.random { SeedPolicy::Random } else { SeedPolicy::Single },
            seed: self.seed,
        }
    }

    pub fn pacing(&self) -> Pacing {
        Pacing::per_row(Duration::from_millis(self.pace_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_library_defaults() {
        let args = Args::parse_from(["elementary_coro"]);
        assert_eq!(args.config(), Config::default());
        assert_eq!(args.pacing(), Pacing::per_row(Duration::from_millis(20)));
    }

    #[test]
    fn test_flags_map_to_config() {
        let args = Args::parse_from([
            "elementary_coro", "--rule", "110", "--scale", "4", "--rows", "50", "--width", "400",
            "--random", "--seed", "9", "--pace-ms", "0",
        ]);
        let config = args.config();
        assert_eq!(config.rule_number, 110);
        assert_eq!(config.scale, 4);
        assert_eq!(config.row_count, 50);
        assert_eq!(config.viewport_width, 400);
        assert_eq!(config.seed_policy, SeedPolicy::Random);
        assert_eq!(config.seed, Some(9));
        assert_eq!(args.pacing(), Pacing::none());
    }

    #[test]
    fn test_out_of_range_rule_is_passed_through() {
        // Validation belongs to the engine, which reports it.
        let args = Args::parse_from(["elementary_coro", "--rule", "300"]);
        assert_eq!(args.config().rule_number, 300);
    }
}
