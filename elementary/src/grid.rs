// grid.rs - Grid types for elementary automata

use crate::error::{Error, Result};

/// A cell state: `true` is live (1), `false` is quiescent (0).
pub type State = bool;

/// Smallest column count that still has an interior cell.
pub const MIN_COLS: usize = 3;

/// One painted position of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
    pub state: State,
}

/// A finalized row. Once produced it is never changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub index: usize,
    pub states: Vec<State>,
}

impl Row {
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.states
            .iter()
            .enumerate()
            .map(move |(col, &state)| Cell { row: self.index, col, state })
    }

    pub fn live(&self) -> usize {
        self.states.iter().filter(|&&s| s).count()
    }
}

/// Rows × columns of a run, plus the cell size it was laid out with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub n_rows: usize,
    pub n_cols: usize,
    pub scale: u32,
}

impl Geometry {
    /// Fits whole cells into `viewport_width`, then drops one column if needed
    /// so the count is odd and a center column exists.
    pub fn from_viewport(viewport_width: u32, scale: u32, row_count: u32) -> Result<Self> {
        if scale == 0 {
            return Err(Error::geometry("scale must be positive"));
        }
        if viewport_width == 0 {
            return Err(Error::geometry("viewport width must be positive"));
        }
        if row_count == 0 {
            return Err(Error::geometry("row count must be positive"));
        }

        let raw = (viewport_width / scale) as usize;
        let n_cols = if raw % 2 == 0 { raw.saturating_sub(1) } else { raw };
        if n_cols < MIN_COLS {
            return Err(Error::geometry(format!(
                "{viewport_width}px at {scale}px per cell leaves {n_cols} columns, need at least {MIN_COLS}"
            )));
        }
        if row_count.checked_mul(scale).is_none() {
            return Err(Error::geometry(format!(
                "{row_count} rows at {scale}px per cell exceed the maximum layout height of {}px",
                u32::MAX
            )));
        }

        Ok(Self { n_rows: row_count as usize, n_cols, scale })
    }

    /// Width in pixels actually used for layout.
    pub fn layout_width(&self) -> u32 {
        (self.n_cols as u32).saturating_mul(self.scale)
    }

    /// Height in pixels of all rows. Saturates for hand-built geometries;
    /// `from_viewport` rejects any that would not fit.
    pub fn layout_height(&self) -> u32 {
        u32::try_from(self.n_rows).unwrap_or(u32::MAX).saturating_mul(self.scale)
    }

    /// Column of the single seed: `round(n_cols / 2) - 1`.
    pub fn center_col(&self) -> usize {
        (self.n_cols + 1) / 2 - 1
    }

    /// Columns that the transition rule may update.
    pub fn interior(&self) -> std::ops::Range<usize> {
        1..self.n_cols - 1
    }
}

/// A fully materialized run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    pub geometry: Geometry,
    pub rows: Vec<Row>,
}

impl Grid {
    pub fn get(&self, row: usize, col: usize) -> Option<State> {
        self.rows.get(row).and_then(|r| r.states.get(col)).copied()
    }

    pub fn live(&self) -> usize {
        self.rows.iter().map(Row::live).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_odd_width_kept() {
        let g = Geometry::from_viewport(200, 13, 10).unwrap();
        assert_eq!(g.n_cols, 15);
        assert_eq!(g.layout_width(), 195);
        assert_eq!(g.center_col(), 7);
    }

    #[test]
    fn test_even_width_trimmed() {
        let g = Geometry::from_viewport(200, 10, 10).unwrap();
        assert_eq!(g.n_cols, 19);
        assert_eq!(g.layout_width(), 190);
        assert_eq!(g.center_col(), 9);
    }

    #[test]
    fn test_too_narrow() {
        assert!(matches!(Geometry::from_viewport(20, 10, 5), Err(Error::InvalidGeometry { .. })));
        assert!(matches!(Geometry::from_viewport(5, 10, 5), Err(Error::InvalidGeometry { .. })));
        assert!(Geometry::from_viewport(30, 10, 5).is_ok());
    }

    #[test]
    fn test_zero_inputs_rejected() {
        assert!(Geometry::from_viewport(0, 10, 5).is_err());
        assert!(Geometry::from_viewport(100, 0, 5).is_err());
        assert!(Geometry::from_viewport(100, 10, 0).is_err());
    }

    #[test]
    fn test_tall_layout_rejected() {
        let err = Geometry::from_viewport(300, 100, 50_000_000).unwrap_err();
        assert!(matches!(err, Error::InvalidGeometry { .. }));
        assert!(err.to_string().contains("50000000 rows"));

        let g = Geometry::from_viewport(300, 100, u32::MAX / 100).unwrap();
        assert_eq!(g.layout_height(), (u32::MAX / 100) * 100);
    }

    #[test]
    fn test_layout_height_saturates_when_built_by_hand() {
        let g = Geometry { n_rows: 50_000_000, n_cols: 3, scale: 100 };
        assert_eq!(g.layout_height(), u32::MAX);
    }

    #[test]
    fn test_row_cells() {
        let row = Row { index: 4, states: vec![false, true, false] };
        let cells: Vec<Cell> = row.cells().collect();
        assert_eq!(cells.len(), 3);
        assert_eq!(cells[1], Cell { row: 4, col: 1, state: true });
        assert_eq!(row.live(), 1);
    }
}
