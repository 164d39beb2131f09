// canvas.rs - Painted cells, kept between frames for drawing

use elementary::{Cell, Geometry, State, Surface};

/// Everything painted by the current run so far.
#[derive(Debug, Default)]
pub struct Canvas {
    geometry: Option<Geometry>,
    rows: Vec<Vec<State>>,
}

impl Canvas {
    pub fn set_geometry(&mut self, geometry: Geometry) {
        self.geometry = Some(geometry);
    }

    pub fn geometry(&self) -> Option<Geometry> {
        self.geometry
    }

    /// Drops geometry and cells; nothing is drawn until the next run.
    pub fn reset(&mut self) {
        self.geometry = None;
        self.rows.clear();
    }

    pub fn rows(&self) -> &[Vec<State>] {
        &self.rows
    }

    /// Rows whose every cell has been painted.
    pub fn complete_rows(&self) -> usize {
        let Some(geometry) = self.geometry else { return 0 };
        self.rows.iter().take_while(|r| r.len() == geometry.n_cols).count()
    }

    pub fn live(&self) -> usize {
        self.rows.iter().flatten().filter(|&&s| s).count()
    }

    pub fn painted(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    pub fn row_text(&self, row: usize) -> String {
        self.rows
            .get(row)
            .map(|r| r.iter().map(|&s| if s { '█' } else { ' ' }).collect())
            .unwrap_or_default()
    }
}

impl Surface for Canvas {
    fn clear(&mut self) {
        self.rows.clear();
    }

    fn paint(&mut self, cell: Cell) {
        if cell.row >= self.rows.len() {
            self.rows.resize_with(cell.row + 1, Vec::new);
        }
        let row = &mut self.rows[cell.row];
        if cell.col >= row.len() {
            row.resize(cell.col + 1, false);
        }
        row[cell.col] = cell.state;
    }
}
