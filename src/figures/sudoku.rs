//! Sudoku boards with a highlighted row, column or square and marked duplicates.

use std::path::{Path, PathBuf};

use crate::{
    foundation::{
        color::Rgb8,
        config::Config,
        error::{ChalkError, ChalkResult},
    },
    grid::model::{CellIndex, CellRange, Grid, GridShape},
    render::grid::{CellColors, GridRenderer, GridStyle, paint_range},
};

/// A solved board.
pub const VALID: [[u8; 9]; 9] = [
    [7, 6, 8, 3, 5, 9, 2, 1, 4],
    [2, 1, 4, 7, 8, 6, 3, 9, 5],
    [3, 9, 5, 2, 4, 1, 7, 6, 8],
    [6, 5, 3, 9, 2, 4, 1, 8, 7],
    [9, 4, 2, 1, 7, 8, 6, 5, 3],
    [1, 8, 7, 6, 3, 5, 9, 4, 2],
    [4, 7, 1, 8, 6, 3, 5, 2, 9],
    [8, 3, 6, 5, 9, 2, 4, 7, 1],
    [5, 2, 9, 4, 1, 7, 8, 3, 6],
];

/// A board breaking every rule somewhere.
pub const INVALID: [[u8; 9]; 9] = [
    [8, 6, 7, 2, 1, 5, 9, 4, 6],
    [9, 8, 4, 3, 7, 7, 2, 1, 5],
    [2, 5, 9, 9, 3, 8, 3, 7, 6],
    [6, 4, 3, 5, 2, 7, 8, 9, 1],
    [8, 1, 9, 6, 3, 4, 5, 2, 7],
    [5, 7, 2, 8, 5, 1, 5, 3, 4],
    [7, 9, 5, 1, 8, 2, 4, 6, 9],
    [1, 2, 8, 4, 6, 9, 7, 5, 3],
    [4, 9, 6, 7, 5, 3, 1, 8, 2],
];

const SIDE: usize = 9;
const DARK_TEXT: Rgb8 = Rgb8::from_hex_u32(0x0D001A);
const LIGHT_TEXT: Rgb8 = Rgb8::from_hex_u32(0xF3E6FF);
const DARK_BG: Rgb8 = Rgb8::from_hex_u32(0xC2ACD1);
const LIGHT_BG: Rgb8 = Rgb8::from_hex_u32(0x9FC3E7);
const HIGHLIGHT_BG: Rgb8 = Rgb8::from_hex_u32(0x0A193B);
const MARK_BG: Rgb8 = Rgb8::from_hex_u32(0xB30059);

/// A highlighted region of the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SudokuHighlight {
    /// Row `0..9`.
    Row(usize),
    /// Column `0..9`.
    Column(usize),
    /// 3x3 square `0..9`, numbered row-major.
    Square(usize),
}

impl SudokuHighlight {
    /// Cells covered by the region.
    pub fn region(self) -> ChalkResult<CellRange> {
        let (kind, idx) = match self {
            SudokuHighlight::Row(i) => ("row", i),
            SudokuHighlight::Column(i) => ("column", i),
            SudokuHighlight::Square(i) => ("square", i),
        };
        if idx >= SIDE {
            return Err(ChalkError::validation(format!(
                "sudoku {kind} {idx} is out of range"
            )));
        }
        let shape = GridShape::new(SIDE, SIDE);
        Ok(match self {
            SudokuHighlight::Row(i) => CellRange::row(i, shape),
            SudokuHighlight::Column(i) => CellRange::column(i, shape),
            SudokuHighlight::Square(i) => square(i),
        })
    }

    /// Name used in output file names.
    pub fn name(self) -> &'static str {
        match self {
            SudokuHighlight::Row(_) => "row",
            SudokuHighlight::Column(_) => "column",
            SudokuHighlight::Square(_) => "square",
        }
    }
}

fn square(i: usize) -> CellRange {
    let (r, c) = ((i / 3) * 3, (i % 3) * 3);
    CellRange::new(r..r + 3, c..c + 3)
}

/// Cells of `region` whose value appears more than once in it, row-major.
pub fn duplicates(board: &Grid<u8>, region: SudokuHighlight) -> ChalkResult<Vec<CellIndex>> {
    let range = region.region()?;
    if !range.fits(board.shape()) {
        return Err(ChalkError::validation("sudoku board must be 9x9"));
    }
    let mut counts = [0usize; 256];
    for idx in range.iter() {
        if let Some(&v) = board.get(idx.row, idx.col) {
            counts[v as usize] += 1;
        }
    }
    Ok(range
        .iter()
        .filter(|idx| {
            board
                .get(idx.row, idx.col)
                .is_some_and(|&v| counts[v as usize] > 1)
        })
        .collect())
}

/// Per-cell colors: alternating block shading, then the highlight, then the marks.
pub fn paint(highlight: Option<SudokuHighlight>, marks: &[CellIndex]) -> ChalkResult<Grid<CellColors>> {
    let base = CellColors::new(DARK_TEXT, LIGHT_BG);
    let mut paint = Grid::filled(GridShape::new(SIDE, SIDE), base);
    for block in (0..SIDE).step_by(2) {
        paint = paint_range(&paint, &square(block), CellColors::new(DARK_TEXT, DARK_BG));
    }
    if let Some(h) = highlight {
        paint = paint_range(&paint, &h.region()?, CellColors::new(LIGHT_TEXT, HIGHLIGHT_BG));
    }
    for &m in marks {
        paint = paint_range(&paint, &CellRange::cell(m), CellColors::new(LIGHT_TEXT, MARK_BG));
    }
    Ok(paint)
}

/// Grid style of the boards: small regular-weight digits.
pub fn style() -> GridStyle {
    let mut style = GridStyle::new(CellColors::new(DARK_TEXT, LIGHT_BG), 12.0);
    style.bold = false;
    style.gap_px = 3.0;
    style.margin_px = 6.0;
    style
}

/// One board image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SudokuFigure {
    /// Output file stem.
    pub name: String,
    /// Board values.
    pub board: Grid<u8>,
    /// Highlighted region.
    pub highlight: Option<SudokuHighlight>,
    /// Cells drawn in the mark color.
    pub marks: Vec<CellIndex>,
}

impl SudokuFigure {
    fn new(valid: bool, highlight: Option<SudokuHighlight>) -> ChalkResult<Self> {
        let (prefix, board) = if valid {
            ("valid_sudoku", Grid::from_rows(&VALID)?)
        } else {
            ("invalid_sudoku", Grid::from_rows(&INVALID)?)
        };
        let marks = match highlight {
            Some(h) if !valid => duplicates(&board, h)?,
            _ => Vec::new(),
        };
        let name = match highlight {
            Some(h) => format!("{prefix}_{}_highlighted", h.name()),
            None => prefix.to_owned(),
        };
        Ok(Self {
            name,
            board,
            highlight,
            marks,
        })
    }
}

/// The eight published boards: plain, row, column and square for the valid and invalid board.
pub fn figures() -> ChalkResult<Vec<SudokuFigure>> {
    use SudokuHighlight::{Column, Row, Square};
    [
        (true, None),
        (true, Some(Row(3))),
        (true, Some(Column(2))),
        (true, Some(Square(3))),
        (false, None),
        (false, Some(Row(6))),
        (false, Some(Column(5))),
        (false, Some(Square(5))),
    ]
    .into_iter()
    .map(|(valid, h)| SudokuFigure::new(valid, h))
    .collect()
}

/// Render every board to `{out_dir}/{name}.png`.
#[tracing::instrument(skip(cfg))]
pub fn render(out_dir: &Path, cfg: &Config) -> ChalkResult<Vec<PathBuf>> {
    let mut renderer = GridRenderer::new(cfg);
    let style = style();
    figures()?
        .iter()
        .map(|fig| {
            let paint = paint(fig.highlight, &fig.marks)?;
            renderer.render_painted_png(
                &fig.board,
                &paint,
                &style,
                &out_dir.join(format!("{}.png", fig.name)),
            )
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/figures/sudoku.rs"]
mod tests;
