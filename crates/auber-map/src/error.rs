use thiserror::Error;

/// Failure to parse an ASCII station layout. Rows and columns are counted in
/// text order from the top-left.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MapError {
    #[error("layout has no rows")]
    EmptyLayout,

    #[error("row {row} has {found} tiles, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown glyph {glyph:?} at row {row}, column {col}")]
    UnknownGlyph { glyph: char, row: usize, col: usize },

    #[error("layout has no player spawn ('P')")]
    MissingSpawn,

    #[error("second player spawn at row {row}, column {col}")]
    DuplicateSpawn { row: usize, col: usize },

    #[error("teleporter pad {pad:?} appears {count} times, expected a pair")]
    UnpairedTeleporter { pad: char, count: usize },
}
