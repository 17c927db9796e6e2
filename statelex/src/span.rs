/// Source position tracking.
///
/// The reader keeps an absolute [`Pos`] for the rune most recently read.
/// Rows are 1-based. Columns count runes on the current row: the column is
/// `0` before the first rune of a row has been read and `1` after it, so a
/// token that starts with the first rune of a row reports column `1`.

/// A single position in the rune stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos {
    /// Row number (1-based).
    pub row: usize,
    /// Column number, in runes.
    pub col: usize,
}

impl Pos {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The position before anything has been read.
    pub const fn origin() -> Self {
        Self { row: 1, col: 0 }
    }

    /// Advance past `ch`.
    ///
    /// A newline moves to the next row and resets the column, anything else
    /// moves one column to the right.
    pub fn advance(&mut self, ch: char) {
        if ch == '\n' {
            self.row += 1;
            self.col = 0;
        } else {
            self.col += 1;
        }
    }
}

impl Default for Pos {
    fn default() -> Self {
        Self::origin()
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.row, self.col)
    }
}
