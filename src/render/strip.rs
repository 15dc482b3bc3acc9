//! Strip: a horizontal line of styled terminal cells.
//!
//! Widgets render into `Vec<Strip>`. A strip is one row at a given y position,
//! starting at `x_offset`; later strips overwrite earlier ones where they
//! overlap, which is how a popup is drawn over whatever lies below a field.

// ---------------------------------------------------------------------------
// CellStyle
// ---------------------------------------------------------------------------

/// Visual style for a single terminal cell.
///
/// Colors are opaque names taken from the [`Theme`](crate::theme::Theme).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CellStyle {
    pub fg: Option<String>,
    pub bg: Option<String>,
    pub bold: bool,
    pub dim: bool,
    pub underline: bool,
    pub reverse: bool,
}

impl CellStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// A style with only a foreground color.
    pub fn fg(color: &str) -> Self {
        Self {
            fg: Some(color.to_owned()),
            ..Self::default()
        }
    }

    pub fn with_bg(mut self, color: &str) -> Self {
        self.bg = Some(color.to_owned());
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn dim(mut self) -> Self {
        self.dim = true;
        self
    }

    pub fn reverse(mut self) -> Self {
        self.reverse = true;
        self
    }
}

// ---------------------------------------------------------------------------
// StyledCell
// ---------------------------------------------------------------------------

/// A single terminal cell: one character with associated style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledCell {
    pub ch: char,
    pub style: CellStyle,
}

impl StyledCell {
    pub fn new(ch: char, style: CellStyle) -> Self {
        Self { ch, style }
    }
}

// ---------------------------------------------------------------------------
// Strip
// ---------------------------------------------------------------------------

/// A horizontal line of styled terminal cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Strip {
    /// The row this strip occupies.
    pub y: i32,
    /// Starting x position for this strip's cells.
    pub x_offset: i32,
    /// The cells in left-to-right order.
    pub cells: Vec<StyledCell>,
}

impl Strip {
    /// Create a new empty strip at the given row and x offset.
    pub fn new(y: i32, x_offset: i32) -> Self {
        Self {
            y,
            x_offset,
            cells: Vec::new(),
        }
    }

    /// Push a single character with the given style.
    pub fn push(&mut self, ch: char, style: CellStyle) {
        self.cells.push(StyledCell::new(ch, style));
    }

    /// Push every character of `text` with the same style.
    pub fn push_str(&mut self, text: &str, style: &CellStyle) {
        self.cells
            .extend(text.chars().map(|ch| StyledCell::new(ch, style.clone())));
    }

    /// Push `text` left-aligned in a field of exactly `width` cells,
    /// truncating or padding with spaces.
    pub fn push_padded(&mut self, text: &str, width: usize, style: &CellStyle) {
        let mut written = 0;
        for ch in text.chars().take(width) {
            self.push(ch, style.clone());
            written += 1;
        }
        for _ in written..width {
            self.push(' ', style.clone());
        }
    }

    /// The width of this strip in cells.
    pub fn width(&self) -> i32 {
        self.cells.len() as i32
    }

    /// Pad the strip to exactly `width` cells using spaces with the given style.
    ///
    /// If the strip is already wider than `width`, it is truncated.
    pub fn fill(&mut self, width: i32, style: CellStyle) {
        let w = width.max(0) as usize;
        if self.cells.len() < w {
            self.cells.resize(w, StyledCell::new(' ', style));
        } else {
            self.cells.truncate(w);
        }
    }

    /// The text of the strip, without styles.
    pub fn text(&self) -> String {
        self.cells.iter().map(|c| c.ch).collect()
    }

    /// The cell at absolute column `x`, if the strip covers it.
    pub fn cell_at(&self, x: i32) -> Option<&StyledCell> {
        let idx = x.checked_sub(self.x_offset)?;
        usize::try_from(idx).ok().and_then(|i| self.cells.get(i))
    }
}

// ===========================================================================
// Tests
// ===========================================================================
