//! Screen buffer assembly.
//!
//! The `Compositor` holds a 2D grid of `StyledCell`s for the whole surface.
//! Widgets render into strips, which are placed in mount order, so a popup
//! drawn by a later widget covers what lies beneath it.

use crate::geometry::Region;

use super::strip::{CellStyle, Strip, StyledCell};

/// A `width` x `height` grid of cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compositor {
    /// `screen[y][x]` is the cell at column x, row y.
    screen: Vec<Vec<StyledCell>>,
    pub width: u16,
    pub height: u16,
}

impl Compositor {
    /// A blank screen of the given size.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            screen: blank_screen(width, height),
            width,
            height,
        }
    }

    /// Resize and blank the buffer.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.screen = blank_screen(width, height);
    }

    /// Reset every cell to a blank.
    pub fn clear(&mut self) {
        self.screen = blank_screen(self.width, self.height);
    }

    pub fn bounds(&self) -> Region {
        Region::new(0, 0, i32::from(self.width), i32::from(self.height))
    }

    /// Write strips into the buffer, clipped to `clip` and to the screen.
    pub fn place_strips(&mut self, strips: &[Strip], clip: Region) {
        let clip = clip.intersection(self.bounds());
        if clip.is_empty() {
            return;
        }
        for strip in strips {
            if strip.y < clip.y || strip.y >= clip.bottom() {
                continue;
            }
            let row = &mut self.screen[strip.y as usize];
            for (i, cell) in strip.cells.iter().enumerate() {
                let x = strip.x_offset + i as i32;
                if x < clip.x || x >= clip.right() {
                    continue;
                }
                row[x as usize] = cell.clone();
            }
        }
    }

    /// The cell at (x, y), or `None` off-screen.
    pub fn get_cell(&self, x: u16, y: u16) -> Option<&StyledCell> {
        self.screen
            .get(y as usize)
            .and_then(|row| row.get(x as usize))
    }

    /// Row `y` as text, trailing spaces trimmed.
    pub fn row_text(&self, y: u16) -> String {
        self.screen
            .get(y as usize)
            .map(|row| {
                let line: String = row.iter().map(|c| c.ch).collect();
                line.trim_end().to_owned()
            })
            .unwrap_or_default()
    }

    /// The whole screen as text: one trimmed line per row, joined with `'\n'`.
    pub fn to_text(&self) -> String {
        (0..self.height)
            .map(|y| self.row_text(y))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn blank_screen(width: u16, height: u16) -> Vec<Vec<StyledCell>> {
    let blank = StyledCell::new(' ', CellStyle::default());
    vec![vec![blank; width as usize]; height as usize]
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn make_strip(y: i32, x_offset: i32, text: &str) -> Strip {
        let mut strip = Strip::new(y, x_offset);
        strip.push_str(text, &CellStyle::default());
        strip
    }

    #[test]
    fn new_compositor_is_blank() {
        let c = Compositor::new(10, 3);
        assert_eq!(c.get_cell(9, 2).map(|cell| cell.ch), Some(' '));
        assert!(c.get_cell(10, 0).is_none());
        assert_eq!(c.to_text(), "\n\n");
    }

    #[test]
    fn place_strips_clips_to_screen() {
        let mut c = Compositor::new(6, 2);
        let bounds = c.bounds();
        c.place_strips(&[make_strip(1, 3, "abcdef"), make_strip(5, 0, "zz")], bounds);
        assert_eq!(c.row_text(1), "   abc");
        assert_eq!(c.row_text(0), "");
    }

    #[test]
    fn place_strips_clips_to_region() {
        let mut c = Compositor::new(10, 1);
        c.place_strips(&[make_strip(0, 0, "0123456789")], Region::new(2, 0, 3, 1));
        assert_eq!(c.row_text(0), "  234");
    }

    #[test]
    fn later_strips_cover_earlier_ones() {
        let mut c = Compositor::new(8, 1);
        let bounds = c.bounds();
        c.place_strips(&[make_strip(0, 0, "aaaaaaaa")], bounds);
        c.place_strips(&[make_strip(0, 2, "bb")], bounds);
        assert_eq!(c.to_text(), "aabbaaaa");
    }

    #[test]
    fn resize_and_clear_blank_the_buffer() {
        let mut c = Compositor::new(4, 1);
        let bounds = c.bounds();
        c.place_strips(&[make_strip(0, 0, "xxxx")], bounds);
        c.clear();
        assert_eq!(c.to_text(), "");
        c.resize(2, 2);
        assert_eq!((c.width, c.height), (2, 2));
        assert_eq!(c.to_text(), "\n");
    }
}
