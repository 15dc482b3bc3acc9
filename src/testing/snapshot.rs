//! Snapshot rendering helpers.
//!
//! Turn rendered strips into plain text for assertions and `insta`
//! snapshots.

use crate::geometry::Region;
use crate::render::Strip;
use crate::theme::Theme;
use crate::widget::Widget;

/// Render a widget at the origin with the default theme and return the
/// `width` x `height` area as text.
///
/// Each row becomes one line with trailing spaces trimmed; lines are joined
/// with `'\n'`. Strips outside the area are clipped, so an open popup needs
/// a tall enough area to show.
pub fn render_to_string(widget: &dyn Widget, width: i32, height: i32) -> String {
    let strips = widget.render(Region::new(0, 0, width, height), &Theme::default());
    strips_to_string(&strips, width, height)
}

/// Overlay strips on a blank `width` x `height` grid and return it as text.
pub fn strips_to_string(strips: &[Strip], width: i32, height: i32) -> String {
    if width <= 0 || height <= 0 {
        return String::new();
    }
    let mut grid = vec![vec![' '; width as usize]; height as usize];
    for strip in strips {
        if strip.y < 0 || strip.y >= height {
            continue;
        }
        let row = &mut grid[strip.y as usize];
        for (i, cell) in strip.cells.iter().enumerate() {
            let x = strip.x_offset + i as i32;
            if (0..width).contains(&x) {
                row[x as usize] = cell.ch;
            }
        }
    }
    grid.into_iter()
        .map(|row| row.into_iter().collect::<String>().trim_end().to_owned())
        .collect::<Vec<_>>()
        .join("\n")
}

// ===========================================================================
// Tests
// ===========================================================================
