//! Core geometry types: Offset, Size, Region.
//!
//! Coordinates are terminal cells. Components use [`Region`] both for layout
//! (where a part is drawn) and for hit testing (which part a click landed on).

use std::ops::Add;

// ---------------------------------------------------------------------------
// Offset
// ---------------------------------------------------------------------------

/// A position in terminal cells.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Offset {
    pub x: i32,
    pub y: i32,
}

impl Offset {
    /// Create a new offset.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Offset {
    type Output = Offset;
    #[inline]
    fn add(self, rhs: Offset) -> Offset {
        Offset { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

// ---------------------------------------------------------------------------
// Size
// ---------------------------------------------------------------------------

/// A 2D size in terminal cells (width x height).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

// ---------------------------------------------------------------------------
// Region
// ---------------------------------------------------------------------------

/// A rectangular region in terminal cells defined by position and size.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Region {
    /// An empty region at the origin.
    pub const EMPTY: Region = Region { x: 0, y: 0, width: 0, height: 0 };

    /// Create a new region.
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Create a region from a position and a size.
    #[inline]
    pub const fn from_offset_size(offset: Offset, size: Size) -> Self {
        Self { x: offset.x, y: offset.y, width: size.width, height: size.height }
    }

    /// The right edge (exclusive): `x + width`.
    #[inline]
    pub const fn right(self) -> i32 {
        self.x + self.width
    }

    /// The bottom edge (exclusive): `y + height`.
    #[inline]
    pub const fn bottom(self) -> i32 {
        self.y + self.height
    }

    /// The top-left corner as an [`Offset`].
    #[inline]
    pub const fn offset(self) -> Offset {
        Offset { x: self.x, y: self.y }
    }

    /// Whether the region covers no cells.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Whether the point (x, y) lies inside this region.
    #[inline]
    pub const fn contains(self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Whether the offset lies inside this region.
    #[inline]
    pub const fn contains_point(self, point: Offset) -> bool {
        self.contains(point.x, point.y)
    }

    /// The smallest region that covers both `self` and `other`.
    ///
    /// Empty regions are ignored, so `EMPTY.union(r) == r`.
    pub fn union(self, other: Region) -> Region {
        if self.is_empty() {
            return other;
        }
        if other.is_empty() {
            return self;
        }
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Region::new(x, y, right - x, bottom - y)
    }

    /// The overlap of `self` and `other`; empty when they do not meet.
    pub fn intersection(self, other: Region) -> Region {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right <= x || bottom <= y {
            return Region::EMPTY;
        }
        Region::new(x, y, right - x, bottom - y)
    }

    /// The cell a pointer would hit to activate this region: its center,
    /// rounded toward the top-left.
    #[inline]
    pub const fn center(self) -> Offset {
        Offset { x: self.x + self.width / 2, y: self.y + self.height / 2 }
    }

    /// Move the region by `delta`.
    #[inline]
    pub fn translate(self, delta: Offset) -> Region {
        Region { x: self.x + delta.x, y: self.y + delta.y, ..self }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
