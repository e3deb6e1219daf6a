//! Integer pixel geometry shared by the engine and hosts.

/// Axis-aligned box in container coordinates. `right`/`bottom` are exclusive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Moves the box by `dx`/`dy` without changing its size.
    pub fn offset(&mut self, dx: i32, dy: i32) {
        self.left += dx;
        self.right += dx;
        self.top += dy;
        self.bottom += dy;
    }

    /// Returns the box grown outward by `insets`.
    pub fn outset(&self, insets: Insets) -> Self {
        Self {
            left: self.left - insets.left,
            top: self.top - insets.top,
            right: self.right + insets.right,
            bottom: self.bottom + insets.bottom,
        }
    }

    /// Returns the box shrunk inward by `insets`.
    pub fn inset(&self, insets: Insets) -> Self {
        Self {
            left: self.left + insets.left,
            top: self.top + insets.top,
            right: self.right - insets.right,
            bottom: self.bottom - insets.bottom,
        }
    }
}

/// Per-edge extra space: container padding, item margins or decoration insets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Insets {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Insets {
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub const fn uniform(value: i32) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn horizontal(&self) -> i32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> i32 {
        self.top + self.bottom
    }
}

impl core::ops::Add for Insets {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            left: self.left + rhs.left,
            top: self.top + rhs.top,
            right: self.right + rhs.right,
            bottom: self.bottom + rhs.bottom,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outset_then_inset() {
        let rect = Rect::new(10, 20, 110, 70);
        let insets = Insets::new(1, 2, 3, 4);
        let grown = rect.outset(insets);
        assert_eq!(grown, Rect::new(9, 18, 113, 74));
        assert_eq!(grown.inset(insets), rect);
    }

    #[test]
    fn test_offset_keeps_size() {
        let mut rect = Rect::new(0, 0, 40, 50);
        rect.offset(5, -120);
        assert_eq!(rect, Rect::new(5, -120, 45, -70));
        assert_eq!(rect.width(), 40);
        assert_eq!(rect.height(), 50);
    }
}
