//! Directional text ranges over code-point positions.
//!
//! A range keeps the order in which it was produced: `base` is where a
//! selection started and `extent` is where it grew to, so `base` may lie
//! after `extent`. Callers that only care about coverage use the
//! normalized `start`/`end` accessors.

/// A directional range of code-point positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRange {
    base: usize,
    extent: usize,
}

impl TextRange {
    /// Create a range from its directional endpoints.
    pub fn new(base: usize, extent: usize) -> Self {
        Self { base, extent }
    }

    /// Create a collapsed range (a caret) at `position`.
    pub fn collapsed(position: usize) -> Self {
        Self {
            base: position,
            extent: position,
        }
    }

    /// Position the range started from.
    pub fn base(&self) -> usize {
        self.base
    }

    /// Position the range grew to.
    pub fn extent(&self) -> usize {
        self.extent
    }

    /// Lower bound regardless of direction.
    pub fn start(&self) -> usize {
        self.base.min(self.extent)
    }

    /// Upper bound regardless of direction.
    pub fn end(&self) -> usize {
        self.base.max(self.extent)
    }

    /// Number of positions covered.
    pub fn len(&self) -> usize {
        self.end() - self.start()
    }

    /// Check whether the range covers nothing (a caret).
    pub fn is_collapsed(&self) -> bool {
        self.base == self.extent
    }

    /// The caret position. Meaningful only for collapsed ranges.
    pub fn position(&self) -> usize {
        self.extent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapsed() {
        let range = TextRange::collapsed(3);
        assert_eq!(range.base(), 3);
        assert_eq!(range.extent(), 3);
        assert!(range.is_collapsed());
        assert_eq!(range.len(), 0);
        assert_eq!(range.position(), 3);
    }

    #[test]
    fn test_forward_range() {
        let range = TextRange::new(1, 4);
        assert_eq!(range.start(), 1);
        assert_eq!(range.end(), 4);
        assert_eq!(range.len(), 3);
        assert!(!range.is_collapsed());
    }

    #[test]
    fn test_reversed_range_keeps_direction() {
        // A selection dragged right-to-left: base after extent.
        let range = TextRange::new(4, 1);
        assert_eq!(range.base(), 4);
        assert_eq!(range.extent(), 1);
        assert_eq!(range.start(), 1);
        assert_eq!(range.end(), 4);
    }
}
