use crate::geometry::Rotation;
use crate::view::ViewContext;

/// Next selection for `rotation` within a list of `len` items, wrapping at
/// both ends. An empty list pins the selection at 0.
pub fn step(_context: ViewContext, index: usize, len: usize, rotation: Rotation) -> usize {
    let total = len.max(1);
    let index = index % total;
    match rotation {
        Rotation::Clockwise => (index + 1) % total,
        Rotation::CounterClockwise => (index + total - 1) % total,
    }
}

/// Largest valid index for a list that now holds `len` items.
pub fn clamp(index: usize, len: usize) -> usize {
    index.min(len.saturating_sub(1))
}
