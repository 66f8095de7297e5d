use crate::*;
pub use random::*;
pub use scripted::*;

mod random;
mod scripted;

/// Source of the colors appended to the sequence, one per round.
pub trait ColorSource {
    /// Picks a color in `0..color_count`. `color_count` is never zero.
    fn next_color(&mut self, color_count: usize) -> ColorIndex;
}

impl<C: ColorSource + ?Sized> ColorSource for &mut C {
    fn next_color(&mut self, color_count: usize) -> ColorIndex {
        (**self).next_color(color_count)
    }
}
