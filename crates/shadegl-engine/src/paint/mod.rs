//! Color representation for surface clears.

mod color;

pub use color::Color;
