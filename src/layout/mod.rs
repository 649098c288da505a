//! Layout: fractional rects to absolute pixels, plus inventory grid geometry.

pub mod grid;
pub mod resolve;

pub use grid::GridGeometry;
pub use resolve::{clamp_aspect, resolve};
