//! Floating-point vector primitives.

mod mat2;
mod vec2;

pub use mat2::Mat2;
pub use vec2::Vec2;
