//! Bounding volume computation.

mod bbox;

pub use bbox::Bbox;
