//! Outline operations on index loops over a shared vertex buffer.
//!
//! # Example
//!
//! ```
//! use anticone::polygon::{check_convex, signed_area, split_index_buffer};
//! use anticone::Vec2;
//!
//! let vertices: Vec<Vec2<f64>> = vec![
//!     Vec2::new(0.0, 0.0),
//!     Vec2::new(2.0, 0.0),
//!     Vec2::new(2.0, 2.0),
//!     Vec2::new(0.0, 2.0),
//! ];
//! let outline = [0, 1, 2, 3];
//! assert_eq!(signed_area(&vertices, &outline), 4.0);
//!
//! let (a, b) = split_index_buffer(&outline, 0, 2).unwrap();
//! assert!(check_convex(&vertices, &a) && check_convex(&vertices, &b));
//! ```

mod outline;

pub use outline::{
    check_ccw, check_convex, minus_wrap, outline_coordinates, plus_wrap, signed_area,
    split_index_buffer,
};
