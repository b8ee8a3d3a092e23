pub mod aggregate;
pub mod grid;
pub mod normalize;
pub mod projector;
pub mod sampler;
pub mod sweep;

/// A raw cartesian coordinate triple, in file order.
pub type Point = [f64; 3];
