//! plumbline: an observation-only balance probe for 3D point clouds.
//!
//! A raw cloud is deterministically subsampled, centered and scaled into the
//! unit ball, then swept over a grid of `(mode, alpha, k, theta)` parameter
//! combinations. Each combination derives a latent scalar field `w` per
//! point and reduces two bounded channels (`a`, `s`) plus denominator
//! diagnostics into a statistics row. Repeating the sweep over
//! independently-seeded passes yields cross-pass mean/std summaries that
//! measure numerical stability of the field, never the geometry itself.

pub mod cli;
pub mod config;
pub mod core;
pub mod io;
