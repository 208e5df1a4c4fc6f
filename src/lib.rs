//! Deterministic 3D Perlin noise with multi-octave composition.
//!
//! The noise pattern is driven by Ken Perlin's reference permutation, so every
//! evaluation is bit-for-bit reproducible. Single-octave values and octave sums
//! are both normalized to \[0.0, 1.0\].
//!
//! ```
//! use cloudnoise::{NoiseField, OctaveParameters};
//!
//! let field = NoiseField::default();
//! let v = field.sample(1.25, 2.75, 0.5);
//! assert!((0.0..=1.0).contains(&v));
//!
//! let params = OctaveParameters::new(4, 0.5).unwrap();
//! let cloud = field.sample_fractal(1.25, 2.75, 0.5, &params);
//! assert!((0.0..=1.0).contains(&cloud));
//! ```

mod field;
mod grid;
mod octave;
mod permutation;

pub use field::NoiseField;
pub use grid::{NoiseGrid, RenderParameters};
pub use octave::OctaveParameters;
pub use permutation::{PermutationTable, REFERENCE_PERMUTATION};

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum NoiseError {
    #[error("octave count must be in [1, 64], got {0}")]
    InvalidOctaveCount(u32),
    #[error("persistence must be a positive finite number, got {0}")]
    InvalidPersistence(f64),
    #[error("permutation index {0} is outside [0, 511]")]
    InvalidIndex(usize),
    #[error("base table is not a permutation of 0..=255 (value {0} appears more than once)")]
    InvalidPermutation(u8),
    #[error("grid scale must be a positive finite number, got {0}")]
    InvalidScale(f64),
    #[error("grid depth must be finite, got {0}")]
    InvalidDepth(f64),
}
