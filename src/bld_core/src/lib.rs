#![warn(clippy::pedantic)]
#![allow(clippy::cast_possible_truncation)]

//! Cube-state model and blindfolded (BLD) solving metrics for 3x3 scrambles.
//!
//! A scramble is replayed on a [`cube::CubeState`], which is then "solved"
//! virtually from a pair of buffers to count algorithms, detect parity, and
//! detect floats. [`filter::ScrambleFilter`] compares those metrics with a
//! set of optional criteria, and [`batch::generate_scrambles`] keeps pulling
//! candidates from a scramble source until enough of them match.

pub mod batch;
pub mod cube;
pub mod error;
pub mod filter;
pub mod metrics;
pub mod slots;

pub use batch::{GenerateReport, GenerateRequest, ScrambleSource, generate_scrambles};
pub use cube::{CubeState, MoveInstance, MoveSequence};
pub use error::BldError;
pub use filter::{Criteria, ScrambleFilter, scramble_matches};
pub use metrics::SolveMetrics;
pub use slots::{CornerSlot, EdgeSlot};
