//! Blindfolded solving metrics, found by simulating a 3-style solve.
//!
//! Each piece system is "solved" by repeatedly swapping the piece in the
//! buffer slot into its home slot. Every swap is one target, and two targets
//! make one algorithm.

use serde::Serialize;

use crate::{
    cube::{CubeState, is_identity},
    error::BldError,
    slots::{CornerSlot, EdgeSlot},
};

/// The number of algorithms needed to fix `count` pieces that are in their
/// home slot but misoriented.
///
/// | count | 0 | 1 | 2-4 | 5 | 6-8 | 9 | 10-11 |
/// |-------|---|---|-----|---|-----|---|-------|
/// | algs  | 0 | 1 | 2   | 3 | 4   | 5 | 6     |
pub fn orientation_alg_cost(count: u32) -> Result<u32, BldError> {
    match count {
        0 => Ok(0),
        1 => Ok(1),
        2..=4 => Ok(2),
        5 => Ok(3),
        6..=8 => Ok(4),
        9 => Ok(5),
        10..=11 => Ok(6),
        _ => Err(BldError::InvalidOrientationCount(count)),
    }
}

/// The outcome of virtually solving one piece system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrbitSolve {
    /// Number of pairwise swaps performed.
    pub targets: u32,
    /// Whether the buffer was ever found solved and oriented between
    /// algorithms, letting the solve move on to another slot for free.
    pub floated: bool,
}

/// Simulates the solve of one piece system, starting at `buffer`.
///
/// When the buffer holds its own piece, oriented, after an even number of
/// targets (an algorithm boundary), the solve floats: the first unsolved slot
/// becomes the buffer without spending a cycle break.
///
/// The arrays are taken by value and act as the scratch space of the solve.
pub fn virtual_solve<const N: usize>(
    mut perm: [u8; N],
    mut ori: [u8; N],
    mut buffer: usize,
    orientation_count: u8,
) -> OrbitSolve {
    let mut targets = 0;
    let mut floated = false;

    while !is_identity(&perm) {
        let target = if usize::from(perm[buffer]) == buffer {
            // The piece system isn't solved, so something is out of place
            let first_unsolved = (0..N)
                .find(|&i| usize::from(perm[i]) != i)
                .unwrap_or(buffer);

            if targets % 2 == 0 && ori[buffer] == 0 {
                floated = true;
                buffer = first_unsolved;
                continue;
            }

            first_unsolved
        } else {
            usize::from(perm[buffer])
        };

        perm.swap(buffer, target);
        ori[buffer] = (ori[buffer] + ori[target]) % orientation_count;
        ori[target] = 0;
        targets += 1;
    }

    OrbitSolve { targets, floated }
}

/// Counts pieces other than the buffer that sit in their home slot with a
/// nonzero orientation.
fn misoriented_in_place(perm: &[u8], ori: &[u8], buffer: usize) -> u32 {
    let count = perm
        .iter()
        .zip(ori)
        .enumerate()
        .filter(|&(i, (&piece, &o))| i != buffer && usize::from(piece) == i && o != 0)
        .count();
    // At most 11 pieces qualify
    count as u32
}

/// Solving metrics for one scramble and buffer choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SolveMetrics {
    pub algorithm_count: u32,
    pub has_parity: bool,
    pub flip_count: u32,
    pub twist_count: u32,
    pub can_float_edges: bool,
    pub can_float_corners: bool,
    pub edge_targets: u32,
    pub corner_targets: u32,
}

impl CubeState {
    /// Computes the blindfolded solving metrics of this state for the given
    /// buffers. The state itself is left untouched.
    pub fn compute_metrics(
        &self,
        edge_buffer: EdgeSlot,
        corner_buffer: CornerSlot,
    ) -> Result<SolveMetrics, BldError> {
        let edge_buffer = edge_buffer.index();
        let corner_buffer = corner_buffer.index();

        let flip_count =
            misoriented_in_place(self.edge_permutation(), self.edge_orientation(), edge_buffer);
        let twist_count = misoriented_in_place(
            self.corner_permutation(),
            self.corner_orientation(),
            corner_buffer,
        );

        let edges = virtual_solve(
            *self.edge_permutation(),
            *self.edge_orientation(),
            edge_buffer,
            2,
        );
        let corners = virtual_solve(
            *self.corner_permutation(),
            *self.corner_orientation(),
            corner_buffer,
            3,
        );

        // Corner and edge parity always agree on a reachable cube, so the
        // edges decide
        let has_parity = edges.targets % 2 == 1;
        let cycle_algs = (edges.targets + corners.targets) / 2;

        Ok(SolveMetrics {
            algorithm_count: cycle_algs
                + orientation_alg_cost(flip_count)?
                + orientation_alg_cost(twist_count)?,
            has_parity,
            flip_count,
            twist_count,
            can_float_edges: edges.floated,
            can_float_corners: corners.floated,
            edge_targets: edges.targets,
            corner_targets: corners.targets,
        })
    }
}
