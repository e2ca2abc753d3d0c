//! Matching scrambles against desired solving metrics.

use serde::{Deserialize, Serialize};

use crate::{
    cube::CubeState,
    error::BldError,
    metrics::SolveMetrics,
    slots::{CornerSlot, EdgeSlot},
};

/// Desired values for the solving metrics. A field left as `None` accepts
/// anything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Criteria {
    pub algorithm_count: Option<u32>,
    pub flip_count: Option<u32>,
    pub twist_count: Option<u32>,
    pub has_parity: Option<bool>,
    pub can_float_edges: Option<bool>,
    pub can_float_corners: Option<bool>,
}

fn accepts<T: PartialEq>(wanted: Option<T>, actual: T) -> bool {
    wanted.is_none_or(|wanted| wanted == actual)
}

impl Criteria {
    pub fn is_any(&self) -> bool {
        *self == Criteria::default()
    }

    pub fn matches(&self, metrics: &SolveMetrics) -> bool {
        accepts(self.algorithm_count, metrics.algorithm_count)
            && accepts(self.flip_count, metrics.flip_count)
            && accepts(self.twist_count, metrics.twist_count)
            && accepts(self.has_parity, metrics.has_parity)
            && accepts(self.can_float_edges, metrics.can_float_edges)
            && accepts(self.can_float_corners, metrics.can_float_corners)
    }
}

/// Decides whether scrambles meet a [`Criteria`] for a given pair of
/// buffers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrambleFilter {
    pub edge_buffer: EdgeSlot,
    pub corner_buffer: CornerSlot,
    pub criteria: Criteria,
}

impl ScrambleFilter {
    pub fn new(edge_buffer: EdgeSlot, corner_buffer: CornerSlot, criteria: Criteria) -> Self {
        ScrambleFilter {
            edge_buffer,
            corner_buffer,
            criteria,
        }
    }

    pub fn from_labels(
        edge_buffer: &str,
        corner_buffer: &str,
        criteria: Criteria,
    ) -> Result<Self, BldError> {
        Ok(ScrambleFilter::new(
            edge_buffer.parse()?,
            corner_buffer.parse()?,
            criteria,
        ))
    }

    /// Replays `scramble` on a solved cube and measures it.
    pub fn evaluate(&self, scramble: &str) -> Result<SolveMetrics, BldError> {
        let mut state = CubeState::solved();
        state.apply_scramble(scramble)?;
        state.compute_metrics(self.edge_buffer, self.corner_buffer)
    }

    pub fn passes(&self, scramble: &str) -> Result<bool, BldError> {
        Ok(self.criteria.matches(&self.evaluate(scramble)?))
    }
}

/// Checks one scramble against `criteria`, with buffers given by their slot
/// labels (for example `"UF"` and `"UFR"`).
pub fn scramble_matches(
    scramble: &str,
    edge_buffer: &str,
    corner_buffer: &str,
    criteria: Criteria,
) -> Result<bool, BldError> {
    ScrambleFilter::from_labels(edge_buffer, corner_buffer, criteria)?.passes(scramble)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_metrics() -> SolveMetrics {
        SolveMetrics {
            algorithm_count: 7,
            has_parity: true,
            flip_count: 0,
            twist_count: 1,
            can_float_edges: false,
            can_float_corners: true,
            edge_targets: 9,
            corner_targets: 3,
        }
    }

    #[test]
    fn absent_criteria_always_pass() {
        assert!(Criteria::default().is_any());
        assert!(Criteria::default().matches(&sample_metrics()));
    }

    #[test]
    fn present_criteria_are_anded() {
        let m = sample_metrics();

        let algs_only = Criteria {
            algorithm_count: Some(7),
            ..Default::default()
        };
        assert!(algs_only.matches(&m));
        assert!(!algs_only.is_any());

        let algs_without_parity = Criteria {
            algorithm_count: Some(7),
            has_parity: Some(false),
            ..Default::default()
        };
        assert!(!algs_without_parity.matches(&m));

        let everything = Criteria {
            algorithm_count: Some(7),
            flip_count: Some(0),
            twist_count: Some(1),
            has_parity: Some(true),
            can_float_edges: Some(false),
            can_float_corners: Some(true),
        };
        assert!(everything.matches(&m));
        assert!(
            !Criteria {
                can_float_corners: Some(false),
                ..everything
            }
            .matches(&m)
        );
    }

    #[test]
    fn filter_applies_buffers_and_criteria() {
        let criteria = Criteria {
            algorithm_count: Some(3),
            has_parity: Some(false),
            can_float_edges: Some(true),
            ..Default::default()
        };
        assert_eq!(scramble_matches("R U R' U'", "UF", "UFR", criteria), Ok(true));
        // UR is part of the edge three-cycle, so there is no float from it
        assert_eq!(scramble_matches("R U R' U'", "UR", "UFR", criteria), Ok(false));
    }

    #[test]
    fn filter_reports_bad_input() {
        let criteria = Criteria::default();
        assert_eq!(
            scramble_matches("R U R' U'", "FU", "UFR", criteria),
            Err(BldError::InvalidBufferLabel("FU".to_owned()))
        );
        assert_eq!(
            scramble_matches("R U R' U'", "UF", "URF", criteria),
            Err(BldError::InvalidBufferLabel("URF".to_owned()))
        );
        assert_eq!(
            scramble_matches("R U R2' U'", "UF", "UFR", criteria),
            Err(BldError::InvalidMoveToken("R2'".to_owned()))
        );
    }
}
