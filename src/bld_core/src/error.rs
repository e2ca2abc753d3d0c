use thiserror::Error;

/// Validation failures raised while turning a scramble into solving metrics.
///
/// Every variant concerns one candidate only, so batch callers can skip the
/// offending scramble and keep going.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BldError {
    #[error("Unrecognized move token {0:?}, expected one of U D F B R L optionally followed by 2 or '")]
    InvalidMoveToken(String),
    #[error("Unrecognized buffer label {0:?}")]
    InvalidBufferLabel(String),
    #[error("Orientation count {0} is outside the supported range 0 to 11")]
    InvalidOrientationCount(u32),
    #[error("Invalid cube state: {0}")]
    InvalidCubeState(&'static str),
}
