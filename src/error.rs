//! Error types for diagram construction and configuration

use std::fmt;

/// Errors that can occur while configuring or building a Voronoi diagram
///
/// Geometric degeneracies that the sweep handles by policy (parallel
/// bisectors, collinear site triples, zero-area cells) are *not* errors;
/// they resolve to empty intersections or skipped circle events.
#[derive(Debug, Clone)]
pub enum VoronoiError {
    /// Configuration or input validation failed
    InvalidConfig(String),
    /// A geometric primitive was built from degenerate input
    /// (e.g. a half-edge with a zero direction vector)
    DegenerateInput(String),
    /// The beach line reached a state the sweep's invariants forbid.
    /// This signals a logic defect, not bad input; the sweep cannot
    /// continue and must be restarted from the original site set.
    InvariantViolation(String),
}

impl fmt::Display for VoronoiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VoronoiError::InvalidConfig(msg) => write!(f, "invalid configuration: {}", msg),
            VoronoiError::DegenerateInput(msg) => write!(f, "degenerate input: {}", msg),
            VoronoiError::InvariantViolation(msg) => {
                write!(f, "beach line invariant violated: {}", msg)
            }
        }
    }
}

impl std::error::Error for VoronoiError {}

/// Result type alias for voronoi operations
pub type Result<T> = std::result::Result<T, VoronoiError>;
