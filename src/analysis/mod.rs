//! Analysis results as produced by the backends.
//!
//! The gateway never inspects upload payloads; this module is for clients
//! (the CLI) that want a typed, defensively decoded view and the same
//! display conventions the dashboard uses.

pub mod format;
pub mod model;

pub use model::{AiAnalysis, AnalysisResults, PersonProfile, Stats, UserCount};
