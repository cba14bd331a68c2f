//! The five concrete dataflow analyses and the name-keyed registry that
//! dispatches to them uniformly.

pub mod interval;
pub mod reachable;
pub mod registry;
pub mod sign;

pub use registry::{get_analysis_results, list_analyses, AnalysisOutput, GraphKind};
