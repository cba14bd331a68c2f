//! The process-wide analysis registry: a name maps to a graph kind
//! plus an erased runner that produces annotations and a covered-area
//! projection uniformly, regardless of which concrete domain backs it.

use core_ast::{AstContext, Annotations};
use core_cfg::Cfg;
use core_geo::Polygon;

use crate::{interval, reachable, sign};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphKind {
    Forward,
    Backward,
}

/// The result of running one registered analysis, with its concrete domain
/// already erased into annotation strings and covered-area polygons.
pub struct AnalysisOutput {
    pub graph_kind: GraphKind,
    pub converged: bool,
    pub annotations: Annotations,
    pub covered_area: Vec<Polygon>,
}

const NAMES: &[&str] = &[
    "sign",
    "interval",
    "interval-widening",
    "past-operations",
    "future-operations",
];

/// Returns the known analysis names in stable (sorted) order, for
/// deterministic `--help` output.
pub fn list_analyses() -> Vec<&'static str> {
    let mut names = NAMES.to_vec();
    names.sort_unstable();
    names
}

/// Looks up and runs an analysis by name. Returns `None` for unknown names;
/// the caller is expected to report that as an "analysis unknown" error.
pub fn get_analysis_results(name: &str, ctx: &AstContext, cfg: &Cfg) -> Option<AnalysisOutput> {
    match name {
        "sign" => {
            let result = sign::run(ctx, cfg);
            let mut annotations = Annotations::new();
            sign::annotate(ctx, cfg, &result, &mut annotations);
            Some(AnalysisOutput {
                graph_kind: GraphKind::Forward,
                converged: result.converged,
                covered_area: sign::covered_area(ctx, cfg, &result),
                annotations,
            })
        }
        "interval" => {
            let result = interval::run_primitive(ctx, cfg);
            let mut annotations = Annotations::new();
            interval::annotate(ctx, cfg, &result, &mut annotations);
            Some(AnalysisOutput {
                graph_kind: GraphKind::Forward,
                converged: result.converged,
                covered_area: interval::covered_area(ctx, cfg, &result),
                annotations,
            })
        }
        "interval-widening" => {
            let result = interval::run_widening(ctx, cfg);
            let mut annotations = Annotations::new();
            interval::annotate(ctx, cfg, &result, &mut annotations);
            Some(AnalysisOutput {
                graph_kind: GraphKind::Forward,
                converged: result.converged,
                covered_area: interval::covered_area(ctx, cfg, &result),
                annotations,
            })
        }
        "past-operations" => {
            let result = reachable::run_past(cfg);
            let mut annotations = Annotations::new();
            reachable::annotate_past(cfg, &result, &mut annotations);
            Some(AnalysisOutput {
                graph_kind: GraphKind::Forward,
                converged: result.converged,
                covered_area: reachable::covered_area_past(cfg, &result),
                annotations,
            })
        }
        "future-operations" => {
            let result = reachable::run_future(cfg);
            let mut annotations = Annotations::new();
            reachable::annotate_future(cfg, &result, &mut annotations);
            Some(AnalysisOutput {
                graph_kind: GraphKind::Backward,
                converged: result.converged,
                covered_area: reachable::covered_area_future(cfg, &result),
                annotations,
            })
        }
        _ => {
            tracing::warn!(target: "analyses.registry", name, "unknown_analysis");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_ast::{Lexer, Parser};
    use core_diag::DiagnosticSink;

    fn build(src: &str) -> (AstContext, Cfg) {
        let mut sink = DiagnosticSink::new();
        let tokens = Lexer::new(src).lex_all(&mut sink).unwrap();
        let mut parser = Parser::new(tokens);
        let root = parser.parse(&mut sink).unwrap();
        let ctx = parser.into_context();
        let cfg = Cfg::build(&ctx, root);
        (ctx, cfg)
    }

    #[test]
    fn list_analyses_is_sorted() {
        let names = list_analyses();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }

    #[test]
    fn unknown_analysis_name_returns_none() {
        let (ctx, cfg) = build("init(0, 0, 0, 0)");
        assert!(get_analysis_results("not-a-real-analysis", &ctx, &cfg).is_none());
    }

    #[test]
    fn every_registered_name_is_runnable() {
        let (ctx, cfg) = build("init(0, 0, 0, 0); translation(1, 0)");
        for name in list_analyses() {
            assert!(get_analysis_results(name, &ctx, &cfg).is_some(), "{name} should be runnable");
        }
    }
}
