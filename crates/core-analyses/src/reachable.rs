//! Past- and future-operations analyses: `PowersetDomain<String>` tracking
//! which operation kinds have run on some path to (or will run on some
//! path from) a program point.

use core_ast::{Annotations, Operation};
use core_cfg::{Cfg, CfgLike, ReverseCfg};
use core_domains::PowersetDomain;
use core_geo::Polygon;
use core_solver::{self, AnalysisResult, DEFAULT_NODE_LIMIT};

type D = PowersetDomain<String>;

fn transfer(op: Operation, pre: &D) -> D {
    let mut set = pre.clone();
    set.insert(op.kind_name().to_string());
    set
}

pub fn run_past(cfg: &Cfg) -> AnalysisResult<D> {
    core_solver::solve_plain(cfg, transfer, DEFAULT_NODE_LIMIT)
}

pub fn annotate_past(cfg: &Cfg, result: &AnalysisResult<D>, annotations: &mut Annotations) {
    core_solver::annotate_all_operations(cfg, result, transfer, false, annotations);
}

pub fn covered_area_past(cfg: &Cfg, result: &AnalysisResult<D>) -> Vec<Polygon> {
    core_solver::covered_area(cfg, result, transfer)
}

/// Runs the same transfer function over a [`ReverseCfg`]; block `i` of the
/// result corresponds to the reversed block `i`, not the forward block `i`
/// — callers wanting per-forward-block state should index `result.post`
/// with `N - 1 - i` or simply use [`annotate_future`], which attaches
/// annotations to the original AST nodes regardless of direction.
pub fn run_future(cfg: &Cfg) -> AnalysisResult<D> {
    let reverse = ReverseCfg::new(cfg);
    core_solver::solve_plain(&reverse, transfer, DEFAULT_NODE_LIMIT)
}

pub fn annotate_future(cfg: &Cfg, result: &AnalysisResult<D>, annotations: &mut Annotations) {
    let reverse = ReverseCfg::new(cfg);
    core_solver::annotate_all_operations(&reverse, result, transfer, true, annotations);
}

pub fn covered_area_future(cfg: &Cfg, result: &AnalysisResult<D>) -> Vec<Polygon> {
    let reverse = ReverseCfg::new(cfg);
    core_solver::covered_area(&reverse, result, transfer)
}
