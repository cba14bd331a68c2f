//! The monotone fixpoint solver: an RPO worklist engine shared by the plain
//! and widening variants, plus the annotation/covered-area projections the
//! analyses in `core-analyses` render their results through.

use core_ast::{Annotations, Operation};
use core_cfg::{CfgLike, RpoOrder, Worklist};
use core_geo::{Domain, Polygon, WidenableDomain};

/// Default processed-step budget per block (`NodeLimit`). `0` means
/// unbounded.
pub const DEFAULT_NODE_LIMIT: usize = 10;

/// The outcome of a solve: the post-state of every block, and whether the
/// solver reached a fixed point before exhausting its node-visit budget.
#[derive(Debug, Clone)]
pub struct AnalysisResult<D> {
    pub converged: bool,
    pub post: Vec<D>,
}

impl<D: Domain> AnalysisResult<D> {
    fn bottom(block_count: usize) -> Self {
        Self {
            converged: false,
            post: vec![D::bottom(); block_count],
        }
    }
}

fn join_predecessors<D: Domain>(graph: &impl CfgLike, post: &[D], block: usize) -> D {
    graph
        .predecessors(block)
        .into_iter()
        .fold(D::bottom(), |acc, p| acc.join(&post[p]))
}

fn budget(node_limit: usize, block_count: usize) -> usize {
    if node_limit == 0 {
        usize::MAX
    } else {
        node_limit * block_count
    }
}

/// Runs the plain (non-widening) solver. `transfer` must be a pure,
/// monotone function of `(op, pre)`; domains of infinite height paired with
/// a non-chain-limiting transfer (the primitive interval analysis) are
/// expected to exhaust the budget rather than converge.
pub fn solve_plain<D: Domain>(
    graph: &impl CfgLike,
    transfer: impl Fn(Operation, &D) -> D,
    node_limit: usize,
) -> AnalysisResult<D> {
    let block_count = graph.block_count();
    let mut post = vec![D::bottom(); block_count];
    let mut visited = vec![false; block_count];

    let order = RpoOrder::compute(graph);
    let mut worklist = Worklist::new(&order, block_count);
    if block_count > 0 {
        worklist.enqueue(0);
    }

    let max_steps = budget(node_limit, block_count);
    let mut steps = 0usize;

    while !worklist.is_empty() {
        if steps >= max_steps {
            tracing::debug!(target: "solver.plain", steps, max_steps, "node_limit_exceeded");
            return AnalysisResult::bottom(block_count);
        }
        let block = worklist.dequeue();
        steps += 1;

        let pre = join_predecessors(graph, &post, block);
        let mut state = pre;
        for op in graph.operations(block) {
            state = transfer(op, &state);
        }

        if visited[block] && state == post[block] {
            continue;
        }
        visited[block] = true;
        post[block] = state;
        worklist.enqueue_successors(graph, block);
    }

    tracing::debug!(target: "solver.plain", steps, blocks = block_count, "converged");
    AnalysisResult { converged: true, post }
}

/// Runs the widening solver: identical skeleton, but widens the joined
/// predecessor state against a persistent per-block `pre` on every visit,
/// guaranteeing termination for any [`WidenableDomain`].
pub fn solve_widening<D: WidenableDomain>(
    graph: &impl CfgLike,
    transfer: impl Fn(Operation, &D) -> D,
    node_limit: usize,
) -> AnalysisResult<D> {
    let block_count = graph.block_count();
    let mut post = vec![D::bottom(); block_count];
    let mut pre_state = vec![D::bottom(); block_count];
    let mut visited = vec![false; block_count];

    let order = RpoOrder::compute(graph);
    let mut worklist = Worklist::new(&order, block_count);
    if block_count > 0 {
        worklist.enqueue(0);
    }

    let max_steps = budget(node_limit, block_count);
    let mut steps = 0usize;

    while !worklist.is_empty() {
        if steps >= max_steps {
            tracing::debug!(target: "solver.widening", steps, max_steps, "node_limit_exceeded");
            return AnalysisResult::bottom(block_count);
        }
        let block = worklist.dequeue();
        steps += 1;

        let new_pre = join_predecessors(graph, &post, block);
        pre_state[block] = pre_state[block].widen(&new_pre);
        let mut state = pre_state[block].clone();
        for op in graph.operations(block) {
            state = transfer(op, &state);
        }

        if visited[block] && state == post[block] {
            continue;
        }
        visited[block] = true;
        post[block] = state;
        worklist.enqueue_successors(graph, block);
    }

    tracing::debug!(target: "solver.widening", steps, blocks = block_count, "converged");
    AnalysisResult { converged: true, post }
}

/// Attaches `post[b].display()` to the last operation of every non-empty
/// block.
pub fn annotate_block_ends<D: Domain>(
    graph: &impl CfgLike,
    result: &AnalysisResult<D>,
    annotations: &mut Annotations,
) {
    if !result.converged {
        return;
    }
    for block in 0..graph.block_count() {
        if let Some(last) = graph.operations(block).last() {
            annotations.push_post(last.to_node(), result.post[block].display());
        }
    }
}

/// Re-runs `transfer` down every block starting from the joined
/// predecessor state, recording the post-state of every operation. On a
/// backward walk (`backward = true`, i.e. `graph` is a `ReverseCFG`) the
/// state is attached as a *pre*-annotation instead, so reading the program
/// forward shows "state entering this operation" for backward analyses.
pub fn annotate_all_operations<D: Domain>(
    graph: &impl CfgLike,
    result: &AnalysisResult<D>,
    transfer: impl Fn(Operation, &D) -> D,
    backward: bool,
    annotations: &mut Annotations,
) {
    if !result.converged {
        return;
    }
    for block in 0..graph.block_count() {
        let mut state = join_predecessors(graph, &result.post, block);
        for op in graph.operations(block) {
            state = transfer(op, &state);
            if backward {
                annotations.push_pre(op.to_node(), state.display());
            } else {
                annotations.push_post(op.to_node(), state.display());
            }
        }
    }
}

/// Same walk as [`annotate_all_operations`], but collects `covers()`
/// polygons instead of display strings, for the SVG renderer's
/// covered-area overlay.
pub fn covered_area<D: Domain>(
    graph: &impl CfgLike,
    result: &AnalysisResult<D>,
    transfer: impl Fn(Operation, &D) -> D,
) -> Vec<Polygon> {
    if !result.converged {
        return Vec::new();
    }
    let mut polygons = Vec::new();
    for block in 0..graph.block_count() {
        let mut state = join_predecessors(graph, &result.post, block);
        for op in graph.operations(block) {
            state = transfer(op, &state);
            polygons.extend(state.covers());
        }
    }
    polygons
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_ast::{Lexer, Parser};
    use core_cfg::Cfg;
    use core_diag::DiagnosticSink;
    use core_domains::{IntervalDomain, PowersetDomain};

    fn build(src: &str) -> Cfg {
        let mut sink = DiagnosticSink::new();
        let tokens = Lexer::new(src).lex_all(&mut sink).unwrap();
        let mut parser = Parser::new(tokens);
        let root = parser.parse(&mut sink).unwrap();
        let ctx = parser.into_context();
        Cfg::build(&ctx, root)
    }

    fn op_name(op: Operation) -> &'static str {
        match op {
            Operation::Init(_) => "Init",
            Operation::Translation(_) => "Translation",
            Operation::Rotation(_) => "Rotation",
        }
    }

    #[test]
    fn plain_solver_converges_on_straight_line_programs() {
        let cfg = build("init(0, 0, 0, 0); translation(1, 0)");
        let result = solve_plain::<PowersetDomain<String>>(
            &cfg,
            |op, pre| {
                let mut set = pre.clone();
                set.insert(op_name(op).to_string());
                set
            },
            DEFAULT_NODE_LIMIT,
        );
        assert!(result.converged);
        assert!(result.post[0].contains(&"Init".to_string()));
        assert!(result.post[0].contains(&"Translation".to_string()));
    }

    #[test]
    fn plain_solver_reports_non_convergence_on_non_chain_limiting_loops() {
        let cfg = build("init(0, 0, 0, 0); iter { translation(1, 0) }");
        let result = solve_plain::<IntervalDomain>(
            &cfg,
            |op, pre| match op {
                Operation::Translation(_) => pre.clone() + IntervalDomain::point(1),
                _ => IntervalDomain::point(0),
            },
            DEFAULT_NODE_LIMIT,
        );
        assert!(!result.converged);
    }

    #[test]
    fn widening_solver_converges_where_plain_does_not() {
        let cfg = build("init(0, 0, 0, 0); iter { translation(1, 0) }");
        let result = solve_widening::<IntervalDomain>(
            &cfg,
            |op, pre| match op {
                Operation::Translation(_) => pre.clone() + IntervalDomain::point(1),
                _ => IntervalDomain::point(0),
            },
            DEFAULT_NODE_LIMIT,
        );
        assert!(result.converged);
    }

    #[test]
    fn zero_node_limit_means_unbounded() {
        assert_eq!(budget(0, 7), usize::MAX);
        assert_eq!(budget(10, 7), 70);
    }
}
