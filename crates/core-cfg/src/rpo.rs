//! Reverse post-order numbering and the RPO-keyed priority worklist that
//! `core-solver` drives its fixed-point iteration with.

use crate::cfg::CfgLike;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// `rank[b]` is the reverse post-order number of block `b`: block 0 always
/// gets rank 0. Computed by a single iterative post-order DFS so it works
/// uniformly over a [`crate::cfg::Cfg`] or a [`crate::reverse::ReverseCfg`].
pub struct RpoOrder {
    rank: Vec<usize>,
}

impl RpoOrder {
    pub fn compute(graph: &impl CfgLike) -> Self {
        let n = graph.block_count();
        let mut postorder = Vec::with_capacity(n);
        let mut visited = vec![false; n];

        struct Frame {
            node: usize,
            succ_idx: usize,
        }

        let mut stack = Vec::new();
        if n > 0 {
            visited[0] = true;
            stack.push(Frame { node: 0, succ_idx: 0 });
        }

        while let Some(frame) = stack.last_mut() {
            let successors = graph.successors(frame.node);
            if frame.succ_idx < successors.len() {
                let next = successors[frame.succ_idx];
                frame.succ_idx += 1;
                if !visited[next] {
                    visited[next] = true;
                    stack.push(Frame { node: next, succ_idx: 0 });
                }
            } else {
                postorder.push(frame.node);
                stack.pop();
            }
        }

        // Reverse post-order: last-finished node gets rank 0. Nodes never
        // reached from block 0 keep their default rank of 0; harmless since
        // a well-formed CFG has none.
        let mut rank = vec![0usize; n];
        for (i, &block) in postorder.iter().rev().enumerate() {
            rank[block] = i;
        }

        Self { rank }
    }

    pub fn rank(&self, block: usize) -> usize {
        self.rank[block]
    }
}

/// A min-heap of blocks keyed by RPO rank, with a membership bitset so that
/// enqueuing an already-queued block is a no-op.
pub struct Worklist<'a> {
    order: &'a RpoOrder,
    heap: BinaryHeap<Reverse<(usize, usize)>>,
    queued: Vec<bool>,
}

impl<'a> Worklist<'a> {
    pub fn new(order: &'a RpoOrder, block_count: usize) -> Self {
        Self {
            order,
            heap: BinaryHeap::new(),
            queued: vec![false; block_count],
        }
    }

    pub fn enqueue(&mut self, block: usize) {
        if !self.queued[block] {
            self.queued[block] = true;
            self.heap.push(Reverse((self.order.rank(block), block)));
        }
    }

    pub fn enqueue_successors(&mut self, graph: &impl CfgLike, block: usize) {
        for succ in graph.successors(block) {
            self.enqueue(succ);
        }
    }

    /// Panics if the worklist is empty; callers must check [`Self::is_empty`]
    /// first, mirroring the "dequeue is undefined on an empty worklist"
    /// contract.
    pub fn dequeue(&mut self) -> usize {
        let Reverse((_, block)) = self.heap.pop().expect("dequeue on an empty worklist");
        self.queued[block] = false;
        block
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cfg::Cfg;
    use core_ast::{Lexer, Parser};
    use core_diag::DiagnosticSink;

    fn build(src: &str) -> Cfg {
        let mut sink = DiagnosticSink::new();
        let tokens = Lexer::new(src).lex_all(&mut sink).unwrap();
        let mut parser = Parser::new(tokens);
        let root = parser.parse(&mut sink).unwrap();
        let ctx = parser.into_context();
        Cfg::build(&ctx, root)
    }

    #[test]
    fn start_block_has_rank_zero() {
        let cfg = build("init(0,0,0,0); translation(1,0)");
        let order = RpoOrder::compute(&cfg);
        assert_eq!(order.rank(0), 0);
    }

    #[test]
    fn rpo_respects_successor_list_order_on_branches() {
        let cfg = build("init(0,0,0,0); { translation(1,0) } or { translation(-1,0) }");
        let order = RpoOrder::compute(&cfg);
        // block 0 -> [1, 2] -> join(3); lhs listed first so it finishes
        // (and thus ranks) before rhs.
        assert!(order.rank(0) < order.rank(1));
        assert!(order.rank(1) < order.rank(2));
        assert!(order.rank(2) < order.rank(3));
    }

    #[test]
    fn worklist_dequeues_in_rank_order() {
        let cfg = build("init(0,0,0,0); { translation(1,0) } or { translation(-1,0) }");
        let order = RpoOrder::compute(&cfg);
        let mut wl = Worklist::new(&order, cfg.block_count());
        wl.enqueue(3);
        wl.enqueue(0);
        wl.enqueue(2);
        wl.enqueue(1);
        let mut seen = Vec::new();
        while !wl.is_empty() {
            seen.push(wl.dequeue());
        }
        assert_eq!(seen, vec![0, 1, 2, 3]);
    }

    #[test]
    fn re_enqueuing_a_queued_block_is_a_no_op() {
        let cfg = build("init(0,0,0,0); translation(1,0)");
        let order = RpoOrder::compute(&cfg);
        let mut wl = Worklist::new(&order, cfg.block_count());
        wl.enqueue(0);
        wl.enqueue(0);
        assert_eq!(wl.dequeue(), 0);
        assert!(wl.is_empty());
    }
}
