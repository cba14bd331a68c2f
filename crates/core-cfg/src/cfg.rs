//! Basic blocks, the forward [`Cfg`], and the [`CfgLike`] trait that lets
//! the solver (`core-solver`) walk either a [`Cfg`] or a
//! [`crate::reverse::ReverseCfg`] without caring which.

use core_ast::{AstContext, Node, Operation};

/// Ordered straight-line operations plus successor/predecessor block
/// indices. Duplicate edges are forbidden; construction never creates one,
/// checked with a `debug_assert!` since a violation means a builder bug,
/// not a condition callers need to handle.
#[derive(Debug, Clone, Default)]
pub struct BasicBlock {
    operations: Vec<Operation>,
    successors: Vec<usize>,
    predecessors: Vec<usize>,
}

impl BasicBlock {
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }
    pub fn successors(&self) -> &[usize] {
        &self.successors
    }
    pub fn predecessors(&self) -> &[usize] {
        &self.predecessors
    }
}

/// A graph of basic blocks that the solver can walk, independent of
/// whether it is a native [`Cfg`] or a reversed view over one.
pub trait CfgLike {
    fn block_count(&self) -> usize;
    fn operations(&self, block: usize) -> Vec<Operation>;
    fn successors(&self, block: usize) -> Vec<usize>;
    fn predecessors(&self, block: usize) -> Vec<usize>;
}

/// A dense, immutable control-flow graph. Block 0 is the unique start
/// block; every block is reachable from it.
#[derive(Debug, Clone)]
pub struct Cfg {
    blocks: Vec<BasicBlock>,
}

impl Cfg {
    pub fn blocks(&self) -> &[BasicBlock] {
        &self.blocks
    }

    /// Builds a CFG from an AST root via one structural recursion,
    /// threading a "current block" through the traversal the way the
    /// reference implementation does it.
    pub fn build(ctx: &AstContext, root: Node) -> Self {
        let mut cfg = Cfg { blocks: Vec::new() };
        let start = cfg.new_block();
        debug_assert_eq!(start, 0, "the first allocated block must be block 0");
        cfg.add_ast_node(ctx, start, root);
        tracing::debug!(target: "cfg.build", blocks = cfg.blocks.len(), "cfg_built");
        cfg
    }

    fn new_block(&mut self) -> usize {
        self.blocks.push(BasicBlock::default());
        self.blocks.len() - 1
    }

    fn add_edge(&mut self, from: usize, to: usize) {
        debug_assert!(
            !self.blocks[from].successors.contains(&to),
            "duplicate CFG edge {from} -> {to}"
        );
        self.blocks[from].successors.push(to);
        self.blocks[to].predecessors.push(from);
    }

    fn add_operation(&mut self, block: usize, op: Operation) {
        self.blocks[block].operations.push(op);
    }

    fn add_ast_node(&mut self, ctx: &AstContext, current_block: usize, node: Node) -> usize {
        match node {
            Node::Init(id) => {
                self.add_operation(current_block, Operation::Init(id));
                current_block
            }
            Node::Translation(id) => {
                self.add_operation(current_block, Operation::Translation(id));
                current_block
            }
            Node::Rotation(id) => {
                self.add_operation(current_block, Operation::Rotation(id));
                current_block
            }
            Node::Sequence(id) => {
                let mut current = current_block;
                for child in ctx.sequence(id).nodes.clone() {
                    current = self.add_ast_node(ctx, current, child);
                }
                current
            }
            Node::Branch(id) => {
                let branch = *ctx.branch(id);
                let lhs_entry = self.new_block();
                let rhs_entry = self.new_block();
                let branch_pred = current_block;
                let lhs_exit = self.add_ast_node(ctx, lhs_entry, Node::Sequence(branch.lhs));
                let rhs_exit = self.add_ast_node(ctx, rhs_entry, Node::Sequence(branch.rhs));
                self.add_edge(branch_pred, lhs_entry);
                self.add_edge(branch_pred, rhs_entry);
                let join = self.new_block();
                self.add_edge(lhs_exit, join);
                self.add_edge(rhs_exit, join);
                join
            }
            Node::Loop(id) => {
                let loop_node = *ctx.loop_(id);
                let body_entry = self.new_block();
                self.add_edge(current_block, body_entry);
                let body_exit = self.add_ast_node(ctx, body_entry, Node::Sequence(loop_node.body));
                let after = self.new_block();
                self.add_edge(body_exit, body_entry); // back edge
                self.add_edge(body_exit, after);
                after
            }
        }
    }
}

impl CfgLike for Cfg {
    fn block_count(&self) -> usize {
        self.blocks.len()
    }
    fn operations(&self, block: usize) -> Vec<Operation> {
        self.blocks[block].operations.clone()
    }
    fn successors(&self, block: usize) -> Vec<usize> {
        self.blocks[block].successors.clone()
    }
    fn predecessors(&self, block: usize) -> Vec<usize> {
        self.blocks[block].predecessors.clone()
    }
}
