//! The AST: a closed sum of six node kinds, owned by an arena so that
//! construction-order identity can be used as an annotation key.
//!
//! Rust has no convenient way to hand out long-lived borrowed references
//! into a growing `Vec` without fighting the borrow checker, so this port
//! follows the "integer handle" half of the arena-ownership design note:
//! each node kind lives in its own `Vec` inside [`AstContext`], and a
//! [`Node`] is a small `Copy` tagged index into the relevant vector. This
//! plays the same role as the original's `const T*` arena pointers while
//! staying entirely safe.

use std::collections::HashMap;

macro_rules! node_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(u32);
    };
}

node_id!(InitId);
node_id!(TranslationId);
node_id!(RotationId);
node_id!(SequenceId);
node_id!(BranchId);
node_id!(LoopId);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Init {
    pub kw_line: u32,
    pub top_x: i32,
    pub top_y: i32,
    pub width: i32,
    pub height: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Translation {
    pub kw_line: u32,
    pub dx: i32,
    pub dy: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rotation {
    pub kw_line: u32,
    pub ox: i32,
    pub oy: i32,
    pub deg: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    pub nodes: Vec<Node>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Branch {
    pub kw_line: u32,
    pub lhs: SequenceId,
    pub rhs: SequenceId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Loop {
    pub kw_line: u32,
    pub body: SequenceId,
}

/// A tagged reference to any AST node, used both as the tree's recursive
/// edge type and as the key type for [`Annotations`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Node {
    Init(InitId),
    Translation(TranslationId),
    Rotation(RotationId),
    Sequence(SequenceId),
    Branch(BranchId),
    Loop(LoopId),
}

/// The subset of nodes that can appear inside a basic block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Init(InitId),
    Translation(TranslationId),
    Rotation(RotationId),
}

impl Operation {
    pub fn to_node(self) -> Node {
        match self {
            Operation::Init(id) => Node::Init(id),
            Operation::Translation(id) => Node::Translation(id),
            Operation::Rotation(id) => Node::Rotation(id),
        }
    }

    /// The name used by the past/future-operations analyses.
    pub fn kind_name(self) -> &'static str {
        match self {
            Operation::Init(_) => "Init",
            Operation::Translation(_) => "Translation",
            Operation::Rotation(_) => "Rotation",
        }
    }
}

/// Owns every node produced while parsing one program. All [`Node`]
/// handles borrowed from a context are valid for the context's entire
/// lifetime; the arena never frees an individual node early.
#[derive(Debug, Default)]
pub struct AstContext {
    inits: Vec<Init>,
    translations: Vec<Translation>,
    rotations: Vec<Rotation>,
    sequences: Vec<Sequence>,
    branches: Vec<Branch>,
    loops: Vec<Loop>,
}

impl AstContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn make_init(&mut self, kw_line: u32, top_x: i32, top_y: i32, width: i32, height: i32) -> Node {
        self.inits.push(Init {
            kw_line,
            top_x,
            top_y,
            width,
            height,
        });
        Node::Init(InitId((self.inits.len() - 1) as u32))
    }

    pub fn make_translation(&mut self, kw_line: u32, dx: i32, dy: i32) -> Node {
        self.translations.push(Translation { kw_line, dx, dy });
        Node::Translation(TranslationId((self.translations.len() - 1) as u32))
    }

    pub fn make_rotation(&mut self, kw_line: u32, ox: i32, oy: i32, deg: i32) -> Node {
        self.rotations.push(Rotation { kw_line, ox, oy, deg });
        Node::Rotation(RotationId((self.rotations.len() - 1) as u32))
    }

    pub fn make_sequence(&mut self, nodes: Vec<Node>) -> SequenceId {
        self.sequences.push(Sequence { nodes });
        SequenceId((self.sequences.len() - 1) as u32)
    }

    pub fn make_branch(&mut self, kw_line: u32, lhs: SequenceId, rhs: SequenceId) -> Node {
        self.branches.push(Branch { kw_line, lhs, rhs });
        Node::Branch(BranchId((self.branches.len() - 1) as u32))
    }

    pub fn make_loop(&mut self, kw_line: u32, body: SequenceId) -> Node {
        self.loops.push(Loop { kw_line, body });
        Node::Loop(LoopId((self.loops.len() - 1) as u32))
    }

    pub fn init(&self, id: InitId) -> &Init {
        &self.inits[id.0 as usize]
    }
    pub fn translation(&self, id: TranslationId) -> &Translation {
        &self.translations[id.0 as usize]
    }
    pub fn rotation(&self, id: RotationId) -> &Rotation {
        &self.rotations[id.0 as usize]
    }
    pub fn sequence(&self, id: SequenceId) -> &Sequence {
        &self.sequences[id.0 as usize]
    }
    pub fn branch(&self, id: BranchId) -> &Branch {
        &self.branches[id.0 as usize]
    }
    pub fn loop_(&self, id: LoopId) -> &Loop {
        &self.loops[id.0 as usize]
    }
}

/// Pre/post annotation strings attached to AST nodes by identity, used to
/// render dataflow-analysis results over the pretty-printed program.
/// Forward analyses write to `post`; backward analyses write to `pre` on
/// the same nodes (describing the state flowing *into* the operation, read
/// forward).
#[derive(Debug, Default)]
pub struct Annotations {
    pub pre: HashMap<Node, Vec<String>>,
    pub post: HashMap<Node, Vec<String>>,
}

impl Annotations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_pre(&mut self, node: Node, text: impl Into<String>) {
        self.pre.entry(node).or_default().push(text.into());
    }

    pub fn push_post(&mut self, node: Node, text: impl Into<String>) {
        self.post.entry(node).or_default().push(text.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arena_handles_round_trip_field_values() {
        let mut ctx = AstContext::new();
        let node = ctx.make_init(1, 10, 20, 5, 5);
        match node {
            Node::Init(id) => {
                let init = ctx.init(id);
                assert_eq!((init.top_x, init.top_y, init.width, init.height), (10, 20, 5, 5));
            }
            _ => panic!("expected Init"),
        }
    }

    #[test]
    fn distinct_nodes_of_the_same_kind_get_distinct_identity() {
        let mut ctx = AstContext::new();
        let a = ctx.make_translation(1, 1, 1);
        let b = ctx.make_translation(1, 1, 1);
        assert_ne!(a, b, "two constructions must have distinct identity even with equal fields");
    }

    #[test]
    fn annotations_key_on_node_identity_not_structural_equality() {
        let mut ctx = AstContext::new();
        let a = ctx.make_translation(1, 1, 1);
        let b = ctx.make_translation(1, 1, 1);
        let mut anns = Annotations::new();
        anns.push_post(a, "x");
        assert!(anns.post.contains_key(&a));
        assert!(!anns.post.contains_key(&b));
    }
}
