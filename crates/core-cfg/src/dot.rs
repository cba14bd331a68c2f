//! Graphviz DOT rendering of a [`Cfg`].

use crate::cfg::Cfg;
use core_ast::{print_operation, AstContext};
use std::fmt::Write as _;

/// Renders `cfg` as a `digraph CFG { ... }` block: one `Node_<i>` per block
/// in index order with its operations newline-joined into the label,
/// followed by edges in per-block successor order.
pub fn to_dot(ctx: &AstContext, cfg: &Cfg) -> String {
    let mut out = String::from("digraph CFG {\n");
    for (i, block) in cfg.blocks().iter().enumerate() {
        let label = block
            .operations()
            .iter()
            .map(|op| print_operation(ctx, *op))
            .collect::<Vec<_>>()
            .join("\\n");
        let _ = writeln!(out, "  Node_{i}[label=\"{label}\"]");
    }
    for (i, block) in cfg.blocks().iter().enumerate() {
        for &succ in block.successors() {
            let _ = writeln!(out, "  Node_{i} -> Node_{succ}");
        }
    }
    out.push('}');
    out
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
    fn straight_line_program_renders_as_a_single_node() {
        let (ctx, cfg) = build("init(0, 0, 0, 0); translation(1, 0)");
        let dot = to_dot(&ctx, &cfg);
        assert_eq!(
            dot,
            "digraph CFG {\n  Node_0[label=\"init(0, 0, 0, 0)\\ntranslation(1, 0)\"]\n}"
        );
    }

    #[test]
    fn branches_render_edges_in_successor_order() {
        let (ctx, cfg) = build("init(0,0,0,0); { translation(1,0) } or { translation(-1,0) }");
        let dot = to_dot(&ctx, &cfg);
        assert!(dot.contains("Node_0 -> Node_1\n  Node_0 -> Node_2"));
        assert!(dot.contains("Node_1 -> Node_3"));
        assert!(dot.contains("Node_2 -> Node_3"));
        assert!(dot.starts_with("digraph CFG {\n"));
        assert!(dot.ends_with('}'));
    }
}
