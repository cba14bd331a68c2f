//! Pretty-printing: single-line operation text (used for CFG DOT labels)
//! and the canonical, indented, annotation-aware program printer.

use crate::ast::{Annotations, AstContext, Node, Operation};

/// Single-line rendering of one `Init | Translation | Rotation` operation,
/// with no annotations — the form used inside CFG DOT node labels.
pub fn print_operation(ctx: &AstContext, op: Operation) -> String {
    match op {
        Operation::Init(id) => {
            let n = ctx.init(id);
            format!("init({}, {}, {}, {})", n.top_x, n.top_y, n.width, n.height)
        }
        Operation::Translation(id) => {
            let n = ctx.translation(id);
            format!("translation({}, {})", n.dx, n.dy)
        }
        Operation::Rotation(id) => {
            let n = ctx.rotation(id);
            format!("rotation({}, {}, {})", n.ox, n.oy, n.deg)
        }
    }
}

/// Flat (non-indented) rendering of any node, annotation-free. Mostly
/// useful for debugging and for short diagnostic context.
pub fn print_node_flat(ctx: &AstContext, node: Node) -> String {
    match node {
        Node::Init(id) => print_operation(ctx, Operation::Init(id)),
        Node::Translation(id) => print_operation(ctx, Operation::Translation(id)),
        Node::Rotation(id) => print_operation(ctx, Operation::Rotation(id)),
        Node::Sequence(id) => ctx
            .sequence(id)
            .nodes
            .iter()
            .map(|n| print_node_flat(ctx, *n))
            .collect::<Vec<_>>()
            .join("; "),
        Node::Branch(id) => {
            let b = ctx.branch(id);
            format!(
                "{{ {} }} or {{ {} }}",
                print_node_flat(ctx, Node::Sequence(b.lhs)),
                print_node_flat(ctx, Node::Sequence(b.rhs))
            )
        }
        Node::Loop(id) => {
            let l = ctx.loop_(id);
            format!("iter {{ {} }}", print_node_flat(ctx, Node::Sequence(l.body)))
        }
    }
}

/// Canonical pretty-print: one top-level command per line, nested `iter`
/// and `or` blocks indented two spaces per level, with any supplied
/// annotations rendered as `/* ... */` immediately around the node they're
/// attached to. Sequence annotations wrap the entire block rather than
/// being distributed per child.
pub fn pretty_print(ctx: &AstContext, root: Node, annotations: &Annotations) -> String {
    let mut out = String::new();
    render(ctx, root, annotations, 0, &mut out);
    out
}

fn indent(level: usize) -> String {
    "  ".repeat(level)
}

fn render_pre(annotations: &Annotations, node: Node) -> String {
    match annotations.pre.get(&node) {
        Some(list) if !list.is_empty() => list.iter().map(|s| format!("/* {s} */ ")).collect(),
        _ => String::new(),
    }
}

fn render_post(annotations: &Annotations, node: Node) -> String {
    match annotations.post.get(&node) {
        Some(list) if !list.is_empty() => list.iter().map(|s| format!(" /* {s} */")).collect(),
        _ => String::new(),
    }
}

fn render(ctx: &AstContext, node: Node, annotations: &Annotations, level: usize, out: &mut String) {
    match node {
        Node::Init(_) | Node::Translation(_) | Node::Rotation(_) => {
            let op = match node {
                Node::Init(id) => Operation::Init(id),
                Node::Translation(id) => Operation::Translation(id),
                Node::Rotation(id) => Operation::Rotation(id),
                _ => unreachable!(),
            };
            out.push_str(&indent(level));
            out.push_str(&render_pre(annotations, node));
            out.push_str(&print_operation(ctx, op));
            out.push_str(&render_post(annotations, node));
        }
        Node::Sequence(id) => {
            out.push_str(&render_pre(annotations, node));
            let seq = ctx.sequence(id);
            for (i, child) in seq.nodes.iter().enumerate() {
                if i > 0 {
                    out.push_str(";\n");
                }
                render(ctx, *child, annotations, level, out);
            }
            out.push_str(&render_post(annotations, node));
        }
        Node::Branch(id) => {
            let b = ctx.branch(id);
            out.push_str(&indent(level));
            out.push_str(&render_pre(annotations, node));
            out.push_str("{\n");
            render(ctx, Node::Sequence(b.lhs), annotations, level + 1, out);
            out.push('\n');
            out.push_str(&indent(level));
            out.push_str("} or {\n");
            render(ctx, Node::Sequence(b.rhs), annotations, level + 1, out);
            out.push('\n');
            out.push_str(&indent(level));
            out.push('}');
            out.push_str(&render_post(annotations, node));
        }
        Node::Loop(id) => {
            let l = ctx.loop_(id);
            out.push_str(&indent(level));
            out.push_str(&render_pre(annotations, node));
            out.push_str("iter {\n");
            render(ctx, Node::Sequence(l.body), annotations, level + 1, out);
            out.push('\n');
            out.push_str(&indent(level));
            out.push('}');
            out.push_str(&render_post(annotations, node));
        }
    }
}
