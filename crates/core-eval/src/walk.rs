//! A concrete random-walk evaluator: samples one integer point from each
//! `Init` rectangle, applies concrete translations/rotations, picks one
//! `Branch` arm and a caller-weighted number of `Loop` back edges.

use core_ast::{AstContext, Operation};
use core_cfg::{Cfg, CfgLike};
use core_geo::Vec2;
use rand::Rng;

/// Extra geometric data recorded alongside a rotation step so the renderer
/// can draw an arc instead of a straight segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arc {
    pub origin: Vec2,
    pub degrees: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub pos: Vec2,
    pub arc: Option<Arc>,
    pub initial: bool,
}

pub type Walk = Vec<Step>;

/// The exact rotation used by the concrete evaluator (and, on the `ox ==
/// oy == 0` / multiple-of-90° diagonal, agreeing with the abstract
/// analyses): rotate `point` by `degrees` about `origin`.
pub fn rotate(point: Vec2, origin: Vec2, degrees: i32) -> Vec2 {
    let relative = Vec2::new(point.x - origin.x, point.y - origin.y);
    let radians = (degrees as f64).to_radians();
    let (sin, cos) = radians.sin_cos();
    let rotated = Vec2::new(
        (relative.x as f64 * cos - relative.y as f64 * sin).round() as i32,
        (relative.y as f64 * cos + relative.x as f64 * sin).round() as i32,
    );
    Vec2::new(rotated.x + origin.x, rotated.y + origin.y)
}

fn step_for(ctx: &AstContext, op: Operation, prev: Option<Step>, rng: &mut impl Rng) -> Step {
    match op {
        Operation::Init(id) => {
            let n = ctx.init(id);
            let x = rng.gen_range(n.top_x..=n.top_x + n.width);
            let y = rng.gen_range(n.top_y..=n.top_y + n.height);
            Step {
                pos: Vec2::new(x, y),
                arc: None,
                initial: true,
            }
        }
        Operation::Translation(id) => {
            let n = ctx.translation(id);
            let prev_pos = prev.expect("a Translation never starts a walk").pos;
            Step {
                pos: Vec2::new(prev_pos.x + n.dx, prev_pos.y + n.dy),
                arc: None,
                initial: false,
            }
        }
        Operation::Rotation(id) => {
            let n = ctx.rotation(id);
            let prev_pos = prev.expect("a Rotation never starts a walk").pos;
            let origin = Vec2::new(n.ox, n.oy);
            Step {
                pos: rotate(prev_pos, origin, n.deg),
                arc: Some(Arc { origin, degrees: n.deg }),
                initial: false,
            }
        }
    }
}

/// Picks one successor of `current`, weighting edges that target an
/// earlier-or-equal block index (necessarily a loop back edge, since the
/// CFG builder only ever wires a back edge to a block allocated before the
/// one wiring it) `loopiness` times as heavily as a forward edge.
fn choose_successor(successors: &[usize], current: usize, loopiness: u32, rng: &mut impl Rng) -> usize {
    let loopiness = loopiness.max(1) as u64;
    let weights: Vec<u64> = successors
        .iter()
        .map(|&s| if s <= current { loopiness } else { 1 })
        .collect();
    let total: u64 = weights.iter().sum();
    let mut pick = rng.gen_range(0..total);
    for (i, &w) in weights.iter().enumerate() {
        if pick < w {
            return successors[i];
        }
        pick -= w;
    }
    unreachable!("weights must sum to total")
}

/// Walks the CFG from block 0 until a block with no successors is reached,
/// recording one [`Step`] per operation executed. `loopiness == 1` treats
/// every edge uniformly; `loopiness == n` makes a back edge `n` times as
/// likely to be taken as a sibling forward edge out of the same block.
pub fn create_random_walk(ctx: &AstContext, cfg: &Cfg, loopiness: u32, rng: &mut impl Rng) -> Walk {
    let mut walk = Walk::new();
    if cfg.blocks().is_empty() {
        return walk;
    }

    let mut current = 0usize;
    loop {
        for &op in cfg.blocks()[current].operations() {
            let prev = walk.last().copied();
            walk.push(step_for(ctx, op, prev, rng));
        }
        let successors = cfg.blocks()[current].successors();
        if successors.is_empty() {
            break;
        }
        current = choose_successor(successors, current, loopiness, rng);
    }
    tracing::debug!(target: "eval.walk", steps = walk.len(), loopiness, "walk_complete");
    walk
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_ast::{Lexer, Parser};
    use core_diag::DiagnosticSink;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

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
    fn walk_starts_with_a_point_inside_the_init_rectangle() {
        let (ctx, cfg) = build("init(10, 20, 5, 5)");
        let mut rng = StdRng::seed_from_u64(1);
        let walk = create_random_walk(&ctx, &cfg, 1, &mut rng);
        assert_eq!(walk.len(), 1);
        assert!(walk[0].initial);
        assert!((10..=15).contains(&walk[0].pos.x));
        assert!((20..=25).contains(&walk[0].pos.y));
    }

    #[test]
    fn translation_step_applies_the_concrete_delta() {
        let (ctx, cfg) = build("init(0, 0, 0, 0); translation(10, -3)");
        let mut rng = StdRng::seed_from_u64(1);
        let walk = create_random_walk(&ctx, &cfg, 1, &mut rng);
        assert_eq!(walk.len(), 2);
        assert_eq!(walk[1].pos, Vec2::new(10, -3));
        assert!(!walk[1].initial);
        assert!(walk[1].arc.is_none());
    }

    #[test]
    fn rotation_step_records_an_arc_about_its_origin() {
        let (ctx, cfg) = build("init(10, 0, 0, 0); rotation(0, 0, 90)");
        let mut rng = StdRng::seed_from_u64(1);
        let walk = create_random_walk(&ctx, &cfg, 1, &mut rng);
        assert_eq!(walk[1].pos, Vec2::new(0, 10));
        assert_eq!(walk[1].arc, Some(Arc { origin: Vec2::new(0, 0), degrees: 90 }));
    }

    #[test]
    fn walk_terminates_on_a_loop_with_high_loopiness() {
        let (ctx, cfg) = build("init(0, 0, 0, 0); iter { translation(1, 0) }");
        let mut rng = StdRng::seed_from_u64(7);
        // With a finite successor list at the loop body (back edge + exit),
        // the walk is guaranteed to terminate almost surely; this just
        // checks it does not hang within a generous step bound by capping
        // iterations indirectly through a low loopiness.
        let walk = create_random_walk(&ctx, &cfg, 1, &mut rng);
        assert!(!walk.is_empty());
    }
}
