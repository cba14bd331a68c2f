//! Sign analysis: `Vec2Domain<SignDomain>` over the plain solver.

use core_ast::{AstContext, Operation};
use core_cfg::{Cfg, CfgLike};
use core_domains::{SignDomain, Vec2Domain};
use core_geo::Polygon;
use core_solver::{self, AnalysisResult, DEFAULT_NODE_LIMIT};

type D = Vec2Domain<SignDomain>;

fn sign_of_extent(top: i32, extent: i32) -> SignDomain {
    if top > 0 {
        SignDomain::Positive
    } else if top + extent < 0 {
        SignDomain::Negative
    } else if top == 0 && extent == 0 {
        SignDomain::Zero
    } else {
        SignDomain::Top
    }
}

fn rotate(pre: D, ox: i32, oy: i32, deg: i32) -> D {
    if ox != 0 || oy != 0 {
        return Vec2Domain::new(SignDomain::Top, SignDomain::Top);
    }
    match deg.rem_euclid(360) {
        0 => pre,
        90 => Vec2Domain::new(-pre.y, pre.x),
        180 => Vec2Domain::new(-pre.x, -pre.y),
        270 => Vec2Domain::new(pre.y, -pre.x),
        _ => Vec2Domain::new(SignDomain::Top, SignDomain::Top),
    }
}

fn transfer(ctx: &AstContext, op: Operation, pre: &D) -> D {
    match op {
        Operation::Init(id) => {
            let n = ctx.init(id);
            Vec2Domain::new(
                sign_of_extent(n.top_x, n.width),
                sign_of_extent(n.top_y, n.height),
            )
        }
        Operation::Translation(id) => {
            let n = ctx.translation(id);
            Vec2Domain::new(
                pre.x + SignDomain::abstracted(n.dx),
                pre.y + SignDomain::abstracted(n.dy),
            )
        }
        Operation::Rotation(id) => {
            let n = ctx.rotation(id);
            rotate(pre.clone(), n.ox, n.oy, n.deg)
        }
    }
}

pub fn run(ctx: &AstContext, cfg: &Cfg) -> AnalysisResult<D> {
    core_solver::solve_plain(cfg, |op, pre| transfer(ctx, op, pre), DEFAULT_NODE_LIMIT)
}

pub fn annotate(ctx: &AstContext, cfg: &Cfg, result: &AnalysisResult<D>, annotations: &mut core_ast::Annotations) {
    core_solver::annotate_all_operations(cfg, result, |op, pre| transfer(ctx, op, pre), false, annotations);
}

pub fn covered_area(ctx: &AstContext, cfg: &Cfg, result: &AnalysisResult<D>) -> Vec<Polygon> {
    core_solver::covered_area(cfg, result, |op, pre| transfer(ctx, op, pre))
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
    fn init_in_the_positive_quadrant_is_positive_positive() {
        let (ctx, cfg) = build("init(10, 10, 5, 5)");
        let result = run(&ctx, &cfg);
        assert!(result.converged);
        assert_eq!(result.post[0].x, SignDomain::Positive);
        assert_eq!(result.post[0].y, SignDomain::Positive);
    }

    #[test]
    fn straddling_the_origin_is_top() {
        let (ctx, cfg) = build("init(-5, 0, 10, 0)");
        let result = run(&ctx, &cfg);
        assert_eq!(result.post[0].x, SignDomain::Top);
        assert_eq!(result.post[0].y, SignDomain::Zero);
    }

    #[test]
    fn ninety_degree_rotation_about_the_origin_swaps_axes() {
        let (ctx, cfg) = build("init(10, 10, 0, 0); rotation(0, 0, 90)");
        let result = run(&ctx, &cfg);
        // (Positive, Positive) -> (-y, x) = (Negative, Positive)
        assert_eq!(result.post[0].x, SignDomain::Negative);
        assert_eq!(result.post[0].y, SignDomain::Positive);
    }

    #[test]
    fn rotation_about_a_nonzero_pivot_loses_all_precision() {
        let (ctx, cfg) = build("init(10, 10, 0, 0); rotation(1, 0, 90)");
        let result = run(&ctx, &cfg);
        assert_eq!(result.post[0].x, SignDomain::Top);
        assert_eq!(result.post[0].y, SignDomain::Top);
    }

    /// A branch whose arms translate in opposite x directions loses
    /// x-precision to Top on one side but not the other.
    #[test]
    fn branch_arms_diverge_in_x_precision() {
        let (ctx, cfg) = build("init(50, 50, 50, 50); { translation(10, 0) } or { translation(-10, 0) }");
        let result = run(&ctx, &cfg);
        // block 0: init; blocks 1,2: branch arms; block 3: join.
        assert_eq!(result.post[0].x, SignDomain::Positive);
        assert_eq!(result.post[0].y, SignDomain::Positive);
        assert_eq!(result.post[1].x, SignDomain::Positive);
        assert_eq!(result.post[1].y, SignDomain::Positive);
        assert_eq!(result.post[2].x, SignDomain::Top);
        assert_eq!(result.post[2].y, SignDomain::Positive);
    }
}
