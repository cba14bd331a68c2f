//! Interval analysis: `Vec2Domain<IntervalDomain>`, in a primitive
//! (non-widening, expected to diverge on loops) flavor and a widening
//! flavor that converges everywhere at the cost of precision.

use core_ast::{AstContext, Operation};
use core_cfg::{Cfg, CfgLike};
use core_domains::{IntervalDomain, Vec2Domain};
use core_geo::{Polygon, INF, NEG_INF};
use core_solver::{self, AnalysisResult, DEFAULT_NODE_LIMIT};

type D = Vec2Domain<IntervalDomain>;

fn is_unbounded(i: IntervalDomain) -> bool {
    i.lo == NEG_INF || i.hi == INF
}

fn rotate(pre: D, ox: i32, oy: i32, deg: i32) -> D {
    let degn = deg.rem_euclid(360);
    if degn == 0 {
        return pre;
    }
    if matches!(degn, 90 | 180 | 270) {
        let origin = Vec2Domain::new(
            pre.x + -IntervalDomain::point(ox),
            pre.y + -IntervalDomain::point(oy),
        );
        let rotated = match degn {
            90 => Vec2Domain::new(-origin.y, origin.x),
            180 => Vec2Domain::new(-origin.x, -origin.y),
            270 => Vec2Domain::new(origin.y, -origin.x),
            _ => unreachable!(),
        };
        return Vec2Domain::new(
            rotated.x + IntervalDomain::point(ox),
            rotated.y + IntervalDomain::point(oy),
        );
    }

    if is_unbounded(pre.x) || is_unbounded(pre.y) {
        return Vec2Domain::new(IntervalDomain::top(), IntervalDomain::top());
    }

    let radians = (degn as f64).to_radians();
    let (sin, cos) = radians.sin_cos();
    let corners = [
        (pre.x.lo, pre.y.lo),
        (pre.x.lo, pre.y.hi),
        (pre.x.hi, pre.y.lo),
        (pre.x.hi, pre.y.hi),
    ];
    let mut xs = Vec::with_capacity(4);
    let mut ys = Vec::with_capacity(4);
    for (cx, cy) in corners {
        let fx = (cx - ox) as f64;
        let fy = (cy - oy) as f64;
        xs.push((fx * cos - fy * sin + ox as f64).round() as i32);
        ys.push((fx * sin + fy * cos + oy as f64).round() as i32);
    }
    Vec2Domain::new(
        IntervalDomain::new(xs.iter().copied().min().unwrap(), xs.iter().copied().max().unwrap()),
        IntervalDomain::new(ys.iter().copied().min().unwrap(), ys.iter().copied().max().unwrap()),
    )
}

fn transfer(ctx: &AstContext, op: Operation, pre: &D) -> D {
    match op {
        Operation::Init(id) => {
            let n = ctx.init(id);
            Vec2Domain::new(
                IntervalDomain::new(n.top_x, n.top_x + n.width),
                IntervalDomain::new(n.top_y, n.top_y + n.height),
            )
        }
        Operation::Translation(id) => {
            let n = ctx.translation(id);
            Vec2Domain::new(pre.x + IntervalDomain::point(n.dx), pre.y + IntervalDomain::point(n.dy))
        }
        Operation::Rotation(id) => {
            let n = ctx.rotation(id);
            rotate(pre.clone(), n.ox, n.oy, n.deg)
        }
    }
}

pub fn run_primitive(ctx: &AstContext, cfg: &Cfg) -> AnalysisResult<D> {
    core_solver::solve_plain(cfg, |op, pre| transfer(ctx, op, pre), DEFAULT_NODE_LIMIT)
}

pub fn run_widening(ctx: &AstContext, cfg: &Cfg) -> AnalysisResult<D> {
    core_solver::solve_widening(cfg, |op, pre| transfer(ctx, op, pre), DEFAULT_NODE_LIMIT)
}

pub fn annotate(ctx: &AstContext, cfg: &Cfg, result: &AnalysisResult<D>, annotations: &mut core_ast::Annotations) {
    core_solver::annotate_all_operations(cfg, result, |op, pre| transfer(ctx, op, pre), false, annotations);
}

pub fn covered_area(ctx: &AstContext, cfg: &Cfg, result: &AnalysisResult<D>) -> Vec<Polygon> {
    core_solver::covered_area(cfg, result, |op, pre| transfer(ctx, op, pre))
}
