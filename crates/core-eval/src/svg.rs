//! Hand-emitted SVG rendering of covered-area polygons and random-walk
//! traces, replacing the reference renderer's Cairo backend with
//! plain markup so the port carries no system-library dependency.

use crate::walk::Walk;
use core_geo::{clip_to_canvas, Polygon};
use rand::Rng;
use std::fmt::Write as _;

pub const CANVAS_SIZE: i32 = 500;
const DOT_RADIUS: i32 = 3;

/// The reference renderer's `ColorPicker` palette, ported verbatim
/// (duplicate entry and all) from `render.cpp`: distinguishable colors for
/// the first walks, falling back to uniformly sampled RGB triples once
/// exhausted.
const PALETTE: [(u8, u8, u8); 21] = [
    (230, 25, 75),
    (60, 180, 75),
    (0, 130, 200),
    (245, 130, 48),
    (145, 30, 180),
    (70, 240, 240),
    (240, 50, 230),
    (210, 245, 60),
    (250, 190, 212),
    (0, 128, 128),
    (220, 190, 255),
    (170, 110, 40),
    (255, 250, 200),
    (255, 250, 200),
    (128, 0, 0),
    (170, 255, 195),
    (128, 128, 0),
    (255, 215, 180),
    (0, 0, 128),
    (255, 225, 25),
    (128, 128, 128),
];

struct ColorPicker<'a, R: Rng> {
    index: usize,
    rng: &'a mut R,
}

impl<'a, R: Rng> ColorPicker<'a, R> {
    fn next_color(&mut self) -> (u8, u8, u8) {
        if self.index < PALETTE.len() {
            let color = PALETTE[self.index];
            self.index += 1;
            color
        } else {
            (self.rng.gen(), self.rng.gen(), self.rng.gen())
        }
    }
}

/// Renders a 500x500 white-background SVG with the inferred covered-area
/// polygons in light grey, black axes through the centre, and one colored
/// trace per walk (straight segments for translations, arcs for
/// rotations, dots for every step — green for the initial point, black
/// otherwise). `dots_only` suppresses the connecting segments/arcs.
pub fn render_svg(walks: &[Walk], covered: &[Polygon], dots_only: bool, rng: &mut impl Rng) -> String {
    let half = CANVAS_SIZE / 2;
    let mut out = String::new();

    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{CANVAS_SIZE}" height="{CANVAS_SIZE}" viewBox="0 0 {CANVAS_SIZE} {CANVAS_SIZE}">"#
    );
    let _ = writeln!(out, r#"<rect x="0" y="0" width="{CANVAS_SIZE}" height="{CANVAS_SIZE}" fill="white"/>"#);
    let _ = writeln!(out, r#"<g transform="translate({half}, {half})">"#);

    let _ = writeln!(out, r#"<g fill="rgb(191, 191, 191)">"#);
    for polygon in covered {
        if polygon.is_empty() {
            continue;
        }
        let points = polygon
            .iter()
            .map(|v| format!("{},{}", clip_to_canvas(v.x, half), -clip_to_canvas(v.y, half)))
            .collect::<Vec<_>>()
            .join(" ");
        let _ = writeln!(out, r#"  <polygon points="{points}"/>"#);
    }
    out.push_str("</g>\n");

    let _ = writeln!(out, r#"<g stroke="black" stroke-width="1">"#);
    let _ = writeln!(out, r#"  <line x1="0" y1="{}" x2="0" y2="{half}"/>"#, -half);
    let _ = writeln!(out, r#"  <line x1="{}" y1="0" x2="{half}" y2="0"/>"#, -half);
    out.push_str("</g>\n");

    let mut picker = ColorPicker { index: 0, rng };
    for walk in walks {
        let (r, g, b) = picker.next_color();
        if !dots_only {
            for i in 1..walk.len() {
                let prev = &walk[i - 1];
                let step = &walk[i];
                match step.arc {
                    Some(arc) => {
                        let dx = (prev.pos.x - arc.origin.x) as f64;
                        let dy = (prev.pos.y - arc.origin.y) as f64;
                        let radius = dx.hypot(dy);
                        let large_arc = if arc.degrees.rem_euclid(360).abs() > 180 { 1 } else { 0 };
                        let sweep = if arc.degrees >= 0 { 1 } else { 0 };
                        let _ = writeln!(
                            out,
                            r#"  <path d="M {} {} A {radius} {radius} 0 {large_arc} {sweep} {} {}" stroke="rgb({r}, {g}, {b})" fill="none"/>"#,
                            prev.pos.x, -prev.pos.y, step.pos.x, -step.pos.y
                        );
                    }
                    None => {
                        let _ = writeln!(
                            out,
                            r#"  <line x1="{}" y1="{}" x2="{}" y2="{}" stroke="rgb({r}, {g}, {b})" stroke-width="1"/>"#,
                            prev.pos.x, -prev.pos.y, step.pos.x, -step.pos.y
                        );
                    }
                }
            }
        }
        for step in walk {
            let fill = if step.initial { "rgb(0, 200, 0)" } else { "black" };
            let _ = writeln!(
                out,
                r#"  <circle cx="{}" cy="{}" r="{DOT_RADIUS}" fill="{fill}"/>"#,
                step.pos.x, -step.pos.y
            );
        }
    }

    out.push_str("</g>\n</svg>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::walk::Step;
    use core_geo::Vec2;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn renders_a_well_formed_svg_document() {
        let walk = vec![Step { pos: Vec2::new(0, 0), arc: None, initial: true }];
        let mut rng = StdRng::seed_from_u64(1);
        let svg = render_svg(&[walk], &[], false, &mut rng);
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains("fill=\"rgb(0, 200, 0)\""));
    }

    #[test]
    fn dots_only_suppresses_connecting_segments() {
        let walk = vec![
            Step { pos: Vec2::new(0, 0), arc: None, initial: true },
            Step { pos: Vec2::new(10, 0), arc: None, initial: false },
        ];
        let mut rng = StdRng::seed_from_u64(1);
        let svg = render_svg(&[walk], &[], true, &mut rng);
        assert!(!svg.contains("<line x1=\"0\" y1=\"-0\""));
    }

    #[test]
    fn covered_area_polygons_are_clipped_at_the_canvas_boundary() {
        let polygon: Polygon = vec![
            Vec2::new(core_geo::NEG_INF, core_geo::NEG_INF),
            Vec2::new(core_geo::INF, core_geo::INF),
        ];
        let mut rng = StdRng::seed_from_u64(1);
        let svg = render_svg(&[], &[polygon], false, &mut rng);
        let half = CANVAS_SIZE / 2;
        assert!(svg.contains(&format!("{},{}", -half, half)));
    }
}
