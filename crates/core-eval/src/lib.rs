//! The concrete random-walk evaluator and the SVG renderer built on top of
//! its output.

pub mod svg;
pub mod walk;

pub use svg::render_svg;
pub use walk::{create_random_walk, rotate, Arc, Step, Walk};
