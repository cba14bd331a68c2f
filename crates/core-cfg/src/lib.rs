//! Control-flow graphs, the reversed view used for backward analyses, and
//! the RPO worklist machinery that `core-solver` drives.

pub mod cfg;
pub mod dot;
pub mod reverse;
pub mod rpo;

pub use cfg::{BasicBlock, Cfg, CfgLike};
pub use dot::to_dot;
pub use reverse::ReverseCfg;
pub use rpo::{RpoOrder, Worklist};
