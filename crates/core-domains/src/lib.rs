//! The four concrete abstract domains built on top of the [`core_geo`]
//! trait contract.

pub mod interval;
pub mod powerset;
pub mod sign;
pub mod vec2;

pub use interval::IntervalDomain;
pub use powerset::PowersetDomain;
pub use sign::SignDomain;
pub use vec2::Vec2Domain;
