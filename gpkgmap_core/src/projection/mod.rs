//! Projections identified by authority and code, and transforms between them.

#![allow(clippy::module_inception)]

mod projection;
pub use projection::*;

mod transform;
pub use transform::*;
