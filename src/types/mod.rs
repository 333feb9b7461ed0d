//! Value types shared by the selection model, resolvers and renderer.

mod cell;
mod geometry;
mod selection;

pub use cell::*;
pub use geometry::*;
pub use selection::*;
