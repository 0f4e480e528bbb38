//! CPU-side mesh types.
//!
//! - [`Vertex`] - Fixed vertex record produced by the loader
//! - [`Primitive`] - Vertex/index arrays of one drawable unit
//! - [`PrimitiveTopology`] - How vertices are assembled

mod data;

pub use data::{Primitive, PrimitiveTopology, Vertex};
