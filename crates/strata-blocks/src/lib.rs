//! Block types and their static material attributes.
#![forbid(unsafe_code)]

pub mod material;
pub mod types;

pub use material::{MATERIALS, Material, Variation};
pub use types::BlockType;
