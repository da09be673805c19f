//! Finite elements

pub mod base;
pub mod data;
pub(crate) mod interval;
pub mod values;

pub use base::FiniteElementBase;
pub use data::FiniteElementData;
pub use values::{CellValues, FaceValues, MappingTransform, UpdateFlags};
