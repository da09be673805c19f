//! Fecore
//!
//! Degree-of-freedom layout, transfer and constraint matrices, and the evaluation
//! contract of finite elements on intervals, quadrilaterals and hexahedra.
#![cfg_attr(feature = "strict", deny(warnings))]
#![warn(missing_docs)]

pub mod cell;
pub mod element;
pub mod reference_cell;
pub mod traits;
pub mod types;
