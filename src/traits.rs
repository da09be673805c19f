//! Trait definitions

mod cell;
mod element;

pub use cell::Cell;
pub use element::FiniteElement;
