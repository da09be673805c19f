//! Definition of a cell.

use crate::reference_cell;
use crate::types::ReferenceCellType;
use rlst::RlstScalar;

pub trait Cell {
    //! A mesh cell, as seen by an element

    /// The scalar type of the vertex coordinates
    type T: RlstScalar<Real = Self::T>;

    /// The reference cell that this cell is mapped from
    fn cell_type(&self) -> ReferenceCellType;

    /// The topological dimension of the cell
    fn dim(&self) -> usize {
        reference_cell::dim(self.cell_type())
    }

    /// The number of vertices
    fn vertex_count(&self) -> usize;

    /// The coordinates of a vertex, in the numbering of the reference cell
    fn vertex(&self, index: usize) -> Option<&[Self::T]>;
}
