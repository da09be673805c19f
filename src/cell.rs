//! Cells given directly by their vertex coordinates

use crate::reference_cell;
use crate::traits::Cell;
use crate::types::{FeError, FeResult, ReferenceCellType};
use rlst::RlstScalar;

/// A cell stored as a list of vertex coordinates
#[derive(Debug, Clone)]
pub struct FlatCell<T: RlstScalar<Real = T>> {
    cell_type: ReferenceCellType,
    vertices: Vec<Vec<T>>,
}

impl<T: RlstScalar<Real = T>> FlatCell<T> {
    /// Create a cell from its vertices, given in the order of the reference cell's vertices
    pub fn new(cell_type: ReferenceCellType, vertices: Vec<Vec<T>>) -> FeResult<Self> {
        let tdim = reference_cell::dim(cell_type);
        let nvertices = reference_cell::entity_counts(cell_type)[0];
        if vertices.len() != nvertices {
            return Err(FeError::WrongFieldDimension {
                field: "vertices",
                found: vec![vertices.len()],
                expected: vec![nvertices],
            });
        }
        if let Some(v) = vertices.iter().find(|v| v.len() != tdim) {
            return Err(FeError::DimensionMismatch {
                expected: tdim,
                found: v.len(),
            });
        }
        Ok(Self {
            cell_type,
            vertices,
        })
    }

    /// The interval `[a, b]`
    pub fn interval(a: T, b: T) -> Self {
        Self {
            cell_type: ReferenceCellType::Interval,
            vertices: vec![vec![a], vec![b]],
        }
    }

    /// The axis-aligned box with lowest corner `origin` and edge lengths `widths`
    pub fn axis_aligned(origin: &[T], widths: &[T]) -> FeResult<Self> {
        if origin.len() != widths.len() {
            return Err(FeError::DimensionMismatch {
                expected: origin.len(),
                found: widths.len(),
            });
        }
        let cell_type = reference_cell::from_dim(origin.len())?;
        let vertices = reference_cell::vertices::<T>(cell_type)
            .iter()
            .map(|v| {
                v.iter()
                    .zip(origin.iter().zip(widths))
                    .map(|(x, (o, w))| *o + *x * *w)
                    .collect()
            })
            .collect();
        Ok(Self {
            cell_type,
            vertices,
        })
    }
}

impl<T: RlstScalar<Real = T>> Cell for FlatCell<T> {
    type T = T;

    fn cell_type(&self) -> ReferenceCellType {
        self.cell_type
    }

    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    fn vertex(&self, index: usize) -> Option<&[T]> {
        self.vertices.get(index).map(|v| v.as_slice())
    }
}
