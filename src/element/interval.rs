//! Evaluation on intervals
//!
//! In one dimension the map from the unit interval to a cell is affine, so the geometric
//! quantities and support points of every element can be written down directly.

use crate::element::data::FiniteElementData;
use crate::element::values::CellValues;
use crate::traits::Cell;
use crate::types::{Array2, FeError, FeResult};
use rlst::{RandomAccessByRef, RandomAccessMut, RlstScalar, Shape};

/// The first vertex and the width of an interval cell
pub(crate) fn cell_width<T: RlstScalar<Real = T>, C: Cell<T = T>>(cell: &C) -> FeResult<(T, T)> {
    if cell.dim() != 1 {
        return Err(FeError::DimensionMismatch {
            expected: 1,
            found: cell.dim(),
        });
    }
    let coordinate = |index: usize| {
        cell.vertex(index)
            .and_then(|v| v.first().copied())
            .ok_or(FeError::IndexRange {
                index,
                start: 0,
                end: cell.vertex_count(),
            })
    };
    let x0 = coordinate(0)?;
    let x1 = coordinate(1)?;
    Ok((x0, x1 - x0))
}

/// Fill in the Jacobians, their gradients and the mapped points
///
/// The shapes of the buffers must already have been checked.
pub(crate) fn fill_mapping<T: RlstScalar<Real = T>, C: Cell<T = T>>(
    cell: &C,
    unit_points: &Array2<T>,
    values: &mut CellValues<T>,
) -> FeResult<()> {
    let (x0, h) = cell_width(cell)?;
    let npoints = unit_points.shape()[0];

    if let Some(jacobians) = values.jacobians.as_mut() {
        for i in 0..npoints {
            *jacobians.get_mut([i, 0, 0]).unwrap() = T::one() / h;
        }
    }
    // The map is affine
    if let Some(gradients) = values.jacobian_gradients.as_mut() {
        for i in 0..npoints {
            *gradients.get_mut([i, 0, 0, 0]).unwrap() = T::zero();
        }
    }
    if let Some(points) = values.quadrature_points.as_mut() {
        for i in 0..npoints {
            *points.get_mut([i, 0]).unwrap() = x0 + h * *unit_points.get([i, 0]).unwrap();
        }
    }
    Ok(())
}

/// The position of the `i`th of `n` equally spaced interior points of the unit interval
fn interior_point<T: RlstScalar<Real = T>>(i: usize, n: usize) -> T {
    num::cast::<_, T>(i + 1).unwrap() / num::cast::<_, T>(n + 1).unwrap()
}

/// Support points on the unit interval: the dofs of vertex 0, then those of vertex 1,
/// then the line dofs equally spaced in the interior
pub(crate) fn unit_support_points<T: RlstScalar<Real = T>, const DIM: usize>(
    data: &FiniteElementData<DIM>,
    support_points: &mut Array2<T>,
) {
    place_support_points(data, T::zero(), T::one(), support_points);
}

/// Support points on an interval cell, in the same order as [`unit_support_points`]
pub(crate) fn support_points<T: RlstScalar<Real = T>, C: Cell<T = T>, const DIM: usize>(
    data: &FiniteElementData<DIM>,
    cell: &C,
    support_points: &mut Array2<T>,
) -> FeResult<()> {
    let (x0, h) = cell_width(cell)?;
    place_support_points(data, x0, h, support_points);
    Ok(())
}

fn place_support_points<T: RlstScalar<Real = T>, const DIM: usize>(
    data: &FiniteElementData<DIM>,
    x0: T,
    h: T,
    support_points: &mut Array2<T>,
) {
    let mut next = 0;
    for vertex in [x0, x0 + h] {
        for _ in 0..data.dofs_per_vertex() {
            *support_points.get_mut([next, 0]).unwrap() = vertex;
            next += 1;
        }
    }
    for i in 0..data.dofs_per_line() {
        *support_points.get_mut([next, 0]).unwrap() =
            x0 + h * interior_point::<T>(i, data.dofs_per_line());
        next += 1;
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::cell::FlatCell;
    use crate::element::values::UpdateFlags;
    use approx::*;
    use rlst::rlst_dynamic_array2;

    #[test]
    fn test_cell_width() {
        let (x0, h) = cell_width(&FlatCell::interval(1.0, 4.0)).unwrap();
        assert_relative_eq!(x0, 1.0);
        assert_relative_eq!(h, 3.0);

        let square = FlatCell::axis_aligned(&[0.0, 0.0], &[1.0, 1.0]).unwrap();
        assert_eq!(
            cell_width(&square),
            Err(FeError::DimensionMismatch {
                expected: 1,
                found: 2
            })
        );
    }

    #[test]
    fn test_fill_mapping_reuses_buffers() {
        let cell = FlatCell::interval(-1.0, 1.0);
        let mut points = rlst_dynamic_array2!(f64, [2, 1]);
        *points.get_mut([1, 0]).unwrap() = 0.25;
        let mut values = CellValues::new(UpdateFlags::all(), 2, 0, 1);
        *values
            .jacobian_gradients
            .as_mut()
            .unwrap()
            .get_mut([1, 0, 0, 0])
            .unwrap() = 7.0;
        fill_mapping(&cell, &points, &mut values).unwrap();

        let jacobians = values.jacobians.as_ref().unwrap();
        let gradients = values.jacobian_gradients.as_ref().unwrap();
        let mapped = values.quadrature_points.as_ref().unwrap();
        assert_relative_eq!(*jacobians.get([1, 0, 0]).unwrap(), 0.5);
        assert_relative_eq!(*gradients.get([1, 0, 0, 0]).unwrap(), 0.0);
        assert_relative_eq!(*mapped.get([0, 0]).unwrap(), -1.0);
        assert_relative_eq!(*mapped.get([1, 0]).unwrap(), -0.5);
    }

    #[test]
    fn test_unit_support_points_vertices_only() {
        let data = FiniteElementData::<1>::new_1d(2, 0, 2, 1).unwrap();
        let mut pts = rlst_dynamic_array2!(f64, [4, 1]);
        unit_support_points(&data, &mut pts);
        for (i, expected) in [0.0, 0.0, 1.0, 1.0].iter().enumerate() {
            assert_relative_eq!(*pts.get([i, 0]).unwrap(), *expected);
        }
    }
}
