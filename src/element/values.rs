//! Requests for and results of element evaluation

use crate::types::{check_shape, Array2, Array3, Array4, FeResult};
use rlst::{
    rlst_dynamic_array2, rlst_dynamic_array3, rlst_dynamic_array4, RlstScalar, Shape,
};

/// The quantities to compute when evaluating an element
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateFlags {
    /// Jacobians of the cell map at each point
    pub jacobians: bool,
    /// Gradients of the Jacobians at each point
    pub jacobian_gradients: bool,
    /// The points mapped to the physical cell
    pub quadrature_points: bool,
    /// The support points of the element's dofs
    pub support_points: bool,
    /// Determinants of the face Jacobians (face evaluation only)
    pub face_jacobians: bool,
    /// Outward unit normals (face evaluation only)
    pub normal_vectors: bool,
}

impl UpdateFlags {
    /// Request everything
    pub fn all() -> Self {
        Self {
            jacobians: true,
            jacobian_gradients: true,
            quadrature_points: true,
            support_points: true,
            face_jacobians: true,
            normal_vectors: true,
        }
    }
}

/// Buffers filled by a cell evaluation. Quantities that were not requested are `None`.
///
/// The buffers are owned by the caller and can be reused between cells; the evaluation
/// routines check their shapes but never resize them.
pub struct CellValues<T: RlstScalar<Real = T>> {
    /// Jacobians, shape `[npoints, dim, dim]`
    pub jacobians: Option<Array3<T>>,
    /// Jacobian gradients, shape `[npoints, dim, dim, dim]`
    pub jacobian_gradients: Option<Array4<T>>,
    /// Mapped points, shape `[npoints, dim]`
    pub quadrature_points: Option<Array2<T>>,
    /// Support points, shape `[nsupport, dim]`
    pub support_points: Option<Array2<T>>,
}

impl<T: RlstScalar<Real = T>> CellValues<T> {
    /// Allocate zeroed buffers for the requested quantities
    ///
    /// `nsupport` is the number of support points: the number of dofs of the cell, or of
    /// a face for face evaluation.
    pub fn new(flags: UpdateFlags, npoints: usize, nsupport: usize, dim: usize) -> Self {
        Self {
            jacobians: flags
                .jacobians
                .then(|| rlst_dynamic_array3!(T, [npoints, dim, dim])),
            jacobian_gradients: flags
                .jacobian_gradients
                .then(|| rlst_dynamic_array4!(T, [npoints, dim, dim, dim])),
            quadrature_points: flags
                .quadrature_points
                .then(|| rlst_dynamic_array2!(T, [npoints, dim])),
            support_points: flags
                .support_points
                .then(|| rlst_dynamic_array2!(T, [nsupport, dim])),
        }
    }

    /// The quantities these buffers hold
    pub fn flags(&self) -> UpdateFlags {
        UpdateFlags {
            jacobians: self.jacobians.is_some(),
            jacobian_gradients: self.jacobian_gradients.is_some(),
            quadrature_points: self.quadrature_points.is_some(),
            support_points: self.support_points.is_some(),
            ..Default::default()
        }
    }

    /// Check that every present buffer has the shape required for `npoints` points and
    /// `nsupport` support points in dimension `dim`
    pub fn check_shapes(&self, npoints: usize, nsupport: usize, dim: usize) -> FeResult<()> {
        if let Some(j) = &self.jacobians {
            check_shape("jacobians", j.shape(), [npoints, dim, dim])?;
        }
        if let Some(g) = &self.jacobian_gradients {
            check_shape("jacobian_gradients", g.shape(), [npoints, dim, dim, dim])?;
        }
        if let Some(q) = &self.quadrature_points {
            check_shape("quadrature_points", q.shape(), [npoints, dim])?;
        }
        if let Some(s) = &self.support_points {
            check_shape("support_points", s.shape(), [nsupport, dim])?;
        }
        Ok(())
    }
}

/// Buffers filled by a face or subface evaluation
pub struct FaceValues<T: RlstScalar<Real = T>> {
    /// The quantities shared with cell evaluation. Support points are those of the face.
    pub cell: CellValues<T>,
    /// Determinants of the face Jacobians, one per point
    pub face_jacobians: Option<Vec<T>>,
    /// Outward unit normals, shape `[npoints, dim]`
    pub normal_vectors: Option<Array2<T>>,
}

impl<T: RlstScalar<Real = T>> FaceValues<T> {
    /// Allocate zeroed buffers for the requested quantities
    pub fn new(flags: UpdateFlags, npoints: usize, nsupport: usize, dim: usize) -> Self {
        Self {
            cell: CellValues::new(flags, npoints, nsupport, dim),
            face_jacobians: flags.face_jacobians.then(|| vec![T::zero(); npoints]),
            normal_vectors: flags
                .normal_vectors
                .then(|| rlst_dynamic_array2!(T, [npoints, dim])),
        }
    }

    /// The quantities these buffers hold
    pub fn flags(&self) -> UpdateFlags {
        UpdateFlags {
            face_jacobians: self.face_jacobians.is_some(),
            normal_vectors: self.normal_vectors.is_some(),
            ..self.cell.flags()
        }
    }

    /// Check that every present buffer has the required shape
    pub fn check_shapes(&self, npoints: usize, nsupport: usize, dim: usize) -> FeResult<()> {
        self.cell.check_shapes(npoints, nsupport, dim)?;
        if let Some(d) = &self.face_jacobians {
            check_shape("face_jacobians", [d.len()], [npoints])?;
        }
        if let Some(n) = &self.normal_vectors {
            check_shape("normal_vectors", n.shape(), [npoints, dim])?;
        }
        Ok(())
    }
}

/// Values and gradients of the functions describing the cell map, tabulated at the
/// evaluation points.
///
/// These are passed through to the element unchanged; the element decides how (and if)
/// they are used.
pub struct MappingTransform<T: RlstScalar<Real = T>> {
    /// Values, shape `[n_transform_functions, npoints]`
    pub shape_values: Array2<T>,
    /// Gradients, shape `[n_transform_functions, npoints, dim]`
    pub shape_gradients: Array3<T>,
}

impl<T: RlstScalar<Real = T>> MappingTransform<T> {
    /// Allocate zeroed tables
    pub fn new(n_transform_functions: usize, npoints: usize, dim: usize) -> Self {
        Self {
            shape_values: rlst_dynamic_array2!(T, [n_transform_functions, npoints]),
            shape_gradients: rlst_dynamic_array3!(T, [n_transform_functions, npoints, dim]),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_allocation_follows_flags() {
        let flags = UpdateFlags {
            jacobians: true,
            support_points: true,
            ..Default::default()
        };
        let values = CellValues::<f64>::new(flags, 5, 9, 2);
        assert_eq!(values.jacobians.as_ref().unwrap().shape(), [5, 2, 2]);
        assert!(values.jacobian_gradients.is_none());
        assert!(values.quadrature_points.is_none());
        assert_eq!(values.support_points.as_ref().unwrap().shape(), [9, 2]);
        assert_eq!(values.flags(), flags);
        assert!(values.check_shapes(5, 9, 2).is_ok());
        assert!(values.check_shapes(4, 9, 2).is_err());
        assert!(values.check_shapes(5, 8, 2).is_err());
    }

    #[test]
    fn test_face_allocation() {
        let values = FaceValues::<f64>::new(UpdateFlags::all(), 3, 2, 2);
        assert_eq!(values.flags(), UpdateFlags::all());
        assert_eq!(values.face_jacobians.as_ref().unwrap().len(), 3);
        assert_eq!(values.normal_vectors.as_ref().unwrap().shape(), [3, 2]);
        assert!(values.check_shapes(3, 2, 2).is_ok());
        assert!(values.check_shapes(3, 2, 3).is_err());
    }
}
