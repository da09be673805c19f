//! Finite element definitions

use crate::element::base::FiniteElementBase;
use crate::element::data::FiniteElementData;
use crate::element::interval;
use crate::element::values::{CellValues, FaceValues, MappingTransform};
use crate::traits::Cell;
use crate::types::{check_index, check_shape, Array2, FeError, FeResult};
use rlst::{RlstScalar, Shape};

pub trait FiniteElement<const DIM: usize> {
    //! A finite element on cells of dimension `DIM`
    //!
    //! A concrete element provides [`FiniteElement::base`] and, in dimensions 2 and 3,
    //! the cell-level evaluation and support point routines together with the face hooks.
    //! Face and subface evaluation are built from those. In dimension 1 everything is
    //! provided.

    /// The scalar type
    type T: RlstScalar<Real = Self::T>;

    /// The dof layout, transfer matrices and component tables of the element
    fn base(&self) -> &FiniteElementBase<Self::T, DIM>;

    /// The dof layout
    fn data(&self) -> &FiniteElementData<DIM> {
        self.base().data()
    }

    /// Compute the requested quantities of `values` at `unit_points`.
    ///
    /// `unit_points` has shape `[npoints, DIM]`. Support points are those of the whole
    /// cell and do not depend on `unit_points`. `transform` holds the cell map's shape
    /// functions tabulated at `unit_points`.
    fn fill_fe_values<C: Cell<T = Self::T>>(
        &self,
        cell: &C,
        unit_points: &Array2<Self::T>,
        values: &mut CellValues<Self::T>,
        transform: &MappingTransform<Self::T>,
    ) -> FeResult<()> {
        let _ = transform;
        let npoints = check_points("unit_points", unit_points, DIM)?;
        values.check_shapes(npoints, self.data().total_dofs(), DIM)?;
        if DIM != 1 {
            return Err(FeError::PureFunctionCalled("fill_fe_values"));
        }
        interval::fill_mapping(cell, unit_points, values)?;
        if let Some(support_points) = values.support_points.as_mut() {
            self.support_points(cell, support_points)?;
        }
        Ok(())
    }

    /// Compute the requested quantities of `values` on face `face_no` of `cell`.
    ///
    /// `face_unit_points` has shape `[npoints, DIM - 1]`; `cell_unit_points` holds the same
    /// points as seen from the cell, shape `[npoints, DIM]`. The support point buffer, if
    /// present, receives the support points of the face. The results are computed into
    /// new buffers which replace those of `values` once every quantity has been computed,
    /// so `values` is untouched if an error is returned.
    fn fill_fe_face_values<C: Cell<T = Self::T>>(
        &self,
        cell: &C,
        face_no: usize,
        face_unit_points: &Array2<Self::T>,
        cell_unit_points: &Array2<Self::T>,
        values: &mut FaceValues<Self::T>,
        transform: &MappingTransform<Self::T>,
    ) -> FeResult<()> {
        if DIM == 1 {
            return Err(FeError::NotImplemented(
                "face values of one-dimensional elements",
            ));
        }
        check_index(face_no, self.base().faces_per_cell())?;
        let npoints = check_face_points(face_unit_points, cell_unit_points, DIM)?;
        let nsupport = self.data().dofs_per_face();
        values.check_shapes(npoints, nsupport, DIM)?;

        // Nothing reaches `values` unless every step succeeds
        let mut staged = FaceValues::new(values.flags(), npoints, nsupport, DIM);
        let face_support_points = staged.cell.support_points.take();
        self.fill_fe_values(cell, cell_unit_points, &mut staged.cell, transform)?;
        staged.cell.support_points = face_support_points;

        if let Some(support_points) = staged.cell.support_points.as_mut() {
            self.face_support_points(cell, face_no, support_points)?;
        }
        if let Some(determinants) = staged.face_jacobians.as_mut() {
            self.face_jacobians(cell, face_no, face_unit_points, determinants)?;
        }
        if let Some(normals) = staged.normal_vectors.as_mut() {
            self.normal_vectors(cell, face_no, face_unit_points, normals)?;
        }
        *values = staged;
        Ok(())
    }

    /// Compute the requested quantities of `values` on subface `subface_no` of face
    /// `face_no` of `cell`.
    ///
    /// Subfaces have no dofs of their own, so support points cannot be requested.
    #[allow(clippy::too_many_arguments)]
    fn fill_fe_subface_values<C: Cell<T = Self::T>>(
        &self,
        cell: &C,
        face_no: usize,
        subface_no: usize,
        face_unit_points: &Array2<Self::T>,
        cell_unit_points: &Array2<Self::T>,
        values: &mut FaceValues<Self::T>,
        transform: &MappingTransform<Self::T>,
    ) -> FeResult<()> {
        if DIM == 1 {
            return Err(FeError::NotImplemented(
                "subface values of one-dimensional elements",
            ));
        }
        if values.cell.support_points.is_some() {
            return Err(FeError::NotImplemented("support points on subfaces"));
        }
        check_index(face_no, self.base().faces_per_cell())?;
        check_index(subface_no, self.base().subfaces_per_face())?;
        let npoints = check_face_points(face_unit_points, cell_unit_points, DIM)?;
        values.check_shapes(npoints, 0, DIM)?;

        let mut staged = FaceValues::new(values.flags(), npoints, 0, DIM);
        self.fill_fe_values(cell, cell_unit_points, &mut staged.cell, transform)?;

        if let Some(determinants) = staged.face_jacobians.as_mut() {
            self.subface_jacobians(cell, face_no, subface_no, face_unit_points, determinants)?;
        }
        if let Some(normals) = staged.normal_vectors.as_mut() {
            self.subface_normal_vectors(cell, face_no, subface_no, face_unit_points, normals)?;
        }
        *values = staged;
        Ok(())
    }

    /// Write the support points of the dofs on the reference cell into `support_points`,
    /// which must have shape `[total_dofs, DIM]`
    fn unit_support_points(&self, support_points: &mut Array2<Self::T>) -> FeResult<()> {
        check_shape(
            "support_points",
            support_points.shape(),
            [self.data().total_dofs(), DIM],
        )?;
        if DIM != 1 {
            return Err(FeError::PureFunctionCalled("unit_support_points"));
        }
        interval::unit_support_points(self.data(), support_points);
        Ok(())
    }

    /// Write the support points of the dofs on `cell` into `support_points`, which must
    /// have shape `[total_dofs, DIM]`
    fn support_points<C: Cell<T = Self::T>>(
        &self,
        cell: &C,
        support_points: &mut Array2<Self::T>,
    ) -> FeResult<()> {
        check_shape(
            "support_points",
            support_points.shape(),
            [self.data().total_dofs(), DIM],
        )?;
        if DIM != 1 {
            return Err(FeError::PureFunctionCalled("support_points"));
        }
        interval::support_points(self.data(), cell, support_points)
    }

    /// Write the support points of the dofs on face `face_no` of `cell` into
    /// `support_points`, which has shape `[dofs_per_face, DIM]`
    fn face_support_points<C: Cell<T = Self::T>>(
        &self,
        cell: &C,
        face_no: usize,
        support_points: &mut Array2<Self::T>,
    ) -> FeResult<()> {
        let _ = (cell, face_no, support_points);
        Err(FeError::PureFunctionCalled("face_support_points"))
    }

    /// Write the determinant of the face map's Jacobian at each point into `determinants`
    fn face_jacobians<C: Cell<T = Self::T>>(
        &self,
        cell: &C,
        face_no: usize,
        face_unit_points: &Array2<Self::T>,
        determinants: &mut [Self::T],
    ) -> FeResult<()> {
        let _ = (cell, face_no, face_unit_points, determinants);
        Err(FeError::PureFunctionCalled("face_jacobians"))
    }

    /// Write the determinant of the subface map's Jacobian at each point into `determinants`
    fn subface_jacobians<C: Cell<T = Self::T>>(
        &self,
        cell: &C,
        face_no: usize,
        subface_no: usize,
        face_unit_points: &Array2<Self::T>,
        determinants: &mut [Self::T],
    ) -> FeResult<()> {
        let _ = (cell, face_no, subface_no, face_unit_points, determinants);
        Err(FeError::PureFunctionCalled("subface_jacobians"))
    }

    /// Write the outward unit normal at each point of a face into `normals`
    fn normal_vectors<C: Cell<T = Self::T>>(
        &self,
        cell: &C,
        face_no: usize,
        face_unit_points: &Array2<Self::T>,
        normals: &mut Array2<Self::T>,
    ) -> FeResult<()> {
        let _ = (cell, face_no, face_unit_points, normals);
        Err(FeError::PureFunctionCalled("normal_vectors"))
    }

    /// Write the outward unit normal at each point of a subface into `normals`
    fn subface_normal_vectors<C: Cell<T = Self::T>>(
        &self,
        cell: &C,
        face_no: usize,
        subface_no: usize,
        face_unit_points: &Array2<Self::T>,
        normals: &mut Array2<Self::T>,
    ) -> FeResult<()> {
        let _ = (cell, face_no, subface_no, face_unit_points, normals);
        Err(FeError::PureFunctionCalled("subface_normal_vectors"))
    }

    /// The number of elements this element is composed of
    fn n_base_elements(&self) -> usize {
        1
    }

    /// The `index`th element this element is composed of
    fn base_element(&self, index: usize) -> FeResult<&Self>
    where
        Self: Sized,
    {
        check_index(index, 1)?;
        Ok(self)
    }
}

/// Check that `points` has `dim` columns and return the number of points
fn check_points<T: RlstScalar>(
    field: &'static str,
    points: &Array2<T>,
    dim: usize,
) -> FeResult<usize> {
    let [npoints, _] = points.shape();
    check_shape(field, points.shape(), [npoints, dim])?;
    Ok(npoints)
}

/// Check a pair of face and cell points and return the number of points
fn check_face_points<T: RlstScalar>(
    face_unit_points: &Array2<T>,
    cell_unit_points: &Array2<T>,
    dim: usize,
) -> FeResult<usize> {
    let npoints = check_points("face_unit_points", face_unit_points, dim.saturating_sub(1))?;
    check_shape(
        "cell_unit_points",
        cell_unit_points.shape(),
        [npoints, dim],
    )?;
    Ok(npoints)
}
