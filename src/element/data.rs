//! Degree-of-freedom layout of an element

use crate::reference_cell;
use crate::types::{FeError, FeResult};
use std::ops::Range;

/// The number of dofs attached to each kind of topological entity of a cell, and the
/// offsets at which each kind starts in the local numbering.
///
/// Local dofs are numbered vertex dofs first (vertex by vertex), then line dofs, then
/// quad dofs, then hex dofs. The same scheme, one dimension lower, numbers the dofs of
/// a face.
#[derive(Debug, Clone, Copy)]
pub struct FiniteElementData<const DIM: usize> {
    dofs_per_vertex: usize,
    dofs_per_line: usize,
    dofs_per_quad: usize,
    dofs_per_hex: usize,
    dofs_per_face: usize,
    first_line_index: usize,
    first_quad_index: usize,
    first_hex_index: usize,
    first_face_line_index: usize,
    first_face_quad_index: usize,
    total_dofs: usize,
    n_transform_functions: usize,
    n_components: usize,
}

impl<const DIM: usize> FiniteElementData<DIM> {
    /// Create the layout of an element on intervals
    pub fn new_1d(
        dofs_per_vertex: usize,
        dofs_per_line: usize,
        n_transform_functions: usize,
        n_components: usize,
    ) -> FeResult<Self> {
        Self::check_dim(1)?;
        Self::from_counts(
            [dofs_per_vertex, dofs_per_line, 0, 0],
            n_transform_functions,
            n_components,
        )
    }

    /// Create the layout of an element on quadrilaterals
    pub fn new_2d(
        dofs_per_vertex: usize,
        dofs_per_line: usize,
        dofs_per_quad: usize,
        n_transform_functions: usize,
        n_components: usize,
    ) -> FeResult<Self> {
        Self::check_dim(2)?;
        Self::from_counts(
            [dofs_per_vertex, dofs_per_line, dofs_per_quad, 0],
            n_transform_functions,
            n_components,
        )
    }

    /// Create the layout of an element on hexahedra
    pub fn new_3d(
        dofs_per_vertex: usize,
        dofs_per_line: usize,
        dofs_per_quad: usize,
        dofs_per_hex: usize,
        n_transform_functions: usize,
        n_components: usize,
    ) -> FeResult<Self> {
        Self::check_dim(3)?;
        Self::from_counts(
            [dofs_per_vertex, dofs_per_line, dofs_per_quad, dofs_per_hex],
            n_transform_functions,
            n_components,
        )
    }

    fn check_dim(expected: usize) -> FeResult<()> {
        if DIM == expected {
            Ok(())
        } else {
            Err(FeError::DimensionMismatch {
                expected,
                found: DIM,
            })
        }
    }

    /// Derive every offset from the per-entity counts
    fn from_counts(
        dofs: [usize; 4],
        n_transform_functions: usize,
        n_components: usize,
    ) -> FeResult<Self> {
        if n_components == 0 {
            return Err(FeError::InvalidComponentTable(
                "an element has at least one component".to_string(),
            ));
        }
        let cell = reference_cell::from_dim(DIM)?;
        let cell_counts = reference_cell::entity_counts(cell);
        let face_counts = reference_cell::entity_counts(reference_cell::facet_type(cell));

        let mut first = [0; 5];
        for d in 0..4 {
            first[d + 1] = first[d] + cell_counts[d] * dofs[d];
        }
        let first_face_line_index = face_counts[0] * dofs[0];
        let first_face_quad_index = first_face_line_index + face_counts[1] * dofs[1];
        let dofs_per_face = (0..DIM).map(|d| face_counts[d] * dofs[d]).sum();

        Ok(Self {
            dofs_per_vertex: dofs[0],
            dofs_per_line: dofs[1],
            dofs_per_quad: dofs[2],
            dofs_per_hex: dofs[3],
            dofs_per_face,
            first_line_index: first[1],
            first_quad_index: first[2],
            first_hex_index: first[3],
            first_face_line_index,
            first_face_quad_index,
            total_dofs: first[4],
            n_transform_functions,
            n_components,
        })
    }

    /// The spatial dimension
    pub fn dim(&self) -> usize {
        DIM
    }
    /// Number of dofs on each vertex
    pub fn dofs_per_vertex(&self) -> usize {
        self.dofs_per_vertex
    }
    /// Number of dofs in the interior of each line
    pub fn dofs_per_line(&self) -> usize {
        self.dofs_per_line
    }
    /// Number of dofs in the interior of each quad
    pub fn dofs_per_quad(&self) -> usize {
        self.dofs_per_quad
    }
    /// Number of dofs in the interior of each hex
    pub fn dofs_per_hex(&self) -> usize {
        self.dofs_per_hex
    }
    /// Number of dofs on a face, including those on its boundary
    pub fn dofs_per_face(&self) -> usize {
        self.dofs_per_face
    }
    /// Index of the first line dof
    pub fn first_line_index(&self) -> usize {
        self.first_line_index
    }
    /// Index of the first quad dof
    pub fn first_quad_index(&self) -> usize {
        self.first_quad_index
    }
    /// Index of the first hex dof
    pub fn first_hex_index(&self) -> usize {
        self.first_hex_index
    }
    /// Index of the first line dof in the numbering of a face
    pub fn first_face_line_index(&self) -> usize {
        self.first_face_line_index
    }
    /// Index of the first quad dof in the numbering of a face
    pub fn first_face_quad_index(&self) -> usize {
        self.first_face_quad_index
    }
    /// Number of dofs on a cell
    pub fn total_dofs(&self) -> usize {
        self.total_dofs
    }
    /// Number of shape functions describing the geometry of a cell
    pub fn n_transform_functions(&self) -> usize {
        self.n_transform_functions
    }
    /// Number of vector components
    pub fn n_components(&self) -> usize {
        self.n_components
    }

    /// Number of dofs in the interior of one entity of dimension `entity_dim`
    pub fn n_dofs_per_entity(&self, entity_dim: usize) -> usize {
        match entity_dim {
            0 => self.dofs_per_vertex,
            1 => self.dofs_per_line,
            2 => self.dofs_per_quad,
            3 => self.dofs_per_hex,
            _ => 0,
        }
    }

    fn first_index(&self, entity_dim: usize) -> usize {
        match entity_dim {
            0 => 0,
            1 => self.first_line_index,
            2 => self.first_quad_index,
            _ => self.first_hex_index,
        }
    }

    /// The local dofs that are associated with the interior of a subentity of the cell
    pub fn entity_dofs(&self, entity_dim: usize, entity_number: usize) -> Option<Range<usize>> {
        if entity_dim > DIM {
            return None;
        }
        let counts = reference_cell::entity_counts(reference_cell::from_dim(DIM).ok()?);
        if entity_number >= counts[entity_dim] {
            return None;
        }
        let n = self.n_dofs_per_entity(entity_dim);
        let start = self.first_index(entity_dim) + entity_number * n;
        Some(start..start + n)
    }

    /// The entity that a local dof belongs to, as `(entity_dim, entity_number, index)`
    /// where `index` is the position of the dof within that entity
    pub fn dof_entity(&self, local_dof: usize) -> Option<(usize, usize, usize)> {
        if local_dof >= self.total_dofs {
            return None;
        }
        let entity_dim = (0..=DIM)
            .rev()
            .find(|d| local_dof >= self.first_index(*d) && self.n_dofs_per_entity(*d) > 0)?;
        let offset = local_dof - self.first_index(entity_dim);
        let n = self.n_dofs_per_entity(entity_dim);
        Some((entity_dim, offset / n, offset % n))
    }
}

impl<const DIM: usize> PartialEq for FiniteElementData<DIM> {
    fn eq(&self, other: &Self) -> bool {
        self.dofs_per_vertex == other.dofs_per_vertex
            && self.dofs_per_line == other.dofs_per_line
            && self.dofs_per_quad == other.dofs_per_quad
            && self.dofs_per_hex == other.dofs_per_hex
            && self.n_transform_functions == other.n_transform_functions
            && self.n_components == other.n_components
    }
}

impl<const DIM: usize> Eq for FiniteElementData<DIM> {}
