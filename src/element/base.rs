//! Transfer and constraint matrices shared by all elements

use crate::element::data::FiniteElementData;
use crate::reference_cell;
use crate::types::{check_index, FeError, FeResult, Matrix};
use itertools::iproduct;
use log::{debug, warn};
use rlst::{rlst_dynamic_array2, RandomAccessByRef, RandomAccessMut, RlstScalar, Shape};

/// The dof layout of an element together with its restriction, prolongation and
/// interface constraint matrices and its component tables.
///
/// All matrices are zero after construction (except the 1x1 identity constraint of
/// one-dimensional elements). Concrete elements fill them in through the `_mut`
/// accessors, and elements with more than one component install their component
/// tables with [`FiniteElementBase::set_component_tables`].
pub struct FiniteElementBase<T: RlstScalar<Real = T>, const DIM: usize> {
    data: FiniteElementData<DIM>,
    restriction: Vec<Matrix<T>>,
    prolongation: Vec<Matrix<T>>,
    interface_constraints: Matrix<T>,
    system_to_component_table: Vec<(usize, usize)>,
    face_system_to_component_table: Vec<(usize, usize)>,
    component_to_system_table: Vec<Vec<usize>>,
    face_component_to_system_table: Vec<Vec<usize>>,
}

impl<T: RlstScalar<Real = T>, const DIM: usize> FiniteElementBase<T, DIM> {
    /// Create the base of an element with the given dof layout
    pub fn new(data: FiniteElementData<DIM>) -> FeResult<Self> {
        if !(1..=3).contains(&DIM) {
            return Err(FeError::NotImplemented(
                "transfer matrices are only available in dimensions 1, 2 and 3",
            ));
        }
        let cell = reference_cell::from_dim(DIM)?;
        let ndofs = data.total_dofs();
        let nchildren = reference_cell::children_count(cell);

        let restriction = (0..nchildren)
            .map(|_| rlst_dynamic_array2!(T, [ndofs, ndofs]))
            .collect::<Vec<_>>();
        let prolongation = (0..nchildren)
            .map(|_| rlst_dynamic_array2!(T, [ndofs, ndofs]))
            .collect::<Vec<_>>();

        let interface_constraints = if DIM == 1 {
            let mut ident = rlst_dynamic_array2!(T, [1, 1]);
            *ident.get_mut([0, 0]).unwrap() = T::one();
            ident
        } else {
            // One row per dof that a once-refined neighbour adds to the face
            let nrows = reference_cell::refined_facet_entity_counts(cell)
                .iter()
                .enumerate()
                .map(|(d, count)| count * data.n_dofs_per_entity(d))
                .sum::<usize>();
            rlst_dynamic_array2!(T, [nrows, data.dofs_per_face()])
        };

        debug!(
            "Creating element base in dimension {DIM}: {ndofs} dofs, {nchildren} children, {}x{} interface constraints",
            interface_constraints.shape()[0],
            interface_constraints.shape()[1]
        );

        let ncomponents = data.n_components();
        if ncomponents > 1 {
            warn!(
                "Element with {ncomponents} components uses single-component tables until set_component_tables is called"
            );
        }
        let mut component_to_system_table = vec![vec![]; ncomponents];
        component_to_system_table[0] = (0..ndofs).collect();
        let mut face_component_to_system_table = vec![vec![]; ncomponents];
        face_component_to_system_table[0] = (0..data.dofs_per_face()).collect();

        Ok(Self {
            data,
            restriction,
            prolongation,
            interface_constraints,
            system_to_component_table: (0..ndofs).map(|j| (0, j)).collect(),
            face_system_to_component_table: (0..data.dofs_per_face()).map(|j| (0, j)).collect(),
            component_to_system_table,
            face_component_to_system_table,
        })
    }

    /// The dof layout
    pub fn data(&self) -> &FiniteElementData<DIM> {
        &self.data
    }

    /// The number of children of a cell after one refinement
    pub fn children_per_cell(&self) -> usize {
        self.restriction.len()
    }

    /// The number of faces of a cell
    pub fn faces_per_cell(&self) -> usize {
        reference_cell::from_dim(DIM)
            .map(|cell| reference_cell::facets(cell).len())
            .unwrap_or(0)
    }

    /// The number of subfaces a face is split into when its neighbour is refined
    pub fn subfaces_per_face(&self) -> usize {
        reference_cell::from_dim(DIM)
            .map(reference_cell::subfacet_count)
            .unwrap_or(0)
    }

    /// The matrix mapping dof values on child `child` to the parent cell
    pub fn restrict(&self, child: usize) -> FeResult<&Matrix<T>> {
        check_index(child, self.restriction.len())?;
        Ok(&self.restriction[child])
    }

    /// The matrix mapping dof values on the parent cell to child `child`
    pub fn prolongate(&self, child: usize) -> FeResult<&Matrix<T>> {
        check_index(child, self.prolongation.len())?;
        Ok(&self.prolongation[child])
    }

    /// Mutable access to a restriction matrix, for use while building an element
    pub fn restriction_mut(&mut self, child: usize) -> FeResult<&mut Matrix<T>> {
        check_index(child, self.restriction.len())?;
        Ok(&mut self.restriction[child])
    }

    /// Mutable access to a prolongation matrix, for use while building an element
    pub fn prolongation_mut(&mut self, child: usize) -> FeResult<&mut Matrix<T>> {
        check_index(child, self.prolongation.len())?;
        Ok(&mut self.prolongation[child])
    }

    /// The matrix constraining the dofs of a refined face to those of the coarse face
    pub fn constraints(&self) -> FeResult<&Matrix<T>> {
        let [rows, cols] = self.interface_constraints.shape();
        if DIM == 1 && (rows != 1 || cols != 1) {
            return Err(FeError::WrongInterfaceMatrixSize { rows, cols });
        }
        Ok(&self.interface_constraints)
    }

    /// Mutable access to the interface constraints, for use while building an element
    pub fn interface_constraints_mut(&mut self) -> &mut Matrix<T> {
        &mut self.interface_constraints
    }

    /// The (component, index within component) pair of a local dof
    pub fn system_to_component_index(&self, index: usize) -> FeResult<(usize, usize)> {
        check_index(index, self.system_to_component_table.len())?;
        Ok(self.system_to_component_table[index])
    }

    /// The (component, index within component) pair of a face-local dof
    pub fn face_system_to_component_index(&self, index: usize) -> FeResult<(usize, usize)> {
        check_index(index, self.face_system_to_component_table.len())?;
        Ok(self.face_system_to_component_table[index])
    }

    /// The local dof of the `index`th dof of component `component`
    pub fn component_to_system_index(&self, component: usize, index: usize) -> FeResult<usize> {
        lookup(&self.component_to_system_table, component, index)
    }

    /// The face-local dof of the `index`th face dof of component `component`
    pub fn face_component_to_system_index(
        &self,
        component: usize,
        index: usize,
    ) -> FeResult<usize> {
        lookup(&self.face_component_to_system_table, component, index)
    }

    /// The component of every local dof
    pub fn system_to_component_table(&self) -> &[(usize, usize)] {
        &self.system_to_component_table
    }

    /// The component of every face-local dof
    pub fn face_system_to_component_table(&self) -> &[(usize, usize)] {
        &self.face_system_to_component_table
    }

    /// The local dofs of each component
    pub fn component_to_system_table(&self) -> &[Vec<usize>] {
        &self.component_to_system_table
    }

    /// The face-local dofs of each component
    pub fn face_component_to_system_table(&self) -> &[Vec<usize>] {
        &self.face_component_to_system_table
    }

    /// Install the component tables of a multi-component element.
    ///
    /// `cell_table[j]` and `face_table[j]` give the (component, index within component) pair
    /// of local dof `j`. The inverse tables are derived from these. Nothing is changed if
    /// either table is rejected.
    pub fn set_component_tables(
        &mut self,
        cell_table: Vec<(usize, usize)>,
        face_table: Vec<(usize, usize)>,
    ) -> FeResult<()> {
        let ncomponents = self.data.n_components();
        let component_to_system = invert_component_table(
            "system_to_component_table",
            &cell_table,
            self.data.total_dofs(),
            ncomponents,
        )?;
        let face_component_to_system = invert_component_table(
            "face_system_to_component_table",
            &face_table,
            self.data.dofs_per_face(),
            ncomponents,
        )?;
        self.system_to_component_table = cell_table;
        self.face_system_to_component_table = face_table;
        self.component_to_system_table = component_to_system;
        self.face_component_to_system_table = face_component_to_system;
        Ok(())
    }
}

impl<T: RlstScalar<Real = T>, const DIM: usize> PartialEq for FiniteElementBase<T, DIM> {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
            && matrices_equal(&self.interface_constraints, &other.interface_constraints)
    }
}

/// Element-wise comparison of two matrices
pub fn matrices_equal<T: RlstScalar>(a: &Matrix<T>, b: &Matrix<T>) -> bool {
    let [rows, cols] = a.shape();
    a.shape() == b.shape() && iproduct!(0..rows, 0..cols).all(|(i, j)| a.get([i, j]) == b.get([i, j]))
}

fn lookup(table: &[Vec<usize>], component: usize, index: usize) -> FeResult<usize> {
    check_index(component, table.len())?;
    check_index(index, table[component].len())?;
    Ok(table[component][index])
}

fn invert_component_table(
    field: &'static str,
    table: &[(usize, usize)],
    ndofs: usize,
    ncomponents: usize,
) -> FeResult<Vec<Vec<usize>>> {
    if table.len() != ndofs {
        return Err(FeError::WrongFieldDimension {
            field,
            found: vec![table.len()],
            expected: vec![ndofs],
        });
    }
    let mut sizes = vec![0; ncomponents];
    for (dof, (component, _)) in table.iter().enumerate() {
        if *component >= ncomponents {
            return Err(FeError::InvalidComponentTable(format!(
                "dof {dof} belongs to component {component} but the element has {ncomponents}"
            )));
        }
        sizes[*component] += 1;
    }
    let mut inverse = sizes.iter().map(|n| vec![None; *n]).collect::<Vec<_>>();
    for (dof, (component, index)) in table.iter().enumerate() {
        let Some(slot) = inverse[*component].get_mut(*index) else {
            return Err(FeError::InvalidComponentTable(format!(
                "dof {dof} has index {index} but component {component} has {} dofs",
                sizes[*component]
            )));
        };
        if let Some(other) = slot {
            return Err(FeError::InvalidComponentTable(format!(
                "dofs {other} and {dof} both have index {index} in component {component}"
            )));
        }
        *slot = Some(dof);
    }
    Ok(inverse
        .into_iter()
        .map(|dofs| dofs.into_iter().flatten().collect())
        .collect())
}
