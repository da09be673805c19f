//! Cell definitions
//!
//! Topology of the tensor-product reference cells. Vertices are numbered
//! lexicographically, so vertex `i` of a cell of dimension `d` has coordinate
//! `(i >> k) & 1` in direction `k`.

use crate::types::{FeError, FeResult, ReferenceCellType};
use itertools::Itertools;
use rlst::RlstScalar;

/// The topological dimension of the cell
pub fn dim(cell: ReferenceCellType) -> usize {
    match cell {
        ReferenceCellType::Point => 0,
        ReferenceCellType::Interval => 1,
        ReferenceCellType::Quadrilateral => 2,
        ReferenceCellType::Hexahedron => 3,
    }
}

/// The reference cell of a given topological dimension
pub fn from_dim(dim: usize) -> FeResult<ReferenceCellType> {
    match dim {
        0 => Ok(ReferenceCellType::Point),
        1 => Ok(ReferenceCellType::Interval),
        2 => Ok(ReferenceCellType::Quadrilateral),
        3 => Ok(ReferenceCellType::Hexahedron),
        _ => Err(FeError::NotImplemented(
            "reference cells of dimension greater than three",
        )),
    }
}

/// The vertices of the reference cell
pub fn vertices<T: RlstScalar<Real = T>>(cell: ReferenceCellType) -> Vec<Vec<T>> {
    let zero = T::zero();
    let one = T::one();
    match cell {
        ReferenceCellType::Point => vec![],
        ReferenceCellType::Interval => vec![vec![zero], vec![one]],
        ReferenceCellType::Quadrilateral => vec![
            vec![zero, zero],
            vec![one, zero],
            vec![zero, one],
            vec![one, one],
        ],
        ReferenceCellType::Hexahedron => vec![
            vec![zero, zero, zero],
            vec![one, zero, zero],
            vec![zero, one, zero],
            vec![one, one, zero],
            vec![zero, zero, one],
            vec![one, zero, one],
            vec![zero, one, one],
            vec![one, one, one],
        ],
    }
}

/// The edges of the reference cell
pub fn edges(cell: ReferenceCellType) -> Vec<Vec<usize>> {
    match cell {
        ReferenceCellType::Point => vec![],
        ReferenceCellType::Interval => vec![vec![0, 1]],
        ReferenceCellType::Quadrilateral => vec![vec![0, 1], vec![0, 2], vec![1, 3], vec![2, 3]],
        ReferenceCellType::Hexahedron => vec![
            vec![0, 1],
            vec![0, 2],
            vec![0, 4],
            vec![1, 3],
            vec![1, 5],
            vec![2, 3],
            vec![2, 6],
            vec![3, 7],
            vec![4, 5],
            vec![4, 6],
            vec![5, 7],
            vec![6, 7],
        ],
    }
}

/// The faces of the reference cell
pub fn faces(cell: ReferenceCellType) -> Vec<Vec<usize>> {
    match cell {
        ReferenceCellType::Point => vec![],
        ReferenceCellType::Interval => vec![],
        ReferenceCellType::Quadrilateral => vec![vec![0, 1, 2, 3]],
        ReferenceCellType::Hexahedron => vec![
            vec![0, 1, 2, 3],
            vec![0, 1, 4, 5],
            vec![0, 2, 4, 6],
            vec![1, 3, 5, 7],
            vec![2, 3, 6, 7],
            vec![4, 5, 6, 7],
        ],
    }
}

/// The sub-entities of codimension one, given by their vertices
pub fn facets(cell: ReferenceCellType) -> Vec<Vec<usize>> {
    match cell {
        ReferenceCellType::Point => vec![],
        ReferenceCellType::Interval => vec![vec![0], vec![1]],
        ReferenceCellType::Quadrilateral => edges(cell),
        ReferenceCellType::Hexahedron => faces(cell),
    }
}

/// The cell type of the facets of the cell
pub fn facet_type(cell: ReferenceCellType) -> ReferenceCellType {
    match cell {
        ReferenceCellType::Point => ReferenceCellType::Point,
        ReferenceCellType::Interval => ReferenceCellType::Point,
        ReferenceCellType::Quadrilateral => ReferenceCellType::Interval,
        ReferenceCellType::Hexahedron => ReferenceCellType::Quadrilateral,
    }
}

/// The number of subentities of each dimension
pub fn entity_counts(cell: ReferenceCellType) -> Vec<usize> {
    match cell {
        ReferenceCellType::Point => vec![1, 0, 0, 0],
        ReferenceCellType::Interval => vec![2, 1, 0, 0],
        ReferenceCellType::Quadrilateral => vec![4, 4, 1, 0],
        ReferenceCellType::Hexahedron => vec![8, 12, 6, 1],
    }
}

/// The number of children created by one isotropic refinement
pub fn children_count(cell: ReferenceCellType) -> usize {
    1 << dim(cell)
}

/// The number of pieces a facet is split into when the neighbouring cell is refined once
pub fn subfacet_count(cell: ReferenceCellType) -> usize {
    children_count(facet_type(cell))
}

/// The number of new entities of each dimension on a facet after one isotropic refinement
///
/// A refined facet of dimension `k` is a grid of `2^k` pieces with three points in each
/// direction, so it has `C(k, j) 2^j 3^(k-j)` entities of dimension `j`. The vertices of
/// the coarse facet are not new and are not counted.
pub fn refined_facet_entity_counts(cell: ReferenceCellType) -> Vec<usize> {
    let k = dim(facet_type(cell));
    let coarse = entity_counts(facet_type(cell));
    (0..=k)
        .map(|j| {
            let count = binomial(k, j) * (1 << j) * 3usize.pow((k - j) as u32);
            if j == 0 {
                count - coarse[0]
            } else {
                count
            }
        })
        .collect()
}

/// The outward unit normals of the facets of the cell
pub fn facet_normals<T: RlstScalar<Real = T>>(cell: ReferenceCellType) -> Vec<Vec<T>> {
    let tdim = dim(cell);
    let verts = vertices::<T>(cell);
    facets(cell)
        .iter()
        .map(|facet| {
            let mut normal = vec![T::zero(); tdim];
            for (axis, n) in normal.iter_mut().enumerate() {
                if facet.iter().map(|v| verts[*v][axis]).all_equal() {
                    *n = if verts[facet[0]][axis] == T::zero() {
                        -T::one()
                    } else {
                        T::one()
                    };
                }
            }
            normal
        })
        .collect()
}

fn binomial(n: usize, k: usize) -> usize {
    (0..k).fold(1, |acc, i| acc * (n - i) / (i + 1))
}
