//! General type definitions

use rlst::{Array, BaseArray, VectorContainer};

/// Dense two-dimensional array
pub type Array2<T> = Array<T, BaseArray<T, VectorContainer<T>, 2>, 2>;
/// Dense three-dimensional array
pub type Array3<T> = Array<T, BaseArray<T, VectorContainer<T>, 3>, 3>;
/// Dense four-dimensional array
pub type Array4<T> = Array<T, BaseArray<T, VectorContainer<T>, 4>, 4>;

/// A dense matrix, used for transfer and constraint operators
pub type Matrix<T> = Array2<T>;

/// The type of a tensor-product reference cell
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[repr(u8)]
pub enum ReferenceCellType {
    /// A point
    Point = 0,
    /// The unit interval
    Interval = 1,
    /// The unit square
    Quadrilateral = 2,
    /// The unit cube
    Hexahedron = 3,
}

/// Errors raised when the contract of an element is violated
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FeError {
    /// An operation that a concrete element must provide was called on an element that does not
    #[error("Pure function called: {0} is not provided by this element")]
    PureFunctionCalled(&'static str),
    /// An operation that is not available for this dimension or configuration
    #[error("Not implemented: {0}")]
    NotImplemented(&'static str),
    /// A dimension-specific operation was used with the wrong dimension
    #[error("Dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// The dimension the operation is defined for
        expected: usize,
        /// The dimension that was supplied
        found: usize,
    },
    /// An input or output buffer has the wrong shape
    #[error("Wrong field dimension for {field}: found shape {found:?}, expected {expected:?}")]
    WrongFieldDimension {
        /// The name of the offending buffer
        field: &'static str,
        /// The shape of the buffer
        found: Vec<usize>,
        /// The shape the buffer should have
        expected: Vec<usize>,
    },
    /// An index outside of its valid range
    #[error("Index {index} is not in the range [{start}, {end})")]
    IndexRange {
        /// The offending index
        index: usize,
        /// First valid index
        start: usize,
        /// One past the last valid index
        end: usize,
    },
    /// The interface constraint matrix of a one-dimensional element is not 1x1
    #[error("Wrong interface matrix size: {rows}x{cols}")]
    WrongInterfaceMatrixSize {
        /// Number of rows
        rows: usize,
        /// Number of columns
        cols: usize,
    },
    /// A component table is not a bijection between local dofs and component indices
    #[error("Invalid component table: {0}")]
    InvalidComponentTable(String),
}

/// Result type
pub type FeResult<T> = std::result::Result<T, FeError>;

/// Check that `index` lies in `[0, end)`
pub(crate) fn check_index(index: usize, end: usize) -> FeResult<()> {
    if index < end {
        Ok(())
    } else {
        Err(FeError::IndexRange {
            index,
            start: 0,
            end,
        })
    }
}

/// Check that a buffer has the expected shape
pub(crate) fn check_shape<const N: usize>(
    field: &'static str,
    found: [usize; N],
    expected: [usize; N],
) -> FeResult<()> {
    if found == expected {
        Ok(())
    } else {
        Err(FeError::WrongFieldDimension {
            field,
            found: found.to_vec(),
            expected: expected.to_vec(),
        })
    }
}
