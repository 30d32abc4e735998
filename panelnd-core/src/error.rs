use crate::dtypes::DType;
use crate::index::Label;

/// Represents a number of different errors that can occur from declaring container
/// types, ingesting data, or running operations on containers.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An axis configuration record is inconsistent.
    #[error("invalid configuration for {klass}: {reason}")]
    InvalidConfig { klass: String, reason: String },

    /// A label appears twice where labels must be unique.
    #[error("duplicate label {0}")]
    DuplicateLabel(Label),

    /// An axis name, alias or position that the container does not have.
    #[error("no axis named {0}")]
    UnknownAxis(String),

    /// A label that is not present in the axis it was looked up in.
    #[error("label {label} not found in axis {axis}")]
    KeyNotFound { axis: String, label: Label },

    /// Input has the wrong number of dimensions for the container.
    #[error("expected {expected} dimensions, found {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// An explicit index does not match the length of the data along its axis.
    #[error("length of {axis} index is {actual}, data has {expected} along that axis")]
    AxisLengthMismatch {
        axis: String,
        expected: usize,
        actual: usize,
    },

    /// Not enough elements were provided when creating an array.
    #[error("shape {shape:?} needs {expected} elements, found {actual}")]
    WrongNumElements {
        shape: Vec<usize>,
        expected: usize,
        actual: usize,
    },

    /// A position past the end of an axis.
    #[error("position {index} is out of bounds for an axis of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Scalar data was given without an index for this axis.
    #[error("an index for axis {0} is required")]
    MissingAxis(String),

    /// A cell had to be filled but the dtype cannot represent a missing value.
    #[error("dtype {0} cannot hold missing values")]
    MissingValue(DType),

    /// An element could not be converted to the requested dtype.
    #[error("cannot convert {value} from {from} to {to}")]
    DtypeCoercion { from: DType, to: DType, value: String },

    /// Integer division by zero.
    #[error("division by zero in {0} arithmetic")]
    ZeroDivision(DType),

    /// An integer result did not fit in its dtype.
    #[error("integer overflow in {0} arithmetic")]
    Overflow(DType),

    /// The container has no lower-dimensional slicer type.
    #[error("{0} has no slicer type")]
    NoSlicer(String),

    /// Two containers of different types were combined.
    #[error("cannot combine {left} with {right}")]
    ConfigMismatch { left: String, right: String },

    /// Print options could not be parsed.
    #[error("invalid print options: {0}")]
    Json(#[from] serde_json::Error),
}
