//! Error types for operation lookup and source generation.

use sigkern_dtype::ElementType;
use snafu::Snafu;

use crate::OperationKind;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    /// The string does not name any operation.
    #[snafu(display("invalid operation name '{name}'"))]
    InvalidOperationName { name: String },

    /// The operation has no row in the operation table.
    #[snafu(display("support not found for '{op}'"))]
    UnsupportedOperation { op: OperationKind },

    /// The element type is not in the operation's support set.
    #[snafu(display("datatype {dtype} not found for '{op}'"))]
    UnsupportedDatatype { dtype: ElementType, op: OperationKind },
}
