use thiserror::Error;

use crate::js::marshal::InvalidArgument;

/// Everything that can go wrong at the scripting boundary.
///
/// All of these surface synchronously to the caller before any native call is
/// made. Failure of the native dialog itself is not modeled; once arguments
/// validate, the native collaborator is assumed to resolve every request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DialogError {
    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgument),

    /// The window argument does not resolve to a live, initialized native
    /// window.
    #[error("invalid window")]
    InvalidWindow,

    /// The dialog object was not created through the construction protocol,
    /// or its bridge handle no longer refers to a registered bridge.
    #[error("the FileDialog object is corrupted")]
    BadConstructionCall,

    /// A selection request is already awaiting completion on this bridge.
    #[error("a file selection is already pending on this dialog")]
    Busy,
}
