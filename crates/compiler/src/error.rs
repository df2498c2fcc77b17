use filter_syntax::Path;
use model::OperatorKind;
use thiserror::Error;

/// A validated tree that could not be turned into a backend predicate.
///
/// These are server-side defects: the messages name fields and backend
/// details and are meant for logs, not for end users. Use
/// [`CompilationError::public_message`] for anything shown to a user.
#[derive(Error, Debug)]
pub enum CompilationError {
    #[error("backend cannot build '{field} {operator}' at {path}: {source}")]
    Backend {
        path: Path,
        field: String,
        operator: OperatorKind,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The tree breaks the invariants the parser guarantees, e.g. it was
    /// built by hand or against another schema.
    #[error("invalid filter tree at {path}: {reason}")]
    ContractViolation { path: Path, reason: String },
}

impl CompilationError {
    pub fn path(&self) -> &Path {
        match self {
            CompilationError::Backend { path, .. } => path,
            CompilationError::ContractViolation { path, .. } => path,
        }
    }

    pub fn is_contract_violation(&self) -> bool {
        matches!(self, CompilationError::ContractViolation { .. })
    }

    pub fn public_message(&self) -> &'static str {
        "The filter could not be applied."
    }
}
