use thiserror::Error;

/// Errors from constructing resource types out of caller input.
#[derive(Debug, Error)]
pub enum TypeError {
    /// The kind name is not one of the repairable kinds.
    #[error("unknown resource kind: {0}")]
    UnknownKind(String),

    /// A namespace was given for a cluster-scoped kind.
    #[error("{kind} is cluster-scoped and takes no namespace")]
    UnexpectedNamespace { kind: String },

    /// A namespaced kind was given without a namespace.
    #[error("{kind} is namespaced; a namespace is required")]
    MissingNamespace { kind: String },

    /// An empty resource name.
    #[error("resource name must not be empty")]
    EmptyName,
}

/// Result alias for type construction.
pub type TypeResult<T> = Result<T, TypeError>;
