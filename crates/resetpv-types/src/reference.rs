use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{TypeError, TypeResult};
use crate::kind::ResourceKind;

/// One concrete repair target: a kind plus the name (and namespace, for
/// namespaced kinds) identifying a single stored object.
///
/// Constructed once per invocation from caller input and immutable after
/// that. Name and namespace are passed through to the storage key verbatim;
/// the caller guarantees they are store-safe strings, matching how the
/// control plane itself builds keys.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRef {
    kind: ResourceKind,
    namespace: Option<String>,
    name: String,
}

impl ResourceRef {
    /// A cluster-scoped target. Fails if `kind` is namespaced.
    pub fn cluster_scoped(kind: ResourceKind, name: impl Into<String>) -> TypeResult<Self> {
        if kind.is_namespaced() {
            return Err(TypeError::MissingNamespace {
                kind: kind.kind_name().to_string(),
            });
        }
        Self::validated(kind, None, name.into())
    }

    /// A namespaced target. Fails if `kind` is cluster-scoped.
    pub fn namespaced(
        kind: ResourceKind,
        namespace: impl Into<String>,
        name: impl Into<String>,
    ) -> TypeResult<Self> {
        if !kind.is_namespaced() {
            return Err(TypeError::UnexpectedNamespace {
                kind: kind.kind_name().to_string(),
            });
        }
        Self::validated(kind, Some(namespace.into()), name.into())
    }

    fn validated(kind: ResourceKind, namespace: Option<String>, name: String) -> TypeResult<Self> {
        if name.is_empty() {
            return Err(TypeError::EmptyName);
        }
        if namespace.as_deref() == Some("") {
            return Err(TypeError::MissingNamespace {
                kind: kind.kind_name().to_string(),
            });
        }
        Ok(Self {
            kind,
            namespace,
            name,
        })
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{} {}/{}", self.kind, ns, self.name),
            None => write!(f, "{} {}", self.kind, self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cluster_scoped_volume() {
        let r = ResourceRef::cluster_scoped(ResourceKind::PersistentVolume, "pv-1").unwrap();
        assert_eq!(r.name(), "pv-1");
        assert!(r.namespace().is_none());
    }

    #[test]
    fn namespaced_claim() {
        let r =
            ResourceRef::namespaced(ResourceKind::PersistentVolumeClaim, "ns-a", "claim-1").unwrap();
        assert_eq!(r.namespace(), Some("ns-a"));
    }

    #[test]
    fn claim_requires_namespace() {
        let err = ResourceRef::cluster_scoped(ResourceKind::PersistentVolumeClaim, "c").unwrap_err();
        assert!(matches!(err, TypeError::MissingNamespace { .. }));
    }

    #[test]
    fn volume_rejects_namespace() {
        let err =
            ResourceRef::namespaced(ResourceKind::PersistentVolume, "ns-a", "pv-1").unwrap_err();
        assert!(matches!(err, TypeError::UnexpectedNamespace { .. }));
    }

    #[test]
    fn empty_name_rejected() {
        let err = ResourceRef::cluster_scoped(ResourceKind::PersistentVolume, "").unwrap_err();
        assert!(matches!(err, TypeError::EmptyName));
    }

    #[test]
    fn empty_namespace_rejected() {
        let err =
            ResourceRef::namespaced(ResourceKind::PersistentVolumeClaim, "", "c").unwrap_err();
        assert!(matches!(err, TypeError::MissingNamespace { .. }));
    }

    #[test]
    fn display_forms() {
        let pv = ResourceRef::cluster_scoped(ResourceKind::PersistentVolume, "pv-1").unwrap();
        assert_eq!(pv.to_string(), "PersistentVolume pv-1");
        let pvc =
            ResourceRef::namespaced(ResourceKind::PersistentVolumeClaim, "ns-a", "claim-1").unwrap();
        assert_eq!(pvc.to_string(), "PersistentVolumeClaim ns-a/claim-1");
    }
}
