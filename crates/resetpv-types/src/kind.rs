use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// The closed set of resource kinds resetpv knows how to repair.
///
/// Each variant carries its storage attributes as a table lookup rather
/// than string branching, so adding a kind is one new variant plus one
/// arm in each accessor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    PersistentVolume,
    PersistentVolumeClaim,
}

impl ResourceKind {
    /// The kind name as it appears in the storage envelope's type metadata.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::PersistentVolume => "PersistentVolume",
            Self::PersistentVolumeClaim => "PersistentVolumeClaim",
        }
    }

    /// The plural path segment the control plane uses under the key prefix.
    pub fn plural(&self) -> &'static str {
        match self {
            Self::PersistentVolume => "persistentvolumes",
            Self::PersistentVolumeClaim => "persistentvolumeclaims",
        }
    }

    /// The apiVersion stored alongside the kind. Both repairable kinds
    /// live in the core group.
    pub fn api_version(&self) -> &'static str {
        match self {
            Self::PersistentVolume => "v1",
            Self::PersistentVolumeClaim => "v1",
        }
    }

    /// Whether objects of this kind live under a namespace segment.
    pub fn is_namespaced(&self) -> bool {
        match self {
            Self::PersistentVolume => false,
            Self::PersistentVolumeClaim => true,
        }
    }

    /// All repairable kinds.
    pub fn all() -> &'static [ResourceKind] {
        &[Self::PersistentVolume, Self::PersistentVolumeClaim]
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind_name())
    }
}

impl FromStr for ResourceKind {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PersistentVolume" | "persistentvolume" | "pv" => Ok(Self::PersistentVolume),
            "PersistentVolumeClaim" | "persistentvolumeclaim" | "pvc" => {
                Ok(Self::PersistentVolumeClaim)
            }
            other => Err(TypeError::UnknownKind(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plural_segments() {
        assert_eq!(ResourceKind::PersistentVolume.plural(), "persistentvolumes");
        assert_eq!(
            ResourceKind::PersistentVolumeClaim.plural(),
            "persistentvolumeclaims"
        );
    }

    #[test]
    fn scoping() {
        assert!(!ResourceKind::PersistentVolume.is_namespaced());
        assert!(ResourceKind::PersistentVolumeClaim.is_namespaced());
    }

    #[test]
    fn parse_aliases() {
        assert_eq!(
            "pv".parse::<ResourceKind>().unwrap(),
            ResourceKind::PersistentVolume
        );
        assert_eq!(
            "PersistentVolumeClaim".parse::<ResourceKind>().unwrap(),
            ResourceKind::PersistentVolumeClaim
        );
    }

    #[test]
    fn parse_unknown_kind() {
        let err = "ConfigMap".parse::<ResourceKind>().unwrap_err();
        assert!(matches!(err, TypeError::UnknownKind(_)));
    }

    #[test]
    fn display_is_kind_name() {
        assert_eq!(
            ResourceKind::PersistentVolume.to_string(),
            "PersistentVolume"
        );
    }

    #[test]
    fn all_kinds_listed() {
        assert_eq!(ResourceKind::all().len(), 2);
    }
}
