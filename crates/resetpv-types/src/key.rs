use crate::reference::ResourceRef;

/// Build the etcd key the control plane's storage layer uses for `target`.
///
/// Two fixed shapes, matching kube-apiserver's own layout:
///
/// - cluster-scoped: `/<prefix>/<plural>/<name>`
/// - namespaced:     `/<prefix>/<plural>/<namespace>/<name>`
///
/// Plain interpolation, no escaping. The prefix may be given with or
/// without a leading slash; the produced key always starts with exactly one.
pub fn storage_key(prefix: &str, target: &ResourceRef) -> String {
    let prefix = prefix.trim_start_matches('/');
    match target.namespace() {
        Some(ns) => format!(
            "/{}/{}/{}/{}",
            prefix,
            target.kind().plural(),
            ns,
            target.name()
        ),
        None => format!("/{}/{}/{}", prefix, target.kind().plural(), target.name()),
    }
}
