//! Coarse-grained authorization trait.

/// Answers whether the current actor may perform a named action.
///
/// Actions are resource-type scoped (`generic#sharing/create`), never
/// resource-instance scoped. Instance-level checks are derived from the
/// share list itself.
pub trait Authorizer: Send + Sync + std::fmt::Debug + 'static {
    /// Whether the action is granted.
    fn has_auth(&self, action: &str) -> bool;
}
