//! Type aliases for commonly used callback types.
//!
//! The scheduler and its host exchange closures at two seams: the one-shot
//! pause acknowledgment and the fire-and-forget status channel. Aliases keep
//! those signatures readable and consistent across crates.

/// A one-shot callback invoked when a requested pause takes effect (after
/// any in-flight command has completed).
pub type PauseCallback = Box<dyn FnOnce() + Send>;

/// A fire-and-forget status text consumer.
pub type StatusCallback = Box<dyn FnMut(&str) + Send>;
