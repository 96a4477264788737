//! Process-wide tracing setup shared by the storefront binaries.

/// Initialize process-wide tracing.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(tracing::DEFAULT_FILTER);
}

/// Subscriber configuration (filter, JSON layer).
pub mod tracing;
