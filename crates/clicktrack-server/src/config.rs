/// Re-export `Config` from `clicktrack-core` for use within this crate.
///
/// Environment-variable parsing lives in `clicktrack-core` so integration
/// tests can build a `Config` without depending on the binary.
pub use clicktrack_core::config::Config;
