//! Build metadata embedded by `build.rs`.

pub const BUILD_COMMIT: &str = env!("ASCEND_BUILD_COMMIT");
pub const BUILD_DATE: &str = env!("ASCEND_BUILD_DATE");

/// `"<commit> (<date>)"`, as printed by `simulate --version`.
pub fn version_line() -> String {
    format!("{} ({})", BUILD_COMMIT, BUILD_DATE)
}
