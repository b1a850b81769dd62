//! Compile-time build information.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// One-line version string for `--version`.
pub fn version_string() -> String {
    let mut version = format!(
        "piano-tiles {} ({} {})",
        env!("CARGO_PKG_VERSION"),
        BUILD_DATE,
        BUILD_COMMIT
    );
    if BUILD_PROFILE != "release" {
        version.push_str(&format!(" [{}]", BUILD_PROFILE));
    }
    version
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_commit_format() {
        // 7-char short hash, or "unknown" outside a git checkout
        assert!(BUILD_COMMIT == "unknown" || BUILD_COMMIT.len() == 7);
    }

    #[test]
    fn test_build_date_format() {
        assert!(BUILD_DATE.len() == 10 || BUILD_DATE == "unknown");
    }

    #[test]
    fn test_version_string_mentions_commit() {
        let version = version_string();
        assert!(version.starts_with("piano-tiles "));
        assert!(version.contains(BUILD_COMMIT));
    }

    #[test]
    fn test_non_release_builds_are_tagged() {
        let tagged = version_string().ends_with(']');
        assert_eq!(tagged, BUILD_PROFILE != "release");
    }
}
