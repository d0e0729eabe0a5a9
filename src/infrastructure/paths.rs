//! Host paths as seen from the Zellij plugin sandbox.
//!
//! The sandbox mounts the host directory Zellij was started from (normally the
//! user's home) at `/host`.

use std::path::PathBuf;

/// Directory for plugin-owned files: `/host/.local/share/zellij/userdeck`.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("userdeck")
}

/// Rewrites a leading `~` to the sandbox's `/host` mount.
///
/// ```
/// use userdeck::infrastructure::paths::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/dark.toml"), "/host/themes/dark.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("~bob/x"), "~bob/x");
/// assert_eq!(expand_tilde("/etc/theme.toml"), "/etc/theme.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    match path.strip_prefix('~') {
        Some("") => "/host".to_string(),
        Some(rest) if rest.starts_with('/') => format!("/host{rest}"),
        _ => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dir_is_under_host_share() {
        assert_eq!(get_data_dir(), PathBuf::from("/host/.local/share/zellij/userdeck"));
    }
}
