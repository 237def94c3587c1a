//! Privileged-option gate.
//!
//! Privilege is a sentinel-file presence check: hosts where an operator has
//! created the configured file may use the privileged judge options
//! (`--rule`, `--bin`, `--as`). There is no token or signing scheme.

use crate::config;
use std::path::Path;

/// Returns true when the privilege sentinel file exists.
pub fn privileged() -> bool {
    Path::new(&config::privilege_file()).exists()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use serial_test::serial;

    #[test]
    #[serial]
    fn absent_sentinel_means_unprivileged() {
        AppConfig::set_privilege_file("/definitely/not/a/real/file");
        assert!(!privileged());
        AppConfig::reset();
    }

    #[test]
    #[serial]
    fn present_sentinel_grants_privilege() {
        let file = tempfile::NamedTempFile::new().expect("tempfile");
        AppConfig::set_privilege_file(file.path().to_string_lossy().to_string());
        assert!(privileged());
        AppConfig::reset();
    }
}
