//! Shared test fixtures: a fake PowerShell interpreter built on /bin/sh
//!
//! The shim accepts the same `-Command <text>` / `-File <path> [args…]`
//! surface as the real interpreter, so tool and runner tests exercise the
//! full build → escape → spawn → classify path without PowerShell installed.

use crate::config::ShellConfig;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use tempfile::TempDir;

/// Evaluates `-Command` text with sh and runs `-File` scripts with sh
pub(crate) const INTERPRETER_SHIM: &str = r#"#!/bin/sh
mode="$1"
shift
case "$mode" in
  -Command) eval "$1" ;;
  -File) script="$1"; shift; sh "$script" "$@" ;;
  *) echo "unsupported flag: $mode" >&2; exit 64 ;;
esac
"#;

/// Accepts anything, prints nothing, exits 0
pub(crate) const SILENT_SHIM: &str = "#!/bin/sh\nexit 0\n";

/// Write the shim to a temp dir and point a [`ShellConfig`] at it.
/// The returned [`TempDir`] must outlive the config's use.
pub(crate) fn fake_interpreter(body: &str) -> (TempDir, ShellConfig) {
    let dir = tempfile::tempdir().expect("create tempdir");
    let path = dir.path().join("pwsh");
    fs::write(&path, body).expect("write interpreter shim");

    let mut perms = fs::metadata(&path).expect("stat shim").permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).expect("chmod shim");

    let config = ShellConfig::with_program(path.to_string_lossy().into_owned());
    (dir, config)
}
