//! Common test utilities and helpers
//!
//! Integration tests avoid needing a Go toolchain by pointing `--nm` at
//! `cat`, which prints a fixture file of recorded `go tool nm -size` output.

use std::io::Write;
use tempfile::NamedTempFile;

/// Recorded nm output covering every folding rule plus an undefined symbol
#[allow(dead_code)]
pub const NM_OUTPUT: &str = "\
 1001640         96 T _x_cgo_callers
 16b9450         16 R crypto.statictmp_0
 100000           0 U somefunc
 113b3e0        208 T crypto/cipher.xorBytes
 103cc90         32 T runtime.gcd
 135ff60         64 T vendor/golang.org/x/net/ipv4.parseTTL
";

/// Write `contents` to a temp file that lives as long as the handle
#[allow(dead_code)]
pub fn nm_fixture(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create fixture");
    file.write_all(contents.as_bytes())
        .expect("Failed to write fixture");
    file.flush().expect("Failed to flush fixture");
    file
}
