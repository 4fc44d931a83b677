//! Quoting for text interpolated into a shell command line
//!
//! Every user-supplied string that ends up inside the double-quoted
//! `-Command "..."` argument goes through [`escape_double_quotes`]. This is
//! the single interpolation point for the command-text invocation shape; it
//! is a minimal mitigation for quoting breakage, not a sandbox.

/// Escape double quotes so the text survives embedding in a double-quoted
/// shell argument. The shell strips the backslashes on the way in, so the
/// interpreter receives the original text.
pub fn escape_double_quotes(input: &str) -> String {
    input.replace('"', "\\\"")
}
