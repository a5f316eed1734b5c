//! Output file naming.

use std::path::{Path, PathBuf};

/// Name used when the title has no visible characters.
pub const DEFAULT_STEM: &str = "paper";

/// Longest file stem, in characters.
pub const MAX_STEM_CHARS: usize = 80;

/// Turn a slide title into a file stem.
///
/// Letters, digits, spaces, `_` and `-` are kept, everything else becomes `_`.
/// The result is cut to [`MAX_STEM_CHARS`] characters.
pub fn sanitize_title(title: &str) -> String {
    let source = if title.trim().is_empty() {
        DEFAULT_STEM
    } else {
        title
    };

    source
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, ' ' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .take(MAX_STEM_CHARS)
        .collect()
}

/// `<outdir>/<sanitized title>.pptx`
pub fn output_path(outdir: &Path, title: &str) -> PathBuf {
    outdir.join(format!("{}.pptx", sanitize_title(title)))
}
