//! Name → slug normalization shared by page file names and CSS identifiers.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Lower-case ASCII slug: diacritics stripped, every run of other
/// characters collapsed into one `-`, no leading or trailing `-`.
///
/// ```
/// assert_eq!(sitecraft_compiler::slugify("  Crème Brûlée!! "), "creme-brulee");
/// ```
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for c in name.nfd().filter(|c| !is_combining_mark(*c)) {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}
