//! # Path Joining
//!
//! Canonical concatenation of URL path segments. Every route and instance URL in
//! this crate is produced by [`canonical_join`], so the shape rules live in one
//! place:
//!
//! - exactly one `/` between segments,
//! - empty segments (and empty pieces inside a segment, like `a//b`) are dropped,
//! - the result starts with `/` and never ends with one unless it is the root.
//!
//! ```rust
//! use resource_routes::path::canonical_join;
//!
//! assert_eq!(canonical_join(["/api/", "/resource"]), "/api/resource");
//! assert_eq!(canonical_join(["", "user", "<id>"]), "/user/<id>");
//! assert_eq!(canonical_join::<[&str; 0], &str>([]), "/");
//! ```

/// The path separator.
pub const SEPARATOR: char = '/';

/// Joins path segments into a canonical absolute path.
pub fn canonical_join<I, S>(segments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for segment in segments {
        for piece in segment.as_ref().split(SEPARATOR).filter(|p| !p.is_empty()) {
            out.push(SEPARATOR);
            out.push_str(piece);
        }
    }
    if out.is_empty() {
        out.push(SEPARATOR);
    }
    out
}

/// Iterates the non-empty pieces of a path.
pub(crate) fn pieces(path: &str) -> impl Iterator<Item = &str> {
    path.split(SEPARATOR).filter(|p| !p.is_empty())
}

/// Formats a primary key as a route placeholder (`id` -> `<id>`).
pub fn placeholder(key: &str) -> String {
    format!("<{key}>")
}

/// Returns the key name if `piece` is a `<name>` placeholder.
pub fn placeholder_name(piece: &str) -> Option<&str> {
    piece
        .strip_prefix('<')
        .and_then(|rest| rest.strip_suffix('>'))
        .filter(|name| !name.is_empty())
}
