//! Type Name Rendering
//!
//! `std::any::type_name` spells out full module paths. Test names read better
//! with just the last segment: `Vec<f32>` rather than `alloc::vec::Vec<f32>`.

use regex::Regex;
use std::sync::OnceLock;

/// Short, human-readable name of `T`
pub fn type_name_of<T: ?Sized>() -> String {
    render_type_name(std::any::type_name::<T>())
}

/// Strip module paths from every path segment of a rendered type
pub fn render_type_name(raw: &str) -> String {
    static PATH_RE: OnceLock<Option<Regex>> = OnceLock::new();
    let re = PATH_RE.get_or_init(|| Regex::new(r"\b(?:[A-Za-z_][A-Za-z0-9_]*::)+").ok());
    match re {
        Some(re) => re.replace_all(raw, "").into_owned(),
        None => raw.to_string(),
    }
}
