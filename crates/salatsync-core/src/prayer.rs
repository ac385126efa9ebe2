//! Canonical prayer names.
//!
//! The two upstream providers use different vocabularies for the same five
//! daily prayers. This module maps the alternate labels onto one canonical
//! set; display labels are derived from the canonical name at event-build
//! time.

/// Maps a regional prayer label to its canonical name.
///
/// Callers are expected to lowercase the label before lookup. Unmapped names
/// pass through unchanged.
pub fn canonical_name(name: &str) -> &str {
    match name {
        "zuhr" => "dhuhr",
        "assr" => "asr",
        "ishaa" => "isha",
        other => other,
    }
}

/// Capitalizes a canonical prayer name for display ("fajr" -> "Fajr").
pub fn display_label(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
