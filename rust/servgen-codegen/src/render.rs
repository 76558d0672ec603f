use std::fmt::Display;

/// `<id> == crc32("<name>")`, documenting where an upstream id came from.
pub fn crc_note(id: impl Display, name: &str) -> String {
    format!("{id} == crc32(\"{name}\")")
}

/// `SERVGEN_<token>_INCLUDED`
pub fn guard_macro(filename_identifier: &str) -> String {
    format!("SERVGEN_{filename_identifier}_INCLUDED")
}
