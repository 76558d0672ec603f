//! Identifier sanitizing and naming-convention joins.

use heck::{ToSnakeCase, ToUpperCamelCase};

use crate::GenerateError;

/// Map a filename to a token usable inside an include-guard macro.
///
/// ASCII letters and digits are uppercased, `_` is kept, and every other
/// byte becomes `_` followed by its two-digit lowercase hex value, so
/// `"foo.h"` becomes `"FOO_2eH"`. Distinct filenames can in principle map to
/// the same token (`"a b"` and `"a_20b"` both give `"A_20B"`).
pub fn file_name_identifier(filename: &str) -> String {
    let mut result = String::with_capacity(filename.len());
    for b in filename.bytes() {
        if b.is_ascii_alphanumeric() {
            result.push(b.to_ascii_uppercase() as char);
        } else if b == b'_' {
            result.push('_');
        } else {
            result.push_str(&format!("_{b:02x}"));
        }
    }
    result
}

/// How compound identifiers are spelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamingConvention {
    /// `GreeterClient`, `SafeSayHello`
    UpperCamel,
    /// `greeter_client`, `safe_say_hello`
    Snake,
}

impl NamingConvention {
    /// Guess the convention from a name: any uppercase letter means camel case.
    pub fn infer(name: &str) -> Self {
        if name.chars().any(char::is_uppercase) {
            Self::UpperCamel
        } else {
            Self::Snake
        }
    }

    /// Join `base` and `suffix`, reshaping both words into this convention.
    pub fn join(self, base: &str, suffix: &str) -> Result<String, GenerateError> {
        if base.is_empty() && suffix.is_empty() {
            return Err(GenerateError::EmptyToken);
        }
        Ok(match self {
            Self::UpperCamel => format!("{base} {suffix}").to_upper_camel_case(),
            Self::Snake => format!("{base} {suffix}").to_snake_case(),
        })
    }
}

/// Join `base` and `suffix` in the convention `base` appears to use.
///
/// If `base` contains an uppercase letter, the first letter of each part is
/// uppercased and the parts are concatenated (`"Greeter"` + `"client"` →
/// `"GreeterClient"`). Otherwise both are lowercased and joined with `_`
/// (`"greeter_client"`).
pub fn proper_postfix_token(base: &str, suffix: &str) -> Result<String, GenerateError> {
    if base.is_empty() && suffix.is_empty() {
        return Err(GenerateError::EmptyToken);
    }

    match NamingConvention::infer(base) {
        NamingConvention::UpperCamel => Ok(format!(
            "{}{}",
            capitalize_first(base),
            capitalize_first(suffix)
        )),
        NamingConvention::Snake => Ok(format!(
            "{}_{}",
            base.to_lowercase(),
            suffix.to_lowercase()
        )),
    }
}

/// Join with an explicit convention when one is configured, otherwise infer
/// it from `base`.
pub fn postfix_token(
    base: &str,
    suffix: &str,
    convention: Option<NamingConvention>,
) -> Result<String, GenerateError> {
    match convention {
        Some(convention) => convention.join(base, suffix),
        None => proper_postfix_token(base, suffix),
    }
}

/// Name of the admission-limited variant of `method`.
///
/// Without an explicit convention only the prefix adapts: a method starting
/// with a lowercase letter gets `safe_`, anything else gets `Safe`. The
/// method name itself is kept verbatim.
pub fn safe_method_name(method: &str, convention: Option<NamingConvention>) -> String {
    match convention {
        Some(NamingConvention::UpperCamel) => format!("safe {method}").to_upper_camel_case(),
        Some(NamingConvention::Snake) => format!("safe {method}").to_snake_case(),
        None if method.starts_with(|c: char| c.is_ascii_lowercase()) => format!("safe_{method}"),
        None => format!("Safe{method}"),
    }
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
