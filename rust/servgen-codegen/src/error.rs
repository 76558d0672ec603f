use std::fmt;

/// Everything that can stop generation of a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    /// A naming-convention join was asked to combine two empty tokens.
    EmptyToken,
    /// A template referenced a variable the variable map does not define.
    UnknownVariable { name: String },
    /// A template opened a `$` variable reference that never closes.
    UnterminatedVariable { offset: usize },
    /// The destination writer failed.
    Fmt(fmt::Error),
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyToken => write!(f, "can't compute postfix token from two empty tokens"),
            Self::UnknownVariable { name } => write!(f, "template variable `{name}` is not defined"),
            Self::UnterminatedVariable { offset } => {
                write!(f, "unterminated template variable starting at byte {offset}")
            }
            Self::Fmt(e) => write!(f, "write failed: {e}"),
        }
    }
}

impl std::error::Error for GenerateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Fmt(e) => Some(e),
            _ => None,
        }
    }
}

impl From<fmt::Error> for GenerateError {
    fn from(e: fmt::Error) -> Self {
        Self::Fmt(e)
    }
}
