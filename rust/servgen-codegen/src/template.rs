//! `$name$` templates and the variable maps they are rendered against.
//!
//! A template is literal text with variable references delimited by `$`.
//! There is no escape syntax. Rendering fails with
//! [`GenerateError::UnknownVariable`] if a referenced name is missing from
//! the map; nothing is produced in that case.

use std::collections::BTreeMap;
use std::str::FromStr;

use crate::GenerateError;

const DELIMITER: char = '$';

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Literal(String),
    Variable(String),
}

/// A parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    tokens: Vec<Token>,
}

impl Template {
    /// Parse `text`. Fails if a `$` opens a variable that is never closed.
    pub fn parse(text: &str) -> Result<Self, GenerateError> {
        let mut tokens = Vec::new();
        let mut pos = 0;

        while let Some(open) = text[pos..].find(DELIMITER).map(|i| pos + i) {
            if open > pos {
                tokens.push(Token::Literal(text[pos..open].to_string()));
            }
            let name_start = open + DELIMITER.len_utf8();
            let close = text[name_start..]
                .find(DELIMITER)
                .map(|i| name_start + i)
                .ok_or(GenerateError::UnterminatedVariable { offset: open })?;
            tokens.push(Token::Variable(text[name_start..close].to_string()));
            pos = close + DELIMITER.len_utf8();
        }
        if pos < text.len() {
            tokens.push(Token::Literal(text[pos..].to_string()));
        }

        Ok(Self { tokens })
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Names referenced by this template, in order of first appearance.
    pub fn variables(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for token in &self.tokens {
            if let Token::Variable(name) = token
                && !names.contains(&name.as_str())
            {
                names.push(name);
            }
        }
        names
    }

    /// Substitute every variable from `vars`.
    pub fn render(&self, vars: &Vars) -> Result<String, GenerateError> {
        let mut out = String::new();
        for token in &self.tokens {
            match token {
                Token::Literal(text) => out.push_str(text),
                Token::Variable(name) => {
                    let value = vars.get(name).ok_or_else(|| GenerateError::UnknownVariable {
                        name: name.clone(),
                    })?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }
}

impl FromStr for Template {
    type Err = GenerateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Variable map for template rendering. Setting a key twice keeps the last value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vars {
    values: BTreeMap<String, String>,
}

impl Vars {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}
