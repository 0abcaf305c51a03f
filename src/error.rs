use std::fmt;
use thiserror::Error;

/// Why a single `{{name type}}` placeholder could not be parsed.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclError {
    #[error("missing opening or closing curly brace delimiters")]
    MissingDelimiters,
    #[error("missing variable name and type expression")]
    EmptyPlaceholder,
    #[error("missing variable name")]
    MissingVariableName,
    #[error("missing type expression")]
    MissingTypeExpression,
}

/// Which part of a route pattern a compile error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentLocation {
    Directory(usize),
    Basename,
    Extension,
}

impl fmt::Display for SegmentLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentLocation::Directory(i) => write!(f, "{}", i),
            SegmentLocation::Basename => write!(f, "basename"),
            SegmentLocation::Extension => write!(f, "extension"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("({location}) {token:?} -> {kind}")]
pub struct CompileError {
    pub location: SegmentLocation,
    pub token: String,
    pub kind: DeclError,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("type {0:?} previously registered")]
    AlreadyRegistered(String),
}
