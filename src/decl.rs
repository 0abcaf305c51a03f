//! Placeholder declaration parser.
//!
//! A declaration is the raw text of one placeholder, `{{name type expression}}`.
//! Everything after the first whitespace run is the type expression, kept
//! verbatim so it can be looked up in a [`TypeRegistry`](crate::TypeRegistry).

use crate::error::DeclError;
use winnow::prelude::*;
use winnow::token::{rest, take_till, take_while};

pub const START_VAR: &str = "{{";
pub const END_VAR: &str = "}}";

/// True if `token` is wrapped in the placeholder delimiters.
pub fn is_placeholder(token: &str) -> bool {
    token.len() >= START_VAR.len() + END_VAR.len()
        && token.starts_with(START_VAR)
        && token.ends_with(END_VAR)
}

/// Renders the stored form of a variable, `{{name}}`.
pub fn placeholder(name: &str) -> String {
    format!("{}{}{}", START_VAR, name, END_VAR)
}

/// Parses a placeholder into `(name, type_expression)`.
pub fn parse_declaration(token: &str) -> Result<(&str, &str), DeclError> {
    if !is_placeholder(token) {
        return Err(DeclError::MissingDelimiters);
    }
    let body = token[START_VAR.len()..token.len() - END_VAR.len()].trim();
    if body.is_empty() {
        return Err(DeclError::EmptyPlaceholder);
    }

    let mut input = body;
    let Ok((name, type_expr)) = declaration.parse_next(&mut input) else {
        return Err(DeclError::MissingTypeExpression);
    };
    if name.is_empty() {
        return Err(DeclError::MissingVariableName);
    }
    if type_expr.is_empty() {
        return Err(DeclError::MissingTypeExpression);
    }
    Ok((name, type_expr))
}

fn var_name<'a>(input: &mut &'a str) -> PResult<&'a str> {
    take_till(0.., char::is_whitespace).parse_next(input)
}

fn separator(input: &mut &str) -> PResult<()> {
    take_while(1.., char::is_whitespace).void().parse_next(input)
}

fn declaration<'a>(input: &mut &'a str) -> PResult<(&'a str, &'a str)> {
    let name = var_name.parse_next(input)?;
    separator.parse_next(input)?;
    let type_expr = rest.parse_next(input)?;
    Ok((name, type_expr))
}
