//! Route pattern compilation.
//!
//! A route pattern is a slash-delimited path whose components are either
//! literal text or typed placeholders:
//!
//! ```text
//! /blog/{{year year}}/{{month month}}/{{slug string}}{{ext ext}}
//! ```
//!
//! The final component may hold two placeholders back to back, in which case
//! the first binds the basename and the second the extension.

use crate::decl::{is_placeholder, parse_declaration, placeholder, END_VAR, START_VAR};
use crate::error::{CompileError, RegistryError, SegmentLocation};
use crate::registry::{TypeRegistry, Validator};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// One compiled path component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    /// A placeholder, holding the variable name.
    Var(String),
}

impl Segment {
    pub fn var_name(&self) -> Option<&str> {
        match self {
            Segment::Var(name) => Some(name),
            Segment::Literal(_) => None,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Literal(text) => f.write_str(text),
            Segment::Var(name) => f.write_str(&placeholder(name)),
        }
    }
}

/// Plain-data view of a compiled pattern, without the type registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternRecord {
    pub src: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dirs: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub base: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ext: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub var_to_types: BTreeMap<String, String>,
}

/// A compiled route pattern.
///
/// # Example
///
/// ```
/// use routedsl::RoutePattern;
///
/// let pattern = RoutePattern::compile("/users/{{id int}}/profile").unwrap();
/// let values = pattern.eval("/users/42/profile").into_values().unwrap();
/// assert_eq!(values["id"], "42");
/// assert!(!pattern.is_match("/users/abc/profile"));
/// ```
#[derive(Debug, Clone)]
pub struct RoutePattern {
    pub(crate) src: String,
    pub(crate) dirs: Vec<Segment>,
    pub(crate) base: Segment,
    pub(crate) ext: Option<Segment>,
    pub(crate) var_to_type: BTreeMap<String, String>,
    pub(crate) registry: Arc<TypeRegistry>,
}

/// Splits a path into its directory components and final component.
///
/// One leading and one trailing slash are dropped from the directory part
/// before splitting, so `/a/b/c` yields `(["a", "b"], "c")` and `/c` yields
/// `([""], "c")`.
pub(crate) fn split_path(src: &str) -> (Vec<&str>, &str) {
    let (dir, base) = match src.rfind('/') {
        Some(i) => src.split_at(i + 1),
        None => ("", src),
    };
    let dir = dir.strip_prefix('/').unwrap_or(dir);
    let dir = dir.strip_suffix('/').unwrap_or(dir);
    (dir.split('/').collect(), base)
}

/// Splits a final component holding two placeholders into basename and
/// extension parts at the first closing delimiter.
fn split_base_ext(base: &str) -> (&str, Option<&str>) {
    if base.matches(START_VAR).count() != 2 {
        return (base, None);
    }
    match base.find(END_VAR) {
        Some(i) => {
            let (b, e) = base.split_at(i + END_VAR.len());
            (b, Some(e).filter(|e| !e.is_empty()))
        }
        None => (base, None),
    }
}

impl RoutePattern {
    /// Compiles `src` against the built-in type registry.
    pub fn compile(src: &str) -> Result<Self, CompileError> {
        Self::with_registry(src, Arc::new(TypeRegistry::default()))
    }

    /// Compiles `src`, evaluating variables with `registry`.
    pub fn with_registry(src: &str, registry: Arc<TypeRegistry>) -> Result<Self, CompileError> {
        let (dir_parts, last) = split_path(src);
        let (base_part, ext_part) = split_base_ext(last);

        let mut var_to_type = BTreeMap::new();
        let mut dirs = Vec::with_capacity(dir_parts.len());
        for (i, part) in dir_parts.into_iter().enumerate() {
            let location = SegmentLocation::Directory(i);
            dirs.push(compile_segment(part, location, &mut var_to_type)?);
        }
        let base = compile_segment(base_part, SegmentLocation::Basename, &mut var_to_type)?;
        let ext = ext_part
            .map(|e| compile_segment(e, SegmentLocation::Extension, &mut var_to_type))
            .transpose()?;

        tracing::debug!(
            src,
            dirs = dirs.len(),
            has_ext = ext.is_some(),
            vars = ?var_to_type,
            "compiled route pattern"
        );

        Ok(Self {
            src: src.to_string(),
            dirs,
            base,
            ext,
            var_to_type,
            registry,
        })
    }

    /// Adds a type to this pattern's registry.
    ///
    /// If the registry is shared with other patterns it is copied first, so
    /// the new type is only visible to this pattern.
    pub fn register_type<V>(
        &mut self,
        name: impl Into<String>,
        validator: V,
    ) -> Result<(), RegistryError>
    where
        V: Validator + 'static,
    {
        Arc::make_mut(&mut self.registry).register(name, validator)
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn dirs(&self) -> &[Segment] {
        &self.dirs
    }

    pub fn base(&self) -> &Segment {
        &self.base
    }

    pub fn ext(&self) -> Option<&Segment> {
        self.ext.as_ref()
    }

    /// Declared type expression of each variable.
    pub fn var_to_type(&self) -> &BTreeMap<String, String> {
        &self.var_to_type
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// The pattern with each declaration reduced to `{{name}}`, ready for
    /// [`resolve`](crate::resolve).
    pub fn template(&self) -> String {
        let mut out = String::new();
        if self.src.starts_with('/') {
            out.push('/');
        }
        let no_dirs = matches!(self.dirs.as_slice(), [Segment::Literal(d)] if d.is_empty());
        if !no_dirs {
            for dir in &self.dirs {
                out.push_str(&dir.to_string());
                out.push('/');
            }
        }
        out.push_str(&self.base.to_string());
        if let Some(ext) = &self.ext {
            out.push_str(&ext.to_string());
        }
        out
    }

    pub fn to_record(&self) -> PatternRecord {
        PatternRecord {
            src: self.src.clone(),
            dirs: self.dirs.iter().map(Segment::to_string).collect(),
            base: self.base.to_string(),
            ext: self.ext.as_ref().map(Segment::to_string).unwrap_or_default(),
            var_to_types: self.var_to_type.clone(),
        }
    }
}

fn compile_segment(
    part: &str,
    location: SegmentLocation,
    var_to_type: &mut BTreeMap<String, String>,
) -> Result<Segment, CompileError> {
    if !is_placeholder(part) {
        return Ok(Segment::Literal(part.to_string()));
    }
    let (name, type_expr) = parse_declaration(part).map_err(|kind| CompileError {
        location,
        token: part.to_string(),
        kind,
    })?;
    var_to_type.insert(name.to_string(), type_expr.to_string());
    Ok(Segment::Var(name.to_string()))
}

impl FromStr for RoutePattern {
    type Err = CompileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::compile(s)
    }
}

impl Serialize for RoutePattern {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_record().serialize(serializer)
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string_pretty(&self.to_record()).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}
