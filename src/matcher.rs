//! Matching concrete paths against a compiled [`RoutePattern`].

use crate::pattern::{split_path, RoutePattern, Segment};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
    Match(HashMap<String, String>),
    NoMatch,
}

impl MatchResult {
    pub fn is_match(&self) -> bool {
        matches!(self, MatchResult::Match(_))
    }

    pub fn values(&self) -> Option<&HashMap<String, String>> {
        match self {
            MatchResult::Match(values) => Some(values),
            MatchResult::NoMatch => None,
        }
    }

    pub fn into_values(self) -> Option<HashMap<String, String>> {
        match self {
            MatchResult::Match(values) => Some(values),
            MatchResult::NoMatch => None,
        }
    }
}

/// Why a single segment failed. Only surfaced through tracing; callers see
/// [`MatchResult::NoMatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Miss {
    Literal,
    UndeclaredVariable,
    UnknownType,
    Rejected,
}

impl fmt::Display for Miss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Miss::Literal => "literal mismatch",
            Miss::UndeclaredVariable => "undeclared variable",
            Miss::UnknownType => "unregistered type",
            Miss::Rejected => "rejected by validator",
        };
        f.write_str(reason)
    }
}

type Binding<'p> = Option<(&'p str, String)>;

/// Splits a final path component at its last dot, keeping the dot with the
/// extension: `hello.html` -> (`hello`, `.html`).
fn split_ext(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(i) => name.split_at(i),
        None => (name, ""),
    }
}

impl RoutePattern {
    /// Evaluates `path` against the pattern.
    ///
    /// Directory components must match one to one. The basename decides the
    /// outcome. When the pattern declares an extension, a failing extension
    /// is ignored and only a matching one contributes its variable.
    pub fn eval(&self, path: &str) -> MatchResult {
        let (dirs, last) = split_path(path);
        let (base, ext) = if self.ext.is_some() {
            split_ext(last)
        } else {
            (last, "")
        };

        if dirs.len() != self.dirs.len() {
            tracing::debug!(
                path,
                expected = self.dirs.len(),
                got = dirs.len(),
                "no match: directory depth"
            );
            return MatchResult::NoMatch;
        }

        let mut values = HashMap::new();
        for (i, (segment, candidate)) in self.dirs.iter().zip(&dirs).enumerate() {
            match self.eval_segment(segment, candidate) {
                Ok(binding) => bind(&mut values, binding),
                Err(miss) => {
                    tracing::debug!(path, dir = i, candidate, %miss, "no match");
                    return MatchResult::NoMatch;
                }
            }
        }

        if let Some(segment) = &self.ext {
            match self.eval_segment(segment, ext) {
                Ok(binding) => bind(&mut values, binding),
                Err(miss) => tracing::trace!(path, candidate = ext, %miss, "extension ignored"),
            }
        }

        match self.eval_segment(&self.base, base) {
            Ok(binding) => {
                bind(&mut values, binding);
                tracing::debug!(path, ?values, "matched");
                MatchResult::Match(values)
            }
            Err(miss) => {
                tracing::debug!(path, candidate = base, %miss, "no match: basename");
                MatchResult::NoMatch
            }
        }
    }

    pub fn is_match(&self, path: &str) -> bool {
        self.eval(path).is_match()
    }

    fn eval_segment<'p>(
        &'p self,
        segment: &'p Segment,
        candidate: &str,
    ) -> Result<Binding<'p>, Miss> {
        let name = match segment {
            Segment::Literal(text) => {
                return if text == candidate {
                    Ok(None)
                } else {
                    Err(Miss::Literal)
                };
            }
            Segment::Var(name) => name.as_str(),
        };
        let type_expr = self
            .var_to_type
            .get(name)
            .ok_or(Miss::UndeclaredVariable)?;
        let validator = self.registry.get(type_expr).ok_or(Miss::UnknownType)?;
        let value = validator
            .validate(type_expr, candidate)
            .ok_or(Miss::Rejected)?;
        tracing::trace!(name, %type_expr, candidate, %value, "bound variable");
        Ok(Some((name, value)))
    }
}

fn bind(values: &mut HashMap<String, String>, binding: Binding<'_>) {
    if let Some((name, value)) = binding {
        values.insert(name.to_string(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::TypeRegistry;
    use std::sync::Arc;

    fn compile(src: &str) -> RoutePattern {
        RoutePattern::compile(src).unwrap()
    }

    fn values(result: MatchResult) -> HashMap<String, String> {
        result.into_values().expect("expected a match")
    }

    #[test]
    fn test_split_ext() {
        assert_eq!(split_ext("hello.html"), ("hello", ".html"));
        assert_eq!(split_ext("archive.tar.gz"), ("archive.tar", ".gz"));
        assert_eq!(split_ext("README"), ("README", ""));
        assert_eq!(split_ext(".profile"), ("", ".profile"));
    }

    #[test]
    fn test_literal_pattern_matches_identical_path() {
        let p = compile("/about/team/index.html");
        assert_eq!(values(p.eval("/about/team/index.html")), HashMap::new());
        assert!(!p.is_match("/about/team/index.htm"));
        assert!(!p.is_match("/About/team/index.html"));
        assert!(!p.is_match("/about/teams/index.html"));
    }

    #[test]
    fn test_typed_directory_variable() {
        let p = compile("/users/{{id int}}/profile");
        let v = values(p.eval("/users/42/profile"));
        assert_eq!(v.len(), 1);
        assert_eq!(v["id"], "42");
        assert_eq!(p.eval("/users/abc/profile"), MatchResult::NoMatch);
    }

    #[test]
    fn test_directory_arity_is_exact() {
        let p = compile("/a/{{id int}}");
        assert!(!p.is_match("/a/b/c"));
        assert!(!p.is_match("/a/1/2"));
        assert!(p.is_match("/a/7"));
    }

    #[test]
    fn test_shallower_path_fails() {
        let p = compile("/a/b/{{id int}}");
        assert!(!p.is_match("/a/1"));
    }

    #[test]
    fn test_basename_and_extension() {
        let p = compile("/posts/{{slug string}}{{ext string}}");
        let v = values(p.eval("/posts/hello.html"));
        assert_eq!(v["slug"], "hello");
        assert_eq!(v["ext"], ".html");
    }

    #[test]
    fn test_extension_failure_is_tolerated() {
        let p = compile("/posts/{{slug string}}{{ext ext}}");
        let v = values(p.eval("/posts/hello"));
        assert_eq!(v["slug"], "hello");
        assert!(!v.contains_key("ext"));
    }

    #[test]
    fn test_unregistered_extension_type_is_tolerated() {
        let p = compile("/posts/{{slug string}}{{ext nosuchtype}}");
        let v = values(p.eval("/posts/hello.html"));
        assert_eq!(v.len(), 1);
        assert_eq!(v["slug"], "hello");
    }

    #[test]
    fn test_without_extension_dots_stay_in_basename() {
        let p = compile("/files/{{name string}}");
        assert_eq!(values(p.eval("/files/report.pdf"))["name"], "report.pdf");
    }

    #[test]
    fn test_basename_failure_fails_match() {
        let p = compile("/posts/{{id int}}{{ext ext}}");
        assert!(!p.is_match("/posts/hello.html"));
        assert_eq!(values(p.eval("/posts/12.html"))["id"], "12");
    }

    #[test]
    fn test_unknown_type_fails() {
        let p = compile("/items/{{id uuid}}");
        assert!(!p.is_match("/items/abc"));
    }

    #[test]
    fn test_type_lookup_uses_full_expression() {
        let p = compile("/items/{{id int 32}}");
        assert!(!p.is_match("/items/12"));
    }

    #[test]
    fn test_validator_receives_type_expression() {
        let mut registry = TypeRegistry::new();
        registry
            .register("len 3", |expr: &str, c: &str| {
                let n: usize = expr.strip_prefix("len ")?.parse().ok()?;
                (c.chars().count() == n).then(|| c.to_string())
            })
            .unwrap();
        let p = RoutePattern::with_registry("/code/{{c len 3}}", Arc::new(registry)).unwrap();
        assert_eq!(values(p.eval("/code/abc"))["c"], "abc");
        assert!(!p.is_match("/code/abcd"));
    }

    #[test]
    fn test_extracted_value_comes_from_validator() {
        let p = compile("/archive/{{year year}}/{{month month}}/{{day day}}");
        let v = values(p.eval("/archive/2024/3/7"));
        assert_eq!(v["year"], "2024");
        assert_eq!(v["month"], "03");
        assert_eq!(v["day"], "07");
    }

    #[test]
    fn test_root_level_pattern() {
        let p = compile("/{{page string}}");
        assert_eq!(values(p.eval("/home"))["page"], "home");
        assert!(!p.is_match("/a/home"));
    }

    #[test]
    fn test_repeated_name_last_write_wins() {
        let p = compile("/{{v string}}/{{v string}}");
        assert_eq!(values(p.eval("/first/second"))["v"], "second");
    }

    #[test]
    fn test_injected_registry() {
        let mut registry = TypeRegistry::new();
        registry
            .register("upper", |_: &str, c: &str| Some(c.to_uppercase()))
            .unwrap();
        let p = RoutePattern::with_registry("/{{name upper}}", registry.into_shared()).unwrap();
        assert_eq!(values(p.eval("/abc"))["name"], "ABC");

        // built-ins are not implied
        let q = RoutePattern::with_registry("/{{n int}}", Arc::new(TypeRegistry::new())).unwrap();
        assert!(!q.is_match("/1"));
    }

    #[test]
    fn test_pattern_shared_across_threads() {
        let p = Arc::new(compile("/users/{{id int}}"));
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let p = Arc::clone(&p);
                std::thread::spawn(move || p.eval(&format!("/users/{}", i)))
            })
            .collect();
        for (i, handle) in handles.into_iter().enumerate() {
            let v = values(handle.join().unwrap());
            assert_eq!(v["id"], i.to_string());
        }
    }
}
