//! Built-in validators, installed by
//! [`TypeRegistry::with_builtins`](crate::TypeRegistry::with_builtins).

use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

pub type BuiltinFn = fn(&str, &str) -> Option<String>;

pub const BUILTINS: &[(&str, BuiltinFn)] = &[
    ("string", string),
    ("int", int),
    ("real", real),
    ("bool", boolean),
    ("year", year),
    ("month", month),
    ("day", day),
    ("date", date),
    ("ext", ext),
];

static INTEGER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[+-]?[0-9]+$").unwrap());

static YEAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{4}$").unwrap());

static DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").unwrap());

fn string(_: &str, candidate: &str) -> Option<String> {
    (!candidate.is_empty()).then(|| candidate.to_string())
}

fn int(_: &str, candidate: &str) -> Option<String> {
    if !INTEGER.is_match(candidate) {
        return None;
    }
    candidate.parse::<i64>().ok().map(|_| candidate.to_string())
}

fn real(_: &str, candidate: &str) -> Option<String> {
    // f64 parsing also takes "inf" and "NaN"
    let n: f64 = candidate.parse().ok()?;
    n.is_finite().then(|| candidate.to_string())
}

fn boolean(_: &str, candidate: &str) -> Option<String> {
    let lower = candidate.to_ascii_lowercase();
    matches!(lower.as_str(), "true" | "false").then_some(lower)
}

fn year(_: &str, candidate: &str) -> Option<String> {
    YEAR.is_match(candidate).then(|| candidate.to_string())
}

fn bounded(candidate: &str, max: u32) -> Option<String> {
    let digits = candidate.bytes().all(|b| b.is_ascii_digit());
    if candidate.is_empty() || candidate.len() > 2 || !digits {
        return None;
    }
    let n: u32 = candidate.parse().ok()?;
    (1..=max).contains(&n).then(|| format!("{:02}", n))
}

fn month(_: &str, candidate: &str) -> Option<String> {
    bounded(candidate, 12)
}

fn day(_: &str, candidate: &str) -> Option<String> {
    bounded(candidate, 31)
}

fn date(_: &str, candidate: &str) -> Option<String> {
    if !DATE.is_match(candidate) {
        return None;
    }
    NaiveDate::parse_from_str(candidate, "%Y-%m-%d")
        .ok()
        .map(|_| candidate.to_string())
}

fn ext(_: &str, candidate: &str) -> Option<String> {
    let rest = candidate.strip_prefix('.')?;
    (!rest.is_empty() && !rest.contains('.')).then(|| candidate.to_string())
}
