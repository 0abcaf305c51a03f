use crate::matcher::MatchResult;
use crate::pattern::RoutePattern;
use std::collections::BTreeMap;
use std::io::Write;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

pub struct Output {
    stdout: StandardStream,
}

impl Output {
    pub fn new(color: bool) -> Self {
        let color_choice = if color {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        Self {
            stdout: StandardStream::stdout(color_choice),
        }
    }

    fn set_color(&mut self, color: Color) {
        let _ = self.stdout.set_color(ColorSpec::new().set_fg(Some(color)));
    }

    fn set_bold(&mut self) {
        let _ = self.stdout.set_color(ColorSpec::new().set_bold(true));
    }

    fn set_dim(&mut self) {
        let _ = self.stdout.set_color(ColorSpec::new().set_dimmed(true));
    }

    fn reset(&mut self) {
        let _ = self.stdout.reset();
    }

    pub fn print_pattern(&mut self, pattern: &RoutePattern) -> std::io::Result<()> {
        writeln!(self.stdout, "{}", pattern)
    }

    /// One line per path: a mark, the path, then the extracted values sorted
    /// by name. A resolved template goes on the following line.
    pub fn print_result(
        &mut self,
        path: &str,
        result: &MatchResult,
        resolved: Option<&str>,
    ) -> std::io::Result<()> {
        let Some(values) = result.values() else {
            self.set_color(Color::Red);
            write!(self.stdout, "✗")?;
            self.reset();
            return writeln!(self.stdout, " {}", path);
        };

        self.set_color(Color::Green);
        write!(self.stdout, "✓")?;
        self.reset();
        write!(self.stdout, " {}", path)?;

        let sorted: BTreeMap<_, _> = values.iter().collect();
        for (name, value) in sorted {
            self.set_dim();
            write!(self.stdout, " {}=", name)?;
            self.reset();
            write!(self.stdout, "{}", value)?;
        }
        writeln!(self.stdout)?;

        if let Some(resolved) = resolved {
            self.set_dim();
            write!(self.stdout, "  ->")?;
            self.reset();
            writeln!(self.stdout, " {}", resolved)?;
        }
        Ok(())
    }

    pub fn print_json_result(
        &mut self,
        path: &str,
        result: &MatchResult,
        resolved: Option<&str>,
    ) -> std::io::Result<()> {
        let values: BTreeMap<_, _> = result.values().into_iter().flatten().collect();
        let mut record = serde_json::json!({
            "path": path,
            "matched": result.is_match(),
            "values": values,
        });
        if let Some(resolved) = resolved {
            record["resolved"] = serde_json::Value::from(resolved);
        }
        writeln!(self.stdout, "{}", record)
    }

    pub fn print_summary(&mut self, matched: usize, total: usize) -> std::io::Result<()> {
        writeln!(self.stdout)?;
        if matched == total {
            self.set_color(Color::Green);
            self.set_bold();
            write!(self.stdout, "All {} paths matched", total)?;
        } else {
            self.set_bold();
            write!(self.stdout, "Summary:")?;
            self.reset();
            write!(self.stdout, " {} matched, {} did not", matched, total - matched)?;
        }
        self.reset();
        writeln!(self.stdout)
    }
}
