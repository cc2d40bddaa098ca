use std::fmt::{self, Write};

#[cfg(feature = "colorized_output")]
use console::style;

/// The validation passes, in the order [`validate_container`](super::validate_container) runs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValidationStep {
    /// ZIP layout, mimetype and required entries
    Structure,
    /// manifest.json contents
    Manifest,
    /// Arrow schemas, footers and row counts of the three tables
    Schema,
    /// Full import and value checks
    Data,
}

impl fmt::Display for ValidationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValidationStep::Structure => "Container structure",
            ValidationStep::Manifest => "Manifest",
            ValidationStep::Schema => "Table schemas",
            ValidationStep::Data => "Data sanity",
        })
    }
}

/// Outcome of one check. Warnings do not fail a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    /// Passed
    Ok,
    /// Passed, with a note
    Warning(String),
    /// Failed, with the reason
    Failed(String),
}

impl CheckStatus {
    /// Explanation attached to a warning or failure
    pub fn message(&self) -> Option<&str> {
        match self {
            CheckStatus::Ok => None,
            CheckStatus::Warning(msg) | CheckStatus::Failed(msg) => Some(msg),
        }
    }

    fn tone(&self) -> Tone {
        match self {
            CheckStatus::Ok => Tone::Ok,
            CheckStatus::Warning(_) => Tone::Warning,
            CheckStatus::Failed(_) => Tone::Failed,
        }
    }
}

/// One named check and the step that recorded it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationCheck {
    /// Check name, unique enough to look up with [`ValidationReport::check`]
    pub name: String,
    /// Outcome
    pub status: CheckStatus,
    /// Step that ran the check
    pub step: ValidationStep,
}

impl ValidationCheck {
    fn with_status(name: impl Into<String>, status: CheckStatus) -> Self {
        // Step is assigned by the report when the check is recorded
        Self {
            name: name.into(),
            status,
            step: ValidationStep::Structure,
        }
    }

    pub(crate) fn ok(name: impl Into<String>) -> Self {
        Self::with_status(name, CheckStatus::Ok)
    }

    pub(crate) fn warning(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with_status(name, CheckStatus::Warning(message.into()))
    }

    pub(crate) fn failed(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with_status(name, CheckStatus::Failed(message.into()))
    }
}

/// Check counts by outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    /// Checks that passed cleanly
    pub passed: usize,
    /// Checks that passed with a warning
    pub warnings: usize,
    /// Checks that failed
    pub failed: usize,
}

/// Everything `validate_container` found out about one `.scmat` file.
#[derive(Debug)]
pub struct ValidationReport {
    /// Container path as given
    pub file_path: String,
    step: ValidationStep,
    checks: Vec<ValidationCheck>,
}

impl ValidationReport {
    /// Empty report for the container at `file_path`
    pub fn new(file_path: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            step: ValidationStep::Structure,
            checks: Vec::new(),
        }
    }

    /// Checks recorded from now on belong to `step`.
    pub(crate) fn enter(&mut self, step: ValidationStep) {
        self.step = step;
    }

    /// Record a check under the current step
    pub fn add_check(&mut self, mut check: ValidationCheck) {
        check.step = self.step;
        self.checks.push(check);
    }

    /// All checks in the order they ran
    pub fn checks(&self) -> &[ValidationCheck] {
        &self.checks
    }

    /// First check with this exact name
    pub fn check(&self, name: &str) -> Option<&ValidationCheck> {
        self.checks.iter().find(|c| c.name == name)
    }

    /// Failed checks only
    pub fn failures(&self) -> impl Iterator<Item = &ValidationCheck> {
        self.checks
            .iter()
            .filter(|c| matches!(c.status, CheckStatus::Failed(_)))
    }

    /// Count checks by outcome
    pub fn tally(&self) -> Tally {
        let mut tally = Tally::default();
        for check in &self.checks {
            match check.status {
                CheckStatus::Ok => tally.passed += 1,
                CheckStatus::Warning(_) => tally.warnings += 1,
                CheckStatus::Failed(_) => tally.failed += 1,
            }
        }
        tally
    }

    /// True if any check failed
    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }

    /// True if any check warned
    pub fn has_warnings(&self) -> bool {
        self.warning_count() > 0
    }

    /// Number of warnings
    pub fn warning_count(&self) -> usize {
        self.tally().warnings
    }

    /// Number of failures
    pub fn failure_count(&self) -> usize {
        self.tally().failed
    }

    fn verdict(&self) -> (&'static str, Tone) {
        if self.has_failures() {
            ("Validation FAILED", Tone::Failed)
        } else if self.has_warnings() {
            ("Validation PASSED with warnings", Tone::Warning)
        } else {
            ("Validation PASSED", Tone::Ok)
        }
    }

    /// Terminal rendering; plain text without the `colorized_output` feature.
    pub fn format_colored(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = self.render(&mut out, paint);
        out
    }

    /// Lists checks grouped under their step, then the tally and verdict.
    fn render<W: Write>(&self, out: &mut W, paint: fn(Tone, &str) -> String) -> fmt::Result {
        writeln!(out, "{}", paint(Tone::Title, "scconvert Validation Report"))?;
        writeln!(out, "File: {}", self.file_path)?;

        let mut current = None;
        for check in &self.checks {
            if current != Some(check.step) {
                current = Some(check.step);
                writeln!(out)?;
                writeln!(out, "{}", paint(Tone::Title, &check.step.to_string()))?;
            }
            let tone = check.status.tone();
            write!(out, "  [{}] {}", paint(tone, tone.symbol()), check.name)?;
            match &check.status {
                CheckStatus::Ok => writeln!(out)?,
                CheckStatus::Warning(msg) => writeln!(out, " - {}: {}", paint(tone, "WARNING"), msg)?,
                CheckStatus::Failed(msg) => writeln!(out, " - {}: {}", paint(tone, "FAILED"), msg)?,
            }
        }

        let tally = self.tally();
        writeln!(out)?;
        writeln!(
            out,
            "Summary: {} passed, {} warnings, {} failed",
            tally.passed, tally.warnings, tally.failed
        )?;
        let (verdict, tone) = self.verdict();
        writeln!(out, "{}", paint(tone, verdict))
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, |_, text| text.to_string())
    }
}

#[derive(Debug, Clone, Copy)]
enum Tone {
    Title,
    Ok,
    Warning,
    Failed,
}

impl Tone {
    fn symbol(self) -> &'static str {
        match self {
            Tone::Title | Tone::Ok => "✓",
            Tone::Warning => "⚠",
            Tone::Failed => "✗",
        }
    }
}

#[cfg(feature = "colorized_output")]
fn paint(tone: Tone, text: &str) -> String {
    match tone {
        Tone::Title => style(text).bold().cyan().to_string(),
        Tone::Ok => style(text).green().to_string(),
        Tone::Warning => style(text).yellow().bold().to_string(),
        Tone::Failed => style(text).red().bold().to_string(),
    }
}

#[cfg(not(feature = "colorized_output"))]
fn paint(_: Tone, text: &str) -> String {
    text.to_string()
}
