//! Grading results and their console rendering.

use std::fmt;

/// The result of one test case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The output contained the expected substring.
    Passed,
    /// The output did not contain the expected substring.
    Failed,
    /// The handler could not produce a result (load, fault, or contract).
    Errored(String),
}

/// One graded test case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseReport {
    /// Input given to the handler.
    pub input: String,
    /// Handler output, empty if the handler errored.
    pub output: String,
    /// Substring the output had to contain.
    pub expected: String,
    /// Outcome of the case.
    pub verdict: Verdict,
}

impl CaseReport {
    /// Whether this case passed.
    pub const fn passed(&self) -> bool {
        matches!(self.verdict, Verdict::Passed)
    }
}

impl fmt::Display for CaseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "INPUT: {}", self.input)?;
        match &self.verdict {
            Verdict::Errored(e) => writeln!(f, "ERROR: {e}")?,
            Verdict::Passed | Verdict::Failed => writeln!(f, "OUTPUT: {}", self.output)?,
        }
        let mark = if self.passed() { "OK" } else { "FAIL" };
        writeln!(f, "EXPECTS: '{}' -> {mark}", self.expected)
    }
}

/// All graded cases of one level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelReport {
    /// Level title (or fixture file name).
    pub title: String,
    /// Per-case results, in fixture order.
    pub cases: Vec<CaseReport>,
}

impl LevelReport {
    /// A level passes iff every case passes.
    pub fn passed(&self) -> bool {
        self.cases.iter().all(CaseReport::passed)
    }
}

impl fmt::Display for LevelReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== {} ==", self.title)?;
        for case in &self.cases {
            writeln!(f, "{case}")?;
        }
        f.write_str(if self.passed() { "LEVEL PASSED" } else { "LEVEL FAILED" })
    }
}

/// Aggregate over a grading run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Levels that passed.
    pub passed: usize,
    /// Levels attempted, including ones whose fixture failed to load.
    pub total: usize,
}

impl Summary {
    /// Count one level.
    pub const fn record(&mut self, passed: bool) {
        self.total = self.total.saturating_add(1);
        if passed {
            self.passed = self.passed.saturating_add(1);
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} levels passed", self.passed, self.total)
    }
}
