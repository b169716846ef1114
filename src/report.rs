/*!
Periodic diagnostics emitted while the sampler runs.

Every `report_interval` iterations the sampler hands a [`Diagnostic`] to a [`Report`].
[`TextReport`] writes the fixed-width table of the classic toy program:

```text
     it          x       mean      nacpt
    100   0.503800   0.609908         93
    200   0.802669   0.710240        187

Mean should converge to 2/3, density to 2*p
```

A `Vec<Diagnostic>` is also a [`Report`]; it just keeps the records. A pair of reports
forwards to both.
*/

use std::fmt;
use std::io::Write;

use crate::error::Result;

/// Closing line printed after the last record.
pub const SUMMARY_LINE: &str = "Mean should converge to 2/3, density to 2*p";

/// One row of the diagnostic table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Diagnostic {
    /// 1-based iteration index.
    pub iteration: usize,
    /// Chain value after the iteration.
    pub x: f64,
    /// Running mean of the chain values so far.
    pub mean: f64,
    /// Accepted proposals so far.
    pub nacpt: usize,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:7} {:10.6} {:10.6} {:10}",
            self.iteration, self.x, self.mean, self.nacpt
        )
    }
}

/// What a completed run produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub iterations: usize,
    pub final_state: f64,
    pub mean: f64,
    pub nacpt: usize,
    /// Mean of the target density, for comparison with `mean`.
    pub theoretical_mean: f64,
}

impl RunSummary {
    pub fn acceptance_rate(&self) -> f64 {
        self.nacpt as f64 / self.iterations as f64
    }
}

/// A sink for diagnostics.
pub trait Report {
    /// Called once before the first iteration.
    fn header(&mut self) -> Result<()> {
        Ok(())
    }

    fn record(&mut self, diagnostic: &Diagnostic) -> Result<()>;

    /// Called once after the last iteration.
    fn summary(&mut self, _summary: &RunSummary) -> Result<()> {
        Ok(())
    }
}

impl Report for Vec<Diagnostic> {
    fn record(&mut self, diagnostic: &Diagnostic) -> Result<()> {
        self.push(*diagnostic);
        Ok(())
    }
}

/// Sends everything to both reports, first then second.
impl<A: Report, B: Report> Report for (A, B) {
    fn header(&mut self) -> Result<()> {
        self.0.header()?;
        self.1.header()
    }

    fn record(&mut self, diagnostic: &Diagnostic) -> Result<()> {
        self.0.record(diagnostic)?;
        self.1.record(diagnostic)
    }

    fn summary(&mut self, summary: &RunSummary) -> Result<()> {
        self.0.summary(summary)?;
        self.1.summary(summary)
    }
}

/// Writes the fixed-width text table.
#[derive(Debug)]
pub struct TextReport<W: Write> {
    out: W,
}

impl<W: Write> TextReport<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Report for TextReport<W> {
    fn header(&mut self) -> Result<()> {
        writeln!(
            self.out,
            "{:>7} {:>10} {:>10} {:>10}",
            "it", "x", "mean", "nacpt"
        )?;
        Ok(())
    }

    fn record(&mut self, diagnostic: &Diagnostic) -> Result<()> {
        writeln!(self.out, "{diagnostic}")?;
        Ok(())
    }

    fn summary(&mut self, _summary: &RunSummary) -> Result<()> {
        writeln!(self.out, "\n{SUMMARY_LINE}")?;
        self.out.flush()?;
        Ok(())
    }
}
