/*!
# Saving diagnostics to CSV

Enable via the `csv` feature. [`CsvReport`] can be handed to the sampler directly, or
records collected in a `Vec<Diagnostic>` can be written afterwards with [`save_csv`].

The file has a header row `it,x,mean,nacpt` and one row per diagnostic record. Chain
values are written with full precision so a run can be compared bit for bit.

```rust
use toy_metro::io::save_csv;
use toy_metro::report::Diagnostic;

let records = vec![Diagnostic { iteration: 100, x: 0.5, mean: 0.6, nacpt: 93 }];
save_csv(&records, "/tmp/toy_metro.csv")?;
# Ok::<(), toy_metro::error::SamplerError>(())
```
*/

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::Writer;

use crate::error::Result;
use crate::report::{Diagnostic, Report, RunSummary};

const HEADER: [&str; 4] = ["it", "x", "mean", "nacpt"];

/// A [`Report`] that writes each diagnostic as a CSV row.
pub struct CsvReport<W: Write> {
    wtr: Writer<W>,
}

impl CsvReport<File> {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self {
            wtr: Writer::from_path(path)?,
        })
    }
}

impl<W: Write> CsvReport<W> {
    pub fn new(out: W) -> Self {
        Self {
            wtr: Writer::from_writer(out),
        }
    }
}

impl<W: Write> Report for CsvReport<W> {
    fn header(&mut self) -> Result<()> {
        self.wtr.write_record(HEADER)?;
        Ok(())
    }

    fn record(&mut self, diagnostic: &Diagnostic) -> Result<()> {
        self.wtr.write_record([
            diagnostic.iteration.to_string(),
            diagnostic.x.to_string(),
            diagnostic.mean.to_string(),
            diagnostic.nacpt.to_string(),
        ])?;
        Ok(())
    }

    fn summary(&mut self, _summary: &RunSummary) -> Result<()> {
        self.wtr.flush()?;
        Ok(())
    }
}

/// Writes `records` to a CSV file at `filename`, header included.
pub fn save_csv<P: AsRef<Path>>(records: &[Diagnostic], filename: P) -> Result<()> {
    let mut report = CsvReport::from_path(filename)?;
    report.header()?;
    for record in records {
        report.record(record)?;
    }
    report.wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RunConfig;
    use crate::metropolis::MetropolisSampler;
    use crate::rng::Drand48;
    use tempfile::NamedTempFile;

    #[test]
    fn csv_round_trips_records() {
        let config = RunConfig::default().set_iterations(500);
        let mut sampler = MetropolisSampler::with_rng(config, Drand48::new(42)).unwrap();
        let mut records: Vec<Diagnostic> = Vec::new();
        sampler.run(&mut records).unwrap();

        let file = NamedTempFile::new().unwrap();
        save_csv(&records, file.path()).unwrap();

        let mut rdr = csv::Reader::from_path(file.path()).unwrap();
        assert_eq!(rdr.headers().unwrap(), &csv::StringRecord::from(HEADER.to_vec()));
        let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), records.len());
        for (row, record) in rows.iter().zip(&records) {
            assert_eq!(row[0].parse::<usize>().unwrap(), record.iteration);
            assert_eq!(row[1].parse::<f64>().unwrap(), record.x);
            assert_eq!(row[2].parse::<f64>().unwrap(), record.mean);
            assert_eq!(row[3].parse::<usize>().unwrap(), record.nacpt);
        }
    }

    #[test]
    fn csv_report_as_sampler_sink() {
        let config = RunConfig::default().set_iterations(300);
        let mut sampler = MetropolisSampler::with_rng(config, Drand48::new(1)).unwrap();
        let mut report = CsvReport::new(Vec::new());
        sampler.run(&mut report).unwrap();

        let text = String::from_utf8(report.wtr.get_ref().clone()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "it,x,mean,nacpt");
        assert!(lines[3].starts_with("300,"));
    }
}
