//! CSV export of grouped summaries and the paired-test table
//!
//! Seconds are written unrounded so spreadsheets can do their own math.

use crate::comparison::PairedTest;
use crate::record::SubjectSummary;
use anyhow::Result;

const SUMMARY_HEADER: [&str; 4] = ["subject", "load_seconds", "run_seconds", "save_seconds"];
const PAIRED_HEADER: [&str; 5] = [
    "name",
    "phase",
    "baseline_seconds",
    "candidate_seconds",
    "delta_seconds",
];

/// Write a header and rows through `csv::Writer`, quoting as needed
fn write_table<I>(header: &[&str], rows: I) -> Result<String>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    wtr.write_record(header)?;
    for row in rows {
        wtr.write_record(&row)?;
    }

    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

/// CSV formatter for per-subject Load/Run/Save summaries
#[derive(Debug, Default)]
pub struct CsvSummaryOutput {
    summaries: Vec<SubjectSummary>,
}

impl CsvSummaryOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a summary row
    pub fn add_summary(&mut self, summary: SubjectSummary) {
        self.summaries.push(summary);
    }

    /// Generate CSV output as string
    pub fn to_csv(&self) -> Result<String> {
        write_table(
            &SUMMARY_HEADER,
            self.summaries.iter().map(|summary| {
                vec![
                    summary.subject_id.clone(),
                    summary.load_time.to_string(),
                    summary.run_time.to_string(),
                    summary.save_time.to_string(),
                ]
            }),
        )
    }
}

impl FromIterator<SubjectSummary> for CsvSummaryOutput {
    fn from_iter<I: IntoIterator<Item = SubjectSummary>>(iter: I) -> Self {
        Self {
            summaries: iter.into_iter().collect(),
        }
    }
}

/// CSV formatter for the paired-test table of a comparison
#[derive(Debug, Default)]
pub struct CsvPairedOutput {
    tests: Vec<PairedTest>,
}

impl CsvPairedOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a paired test row
    pub fn add_test(&mut self, test: PairedTest) {
        self.tests.push(test);
    }

    /// Generate CSV output as string
    pub fn to_csv(&self) -> Result<String> {
        write_table(
            &PAIRED_HEADER,
            self.tests.iter().map(|test| {
                vec![
                    test.name.clone(),
                    test.phase.to_string(),
                    test.time_a.to_string(),
                    test.time_b.to_string(),
                    test.delta.to_string(),
                ]
            }),
        )
    }
}

impl FromIterator<PairedTest> for CsvPairedOutput {
    fn from_iter<I: IntoIterator<Item = PairedTest>>(iter: I) -> Self {
        Self {
            tests: iter.into_iter().collect(),
        }
    }
}
