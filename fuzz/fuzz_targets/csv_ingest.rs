#![no_main]

use libfuzzer_sys::fuzz_target;
use perfcmp::dataset::Dataset;
use perfcmp::grouping::group;
use perfcmp::ingest::{CsvRecordParser, RecordParser};
use perfcmp::metrics::compute_metrics;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must decode to records or a ParseError, never panic
    let parser = CsvRecordParser::default();
    if let Ok(records) = parser.parse(data) {
        // Anything the parser accepts must also pass dataset validation
        let dataset = Dataset::from_records(records).expect("parser accepted invalid duration");
        let _ = group(&dataset);
        let _ = compute_metrics(&dataset);
    }
});
