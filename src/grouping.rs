//! Grouping of timed operation records into per-subject summaries

use crate::dataset::Dataset;
use crate::record::SubjectSummary;
use std::collections::HashMap;

/// Group records by subject, folding phase timings into one summary each
///
/// Takes a [`Dataset`], so every duration is already known to be finite and
/// non-negative. Records are visited in input order. The phase is chosen by marker priority
/// (Load, Run, Save) and the matching field is overwritten, so the last record
/// for a subject+phase wins. Records without a phase marker still create their
/// subject's row. Output keeps first-seen subject order.
///
/// # Example
/// ```
/// use perfcmp::dataset::Dataset;
/// use perfcmp::grouping::group;
/// use perfcmp::record::TimedOperationRecord;
///
/// let dataset = Dataset::from_records(vec![
///     TimedOperationRecord::new("Home_Load", 1.0),
///     TimedOperationRecord::new("Home_Run", 2.0),
///     TimedOperationRecord::new("Cart_Save", 0.5),
/// ])
/// .unwrap();
/// let summaries = group(&dataset);
/// assert_eq!(summaries.len(), 2);
/// assert_eq!(summaries[0].subject_id, "Home");
/// assert_eq!(summaries[0].run_time, 2.0);
/// ```
pub fn group(dataset: &Dataset) -> Vec<SubjectSummary> {
    let records = dataset.records();
    let mut summaries: Vec<SubjectSummary> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for record in records {
        let subject = record.subject_id();
        let slot = *index.entry(subject).or_insert_with(|| {
            summaries.push(SubjectSummary::new(subject));
            summaries.len() - 1
        });

        if let Some(phase) = record.phase() {
            summaries[slot].set_time(phase, record.elapsed_seconds);
        }
    }

    tracing::debug!(
        records = records.len(),
        subjects = summaries.len(),
        "grouped records by subject"
    );

    summaries
}
