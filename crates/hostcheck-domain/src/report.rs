use hostcheck_types::{CheckRecord, CheckStatus};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub passed: u32,
    pub failed: u32,
    pub skipped: u32,
}

impl StatusCounts {
    pub fn from_records(records: &[CheckRecord]) -> Self {
        let mut counts = StatusCounts::default();
        for r in records {
            match r.status {
                CheckStatus::Pass => counts.passed += 1,
                CheckStatus::Fail => counts.failed += 1,
                CheckStatus::Skip => counts.skipped += 1,
            }
        }
        counts
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

/// Results of evaluating one host to completion.
#[derive(Clone, Debug)]
pub struct SessionReport {
    /// One record per expectation, in declaration order.
    pub results: Vec<CheckRecord>,
    pub counts: StatusCounts,
}
