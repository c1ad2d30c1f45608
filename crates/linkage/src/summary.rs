use crate::model::{LinkageSummary, LongRow, SlotSummary, WideRow};

/// Compute summary statistics for a finished run.
pub fn compute_summary(
    paper_rows: usize,
    registry_rows: usize,
    wide: &[WideRow],
    long: &[LongRow],
    t1: SlotSummary,
    t2: SlotSummary,
    duplicate_registry_keys: usize,
) -> LinkageSummary {
    LinkageSummary {
        paper_rows,
        registry_rows,
        wide_rows: wide.len(),
        long_rows: long.len(),
        t1,
        t2,
        duplicate_registry_keys,
    }
}

impl LinkageSummary {
    /// Rows added to the wide table by duplicate registry keys.
    pub fn fan_out_rows(&self) -> usize {
        self.wide_rows.saturating_sub(self.paper_rows)
    }

    /// One-line human summary.
    pub fn describe(&self) -> String {
        let mut line = format!(
            "{} pair(s) → {} wide / {} long row(s); T1 {} matched, {} unmatched; T2 {} matched, {} unmatched",
            self.paper_rows,
            self.wide_rows,
            self.long_rows,
            self.t1.matched,
            self.t1.unmatched,
            self.t2.matched,
            self.t2.unmatched,
        );
        if self.duplicate_registry_keys > 0 {
            line.push_str(&format!(
                "; {} duplicate registry key(s) added {} row(s)",
                self.duplicate_registry_keys,
                self.fan_out_rows()
            ));
        }
        line
    }
}
