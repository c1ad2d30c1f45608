use std::collections::HashMap;

use crate::hash::colorado_hash;
use crate::model::{Slot, SlotSummary, UserRecord, WideRow};

/// Registry rows grouped by `colorado_id`, registry order kept within a key.
pub struct RegistryIndex<'a> {
    by_key: HashMap<&'a str, Vec<&'a UserRecord>>,
}

impl<'a> RegistryIndex<'a> {
    pub fn build(users: &'a [UserRecord]) -> Self {
        let mut by_key: HashMap<&'a str, Vec<&'a UserRecord>> = HashMap::new();
        let mut skipped = 0usize;
        for user in users {
            // A digest is never empty, so these rows can never match.
            if user.colorado_id.is_empty() {
                skipped += 1;
                continue;
            }
            by_key.entry(user.colorado_id.as_str()).or_default().push(user);
        }
        if skipped > 0 {
            log::debug!("registry: {skipped} row(s) with empty colorado_id ignored");
        }
        Self { by_key }
    }

    pub fn get(&self, colorado_id: &str) -> Option<&[&'a UserRecord]> {
        self.by_key.get(colorado_id).map(|v| v.as_slice())
    }

    /// Number of distinct keys shared by more than one registry row.
    pub fn duplicate_keys(&self) -> usize {
        self.by_key.values().filter(|v| v.len() > 1).count()
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

/// Left-join `rows` to the registry on `colorado_hash(slot SVID) == colorado_id`,
/// filling the slot's alternate ID.
///
/// Unmatched rows are kept with `None`. A key held by several registry rows
/// yields one output row per registry row, in registry order.
pub fn join_slot(rows: &[WideRow], slot: Slot, index: &RegistryIndex<'_>) -> (Vec<WideRow>, SlotSummary) {
    let mut out = Vec::with_capacity(rows.len());
    let mut summary = SlotSummary::default();

    for row in rows {
        let key = colorado_hash(slot.svid(row));
        match index.get(&key) {
            Some(users) => {
                summary.matched += 1;
                summary.fan_out += users.len() - 1;
                for user in users {
                    let mut joined = row.clone();
                    slot.set_alternate_id(&mut joined, user.alternate_id.clone());
                    out.push(joined);
                }
            }
            None => {
                summary.unmatched += 1;
                let mut joined = row.clone();
                slot.set_alternate_id(&mut joined, None);
                out.push(joined);
            }
        }
    }

    log::debug!(
        "{slot} join: {} matched, {} unmatched, {} fan-out row(s)",
        summary.matched,
        summary.unmatched,
        summary.fan_out
    );

    (out, summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PaperEntry;

    fn user(svid: &str, alt: &str) -> UserRecord {
        UserRecord {
            colorado_id: colorado_hash(svid),
            alternate_id: Some(alt.into()),
        }
    }

    fn seed(pairs: &[(&str, &str)]) -> Vec<WideRow> {
        pairs
            .iter()
            .map(|(t1, t2)| {
                WideRow::from_entry(&PaperEntry {
                    t1: (*t1).into(),
                    t2: (*t2).into(),
                    bestzygos: "MZ".into(),
                })
            })
            .collect()
    }

    #[test]
    fn matched_and_unmatched() {
        let users = vec![user("abc123", "U1")];
        let index = RegistryIndex::build(&users);
        let rows = seed(&[("abc123", "x"), ("nope", "y")]);

        let (out, s) = join_slot(&rows, Slot::T1, &index);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].t1_alternate_id.as_deref(), Some("U1"));
        assert_eq!(out[1].t1_alternate_id, None);
        assert_eq!(out[1].t1, "nope");
        assert_eq!(s, SlotSummary { matched: 1, unmatched: 1, fan_out: 0 });
    }

    #[test]
    fn t2_join_leaves_t1_untouched() {
        let users = vec![user("abc123", "U1"), user("def456", "U2")];
        let index = RegistryIndex::build(&users);
        let rows = seed(&[("abc123", "def456")]);

        let (after_t1, _) = join_slot(&rows, Slot::T1, &index);
        let (out, _) = join_slot(&after_t1, Slot::T2, &index);
        assert_eq!(out[0].t1_alternate_id.as_deref(), Some("U1"));
        assert_eq!(out[0].t2_alternate_id.as_deref(), Some("U2"));
    }

    #[test]
    fn duplicate_key_fans_out_in_registry_order() {
        let users = vec![user("abc123", "first"), user("zzz", "other"), user("abc123", "second")];
        let index = RegistryIndex::build(&users);
        assert_eq!(index.duplicate_keys(), 1);

        let rows = seed(&[("abc123", "a"), ("b", "c")]);
        let (out, s) = join_slot(&rows, Slot::T1, &index);
        assert_eq!(out.len(), 3);
        assert_eq!(out[0].t1_alternate_id.as_deref(), Some("first"));
        assert_eq!(out[1].t1_alternate_id.as_deref(), Some("second"));
        assert_eq!(out[2].t1, "b");
        assert_eq!(s.fan_out, 1);
    }

    #[test]
    fn matched_key_with_missing_alternate_id() {
        let users = vec![UserRecord {
            colorado_id: colorado_hash("abc123"),
            alternate_id: None,
        }];
        let index = RegistryIndex::build(&users);
        let (out, s) = join_slot(&seed(&[("abc123", "x")]), Slot::T1, &index);
        assert_eq!(out[0].t1_alternate_id, None);
        assert_eq!(s.matched, 1);
    }

    #[test]
    fn raw_svid_is_not_a_key() {
        // Registry stores digests; a raw SVID in colorado_id must not match.
        let users = vec![UserRecord {
            colorado_id: "abc123".into(),
            alternate_id: Some("U1".into()),
        }];
        let index = RegistryIndex::build(&users);
        let (out, s) = join_slot(&seed(&[("abc123", "x")]), Slot::T1, &index);
        assert_eq!(out[0].t1_alternate_id, None);
        assert_eq!(s.unmatched, 1);
    }

    #[test]
    fn empty_keys_not_indexed() {
        let users = vec![
            UserRecord { colorado_id: String::new(), alternate_id: Some("a".into()) },
            UserRecord { colorado_id: String::new(), alternate_id: Some("b".into()) },
        ];
        let index = RegistryIndex::build(&users);
        assert!(index.is_empty());
        assert_eq!(index.duplicate_keys(), 0);
    }
}
