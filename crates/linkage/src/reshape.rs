use crate::model::{LongRow, Slot, WideRow};

/// Wide → long: every T1 projection, then every T2 projection.
pub fn to_long(wide: &[WideRow]) -> Vec<LongRow> {
    let mut long = Vec::with_capacity(wide.len() * 2);
    for slot in [Slot::T1, Slot::T2] {
        long.extend(wide.iter().map(|row| project(row, slot)));
    }
    long
}

fn project(row: &WideRow, slot: Slot) -> LongRow {
    LongRow {
        svid: slot.svid(row).to_string(),
        alternate_id: slot.alternate_id(row).map(str::to_string),
        bestzygos: row.bestzygos.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wide(t1: &str, t2: &str, a1: Option<&str>, a2: Option<&str>, z: &str) -> WideRow {
        WideRow {
            t1: t1.into(),
            t2: t2.into(),
            t1_alternate_id: a1.map(Into::into),
            t2_alternate_id: a2.map(Into::into),
            bestzygos: z.into(),
        }
    }

    #[test]
    fn t1_block_precedes_t2_block() {
        let rows = vec![
            wide("a", "b", Some("x"), Some("y"), "MZ"),
            wide("c", "d", None, Some("w"), "DZ"),
        ];
        let long = to_long(&rows);
        let svids: Vec<&str> = long.iter().map(|r| r.svid.as_str()).collect();
        assert_eq!(svids, ["a", "c", "b", "d"]);

        assert_eq!(long[0].alternate_id.as_deref(), Some("x"));
        assert_eq!(long[1].alternate_id, None);
        assert_eq!(long[1].bestzygos, "DZ");
        assert_eq!(long[3].alternate_id.as_deref(), Some("w"));
        assert_eq!(long[3].bestzygos, "DZ");
    }

    #[test]
    fn empty_in_empty_out() {
        assert!(to_long(&[]).is_empty());
    }

    #[test]
    fn identical_twins_not_deduplicated() {
        let rows = vec![wide("same", "same", Some("u"), Some("u"), "MZ")];
        assert_eq!(to_long(&rows).len(), 2);
    }
}
