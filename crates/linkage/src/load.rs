use csv::StringRecord;

use crate::error::LinkageError;
use crate::model::{PaperEntry, Table, UserRecord};

pub const PAPER_COLUMNS: [&str; 3] = ["T1", "T2", "bestzygos"];
pub const USER_COLUMNS: [&str; 2] = ["colorado_id", "alternate_id"];

/// Parse the paper roster. Requires `T1`, `T2`, `bestzygos`; other columns ignored.
pub fn parse_paper_csv(csv_data: &str) -> Result<Vec<PaperEntry>, LinkageError> {
    let table = read_table(Table::Paper, csv_data, &PAPER_COLUMNS)?;
    let [t1_idx, t2_idx, zygos_idx] = [table.columns[0], table.columns[1], table.columns[2]];

    let mut entries = Vec::with_capacity(table.records.len());
    for (i, record) in table.records.iter().enumerate() {
        let row = i + 1;
        let t1 = identifier(record, t1_idx, row, "T1")?;
        let t2 = identifier(record, t2_idx, row, "T2")?;
        entries.push(PaperEntry {
            t1,
            t2,
            bestzygos: record.get(zygos_idx).unwrap_or("").to_string(),
        });
    }

    log::debug!("paper roster: {} row(s)", entries.len());
    Ok(entries)
}

/// Parse the user registry. Requires `colorado_id`, `alternate_id`; other columns ignored.
///
/// An empty `alternate_id` cell loads as `None`.
pub fn parse_users_csv(csv_data: &str) -> Result<Vec<UserRecord>, LinkageError> {
    let table = read_table(Table::Users, csv_data, &USER_COLUMNS)?;
    let [key_idx, alt_idx] = [table.columns[0], table.columns[1]];

    let users: Vec<UserRecord> = table
        .records
        .iter()
        .map(|record| {
            let alternate_id = record.get(alt_idx).unwrap_or("");
            UserRecord {
                colorado_id: record.get(key_idx).unwrap_or("").to_string(),
                alternate_id: (!alternate_id.is_empty()).then(|| alternate_id.to_string()),
            }
        })
        .collect();

    log::debug!("user registry: {} row(s)", users.len());
    Ok(users)
}

fn identifier(record: &StringRecord, idx: usize, row: usize, column: &str) -> Result<String, LinkageError> {
    match record.get(idx) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(LinkageError::EmptyIdentifier { row, column: column.into() }),
    }
}

struct RawTable {
    /// Header positions of the requested columns, in request order.
    columns: Vec<usize>,
    records: Vec<StringRecord>,
}

fn read_table(table: Table, csv_data: &str, required: &[&str]) -> Result<RawTable, LinkageError> {
    let csv_data = csv_data.strip_prefix('\u{feff}').unwrap_or(csv_data);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(csv_data.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| LinkageError::Csv { table, message: e.to_string() })?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let columns = required
        .iter()
        .map(|name| {
            headers.iter().position(|h| h == name).ok_or_else(|| LinkageError::MissingColumn {
                table,
                column: (*name).into(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut records = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let record = result.map_err(|e| match e.kind() {
            csv::ErrorKind::UnequalLengths { expected_len, len, .. } => LinkageError::RaggedRow {
                table,
                row: i + 1,
                expected: *expected_len,
                found: *len,
            },
            _ => LinkageError::Csv { table, message: e.to_string() },
        })?;
        records.push(record);
    }

    Ok(RawTable { columns, records })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paper_basic_with_extra_columns() {
        let csv = "\
family,T1,T2,bestzygos,notes
1,abc123,def456,MZ,x
2,ghi789,jkl000,DZ,
";
        let rows = parse_paper_csv(csv).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], PaperEntry { t1: "abc123".into(), t2: "def456".into(), bestzygos: "MZ".into() });
        assert_eq!(rows[1].t2, "jkl000");
        assert_eq!(rows[1].bestzygos, "DZ");
    }

    #[test]
    fn paper_columns_in_any_order() {
        let csv = "bestzygos,T2,T1\nMZ,b,a\n";
        let rows = parse_paper_csv(csv).unwrap();
        assert_eq!(rows[0].t1, "a");
        assert_eq!(rows[0].t2, "b");
    }

    #[test]
    fn paper_identifiers_kept_verbatim() {
        // No trimming or numeric coercion: the hash covers the exact text.
        let csv = "T1,T2,bestzygos\n007, x ,MZ\n";
        let rows = parse_paper_csv(csv).unwrap();
        assert_eq!(rows[0].t1, "007");
        assert_eq!(rows[0].t2, " x ");
    }

    #[test]
    fn paper_missing_column() {
        let err = parse_paper_csv("T1,bestzygos\na,MZ\n").unwrap_err();
        assert!(matches!(err, LinkageError::MissingColumn { table: Table::Paper, ref column } if column == "T2"));
        assert!(err.to_string().contains("missing column 'T2'"));
    }

    #[test]
    fn paper_ragged_row_is_fatal() {
        let csv = "T1,T2,bestzygos\na,b,MZ\nc,d\n";
        let err = parse_paper_csv(csv).unwrap_err();
        match err {
            LinkageError::RaggedRow { table, row, expected, found } => {
                assert_eq!(table, Table::Paper);
                assert_eq!(row, 2);
                assert_eq!(expected, 3);
                assert_eq!(found, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn paper_empty_identifier_is_fatal() {
        let err = parse_paper_csv("T1,T2,bestzygos\na,,MZ\n").unwrap_err();
        assert!(matches!(err, LinkageError::EmptyIdentifier { row: 1, ref column } if column == "T2"));
    }

    #[test]
    fn paper_bom_stripped() {
        let rows = parse_paper_csv("\u{feff}T1,T2,bestzygos\na,b,MZ\n").unwrap();
        assert_eq!(rows[0].t1, "a");
    }

    #[test]
    fn empty_file_reports_missing_column() {
        let err = parse_users_csv("").unwrap_err();
        assert!(matches!(err, LinkageError::MissingColumn { table: Table::Users, .. }));
    }

    #[test]
    fn users_empty_alternate_is_none() {
        let csv = "\
id,colorado_id,alternate_id,email
1,aaa,U1,a@example.org
2,bbb,,b@example.org
";
        let users = parse_users_csv(csv).unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].alternate_id.as_deref(), Some("U1"));
        assert_eq!(users[1].colorado_id, "bbb");
        assert_eq!(users[1].alternate_id, None);
    }

    #[test]
    fn users_quoted_fields() {
        let csv = "colorado_id,alternate_id\n\"aaa\",\"U,1\"\n";
        let users = parse_users_csv(csv).unwrap();
        assert_eq!(users[0].alternate_id.as_deref(), Some("U,1"));
    }
}
