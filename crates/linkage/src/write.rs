use std::io::Write;

use crate::error::LinkageError;
use crate::model::{LongRow, Table, WideRow};

pub const WIDE_HEADER: [&str; 5] = ["T1", "T2", "T1_alternate_id", "T2_alternate_id", "bestzygos"];
pub const LONG_HEADER: [&str; 3] = ["SVID", "alternate_id", "bestzygos"];

/// Write the wide table: header row, no index column, `\n` line endings.
/// A missing alternate ID is an empty field.
pub fn write_wide_csv(rows: &[WideRow], writer: impl Write) -> Result<(), LinkageError> {
    let table = Table::Wide;
    let mut csv = csv_writer(writer);

    csv.write_record(WIDE_HEADER).map_err(|e| csv_err(table, e))?;
    for row in rows {
        csv.write_record([
            row.t1.as_str(),
            row.t2.as_str(),
            row.t1_alternate_id.as_deref().unwrap_or(""),
            row.t2_alternate_id.as_deref().unwrap_or(""),
            row.bestzygos.as_str(),
        ])
        .map_err(|e| csv_err(table, e))?;
    }

    csv.flush().map_err(|e| LinkageError::Csv { table, message: format!("flush error: {e}") })?;
    Ok(())
}

/// Write the long table with the same conventions as [`write_wide_csv`].
pub fn write_long_csv(rows: &[LongRow], writer: impl Write) -> Result<(), LinkageError> {
    let table = Table::Long;
    let mut csv = csv_writer(writer);

    csv.write_record(LONG_HEADER).map_err(|e| csv_err(table, e))?;
    for row in rows {
        csv.write_record([
            row.svid.as_str(),
            row.alternate_id.as_deref().unwrap_or(""),
            row.bestzygos.as_str(),
        ])
        .map_err(|e| csv_err(table, e))?;
    }

    csv.flush().map_err(|e| LinkageError::Csv { table, message: format!("flush error: {e}") })?;
    Ok(())
}

fn csv_writer<W: Write>(writer: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer)
}

fn csv_err(table: Table, e: csv::Error) -> LinkageError {
    LinkageError::Csv { table, message: format!("write error: {e}") }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_layout() {
        let rows = vec![
            WideRow {
                t1: "abc123".into(),
                t2: "def456".into(),
                t1_alternate_id: Some("U1".into()),
                t2_alternate_id: None,
                bestzygos: "MZ".into(),
            },
        ];
        let mut buf = Vec::new();
        write_wide_csv(&rows, &mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "T1,T2,T1_alternate_id,T2_alternate_id,bestzygos\nabc123,def456,U1,,MZ\n"
        );
    }

    #[test]
    fn long_layout_quotes_when_needed() {
        let rows = vec![LongRow {
            svid: "a,b".into(),
            alternate_id: Some("U1".into()),
            bestzygos: "MZ".into(),
        }];
        let mut buf = Vec::new();
        write_long_csv(&rows, &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "SVID,alternate_id,bestzygos\n\"a,b\",U1,MZ\n");
    }

    #[test]
    fn empty_tables_still_have_header() {
        let mut buf = Vec::new();
        write_long_csv(&[], &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "SVID,alternate_id,bestzygos\n");
    }
}
