//! Spreadsheet export of the currently filtered result set for the
//! two exportable queries. Column order is fixed; presentation polish
//! beyond that is explicitly out of scope.

use rust_xlsxwriter::{Workbook, XlsxError};

use crate::db::queries::entries::EntryExportRow;
use crate::db::queries::logs::LogExportRow;

/// Cantiere, Tag, Battery%, Barca/Ship, Crew, Role, Entry, Leave.
pub fn permanence_logs_workbook(rows: &[LogExportRow]) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    let headers = [
        "Cantiere", "Tag", "Battery%", "Barca", "Crew", "Role", "Entry", "Leave",
    ];
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string(0, col as u16, *header)?;
    }

    for (row_idx, row) in rows.iter().enumerate() {
        let row_num = (row_idx + 1) as u32;
        sheet.write_string(row_num, 0, &row.shipyard_name)?;
        sheet.write_string(row_num, 1, row.tag_mac_address.as_deref().unwrap_or(""))?;
        match row.tag_battery {
            Some(battery) => sheet.write_number(row_num, 2, battery)?,
            None => sheet.write_string(row_num, 2, "")?,
        };
        sheet.write_string(row_num, 3, row.ship_name.as_deref().unwrap_or(""))?;
        sheet.write_string(row_num, 4, &row.crew_member_name)?;
        sheet.write_string(row_num, 5, row.role_name.as_deref().unwrap_or(""))?;
        sheet.write_string(row_num, 6, &timestamp_cell(row.entry_timestamp))?;
        sheet.write_string(row_num, 7, &timestamp_cell(row.leave_timestamp))?;
    }

    workbook.save_to_buffer()
}

/// Cantiere, Tag, Battery%, Passaggio, Tipologia.
pub fn unassigned_entries_workbook(rows: &[EntryExportRow]) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    let headers = ["Cantiere", "Tag", "Battery%", "Passaggio", "Tipologia"];
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string(0, col as u16, *header)?;
    }

    for (row_idx, row) in rows.iter().enumerate() {
        let row_num = (row_idx + 1) as u32;
        sheet.write_string(row_num, 0, &row.shipyard_name)?;
        sheet.write_string(row_num, 1, &row.tag_mac_address)?;
        sheet.write_number(row_num, 2, row.tag_battery)?;
        sheet.write_string(row_num, 3, &row.advertisement_timestamp.to_rfc3339())?;
        sheet.write_string(row_num, 4, tipologia(row.is_entering))?;
    }

    workbook.save_to_buffer()
}

fn tipologia(is_entering: bool) -> &'static str {
    if is_entering {
        "Ingresso"
    } else {
        "Uscita"
    }
}

fn timestamp_cell(ts: Option<chrono::DateTime<chrono::Utc>>) -> String {
    ts.map(|ts| ts.to_rfc3339()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn builds_a_nonempty_workbook_for_logs() {
        let rows = vec![LogExportRow {
            shipyard_name: "North Yard".to_string(),
            tag_mac_address: Some("AABBCCDDEEFF".to_string()),
            tag_battery: Some(87.5),
            ship_name: Some("MV Example".to_string()),
            crew_member_name: "A. Worker".to_string(),
            role_name: Some("Welder".to_string()),
            entry_timestamp: Some(Utc::now()),
            leave_timestamp: None,
        }];
        let buf = permanence_logs_workbook(&rows).expect("workbook should build");
        assert!(!buf.is_empty());
    }

    #[test]
    fn builds_a_nonempty_workbook_for_entries() {
        let rows = vec![EntryExportRow {
            shipyard_name: "North Yard".to_string(),
            tag_mac_address: "AABBCCDDEEFF".to_string(),
            tag_battery: 42.0,
            advertisement_timestamp: Utc::now(),
            is_entering: true,
        }];
        let buf = unassigned_entries_workbook(&rows).expect("workbook should build");
        assert!(!buf.is_empty());
    }
}
