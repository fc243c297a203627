//! # Status Table
//!
//! Structural validation of the dashboard's comma-separated status data.
//!
//! Only shape is checked: a header of at least [`MIN_HEADER_COLUMNS`]
//! columns, at least one data row, and no data row shorter than the header.
//! Field contents are not interpreted.

use crate::KpiboardError;
use crate::primitives::{MIN_HEADER_COLUMNS, MIN_TABLE_ROWS};
use serde::Serialize;

/// A parsed status table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl StatusTable {
    /// Parse and validate status table text.
    ///
    /// Surrounding whitespace is ignored; lines may end in `\n` or `\r\n`.
    pub fn parse(text: &str) -> Result<Self, KpiboardError> {
        let lines: Vec<&str> = text.trim().lines().collect();

        if lines.len() < MIN_TABLE_ROWS || lines[0].is_empty() {
            return Err(KpiboardError::MalformedTable(
                "missing data rows".to_string(),
            ));
        }

        let header = split_fields(lines[0]);
        if header.len() < MIN_HEADER_COLUMNS {
            return Err(KpiboardError::MalformedTable(format!(
                "header too short: {} columns, need at least {}",
                header.len(),
                MIN_HEADER_COLUMNS
            )));
        }

        let mut rows = Vec::with_capacity(lines.len() - 1);
        for (index, line) in lines.iter().enumerate().skip(1) {
            let fields = split_fields(line);
            if fields.len() < header.len() {
                return Err(KpiboardError::MalformedTable(format!(
                    "row {} has too few columns",
                    index + 1
                )));
            }
            rows.push(fields);
        }

        Ok(Self { header, rows })
    }

    /// Number of data rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

fn split_fields(line: &str) -> Vec<String> {
    line.split(',').map(str::to_string).collect()
}
