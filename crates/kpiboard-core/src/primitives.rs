//! # Dashboard Primitives
//!
//! Fixed names and limits shared by the loader, the validators and the binary.
//!
//! These are compiled into the binary and are immutable at runtime.

/// Default port for the local dashboard server.
pub const DEFAULT_PORT: u16 = 8000;

/// Default bind host for the local dashboard server.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Dashboard entry page. Must exist in the dashboard root before serving.
pub const INDEX_FILE: &str = "index.html";

/// Dashboard configuration document.
pub const CONFIG_FILE: &str = "config.yaml";

/// Tabular status data shown by the dashboard.
pub const STATUS_FILE: &str = "status.csv";

/// Top-level key of the config document that holds the threshold rules.
pub const REFERENCE_LINES_KEY: &str = "ReferenceLines";

/// Key of a profile document listing the owner's responsibilities.
pub const RESPONSIBILITIES_KEY: &str = "General Responsibilities";

// =============================================================================
// STATUS TABLE LIMITS
// =============================================================================

/// Minimum number of header columns in the status table.
pub const MIN_HEADER_COLUMNS: usize = 4;

/// Minimum number of lines in the status table (header + one data row).
pub const MIN_TABLE_ROWS: usize = 2;

// =============================================================================
// COLOR BANDS
// =============================================================================

/// Percentage at or above which a completion figure is green.
pub const GREEN_BAND: f64 = 90.0;

/// Percentage at or above which a completion figure is amber.
pub const AMBER_BAND: f64 = 75.0;

// =============================================================================
// INPUT VALIDATION LIMITS
// =============================================================================

/// Maximum size of any document read from disk (10 MB).
///
/// Config and status files are hand-edited; anything larger is a mistake.
pub const MAX_DOCUMENT_SIZE: u64 = 10 * 1024 * 1024;

/// Maximum number of KPI records accepted in a single file.
pub const MAX_RECORD_COUNT: usize = 100_000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_port_is_8000() {
        assert_eq!(DEFAULT_PORT, 8000);
    }

    #[test]
    fn table_needs_a_data_row() {
        assert_eq!(MIN_TABLE_ROWS, 2);
    }
}
