// In crates/web-server/src/types.rs

use serde::Deserialize;

/// Query parameters for `GET /api/intervals/{interval}` (e.g., `?rows=20`).
#[derive(Debug, Deserialize, Default)]
pub struct RowsParams {
    /// How many of the most recent rows to return. All rows when absent.
    pub rows: Option<usize>,
}
