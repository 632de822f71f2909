//! Default values for configuration sections without a derivable default.

use crate::schema::DashboardConfig;

/// Cards per row on the dashboard grid.
pub const DEFAULT_COLUMNS: u32 = 4;

/// Largest accepted grid width.
pub const MAX_COLUMNS: u32 = 12;

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: "매출 · 매입 대시보드".to_string(),
            subtitle: None,
            footer: None,
            columns: DEFAULT_COLUMNS,
            catalog_path: None,
        }
    }
}
