//! Dashboard CLI command

use chrono::Utc;

use crate::config::user::CurrentUser;
use crate::error::StockroomResult;
use crate::reports::DashboardReport;
use crate::storage::Storage;

/// Print the inventory dashboard as of now
pub fn handle_dashboard_command(storage: &Storage, user: &CurrentUser) -> StockroomResult<()> {
    let report = DashboardReport::generate(storage, user, Utc::now())?;
    print!("{}", report.format_terminal());
    Ok(())
}
