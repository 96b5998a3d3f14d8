//! Activity CLI commands
//!
//! Browses the activity log with cursor pagination.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::config::user::CurrentUser;
use crate::display::activity::format_activity_page;
use crate::error::StockroomResult;
use crate::pagination::Direction;
use crate::query::ActivityQuery;
use crate::services::ActivityService;
use crate::storage::Storage;

/// Activity subcommands
#[derive(Subcommand)]
pub enum ActivityCommands {
    /// List activity, newest first
    List {
        /// Only entries with this action (CREATE_PRODUCT, UPDATE_PRODUCT, DELETE_PRODUCT)
        #[arg(short, long)]
        action: Option<String>,
        /// Only entries whose product name or SKU contains this text
        #[arg(long)]
        q: Option<String>,
        /// Entry ID to page from
        #[arg(long)]
        cursor_id: Option<String>,
        /// Paging direction from the cursor: next (older) or prev (newer)
        #[arg(long, requires = "cursor_id")]
        dir: Option<String>,
        /// Raw query string such as "cursorId=...&dir=next", as printed by earlier listings
        #[arg(long, conflicts_with_all = ["action", "q", "cursor_id", "dir"])]
        query: Option<String>,
    },
}

/// Handle an activity command
pub fn handle_activity_command(
    storage: &Storage,
    settings: &Settings,
    user: &CurrentUser,
    cmd: ActivityCommands,
) -> StockroomResult<()> {
    let service = ActivityService::new(storage, user).with_page_size(settings.activity_page_size);

    match cmd {
        ActivityCommands::List {
            action,
            q,
            cursor_id,
            dir,
            query,
        } => {
            let query = match query {
                Some(raw) => ActivityQuery::parse(&raw),
                None => {
                    let mut query = ActivityQuery {
                        q,
                        dir: Direction::from_param(dir.as_deref()),
                        ..Default::default()
                    };
                    if let Some(action) = action {
                        query.set_action(&action);
                    }
                    if let Some(cursor_id) = cursor_id {
                        query.set_cursor_id(&cursor_id);
                    }
                    query
                }
            };

            let page = service.page(&query)?;
            print!("{}", format_activity_page(&page, &settings.date_format));
        }
    }

    Ok(())
}
