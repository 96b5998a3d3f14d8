//! The user on whose behalf a command runs
//!
//! Every service call receives the current user explicitly. Products and
//! activity belonging to other users are never visible through it.

use super::settings::Settings;
use crate::error::{StockroomError, StockroomResult};
use crate::models::UserId;

/// Identity of the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: UserId,
    pub name: String,
}

impl CurrentUser {
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Resolve the current user from an explicit override or the settings
    ///
    /// The override wins when present; it must parse as a user ID.
    pub fn resolve(settings: &Settings, override_id: Option<&str>) -> StockroomResult<Self> {
        if let Some(raw) = override_id {
            let id = raw
                .parse::<UserId>()
                .map_err(|_| StockroomError::Config(format!("Invalid user ID: '{}'", raw)))?;
            return Ok(Self::new(id, raw));
        }

        let id = settings.user_id.ok_or_else(|| {
            StockroomError::Config(
                "No user configured. Run 'stockroom init' or pass --user <ID>.".into(),
            )
        })?;

        Ok(Self::new(id, settings.user_name.clone()))
    }
}
