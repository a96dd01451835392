//! CLI command implementations

pub mod calculate;
pub mod cards;
pub mod health;
pub mod questions;

use crate::output::{OutputFormat, Status};
use anyhow::{bail, Result};
use bankkaro_api_client::Notification;

/// Turn gateway notifications into a failing exit
///
/// In text mode they are printed here; JSON callers already embedded them in
/// the document.
fn fail_on_notifications(notifications: &[Notification], format: OutputFormat) -> Result<()> {
    let Some(first) = notifications.first() else {
        return Ok(());
    };

    if format == OutputFormat::Text {
        for notification in notifications {
            Status::notification(notification);
        }
    }

    bail!("{}", first.description)
}
