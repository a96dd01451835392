//! Gateway client wiring for one CLI invocation

use anyhow::{Context, Result};
use bankkaro_api_client::notify::ChannelNotifier;
use bankkaro_api_client::{BankKaroClient, ClientConfig, Notification};
use bankkaro_core::config::Config;
use bankkaro_core::Error;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::debug;

/// A client plus the notifications it has raised so far
pub struct Session {
    /// Gateway client wired to this session's notifier
    pub client: BankKaroClient,
    notifications: UnboundedReceiver<Notification>,
}

impl Session {
    /// Build a client from `bankkaro.toml` when one is found, otherwise
    /// from `BANKKARO_*` environment variables
    pub fn open(config_path: Option<&str>) -> Result<Self> {
        let config = Config::load(config_path).context("Failed to load configuration")?;

        let client_config = match &config.path {
            Some(path) => {
                debug!(path = %path, "Using configuration file");
                ClientConfig::from_settings(&config.schema.gateway, &config.schema.rate_limit)
            }
            None => ClientConfig::from_env()
                .map_err(Error::from)
                .context("Invalid BANKKARO_* environment")?,
        };

        let (notifier, notifications) = ChannelNotifier::new();
        let client = BankKaroClient::builder(client_config)
            .notifier(Arc::new(notifier))
            .build()
            .map_err(Error::from)
            .context("Invalid gateway configuration")?;

        Ok(Self {
            client,
            notifications,
        })
    }

    /// Notifications raised since the last drain
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        let mut drained = Vec::new();
        while let Ok(notification) = self.notifications.try_recv() {
            drained.push(notification);
        }
        drained
    }
}
