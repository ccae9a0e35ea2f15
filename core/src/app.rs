//! Widget bootstrap: one explicit entry point from configuration to a loaded
//! list.

use tracing::info;

use crate::client::TodoClient;
use crate::error::SyncError;
use crate::http::Transport;
use crate::sync::{ReconcilePolicy, TodoSync};
use crate::types::TodoItem;

/// Everything needed to mount a widget.
#[derive(Debug, Clone)]
pub struct WidgetConfig {
    /// Collection URL; item URLs are formed by appending the id.
    pub base_url: String,
    pub owner: String,
    pub title: String,
    pub policy: ReconcilePolicy,
}

impl WidgetConfig {
    pub fn new(base_url: impl Into<String>, owner: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            owner: owner.into(),
            title: title.into(),
            policy: ReconcilePolicy::default(),
        }
    }
}

/// A mounted widget: its title plus the synchronized list.
pub struct TodoApp<T> {
    title: String,
    sync: TodoSync<T>,
}

impl<T: Transport> TodoApp<T> {
    /// Build the sync layer and load the owner's items.
    pub fn mount(config: WidgetConfig, transport: T) -> Result<Self, SyncError> {
        let client = TodoClient::new(&config.base_url);
        let mut sync = TodoSync::new(client, config.owner, transport).with_policy(config.policy);
        let loaded = sync.list()?.len();
        info!(owner = %sync.owner(), items = loaded, "widget mounted");
        Ok(Self {
            title: config.title,
            sync,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn sync(&self) -> &TodoSync<T> {
        &self.sync
    }

    pub fn sync_mut(&mut self) -> &mut TodoSync<T> {
        &mut self.sync
    }

    /// Submit the add form. The item shows up in the view only after the
    /// server returned it.
    pub fn submit(&mut self, input: &str) -> Result<&TodoItem, SyncError> {
        self.sync.create(input)
    }
}
