//! Reconciles a local view of todo items with the remote collection.
//!
//! # Design
//! `TodoSync` owns the local view and a `Transport`. Every operation issues
//! exactly one request. Mutations are applied to the view before the request
//! is sent; each entry records whether the server has confirmed its current
//! value. What happens to a mutation the server never confirmed is decided by
//! `ReconcilePolicy`.
//!
//! Deleting goes through a `Confirm` capability supplied by the rendering
//! layer, so the sync logic never blocks on UI of its own.

use tracing::{debug, warn};

use crate::client::TodoClient;
use crate::error::SyncError;
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::types::{NewTodoItem, TodoId, TodoItem};

/// What to do with a local mutation whose request failed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReconcilePolicy {
    /// Keep the local change and mark the entry `Failed`.
    #[default]
    Optimistic,
    /// Undo the local change.
    Revert,
}

/// Whether the server has acknowledged an entry's current value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryState {
    Confirmed,
    /// A request carrying this value is in flight. Only observable from
    /// inside a `Transport::execute` call; by the time an operation returns
    /// the entry is `Confirmed` or `Failed`.
    Pending,
    /// The last request for this entry failed and the local value was kept.
    Failed,
}

/// One item in the local view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewEntry {
    pub item: TodoItem,
    pub state: EntryState,
}

impl ViewEntry {
    fn confirmed(item: TodoItem) -> Self {
        Self {
            item,
            state: EntryState::Confirmed,
        }
    }
}

/// An action that needs the user's consent before it is carried out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    Delete { id: TodoId, name: String },
}

/// Gate for cancellable actions, provided by the rendering layer.
pub trait Confirm {
    fn confirm(&mut self, action: &ConfirmAction) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&ConfirmAction) -> bool,
{
    fn confirm(&mut self, action: &ConfirmAction) -> bool {
        self(action)
    }
}

/// Approves every action.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

impl Confirm for AlwaysConfirm {
    fn confirm(&mut self, _action: &ConfirmAction) -> bool {
        true
    }
}

/// Declines every action.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverConfirm;

impl Confirm for NeverConfirm {
    fn confirm(&mut self, _action: &ConfirmAction) -> bool {
        false
    }
}

/// Outcome of `TodoSync::remove`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Removal {
    /// The user declined; nothing changed locally or remotely.
    Declined,
    /// The item was removed from the view and the server acknowledged it.
    Removed(TodoItem),
}

/// Whether `name` may be sent as a new item. Any non-empty text counts,
/// whitespace included.
pub fn can_submit(name: &str) -> bool {
    !name.is_empty()
}

/// Local view of one owner's list, kept in step with the remote collection.
pub struct TodoSync<T> {
    client: TodoClient,
    owner: String,
    transport: T,
    policy: ReconcilePolicy,
    view: Vec<ViewEntry>,
}

impl<T: Transport> TodoSync<T> {
    pub fn new(client: TodoClient, owner: impl Into<String>, transport: T) -> Self {
        Self {
            client,
            owner: owner.into(),
            transport,
            policy: ReconcilePolicy::default(),
            view: Vec::new(),
        }
    }

    pub fn with_policy(mut self, policy: ReconcilePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn policy(&self) -> ReconcilePolicy {
        self.policy
    }

    pub fn entries(&self) -> &[ViewEntry] {
        &self.view
    }

    pub fn items(&self) -> impl Iterator<Item = &TodoItem> {
        self.view.iter().map(|entry| &entry.item)
    }

    pub fn get(&self, id: &TodoId) -> Option<&ViewEntry> {
        self.view.iter().find(|entry| &entry.item.id == id)
    }

    pub fn len(&self) -> usize {
        self.view.len()
    }

    pub fn is_empty(&self) -> bool {
        self.view.is_empty()
    }

    /// Replace the view with the server's items for this owner.
    ///
    /// Server order is kept. Items belonging to another owner are dropped.
    /// On failure the view is left untouched.
    pub fn list(&mut self) -> Result<&[ViewEntry], SyncError> {
        let request = self.client.build_list(&self.owner)?;
        let response = self.send(request)?;
        let items = self.client.parse_list(response)?;

        let total = items.len();
        self.view = items
            .into_iter()
            .filter(|item| item.owner == self.owner)
            .map(ViewEntry::confirmed)
            .collect();
        if self.view.len() != total {
            warn!(
                owner = %self.owner,
                dropped = total - self.view.len(),
                "server returned items of another owner"
            );
        }
        Ok(self.view.as_slice())
    }

    /// Create an item and append it to the view once the server returns it.
    ///
    /// The name is sent exactly as given; only an empty name is refused.
    pub fn create(&mut self, name: &str) -> Result<&TodoItem, SyncError> {
        if !can_submit(name) {
            return Err(SyncError::EmptyName);
        }
        let input = NewTodoItem {
            name: name.to_string(),
            owner: self.owner.clone(),
        };
        let request = self.client.build_create(&input)?;
        let response = self.send(request)?;
        let item = self.client.parse_create(response)?;

        self.view.push(ViewEntry::confirmed(item));
        let last = self.view.len() - 1;
        Ok(&self.view[last].item)
    }

    /// Flip `done` locally, then ask the server to store the new value.
    ///
    /// The flip happens exactly once per call, before the request. Returns the
    /// new value when the server acknowledged it.
    pub fn toggle_done(&mut self, id: &TodoId) -> Result<bool, SyncError> {
        let index = self.position(id)?;
        let entry = &mut self.view[index];
        let previous = entry.item.done;
        entry.item.done = !previous;
        entry.state = EntryState::Pending;

        let outcome = self
            .client
            .build_set_done(id, !previous)
            .and_then(|request| self.send(request))
            .and_then(|response| self.client.parse_set_done(response));

        // `send` cannot touch the view, so `index` still points at this entry.
        let entry = &mut self.view[index];
        match outcome {
            Ok(()) => {
                entry.state = EntryState::Confirmed;
                Ok(entry.item.done)
            }
            Err(err) => {
                warn!(%id, error = %err, policy = ?self.policy, "toggle not confirmed");
                match self.policy {
                    ReconcilePolicy::Optimistic => entry.state = EntryState::Failed,
                    ReconcilePolicy::Revert => {
                        entry.item.done = previous;
                        entry.state = EntryState::Confirmed;
                    }
                }
                Err(err)
            }
        }
    }

    /// Remove an item after the user confirms.
    ///
    /// A declined confirmation sends nothing and changes nothing. Otherwise the
    /// entry leaves the view before the DELETE is sent.
    pub fn remove<C>(&mut self, id: &TodoId, confirm: &mut C) -> Result<Removal, SyncError>
    where
        C: Confirm + ?Sized,
    {
        let index = self.position(id)?;
        let action = ConfirmAction::Delete {
            id: id.clone(),
            name: self.view[index].item.name.clone(),
        };
        if !confirm.confirm(&action) {
            debug!(%id, "delete declined");
            return Ok(Removal::Declined);
        }

        let entry = self.view.remove(index);
        let request = self.client.build_delete(id);
        let outcome = self
            .send(request)
            .and_then(|response| self.client.parse_delete(response));

        match outcome {
            Ok(()) => Ok(Removal::Removed(entry.item)),
            Err(err) => {
                warn!(%id, error = %err, policy = ?self.policy, "delete not confirmed");
                if self.policy == ReconcilePolicy::Revert {
                    self.view.insert(index, entry);
                }
                Err(err)
            }
        }
    }

    /// Re-read one item from the server and overwrite the local entry.
    ///
    /// If the server no longer has the item it is dropped from the view.
    pub fn refresh(&mut self, id: &TodoId) -> Result<&ViewEntry, SyncError> {
        let index = self.position(id)?;
        let request = self.client.build_get(id);
        let outcome = self
            .send(request)
            .and_then(|response| self.client.parse_get(response));

        match outcome {
            Ok(item) => {
                self.view[index] = ViewEntry::confirmed(item);
                Ok(&self.view[index])
            }
            Err(SyncError::NotFound) => {
                debug!(%id, "item gone on server, dropping local entry");
                self.view.remove(index);
                Err(SyncError::NotFound)
            }
            Err(err) => Err(err),
        }
    }

    fn position(&self, id: &TodoId) -> Result<usize, SyncError> {
        self.view
            .iter()
            .position(|entry| &entry.item.id == id)
            .ok_or_else(|| SyncError::UnknownItem(id.clone()))
    }

    fn send(&self, request: HttpRequest) -> Result<HttpResponse, SyncError> {
        debug!(method = %request.method, url = %request.url, "sending request");
        let response = self.transport.execute(request)?;
        debug!(status = response.status, "response received");
        Ok(response)
    }
}
