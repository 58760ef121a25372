use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use traincast_core::DirectoryLookup;
use traincast_domain::{DirectoryUser, Result, TraincastError};

/// In-memory directory keyed by lowercase identifier.
///
/// Unknown identifiers fail with `NotFound`; `unreachable` makes every call
/// fail with a network error.
#[derive(Default)]
pub struct ScriptedDirectory {
    users: HashMap<String, DirectoryUser>,
    unreachable: bool,
    pub single_lookups: Mutex<Vec<String>>,
    pub batch_lookups: Mutex<Vec<Vec<String>>>,
}

impl ScriptedDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a cloud-hosted user whose display name is derived from the address.
    pub fn with_user(self, address: &str) -> Self {
        self.with(address, false)
    }

    /// Add a user whose mailbox lives on the on-premises Exchange.
    pub fn with_on_premises_user(self, address: &str) -> Self {
        self.with(address, true)
    }

    pub fn unreachable(mut self) -> Self {
        self.unreachable = true;
        self
    }

    fn with(mut self, address: &str, on_premises: bool) -> Self {
        let local = address.split('@').next().unwrap_or(address);
        self.users.insert(
            address.to_lowercase(),
            DirectoryUser {
                id: format!("id-{local}"),
                display_name: format!("User {local}"),
                address: address.to_string(),
                on_premises,
            },
        );
        self
    }

    fn lookup(&self, identifier: &str) -> Result<DirectoryUser> {
        if self.unreachable {
            return Err(TraincastError::Network("directory unreachable".into()));
        }
        self.users
            .get(&identifier.to_lowercase())
            .cloned()
            .ok_or_else(|| TraincastError::NotFound(format!("user {identifier}")))
    }
}

#[async_trait]
impl DirectoryLookup for ScriptedDirectory {
    async fn resolve_user(&self, identifier: &str) -> Result<DirectoryUser> {
        self.single_lookups.lock().unwrap().push(identifier.to_string());
        self.lookup(identifier)
    }

    async fn resolve_users(&self, identifiers: &[String]) -> Result<Vec<DirectoryUser>> {
        self.batch_lookups.lock().unwrap().push(identifiers.to_vec());
        identifiers.iter().map(|id| self.lookup(id)).collect()
    }
}
