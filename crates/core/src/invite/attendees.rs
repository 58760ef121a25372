//! Attendee resolution
//!
//! Turns the registered and auto-registered identifier lists of an event
//! into directory-backed attendee records. Resolution is fail-closed: a
//! single failed lookup aborts the whole list.

use std::collections::HashSet;

use tracing::debug;
use traincast_domain::{split_identifiers, Attendee, Result, TraincastError};

use super::ports::DirectoryLookup;

/// Resolve both identifier lists into a deduplicated attendee list.
///
/// Registered identifiers come first; an identifier already seen (compared
/// case-insensitively) is skipped. Each non-empty list is resolved with one
/// batched directory call.
pub async fn resolve_attendees(
    directory: &dyn DirectoryLookup,
    registered: Option<&str>,
    auto_registered: Option<&str>,
) -> Result<Vec<Attendee>> {
    let mut seen = HashSet::new();
    let registered = dedupe(split_identifiers(registered), &mut seen)?;
    let auto_registered = dedupe(split_identifiers(auto_registered), &mut seen)?;

    let mut attendees = Vec::with_capacity(registered.len() + auto_registered.len());
    for (source, identifiers) in [("registered", registered), ("auto_registered", auto_registered)]
    {
        if identifiers.is_empty() {
            continue;
        }

        debug!(source, count = identifiers.len(), "resolving attendees");
        let users = directory
            .resolve_users(&identifiers)
            .await
            .map_err(|err| err.context(&format!("resolving {source} attendees")))?;

        if users.len() != identifiers.len() {
            return Err(TraincastError::External(format!(
                "directory returned {} of {} {source} attendees",
                users.len(),
                identifiers.len()
            )));
        }

        attendees.extend(users.iter().map(|user| user.to_attendee()));
    }

    Ok(attendees)
}

fn dedupe(identifiers: Vec<String>, seen: &mut HashSet<String>) -> Result<Vec<String>> {
    let mut unique = Vec::with_capacity(identifiers.len());
    for identifier in identifiers {
        validate_identifier(&identifier)?;
        if seen.insert(identifier.to_lowercase()) {
            unique.push(identifier);
        }
    }
    Ok(unique)
}

fn validate_identifier(identifier: &str) -> Result<()> {
    if identifier.chars().any(|c| c.is_whitespace() || c == '/' || c == '?' || c == '#') {
        return Err(TraincastError::InvalidInput(format!(
            "malformed attendee identifier: {identifier:?}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use traincast_domain::DirectoryUser;

    use super::*;

    #[derive(Default)]
    struct EchoDirectory {
        batches: Mutex<Vec<Vec<String>>>,
        fail_on: Option<&'static str>,
    }

    #[async_trait]
    impl DirectoryLookup for EchoDirectory {
        async fn resolve_user(&self, identifier: &str) -> Result<DirectoryUser> {
            Ok(user(identifier))
        }

        async fn resolve_users(&self, identifiers: &[String]) -> Result<Vec<DirectoryUser>> {
            self.batches.lock().unwrap().push(identifiers.to_vec());
            if let Some(bad) = self.fail_on {
                if identifiers.iter().any(|id| id == bad) {
                    return Err(TraincastError::NotFound(format!("user {bad}")));
                }
            }
            Ok(identifiers.iter().map(|id| user(id)).collect())
        }
    }

    fn user(id: &str) -> DirectoryUser {
        DirectoryUser {
            id: id.to_string(),
            display_name: id.split('@').next().unwrap_or(id).to_uppercase(),
            address: id.to_string(),
            on_premises: false,
        }
    }

    #[tokio::test]
    async fn resolves_each_registered_attendee_once() {
        let directory = EchoDirectory::default();
        let attendees =
            resolve_attendees(&directory, Some("a@x.com;b@x.com"), Some("")).await.unwrap();

        assert_eq!(
            attendees,
            vec![
                Attendee { display_name: "A".into(), address: "a@x.com".into() },
                Attendee { display_name: "B".into(), address: "b@x.com".into() },
            ]
        );
        assert_eq!(directory.batches.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn skips_duplicates_across_lists() {
        let directory = EchoDirectory::default();
        let attendees =
            resolve_attendees(&directory, Some("a@x.com;A@X.com"), Some("a@x.com;c@x.com"))
                .await
                .unwrap();

        let addresses: Vec<_> = attendees.iter().map(|a| a.address.as_str()).collect();
        assert_eq!(addresses, vec!["a@x.com", "c@x.com"]);
        assert_eq!(
            *directory.batches.lock().unwrap(),
            vec![vec!["a@x.com".to_string()], vec!["c@x.com".to_string()]]
        );
    }

    #[tokio::test]
    async fn empty_lists_make_no_directory_calls() {
        let directory = EchoDirectory::default();
        let attendees = resolve_attendees(&directory, None, Some(" ; ")).await.unwrap();
        assert!(attendees.is_empty());
        assert!(directory.batches.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn one_failed_lookup_fails_everything() {
        let directory = EchoDirectory { fail_on: Some("ghost@x.com"), ..Default::default() };
        let err = resolve_attendees(&directory, Some("a@x.com"), Some("ghost@x.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, TraincastError::NotFound(msg) if msg.contains("auto_registered")));
    }

    #[tokio::test]
    async fn malformed_identifier_is_rejected_before_lookup() {
        let directory = EchoDirectory::default();
        let err = resolve_attendees(&directory, Some("users/../me"), None).await.unwrap_err();
        assert!(err.is_bad_request());
        assert!(directory.batches.lock().unwrap().is_empty());
    }
}
