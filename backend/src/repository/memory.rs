//! In-process lock table used when no external content repository is attached.
//!
//! `LockTable` is clonable and shared across the Actix workers as
//! `web::Data`. Each entry maps a resource uri to the user holding its lock;
//! locks live as long as the server process.

use super::{RepositoryError, ResourceRepository};
use log::debug;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct LockTable {
    /// Resource uri -> lock owner.
    locks: Arc<RwLock<HashMap<String, String>>>,
}

impl LockTable {
    #[cfg(test)]
    pub async fn owner(&self, uri: &str) -> Option<String> {
        self.locks.read().await.get(uri).cloned()
    }
}

fn checked_uri(uri: &str) -> Result<&str, RepositoryError> {
    let uri = uri.trim();
    if uri.is_empty() {
        return Err(RepositoryError::Internal(
            "No resource uri was given".to_string(),
        ));
    }
    Ok(uri)
}

impl ResourceRepository for LockTable {
    async fn lock_resource(&self, uri: &str, user: &str) -> Result<(), RepositoryError> {
        let uri = checked_uri(uri)?;
        let mut locks = self.locks.write().await;
        match locks.get(uri) {
            Some(owner) if owner != user => Err(RepositoryError::Refused(format!(
                "The resource '{}' is locked by user '{}'.",
                uri, owner
            ))),
            _ => {
                locks.insert(uri.to_string(), user.to_string());
                debug!("{} locked {}", user, uri);
                Ok(())
            }
        }
    }

    async fn unlock_resource(&self, uri: &str, user: &str) -> Result<(), RepositoryError> {
        let uri = checked_uri(uri)?;
        let mut locks = self.locks.write().await;
        match locks.get(uri) {
            None => Err(RepositoryError::Refused(format!(
                "The resource '{}' is not locked.",
                uri
            ))),
            Some(owner) if owner != user => Err(RepositoryError::Refused(format!(
                "The resource '{}' is locked by user '{}' and cannot be unlocked by '{}'.",
                uri, owner, user
            ))),
            Some(_) => {
                locks.remove(uri);
                debug!("{} unlocked {}", user, uri);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn lock_is_exclusive_per_user() {
        let table = LockTable::default();
        table.lock_resource("/sites/default/index.html", "Admin").await.unwrap();
        // re-locking one's own lock is fine
        table.lock_resource("/sites/default/index.html", "Admin").await.unwrap();

        let err = table
            .lock_resource("/sites/default/index.html", "Editor")
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Refused(ref m) if m.contains("'Admin'")));
        assert_eq!(
            table.owner("/sites/default/index.html").await.as_deref(),
            Some("Admin")
        );
    }

    #[actix_web::test]
    async fn unlock_requires_the_owner() {
        let table = LockTable::default();
        assert!(matches!(
            table.unlock_resource("/a", "Admin").await,
            Err(RepositoryError::Refused(_))
        ));

        table.lock_resource("/a", "Admin").await.unwrap();
        assert!(matches!(
            table.unlock_resource("/a", "Editor").await,
            Err(RepositoryError::Refused(_))
        ));
        table.unlock_resource("/a", "Admin").await.unwrap();
        assert_eq!(table.owner("/a").await, None);
    }

    #[actix_web::test]
    async fn blank_uri_is_an_internal_failure() {
        let table = LockTable::default();
        assert!(matches!(
            table.lock_resource("  ", "Admin").await,
            Err(RepositoryError::Internal(_))
        ));
    }
}
