// Mock user session
// Demo-grade authentication: any non-empty credentials log in, admin/admin is the admin

use serde::Serialize;

use super::models::User;
use super::storage::{LocalStorage, StorageResult};
use crate::config::StorageKeys;

const ADMIN_CREDENTIAL: &str = "admin";
const FLAG_TRUE: &str = "true";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Anonymous,
    Standard,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub user: Option<User>,
    pub user_name: String,
    pub is_authenticated: bool,
    pub is_admin: bool,
}

pub struct SessionStore {
    storage: LocalStorage,
    authenticated_key: String,
    admin_key: String,
    email_domain: String,
    user: Option<User>,
    is_authenticated: bool,
    is_admin: bool,
}

impl SessionStore {
    pub fn new(storage: LocalStorage, keys: &StorageKeys, email_domain: impl Into<String>) -> Self {
        SessionStore {
            storage,
            authenticated_key: keys.authenticated.clone(),
            admin_key: keys.admin.clone(),
            email_domain: email_domain.into(),
            user: None,
            is_authenticated: false,
            is_admin: false,
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    /// Display name, `Guest` when nobody is logged in
    pub fn user_name(&self) -> &str {
        self.user.as_ref().map_or("Guest", |u| u.name.as_str())
    }

    pub fn role(&self) -> Role {
        match (self.is_authenticated, self.is_admin) {
            (true, true) => Role::Admin,
            (true, false) => Role::Standard,
            _ => Role::Anonymous,
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            user: self.user.clone(),
            user_name: self.user_name().to_string(),
            is_authenticated: self.is_authenticated,
            is_admin: self.is_admin,
        }
    }

    fn user_for(&self, name: &str, local_part: &str) -> User {
        User {
            name: name.to_string(),
            email: format!("{}@{}", local_part, self.email_domain),
        }
    }

    /// Returns `false` and leaves the session untouched when either
    /// credential is empty.
    pub fn login(&mut self, username: &str, password: &str) -> StorageResult<bool> {
        if username == ADMIN_CREDENTIAL && password == ADMIN_CREDENTIAL {
            self.persist_admin_flags()?;

            self.user = Some(self.user_for("Admin", "admin"));
            self.is_authenticated = true;
            self.is_admin = true;
            log::info!("Admin logged in");
            return Ok(true);
        }

        if username.is_empty() || password.is_empty() {
            log::debug!("Rejected login with empty credentials");
            return Ok(false);
        }

        self.storage.set_item(&self.authenticated_key, FLAG_TRUE)?;
        // A standard login must not inherit an earlier admin flag
        self.storage.remove_item(&self.admin_key)?;

        self.user = Some(self.user_for(username, username));
        self.is_authenticated = true;
        self.is_admin = false;
        log::info!("User {} logged in", username);
        Ok(true)
    }

    /// Write both admin flags, restoring the previous authentication flag
    /// if the second write fails
    fn persist_admin_flags(&self) -> StorageResult<()> {
        let previous = self.storage.get_item(&self.authenticated_key)?;
        self.storage.set_item(&self.authenticated_key, FLAG_TRUE)?;

        if let Err(e) = self.storage.set_item(&self.admin_key, FLAG_TRUE) {
            let undo = match previous.as_deref() {
                Some(value) => self.storage.set_item(&self.authenticated_key, value),
                None => self.storage.remove_item(&self.authenticated_key),
            };
            if let Err(undo_err) = undo {
                log::warn!("Could not restore {}: {}", self.authenticated_key, undo_err);
            }
            return Err(e);
        }
        Ok(())
    }

    pub fn logout(&mut self) -> StorageResult<()> {
        self.storage.remove_item(&self.authenticated_key)?;
        self.storage.remove_item(&self.admin_key)?;

        self.user = None;
        self.is_authenticated = false;
        self.is_admin = false;
        log::info!("Logged out");
        Ok(())
    }

    /// Rehydrate from persisted flags. Only the flags are stored, so the
    /// restored identity is the generic `User` (or `Admin`), not the name
    /// originally used to log in.
    pub fn load_user(&mut self) -> StorageResult<()> {
        let authenticated = self.storage.get_item(&self.authenticated_key)?;
        if authenticated.filter(|v| !v.is_empty()).is_none() {
            return Ok(());
        }

        self.is_authenticated = true;
        self.user = Some(self.user_for("User", "user"));

        if self.storage.get_item(&self.admin_key)?.as_deref() == Some(FLAG_TRUE) {
            self.is_admin = true;
            self.user = Some(self.user_for("Admin", "admin"));
        }

        log::debug!("Restored session as {}", self.user_name());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::db::init_in_memory;

    fn session() -> (SessionStore, LocalStorage) {
        let storage = LocalStorage::new(init_in_memory().unwrap());
        let session = SessionStore::new(storage.clone(), &StorageKeys::default(), "artvue.com");
        (session, storage)
    }

    #[test]
    fn test_starts_anonymous() {
        let (session, _) = session();
        assert_eq!(session.role(), Role::Anonymous);
        assert_eq!(session.user_name(), "Guest");
        assert!(session.user().is_none());
    }

    #[test]
    fn test_admin_login() {
        let (mut session, storage) = session();
        assert!(session.login("admin", "admin").unwrap());

        assert_eq!(session.role(), Role::Admin);
        let user = session.user().unwrap();
        assert_eq!(user.name, "Admin");
        assert_eq!(user.email, "admin@artvue.com");
        assert_eq!(storage.get_item("isAuthenticated").unwrap().as_deref(), Some("true"));
        assert_eq!(storage.get_item("isAdmin").unwrap().as_deref(), Some("true"));
    }

    #[test]
    fn test_standard_login() {
        let (mut session, storage) = session();
        assert!(session.login("alice", "x").unwrap());

        assert_eq!(session.role(), Role::Standard);
        assert!(session.is_authenticated());
        assert!(!session.is_admin());
        assert_eq!(session.user_name(), "alice");
        assert_eq!(session.user().unwrap().email, "alice@artvue.com");
        assert_eq!(storage.get_item("isAdmin").unwrap(), None);
    }

    #[test]
    fn test_admin_user_with_wrong_password_is_standard() {
        let (mut session, _) = session();
        assert!(session.login("admin", "hunter2").unwrap());
        assert_eq!(session.role(), Role::Standard);
        assert_eq!(session.user().unwrap().email, "admin@artvue.com");
    }

    #[test]
    fn test_empty_credentials_rejected() {
        let (mut session, storage) = session();
        assert!(!session.login("", "").unwrap());
        assert!(!session.login("alice", "").unwrap());
        assert!(!session.login("", "secret").unwrap());

        assert_eq!(session.role(), Role::Anonymous);
        assert!(storage.keys().unwrap().is_empty());
    }

    #[test]
    fn test_failed_login_keeps_existing_session() {
        let (mut session, _) = session();
        session.login("alice", "x").unwrap();
        assert!(!session.login("", "").unwrap());
        assert_eq!(session.user_name(), "alice");
    }

    #[test]
    fn test_logout_clears_flags() {
        let (mut session, storage) = session();
        session.login("admin", "admin").unwrap();
        session.logout().unwrap();

        assert_eq!(session.role(), Role::Anonymous);
        assert_eq!(session.user_name(), "Guest");
        assert!(storage.keys().unwrap().is_empty());
    }

    #[test]
    fn test_load_user_restores_generic_identity() {
        let (mut session, storage) = session();
        session.login("alice", "x").unwrap();

        let mut restored = SessionStore::new(storage, &StorageKeys::default(), "artvue.com");
        restored.load_user().unwrap();

        assert_eq!(restored.role(), Role::Standard);
        assert_eq!(restored.user_name(), "User");
        assert_eq!(restored.user().unwrap().email, "user@artvue.com");
    }

    #[test]
    fn test_load_user_restores_admin() {
        let (mut session, storage) = session();
        session.login("admin", "admin").unwrap();

        let mut restored = SessionStore::new(storage, &StorageKeys::default(), "artvue.com");
        restored.load_user().unwrap();

        assert_eq!(restored.role(), Role::Admin);
        assert_eq!(restored.user_name(), "Admin");
    }

    #[test]
    fn test_load_user_without_flags() {
        let (mut session, _) = session();
        session.load_user().unwrap();
        assert_eq!(session.role(), Role::Anonymous);
    }

    #[test]
    fn test_admin_flag_alone_is_ignored() {
        let (mut session, storage) = session();
        storage.set_item("isAdmin", "true").unwrap();
        session.load_user().unwrap();
        assert_eq!(session.role(), Role::Anonymous);
    }

    #[test]
    fn test_empty_auth_flag_is_logged_out() {
        let (mut session, storage) = session();
        storage.set_item("isAuthenticated", "").unwrap();
        session.load_user().unwrap();
        assert_eq!(session.role(), Role::Anonymous);
        assert_eq!(session.user_name(), "Guest");
    }

    #[test]
    fn test_admin_login_rolls_back_on_partial_write() {
        let db = init_in_memory().unwrap();
        let storage = LocalStorage::new(db.clone());
        let mut session = SessionStore::new(storage.clone(), &StorageKeys::default(), "artvue.com");

        db.lock()
            .execute_batch(
                "CREATE TRIGGER block_admin_flag BEFORE INSERT ON local_storage
                 WHEN NEW.key = 'isAdmin'
                 BEGIN SELECT RAISE(ABORT, 'storage is full'); END;",
            )
            .unwrap();

        assert!(session.login("admin", "admin").is_err());
        assert_eq!(session.role(), Role::Anonymous);
        assert!(storage.keys().unwrap().is_empty());

        // An existing standard session keeps its flag
        assert!(session.login("alice", "x").unwrap());
        assert!(session.login("admin", "admin").is_err());
        assert_eq!(session.user_name(), "alice");
        assert_eq!(storage.get_item("isAuthenticated").unwrap().as_deref(), Some("true"));
        assert_eq!(storage.get_item("isAdmin").unwrap(), None);
    }
}
