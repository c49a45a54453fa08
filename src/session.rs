//! Sign-in state backed by a [`SessionSlot`].
//!
//! Credentials are checked against a fixed demo table. This is a mock
//! mechanism for the dashboard, not a security boundary.

use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::{Identity, Role};
use crate::storage::SessionSlot;

/// One row of the credential table.
#[derive(Debug, Clone)]
pub struct Account {
    pub identity: Identity,
    pub password: String,
}

/// Fixed lookup table of accounts keyed by email.
#[derive(Debug, Clone, Default)]
pub struct CredentialTable {
    accounts: Vec<Account>,
}

impl CredentialTable {
    pub fn new(accounts: Vec<Account>) -> Self {
        CredentialTable { accounts }
    }

    /// The two demo accounts shown on the sign-in screen.
    pub fn demo() -> Self {
        CredentialTable::new(vec![
            Account {
                identity: Identity {
                    id: Uuid::from_u128(1),
                    name: "Admin User".into(),
                    email: "admin@company.com".into(),
                    role: Role::Admin,
                    department: Some("Management".into()),
                },
                password: "admin123".into(),
            },
            Account {
                identity: Identity {
                    id: Uuid::from_u128(2),
                    name: "John Employee".into(),
                    email: "employee@company.com".into(),
                    role: Role::Employee,
                    department: Some("Engineering".into()),
                },
                password: "employee123".into(),
            },
        ])
    }

    /// Returns the identity for an exact email and password match.
    pub fn verify(&self, email: &str, password: &str) -> Option<&Identity> {
        self.accounts
            .iter()
            .find(|a| a.identity.email == email && a.password == password)
            .map(|a| &a.identity)
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }
}

/// Holds the current identity and mirrors it into the session slot.
#[derive(Debug)]
pub struct SessionStore<S> {
    slot: S,
    credentials: CredentialTable,
    current: Option<Identity>,
}

impl<S: SessionSlot> SessionStore<S> {
    /// Opens the store, restoring whatever identity the slot holds.
    pub fn open(slot: S, credentials: CredentialTable) -> Result<Self> {
        let current = slot.load()?;
        if let Some(identity) = &current {
            info!(email = %identity.email, "restored session");
        }
        Ok(SessionStore {
            slot,
            credentials,
            current,
        })
    }

    /// Signs in with an email and credential.
    ///
    /// On failure the current identity is left untouched.
    pub fn login(&mut self, email: &str, credential: &str) -> Result<Identity> {
        let identity = match self.credentials.verify(email, credential) {
            Some(identity) => identity.clone(),
            None => {
                warn!(email, "rejected sign-in");
                return Err(Error::InvalidCredentials);
            }
        };
        self.slot.save(&identity)?;
        info!(email, role = ?identity.role, "signed in");
        self.current = Some(identity.clone());
        Ok(identity)
    }

    /// Signs out. Calling this while signed out is a no-op.
    pub fn logout(&mut self) -> Result<()> {
        self.slot.clear()?;
        if let Some(identity) = self.current.take() {
            info!(email = %identity.email, "signed out");
        }
        Ok(())
    }

    pub fn current_identity(&self) -> Option<&Identity> {
        self.current.as_ref()
    }

    pub fn credentials(&self) -> &CredentialTable {
        &self.credentials
    }

    pub fn slot(&self) -> &S {
        &self.slot
    }
}
