//! Session token persistence in the OS keychain, one entry per profile.

#[cfg(test)]
use std::collections::HashMap;
#[cfg(test)]
use std::sync::{Mutex, OnceLock};

use farmhand_core::session::TOKEN_STORAGE_KEY;
use farmhand_core::{Error, Session, SessionToken, TokenStore};
#[cfg(not(test))]
use keyring::Entry;

#[cfg(not(test))]
const KEYRING_SERVICE_NAME: &str = "farmhand-cli";

#[derive(Clone)]
pub struct KeyringTokenStore {
    username: String,
}

impl KeyringTokenStore {
    pub fn new(profile_name: &str) -> Self {
        Self {
            username: format!("{TOKEN_STORAGE_KEY}:{profile_name}"),
        }
    }

    #[cfg(test)]
    fn test_store() -> &'static Mutex<HashMap<String, String>> {
        static STORE: OnceLock<Mutex<HashMap<String, String>>> = OnceLock::new();
        STORE.get_or_init(|| Mutex::new(HashMap::new()))
    }

    #[cfg(not(test))]
    fn entry(&self) -> Result<Entry, Error> {
        Entry::new(KEYRING_SERVICE_NAME, &self.username)
            .map_err(|error| Error::Storage(error.to_string()))
    }
}

impl TokenStore for KeyringTokenStore {
    #[cfg(not(test))]
    fn load_token(&self) -> Result<Option<SessionToken>, Error> {
        match self.entry()?.get_password() {
            Ok(raw) => SessionToken::new(raw).map(Some),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(error) => Err(Error::Storage(error.to_string())),
        }
    }

    #[cfg(test)]
    fn load_token(&self) -> Result<Option<SessionToken>, Error> {
        let guard = Self::test_store()
            .lock()
            .map_err(|error| Error::Storage(error.to_string()))?;
        guard
            .get(&self.username)
            .map(|raw| SessionToken::new(raw.as_str()))
            .transpose()
    }

    #[cfg(not(test))]
    fn save_token(&self, token: &SessionToken) -> Result<(), Error> {
        self.entry()?
            .set_password(token.expose())
            .map_err(|error| Error::Storage(error.to_string()))
    }

    #[cfg(test)]
    fn save_token(&self, token: &SessionToken) -> Result<(), Error> {
        let mut guard = Self::test_store()
            .lock()
            .map_err(|error| Error::Storage(error.to_string()))?;
        guard.insert(self.username.clone(), token.expose().to_string());
        Ok(())
    }

    #[cfg(not(test))]
    fn clear_token(&self) -> Result<(), Error> {
        match self.entry()?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(error) => Err(Error::Storage(error.to_string())),
        }
    }

    #[cfg(test)]
    fn clear_token(&self) -> Result<(), Error> {
        let mut guard = Self::test_store()
            .lock()
            .map_err(|error| Error::Storage(error.to_string()))?;
        guard.remove(&self.username);
        Ok(())
    }
}

/// Session for `profile_name`, restored from the keychain.
pub fn profile_session(profile_name: &str) -> Result<Session, Error> {
    Session::restore(KeyringTokenStore::new(profile_name))
}
