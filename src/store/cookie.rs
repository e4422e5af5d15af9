//! Durable cookie-like storage.
//!
//! Entries are scoped by domain and path and carry their own absolute
//! expiry, independent of anything the server said. A jar may be backed
//! by a JSON file so the entry survives a process restart; writes flush
//! before returning.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::config::Environment;
use crate::error::StoreError;

/// Scope options supplied with every durable write.
#[derive(Debug, Clone, PartialEq)]
pub struct CookieOptions {
    pub domain: String,
    pub path: String,
    pub max_age: Duration,
}

impl CookieOptions {
    pub fn new(domain: impl Into<String>, path: impl Into<String>, max_age: Duration) -> Self {
        Self { domain: domain.into(), path: path.into(), max_age }
    }

    /// Scope for the `userInfo` entry: environment domain, root path,
    /// one hour of validity.
    pub fn user_info(env: &Environment) -> Self {
        Self::new(env.cookie_domain(), "/", Duration::hours(1))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CookieEntry {
    value: String,
    domain: String,
    path: String,
    /// Absolute expiry, seconds since epoch.
    expires_at: i64,
}

/// A small cookie jar, optionally file-backed.
#[derive(Debug)]
pub struct CookieJar {
    entries: HashMap<String, CookieEntry>,
    backing: Option<PathBuf>,
}

impl CookieJar {
    /// Jar with no backing file; contents vanish with the process.
    pub fn in_memory() -> Self {
        Self { entries: HashMap::new(), backing: None }
    }

    /// Opens (or creates) a jar backed by a JSON file at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = match fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(err) if err.kind() == ErrorKind::NotFound => HashMap::new(),
            Err(err) => return Err(err.into()),
        };
        Ok(Self { entries, backing: Some(path) })
    }

    /// Returns the entry value, unless it has passed its expiry.
    pub fn get(&self, name: &str) -> Option<&str> {
        let entry = self.entries.get(name)?;
        if OffsetDateTime::now_utc().unix_timestamp() < entry.expires_at {
            Some(&entry.value)
        } else {
            None
        }
    }

    pub fn set(&mut self, name: &str, value: &str, options: &CookieOptions) -> Result<(), StoreError> {
        let expires_at = (OffsetDateTime::now_utc() + options.max_age).unix_timestamp();
        self.entries.insert(
            name.to_owned(),
            CookieEntry {
                value: value.to_owned(),
                domain: options.domain.clone(),
                path: options.path.clone(),
                expires_at,
            },
        );
        self.flush()
    }

    /// Removes the entry by name, whatever scope it was written with.
    /// Removing an absent entry is a no-op.
    pub fn remove(&mut self, name: &str) -> Result<(), StoreError> {
        if self.entries.remove(name).is_some() {
            self.flush()?;
        }
        Ok(())
    }

    fn flush(&self) -> Result<(), StoreError> {
        if let Some(path) = &self.backing {
            let bytes = serde_json::to_vec_pretty(&self.entries)?;
            fs::write(path, bytes)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> CookieOptions {
        CookieOptions::new("localhost", "/", Duration::hours(1))
    }

    #[test]
    fn set_then_get() {
        let mut jar = CookieJar::in_memory();
        jar.set("userInfo", "{\"accessToken\":\"t\"}", &options()).unwrap();
        assert_eq!(jar.get("userInfo"), Some("{\"accessToken\":\"t\"}"));
    }

    #[test]
    fn expired_entry_is_invisible() {
        let mut jar = CookieJar::in_memory();
        let stale = CookieOptions::new("localhost", "/", Duration::seconds(-1));
        jar.set("userInfo", "old", &stale).unwrap();
        assert_eq!(jar.get("userInfo"), None);
    }

    #[test]
    fn remove_clears_any_written_scope() {
        let mut jar = CookieJar::in_memory();
        let deployed = CookieOptions::new("board.example.com", "/app", Duration::hours(1));
        jar.set("userInfo", "v", &deployed).unwrap();

        jar.remove("userInfo").unwrap();
        assert!(jar.get("userInfo").is_none());
    }

    #[test]
    fn remove_absent_entry_is_ok() {
        let mut jar = CookieJar::in_memory();
        jar.remove("userInfo").unwrap();
        jar.remove("userInfo").unwrap();
    }

    #[test]
    fn file_backed_jar_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cookies.json");

        let mut jar = CookieJar::open(&path).unwrap();
        jar.set("userInfo", "persisted", &options()).unwrap();
        drop(jar);

        let reopened = CookieJar::open(&path).unwrap();
        assert_eq!(reopened.get("userInfo"), Some("persisted"));
    }

    #[test]
    fn opening_missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let jar = CookieJar::open(dir.path().join("none.json")).unwrap();
        assert_eq!(jar.get("userInfo"), None);
    }
}
