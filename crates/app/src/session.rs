//! # Session Store
//!
//! Keeps the authenticated user in memory and mirrors it to durable storage
//! under a single key, so a session survives restarts until an explicit
//! logout.
//!
//! Hydration never fails: a missing, unreadable or corrupt entry is treated
//! as "logged out".

use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;

use slotbook_core::{errors::BookingResult, models::user::User};
use tracing::{info, warn};

/// Durable storage for the serialized current user.
pub trait SessionStorage {
    /// Returns the stored value, `None` when nothing is stored.
    fn load(&self) -> io::Result<Option<String>>;

    fn save(&self, value: &str) -> io::Result<()>;

    /// Removes the stored value; removing a missing value is not an error.
    fn remove(&self) -> io::Result<()>;
}

/// Stores the session as a JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SessionStorage for FileStorage {
    fn load(&self) -> io::Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn save(&self, value: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, value)
    }

    fn remove(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}

/// In-memory storage. Clones share the same slot, which lets tests inspect
/// what was written and simulate a restart.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slot: Rc<RefCell<Option<String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            slot: Rc::new(RefCell::new(Some(value.into()))),
        }
    }

    pub fn value(&self) -> Option<String> {
        self.slot.borrow().clone()
    }
}

impl SessionStorage for MemoryStorage {
    fn load(&self) -> io::Result<Option<String>> {
        Ok(self.value())
    }

    fn save(&self, value: &str) -> io::Result<()> {
        *self.slot.borrow_mut() = Some(value.to_string());
        Ok(())
    }

    fn remove(&self) -> io::Result<()> {
        *self.slot.borrow_mut() = None;
        Ok(())
    }
}

/// The current user, passed explicitly to whoever needs it.
#[derive(Debug)]
pub struct SessionStore<S: SessionStorage> {
    storage: S,
    current: Option<User>,
}

impl<S: SessionStorage> SessionStore<S> {
    /// Opens the store and hydrates it from `storage`.
    pub fn open(storage: S) -> Self {
        let current = hydrate(&storage);
        Self { storage, current }
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.current.is_some()
    }

    /// Records `user` in memory and writes it through to storage.
    pub fn set_user(&mut self, user: User) -> BookingResult<()> {
        let serialized = serde_json::to_string(&user).map_err(io::Error::other)?;
        info!("Session started for user {}", user.id);
        self.current = Some(user);
        self.storage.save(&serialized)?;
        Ok(())
    }

    /// Clears memory and storage.
    pub fn logout(&mut self) -> BookingResult<()> {
        if let Some(user) = self.current.take() {
            info!("Session ended for user {}", user.id);
        }
        self.storage.remove()?;
        Ok(())
    }
}

fn hydrate<S: SessionStorage>(storage: &S) -> Option<User> {
    let raw = match storage.load() {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            warn!("Could not read stored session, starting logged out: {}", e);
            return None;
        }
    };

    match serde_json::from_str::<User>(&raw) {
        Ok(user) => Some(user),
        Err(e) => {
            warn!("Stored session is corrupt, starting logged out: {}", e);
            None
        }
    }
}
