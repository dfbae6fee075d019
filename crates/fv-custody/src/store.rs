//! Per-session custody of opened (plaintext) context files
//!
//! One file per session id under the custody root, written atomically
//! (temp file + rename) with owner-only permissions. An in-process lock
//! registry serializes put/read/close per session; distinct sessions never
//! contend.
//!
//! `is_open` is a pure existence probe: it says a context has been opened
//! for the session, it does not authenticate anyone.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use fv_core::SessionId;

use crate::error::{CustodyError, CustodyResult};

/// File extension for custody files
const CONTEXT_EXT: &str = "ctx";

pub struct SessionStore {
    root: PathBuf,
    locks: Mutex<HashMap<SessionId, Arc<Mutex<()>>>>,
}

impl SessionStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, session: &SessionId) -> PathBuf {
        self.root.join(format!("{session}.{CONTEXT_EXT}"))
    }

    fn lock_for(&self, session: &SessionId) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        locks.entry(session.clone()).or_default().clone()
    }

    /// Materialize plaintext context bytes for a session.
    ///
    /// Writes to a sibling temp file first and renames into place, so a
    /// failure mid-write never leaves a partial custody file behind.
    pub fn put(&self, session: &SessionId, bytes: &[u8]) -> CustodyResult<()> {
        let guard = self.lock_for(session);
        let _held = guard.lock().unwrap_or_else(|e| e.into_inner());

        fs::create_dir_all(&self.root)?;
        let path = self.path_for(session);
        let tmp = self.root.join(format!("{session}.{CONTEXT_EXT}.tmp"));

        let written = write_owner_only(&tmp, bytes).and_then(|()| fs::rename(&tmp, &path));
        if written.is_err() {
            let _ = fs::remove_file(&tmp);
        }
        written?;

        tracing::info!(session = %session, bytes = bytes.len(), "context opened into custody");
        Ok(())
    }

    /// Read the opened context for a session.
    pub fn read(&self, session: &SessionId) -> CustodyResult<Vec<u8>> {
        let guard = self.lock_for(session);
        let _held = guard.lock().unwrap_or_else(|e| e.into_inner());

        let path = self.path_for(session);
        if !path.exists() {
            return Err(CustodyError::ContextNotFound(session.clone()));
        }
        Ok(fs::read(path)?)
    }

    /// Liveness probe: does a custody file exist for this session?
    pub fn is_open(&self, session: &SessionId) -> bool {
        self.path_for(session).is_file()
    }

    /// Delete the custody file if present. Idempotent; must run on logout
    /// and on any unrecoverable error within an opened session.
    pub fn close(&self, session: &SessionId) -> CustodyResult<()> {
        let guard = self.lock_for(session);
        let _held = guard.lock().unwrap_or_else(|e| e.into_inner());

        let path = self.path_for(session);
        match fs::remove_file(&path) {
            Ok(()) => {
                tracing::info!(session = %session, "session custody closed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(unix)]
fn write_owner_only(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::OpenOptionsExt;

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

#[cfg(not(unix))]
fn write_owner_only(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    fs::write(path, bytes)
}
