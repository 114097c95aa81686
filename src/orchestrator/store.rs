use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use crate::foundation::error::{SpotlightError, SpotlightResult};
use crate::orchestrator::host::TutorialStateStore;

const KEY_PREFIX: &str = "tutorial_";

/// Storage key for a tutorial, scoped to `user_id` when given.
pub fn state_key(tutorial_id: &str, user_id: Option<&str>) -> String {
    match user_id {
        Some(user) => format!("{KEY_PREFIX}{tutorial_id}_user_{user}"),
        None => format!("{KEY_PREFIX}{tutorial_id}"),
    }
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|e| e.into_inner())
}

/// In-process store; flags live as long as the value.
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    flags: Mutex<HashMap<String, bool>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TutorialStateStore for MemoryStateStore {
    fn is_shown(&self, tutorial_id: &str, user_id: Option<&str>) -> bool {
        lock(&self.flags)
            .get(&state_key(tutorial_id, user_id))
            .copied()
            .unwrap_or(false)
    }

    fn set_shown(
        &self,
        tutorial_id: &str,
        shown: bool,
        user_id: Option<&str>,
    ) -> SpotlightResult<()> {
        lock(&self.flags).insert(state_key(tutorial_id, user_id), shown);
        Ok(())
    }

    fn clear(&self, tutorial_id: &str, user_id: Option<&str>) -> SpotlightResult<()> {
        lock(&self.flags).remove(&state_key(tutorial_id, user_id));
        Ok(())
    }

    fn clear_all(&self) -> SpotlightResult<()> {
        lock(&self.flags).clear();
        Ok(())
    }
}

/// Store backed by a flat JSON object of booleans, rewritten on every change.
#[derive(Debug)]
pub struct JsonFileStateStore {
    path: PathBuf,
    flags: Mutex<BTreeMap<String, bool>>,
}

impl JsonFileStateStore {
    /// Open `path`, starting empty when the file does not exist yet.
    pub fn open(path: impl AsRef<Path>) -> SpotlightResult<Self> {
        let path = path.as_ref().to_path_buf();
        let flags = match std::fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                SpotlightError::serde(format!("parse state file '{}': {e}", path.display()))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(SpotlightError::io(format!(
                    "read state file '{}': {e}",
                    path.display()
                )));
            }
        };
        Ok(Self {
            path,
            flags: Mutex::new(flags),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply `f` to a copy, write it out, and only then keep it in memory.
    fn update(&self, f: impl FnOnce(&mut BTreeMap<String, bool>)) -> SpotlightResult<()> {
        let mut flags = lock(&self.flags);
        let mut next = flags.clone();
        f(&mut next);
        let bytes = serde_json::to_vec_pretty(&next)
            .map_err(|e| SpotlightError::serde(format!("encode state: {e}")))?;
        std::fs::write(&self.path, bytes).map_err(|e| {
            SpotlightError::io(format!("write state file '{}': {e}", self.path.display()))
        })?;
        tracing::debug!(path = %self.path.display(), entries = next.len(), "state file written");
        *flags = next;
        Ok(())
    }
}

impl TutorialStateStore for JsonFileStateStore {
    fn is_shown(&self, tutorial_id: &str, user_id: Option<&str>) -> bool {
        lock(&self.flags)
            .get(&state_key(tutorial_id, user_id))
            .copied()
            .unwrap_or(false)
    }

    fn set_shown(
        &self,
        tutorial_id: &str,
        shown: bool,
        user_id: Option<&str>,
    ) -> SpotlightResult<()> {
        let key = state_key(tutorial_id, user_id);
        self.update(|flags| {
            flags.insert(key, shown);
        })
    }

    fn clear(&self, tutorial_id: &str, user_id: Option<&str>) -> SpotlightResult<()> {
        let key = state_key(tutorial_id, user_id);
        self.update(|flags| {
            flags.remove(&key);
        })
    }

    fn clear_all(&self) -> SpotlightResult<()> {
        self.update(BTreeMap::clear)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/orchestrator/store.rs"]
mod tests;
