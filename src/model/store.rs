use std::cell::RefCell;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::PathBuf;

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::model::migrate;
use crate::model::widget::WidgetDescriptor;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("layout storage io: {0}")]
    Io(#[from] std::io::Error),
    #[error("layout serialization: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Storage port for the serialized widget list. The engine mirrors state
/// through this trait on every change; tests substitute [`MemoryStore`].
pub trait LayoutStore {
    fn read(&self) -> Result<Option<String>, StoreError>;
    fn write(&self, json: &str) -> Result<(), StoreError>;
    fn clear(&self) -> Result<(), StoreError>;
}

impl<S: LayoutStore + ?Sized> LayoutStore for &S {
    fn read(&self) -> Result<Option<String>, StoreError> { (**self).read() }

    fn write(&self, json: &str) -> Result<(), StoreError> { (**self).write(json) }

    fn clear(&self) -> Result<(), StoreError> { (**self).clear() }
}

/// Single JSON document on disk, by default at `~/.quilt/layout.json`.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn at_default_path() -> Self {
        Self::new(crate::common::config::layout_file())
    }

    pub fn path(&self) -> &PathBuf { &self.path }
}

impl LayoutStore for FileStore {
    fn read(&self) -> Result<Option<String>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let mut buf = String::new();
        File::open(&self.path)?.read_to_string(&mut buf)?;
        Ok(Some(buf))
    }

    fn write(&self, json: &str) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        File::create(&self.path)?.write_all(json.as_bytes())?;
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

/// In-memory fake for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStore {
    slot: RefCell<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(json: impl Into<String>) -> Self {
        Self {
            slot: RefCell::new(Some(json.into())),
        }
    }

    pub fn contents(&self) -> Option<String> { self.slot.borrow().clone() }
}

impl LayoutStore for MemoryStore {
    fn read(&self) -> Result<Option<String>, StoreError> { Ok(self.slot.borrow().clone()) }

    fn write(&self, json: &str) -> Result<(), StoreError> {
        *self.slot.borrow_mut() = Some(json.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        *self.slot.borrow_mut() = None;
        Ok(())
    }
}

/// Loads and migrates the persisted widget list. Any failure degrades to the
/// default widget set; a document that cannot be parsed also wipes storage so
/// the next session starts clean. There is no partial-corruption recovery.
pub fn load_state(store: &impl LayoutStore) -> Vec<WidgetDescriptor> {
    let raw = match store.read() {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!("no persisted layout, starting from the default widget set");
            return WidgetDescriptor::default_set();
        }
        Err(err) => {
            warn!("failed to read persisted layout: {err}");
            return WidgetDescriptor::default_set();
        }
    };

    let migrated = serde_json::from_str::<Value>(&raw)
        .ok()
        .and_then(|doc| migrate::migrate_entries(&doc));
    match migrated {
        Some(entries) => migrate::normalize(entries),
        None => {
            warn!("persisted layout is malformed, resetting to defaults");
            if let Err(err) = store.clear() {
                warn!("failed to clear layout storage: {err}");
            }
            WidgetDescriptor::default_set()
        }
    }
}

/// Mirrors the widget list into the store. Write failures are logged and
/// swallowed; a failed mirror never interrupts a layout operation.
pub fn persist_state(store: &impl LayoutStore, widgets: &[WidgetDescriptor]) {
    match serde_json::to_string(widgets) {
        Ok(json) => {
            if let Err(err) = store.write(&json) {
                warn!("failed to persist layout: {err}");
            }
        }
        Err(err) => warn!("failed to serialize layout: {err}"),
    }
}
