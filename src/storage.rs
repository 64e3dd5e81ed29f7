// Manages the on-disk key-value blobs: `events` and `courseColors`.
//
// Each namespace is one JSON file in the data directory. Both are read once at
// startup and fully rewritten (never patched) after every mutation.
use crate::color_utils::CourseColors;
use crate::context::AppContext;
use crate::model::Event;
use anyhow::{Context, Result};
use fs2::FileExt;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Date key -> events in insertion order.
pub type EventMap = BTreeMap<String, Vec<Event>>;

pub struct LocalStorage;

impl LocalStorage {
    /// Helper to get a sidecar lock file path
    fn get_lock_path(file_path: &Path) -> PathBuf {
        let mut lock_path = file_path.to_path_buf();
        if let Some(ext) = lock_path.extension() {
            let mut new_ext = ext.to_os_string();
            new_ext.push(".lock");
            lock_path.set_extension(new_ext);
        } else {
            lock_path.set_extension("lock");
        }
        lock_path
    }

    /// Runs `f` while holding an exclusive advisory lock on `file_path`'s sidecar.
    fn with_lock<F, T>(file_path: &Path, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        let lock_path = Self::get_lock_path(file_path);
        let file = fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .with_context(|| format!("Failed to open lock file {:?}", lock_path))?;

        file.lock_exclusive()?;
        let result = f();
        file.unlock()?;
        result
    }

    /// Atomic write: Write to .tmp file then rename
    fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> Result<()> {
        let path = path.as_ref();
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(tmp_path, path)?;
        Ok(())
    }

    /// Reads a JSON blob. A missing file yields `T::default()`.
    ///
    /// A file that exists but does not parse is copied aside to
    /// `<name>.corrupt` and also yields the default, so the next save starts
    /// from an empty mapping without destroying the original bytes.
    fn load_json<T: DeserializeOwned + Default>(path: &Path) -> Result<T> {
        if !path.exists() {
            return Ok(T::default());
        }

        Self::with_lock(path, || {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {:?}", path))?;

            match serde_json::from_str::<T>(&json) {
                Ok(value) => Ok(value),
                Err(e) => {
                    let backup = Self::corrupt_backup_path(path);
                    log::warn!(
                        "{:?} is not valid JSON ({}); starting empty, original kept at {:?}",
                        path,
                        e,
                        backup
                    );
                    fs::copy(path, &backup)
                        .with_context(|| format!("Failed to back up {:?}", path))?;
                    Ok(T::default())
                }
            }
        })
    }

    fn save_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
        Self::with_lock(path, || {
            let json = serde_json::to_string_pretty(value)?;
            Self::atomic_write(path, json)?;
            Ok(())
        })
        .with_context(|| format!("Failed to save {:?}", path))
    }

    pub fn corrupt_backup_path(path: &Path) -> PathBuf {
        let mut name = path.as_os_str().to_os_string();
        name.push(".corrupt");
        PathBuf::from(name)
    }

    pub fn load_events(ctx: &dyn AppContext) -> Result<EventMap> {
        let path = ctx.get_events_path()?;
        let events: EventMap = Self::load_json(&path)?;
        log::info!(
            "Loaded {} event(s) across {} day(s) from {:?}",
            events.values().map(Vec::len).sum::<usize>(),
            events.len(),
            path
        );
        Ok(events)
    }

    pub fn save_events(ctx: &dyn AppContext, events: &EventMap) -> Result<()> {
        let path = ctx.get_events_path()?;
        Self::save_json(&path, events)?;
        log::debug!("Saved {} day(s) to {:?}", events.len(), path);
        Ok(())
    }

    /// Persisted assignments only; callers layer these over the presets.
    pub fn load_course_colors(ctx: &dyn AppContext) -> Result<CourseColors> {
        let path = ctx.get_course_colors_path()?;
        Self::load_json(&path)
    }

    pub fn save_course_colors(ctx: &dyn AppContext, colors: &CourseColors) -> Result<()> {
        let path = ctx.get_course_colors_path()?;
        Self::save_json(&path, colors)
    }
}
