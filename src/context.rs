// File: ./src/context.rs
/*! Application context abstraction for filesystem paths.

`AppContext` encapsulates how the application finds its data, config and
cache directories. Two implementations are provided:

- `StandardContext`: uses `directories::ProjectDirs`, or an override root
  (the `--root` CLI flag).
- `TestContext`: a unique temporary directory, removed when dropped.

Nothing here reads environment variables or global state. Code that performs
filesystem IO receives an explicit `&dyn AppContext` or `Arc<dyn AppContext>`.
*/

use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::path::PathBuf;

pub const EVENTS_FILENAME: &str = "events.json";
pub const COURSE_COLORS_FILENAME: &str = "course_colors.json";

/// Defines the file system context for the application.
///
/// The trait is object-safe so callers can hold `Arc<dyn AppContext>`.
pub trait AppContext: Send + Sync + std::fmt::Debug {
    fn get_data_dir(&self) -> Result<PathBuf>;
    fn get_config_dir(&self) -> Result<PathBuf>;
    fn get_cache_dir(&self) -> Result<PathBuf>;

    fn get_config_file_path(&self) -> Result<PathBuf> {
        Ok(self.get_config_dir()?.join("config.toml"))
    }

    fn get_events_path(&self) -> Result<PathBuf> {
        Ok(self.get_data_dir()?.join(EVENTS_FILENAME))
    }

    fn get_course_colors_path(&self) -> Result<PathBuf> {
        Ok(self.get_data_dir()?.join(COURSE_COLORS_FILENAME))
    }

    fn get_log_path(&self) -> Result<PathBuf> {
        Ok(self.get_cache_dir()?.join("coursecal.log"))
    }
}

// --- Production Implementation ---

#[derive(Clone, Debug)]
pub struct StandardContext {
    override_root: Option<PathBuf>,
}

impl StandardContext {
    /// When `override_root` is `Some(path)`, all directories are created
    /// under that root as `data`, `config` and `cache`.
    pub fn new(override_root: Option<PathBuf>) -> Self {
        Self { override_root }
    }

    fn ensure_exists(path: PathBuf) -> Result<PathBuf> {
        if !path.exists() {
            std::fs::create_dir_all(&path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(path)
    }

    fn get_proj_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("org", "coursecal", "coursecal")
    }

    fn resolve(&self, sub: &str) -> Result<PathBuf> {
        if let Some(root) = &self.override_root {
            return Self::ensure_exists(root.join(sub));
        }
        let proj = Self::get_proj_dirs().ok_or_else(|| anyhow::anyhow!("No home directory"))?;
        let dir = match sub {
            "data" => proj.data_dir(),
            "config" => proj.config_dir(),
            _ => proj.cache_dir(),
        };
        Self::ensure_exists(dir.to_path_buf())
    }
}

impl AppContext for StandardContext {
    fn get_data_dir(&self) -> Result<PathBuf> {
        self.resolve("data")
    }

    fn get_config_dir(&self) -> Result<PathBuf> {
        self.resolve("config")
    }

    fn get_cache_dir(&self) -> Result<PathBuf> {
        self.resolve("cache")
    }
}

// --- Test Implementation ---

#[derive(Clone, Debug)]
pub struct TestContext {
    pub root: PathBuf,
}

impl TestContext {
    /// Creates a new TestContext backed by a unique temporary directory.
    ///
    /// # Panics
    /// If the temporary directory cannot be created.
    pub fn new() -> Self {
        let uuid = uuid::Uuid::new_v4();
        let root = std::env::temp_dir().join(format!("coursecal_test_{}", uuid));
        std::fs::create_dir_all(&root).expect("failed to create TestContext temp dir");
        Self { root }
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl AppContext for TestContext {
    fn get_data_dir(&self) -> Result<PathBuf> {
        let p = self.root.join("data");
        std::fs::create_dir_all(&p)?;
        Ok(p)
    }

    fn get_config_dir(&self) -> Result<PathBuf> {
        let p = self.root.join("config");
        std::fs::create_dir_all(&p)?;
        Ok(p)
    }

    fn get_cache_dir(&self) -> Result<PathBuf> {
        let p = self.root.join("cache");
        std::fs::create_dir_all(&p)?;
        Ok(p)
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        // Best-effort cleanup; ignore errors.
        let _ = std::fs::remove_dir_all(&self.root);
    }
}
