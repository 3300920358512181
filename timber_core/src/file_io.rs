//! # File I/O Module
//!
//! Project files, input files and price-list exports:
//! - **Atomic writes**: write to `.tmp`, fsync, rename
//! - **File locking**: one editor per project file on a shared drive
//! - **Version validation**: refuse files from a newer schema
//!
//! ## File Format
//!
//! Projects are saved as `.tmb` files containing JSON. Lock files use the
//! `.tmb.lock` extension and name who holds the lock.
//!
//! ## Example
//!
//! ```rust,no_run
//! use timber_core::file_io::{save_project, load_project, FileLock};
//! use timber_core::project::Project;
//! use std::path::Path;
//!
//! let project = Project::new("Friggebod", "Anna Berg");
//! let path = Path::new("friggebod.tmb");
//!
//! let lock = FileLock::acquire(path, "anna")?;
//! save_project(&project, path)?;
//! drop(lock);
//!
//! let loaded = load_project(path)?;
//! assert_eq!(loaded.meta.name, "Friggebod");
//! # Ok::<(), timber_core::errors::CalcError>(())
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::building::BuildingInputs;
use crate::errors::{CalcError, CalcResult};
use crate::price_list::{parse_price_list, EconomySettings, PriceListSource};
use crate::project::{Project, SCHEMA_VERSION};

/// Project file extension
pub const PROJECT_EXTENSION: &str = "tmb";

/// Locks older than this are taken over regardless of their owner
const LOCK_MAX_AGE_HOURS: i64 = 24;

// ============================================================================
// Locking
// ============================================================================

/// Contents of a `.lock` sidecar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockInfo {
    pub user_id: String,
    pub machine: String,
    pub pid: u32,
    pub locked_at: DateTime<Utc>,
}

impl LockInfo {
    pub fn new(user_id: impl Into<String>) -> Self {
        LockInfo {
            user_id: user_id.into(),
            machine: hostname().unwrap_or_else(|| "unknown".to_string()),
            pid: std::process::id(),
            locked_at: Utc::now(),
        }
    }

    /// Owner process is gone, or the lock has outlived its maximum age
    pub fn is_stale(&self) -> bool {
        if Utc::now() - self.locked_at > Duration::hours(LOCK_MAX_AGE_HOURS) {
            return true;
        }
        match hostname() {
            Some(machine) if machine == self.machine => !process_alive(self.pid),
            _ => false,
        }
    }
}

fn hostname() -> Option<String> {
    #[cfg(windows)]
    {
        std::env::var("COMPUTERNAME").ok()
    }
    #[cfg(not(windows))]
    {
        std::env::var("HOSTNAME")
            .ok()
            .or_else(|| std::env::var("HOST").ok())
    }
}

#[cfg(unix)]
fn process_alive(pid: u32) -> bool {
    Path::new(&format!("/proc/{}", pid)).exists()
}

#[cfg(windows)]
fn process_alive(pid: u32) -> bool {
    use std::process::Command;
    Command::new("tasklist")
        .args(["/FI", &format!("PID eq {}", pid), "/NH"])
        .output()
        .map(|out| String::from_utf8_lossy(&out.stdout).contains(&pid.to_string()))
        .unwrap_or(true)
}

#[cfg(not(any(unix, windows)))]
fn process_alive(_pid: u32) -> bool {
    true
}

/// Advisory lock on a project file, released on drop.
///
/// Holds an OS-level exclusive lock (fs2) on the sidecar and writes
/// [`LockInfo`] into it so other users can see who is editing.
pub struct FileLock {
    project_path: PathBuf,
    lock_path: PathBuf,
    _lock_file: File,
    pub info: LockInfo,
}

impl FileLock {
    /// Acquire the lock, or fail with [`CalcError::FileLocked`] when someone
    /// else holds a live one.
    pub fn acquire(path: &Path, user_id: impl Into<String>) -> CalcResult<Self> {
        let lock_path = lock_path_for(path);
        let shown = path.display().to_string();

        if let Some(existing) = read_lock_info(&lock_path) {
            if !existing.is_stale() {
                return Err(CalcError::file_locked(
                    shown,
                    format!("{} ({})", existing.user_id, existing.machine),
                    existing.locked_at.to_rfc3339(),
                ));
            }
            tracing::warn!(
                path = %shown,
                owner = %existing.user_id,
                "taking over stale project lock"
            );
        }

        let mut lock_file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&lock_path)
            .map_err(|e| CalcError::file_error("create lock", lock_path.display().to_string(), e.to_string()))?;

        lock_file
            .try_lock_exclusive()
            .map_err(|_| CalcError::file_locked(shown.clone(), "another process", "unknown"))?;

        let info = LockInfo::new(user_id);
        let json = serde_json::to_string_pretty(&info)?;
        lock_file
            .write_all(json.as_bytes())
            .and_then(|_| lock_file.sync_all())
            .map_err(|e| CalcError::file_error("write lock", lock_path.display().to_string(), e.to_string()))?;

        tracing::debug!(path = %shown, user = %info.user_id, "project lock acquired");
        Ok(FileLock {
            project_path: path.to_path_buf(),
            lock_path,
            _lock_file: lock_file,
            info,
        })
    }

    /// Current live lock on `path`, if any
    pub fn check(path: &Path) -> Option<LockInfo> {
        read_lock_info(&lock_path_for(path)).filter(|info| !info.is_stale())
    }

    pub fn project_path(&self) -> &Path {
        &self.project_path
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.lock_path);
    }
}

/// `project.tmb` → `project.tmb.lock`
fn lock_path_for(project_path: &Path) -> PathBuf {
    let mut lock_path = project_path.to_path_buf();
    let extension = lock_path
        .extension()
        .map(|e| format!("{}.lock", e.to_string_lossy()))
        .unwrap_or_else(|| "lock".to_string());
    lock_path.set_extension(extension);
    lock_path
}

/// Unreadable or malformed sidecars count as no lock
fn read_lock_info(lock_path: &Path) -> Option<LockInfo> {
    let contents = fs::read_to_string(lock_path).ok()?;
    serde_json::from_str(&contents).ok()
}

// ============================================================================
// Atomic Writes
// ============================================================================

/// Write `bytes` to `path` through a synced temporary file and a rename.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> CalcResult<()> {
    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    let write = || -> std::io::Result<()> {
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(bytes)?;
        tmp_file.sync_all()
    };
    write().map_err(|e| CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string()))?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })
}

fn read_text(path: &Path) -> CalcResult<String> {
    fs::read_to_string(path).map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> CalcResult<T> {
    let contents = read_text(path)?;
    serde_json::from_str(&contents)
        .map_err(|e| CalcError::serialization(format!("Invalid JSON in {}: {}", path.display(), e)))
}

// ============================================================================
// Projects
// ============================================================================

/// Save a project atomically.
pub fn save_project(project: &Project, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(project)?;
    write_atomic(path, json.as_bytes())?;
    tracing::info!(path = %path.display(), "project saved");
    Ok(())
}

/// Load a project and check its schema version.
///
/// # Returns
///
/// * `Err(CalcError::VersionMismatch)` - written by a newer schema
/// * `Err(CalcError::SerializationError)` - invalid JSON
/// * `Err(CalcError::FileError)` - I/O error
pub fn load_project(path: &Path) -> CalcResult<Project> {
    let project: Project = read_json(path)?;
    validate_version(&project.meta.version)?;
    tracing::info!(path = %path.display(), name = %project.meta.name, "project loaded");
    Ok(project)
}

/// Load a project together with the live lock on it, if any.
pub fn load_project_with_lock_check(path: &Path) -> CalcResult<(Project, Option<LockInfo>)> {
    let project = load_project(path)?;
    Ok((project, FileLock::check(path)))
}

/// Same major version, and for 0.x no newer minor version.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let parse = |v: &str| -> Vec<u32> { v.split('.').filter_map(|p| p.parse().ok()).collect() };
    let file = parse(file_version);
    let current = parse(SCHEMA_VERSION);

    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let (Some(&file_major), Some(&current_major)) = (file.first(), current.first()) else {
        return Err(mismatch());
    };
    if file_major != current_major {
        return Err(mismatch());
    }
    if current_major == 0 {
        if let (Some(&file_minor), Some(&current_minor)) = (file.get(1), current.get(1)) {
            if file_minor > current_minor {
                return Err(mismatch());
            }
        }
    }
    Ok(())
}

// ============================================================================
// Inputs and Price Lists
// ============================================================================

/// Read `BuildingInputs` from a JSON file.
pub fn load_inputs(path: &Path) -> CalcResult<BuildingInputs> {
    read_json(path)
}

/// Read an economy settings JSON file
pub fn load_economy(path: &Path) -> CalcResult<EconomySettings> {
    read_json(path)
}

/// Read a price-list export (see [`parse_price_list`]).
pub fn load_price_list(path: &Path) -> CalcResult<PriceListSource> {
    let source = parse_price_list(&read_text(path)?)?;
    tracing::info!(
        path = %path.display(),
        entries = source.entries.len(),
        economy = source.economy.is_some(),
        "price list loaded"
    );
    Ok(source)
}
