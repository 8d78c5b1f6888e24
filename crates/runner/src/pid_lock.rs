// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One runner per suite at a time, enforced by an `fs2` advisory flock on
//! `runner.lock`: acquire the lock before truncating or writing anything,
//! so a losing process never clobbers the winner's file.
//!
//! Unlike a bare PID-file scheme, an OS-held flock is released by the
//! kernel the moment the holding process exits for any reason — a crash
//! leaves no stale lock to detect and reclaim.

use crate::error::RunnerError;
use fs2::FileExt;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

pub struct PidLock {
    file: File,
    path: PathBuf,
}

impl PidLock {
    /// Try to acquire the lock at `path`, creating the file and its
    /// parent directory if needed. Fails with `RunnerError::AlreadyRunning`
    /// if another live process holds it.
    pub fn acquire(path: impl Into<PathBuf>, suite: &str) -> Result<Self, RunnerError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| RunnerError::Io { path: parent.to_path_buf(), source })?;
        }
        let mut file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(|source| RunnerError::Io { path: path.clone(), source })?;

        if file.try_lock_exclusive().is_err() {
            let mut existing = String::new();
            let _ = file.read_to_string(&mut existing);
            let pid = existing.trim().parse().unwrap_or(0);
            return Err(RunnerError::AlreadyRunning { suite: suite.to_string(), pid });
        }

        file.set_len(0).map_err(|source| RunnerError::Io { path: path.clone(), source })?;
        writeln!(file, "{}", std::process::id()).map_err(|source| RunnerError::Io { path: path.clone(), source })?;

        Ok(Self { file, path })
    }

    /// Read the PID recorded in `path` without taking the lock, for
    /// commands (`stop`, `status`) that need to know who is running
    /// without contending for ownership themselves.
    pub fn read_pid(path: impl AsRef<Path>) -> Option<u32> {
        let mut text = String::new();
        File::open(path).ok()?.read_to_string(&mut text).ok()?;
        text.trim().parse().ok()
    }
}

impl Drop for PidLock {
    fn drop(&mut self) {
        let _ = fs2::FileExt::unlock(&self.file);
        let _ = std::fs::remove_file(&self.path);
    }
}

#[cfg(test)]
#[path = "pid_lock_tests.rs"]
mod tests;
