// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors a device handle can raise, composed from the shared lock/infra
//! taxonomy in `ntn-core` plus a transport wrapper over the store client.

use ntn_core::{DeviceLocked, HolderMismatch, InfraError, NotLocked, ValidationError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeviceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Infra(#[from] InfraError),
    #[error(transparent)]
    Locked(#[from] DeviceLocked),
    #[error(transparent)]
    NotLocked(#[from] NotLocked),
    #[error(transparent)]
    HolderMismatch(#[from] HolderMismatch),
    #[error("store error: {0}")]
    Store(#[from] ntn_store::StoreError),
}

impl From<ntn_store::lock_ops::ReleaseError> for DeviceError {
    fn from(e: ntn_store::lock_ops::ReleaseError) -> Self {
        match e {
            ntn_store::lock_ops::ReleaseError::NotLocked(err) => DeviceError::NotLocked(err),
            ntn_store::lock_ops::ReleaseError::HolderMismatch(err) => DeviceError::HolderMismatch(err),
            ntn_store::lock_ops::ReleaseError::Store(err) => DeviceError::Store(err),
        }
    }
}
