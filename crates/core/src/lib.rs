// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ntn-core: shared types for the newtron fabric scenario runner.
//!
//! No I/O lives here — IDs, the clock abstraction, the error taxonomy,
//! status/severity rollups, and the `ChangeSet`/`Snapshot`/`DeviceProfile`/
//! `LockToken` value types that every other crate builds on.

pub mod macros;

pub mod changeset;
pub mod clock;
pub mod device_profile;
pub mod error;
pub mod id;
pub mod lock;
pub mod snapshot;
pub mod status;
pub mod time_fmt;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use changeset::{Change, ChangeOp, ChangeSet, ChangeSetBuilder};
pub use clock::{Clock, FakeClock, SystemClock};
pub use device_profile::{BgpNeighborSpec, CredentialSecret, Credentials, DeviceId, DeviceProfile};
pub use error::{
    ConvergenceTimeout, DeviceLocked, HolderMismatch, InfraError, NotLocked, PauseError, StepError,
    ValidationError,
};
pub use id::{short, IdBuf, ID_MAX_LEN};
pub use lock::{HolderId, LockToken};
pub use snapshot::{is_sentinel_only, sentinel_fields, ConfigSnapshot, Snapshot, StateSnapshot, TableRows};
pub use status::{ScenarioStatus, StepStatus, SuiteStatus};
pub use time_fmt::{format_elapsed_ms, format_epoch_ms};
