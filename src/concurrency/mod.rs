// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Synchronization building blocks.
//!
//! Two primitives, both built on `parking_lot` mutexes and condition variables:
//! - **WorkQueue**: fixed worker pool with a blocking "everything finished" barrier
//! - **ReadWriteLock**: shared/exclusive lock with scoped guards

mod rw_lock;
mod work_queue;

pub use rw_lock::{ReadGuard, ReadWriteLock, WriteGuard};
pub use work_queue::{Spawner, WorkQueue};
