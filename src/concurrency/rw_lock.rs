// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! A shared/exclusive lock that owns the data it guards.
//!
//! Readers share, writers exclude everyone. The bookkeeping is two fields
//! behind a `parking_lot` mutex: how many readers are active and whether a
//! writer is. Waiters park on one condition variable and re-check their
//! predicate every time they wake, so a spurious wakeup costs a loop turn and
//! nothing else.
//!
//! Access only happens through guards. A [`ReadGuard`] hands out `&T`, a
//! [`WriteGuard`] hands out `&mut T`, and both give the lock back when they go
//! out of scope, whether the scope ends normally, through `?`, or by unwinding.
//!
//! The lock is **not reentrant**. A thread that holds a read guard and asks the
//! same lock for a write guard waits for itself forever. Callers keep read and
//! write scopes disjoint.

#![allow(unsafe_code)]

use std::cell::UnsafeCell;
use std::fmt;
use std::ops::{Deref, DerefMut};

use parking_lot::{Condvar, Mutex};

#[derive(Debug, Default)]
struct LockState {
    readers: usize,
    writer: bool,
}

pub struct ReadWriteLock<T> {
    state: Mutex<LockState>,
    released: Condvar,
    data: UnsafeCell<T>,
}

// SAFETY: the lock hands out `&T` to several threads at once (needs `Sync`) and
// `&mut T` to one thread at a time (needs `Send`). Every access to `data` goes
// through a guard whose existence is recorded in `state`.
unsafe impl<T: Send> Send for ReadWriteLock<T> {}
unsafe impl<T: Send + Sync> Sync for ReadWriteLock<T> {}

impl<T> ReadWriteLock<T> {
    pub fn new(data: T) -> Self {
        Self {
            state: Mutex::new(LockState::default()),
            released: Condvar::new(),
            data: UnsafeCell::new(data),
        }
    }

    /// Acquire shared access, waiting while a writer holds the lock.
    pub fn read(&self) -> ReadGuard<'_, T> {
        let mut state = self.state.lock();
        while state.writer {
            self.released.wait(&mut state);
        }
        state.readers += 1;
        ReadGuard { lock: self }
    }

    /// Acquire exclusive access, waiting until no reader or writer holds the lock.
    pub fn write(&self) -> WriteGuard<'_, T> {
        let mut state = self.state.lock();
        while state.writer || state.readers > 0 {
            self.released.wait(&mut state);
        }
        state.writer = true;
        WriteGuard { lock: self }
    }

    /// Number of read guards currently alive.
    pub fn readers(&self) -> usize {
        self.state.lock().readers
    }

    pub fn is_write_locked(&self) -> bool {
        self.state.lock().writer
    }

    /// Direct access when the caller already owns the lock exclusively.
    pub fn get_mut(&mut self) -> &mut T {
        self.data.get_mut()
    }

    pub fn into_inner(self) -> T {
        self.data.into_inner()
    }

    fn release_read(&self) {
        let mut state = self.state.lock();
        debug_assert!(state.readers > 0, "read release without a reader");
        state.readers -= 1;
        if state.readers == 0 {
            self.released.notify_all();
        }
    }

    fn release_write(&self) {
        let mut state = self.state.lock();
        debug_assert!(state.writer, "write release without a writer");
        state.writer = false;
        self.released.notify_all();
    }
}

impl<T: Default> Default for ReadWriteLock<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> fmt::Debug for ReadWriteLock<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("ReadWriteLock")
            .field("readers", &state.readers)
            .field("writer", &state.writer)
            .finish_non_exhaustive()
    }
}

/// Shared access to the data behind a [`ReadWriteLock`].
pub struct ReadGuard<'a, T> {
    lock: &'a ReadWriteLock<T>,
}

impl<T> Deref for ReadGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        // SAFETY: while this guard lives `readers > 0`, so no write guard exists.
        unsafe { &*self.lock.data.get() }
    }
}

impl<T> Drop for ReadGuard<'_, T> {
    fn drop(&mut self) {
        self.lock.release_read();
    }
}

/// Exclusive access to the data behind a [`ReadWriteLock`].
pub struct WriteGuard<'a, T> {
    lock: &'a ReadWriteLock<T>,
}

impl<T> Deref for WriteGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        // SAFETY: while this guard lives `writer` is set and `readers == 0`.
        unsafe { &*self.lock.data.get() }
    }
}

impl<T> DerefMut for WriteGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        // SAFETY: as above, and `&mut self` prevents aliasing through this guard.
        unsafe { &mut *self.lock.data.get() }
    }
}

impl<T> Drop for WriteGuard<'_, T> {
    fn drop(&mut self) {
        self.lock.release_write();
    }
}
