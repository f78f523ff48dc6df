// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deferred render tasks.

use futures::future::LocalBoxFuture;
use futures::task::{LocalSpawn, SpawnError};

/// Runs deferred render tasks on a later turn of a single-threaded task
/// queue.
///
/// Implemented for every [`LocalSpawn`], so a
/// `futures::executor::LocalSpawner` works out of the box:
///
/// ```rust
/// use core::cell::Cell;
/// use std::rc::Rc;
///
/// use futures::executor::LocalPool;
/// use trellis_element::RenderScheduler;
///
/// let mut pool = LocalPool::new();
/// let ran = Rc::new(Cell::new(false));
/// let flag = ran.clone();
/// pool.spawner()
///     .defer(Box::pin(async move { flag.set(true) }))
///     .unwrap();
///
/// assert!(!ran.get());
/// pool.run_until_stalled();
/// assert!(ran.get());
/// ```
///
/// # Implementing
///
/// `defer` must only queue the task. It is called while the element is
/// borrowed, and the task borrows the element again when it runs, so a
/// scheduler that polls `task` before returning makes the render panic.
pub trait RenderScheduler {
    /// Queues `task` to run after the current synchronous work.
    ///
    /// The task must not be polled before `defer` returns.
    ///
    /// # Errors
    ///
    /// Returns [`SpawnError`] when the queue no longer accepts tasks.
    fn defer(&self, task: LocalBoxFuture<'static, ()>) -> Result<(), SpawnError>;
}

impl<S: LocalSpawn + ?Sized> RenderScheduler for S {
    fn defer(&self, task: LocalBoxFuture<'static, ()>) -> Result<(), SpawnError> {
        self.spawn_local_obj(task.into())
    }
}
