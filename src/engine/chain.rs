// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Sequential, trigger-gated task chain.
//!
//! A [`TaskChain`] runs its entries strictly in insertion order on the thread
//! that calls `execute()`. Each entry is a task plus an optional [`Trigger`]:
//! after the task runs, the chain waits on the trigger (bounded by that
//! trigger's own timeout) before moving on. Something else (another thread, a
//! later-completing task, an external stimulus) is expected to signal it.
//!
//! # Transition rules
//!
//! ```text
//! execute()
//!   ├─► state = Executing, notify handle
//!   ├─► for each entry, in order:
//!   │     ├─ task.execute()  ── Err / panic ─► Failed, on_task_failed, stop
//!   │     ├─ no trigger      ─► executed += 1
//!   │     └─ trigger.wait()  ── elapsed ─────► Timeout, on_task_timeout, stop
//!   │                        └─ fired ───────► executed += 1
//!   ├─► all drained ─► Finished, on_task_completed
//!   └─► notify handle with the final state
//! ```
//!
//! Observers (the state handle, hooks and subscribers) are caller code: a panic
//! in one is logged and does not keep the chain from settling.
//!
//! The chain is fail-fast: nothing is retried, rolled back or compensated.
//! Retrying means building and running a fresh chain.
//!
//! Entries can only be added through `&mut self` while `execute` takes `&self`,
//! so the queue cannot change while a run is in progress.
//!
//! # Example
//! ```rust
//! use std::sync::Arc;
//! use std::thread;
//! use std::time::Duration;
//! use the_switchboard::engine::TaskChain;
//! use the_switchboard::sync::Trigger;
//! use the_switchboard::tasks::{FnTask, TaskState};
//! use the_switchboard::traits::Task;
//!
//! let reply = Arc::new(Trigger::with_timeout(Duration::from_secs(5)));
//! let signaler = Arc::clone(&reply);
//!
//! let mut chain = TaskChain::new("handshake");
//! chain
//!     .add_task(
//!         Arc::new(FnTask::new("send", move |_| {
//!             let signaler = Arc::clone(&signaler);
//!             thread::spawn(move || signaler.trigger());
//!             Ok(())
//!         })),
//!         Some(reply),
//!     )
//!     .add_task(Arc::new(FnTask::new("ack", |_| Ok(()))), None);
//!
//! chain.execute().unwrap();
//! assert_eq!(chain.state(), TaskState::Finished);
//! assert_eq!(chain.executed_count(), 2);
//! ```

use parking_lot::Mutex;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::engine::hooks::{ChainHooks, NoHooks};
use crate::errors::{panic_message, TaskError};
use crate::events::{EventEmitter, Subscription};
use crate::observability::messages::{chain::*, StructuredLog};
use crate::store::TypedStore;
use crate::sync::Trigger;
use crate::tasks::{TaskCore, TaskState};
use crate::traits::Task;

/// One position in a chain: a shared task and the trigger gating the next entry.
#[derive(Clone)]
pub struct ChainEntry {
    pub task: Arc<dyn Task>,
    pub trigger: Option<Arc<Trigger>>,
}

impl std::fmt::Debug for ChainEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainEntry")
            .field("task", &self.task.name())
            .field("trigger", &self.trigger)
            .finish()
    }
}

/// Progress broadcast to [`TaskChain::subscribe`] observers.
#[derive(Debug, Clone)]
pub enum ChainEvent {
    Started { entries: usize },
    EntryCompleted { entry: usize, task: String },
    Finished { executed: usize },
    Failed { entry: usize, failure: TaskError },
    TimedOut { entry: usize },
}

/// Single observer called with the state at the start and at the end of a run.
pub type StateHandle = Box<dyn Fn(TaskState) + Send + Sync>;

/// Why a run stopped early.
enum Abort {
    Failed { entry: usize, failure: TaskError },
    TimedOut { entry: usize, timeout: Option<Duration> },
}

pub struct TaskChain<H = NoHooks> {
    core: TaskCore,
    entries: Vec<ChainEntry>,
    executed: AtomicUsize,
    handle: Option<StateHandle>,
    hooks: H,
    events: Mutex<EventEmitter<ChainEvent>>,
}

impl TaskChain<NoHooks> {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_hooks(name, NoHooks)
    }
}

impl<H: ChainHooks> TaskChain<H> {
    /// A chain whose terminal outcomes are reported to `hooks`.
    pub fn with_hooks(name: impl Into<String>, hooks: H) -> Self {
        Self {
            core: TaskCore::new(name),
            entries: Vec::new(),
            executed: AtomicUsize::new(0),
            handle: None,
            hooks,
            events: Mutex::new(EventEmitter::new()),
        }
    }

    /// Fire `trigger` when this chain finishes, so it can gate an outer chain's entry.
    pub fn with_completion(mut self, trigger: Arc<Trigger>) -> Self {
        self.core = self.core.with_completion(trigger);
        self
    }

    /// Append `task`; with a trigger, the chain waits for it before the next entry.
    pub fn add_task(
        &mut self,
        task: Arc<dyn Task>,
        trigger: Option<Arc<Trigger>>,
    ) -> &mut Self {
        self.entries.push(ChainEntry { task, trigger });
        self
    }

    /// Register the state-change observer, replacing any previous one.
    pub fn set_handle<F>(&mut self, handle: F) -> &mut Self
    where
        F: Fn(TaskState) + Send + Sync + 'static,
    {
        self.handle = Some(Box::new(handle));
        self
    }

    /// Observe chain progress while the returned handle is held.
    ///
    /// Callbacks run on the executing thread while the chain's emitter lock is
    /// held; they must not subscribe to the same chain.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: FnMut(&ChainEvent) + Send + 'static,
    {
        self.events.lock().register(callback)
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    pub fn entries(&self) -> &[ChainEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries whose task ran and whose trigger (if any) fired.
    pub fn executed_count(&self) -> usize {
        self.executed.load(Ordering::SeqCst)
    }

    /// Run caller-supplied observer code; a panic is logged and swallowed so the
    /// run still settles into a terminal state.
    fn guarded(&self, observer: &str, call: impl FnOnce()) {
        if let Err(payload) = catch_unwind(AssertUnwindSafe(call)) {
            ObserverPanicked {
                chain: self.core.name(),
                observer,
                message: &panic_message(payload.as_ref()),
            }
            .log();
        }
    }

    fn notify(&self, state: TaskState) {
        if let Some(handle) = &self.handle {
            self.guarded("state handle", || handle(state));
        }
    }

    fn emit(&self, event: ChainEvent) {
        self.events.lock().emit(&event);
    }

    fn run_entries(&self) -> Result<(), Abort> {
        for (index, entry) in self.entries.iter().enumerate() {
            let ran = catch_unwind(AssertUnwindSafe(|| entry.task.execute()))
                .unwrap_or_else(|payload| Err(TaskError::from_panic(entry.task.name(), payload)));
            if let Err(failure) = ran {
                return Err(Abort::Failed {
                    entry: index,
                    failure,
                });
            }

            if let Some(trigger) = &entry.trigger {
                if !trigger.wait() {
                    return Err(Abort::TimedOut {
                        entry: index,
                        timeout: trigger.timeout(),
                    });
                }
            }

            self.executed.fetch_add(1, Ordering::SeqCst);
            ChainEntryCompleted {
                chain: self.core.name(),
                entry: index,
                task: entry.task.name(),
                waited_on_trigger: entry.trigger.is_some(),
            }
            .log();
            self.emit(ChainEvent::EntryCompleted {
                entry: index,
                task: entry.task.name().to_string(),
            });
        }
        Ok(())
    }

    /// Each entry's result, keyed by task name; entries without a result are skipped
    /// and a repeated name keeps the later entry's result.
    fn collect_results(&self) -> Result<TypedStore, Abort> {
        let mut results = TypedStore::new();
        for entry in &self.entries {
            if let Some(result) = entry.task.get(Duration::ZERO) {
                results
                    .set(entry.task.name().to_string(), result)
                    .map_err(|e| Abort::Failed {
                        entry: self.entries.len(),
                        failure: TaskError::failed(self.core.name(), e.into()),
                    })?;
            }
        }
        Ok(results)
    }
}

impl<H: ChainHooks> Task for TaskChain<H> {
    fn name(&self) -> &str {
        self.core.name()
    }

    /// Run every entry; see the module docs for the transition rules.
    ///
    /// `Err` carries the failure of a `Failed` run, or [`TaskError::TimedOut`]
    /// for a `Timeout` run so that an enclosing chain stops too.
    fn execute(&self) -> Result<(), TaskError> {
        self.core.begin()?;

        let start_msg = ChainStarted {
            chain: self.core.name(),
            entry_count: self.entries.len(),
        };
        let span = start_msg.span("chain_execution");
        let _guard = span.enter();
        start_msg.log();

        let start_time = Instant::now();
        self.notify(TaskState::Executing);
        self.emit(ChainEvent::Started {
            entries: self.entries.len(),
        });

        let outcome = match self.run_entries().and_then(|()| self.collect_results()) {
            Ok(results) => {
                self.core.finish(results);
                self.guarded("on_task_completed", || self.hooks.on_task_completed());
                ChainFinished {
                    chain: self.core.name(),
                    executed: self.executed_count(),
                    duration: start_time.elapsed(),
                }
                .log();
                self.emit(ChainEvent::Finished {
                    executed: self.executed_count(),
                });
                Ok(())
            }
            Err(Abort::Failed { entry, failure }) => {
                self.core.fail(failure.clone());
                self.guarded("on_task_failed", || self.hooks.on_task_failed(entry, &failure));
                ChainFailed {
                    chain: self.core.name(),
                    entry,
                    error: &failure,
                }
                .log();
                self.emit(ChainEvent::Failed {
                    entry,
                    failure: failure.clone(),
                });
                Err(failure)
            }
            Err(Abort::TimedOut { entry, timeout }) => {
                self.core.time_out();
                self.guarded("on_task_timeout", || self.hooks.on_task_timeout(entry));
                ChainTimedOut {
                    chain: self.core.name(),
                    entry,
                    timeout,
                }
                .log();
                self.emit(ChainEvent::TimedOut { entry });
                Err(TaskError::TimedOut {
                    task: self.core.name().to_string(),
                    entry,
                })
            }
        };

        self.notify(self.core.state());
        outcome
    }

    fn state(&self) -> TaskState {
        self.core.state()
    }

    fn failure(&self) -> Option<TaskError> {
        self.core.failure()
    }

    /// Once `Finished`, a store mapping each entry's task name to its `Arc<TypedStore>` result.
    fn get(&self, timeout: Duration) -> Option<Arc<TypedStore>> {
        self.core.wait_result(timeout)
    }
}

impl<H> std::fmt::Debug for TaskChain<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskChain")
            .field("core", &self.core)
            .field("entries", &self.entries)
            .field("executed", &self.executed.load(Ordering::SeqCst))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::stub::{CountingTask, FailingTask, PanickingTask};
    use crate::tasks::FnTask;
    use std::thread;

    const SHORT: Duration = Duration::from_millis(50);

    #[derive(Default)]
    struct RecordingHooks {
        completed: AtomicUsize,
        failed: AtomicUsize,
        timed_out: AtomicUsize,
        last_entry: Mutex<Option<usize>>,
    }

    impl ChainHooks for RecordingHooks {
        fn on_task_completed(&self) {
            self.completed.fetch_add(1, Ordering::SeqCst);
        }

        fn on_task_failed(&self, entry: usize, _failure: &TaskError) {
            self.failed.fetch_add(1, Ordering::SeqCst);
            *self.last_entry.lock() = Some(entry);
        }

        fn on_task_timeout(&self, entry: usize) {
            self.timed_out.fetch_add(1, Ordering::SeqCst);
            *self.last_entry.lock() = Some(entry);
        }
    }

    fn fired() -> Arc<Trigger> {
        let trigger = Arc::new(Trigger::with_timeout(SHORT));
        trigger.trigger();
        trigger
    }

    fn record_states<H: ChainHooks>(chain: &mut TaskChain<H>) -> Arc<Mutex<Vec<i32>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        chain.set_handle(move |state| sink.lock().push(state.code()));
        seen
    }

    #[test]
    fn test_all_triggers_fired_finishes() {
        let mut chain = TaskChain::with_hooks("happy", RecordingHooks::default());
        let tasks: Vec<_> = (0..3)
            .map(|i| Arc::new(CountingTask::new(format!("t{i}"))))
            .collect();
        for task in &tasks {
            chain.add_task(Arc::clone(task) as Arc<dyn Task>, Some(fired()));
        }
        let states = record_states(&mut chain);

        chain.execute().unwrap();

        assert_eq!(chain.state(), TaskState::Finished);
        assert_eq!(chain.executed_count(), 3);
        assert_eq!(chain.hooks().completed.load(Ordering::SeqCst), 1);
        assert_eq!(chain.hooks().failed.load(Ordering::SeqCst), 0);
        assert_eq!(chain.hooks().timed_out.load(Ordering::SeqCst), 0);
        assert_eq!(
            *states.lock(),
            vec![TaskState::Executing.code(), TaskState::Finished.code()]
        );
        assert!(tasks.iter().all(|t| t.runs() == 1));
        assert!(chain.failure().is_none());
    }

    #[test]
    fn test_unsignaled_trigger_times_out_and_stops() {
        let mut chain = TaskChain::with_hooks("stalled", RecordingHooks::default());
        let third = Arc::new(CountingTask::new("third"));
        chain
            .add_task(Arc::new(CountingTask::new("first")), Some(fired()))
            .add_task(
                Arc::new(CountingTask::new("second")),
                Some(Arc::new(Trigger::with_timeout(SHORT))),
            )
            .add_task(Arc::clone(&third) as Arc<dyn Task>, Some(fired()));
        let states = record_states(&mut chain);

        let start = Instant::now();
        let err = chain.execute().unwrap_err();

        assert!(start.elapsed() >= SHORT);
        assert!(matches!(err, TaskError::TimedOut { entry: 1, .. }));
        assert_eq!(chain.state(), TaskState::Timeout);
        assert!(chain.timed_out());
        assert_eq!(chain.executed_count(), 1);
        assert_eq!(third.runs(), 0);
        assert_eq!(chain.hooks().timed_out.load(Ordering::SeqCst), 1);
        assert_eq!(chain.hooks().completed.load(Ordering::SeqCst), 0);
        assert_eq!(*chain.hooks().last_entry.lock(), Some(1));
        assert_eq!(
            *states.lock(),
            vec![TaskState::Executing.code(), TaskState::Timeout.code()]
        );
        assert!(chain.failure().is_none());
    }

    #[test]
    fn test_first_task_failure_aborts_chain() {
        let mut chain = TaskChain::with_hooks("broken", RecordingHooks::default());
        let second = Arc::new(CountingTask::new("second"));
        chain
            .add_task(Arc::new(FailingTask::new("first")), Some(fired()))
            .add_task(Arc::clone(&second) as Arc<dyn Task>, None);
        let states = record_states(&mut chain);

        let err = chain.execute().unwrap_err();

        assert!(matches!(
            err,
            TaskError::Failed { ref task, .. } if task == "first"
        ));
        assert_eq!(chain.state(), TaskState::Failed);
        assert!(chain.error());
        assert!(chain.failure().is_some());
        assert_eq!(chain.executed_count(), 0);
        assert_eq!(second.runs(), 0);
        assert_eq!(chain.hooks().failed.load(Ordering::SeqCst), 1);
        assert_eq!(*chain.hooks().last_entry.lock(), Some(0));
        assert_eq!(
            *states.lock(),
            vec![TaskState::Executing.code(), TaskState::Failed.code()]
        );
    }

    #[test]
    fn test_panicking_task_is_captured_as_failure() {
        let mut chain = TaskChain::new("panics");
        chain.add_task(Arc::new(PanickingTask::new("boom")), None);

        let err = chain.execute().unwrap_err();

        assert!(matches!(err, TaskError::Panicked { .. }));
        assert_eq!(chain.state(), TaskState::Failed);
        assert!(matches!(chain.failure(), Some(TaskError::Panicked { .. })));
    }

    #[test]
    fn test_entries_without_trigger_pass_straight_through() {
        let mut chain = TaskChain::new("ungated");
        for i in 0..4 {
            chain.add_task(Arc::new(CountingTask::new(format!("t{i}"))), None);
        }

        chain.execute().unwrap();

        assert_eq!(chain.executed_count(), 4);
        assert!(chain.finished());
    }

    #[test]
    fn test_empty_chain_finishes() {
        let chain = TaskChain::new("empty");
        chain.execute().unwrap();

        assert!(chain.finished());
        assert_eq!(chain.executed_count(), 0);
        assert!(chain.get(Duration::ZERO).unwrap().is_empty());
    }

    #[test]
    fn test_second_execute_is_rejected() {
        let mut chain = TaskChain::new("once");
        let task = Arc::new(CountingTask::new("only"));
        chain.add_task(Arc::clone(&task) as Arc<dyn Task>, None);
        let states = record_states(&mut chain);
        chain.execute().unwrap();

        let err = chain.execute().unwrap_err();

        assert!(matches!(
            err,
            TaskError::AlreadyExecuted {
                state: TaskState::Finished,
                ..
            }
        ));
        assert_eq!(task.runs(), 1);
        assert_eq!(states.lock().len(), 2);
    }

    #[test]
    fn test_trigger_signaled_from_another_thread() {
        let gate = Arc::new(Trigger::with_timeout(Duration::from_secs(5)));
        let mut chain = TaskChain::new("cross-thread");
        chain
            .add_task(Arc::new(CountingTask::new("request")), Some(Arc::clone(&gate)))
            .add_task(Arc::new(CountingTask::new("after")), None);

        let signaler = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            gate.trigger();
        });

        chain.execute().unwrap();
        signaler.join().unwrap();

        assert_eq!(chain.executed_count(), 2);
    }

    #[test]
    fn test_get_returns_results_only_when_finished() {
        let mut ok = TaskChain::new("ok");
        ok.add_task(Arc::new(CountingTask::new("writer")), None);
        ok.execute().unwrap();

        let results = ok.get(Duration::ZERO).unwrap();
        let writer = results.get::<Arc<TypedStore>, _>("writer").unwrap();
        assert_eq!(writer.try_get::<usize, _>("run"), Some(1));

        let mut bad = TaskChain::new("bad");
        bad.add_task(Arc::new(FailingTask::new("nope")), None);
        let _ = bad.execute();
        assert!(bad.get(Duration::from_millis(10)).is_none());
    }

    #[test]
    fn test_get_blocks_until_chain_settles() {
        let gate = Arc::new(Trigger::with_timeout(Duration::from_secs(5)));
        let mut chain = TaskChain::new("waited-on");
        chain.add_task(Arc::new(CountingTask::new("slow")), Some(Arc::clone(&gate)));
        let chain = Arc::new(chain);

        let runner = {
            let chain = Arc::clone(&chain);
            thread::spawn(move || chain.execute())
        };

        assert!(chain.get(Duration::from_millis(20)).is_none());
        gate.trigger();

        assert!(chain.get(Duration::from_secs(5)).is_some());
        runner.join().unwrap().unwrap();
    }

    #[test]
    fn test_nested_chain_failure_fails_outer() {
        let mut inner = TaskChain::new("inner");
        inner.add_task(
            Arc::new(CountingTask::new("inner-work")),
            Some(Arc::new(Trigger::with_timeout(Duration::from_millis(10)))),
        );

        let mut outer = TaskChain::new("outer");
        let after = Arc::new(CountingTask::new("after"));
        outer
            .add_task(Arc::new(inner), None)
            .add_task(Arc::clone(&after) as Arc<dyn Task>, None);

        let err = outer.execute().unwrap_err();

        assert!(matches!(
            err,
            TaskError::TimedOut { ref task, .. } if task == "inner"
        ));
        assert_eq!(outer.state(), TaskState::Failed);
        assert_eq!(after.runs(), 0);
    }

    #[test]
    fn test_completed_inner_chain_signals_outer_trigger() {
        let done = Arc::new(Trigger::with_timeout(SHORT));
        let mut inner = TaskChain::new("inner").with_completion(Arc::clone(&done));
        inner.add_task(Arc::new(CountingTask::new("step")), None);

        let mut outer = TaskChain::new("outer");
        outer.add_task(Arc::new(inner), Some(done));

        outer.execute().unwrap();
        assert_eq!(outer.executed_count(), 1);
    }

    #[test]
    fn test_subscribers_see_progress_events() {
        let mut chain = TaskChain::new("observed");
        chain
            .add_task(Arc::new(CountingTask::new("a")), None)
            .add_task(Arc::new(CountingTask::new("b")), Some(fired()));

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _subscription = chain.subscribe(move |event| {
            let label = match event {
                ChainEvent::Started { entries } => format!("started:{entries}"),
                ChainEvent::EntryCompleted { task, .. } => format!("entry:{task}"),
                ChainEvent::Finished { executed } => format!("finished:{executed}"),
                ChainEvent::Failed { entry, .. } => format!("failed:{entry}"),
                ChainEvent::TimedOut { entry } => format!("timeout:{entry}"),
            };
            sink.lock().push(label);
        });

        chain.execute().unwrap();

        assert_eq!(
            *seen.lock(),
            vec!["started:2", "entry:a", "entry:b", "finished:2"]
        );
    }

    #[test]
    fn test_dropped_subscription_is_not_notified() {
        let mut chain = TaskChain::new("unobserved");
        chain.add_task(Arc::new(CountingTask::new("a")), None);

        let hits = Arc::new(AtomicUsize::new(0));
        let sink = Arc::clone(&hits);
        let subscription = chain.subscribe(move |_| {
            sink.fetch_add(1, Ordering::SeqCst);
        });
        drop(subscription);

        chain.execute().unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_panicking_subscriber_does_not_stall_chain() {
        let mut chain = TaskChain::new("heckled");
        chain
            .add_task(Arc::new(CountingTask::new("a")), None)
            .add_task(Arc::new(CountingTask::new("b")), Some(fired()));
        let states = record_states(&mut chain);

        let faulty = chain.subscribe(|event| {
            if let ChainEvent::EntryCompleted { task, .. } = event {
                panic!("cannot render {task}");
            }
        });
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _steady = chain.subscribe(move |event| sink.lock().push(event.clone()));

        chain.execute().unwrap();

        assert_eq!(chain.state(), TaskState::Finished);
        assert_eq!(chain.executed_count(), 2);
        assert!(chain.get(Duration::ZERO).is_some());
        assert_eq!(*states.lock(), vec![1, 2]);
        assert!(!faulty.is_valid());
        assert!(matches!(
            seen.lock().last(),
            Some(ChainEvent::Finished { executed: 2 })
        ));
    }

    #[test]
    fn test_panicking_handle_and_hooks_still_settle() {
        struct LoudHooks;
        impl ChainHooks for LoudHooks {
            fn on_task_completed(&self) {
                panic!("completion hook broke");
            }
        }

        let done = Arc::new(Trigger::new());
        let mut chain = TaskChain::with_hooks("loud", LoudHooks)
            .with_completion(Arc::clone(&done));
        chain.add_task(Arc::new(CountingTask::new("only")), None);
        chain.set_handle(|state| {
            if state == TaskState::Executing {
                panic!("handle broke");
            }
        });

        chain.execute().unwrap();

        assert_eq!(chain.state(), TaskState::Finished);
        assert_eq!(chain.executed_count(), 1);
        assert!(done.triggered());
        assert!(chain.get(SHORT).is_some());
    }

    #[test]
    fn test_repeated_task_name_keeps_later_result() {
        let mut chain = TaskChain::new("twins");
        chain
            .add_task(
                Arc::new(FnTask::new("twin", |out| {
                    out.set("order".to_string(), 1_usize)?;
                    Ok(())
                })),
                None,
            )
            .add_task(
                Arc::new(FnTask::new("twin", |out| {
                    out.set("order".to_string(), 2_usize)?;
                    Ok(())
                })),
                None,
            );

        chain.execute().unwrap();

        let results = chain.get(Duration::ZERO).unwrap();
        assert_eq!(results.size(), 1);
        let twin = results.get::<Arc<TypedStore>, _>("twin").unwrap();
        assert_eq!(twin.try_get::<usize, _>("order"), Some(2));
    }
}
