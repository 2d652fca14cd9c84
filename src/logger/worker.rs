//! State shared between producers and the consumer thread, and the
//! consumer loop itself.
//!
//! Three primitives keep producers away from target I/O:
//!
//! * the producer lock (re-entrant, so a batching thread can keep enqueueing)
//!   guards the pending queue and the batch depth;
//! * the signal mutex and condition variable carry wake-ups and are held only
//!   for the flag check;
//! * the target lock guards the registered targets and is taken by the
//!   consumer while delivering, never by producers.

use std::{
    cell::RefCell,
    collections::VecDeque,
    mem,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use crossbeam_channel::Sender;
use log::warn;
use parking_lot::{Condvar, Mutex, ReentrantMutex, RwLock};

use crate::{
    log_entry::LogEntry,
    rate_limited_warner::RateLimitedWarner,
    target::{LogTarget, TargetError},
};

use super::config::{LoggerConfig, MIN_WAIT_TIMEOUT};

/// Item travelling through the pending queue.
pub(crate) enum QueueItem {
    Entry(LogEntry),
    /// Flush every target, then report the combined result.
    Flush(Sender<bool>),
}

pub(crate) struct ProducerState {
    pub(crate) pending: VecDeque<QueueItem>,
    pub(crate) batch_depth: usize,
}

pub(crate) struct Shared {
    pub(crate) producer: ReentrantMutex<RefCell<ProducerState>>,
    pub(crate) has_pending: AtomicBool,
    pub(crate) has_targets: AtomicBool,
    /// Set under the producer lock; read without it by the consumer.
    pub(crate) stopped: AtomicBool,
    signal: Mutex<bool>,
    wakeup: Condvar,
    pub(crate) targets: RwLock<Vec<Arc<dyn LogTarget>>>,
    pub(crate) wait_timeout: Duration,
    queue_capacity: usize,
    delivery_warner: RateLimitedWarner,
    pub(crate) drop_warner: RateLimitedWarner,
}

impl Shared {
    pub(crate) fn new(config: &LoggerConfig) -> Self {
        Self {
            producer: ReentrantMutex::new(RefCell::new(ProducerState {
                pending: VecDeque::with_capacity(config.queue_capacity),
                batch_depth: 0,
            })),
            has_pending: AtomicBool::new(false),
            has_targets: AtomicBool::new(false),
            stopped: AtomicBool::new(false),
            signal: Mutex::new(false),
            wakeup: Condvar::new(),
            targets: RwLock::new(Vec::new()),
            wait_timeout: config.wait_timeout.max(MIN_WAIT_TIMEOUT),
            queue_capacity: config.queue_capacity,
            delivery_warner: RateLimitedWarner::new(config.warn_interval),
            drop_warner: RateLimitedWarner::new(config.warn_interval),
        }
    }

    /// Wake the consumer. Callers must not hold the producer lock.
    pub(crate) fn notify(&self) {
        let mut signalled = self.signal.lock();
        *signalled = true;
        self.wakeup.notify_one();
    }

    /// Block until notified or until the wait timeout elapses.
    fn wait(&self) {
        let mut signalled = self.signal.lock();
        if !*signalled && !self.stopped.load(Ordering::Acquire) {
            let _ = self.wakeup.wait_for(&mut signalled, self.wait_timeout);
        }
        *signalled = false;
    }

    /// Swap the pending queue into `drain` while holding the producer lock.
    fn take_pending(&self, drain: &mut VecDeque<QueueItem>) {
        let guard = self.producer.lock();
        let mut state = guard.borrow_mut();
        mem::swap(&mut state.pending, drain);
        self.has_pending.store(false, Ordering::Release);
    }

    fn deliver(&self, drain: &mut VecDeque<QueueItem>) {
        let targets = self.targets.read();
        for item in drain.drain(..) {
            match item {
                QueueItem::Entry(entry) => {
                    for target in targets.iter().filter(|t| t.accepts(&entry)) {
                        if let Err(err) = target.write(&entry) {
                            self.report_failure(&err);
                        }
                    }
                }
                QueueItem::Flush(ack) => {
                    let flushed = targets
                        .iter()
                        .fold(true, |ok, target| target.flush() && ok);
                    let _ = ack.send(flushed);
                }
            }
        }
    }

    fn report_failure(&self, err: &TargetError) {
        self.delivery_warner.record();
        self.delivery_warner.warn_if_due(|count| {
            warn!("Logger: {count} target writes failed; latest error: {err}");
        });
    }

    /// Deliver whatever is left once the stop flag is set.
    ///
    /// Runs under the producer lock; producers arriving now observe the stop
    /// flag and discard their entries.
    fn final_drain(&self, drain: &mut VecDeque<QueueItem>) {
        let guard = self.producer.lock();
        {
            let mut state = guard.borrow_mut();
            drain.append(&mut state.pending);
            self.has_pending.store(false, Ordering::Release);
        }
        self.deliver(drain);
        drop(guard);
        self.delivery_warner.flush(|count| {
            warn!("Logger: {count} target writes failed before shutdown");
        });
    }
}

/// Body of the consumer thread.
pub(crate) fn run(shared: Arc<Shared>) {
    let mut drain = VecDeque::with_capacity(shared.queue_capacity);
    loop {
        shared.wait();
        if shared.has_pending.load(Ordering::Acquire) {
            shared.take_pending(&mut drain);
            shared.deliver(&mut drain);
        }
        if shared.stopped.load(Ordering::Acquire) {
            break;
        }
    }
    shared.final_drain(&mut drain);
}
