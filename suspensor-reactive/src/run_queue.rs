//! Run queue
//!
//! Effects queued by executed triggers wait here until the last
//! [`TriggerExec`](crate::TriggerExec) alive is dropped.

// Imports
use {
	crate::{loc::Loc, WeakEffect},
	core::{
		cell::RefCell,
		cmp::Reverse,
		hash::{Hash, Hasher},
	},
	priority_queue::PriorityQueue,
};

/// Queued effect
struct Queued {
	/// Effect
	effect: WeakEffect,

	/// Where the trigger that queued the effect was executed
	exec_loc: Loc,
}

impl PartialEq for Queued {
	fn eq(&self, other: &Self) -> bool {
		self.effect == other.effect
	}
}

impl Eq for Queued {}

impl Hash for Queued {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.effect.hash(state);
	}
}

/// Run queue
struct RunQueue {
	/// Queued effects, by insertion order
	queue: PriorityQueue<Queued, Reverse<usize>>,

	/// Next insertion index
	next_idx: usize,

	/// Number of trigger executions alive
	execs_alive: usize,

	/// Whether the queue is being drained
	draining: bool,
}

thread_local! {
	/// Run queue
	static RUN_QUEUE: RefCell<RunQueue> = RefCell::new(RunQueue {
		queue:       PriorityQueue::new(),
		next_idx:    0,
		execs_alive: 0,
		draining:    false,
	});
}

/// Drain guard.
///
/// While alive, new executions only add to the queue.
pub struct DrainGuard;

impl Drop for DrainGuard {
	fn drop(&mut self) {
		RUN_QUEUE.with_borrow_mut(|run_queue| run_queue.draining = false);
	}
}

/// Registers a new trigger execution
pub fn inc_ref() {
	RUN_QUEUE.with_borrow_mut(|run_queue| run_queue.execs_alive += 1);
}

/// Unregisters a trigger execution.
///
/// If it was the last one alive, and nobody else is draining
/// the queue, returns a guard for the caller to drain it.
pub fn dec_ref() -> Option<DrainGuard> {
	RUN_QUEUE.with_borrow_mut(|run_queue| {
		run_queue.execs_alive = run_queue
			.execs_alive
			.checked_sub(1)
			.expect("More trigger executions were dropped than created");

		let should_drain = run_queue.execs_alive == 0 && !run_queue.queue.is_empty() && !run_queue.draining;
		should_drain.then(|| {
			run_queue.draining = true;
			DrainGuard
		})
	})
}

/// Queues an effect.
///
/// An effect that was already queued is moved to the back, so it
/// only runs once, after everything queued before it.
pub fn push(effect: WeakEffect, exec_loc: Loc) {
	RUN_QUEUE.with_borrow_mut(|run_queue| {
		let idx = Reverse(run_queue.next_idx);
		run_queue.queue.push_decrease(Queued { effect, exec_loc }, idx);
		run_queue.next_idx += 1;
	});
}

/// Pops the effect at the front of the queue
pub fn pop() -> Option<(WeakEffect, Loc)> {
	let (queued, _) = RUN_QUEUE.with_borrow_mut(|run_queue| run_queue.queue.pop())?;
	Some((queued.effect, queued.exec_loc))
}
