//! Trigger
//!
//! The building block of all signals: effects that read a trigger
//! subscribe to it, and are re-run once it's executed.

// Imports
use {
	crate::{effect, loc::Loc, run_queue, WeakEffect},
	core::{
		cell::RefCell,
		fmt,
		hash::{Hash, Hasher},
	},
	std::rc::{Rc, Weak},
};

/// Trigger inner
struct Inner {
	/// Where this trigger was defined
	defined_loc: Loc,

	/// Subscribers
	subscribers: RefCell<Vec<WeakEffect>>,
}

/// Trigger
pub struct Trigger {
	/// Inner
	inner: Rc<Inner>,
}

impl Trigger {
	/// Creates a new trigger
	#[must_use]
	#[track_caller]
	pub fn new() -> Self {
		let inner = Inner {
			defined_loc: Loc::caller(),
			subscribers: RefCell::new(vec![]),
		};
		Self { inner: Rc::new(inner) }
	}

	/// Downgrades this trigger
	#[must_use]
	pub fn downgrade(&self) -> WeakTrigger {
		WeakTrigger {
			inner: Rc::downgrade(&self.inner),
		}
	}

	/// Returns where this trigger was defined
	#[must_use]
	pub fn defined_loc(&self) -> Loc {
		self.inner.defined_loc
	}

	/// Returns a unique identifier to this trigger.
	///
	/// Downgrading and cloning the trigger will retain the same id
	#[must_use]
	pub fn id(&self) -> usize {
		Rc::as_ptr(&self.inner).addr()
	}

	/// Returns the number of live subscribers
	#[must_use]
	pub fn subscribers_len(&self) -> usize {
		self.inner
			.subscribers
			.borrow()
			.iter()
			.filter(|sub| sub.is_alive())
			.count()
	}

	/// Subscribes the running effect to this trigger.
	///
	/// The subscription lasts until the effect next runs, since each
	/// run gathers it's dependencies from scratch.
	#[track_caller]
	pub fn gather_subs(&self) {
		match effect::running() {
			Some(effect) => {
				tracing::trace!(
					effect=%effect.defined_loc(),
					trigger=%self.defined_loc(),
					gathered=%Loc::caller(),
					"Adding effect dependency"
				);

				let sub = effect.downgrade();
				let mut subs = self.inner.subscribers.borrow_mut();
				if !subs.contains(&sub) {
					subs.push(sub);
				}
				drop(subs);

				effect.add_dependency(self);
			},

			// Note: Inside of `untracked` not gathering anything is what the user asked for.
			None if effect::is_untracked() => (),

			None => tracing::warn!(
				trigger=?self,
				location=%Loc::caller(),
				"Signal read outside of any effect, it won't be re-read when it changes. \
				 Use one of the `_raw` methods if this is intentional"
			),
		}
	}

	/// Removes a subscriber from this trigger
	pub(crate) fn remove_subscriber(&self, sub: &WeakEffect) {
		self.inner.subscribers.borrow_mut().retain(|other| other != sub);
	}

	/// Executes this trigger.
	///
	/// Adds all subscribers to the run queue, and once the returned
	/// executor is dropped, and there are no other executors alive,
	/// all queues effects are run.
	#[track_caller]
	#[expect(
		clippy::must_use_candidate,
		reason = "The user can just immediately drop the value to execute if they don't care"
	)]
	pub fn exec(&self) -> TriggerExec {
		let exec_loc = Loc::caller();

		// Increase the ref count
		run_queue::inc_ref();

		// Then add all subscribers to the run queue, forgetting any dropped ones
		let subs = {
			let mut subs = self.inner.subscribers.borrow_mut();
			subs.retain(WeakEffect::is_alive);
			subs.clone()
		};
		for sub in subs {
			run_queue::push(sub, exec_loc);
		}

		TriggerExec {
			trigger_defined_loc: self.defined_loc(),
		}
	}
}

impl Default for Trigger {
	#[track_caller]
	fn default() -> Self {
		Self::new()
	}
}

impl PartialEq for Trigger {
	fn eq(&self, other: &Self) -> bool {
		self.id() == other.id()
	}
}

impl Eq for Trigger {}

impl Clone for Trigger {
	fn clone(&self) -> Self {
		Self {
			inner: Rc::clone(&self.inner),
		}
	}
}

impl Hash for Trigger {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.id().hash(state);
	}
}

impl fmt::Debug for Trigger {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Trigger")
			.field("id", &self.id())
			.field("defined_loc", &self.defined_loc())
			.finish_non_exhaustive()
	}
}

/// Weak trigger
pub struct WeakTrigger {
	/// Inner
	inner: Weak<Inner>,
}

impl WeakTrigger {
	/// Creates an empty weak trigger
	#[must_use]
	pub const fn new() -> Self {
		Self { inner: Weak::new() }
	}

	/// Returns a unique identifier to this trigger.
	///
	/// Upgrading and cloning the trigger will retain the same id
	#[must_use]
	pub fn id(&self) -> usize {
		Weak::as_ptr(&self.inner).addr()
	}

	/// Upgrades this weak trigger
	#[must_use]
	pub fn upgrade(&self) -> Option<Trigger> {
		let inner = self.inner.upgrade()?;
		Some(Trigger { inner })
	}
}

impl Default for WeakTrigger {
	fn default() -> Self {
		Self::new()
	}
}

impl PartialEq for WeakTrigger {
	fn eq(&self, other: &Self) -> bool {
		self.id() == other.id()
	}
}

impl Eq for WeakTrigger {}

impl Clone for WeakTrigger {
	fn clone(&self) -> Self {
		Self {
			inner: Weak::clone(&self.inner),
		}
	}
}

impl Hash for WeakTrigger {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.id().hash(state);
	}
}

impl fmt::Debug for WeakTrigger {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.upgrade() {
			Some(trigger) => f.debug_tuple("WeakTrigger").field(&trigger).finish(),
			None => f.debug_struct("WeakTrigger").finish_non_exhaustive(),
		}
	}
}

/// Trigger executor
///
/// Once the last executor alive is dropped, the run queue is executed.
pub struct TriggerExec {
	/// Trigger defined location
	trigger_defined_loc: Loc,
}

impl Drop for TriggerExec {
	fn drop(&mut self) {
		// Decrease the reference count, and if we weren't the last, quit
		let Some(_exec_guard) = run_queue::dec_ref() else {
			return;
		};

		// If we were the last, keep popping effects and running them until
		// the run queue is empty
		while let Some((sub, exec_loc)) = run_queue::pop() {
			let Some(effect) = sub.upgrade() else {
				continue;
			};

			tracing::trace!(
				effect=%effect.defined_loc(),
				trigger=%self.trigger_defined_loc,
				execution=%exec_loc,
				"Running effect due to trigger"
			);
			effect.run();
		}
	}
}
