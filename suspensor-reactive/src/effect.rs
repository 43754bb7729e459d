//! Effect
//!
//! An effect is a function that is re-run whenever
//! one of it's dependencies changes.
//!
//! Each run may register cleanups with [`on_cleanup`]. These
//! are run right before the next run of the effect, or when
//! the effect is dropped, whichever happens first.

// Modules
mod deps_gatherer;
#[cfg(test)]
mod tests;

// Exports
pub use self::deps_gatherer::EffectDepsGatherer;

// Imports
use {
	crate::{loc::Loc, Trigger, WeakTrigger},
	core::{
		cell::RefCell,
		fmt,
		hash::{Hash, Hasher},
		mem,
	},
	std::rc::{Rc, Weak},
};

thread_local! {
	/// Effect stack
	///
	/// `None` entries are pushed by [`untracked`], and hide
	/// any effects below them.
	static EFFECT_STACK: RefCell<Vec<Option<Effect>>> = const { RefCell::new(vec![]) };
}

/// Cleanup function
type Cleanup = Box<dyn FnOnce()>;

/// Effect inner
struct Inner<F: ?Sized> {
	/// Where this effect was defined
	defined_loc: Loc,

	/// Triggers gathered during the last run
	dependencies: RefCell<Vec<WeakTrigger>>,

	/// Cleanups registered during the last run
	cleanups: RefCell<Vec<Cleanup>>,

	/// Effect runner
	run: F,
}

impl<F: ?Sized> Drop for Inner<F> {
	fn drop(&mut self) {
		// Disposing of the effect counts as the end of it's last run
		for cleanup in self.cleanups.get_mut().drain(..) {
			cleanup();
		}
	}
}

/// Effect
pub struct Effect {
	/// Inner
	inner: Rc<Inner<dyn Fn()>>,
}

impl Effect {
	/// Creates a new computed effect.
	///
	/// Runs the effect once to gather dependencies.
	#[track_caller]
	pub fn new<F>(run: F) -> Self
	where
		F: Fn() + 'static,
	{
		let inner = Inner {
			defined_loc:  Loc::caller(),
			dependencies: RefCell::new(vec![]),
			cleanups:     RefCell::new(vec![]),
			run,
		};

		let effect = Self { inner: Rc::new(inner) };
		effect.run();

		effect
	}

	/// Returns where this effect was defined
	#[must_use]
	pub fn defined_loc(&self) -> Loc {
		self.inner.defined_loc
	}

	/// Downgrades this effect
	#[must_use]
	pub fn downgrade(&self) -> WeakEffect {
		WeakEffect {
			inner: Rc::downgrade(&self.inner),
		}
	}

	/// Returns a unique identifier to this effect.
	///
	/// Downgrading and cloning the effect will retain the same id
	#[must_use]
	pub fn id(&self) -> usize {
		Rc::as_ptr(&self.inner).cast::<()>().addr()
	}

	/// Runs the effect.
	///
	/// Runs all cleanups of the previous run and forgets
	/// all previous dependencies before running.
	pub fn run(&self) {
		self.run_cleanups();
		self.clear_dependencies();

		tracing::trace!(effect=%self.defined_loc(), "Running effect");
		let _gatherer = EffectDepsGatherer::new(self);
		(self.inner.run)();
	}

	/// Adds a dependency to this effect
	pub(crate) fn add_dependency(&self, trigger: &Trigger) {
		let trigger = trigger.downgrade();
		let mut deps = self.inner.dependencies.borrow_mut();
		if !deps.contains(&trigger) {
			deps.push(trigger);
		}
	}

	/// Returns the number of dependencies this effect gathered on it's last run
	#[must_use]
	pub fn dependencies_len(&self) -> usize {
		self.inner.dependencies.borrow().len()
	}

	/// Unsubscribes from all dependencies
	fn clear_dependencies(&self) {
		let deps = mem::take(&mut *self.inner.dependencies.borrow_mut());
		let this = self.downgrade();
		for trigger in deps.iter().filter_map(WeakTrigger::upgrade) {
			trigger.remove_subscriber(&this);
		}
	}

	/// Runs all cleanups registered during the last run
	fn run_cleanups(&self) {
		let cleanups = mem::take(&mut *self.inner.cleanups.borrow_mut());
		for cleanup in cleanups {
			cleanup();
		}
	}
}

impl PartialEq for Effect {
	fn eq(&self, other: &Self) -> bool {
		self.id() == other.id()
	}
}

impl Eq for Effect {}

impl Clone for Effect {
	fn clone(&self) -> Self {
		Self {
			inner: Rc::clone(&self.inner),
		}
	}
}

impl Hash for Effect {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.id().hash(state);
	}
}

impl fmt::Debug for Effect {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Effect")
			.field("id", &self.id())
			.field("defined_loc", &self.defined_loc())
			.finish_non_exhaustive()
	}
}

/// Weak effect
///
/// Used to break ownership between a signal and it's subscribers
pub struct WeakEffect {
	/// Inner
	inner: Weak<Inner<dyn Fn()>>,
}

impl WeakEffect {
	/// Upgrades this effect
	#[must_use]
	pub fn upgrade(&self) -> Option<Effect> {
		self.inner.upgrade().map(|inner| Effect { inner })
	}

	/// Returns a unique identifier to this effect.
	///
	/// Upgrading and cloning the effect will retain the same id
	#[must_use]
	pub fn id(&self) -> usize {
		Weak::as_ptr(&self.inner).cast::<()>().addr()
	}

	/// Returns if the effect still exists
	#[must_use]
	pub fn is_alive(&self) -> bool {
		self.inner.strong_count() != 0
	}
}

impl PartialEq for WeakEffect {
	fn eq(&self, other: &Self) -> bool {
		self.id() == other.id()
	}
}

impl Eq for WeakEffect {}

impl Clone for WeakEffect {
	fn clone(&self) -> Self {
		Self {
			inner: Weak::clone(&self.inner),
		}
	}
}

impl Hash for WeakEffect {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.id().hash(state);
	}
}

impl fmt::Debug for WeakEffect {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut s = f.debug_struct("WeakEffect");
		match self.upgrade() {
			Some(effect) => s.field("effect", &effect).finish(),
			None => s.finish_non_exhaustive(),
		}
	}
}

/// Returns the current running effect.
///
/// Inside of [`untracked`], this always returns `None`.
#[must_use]
pub fn running() -> Option<Effect> {
	EFFECT_STACK.with_borrow(|effects| effects.last().cloned().flatten())
}

/// Returns whether we're inside of [`untracked`].
#[must_use]
pub fn is_untracked() -> bool {
	EFFECT_STACK.with_borrow(|effects| matches!(effects.last(), Some(None)))
}

/// Pushes an entry onto the effect stack
pub(crate) fn push(effect: Option<Effect>) {
	EFFECT_STACK.with_borrow_mut(|effects| effects.push(effect));
}

/// Pops an entry from the effect stack
pub(crate) fn pop() {
	EFFECT_STACK
		.with_borrow_mut(|effects| effects.pop())
		.expect("Missing added effect");
}

/// Runs `f` without gathering any dependencies.
///
/// Signals read within `f` won't be added as dependencies of
/// the currently running effect. Writes still notify subscribers.
pub fn untracked<F, O>(f: F) -> O
where
	F: FnOnce() -> O,
{
	/// Pops the untracked entry on drop
	struct Guard;

	impl Drop for Guard {
		fn drop(&mut self) {
			self::pop();
		}
	}

	self::push(None);
	let _guard = Guard;
	f()
}

/// Registers a cleanup on the currently running effect.
///
/// The cleanup will be run before the effect next runs, or
/// when the effect is dropped.
///
/// If no effect is running, the cleanup is dropped without being run.
#[track_caller]
pub fn on_cleanup<F>(cleanup: F)
where
	F: FnOnce() + 'static,
{
	match self::running() {
		Some(effect) => effect.inner.cleanups.borrow_mut().push(Box::new(cleanup)),
		None => tracing::warn!(
			location=%Loc::caller(),
			"No effect is running when registering a cleanup, it will never be run"
		),
	}
}
