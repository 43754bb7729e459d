//! Suspense
//!
//! A suspense boundary counts the requests pending beneath it.
//! Loaders talk to the nearest boundary through a [`SuspenseContext`],
//! provided on a [`Scope`].

// Imports
use {
	core::fmt,
	std::rc::Rc,
	suspensor_context::Scope,
	suspensor_reactive::{Signal, SignalGet, SignalUpdate},
};

/// Suspense status
#[derive(PartialEq, Eq, Clone, Copy, Default, Debug)]
#[derive(derive_more::Display)]
pub enum SuspenseStatus {
	/// Nothing is pending
	#[default]
	#[display("running")]
	Running,

	/// At least one request is pending
	#[display("suspended")]
	Suspended,
}

/// Suspense context.
///
/// Without a boundary, `increment` and `decrement` are no-ops
/// and the status is always [`SuspenseStatus::Running`].
#[derive(Clone)]
pub struct SuspenseContext {
	/// Increment
	increment: Option<Rc<dyn Fn()>>,

	/// Decrement
	decrement: Option<Rc<dyn Fn()>>,

	/// Status reporter
	state: Rc<dyn Fn() -> SuspenseStatus>,
}

impl SuspenseContext {
	/// Creates a context that only reports a status
	#[must_use]
	pub fn new<F>(state: F) -> Self
	where
		F: Fn() -> SuspenseStatus + 'static,
	{
		Self {
			increment: None,
			decrement: None,
			state:     Rc::new(state),
		}
	}

	/// Attaches a pending counter to this context
	#[must_use]
	pub fn with_counter<I, D>(self, increment: I, decrement: D) -> Self
	where
		I: Fn() + 'static,
		D: Fn() + 'static,
	{
		Self {
			increment: Some(Rc::new(increment)),
			decrement: Some(Rc::new(decrement)),
			..self
		}
	}

	/// Returns whether a counter is attached
	#[must_use]
	pub const fn has_boundary(&self) -> bool {
		self.increment.is_some() || self.decrement.is_some()
	}

	/// Signals that a request started
	pub fn increment(&self) {
		if let Some(increment) = &self.increment {
			increment();
		}
	}

	/// Signals that a request settled
	pub fn decrement(&self) {
		if let Some(decrement) = &self.decrement {
			decrement();
		}
	}

	/// Returns the status reported by the boundary
	#[must_use]
	pub fn status(&self) -> SuspenseStatus {
		(self.state)()
	}
}

impl Default for SuspenseContext {
	fn default() -> Self {
		Self::new(|| SuspenseStatus::Running)
	}
}

impl fmt::Debug for SuspenseContext {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SuspenseContext")
			.field("has_boundary", &self.has_boundary())
			.finish_non_exhaustive()
	}
}

/// Suspense boundary.
///
/// Keeps a reactive count of the requests pending within it's scope.
#[derive(Clone, Debug)]
pub struct SuspenseBoundary {
	/// Pending requests
	pending: Signal<usize>,

	/// Scope providing this boundary
	scope: Scope,
}

impl SuspenseBoundary {
	/// Creates a new boundary beneath `parent`.
	///
	/// Anything set up in [`Self::scope`] reports to this boundary,
	/// rather than to any boundary above it.
	#[track_caller]
	pub fn new(parent: &Scope) -> Self {
		let pending = Signal::new(0_usize);
		let context = SuspenseContext::new({
			let pending = pending.clone();
			move || self::status_of(pending.get())
		})
		.with_counter(
			{
				let pending = pending.clone();
				move || pending.update(|pending| *pending += 1)
			},
			{
				let pending = pending.clone();
				move || {
					pending.update(|pending| {
						*pending = pending
							.checked_sub(1)
							.expect("Suspense boundary was decremented more than incremented");
					});
				}
			},
		);

		let scope = parent.child();
		scope.provide(context);

		Self { pending, scope }
	}

	/// Returns the scope of this boundary
	#[must_use]
	pub const fn scope(&self) -> &Scope {
		&self.scope
	}

	/// Returns the number of pending requests.
	///
	/// Gathers dependencies.
	#[must_use]
	pub fn pending(&self) -> usize {
		self.pending.get()
	}

	/// Returns the status of this boundary.
	///
	/// Gathers dependencies.
	#[must_use]
	pub fn status(&self) -> SuspenseStatus {
		self::status_of(self.pending.get())
	}

	/// Returns the context this boundary provides
	#[must_use]
	pub fn context(&self) -> SuspenseContext {
		self.scope.expect_cloned()
	}
}

/// Returns the status for a number of pending requests
const fn status_of(pending: usize) -> SuspenseStatus {
	match pending {
		0 => SuspenseStatus::Running,
		_ => SuspenseStatus::Suspended,
	}
}

/// Suspense lookups on a scope
#[extend::ext(name = ScopeSuspense)]
pub impl Scope {
	/// Returns the nearest suspense context, or the default one if
	/// no boundary encloses this scope.
	fn suspense(&self) -> SuspenseContext {
		self.get_or_default::<SuspenseContext>()
	}

	/// Returns the status of the nearest boundary
	fn suspense_status(&self) -> SuspenseStatus {
		self.suspense().status()
	}
}
