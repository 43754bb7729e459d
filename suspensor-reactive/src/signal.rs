//! Signal
//!
//! A read-write value that automatically updates
//! any subscribers when changed.

// Modules
pub mod ops;

// Exports
pub use self::ops::{SignalGet, SignalGetCloned, SignalReplace, SignalSet, SignalUpdate, SignalWith};

// Imports
use {
	crate::Trigger,
	core::{cell::RefCell, fmt},
	std::rc::Rc,
};

/// Inner
struct Inner<T> {
	/// Value
	value: RefCell<T>,

	/// Trigger
	trigger: Trigger,
}

/// Signal
pub struct Signal<T> {
	/// Inner
	inner: Rc<Inner<T>>,
}

impl<T> Signal<T> {
	/// Creates a new signal
	#[track_caller]
	pub fn new(value: T) -> Self {
		let inner = Inner {
			value:   RefCell::new(value),
			trigger: Trigger::new(),
		};
		Self { inner: Rc::new(inner) }
	}

	/// Updates the signal value without notifying any subscribers
	pub fn update_raw<F, O>(&self, f: F) -> O
	where
		F: FnOnce(&mut T) -> O,
	{
		let mut value = self
			.inner
			.value
			.try_borrow_mut()
			.expect("Cannot update signal value while using it");
		f(&mut value)
	}
}

impl<T> SignalWith for Signal<T> {
	type Value = T;

	fn with<F, O>(&self, f: F) -> O
	where
		F: FnOnce(&T) -> O,
	{
		self.inner.trigger.gather_subs();

		let value = self
			.inner
			.value
			.try_borrow()
			.expect("Cannot use signal value while updating");
		f(&value)
	}
}

impl<T> SignalUpdate for Signal<T> {
	type Value = T;

	fn update<F, O>(&self, f: F) -> O
	where
		F: FnOnce(&mut T) -> O,
	{
		// Update the value and get the output
		let output = self.update_raw(f);

		// Then trigger our trigger
		// Note: The borrow must be released by now, since subscribers
		//       are run as soon as the execution is dropped.
		self.inner.trigger.exec();

		output
	}
}

impl<T> Clone for Signal<T> {
	fn clone(&self) -> Self {
		Self {
			inner: Rc::clone(&self.inner),
		}
	}
}

impl<T: Default> Default for Signal<T> {
	#[track_caller]
	fn default() -> Self {
		Self::new(T::default())
	}
}

impl<T: fmt::Debug> fmt::Debug for Signal<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut s = f.debug_struct("Signal");
		match self.inner.value.try_borrow() {
			Ok(value) => s.field("value", &*value),
			Err(_) => s.field("value", &"<borrowed>"),
		};
		s.field("trigger", &self.inner.trigger).finish()
	}
}
