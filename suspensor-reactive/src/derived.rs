//! Derived signals
//!
//! A [`Derived`] caches the result of a function that reads other signals,
//! and recomputes it whenever any of them change.
//!
//! Lazy components render through one, so the component is only re-rendered
//! when the resource backing it changes, rather than on every read.
//!
//! ```rust,no_run
//! use suspensor_reactive::{Derived, Signal, SignalGet, SignalSet};
//!
//! let width = Signal::new(2);
//! let area = Derived::new({
//! 	let width = width.clone();
//! 	move || width.get() * width.get()
//! });
//! width.set(3);
//! assert_eq!(area.get_raw(), 9);
//! ```
//!
//! Every recomputation notifies readers, even if the value is the same.
//! See [`Memo`](crate::Memo) for a version that compares values first.

// Imports
use {
	crate::{Effect, Signal, SignalSet, SignalWith},
	core::fmt,
};

/// Derived signal.
///
/// See the module documentation for more information.
pub struct Derived<T> {
	/// Value
	value: Signal<Option<T>>,

	/// Effect
	effect: Effect,
}

impl<T> Derived<T> {
	/// Creates a new derived signal
	#[track_caller]
	pub fn new<F>(f: F) -> Self
	where
		T: 'static,
		F: Fn() -> T + 'static,
	{
		let value = Signal::new(None);
		let effect = Effect::new({
			let value = value.clone();
			move || {
				let new_value = f();
				value.set(Some(new_value));
			}
		});

		Self { value, effect }
	}

	/// Returns the effect computing this value
	#[must_use]
	pub const fn effect(&self) -> &Effect {
		&self.effect
	}
}

impl<T> SignalWith for Derived<T> {
	type Value = T;

	fn with<F, O>(&self, f: F) -> O
	where
		F: FnOnce(&T) -> O,
	{
		self.value
			.with(|value| f(value.as_ref().expect("Derived value wasn't initialized")))
	}
}

impl<T> Clone for Derived<T> {
	fn clone(&self) -> Self {
		Self {
			value:  self.value.clone(),
			effect: self.effect.clone(),
		}
	}
}

impl<T: fmt::Debug> fmt::Debug for Derived<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Derived")
			.field("value", &self.value)
			.field("effect", &self.effect)
			.finish()
	}
}
