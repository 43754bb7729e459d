//! # Memo'd signals
//!
//! Like [`Derived`](crate::Derived), but subscribers are only
//! notified when the computed value actually changes.

// Imports
use {
	crate::{Effect, Signal, SignalSet, SignalWith},
	core::fmt,
};

/// Memo signal.
///
/// See the module documentation for more information.
pub struct Memo<T> {
	/// Value
	value: Signal<Option<T>>,

	/// Effect
	effect: Effect,
}

impl<T> Memo<T> {
	/// Creates a new memo'd signal
	#[track_caller]
	pub fn new<F>(f: F) -> Self
	where
		T: PartialEq + 'static,
		F: Fn() -> T + 'static,
	{
		let value = Signal::new(None);
		let effect = Effect::new({
			let value = value.clone();
			move || {
				let new_value = f();

				// Write the new value, if it's different from the previous
				// Note: Since we're comparing against `Some(_)`, the first
				//       value is always written.
				let is_same = value.with_raw(|value| value.as_ref() == Some(&new_value));
				if !is_same {
					value.set(Some(new_value));
				}
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

impl<T> SignalWith for Memo<T> {
	type Value = T;

	fn with<F, O>(&self, f: F) -> O
	where
		F: FnOnce(&T) -> O,
	{
		self.value
			.with(|value| f(value.as_ref().expect("Memo value wasn't initialized")))
	}
}

impl<T> Clone for Memo<T> {
	fn clone(&self) -> Self {
		Self {
			value:  self.value.clone(),
			effect: self.effect.clone(),
		}
	}
}

impl<T: fmt::Debug> fmt::Debug for Memo<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Memo")
			.field("value", &self.value)
			.field("effect", &self.effect)
			.finish()
	}
}
