//! Dependency gatherer

use {super::Effect, core::marker::PhantomData};

/// Effect dependency gatherer.
///
/// While this type is alive, any signals used will
/// be added as a dependency.
pub struct EffectDepsGatherer<'a>(PhantomData<&'a Effect>);

impl<'a> EffectDepsGatherer<'a> {
	/// Creates a new dependency gatherer
	#[must_use]
	pub fn new(effect: &'a Effect) -> Self {
		// Push the effect onto the stack
		super::push(Some(effect.clone()));

		Self(PhantomData)
	}
}

impl Drop for EffectDepsGatherer<'_> {
	fn drop(&mut self) {
		// Pop our effect from the stack
		super::pop();
	}
}
