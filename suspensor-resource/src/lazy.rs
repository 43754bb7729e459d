//! Lazy components
//!
//! A [`Lazy`] loads a component in the background, and renders
//! nothing until it's available.

// Imports
use {
	crate::{Resource, ResourceState},
	core::{fmt, future::Future},
	suspensor_context::Scope,
	suspensor_reactive::{effect, Derived, SignalWith},
};

/// Component
pub trait Component<P> {
	/// Output
	type Output;

	/// Renders this component
	fn render(&self, props: P) -> Self::Output;
}

impl<F, P, O> Component<P> for F
where
	F: Fn(P) -> O,
{
	type Output = O;

	fn render(&self, props: P) -> O {
		self(props)
	}
}

/// Lazy component
pub struct Lazy<C, E> {
	/// Component resource
	resource: Resource<C, E>,
}

impl<C, E> Lazy<C, E> {
	/// Returns the resource loading the component
	#[must_use]
	pub const fn state(&self) -> &Resource<C, E> {
		&self.resource
	}

	/// Returns whether the component has loaded.
	///
	/// Gathers dependencies.
	#[must_use]
	pub fn is_loaded(&self) -> bool {
		self.resource.with(ResourceState::is_ready)
	}
}

impl<C, E, P> Component<P> for Lazy<C, E>
where
	C: Component<P, Output: 'static> + Clone + 'static,
	E: 'static,
	P: Clone + 'static,
{
	type Output = Derived<Option<C::Output>>;

	/// Renders the component once it's loaded.
	///
	/// The component is rendered untracked, so any signals it reads
	/// are gathered by it's own effects, not by the returned value.
	#[track_caller]
	fn render(&self, props: P) -> Self::Output {
		let resource = self.resource.clone();
		Derived::new(move || {
			let component = resource.with(|state| state.data().cloned())?;
			Some(effect::untracked(|| component.render(props.clone())))
		})
	}
}

impl<C, E> Clone for Lazy<C, E> {
	fn clone(&self) -> Self {
		Self {
			resource: self.resource.clone(),
		}
	}
}

impl<C: fmt::Debug, E: fmt::Debug> fmt::Debug for Lazy<C, E> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Lazy")
			.field("resource", &self.resource)
			.finish_non_exhaustive()
	}
}

/// Lazily loads a component.
///
/// `loader` is called once, right away, and the component it
/// produces is loaded as an untracked resource of `scope`.
#[must_use]
#[track_caller]
pub fn lazy<L, Fut, C, E>(scope: &Scope, loader: L) -> Lazy<C, E>
where
	L: FnOnce() -> Fut,
	Fut: Future<Output = Result<C, E>> + 'static,
	C: 'static,
	E: 'static,
{
	let resource = Resource::untracked(scope, loader());
	Lazy { resource }
}
