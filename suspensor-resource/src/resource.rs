//! Resource
//!
//! A [`Resource`] binds a request to a reactive [`ResourceState`].
//!
//! Resources are either tracked, where the request is produced by a
//! function that is re-run whenever any signal it reads changes, or
//! untracked, where a single request is started right away.
//!
//! Each request reports to the nearest [`SuspenseBoundary`](crate::SuspenseBoundary)
//! while it's pending.

// Modules
mod request;

// Imports
use {
	self::request::{Generation, Requester},
	crate::{Executor, ResourceState, ScopeSuspense},
	core::{fmt, future::Future},
	suspensor_context::Scope,
	suspensor_reactive::{effect, Effect, Loc, Signal, SignalGetCloned, SignalWith},
};

/// Source of a resource.
///
/// Implemented by [`Tracked`] and [`Untracked`].
pub trait ResourceSource<T, E> {
	/// Starts loading into `requester`.
	///
	/// Returns the effect that keeps re-requesting, if any.
	fn start(self, requester: Requester<T, E>) -> Option<Effect>;
}

/// Tracked source.
///
/// Wraps a function producing the request. The function is re-run, and
/// a new request started, whenever any signal read within it changes.
/// Returning `None` requests nothing.
#[derive(Clone, Copy, Debug)]
pub struct Tracked<F>(pub F);

impl<F, Fut, T, E> ResourceSource<T, E> for Tracked<F>
where
	F: Fn() -> Option<Fut> + 'static,
	Fut: Future<Output = Result<T, E>> + 'static,
	T: 'static,
	E: 'static,
{
	fn start(self, requester: Requester<T, E>) -> Option<Effect> {
		let Self(source) = self;
		let generation = Generation::default();
		let effect = Effect::new(move || {
			// Every run supersedes all previous ones, including any run
			// still underway further up the stack.
			generation.invalidate();
			let token = generation.token();

			let Some(fut) = source() else {
				requester.idle();
				return;
			};

			effect::untracked(|| requester.request(fut, Some(token)));

			// Once the resource is dropped, any success is stale
			let generation = generation.clone();
			effect::on_cleanup(move || generation.invalidate());
		});

		Some(effect)
	}
}

/// Untracked source.
///
/// Wraps a single request, started as soon as the resource is created.
#[derive(Clone, Copy, Debug)]
pub struct Untracked<Fut>(pub Fut);

impl<Fut, T, E> ResourceSource<T, E> for Untracked<Fut>
where
	Fut: Future<Output = Result<T, E>> + 'static,
	T: 'static,
	E: 'static,
{
	fn start(self, requester: Requester<T, E>) -> Option<Effect> {
		let Self(fut) = self;
		effect::untracked(|| requester.request(fut, None));

		None
	}
}

/// Resource
pub struct Resource<T, E> {
	/// State
	state: Signal<ResourceState<T, E>>,

	/// Effect, if tracked
	effect: Option<Effect>,
}

impl<T, E> Resource<T, E> {
	/// Creates a tracked resource.
	///
	/// See [`Tracked`] for more details.
	#[track_caller]
	pub fn tracked<F, Fut>(scope: &Scope, source: F) -> Self
	where
		F: Fn() -> Option<Fut> + 'static,
		Fut: Future<Output = Result<T, E>> + 'static,
		T: 'static,
		E: 'static,
	{
		self::load_resource(scope, Tracked(source))
	}

	/// Creates an untracked resource.
	///
	/// See [`Untracked`] for more details.
	#[track_caller]
	pub fn untracked<Fut>(scope: &Scope, fut: Fut) -> Self
	where
		Fut: Future<Output = Result<T, E>> + 'static,
		T: 'static,
		E: 'static,
	{
		self::load_resource(scope, Untracked(fut))
	}

	/// Returns whether a request is in flight.
	///
	/// Gathers dependencies.
	#[must_use]
	pub fn loading(&self) -> bool {
		self.state.with(ResourceState::loading)
	}

	/// Returns a clone of the loaded data, if any.
	///
	/// Gathers dependencies.
	#[must_use]
	pub fn data(&self) -> Option<T>
	where
		T: Clone,
	{
		self.state.with(|state| state.data().cloned())
	}

	/// Returns a clone of the state
	///
	/// Gathers dependencies.
	#[must_use]
	pub fn state(&self) -> ResourceState<T, E>
	where
		T: Clone,
		E: Clone,
	{
		self.state.get_cloned()
	}

	/// Returns the effect re-requesting this resource, if tracked
	#[must_use]
	pub const fn effect(&self) -> Option<&Effect> {
		self.effect.as_ref()
	}

	/// Returns whether this resource is tracked
	#[must_use]
	pub const fn is_tracked(&self) -> bool {
		self.effect.is_some()
	}
}

impl<T, E> SignalWith for Resource<T, E> {
	type Value = ResourceState<T, E>;

	fn with<F, O>(&self, f: F) -> O
	where
		F: FnOnce(&ResourceState<T, E>) -> O,
	{
		self.state.with(f)
	}
}

impl<T, E> Clone for Resource<T, E> {
	fn clone(&self) -> Self {
		Self {
			state:  self.state.clone(),
			effect: self.effect.clone(),
		}
	}
}

impl<T: fmt::Debug, E: fmt::Debug> fmt::Debug for Resource<T, E> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Resource")
			.field("state", &self.state)
			.field("effect", &self.effect)
			.finish_non_exhaustive()
	}
}

/// Loads a resource from `source`.
///
/// The request reports to the nearest suspense boundary of `scope`, and is
/// spawned on the nearest executor of `scope`, or the host's, if none is provided.
///
/// # Panics
/// Panics if no executor is reachable from `scope`.
///
/// When the tokio host executor is used, panics outside of a tokio `LocalSet`.
#[must_use]
#[track_caller]
pub fn load_resource<T, E, S>(scope: &Scope, source: S) -> Resource<T, E>
where
	S: ResourceSource<T, E>,
{
	let defined_loc = Loc::caller();
	let executor = Executor::expect_nearest(scope);
	let state = Signal::new(ResourceState::Idle);

	let requester = Requester::new(state.clone(), scope.suspense(), executor, defined_loc);
	let effect = source.start(requester);

	Resource { state, effect }
}
