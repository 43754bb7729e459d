//! Request handling

// Imports
use {
	crate::{Executor, ResourceState, SuspenseContext},
	core::{cell::Cell, future::Future},
	std::rc::Rc,
	suspensor_reactive::{Loc, Signal, SignalSet},
};

/// Request generation.
///
/// Bumped at the start of each run, and once the resource is dropped.
#[derive(Clone, Default, Debug)]
pub struct Generation {
	/// Current generation
	current: Rc<Cell<u64>>,
}

impl Generation {
	/// Returns a token for the current generation
	#[must_use]
	pub fn token(&self) -> Token {
		Token {
			generation: self.clone(),
			value:      self.current.get(),
		}
	}

	/// Invalidates all tokens issued so far
	pub fn invalidate(&self) {
		self.current.set(self.current.get().wrapping_add(1));
	}
}

/// Generation token
#[derive(Debug)]
pub struct Token {
	/// Generation the token was issued from
	generation: Generation,

	/// Generation value when issued
	value: u64,
}

impl Token {
	/// Returns whether the run that issued this token was superseded
	#[must_use]
	pub fn is_stale(&self) -> bool {
		self.generation.current.get() != self.value
	}
}

/// Requester.
///
/// Starts requests on behalf of a single resource.
pub struct Requester<T, E> {
	/// Resource state
	state: Signal<ResourceState<T, E>>,

	/// Nearest suspense context
	suspense: SuspenseContext,

	/// Executor
	executor: Executor,

	/// Where the resource was defined
	defined_loc: Loc,
}

impl<T, E> Requester<T, E> {
	/// Creates a new requester
	pub(crate) const fn new(
		state: Signal<ResourceState<T, E>>,
		suspense: SuspenseContext,
		executor: Executor,
		defined_loc: Loc,
	) -> Self {
		Self {
			state,
			suspense,
			executor,
			defined_loc,
		}
	}

	/// Marks the resource as idle, without requesting anything
	pub(crate) fn idle(&self) {
		tracing::trace!(resource=%self.defined_loc, "No resource requested");
		self.state.set(ResourceState::Idle);
	}

	/// Starts a request.
	///
	/// If `token` is stale by the time the request succeeds, the success is dropped.
	/// Failures are always applied.
	pub(crate) fn request<Fut>(&self, fut: Fut, token: Option<Token>)
	where
		T: 'static,
		E: 'static,
		Fut: Future<Output = Result<T, E>> + 'static,
	{
		tracing::debug!(resource=%self.defined_loc, tracked=token.is_some(), "Starting request");
		self.state.set(ResourceState::Loading);
		self.suspense.increment();

		// Balances the increment exactly once, either once the request settles,
		// or if it's dropped before then.
		let settled = scopeguard::guard(self.suspense.clone(), |suspense| suspense.decrement());

		let state = self.state.clone();
		let defined_loc = self.defined_loc;
		let request = async move {
			match fut.await {
				Ok(data) => match token.as_ref().is_some_and(Token::is_stale) {
					true => tracing::debug!(resource=%defined_loc, "Suppressing success of a superseded request"),
					false => {
						tracing::debug!(resource=%defined_loc, "Request succeeded");
						state.set(ResourceState::Ready(data));
					},
				},

				// Note: Unlike successes, failures of superseded requests still reach the state.
				Err(err) => {
					let stale = token.as_ref().is_some_and(Token::is_stale);
					tracing::debug!(resource=%defined_loc, stale, "Request failed");
					state.set(ResourceState::Failed(err));
				},
			}

			drop(settled);
		};

		if let Err(err) = self.executor.spawn(request) {
			tracing::error!(resource=%self.defined_loc, %err, "Unable to spawn request, it will never settle");
		}
	}
}

#[cfg(test)]
mod test {
	// Imports
	use super::Generation;

	#[test]
	fn tokens_go_stale() {
		let generation = Generation::default();
		let first = generation.token();
		assert!(!first.is_stale());

		generation.invalidate();
		let second = generation.token();
		assert!(first.is_stale());
		assert!(!second.is_stale());
	}
}
