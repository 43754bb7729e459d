//! Resource state

/// State of a resource.
///
/// Mirrors the record `{ loading, data?, error? }`, but only
/// one of it's four phases can be represented at a time.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum ResourceState<T, E> {
	/// Nothing was requested
	Idle,

	/// A request is in flight
	Loading,

	/// The last applied request succeeded
	Ready(T),

	/// The last applied request failed
	Failed(E),
}

impl<T, E> ResourceState<T, E> {
	/// Returns if a request is in flight
	#[must_use]
	pub const fn loading(&self) -> bool {
		matches!(self, Self::Loading)
	}

	/// Returns the loaded data, if any
	#[must_use]
	pub const fn data(&self) -> Option<&T> {
		match self {
			Self::Ready(data) => Some(data),
			_ => None,
		}
	}

	/// Returns the load error, if any
	#[must_use]
	pub const fn error(&self) -> Option<&E> {
		match self {
			Self::Failed(err) => Some(err),
			_ => None,
		}
	}

	/// Returns if nothing was requested
	#[must_use]
	pub const fn is_idle(&self) -> bool {
		matches!(self, Self::Idle)
	}

	/// Returns if the state holds data
	#[must_use]
	pub const fn is_ready(&self) -> bool {
		matches!(self, Self::Ready(_))
	}

	/// Returns if the state holds an error
	#[must_use]
	pub const fn is_failed(&self) -> bool {
		matches!(self, Self::Failed(_))
	}

	/// Returns if the state is settled, either with data or an error
	#[must_use]
	pub const fn is_settled(&self) -> bool {
		self.is_ready() || self.is_failed()
	}

	/// Returns this state by reference
	#[must_use]
	pub const fn as_ref(&self) -> ResourceState<&T, &E> {
		match self {
			Self::Idle => ResourceState::Idle,
			Self::Loading => ResourceState::Loading,
			Self::Ready(data) => ResourceState::Ready(data),
			Self::Failed(err) => ResourceState::Failed(err),
		}
	}

	/// Maps the data of this state
	pub fn map<U, F>(self, f: F) -> ResourceState<U, E>
	where
		F: FnOnce(T) -> U,
	{
		match self {
			Self::Idle => ResourceState::Idle,
			Self::Loading => ResourceState::Loading,
			Self::Ready(data) => ResourceState::Ready(f(data)),
			Self::Failed(err) => ResourceState::Failed(err),
		}
	}

	/// Converts this state into a result, if settled.
	pub fn into_result(self) -> Option<Result<T, E>> {
		match self {
			Self::Idle | Self::Loading => None,
			Self::Ready(data) => Some(Ok(data)),
			Self::Failed(err) => Some(Err(err)),
		}
	}
}

impl<T, E> Default for ResourceState<T, E> {
	fn default() -> Self {
		Self::Idle
	}
}

#[cfg(test)]
mod test {
	// Imports
	use super::ResourceState;

	#[test]
	fn record_view() {
		let idle = ResourceState::<i32, &str>::Idle;
		assert!(!idle.loading());
		assert_eq!((idle.data(), idle.error()), (None, None));

		let loading = ResourceState::<i32, &str>::Loading;
		assert!(loading.loading());
		assert!(!loading.is_settled());

		let ready = ResourceState::<i32, &str>::Ready(42);
		assert!(!ready.loading());
		assert_eq!((ready.data(), ready.error()), (Some(&42), None));

		let failed = ResourceState::<i32, &str>::Failed("nope");
		assert!(!failed.loading());
		assert_eq!((failed.data(), failed.error()), (None, Some(&"nope")));
	}

	#[test]
	fn into_result() {
		assert_eq!(ResourceState::<i32, ()>::Loading.into_result(), None);
		assert_eq!(ResourceState::<i32, ()>::Ready(1).map(|x| x + 1).into_result(), Some(Ok(2)));
		assert_eq!(ResourceState::<i32, ()>::Failed(()).into_result(), Some(Err(())));
	}
}
