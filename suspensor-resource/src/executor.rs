//! Executor
//!
//! Requests are driven by the host's own scheduler. An [`Executor`]
//! is the handle used to hand them over to it.

// Imports
use {
	core::{fmt, future::Future},
	futures::task::{LocalSpawn, LocalSpawnExt, SpawnError},
	std::rc::Rc,
	suspensor_context::Scope,
};

/// Executor error
#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// Unable to spawn
	#[error("Unable to spawn request")]
	Spawn(#[source] SpawnError),
}

/// Executor kind
#[derive(Clone)]
enum Kind {
	/// Local spawner
	Spawner(Rc<dyn LocalSpawn>),

	/// Tokio's local task set
	#[cfg(feature = "tokio")]
	Tokio,

	/// Javascript's microtask queue
	#[cfg(feature = "wasm-js-promise")]
	Wasm,
}

/// Executor
#[derive(Clone)]
pub struct Executor {
	/// Kind
	kind: Kind,
}

impl Executor {
	/// Creates an executor from a local spawner
	pub fn new<S>(spawner: S) -> Self
	where
		S: LocalSpawn + 'static,
	{
		Self {
			kind: Kind::Spawner(Rc::new(spawner)),
		}
	}

	/// Creates an executor that spawns onto the current tokio `LocalSet`.
	///
	/// # Panics
	/// Spawning with the returned executor panics outside of a `LocalSet`.
	#[cfg(feature = "tokio")]
	#[must_use]
	pub const fn tokio() -> Self {
		Self { kind: Kind::Tokio }
	}

	/// Creates an executor that spawns onto the javascript event loop
	#[cfg(feature = "wasm-js-promise")]
	#[must_use]
	pub const fn wasm() -> Self {
		Self { kind: Kind::Wasm }
	}

	/// Returns the executor of the host, if any was compiled in
	#[must_use]
	pub const fn host() -> Option<Self> {
		#[cfg(feature = "wasm-js-promise")]
		let host = Some(Self::wasm());

		#[cfg(all(feature = "tokio", not(feature = "wasm-js-promise")))]
		let host = Some(Self::tokio());

		#[cfg(not(any(feature = "tokio", feature = "wasm-js-promise")))]
		let host = None;

		host
	}

	/// Returns the nearest executor provided on `scope`, or the host's.
	#[must_use]
	pub fn nearest(scope: &Scope) -> Option<Self> {
		scope.get_cloned::<Self>().or_else(Self::host)
	}

	/// Expects an executor to be reachable from `scope`.
	///
	/// # Panics
	/// Panics if no scope provides one and no host executor was compiled in.
	#[must_use]
	#[track_caller]
	pub fn expect_nearest(scope: &Scope) -> Self {
		Self::nearest(scope).unwrap_or_else(|| {
			panic!(
				"No executor was provided on the scope and no host executor is enabled, provide one with \
				 `scope.provide(Executor::new(...))`"
			)
		})
	}

	/// Spawns a future.
	///
	/// The future is detached and runs until completion, or until the
	/// executor is dropped.
	///
	/// # Panics
	/// A tokio executor panics when spawning outside of a `LocalSet`.
	pub fn spawn<F>(&self, fut: F) -> Result<(), Error>
	where
		F: Future<Output = ()> + 'static,
	{
		match &self.kind {
			Kind::Spawner(spawner) => spawner.spawn_local(fut).map_err(Error::Spawn),

			#[cfg(feature = "tokio")]
			Kind::Tokio => {
				drop(tokio::task::spawn_local(fut));
				Ok(())
			},

			#[cfg(feature = "wasm-js-promise")]
			Kind::Wasm => {
				wasm_bindgen_futures::spawn_local(fut);
				Ok(())
			},
		}
	}
}

impl fmt::Debug for Executor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let kind = match self.kind {
			Kind::Spawner(_) => "spawner",
			#[cfg(feature = "tokio")]
			Kind::Tokio => "tokio",
			#[cfg(feature = "wasm-js-promise")]
			Kind::Wasm => "wasm",
		};

		f.debug_struct("Executor").field("kind", &kind).finish_non_exhaustive()
	}
}

#[cfg(test)]
mod test {
	// Imports
	use {
		super::{Error, Executor},
		core::cell::Cell,
		futures::executor::LocalPool,
		suspensor_context::Scope,
	};

	#[test]
	fn spawns_on_pool() {
		thread_local! {
			static RAN: Cell<bool> = const { Cell::new(false) };
		}

		let mut pool = LocalPool::new();
		let executor = Executor::new(pool.spawner());
		executor.spawn(async { RAN.set(true) }).expect("Unable to spawn");
		assert!(!RAN.get(), "Future ran before the pool was driven");

		pool.run_until_stalled();
		assert!(RAN.get());
	}

	#[test]
	fn nearest_from_scope() {
		let pool = LocalPool::new();
		let root = Scope::root();
		root.provide(Executor::new(pool.spawner()));

		let executor = Executor::nearest(&root.child().child()).expect("Missing executor");
		assert_eq!(format!("{executor:?}"), r#"Executor { kind: "spawner" }"#);
	}

	#[test]
	fn spawn_after_shutdown() {
		let pool = LocalPool::new();
		let executor = Executor::new(pool.spawner());
		drop(pool);

		let err = executor.spawn(async {}).expect_err("Spawned onto a dropped pool");
		assert!(matches!(err, Error::Spawn(err) if err.is_shutdown()));
	}
}
