//! Suspensor
//!
//! Asynchronous resources on top of fine-grained reactivity, with suspense
//! boundaries counting the requests pending beneath them.
//!
//! ```rust,no_run
//! use {
//! 	futures::executor::LocalPool,
//! 	suspensor::{Executor, Resource, Scope, SuspenseBoundary},
//! };
//!
//! let mut pool = LocalPool::new();
//! let root = Scope::root();
//! root.provide(Executor::new(pool.spawner()));
//!
//! let boundary = SuspenseBoundary::new(&root);
//! let resource = Resource::untracked(boundary.scope(), async { Ok::<_, ()>(42) });
//!
//! pool.run_until_stalled();
//! assert_eq!(resource.data(), Some(42));
//! ```

// Exports
pub use {
	suspensor_context::Scope,
	suspensor_reactive::{
		self as reactive,
		effect,
		Derived,
		Effect,
		Memo,
		Signal,
		SignalGet,
		SignalGetCloned,
		SignalReplace,
		SignalSet,
		SignalUpdate,
		SignalWith,
		Trigger,
	},
	suspensor_resource::{
		self as resource,
		lazy,
		load_resource,
		Component,
		Executor,
		Lazy,
		Resource,
		ResourceSource,
		ResourceState,
		ScopeSuspense,
		SuspenseBoundary,
		SuspenseContext,
		SuspenseStatus,
		Tracked,
		Untracked,
	},
};
