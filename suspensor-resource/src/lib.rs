//! Resources for `suspensor`
//!
//! Loads asynchronous requests into reactive state, while keeping the
//! nearest suspense boundary informed of how many are still pending.
//!
//! # Stale requests
//! When a tracked resource re-runs before it's previous request settled, the
//! previous request is superseded. Superseded successes never reach the state,
//! but superseded failures still do. This is intentional, as it lets a failure
//! surface even if a newer request is still in flight.
//!
//! The underlying futures are never cancelled, only the write of their result is.

// Modules
pub mod executor;
pub mod lazy;
pub mod resource;
pub mod state;
pub mod suspense;

// Exports
pub use self::{
	executor::Executor,
	lazy::{lazy, Component, Lazy},
	resource::{load_resource, Resource, ResourceSource, Tracked, Untracked},
	state::ResourceState,
	suspense::{ScopeSuspense, SuspenseBoundary, SuspenseContext, SuspenseStatus},
};
