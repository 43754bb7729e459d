//! Reactivity for `suspensor`
//!
//! Single-threaded, fine-grained reactivity: [`Trigger`]s notify
//! [`Effect`]s, which re-run whenever a trigger they gathered during
//! their last run is executed. [`Signal`], [`Derived`] and [`Memo`]
//! are built on top of both.

// Modules
pub mod derived;
pub mod effect;
pub mod loc;
pub mod memo;
mod run_queue;
pub mod signal;
pub mod trigger;

// Exports
pub use self::{
	derived::Derived,
	effect::{Effect, WeakEffect},
	loc::Loc,
	memo::Memo,
	signal::{Signal, SignalGet, SignalGetCloned, SignalReplace, SignalSet, SignalUpdate, SignalWith},
	trigger::{Trigger, TriggerExec, WeakTrigger},
};
