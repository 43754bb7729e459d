//! Effect-trigger tests

// Imports
use {
	core::{cell::Cell, mem},
	suspensor_reactive::{Effect, Trigger},
};

#[test]
fn reruns_until_dropped() {
	thread_local! {
		static RUNS: Cell<usize> = const { Cell::new(0) };
	}

	let trigger = Trigger::new();
	let effect = Effect::new({
		let trigger = trigger.clone();
		move || {
			trigger.gather_subs();
			RUNS.set(RUNS.get() + 1);
		}
	});
	assert_eq!(RUNS.get(), 1, "Effect didn't run on creation");

	trigger.exec();
	assert_eq!(RUNS.get(), 2, "Effect didn't re-run");

	mem::drop(effect);
	trigger.exec();
	assert_eq!(RUNS.get(), 2, "Dropped effect re-ran");
	assert_eq!(trigger.subscribers_len(), 0);
}

/// Ensures effects only run once the last execution is dropped
#[test]
fn nested_execs() {
	thread_local! {
		static RUNS: Cell<usize> = const { Cell::new(0) };
	}

	let trigger = Trigger::new();
	let _effect = Effect::new({
		let trigger = trigger.clone();
		move || {
			trigger.gather_subs();
			RUNS.set(RUNS.get() + 1);
		}
	});

	let outer = trigger.exec();
	let inner = trigger.exec();
	assert_eq!(RUNS.get(), 1, "Effect ran while executions were alive");

	drop(inner);
	assert_eq!(RUNS.get(), 1, "Effect ran before the outer execution was dropped");

	drop(outer);
	assert_eq!(RUNS.get(), 2, "Effect didn't run after all executions were dropped");
}

/// Ensures an effect queued by several triggers only runs once
#[test]
fn queued_once() {
	thread_local! {
		static RUNS: Cell<usize> = const { Cell::new(0) };
	}

	let lhs = Trigger::new();
	let rhs = Trigger::new();
	let _effect = Effect::new({
		let lhs = lhs.clone();
		let rhs = rhs.clone();
		move || {
			lhs.gather_subs();
			rhs.gather_subs();
			RUNS.set(RUNS.get() + 1);
		}
	});

	drop((lhs.exec(), rhs.exec()));
	assert_eq!(RUNS.get(), 2, "Effect ran more than once for a single drain");

	lhs.exec();
	assert_eq!(RUNS.get(), 3);
}

/// Ensures dependencies from a previous run are forgotten
#[test]
fn dynamic_dependencies() {
	thread_local! {
		static RUNS: Cell<usize> = const { Cell::new(0) };

		/// Whether the effect should gather the first trigger
		static USE_FIRST: Cell<bool> = const { Cell::new(true) };
	}

	let trigger0 = Trigger::new();
	let trigger1 = Trigger::new();
	let effect = Effect::new({
		let trigger0 = trigger0.clone();
		let trigger1 = trigger1.clone();
		move || {
			match USE_FIRST.get() {
				true => trigger0.gather_subs(),
				false => trigger1.gather_subs(),
			}
			RUNS.set(RUNS.get() + 1);
		}
	});
	assert_eq!(effect.dependencies_len(), 1);

	// Switch over to the second trigger
	USE_FIRST.set(false);
	trigger0.exec();
	assert_eq!(RUNS.get(), 2, "Effect wasn't run by it's first dependency");
	assert_eq!(trigger0.subscribers_len(), 0, "Effect stayed subscribed to it's old dependency");

	// Now the first trigger shouldn't do anything anymore
	trigger0.exec();
	assert_eq!(RUNS.get(), 2, "Effect was run by a forgotten dependency");

	trigger1.exec();
	assert_eq!(RUNS.get(), 3, "Effect wasn't run by it's new dependency");
}
