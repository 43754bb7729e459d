//! Tests

// Imports
use {
	super::{super::effect, *},
	core::cell::{Cell, OnceCell},
};

/// Ensures effects are executed
#[test]
fn run() {
	thread_local! {
		static COUNT: Cell<usize> = const { Cell::new(0) };
	}

	assert_eq!(COUNT.get(), 0);
	let effect = Effect::new(|| COUNT.set(COUNT.get() + 1));
	assert_eq!(COUNT.get(), 1, "Effect wasn't run on creation");
	effect.run();
	assert_eq!(COUNT.get(), 2, "Effect wasn't run when asked to");
}

/// Ensures the function returned by `Effect::running` is the same as the future being run.
#[test]
fn running() {
	thread_local! {
		static RUNNING: OnceCell<Effect> = const { OnceCell::new() };
	}

	// Create an effect, and save the running effect within it to `RUNNING`.
	let effect = Effect::new(move || {
		RUNNING.with(|running| {
			running
				.set(effect::running().expect("Effect wasn't running"))
				.expect("Unable to set running effect");
		});
	});

	// Then ensure the running effect is the same as the one created.
	let running = RUNNING.with(|running| running.get().cloned().expect("Running effect missing"));
	assert_eq!(effect, running);
	assert_eq!(effect::running(), None, "Effect was still running after it finished");
}

/// Ensures `untracked` hides the running effect
#[test]
fn untracked_hides_running() {
	thread_local! {
		static INNER: Cell<Option<bool>> = const { Cell::new(None) };
	}

	let _effect = Effect::new(move || {
		let is_running = effect::untracked(|| effect::running().is_some());
		INNER.set(Some(is_running));
		assert!(effect::running().is_some(), "Effect wasn't restored after `untracked`");
	});

	assert_eq!(INNER.get(), Some(false), "Effect was visible inside of `untracked`");
}

/// Ensures cleanups run before the next run, and on drop
#[test]
fn cleanup_order() {
	thread_local! {
		static RUNS: Cell<usize> = const { Cell::new(0) };
		static CLEANUPS: Cell<usize> = const { Cell::new(0) };
	}

	let effect = Effect::new(move || {
		// Every cleanup of the previous run must have happened by now
		assert_eq!(CLEANUPS.get(), RUNS.get(), "Cleanup of previous run didn't happen");
		RUNS.set(RUNS.get() + 1);
		effect::on_cleanup(|| CLEANUPS.set(CLEANUPS.get() + 1));
	});
	assert_eq!((RUNS.get(), CLEANUPS.get()), (1, 0));

	effect.run();
	assert_eq!((RUNS.get(), CLEANUPS.get()), (2, 1));

	drop(effect);
	assert_eq!((RUNS.get(), CLEANUPS.get()), (2, 2), "Dropping the effect didn't clean up");
}

/// Ensures the function returned by `Effect::running` is the same as the future being run,
/// while running stacked futures
#[test]
fn running_stacked() {
	thread_local! {
		static RUNNING_TOP: OnceCell<Effect> = const { OnceCell::new() };
		static RUNNING_BOTTOM: OnceCell<WeakEffect> = const { OnceCell::new() };
	}

	// Create 2 stacked effects, saving the running within each to `RUNNING_TOP` and `RUNNING_BOTTOM`.
	let effect = Effect::new(move || {
		RUNNING_TOP.with(|running| {
			running
				.set(effect::running().expect("Effect wasn't running"))
				.expect("Unable to set running effect");
		});

		let effect = Effect::new(move || {
			RUNNING_BOTTOM.with(|running| {
				running
					.set(effect::running().expect("Effect wasn't running").downgrade())
					.expect("Unable to set running effect");
			});
		});

		// Then ensure the bottom-level running effect is the same as the one created.
		let running_bottom = RUNNING_BOTTOM.with(|running| running.get().cloned().expect("Running effect missing"));
		assert_eq!(effect.downgrade(), running_bottom);
	});

	// Then ensure the top-level running effect is the same as the one created.
	let running_top = RUNNING_TOP.with(|running| running.get().cloned().expect("Running effect missing"));
	assert_eq!(effect, running_top);

	// And that the bottom-level running effect was already dropped
	let running_bottom = RUNNING_BOTTOM.with(|running| running.get().cloned().expect("Running effect missing"));
	assert!(!running_bottom.is_alive(), "Bottom effect outlived it's parent's run");
}
