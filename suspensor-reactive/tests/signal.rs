//! Signal, derived and memo tests

// Imports
use {
	core::cell::Cell,
	suspensor_reactive::{
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
	},
};

#[test]
fn signal_notifies() {
	thread_local! {
		static RUNS: Cell<usize> = const { Cell::new(0) };
		static LAST: Cell<i32> = const { Cell::new(0) };
	}

	let sig = Signal::new(1_i32);
	let _effect = Effect::new({
		let sig = sig.clone();
		move || {
			LAST.set(sig.get());
			RUNS.set(RUNS.get() + 1);
		}
	});
	assert_eq!((RUNS.get(), LAST.get()), (1, 1));

	sig.set(5);
	assert_eq!((RUNS.get(), LAST.get()), (2, 5));

	let prev = sig.replace(7);
	assert_eq!(prev, 5);
	assert_eq!((RUNS.get(), LAST.get()), (3, 7));

	sig.update(|value| *value += 1);
	assert_eq!((RUNS.get(), LAST.get()), (4, 8));
}

#[test]
fn raw_reads_are_untracked() {
	thread_local! {
		static RUNS: Cell<usize> = const { Cell::new(0) };
	}

	let sig = Signal::new(String::from("a"));
	let _effect = Effect::new({
		let sig = sig.clone();
		move || {
			let _value = sig.get_cloned_raw();
			let _len = effect::untracked(|| sig.with(String::len));
			RUNS.set(RUNS.get() + 1);
		}
	});

	sig.set(String::from("b"));
	assert_eq!(RUNS.get(), 1, "Effect re-ran after an untracked read");
}

#[test]
fn derived_recomputes() {
	thread_local! {
		static COMPUTES: Cell<usize> = const { Cell::new(0) };
	}

	let sig = Signal::new(2_usize);
	let derived = Derived::new({
		let sig = sig.clone();
		move || {
			COMPUTES.set(COMPUTES.get() + 1);
			sig.get() * 10
		}
	});
	assert_eq!(derived.get_raw(), 20);
	assert_eq!(COMPUTES.get(), 1);

	// Reading doesn't recompute
	assert_eq!(derived.get_raw(), 20);
	assert_eq!(COMPUTES.get(), 1, "Derived recomputed on read");

	sig.set(3);
	assert_eq!(derived.get_raw(), 30);
	assert_eq!(COMPUTES.get(), 2);
}

#[test]
fn memo_skips_equal_values() {
	thread_local! {
		static RUNS: Cell<usize> = const { Cell::new(0) };
	}

	let sig = Signal::new(4_i32);
	let is_even = Memo::new({
		let sig = sig.clone();
		move || sig.get() % 2 == 0
	});
	let _effect = Effect::new({
		let is_even = is_even.clone();
		move || {
			let _is_even = is_even.get();
			RUNS.set(RUNS.get() + 1);
		}
	});
	assert_eq!(RUNS.get(), 1);

	sig.set(6);
	assert_eq!(RUNS.get(), 1, "Memo notified despite an equal value");

	sig.set(7);
	assert!(!is_even.get_raw());
	assert_eq!(RUNS.get(), 2, "Memo didn't notify on a new value");
}
