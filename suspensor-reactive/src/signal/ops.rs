//! Signal operators

// Imports
use {crate::effect, core::mem};

/// Signal with
pub trait SignalWith {
	/// Value type
	type Value: ?Sized;

	/// Uses the signal value
	#[track_caller]
	fn with<F, O>(&self, f: F) -> O
	where
		F: FnOnce(&Self::Value) -> O;

	/// Uses the signal value without gathering dependencies
	#[track_caller]
	fn with_raw<F, O>(&self, f: F) -> O
	where
		F: FnOnce(&Self::Value) -> O,
	{
		effect::untracked(|| self.with(f))
	}
}

/// Signal get
pub trait SignalGet {
	/// Value type
	type Value;

	/// Gets the signal value, by copying it.
	#[track_caller]
	fn get(&self) -> Self::Value;

	/// Gets the signal value, by copying it, without gathering dependencies
	#[track_caller]
	fn get_raw(&self) -> Self::Value {
		effect::untracked(|| self.get())
	}
}

impl<S> SignalGet for S
where
	S: SignalWith<Value: Copy>,
{
	type Value = <S as SignalWith>::Value;

	fn get(&self) -> <S as SignalWith>::Value {
		self.with(|value| *value)
	}
}

/// Signal cloned
pub trait SignalGetCloned {
	/// Value type
	type Value;

	/// Gets the signal value, by cloning it.
	#[track_caller]
	fn get_cloned(&self) -> Self::Value;

	/// Gets the signal value, by cloning it, without gathering dependencies
	#[track_caller]
	fn get_cloned_raw(&self) -> Self::Value {
		effect::untracked(|| self.get_cloned())
	}
}

impl<S> SignalGetCloned for S
where
	S: SignalWith<Value: Clone>,
{
	type Value = <S as SignalWith>::Value;

	fn get_cloned(&self) -> <S as SignalWith>::Value {
		self.with(Clone::clone)
	}
}

/// Signal update
pub trait SignalUpdate {
	/// Value type
	type Value: ?Sized;

	/// Updates the signal value
	#[track_caller]
	fn update<F, O>(&self, f: F) -> O
	where
		F: FnOnce(&mut Self::Value) -> O;
}

/// Signal set
pub trait SignalSet<Value> {
	/// Sets the signal value
	#[track_caller]
	fn set(&self, new_value: Value);
}

impl<S, T> SignalSet<T> for S
where
	S: SignalUpdate<Value = T>,
{
	fn set(&self, new_value: T) {
		self.update(|value| *value = new_value);
	}
}

/// Signal replace
pub trait SignalReplace<Value> {
	/// Replaces the signal value, returning the previous value
	#[track_caller]
	fn replace(&self, new_value: Value) -> Value;
}

impl<S, T> SignalReplace<T> for S
where
	S: SignalUpdate<Value = T>,
{
	fn replace(&self, new_value: T) -> T {
		self.update(|value| mem::replace(value, new_value))
	}
}
