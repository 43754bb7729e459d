//! Context passing for `suspensor`
//!
//! Values are provided on a [`Scope`], and looked up from
//! any of it's descendants. Lookups walk the parent chain, so
//! the nearest scope that provides a value of a type wins.
//!
//! Unlike a thread-local context stack, scopes are passed
//! around explicitly, so the value a lookup resolves to only
//! depends on where in the tree the lookup starts.

// Imports
use {
	core::{
		any::{self, Any, TypeId},
		cell::RefCell,
		fmt,
	},
	std::{collections::HashMap, rc::Rc},
};

/// Scope inner
struct Inner {
	/// Parent
	parent: Option<Scope>,

	/// Values provided at this scope
	values: RefCell<HashMap<TypeId, Box<dyn Any>>>,
}

/// A node of the context tree.
///
/// Cloning a scope returns another handle to the same node.
pub struct Scope {
	/// Inner
	inner: Rc<Inner>,
}

impl Scope {
	/// Creates a new root scope
	#[must_use]
	pub fn root() -> Self {
		Self::new(None)
	}

	/// Creates a child of this scope
	#[must_use]
	pub fn child(&self) -> Self {
		Self::new(Some(self.clone()))
	}

	/// Creates a new scope
	fn new(parent: Option<Self>) -> Self {
		let inner = Inner {
			parent,
			values: RefCell::new(HashMap::new()),
		};
		Self { inner: Rc::new(inner) }
	}

	/// Returns the parent of this scope
	#[must_use]
	pub fn parent(&self) -> Option<&Self> {
		self.inner.parent.as_ref()
	}

	/// Returns the number of ancestors of this scope
	#[must_use]
	pub fn depth(&self) -> usize {
		self.ancestors().count() - 1
	}

	/// Returns an iterator over this scope and all of it's ancestors, nearest first
	pub fn ancestors(&self) -> impl Iterator<Item = &Self> {
		core::iter::successors(Some(self), |scope| scope.parent())
	}

	/// Provides a value of `T` at this scope.
	///
	/// Returns the value of `T` previously provided at this exact scope, if any.
	pub fn provide<T>(&self, value: T) -> Option<T>
	where
		T: Any,
	{
		let prev = self
			.inner
			.values
			.try_borrow_mut()
			.expect("Cannot provide context while accessing it")
			.insert(TypeId::of::<T>(), Box::new(value))?;

		let prev = prev.downcast::<T>().expect("Value was the wrong type");
		Some(*prev)
	}

	/// Takes the value of `T` provided at this exact scope.
	#[must_use = "If you only wish to remove the context, consider dropping the value"]
	pub fn take<T>(&self) -> Option<T>
	where
		T: Any,
	{
		let value = self
			.inner
			.values
			.try_borrow_mut()
			.expect("Cannot take context while accessing it")
			.remove(&TypeId::of::<T>())?;

		let value = value.downcast::<T>().expect("Value was the wrong type");
		Some(*value)
	}

	/// Returns whether this exact scope provides a value of `T`.
	#[must_use]
	pub fn provides<T>(&self) -> bool
	where
		T: Any,
	{
		self.inner.values.borrow().contains_key(&TypeId::of::<T>())
	}

	/// Uses the nearest value of `T`.
	pub fn with<T, F, O>(&self, f: F) -> O
	where
		T: Any,
		F: FnOnce(Option<&T>) -> O,
	{
		for scope in self.ancestors() {
			let values = scope
				.inner
				.values
				.try_borrow()
				.expect("Cannot access context while modifying it");
			if let Some(value) = values.get(&TypeId::of::<T>()) {
				let value = value.downcast_ref::<T>().expect("Value was the wrong type");
				return f(Some(value));
			}
		}

		f(None)
	}

	/// Uses the nearest value of `T`, expecting it.
	#[track_caller]
	pub fn with_expect<T, F, O>(&self, f: F) -> O
	where
		T: Any,
		F: FnOnce(&T) -> O,
	{
		self.with::<T, _, _>(|value| value.map(f))
			.unwrap_or_else(self::on_missing_context::<T, _>)
	}

	/// Gets the nearest value of `T`.
	#[must_use]
	pub fn get<T>(&self) -> Option<T>
	where
		T: Any + Copy,
	{
		self.with::<T, _, _>(|value| value.copied())
	}

	/// Expects the nearest value of `T`.
	#[must_use]
	#[track_caller]
	pub fn expect<T>(&self) -> T
	where
		T: Any + Copy,
	{
		self.with_expect::<T, _, _>(|value| *value)
	}

	/// Gets a clone of the nearest value of `T`.
	#[must_use]
	pub fn get_cloned<T>(&self) -> Option<T>
	where
		T: Any + Clone,
	{
		self.with::<T, _, _>(|value| value.cloned())
	}

	/// Expects a clone of the nearest value of `T`.
	#[must_use]
	#[track_caller]
	pub fn expect_cloned<T>(&self) -> T
	where
		T: Any + Clone,
	{
		self.with_expect::<T, _, _>(T::clone)
	}

	/// Gets a clone of the nearest value of `T`, or it's default value
	/// if no scope provides it.
	#[must_use]
	pub fn get_or_default<T>(&self) -> T
	where
		T: Any + Clone + Default,
	{
		self.get_cloned::<T>().unwrap_or_default()
	}
}

impl Clone for Scope {
	fn clone(&self) -> Self {
		Self {
			inner: Rc::clone(&self.inner),
		}
	}
}

impl PartialEq for Scope {
	fn eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.inner, &other.inner)
	}
}

impl Eq for Scope {}

impl Default for Scope {
	fn default() -> Self {
		Self::root()
	}
}

impl fmt::Debug for Scope {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Scope")
			.field("depth", &self.depth())
			.field("values", &self.inner.values.borrow().len())
			.finish_non_exhaustive()
	}
}

/// Called when context for type `T` was missing.
#[cold]
#[inline(never)]
#[track_caller]
fn on_missing_context<T, O>() -> O {
	panic!("Context for type {:?} was missing", any::type_name::<T>())
}

#[cfg(test)]
mod test {
	// Imports
	use super::Scope;

	#[test]
	fn simple() {
		let scope = Scope::root();
		assert_eq!(scope.provide::<i32>(5), None);

		assert_eq!(scope.get::<i32>(), Some(5));
		assert_eq!(scope.take::<i32>(), Some(5));
		assert_eq!(scope.get::<i32>(), None);
	}

	#[test]
	fn nearest_wins() {
		let root = Scope::root();
		root.provide::<i32>(5);
		let child = root.child();
		child.provide::<i32>(4);
		let grandchild = child.child();

		assert_eq!(grandchild.get::<i32>(), Some(4));
		assert_eq!(child.take::<i32>(), Some(4));
		assert_eq!(grandchild.get::<i32>(), Some(5));
		assert_eq!(root.take::<i32>(), Some(5));
		assert_eq!(grandchild.get::<i32>(), None);
	}

	#[test]
	fn siblings_are_independent() {
		let root = Scope::root();
		let lhs = root.child();
		let rhs = root.child();
		lhs.provide::<&'static str>("lhs");

		assert_eq!(lhs.get::<&'static str>(), Some("lhs"));
		assert_eq!(rhs.get::<&'static str>(), None);
		assert_eq!(root.get::<&'static str>(), None);
	}

	#[test]
	fn provide_replaces() {
		let scope = Scope::root();
		assert_eq!(scope.provide(String::from("a")), None);
		assert_eq!(scope.provide(String::from("b")), Some(String::from("a")));
		assert_eq!(scope.expect_cloned::<String>(), "b");
	}

	#[test]
	fn default_when_missing() {
		let scope = Scope::root().child();
		assert_eq!(scope.get_or_default::<u64>(), 0);
		assert_eq!(scope.depth(), 1);
	}

	#[test]
	#[should_panic(expected = "Context for type \"u8\" was missing")]
	fn expect_missing() {
		let _ = Scope::root().expect::<u8>();
	}

	#[test]
	fn stress() {
		let values_len = 100;
		let mut scopes = vec![Scope::root()];
		for value in 0..values_len {
			let scope = scopes.last().expect("Should have a scope").child();
			scope.provide::<i32>(value);
			scopes.push(scope);
		}

		for value in (0..values_len).rev() {
			let scope = scopes.pop().expect("Should have scope");
			assert_eq!(scope.get::<i32>(), Some(value));
		}
		assert_eq!(scopes.pop().expect("Should have the root").get::<i32>(), None);
	}
}
