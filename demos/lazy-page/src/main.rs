//! Lazy page demo
//!
//! Lazily loads a page, while a user profile is loaded for the page.
//! The user is switched while their profile is still loading, so the
//! first profile is never shown.

// Imports
use {
	core::time::Duration,
	suspensor::{
		effect,
		lazy,
		Component,
		Derived,
		Effect,
		Executor,
		Resource,
		ResourceState,
		Scope,
		Signal,
		SignalGet,
		SignalGetCloned,
		SignalSet,
		SignalWith,
		SuspenseBoundary,
		SuspenseStatus,
	},
	tokio::{task::LocalSet, time},
};

/// User profile
#[derive(Clone, Debug)]
struct Profile {
	/// User id
	id: u32,

	/// Display name
	name: String,
}

/// Page properties
#[derive(Clone)]
struct PageProps {
	/// Profile of the user being shown
	profile: Resource<Profile, String>,
}

fn main() -> Result<(), anyhow::Error> {
	suspensor_logger::init()?;

	let runtime = tokio::runtime::Builder::new_current_thread()
		.enable_time()
		.build()?;

	LocalSet::new().block_on(&runtime, self::run());

	Ok(())
}

async fn run() {
	let root = Scope::root();
	root.provide(Executor::tokio());
	let boundary = SuspenseBoundary::new(&root);

	// Log whenever the boundary switches between the fallback and the content
	let _fallback = Effect::new({
		let boundary = boundary.clone();
		move || match boundary.status() {
			SuspenseStatus::Suspended => tracing::info!(pending = boundary.pending(), "Showing fallback"),
			SuspenseStatus::Running => tracing::info!("Showing content"),
		}
	});

	let user_id = Signal::new(1_u32);
	let profile = Resource::tracked(boundary.scope(), {
		let user_id = user_id.clone();
		move || Some(self::fetch_profile(user_id.get()))
	});

	let page = lazy(boundary.scope(), || async {
		time::sleep(Duration::from_millis(30)).await;
		tracing::info!("Page loaded");
		Ok::<_, String>(self::page as fn(PageProps) -> Derived<String>)
	});
	let output = page.render(PageProps { profile });
	let _render = Effect::new({
		let output = output.clone();
		move || {
			// Note: Reading the page here tracks it, so we're re-run whenever it changes
			let text = output.with(|page| page.as_ref().map(Derived::get_cloned));
			if let Some(text) = text {
				tracing::info!("{text}");
			}
		}
	});

	// Switch the user before the first profile arrives
	time::sleep(Duration::from_millis(10)).await;
	user_id.set(2);

	time::sleep(Duration::from_millis(100)).await;
	let status = effect::untracked(|| boundary.status());
	tracing::info!(%status, "Done");
}

/// Renders the page
fn page(props: PageProps) -> Derived<String> {
	Derived::new(move || {
		props.profile.with(|profile| match profile {
			ResourceState::Idle | ResourceState::Loading => "Loading profile...".to_owned(),
			ResourceState::Ready(profile) => format!("Welcome, {} (#{})", profile.name, profile.id),
			ResourceState::Failed(err) => format!("Unable to load profile: {err}"),
		})
	})
}

/// Fetches the profile of user `id`.
///
/// Earlier users take longer to load.
async fn fetch_profile(id: u32) -> Result<Profile, String> {
	let delay = Duration::from_millis(60 / u64::from(id));
	time::sleep(delay).await;

	tracing::info!(id, ?delay, "Fetched profile");
	Ok(Profile {
		id,
		name: format!("user{id}"),
	})
}

