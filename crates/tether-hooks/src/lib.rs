//! # Reactive state controllers
//!
//! Three small controllers that attach to a [`tether_core::Host`]:
//!
//! - [`Toggle`] — a boolean with `toggle`, `set_true`, `set_false`, `reset`.
//! - [`Counter`] — a number kept inside optional bounds, with a change
//!   callback that fires once per committed change.
//! - [`TitleGuard`] / [`TitleEffect`] — ownership of an external title for the
//!   lifetime of an activation, restoring the previous title on release.
//!
//! They can be used standalone, or through the keyed host bindings in
//! [`remember`]:
//!
//! ```rust
//! use tether_core::Host;
//! use tether_hooks::*;
//!
//! let title = MemoryTitle::new("App");
//! let mut host = Host::new();
//! let shown = host.compose(|| {
//!     let n = remember_counter("n", CounterOptions::new().max(3));
//!     n.increment();
//!     let label = n.count().to_string();
//!     use_title("title", title.clone(), &label, TitleOptions::new().template("%s - App"));
//!     // the title is written once the pass commits
//!     assert_eq!(title.value(), "App");
//!     n.count()
//! });
//! assert_eq!(shown, 1);
//! assert_eq!(title.value(), "1 - App");
//! host.unmount();
//! assert_eq!(title.value(), "App");
//! ```

pub mod counter;
pub mod error;
pub mod remember;
pub mod target;
pub mod title;
pub mod toggle;
pub mod update;

pub use counter::*;
pub use error::*;
pub use remember::*;
pub use target::*;
pub use title::*;
pub use toggle::*;
pub use update::*;
