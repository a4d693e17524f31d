//! # Host runtime for reactive state
//!
//! `tether-core` is the small host that stateful controllers attach to. It
//! renders nothing; it only provides the lifecycle contract:
//!
//! - `Signal<T>` — observable, cloneable value handle.
//! - `Host` + `remember*` — storage that keeps its identity across passes.
//! - `Scope` / `Dispose` / `disposable_effect` — cleanups that run exactly once.
//! - `post_commit` / `batch` — ordered follow-up tasks after a state commit.
//!
//! ## Signals
//!
//! ```rust
//! use tether_core::*;
//!
//! let count = signal(0);
//! count.set(1);
//! count.update(|v| *v += 1);
//! assert_eq!(count.get(), 2);
//! ```
//!
//! ## Remembered state
//!
//! Inside `Host::compose`, `remember_with_key` hands back the same `Rc` on
//! every pass:
//!
//! ```rust
//! use tether_core::*;
//!
//! let mut host = Host::new();
//! for _ in 0..3 {
//!     host.compose(|| {
//!         let visits = remember_with_key("visits", || signal(0));
//!         visits.update(|v| *v += 1);
//!     });
//! }
//! let total = host.compose(|| remember_with_key("visits", || signal(0)).get());
//! assert_eq!(total, 3);
//! ```
//!
//! - `remember` is order‑based: the Nth call in a pass always refers to the
//!   Nth stored value.
//! - `remember_with_key` is key‑based and stable across conditional
//!   branches.
//!
//! ## Effects and cleanup
//!
//! ```rust
//! use tether_core::*;
//!
//! let mut host = Host::new();
//! host.compose(|| {
//!     scoped_effect(|| {
//!         log::info!("mounted");
//!         on_unmount(|| log::info!("unmounted"))
//!     });
//! });
//! host.unmount(); // "unmounted" is logged exactly once
//! ```
//!
//! Cleanups registered on a `Scope` run once, whether the scope is disposed
//! explicitly, dropped, or torn down during unwinding.

pub mod effects;
pub mod effects_ext;
pub mod runtime;
pub mod schedule;
pub mod scope;
pub mod signal;
pub mod tests;

pub use effects::*;
pub use effects_ext::*;
pub use runtime::*;
pub use schedule::*;
pub use scope::*;
pub use signal::*;
