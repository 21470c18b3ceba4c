//! # Toggle state, control, and reducers
//!
//! `toggler-core` holds the state logic behind a toggle widget so that any
//! presentation layer can drive it. There are four main pieces:
//!
//! - [`Toggle`] — the coordinator. Owns the "on" field, runs every change
//!   through one pipeline and fires the owner's callbacks.
//! - [`ToggleProps`] — what the owner supplies. Setting `on` makes the field
//!   controlled.
//! - [`StateReducer`] — an owner hook that can rewrite any proposed change.
//! - [`TogglerProps`] — interaction bindings returned by
//!   [`Toggle::toggler_props`].
//!
//! ## Uncontrolled
//!
//! ```rust
//! use toggler_core::*;
//!
//! let toggle = Toggle::new(ToggleConfig::new());
//! toggle.toggle();
//! assert!(toggle.get_state().on);
//! toggle.reset();
//! assert!(!toggle.get_state().on);
//! ```
//!
//! ## Controlled
//!
//! When the owner supplies `on`, reads always return the owner's value. The
//! callbacks still fire, so the owner can decide whether to follow:
//!
//! ```rust
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicBool, Ordering};
//! use toggler_core::*;
//!
//! let requested = Arc::new(AtomicBool::new(false));
//! let toggle = Toggle::new(ToggleConfig::new().on(Some(true)).on_state_change({
//!     let requested = requested.clone();
//!     move |changes, _| {
//!         requested.store(changes.on == Some(false), Ordering::SeqCst);
//!     }
//! }));
//!
//! toggle.toggle();
//! assert!(toggle.get_state().on);
//! assert!(requested.load(Ordering::SeqCst));
//! ```
//!
//! ## State reducers
//!
//! ```rust
//! use toggler_core::*;
//!
//! let stuck_on = |_: &ToggleState, changes: ChangeRecord| changes.with_on(true);
//! let toggle = Toggle::new(ToggleConfig::new().initial_on(true).state_reducer(stuck_on));
//! toggle.toggle();
//! assert!(toggle.get_state().on);
//! ```
//!
//! Logging goes through the `log` facade; install any logger to see
//! pipeline runs at `debug` and write sets at `trace`.

pub mod change;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod props;
pub mod reducer;
pub mod signal;
pub mod state;

pub use change::*;
pub use config::*;
pub use coordinator::*;
pub use error::*;
pub use props::*;
pub use reducer::*;
pub use signal::*;
pub use state::*;
