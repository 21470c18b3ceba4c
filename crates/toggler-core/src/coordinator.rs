//! The controlled state coordinator.
//!
//! A [`Toggle`] owns one boolean field, "on". Its owner may leave the field
//! to the coordinator (uncontrolled) or pin it with [`ToggleProps::on`]
//! (controlled). Every mutation goes through one pipeline:
//!
//! 1. read the combined state (owner value for controlled fields, internal
//!    value otherwise);
//! 2. resolve the proposed change, calling it with the combined state if
//!    it is a function;
//! 3. pass the record through the state reducer; the result is the
//!    authoritative record;
//! 4. build the write set from the uncontrolled fields;
//! 5. apply the write set if it is non-empty;
//! 6. report the authoritative record to `on_state_change`, then run the
//!    operation callback (`on_toggle` / `on_reset`).
//!
//! Controlled fields never reach the write set, so toggling them has no
//! effect on [`Toggle::get_state`]. Their internally tracked value still
//! advances quietly, so once the owner drops control the toggle resumes
//! from a consistent value.
//!
//! Pipelines are serialized through a reentrant lock: two threads cannot
//! interleave, while a callback that calls back into the same toggle on
//! its own thread proceeds instead of deadlocking.

use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::{ReentrantMutex, RwLock};

use crate::change::{ChangeRecord, ChangeType, ProposedChange};
use crate::config::{OnOffCallback, StateChangeCallback, ToggleConfig};
use crate::reducer::StateReducer;
use crate::signal::{Signal, Subscription};
use crate::state::{StatePatch, ToggleField, ToggleProps, ToggleState};

/// Cloneable handle to a toggle coordinator. Clones share state.
#[derive(Clone)]
pub struct Toggle {
    inner: Arc<Inner>,
}

/// Non-owning handle, used by props getters so handlers do not keep the
/// coordinator alive.
#[derive(Clone)]
pub struct WeakToggle(Weak<Inner>);

impl WeakToggle {
    pub fn upgrade(&self) -> Option<Toggle> {
        self.0.upgrade().map(|inner| Toggle { inner })
    }
}

struct Inner {
    serial: ReentrantMutex<()>,
    props: RwLock<ToggleProps>,
    initial: ToggleState,
    state: Signal<ToggleState>,
    on_toggle: OnOffCallback,
    on_reset: OnOffCallback,
    on_state_change: StateChangeCallback,
    state_reducer: Arc<dyn StateReducer>,
}

impl Toggle {
    pub fn new(config: ToggleConfig) -> Self {
        let initial = config.props.initial_state();
        log::debug!(
            "toggle: created with initial_on={} controlled={}",
            initial.on,
            config.props.is_controlled(ToggleField::On)
        );
        Self {
            inner: Arc::new(Inner {
                serial: ReentrantMutex::new(()),
                props: RwLock::new(config.props),
                initial,
                state: Signal::new(initial),
                on_toggle: config.on_toggle,
                on_reset: config.on_reset,
                on_state_change: config.on_state_change,
                state_reducer: config.state_reducer,
            }),
        }
    }

    pub fn downgrade(&self) -> WeakToggle {
        WeakToggle(Arc::downgrade(&self.inner))
    }

    /// Combined state: owner-supplied values for controlled fields, the
    /// internally tracked value for the rest. Waits for any pipeline running
    /// on another thread, so the pair is always one that existed.
    pub fn get_state(&self) -> ToggleState {
        let _serial = self.inner.serial.lock();
        let props = *self.inner.props.read();
        props.combine(&self.inner.state.get())
    }

    /// The internally tracked state, ignoring control.
    pub fn internal_state(&self) -> ToggleState {
        self.inner.state.get()
    }

    /// State that `reset` returns to, captured at construction.
    pub fn initial_state(&self) -> ToggleState {
        self.inner.initial
    }

    pub fn props(&self) -> ToggleProps {
        *self.inner.props.read()
    }

    pub fn is_controlled(&self, field: ToggleField) -> bool {
        self.inner.props.read().is_controlled(field)
    }

    /// Replaces the owner-supplied values. `initial_on` is only read at
    /// construction, so changing it here does not move the reset target.
    pub fn set_props(&self, props: ToggleProps) {
        let _serial = self.inner.serial.lock();
        *self.inner.props.write() = props;
    }

    /// Takes (`Some`) or releases (`None`) control of "on".
    pub fn set_controlled_on(&self, on: Option<bool>) {
        let _serial = self.inner.serial.lock();
        self.inner.props.write().on = on;
    }

    pub fn toggle(&self) {
        self.toggle_with(ChangeType::Toggle);
    }

    /// Toggles with a caller-chosen type marker, visible to the reducer
    /// and to `on_state_change`.
    pub fn toggle_with(&self, change_type: ChangeType) {
        let _serial = self.inner.serial.lock();
        self.apply_locked(ProposedChange::compute(move |s: &ToggleState| {
            ChangeRecord::new(change_type).with_on(!s.on)
        }));
        let on = self.get_state().on;
        (self.inner.on_toggle)(on);
    }

    pub fn reset(&self) {
        let _serial = self.inner.serial.lock();
        let record = ChangeRecord::from_state(ChangeType::Reset, &self.inner.initial);
        self.apply_locked(record.into());
        let on = self.get_state().on;
        (self.inner.on_reset)(on);
    }

    /// Runs an arbitrary change through the pipeline and returns the
    /// authoritative record. Neither `on_toggle` nor `on_reset` fires.
    pub fn apply(&self, change: impl Into<ProposedChange>) -> ChangeRecord {
        let _serial = self.inner.serial.lock();
        self.apply_locked(change.into())
    }

    /// Called after every non-empty write to the internal state.
    pub fn subscribe(&self, f: impl Fn(&ToggleState) + Send + Sync + 'static) -> Subscription {
        self.inner.state.subscribe(f)
    }

    // Caller holds `serial`.
    fn apply_locked(&self, change: ProposedChange) -> ChangeRecord {
        let props = *self.inner.props.read();
        let internal = self.inner.state.get();
        let combined = props.combine(&internal);

        let proposed = change.resolve(&combined);
        let changes = self.inner.state_reducer.reduce(&combined, proposed);
        log::debug!(
            "toggle: {} change {:?} over {:?}",
            changes.change_type,
            changes.patch(),
            combined
        );

        let mut write = StatePatch::default();
        let mut tracked = StatePatch::default();
        for field in ToggleField::ALL {
            if props.is_controlled(field) {
                if let Some(v) = changes.get(field) {
                    tracked.set(field, v);
                }
            } else {
                let v = changes.get(field).unwrap_or_else(|| combined.get(field));
                write.set(field, v);
            }
        }

        let mut next = internal;
        tracked.apply_to(&mut next);
        write.apply_to(&mut next);
        if !write.is_empty() {
            log::trace!("toggle: write set {write:?}");
            self.inner.state.set(next);
        } else if !tracked.is_empty() {
            log::trace!("toggle: controlled fields advanced without a visible change {tracked:?}");
            self.inner.state.set_untracked(next);
        }

        let after = self.inner.state.get();
        (self.inner.on_state_change)(&changes, &after);
        changes
    }
}

impl fmt::Debug for Toggle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Toggle")
            .field("props", &self.props())
            .field("internal", &self.internal_state())
            .field("initial", &self.inner.initial)
            .finish()
    }
}
