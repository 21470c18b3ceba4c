use std::fmt;
use std::sync::Arc;

use crate::change::ChangeRecord;
use crate::reducer::{IdentityReducer, StateReducer};
use crate::state::{ToggleProps, ToggleState};

pub type Callback = Arc<dyn Fn() + Send + Sync>;
pub type OnOffCallback = Arc<dyn Fn(bool) + Send + Sync>;
pub type StateChangeCallback = Arc<dyn Fn(&ChangeRecord, &ToggleState) + Send + Sync>;

/// Construction-time options for a [`Toggle`](crate::Toggle).
///
/// ```rust
/// use toggler_core::*;
///
/// let config = ToggleConfig::new()
///     .initial_on(true)
///     .on_toggle(|on| println!("now {on}"));
/// assert!(config.props().initial_on);
/// assert!(!config.props().is_controlled(ToggleField::On));
/// ```
#[derive(Clone)]
pub struct ToggleConfig {
    pub(crate) props: ToggleProps,
    pub(crate) on_toggle: OnOffCallback,
    pub(crate) on_reset: OnOffCallback,
    pub(crate) on_state_change: StateChangeCallback,
    pub(crate) state_reducer: Arc<dyn StateReducer>,
}

impl Default for ToggleConfig {
    fn default() -> Self {
        Self {
            props: ToggleProps::default(),
            on_toggle: Arc::new(|_: bool| {}),
            on_reset: Arc::new(|_: bool| {}),
            on_state_change: Arc::new(|_: &ChangeRecord, _: &ToggleState| {}),
            state_reducer: Arc::new(IdentityReducer),
        }
    }
}

impl ToggleConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn props(&self) -> &ToggleProps {
        &self.props
    }

    pub fn with_props(mut self, props: ToggleProps) -> Self {
        self.props = props;
        self
    }

    pub fn initial_on(mut self, on: bool) -> Self {
        self.props.initial_on = on;
        self
    }

    /// `Some` makes "on" controlled by the owner; `None` leaves it to the
    /// coordinator.
    pub fn on(mut self, on: Option<bool>) -> Self {
        self.props.on = on;
        self
    }

    pub fn on_toggle(mut self, f: impl Fn(bool) + Send + Sync + 'static) -> Self {
        self.on_toggle = Arc::new(f);
        self
    }

    pub fn on_reset(mut self, f: impl Fn(bool) + Send + Sync + 'static) -> Self {
        self.on_reset = Arc::new(f);
        self
    }

    pub fn on_state_change(
        mut self,
        f: impl Fn(&ChangeRecord, &ToggleState) + Send + Sync + 'static,
    ) -> Self {
        self.on_state_change = Arc::new(f);
        self
    }

    pub fn state_reducer(mut self, reducer: impl StateReducer) -> Self {
        self.state_reducer = Arc::new(reducer);
        self
    }
}

impl fmt::Debug for ToggleConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToggleConfig")
            .field("props", &self.props)
            .field("on_toggle", &"<callback>")
            .field("on_reset", &"<callback>")
            .field("on_state_change", &"<callback>")
            .field("state_reducer", &"<reducer>")
            .finish()
    }
}
