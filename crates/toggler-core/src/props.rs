use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::config::Callback;
use crate::coordinator::Toggle;

pub type PropValue = serde_json::Value;

pub const ARIA_EXPANDED: &str = "aria-expanded";

/// Owner-supplied additions to the toggler props. Everything in `rest` is
/// passed through untouched.
#[derive(Clone, Default)]
pub struct TogglerOverrides {
    pub on_click: Option<Callback>,
    pub rest: BTreeMap<String, PropValue>,
}

impl TogglerOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_click(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_click = Some(Arc::new(f));
        self
    }

    pub fn attr(mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.rest.insert(key.into(), value.into());
        self
    }
}

/// Interaction bindings for whatever element flips the toggle.
#[derive(Clone)]
pub struct TogglerProps {
    pub on_click: Callback,
    pub aria_expanded: bool,
    pub rest: BTreeMap<String, PropValue>,
}

impl TogglerProps {
    pub fn click(&self) {
        (self.on_click)()
    }

    pub fn attr(&self, key: &str) -> Option<&PropValue> {
        self.rest.get(key)
    }

    /// Attributes as a JSON object; the handler is left out and `rest`
    /// overrides the built-in flag.
    pub fn to_json(&self) -> PropValue {
        let mut map = serde_json::Map::new();
        map.insert(ARIA_EXPANDED.to_string(), self.aria_expanded.into());
        for (k, v) in &self.rest {
            map.insert(k.clone(), v.clone());
        }
        PropValue::Object(map)
    }
}

impl fmt::Debug for TogglerProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TogglerProps")
            .field("on_click", &"<callback>")
            .field("aria_expanded", &self.aria_expanded)
            .field("rest", &self.rest)
            .finish()
    }
}

/// One handler that runs each of `handlers` in order.
pub fn call_all(handlers: impl IntoIterator<Item = Callback>) -> Callback {
    let handlers: Vec<Callback> = handlers.into_iter().collect();
    Arc::new(move || {
        for h in &handlers {
            h();
        }
    })
}

impl Toggle {
    /// Props for the element that flips this toggle. The click handler runs
    /// the owner's `on_click` first, then toggles. Owner attributes are
    /// spread last, so an owner `aria-expanded` wins in [`TogglerProps::to_json`].
    pub fn toggler_props(&self, overrides: TogglerOverrides) -> TogglerProps {
        let TogglerOverrides { on_click, rest } = overrides;

        let weak = self.downgrade();
        let toggle: Callback = Arc::new(move || {
            if let Some(t) = weak.upgrade() {
                t.toggle();
            }
        });

        TogglerProps {
            on_click: call_all(on_click.into_iter().chain(Some(toggle))),
            aria_expanded: self.get_state().on,
            rest,
        }
    }
}
