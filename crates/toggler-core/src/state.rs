use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ToggleError;

/// Named fields of [`ToggleState`]. Control is decided per field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ToggleField {
    On,
}

impl ToggleField {
    pub const ALL: [ToggleField; 1] = [ToggleField::On];

    pub fn name(self) -> &'static str {
        match self {
            ToggleField::On => "on",
        }
    }
}

impl fmt::Display for ToggleField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ToggleField {
    type Err = ToggleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ToggleField::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| ToggleError::UnknownField(s.to_string()))
    }
}

/// Snapshot of the toggle's state, either internally tracked or combined
/// with the owner's controlled values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleState {
    pub on: bool,
}

impl ToggleState {
    pub fn get(&self, field: ToggleField) -> bool {
        match field {
            ToggleField::On => self.on,
        }
    }

    pub fn set(&mut self, field: ToggleField, value: bool) {
        match field {
            ToggleField::On => self.on = value,
        }
    }
}

/// Partial write to a [`ToggleState`]; `None` leaves the field alone.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatePatch {
    pub on: Option<bool>,
}

impl StatePatch {
    pub fn get(&self, field: ToggleField) -> Option<bool> {
        match field {
            ToggleField::On => self.on,
        }
    }

    pub fn set(&mut self, field: ToggleField, value: bool) {
        match field {
            ToggleField::On => self.on = Some(value),
        }
    }

    pub fn is_empty(&self) -> bool {
        ToggleField::ALL.iter().all(|f| self.get(*f).is_none())
    }

    pub fn apply_to(&self, state: &mut ToggleState) {
        for field in ToggleField::ALL {
            if let Some(v) = self.get(field) {
                state.set(field, v);
            }
        }
    }
}

/// Values supplied by the toggle's owner.
///
/// `initial_on` seeds the internally tracked state. `on`, when present,
/// makes the "on" field controlled: reads return the owner's value no
/// matter what the coordinator tracks internally.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToggleProps {
    pub initial_on: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on: Option<bool>,
}

impl ToggleProps {
    pub fn controlled_value(&self, field: ToggleField) -> Option<bool> {
        match field {
            ToggleField::On => self.on,
        }
    }

    pub fn is_controlled(&self, field: ToggleField) -> bool {
        self.controlled_value(field).is_some()
    }

    pub fn initial_state(&self) -> ToggleState {
        ToggleState {
            on: self.initial_on,
        }
    }

    /// Per-field merge: the owner's value for controlled fields, the
    /// internal value for everything else.
    pub fn combine(&self, internal: &ToggleState) -> ToggleState {
        let mut out = *internal;
        for field in ToggleField::ALL {
            if let Some(v) = self.controlled_value(field) {
                out.set(field, v);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_names_round_trip_through_from_str() {
        assert_eq!("on".parse::<ToggleField>(), Ok(ToggleField::On));
        assert_eq!(
            "off".parse::<ToggleField>(),
            Err(ToggleError::UnknownField("off".into()))
        );
    }

    #[test]
    fn combine_prefers_controlled_value() {
        let internal = ToggleState { on: false };
        let props = ToggleProps {
            initial_on: false,
            on: Some(true),
        };
        assert!(props.is_controlled(ToggleField::On));
        assert_eq!(props.combine(&internal), ToggleState { on: true });

        let uncontrolled = ToggleProps::default();
        assert!(!uncontrolled.is_controlled(ToggleField::On));
        assert_eq!(uncontrolled.combine(&internal), internal);
    }

    #[test]
    fn empty_patch_leaves_state_untouched() {
        let mut state = ToggleState { on: true };
        let patch = StatePatch::default();
        assert!(patch.is_empty());
        patch.apply_to(&mut state);
        assert!(state.on);

        StatePatch { on: Some(false) }.apply_to(&mut state);
        assert!(!state.on);
    }

    #[test]
    fn props_deserialize_with_defaults() {
        let props: ToggleProps = serde_json::from_str(r#"{"on":true}"#).unwrap();
        assert_eq!(
            props,
            ToggleProps {
                initial_on: false,
                on: Some(true)
            }
        );
        let empty: ToggleProps = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, ToggleProps::default());
    }
}
