use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ToggleError;
use crate::state::{StatePatch, ToggleField, ToggleState};

/// Marker identifying which operation produced a change.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ChangeType {
    Toggle,
    Reset,
    Custom(String),
}

impl ChangeType {
    /// Builds a caller-defined change type. `"toggle"` and `"reset"` map to
    /// the built-in variants so records compare equal regardless of origin.
    pub fn custom(name: impl AsRef<str>) -> Result<Self, ToggleError> {
        name.as_ref().parse()
    }

    pub fn as_str(&self) -> &str {
        match self {
            ChangeType::Toggle => "toggle",
            ChangeType::Reset => "reset",
            ChangeType::Custom(s) => s,
        }
    }
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChangeType {
    type Err = ToggleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" => Err(ToggleError::EmptyChangeType),
            "toggle" => Ok(ChangeType::Toggle),
            "reset" => Ok(ChangeType::Reset),
            other => Ok(ChangeType::Custom(other.to_string())),
        }
    }
}

impl From<ChangeType> for String {
    fn from(t: ChangeType) -> Self {
        match t {
            ChangeType::Custom(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl TryFrom<String> for ChangeType {
    type Error = ToggleError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// A tagged, partial update to [`ToggleState`].
///
/// Records are proposed transitions rather than diffs: a field is
/// reported even when its value equals the current one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRecord {
    #[serde(rename = "type")]
    pub change_type: ChangeType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on: Option<bool>,
}

impl ChangeRecord {
    pub fn new(change_type: ChangeType) -> Self {
        Self {
            change_type,
            on: None,
        }
    }

    pub fn with_on(mut self, on: bool) -> Self {
        self.on = Some(on);
        self
    }

    /// Full state plus a type marker, as used by reset.
    pub fn from_state(change_type: ChangeType, state: &ToggleState) -> Self {
        let mut rec = Self::new(change_type);
        for field in ToggleField::ALL {
            rec.set(field, state.get(field));
        }
        rec
    }

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

    /// True when the record carries only its type marker.
    pub fn is_empty(&self) -> bool {
        self.patch().is_empty()
    }

    pub fn patch(&self) -> StatePatch {
        StatePatch { on: self.on }
    }
}

/// A change submitted to the apply pipeline: either a literal record or a
/// function of the current combined state.
pub enum ProposedChange {
    Record(ChangeRecord),
    Compute(Box<dyn FnOnce(&ToggleState) -> ChangeRecord>),
}

impl ProposedChange {
    pub fn compute(f: impl FnOnce(&ToggleState) -> ChangeRecord + 'static) -> Self {
        ProposedChange::Compute(Box::new(f))
    }

    pub fn resolve(self, combined: &ToggleState) -> ChangeRecord {
        match self {
            ProposedChange::Record(r) => r,
            ProposedChange::Compute(f) => f(combined),
        }
    }
}

impl From<ChangeRecord> for ProposedChange {
    fn from(r: ChangeRecord) -> Self {
        ProposedChange::Record(r)
    }
}

impl fmt::Debug for ProposedChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProposedChange::Record(r) => f.debug_tuple("Record").field(r).finish(),
            ProposedChange::Compute(_) => f.write_str("Compute(<fn>)"),
        }
    }
}
