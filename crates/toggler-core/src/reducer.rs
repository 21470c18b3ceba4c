use std::sync::Arc;

use crate::change::ChangeRecord;
use crate::state::ToggleState;

/// Owner hook that may rewrite a proposed change before it is applied or
/// reported. Its return value is authoritative.
pub trait StateReducer: Send + Sync + 'static {
    fn reduce(&self, state: &ToggleState, changes: ChangeRecord) -> ChangeRecord;
}

impl<F> StateReducer for F
where
    F: Fn(&ToggleState, ChangeRecord) -> ChangeRecord + Send + Sync + 'static,
{
    fn reduce(&self, state: &ToggleState, changes: ChangeRecord) -> ChangeRecord {
        self(state, changes)
    }
}

/// Returns `changes` unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdentityReducer;

impl StateReducer for IdentityReducer {
    fn reduce(&self, _state: &ToggleState, changes: ChangeRecord) -> ChangeRecord {
        changes
    }
}

/// Runs several reducers left to right, each seeing the previous output.
/// All reducers observe the same combined state.
#[derive(Clone, Default)]
pub struct ReducerChain {
    reducers: Vec<Arc<dyn StateReducer>>,
}

impl ReducerChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then(mut self, reducer: impl StateReducer) -> Self {
        self.reducers.push(Arc::new(reducer));
        self
    }

    pub fn len(&self) -> usize {
        self.reducers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reducers.is_empty()
    }
}

impl StateReducer for ReducerChain {
    fn reduce(&self, state: &ToggleState, changes: ChangeRecord) -> ChangeRecord {
        self.reducers
            .iter()
            .fold(changes, |acc, r| r.reduce(state, acc))
    }
}
