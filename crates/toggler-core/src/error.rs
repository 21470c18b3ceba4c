use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToggleError {
    #[error("change type must not be empty")]
    EmptyChangeType,
    #[error("unknown toggle state field `{0}`")]
    UnknownField(String),
}
