/// Failure of a write that can hit a uniqueness constraint.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("duplicate value for {0}")]
    Duplicate(String),
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}
