use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, Eq, PartialEq)]
pub enum Error {
    #[error("Cannot deep copy an empty key, source holds no values")]
    EmptyCopySource,
    #[error("Cannot refill an empty key, construct it with values first")]
    EmptyRefillTarget,
}
