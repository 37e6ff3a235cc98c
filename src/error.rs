use crate::elimination::{OrderingError, UnknownHeuristic};
use crate::evaluation::EvaluationError;
use crate::generator::GeneratorError;
use crate::io::InputError;
use crate::tree_decomposition::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Ordering(#[from] OrderingError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Heuristic(#[from] UnknownHeuristic),
    #[error(transparent)]
    Generator(#[from] GeneratorError),
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use crate::elimination::OrderingError;
    use crate::error::Error;
    use crate::tree_decomposition::ValidationError;

    #[test]
    fn messages_pass_through() {
        let e: Error = OrderingError::MissingVertex(3).into();
        assert_eq!(e.to_string(), "Missing Vertex: 3");
        let e: Error = ValidationError::NotInducingSubtree(5).into();
        assert!(matches!(e, Error::Validation(ValidationError::NotInducingSubtree(5))));
    }
}
