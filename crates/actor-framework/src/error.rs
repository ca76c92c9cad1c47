//! # Framework Errors
//!
//! Errors raised by the actor plumbing itself. Entity failures travel inside
//! [`FrameworkError::EntityError`] and can be downcast back to the entity's own error type.

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    /// Recover the entity's error type from an [`FrameworkError::EntityError`].
    ///
    /// Returns the original error unchanged when it is not an entity error of type `E`.
    pub fn into_entity_error<E>(self) -> Result<E, FrameworkError>
    where
        E: std::error::Error + 'static,
    {
        match self {
            FrameworkError::EntityError(inner) => match inner.downcast::<E>() {
                Ok(err) => Ok(*err),
                Err(other) => Err(FrameworkError::EntityError(other)),
            },
            other => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error, PartialEq)]
    #[error("boom {0}")]
    struct Boom(u32);

    #[test]
    fn test_into_entity_error_recovers_type() {
        let err = FrameworkError::EntityError(Box::new(Boom(7)));
        assert_eq!(err.into_entity_error::<Boom>().unwrap(), Boom(7));
    }

    #[test]
    fn test_into_entity_error_keeps_other_errors() {
        let err = FrameworkError::EntityError(Box::new(std::io::Error::other("disk")));
        match err.into_entity_error::<Boom>() {
            Err(FrameworkError::EntityError(inner)) => assert_eq!(inner.to_string(), "disk"),
            other => panic!("unexpected: {:?}", other),
        }

        let closed = FrameworkError::ActorClosed.into_entity_error::<Boom>();
        assert!(matches!(closed, Err(FrameworkError::ActorClosed)));
    }
}
