use thiserror::Error;

use crate::clip::ClipId;

#[derive(Debug, Error)]
pub enum ClipError {
    #[error("clip {id} not found")]
    NotFound { id: ClipId },

    #[error("storage error: {0}")]
    Storage(String),

    #[error("{0}")]
    Validation(String),

    #[error("clipboard unavailable: {0}")]
    Clipboard(String),

    #[error("cannot {op} clip {id}: {source}")]
    Operation {
        op: &'static str,
        id: ClipId,
        #[source]
        source: Box<ClipError>,
    },
}

impl ClipError {
    pub fn context(self, op: &'static str, id: ClipId) -> Self {
        ClipError::Operation { op, id, source: Box::new(self) }
    }

    /// Innermost error once operation context is peeled away.
    pub fn root(&self) -> &ClipError {
        match self {
            ClipError::Operation { source, .. } => source.root(),
            other => other,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self.root(), ClipError::NotFound { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self.root(), ClipError::Validation(_))
    }
}

impl From<rusqlite::Error> for ClipError {
    fn from(err: rusqlite::Error) -> Self {
        ClipError::Storage(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ClipError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_keeps_root_cause() {
        let err = ClipError::NotFound { id: 3 }.context("archive", 3);
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "cannot archive clip 3: clip 3 not found");
    }

    #[test]
    fn validation_is_not_not_found() {
        let err = ClipError::Validation("title is empty".into());
        assert!(err.is_validation());
        assert!(!err.is_not_found());
    }
}
