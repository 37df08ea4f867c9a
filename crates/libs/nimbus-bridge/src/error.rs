use serde::{Deserialize, Serialize};

use crate::shape::Shape;

/// Failures detected by the bridge itself, when no collaborator error exists
/// to propagate.
///
/// Category errors embed this through a `From` conversion; collaborator
/// errors are never converted into it.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum BridgeError {
    #[error("canceled: {operation}")]
    Canceled { operation: String },

    #[error(
        "abandoned: {operation} released its {shape} callbacks without a terminal result"
    )]
    Abandoned { operation: String, shape: Shape },
}

impl BridgeError {
    pub fn canceled(operation: impl Into<String>) -> Self {
        Self::Canceled {
            operation: operation.into(),
        }
    }

    pub fn abandoned(operation: impl Into<String>, shape: Shape) -> Self {
        Self::Abandoned {
            operation: operation.into(),
            shape,
        }
    }

    pub fn is_canceled(&self) -> bool {
        matches!(self, Self::Canceled { .. })
    }

    /// Name of the bridged operation this error belongs to.
    pub fn operation(&self) -> &str {
        match self {
            Self::Canceled { operation } | Self::Abandoned { operation, .. } => operation,
        }
    }
}
