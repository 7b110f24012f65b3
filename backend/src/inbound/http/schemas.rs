//! Response bodies shared by several endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Bare confirmation or prompt message.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Student deleted successfully")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
