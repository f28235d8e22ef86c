use serde::{Deserialize, Serialize};
use validator::Validate;

use ouv_core::RegisterInput;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Omitted for anonymous registration
    #[validate(length(max = 254))]
    pub email: Option<String>,

    #[validate(length(max = 200))]
    pub name: Option<String>,

    #[serde(default)]
    pub needs_accessibility: bool,

    #[validate(length(max = 1000))]
    pub accessibility_details: Option<String>,
}

impl From<RegisterRequest> for RegisterInput {
    fn from(request: RegisterRequest) -> Self {
        Self {
            email: request.email,
            name: request.name,
            needs_accessibility: request.needs_accessibility,
            accessibility_details: request.accessibility_details,
        }
    }
}
