//! Contains constraints, enumerations and other custom types.

mod constraints;
mod enums;

pub use constraints::{ConstraintCategory, ConstraintViolation, IdentityProviderConstraints};
pub use enums::{IntegrationType, ProviderType};
