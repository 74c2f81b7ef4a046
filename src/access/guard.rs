//! Authorization decisions for core operations.
//!
//! Task patches are judged by their key set, not by the operation name: a
//! role without [`Capability::PatchFull`] may patch a task only when the
//! requested fields are exactly `{state}`. Anything else is denied as a
//! whole; the allowed subset is never applied on its own.

use super::domain::{Capability, Role};
use crate::error::{Classify, ErrorKind};
use crate::task::domain::PatchField;
use thiserror::Error;

/// Denial returned by the guard.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthorizationError {
    /// The role does not hold the capability.
    #[error("role '{role}' lacks the '{capability}' capability")]
    MissingCapability {
        /// Role of the principal.
        role: Role,
        /// Capability that was required.
        capability: Capability,
    },

    /// The patch touches fields other than exactly the task state.
    #[error("role '{role}' may only change the task state; requested fields: {}", format_fields(.fields))]
    PatchNotPermitted {
        /// Role of the principal.
        role: Role,
        /// Fields present in the rejected patch.
        fields: Vec<PatchField>,
    },
}

fn format_fields(fields: &[PatchField]) -> String {
    if fields.is_empty() {
        return "none".to_owned();
    }
    fields
        .iter()
        .map(|field| field.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

impl Classify for AuthorizationError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Authorization
    }
}

/// Checks that `role` holds `capability`.
///
/// # Errors
///
/// Returns [`AuthorizationError::MissingCapability`] when it does not.
pub fn authorize(role: Role, capability: Capability) -> Result<(), AuthorizationError> {
    if role.allows(capability) {
        Ok(())
    } else {
        Err(AuthorizationError::MissingCapability { role, capability })
    }
}

/// Decides whether `role` may submit a patch with the given key set.
///
/// Returns the capability that grants the patch.
///
/// # Errors
///
/// Returns [`AuthorizationError::PatchNotPermitted`] when the role may only
/// change state and `fields` is anything other than exactly `[State]`, or
/// [`AuthorizationError::MissingCapability`] when the role may not patch at
/// all.
pub fn authorize_patch(
    role: Role,
    fields: &[PatchField],
) -> Result<Capability, AuthorizationError> {
    if role.allows(Capability::PatchFull) {
        return Ok(Capability::PatchFull);
    }
    if !role.allows(Capability::PatchStateOnly) {
        return Err(AuthorizationError::MissingCapability {
            role,
            capability: Capability::PatchStateOnly,
        });
    }
    if fields == [PatchField::State] {
        Ok(Capability::PatchStateOnly)
    } else {
        Err(AuthorizationError::PatchNotPermitted {
            role,
            fields: fields.to_vec(),
        })
    }
}
