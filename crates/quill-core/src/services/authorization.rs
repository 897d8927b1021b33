//! Owner-only authorization predicate.

use crate::domain::User;
use crate::error::DomainError;

/// Allow the action only for an attached identity with the owner role.
///
/// `None` means no identity could be resolved for the request.
pub fn authorize_owner_action(identity: Option<&User>) -> Result<&User, DomainError> {
    let user = identity.ok_or_else(|| {
        DomainError::Unauthenticated("Authentication required".to_string())
    })?;

    if !user.is_owner() {
        return Err(DomainError::Forbidden(
            "Only owners are authorized to access this resource.".to_string(),
        ));
    }

    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;

    fn user(role: Role) -> User {
        User::new(
            "someone".into(),
            "someone@example.com".into(),
            "Some".into(),
            "One".into(),
            role,
            "hash".into(),
        )
    }

    #[test]
    fn test_owner_is_allowed() {
        let owner = user(Role::Owner);
        assert_eq!(authorize_owner_action(Some(&owner)).unwrap().id, owner.id);
    }

    #[test]
    fn test_plain_user_is_forbidden() {
        let reader = user(Role::User);
        let err = authorize_owner_action(Some(&reader)).unwrap_err();
        assert_eq!(err.kind(), "forbidden");
    }

    #[test]
    fn test_missing_identity_is_unauthenticated() {
        let err = authorize_owner_action(None).unwrap_err();
        assert_eq!(err.kind(), "unauthenticated");
    }
}
