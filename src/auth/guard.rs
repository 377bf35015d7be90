use super::AuthError;

/// Ownership check: the verified identity must equal the identity the
/// request targets. Exact, case-sensitive comparison.
pub fn authorize(identity: &str, requested: &str) -> Result<(), AuthError> {
    if identity == requested {
        Ok(())
    } else {
        tracing::warn!(
            "Ownership check failed: session '{}' requested resource owned by '{}'",
            identity,
            requested
        );
        Err(AuthError::forbidden("Forbidden access to another user's resource"))
    }
}
