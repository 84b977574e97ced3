//! Bearer token source for authenticated calls.

/// Supplies the bearer token for remote writes.
///
/// Passed explicitly to the update and delete flows instead of being read
/// from ambient state.
pub trait AuthProvider: Send + Sync {
    fn token(&self) -> Option<String>;
}

/// Fixed token, mostly for tests and scripted use.
#[derive(Debug, Clone)]
pub struct StaticToken(pub String);

impl AuthProvider for StaticToken {
    fn token(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// Provider with no token.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAuth;

impl AuthProvider for NoAuth {
    fn token(&self) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_token() {
        assert_eq!(StaticToken("t".into()).token(), Some("t".to_string()));
        assert_eq!(NoAuth.token(), None);
    }
}
