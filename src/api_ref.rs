//! # API References
//!
//! An [`ApiRef`] names an API for lookup. It is typed, so registering or fetching
//! an implementation under the wrong reference fails to compile rather than at
//! runtime. The id is what appears in logs and registry errors.
//!
//! Ids are dot-separated segments of lowercase ASCII letters, digits and dashes,
//! each starting with a letter, e.g. `catalog-react.starred-entities`.

use crate::api::StarredEntitiesApi;
use std::fmt;
use std::marker::PhantomData;

/// Reference to the starred-entities API.
pub const STARRED_ENTITIES_API_REF: ApiRef<dyn StarredEntitiesApi> =
    ApiRef::new("catalog-react.starred-entities");

/// A typed lookup token for an API implementation of type `T`.
pub struct ApiRef<T: ?Sized> {
    id: &'static str,
    _api: PhantomData<fn() -> Box<T>>,
}

impl<T: ?Sized> ApiRef<T> {
    pub const fn new(id: &'static str) -> Self {
        Self {
            id,
            _api: PhantomData,
        }
    }

    pub const fn id(&self) -> &'static str {
        self.id
    }

    /// Checks that the id has the expected shape.
    pub fn is_valid(&self) -> bool {
        !self.id.is_empty()
            && self.id.split('.').all(|segment| {
                let mut chars = segment.chars();
                chars.next().is_some_and(|c| c.is_ascii_lowercase())
                    && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
            })
    }
}

impl<T: ?Sized> Clone for ApiRef<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for ApiRef<T> {}

impl<T: ?Sized> fmt::Debug for ApiRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiRef{{{}}}", self.id)
    }
}

impl<T: ?Sized> fmt::Display for ApiRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "apiRef{{{}}}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starred_ref_id() {
        assert_eq!(STARRED_ENTITIES_API_REF.id(), "catalog-react.starred-entities");
        assert!(STARRED_ENTITIES_API_REF.is_valid());
        assert_eq!(
            STARRED_ENTITIES_API_REF.to_string(),
            "apiRef{catalog-react.starred-entities}"
        );
    }

    #[test]
    fn test_id_validation() {
        assert!(ApiRef::<()>::new("core.storage").is_valid());
        assert!(ApiRef::<()>::new("plugin-x.api2").is_valid());
        assert!(!ApiRef::<()>::new("").is_valid());
        assert!(!ApiRef::<()>::new("Core.storage").is_valid());
        assert!(!ApiRef::<()>::new("core..storage").is_valid());
        assert!(!ApiRef::<()>::new("2fa.api").is_valid());
        assert!(!ApiRef::<()>::new("core storage").is_valid());
    }
}
