//! # Catalog Entities and References
//!
//! The starred set never stores whole entities, only their canonical reference
//! string `kind:namespace/name`. This module owns that string form.
//!
//! - [`Entity`] is the minimal slice of a catalog entity needed to derive a reference.
//! - [`EntityRef`] is the validated, lower-cased reference used as the set key.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;
use thiserror::Error;

/// Namespace used when an entity or reference omits one.
pub const DEFAULT_NAMESPACE: &str = "default";

/// Errors produced while building or parsing an [`EntityRef`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EntityRefError {
    #[error("Entity reference is empty")]
    Empty,

    #[error("Entity reference has no kind: {0}")]
    MissingKind(String),

    #[error("Malformed entity reference: {0}")]
    Malformed(String),
}

/// A catalog entity, reduced to the fields that identify it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub kind: String,
    pub metadata: EntityMetadata,
}

/// Identifying metadata of an [`Entity`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EntityMetadata {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Entity {
    /// Creates an entity in the default namespace.
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            metadata: EntityMetadata {
                name: name.into(),
                ..Default::default()
            },
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.metadata.namespace = Some(namespace.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.metadata.title = Some(title.into());
        self
    }

    /// Returns the canonical reference of this entity.
    pub fn entity_ref(&self) -> Result<EntityRef, EntityRefError> {
        EntityRef::new(
            &self.kind,
            self.metadata.namespace.as_deref(),
            &self.metadata.name,
        )
    }
}

/// Canonical `kind:namespace/name` reference to a catalog entity.
///
/// All three parts are lower-cased, so two references compare equal exactly
/// when they name the same entity. The namespace is always present in the
/// canonical form, even when it was omitted on input.
///
/// ```rust
/// use starred_entities::model::EntityRef;
///
/// let r: EntityRef = "Component:payments".parse().unwrap();
/// assert_eq!(r.as_str(), "component:default/payments");
/// assert_eq!(r.kind(), "component");
/// assert_eq!(r.namespace(), "default");
/// assert_eq!(r.name(), "payments");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntityRef(String);

impl EntityRef {
    /// Builds a reference from its parts. `namespace` falls back to [`DEFAULT_NAMESPACE`].
    pub fn new(kind: &str, namespace: Option<&str>, name: &str) -> Result<Self, EntityRefError> {
        let namespace = namespace.unwrap_or(DEFAULT_NAMESPACE);
        let raw = || format!("{kind}:{namespace}/{name}");

        for part in [kind, namespace, name] {
            if part.trim().is_empty() || part.contains([':', '/']) {
                return Err(EntityRefError::Malformed(raw()));
            }
        }

        Ok(Self(format!(
            "{}:{}/{}",
            kind.trim().to_lowercase(),
            namespace.trim().to_lowercase(),
            name.trim().to_lowercase()
        )))
    }

    /// Parses `kind:namespace/name` or `kind:name`.
    pub fn parse(input: &str) -> Result<Self, EntityRefError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(EntityRefError::Empty);
        }

        let (kind, rest) = input
            .split_once(':')
            .ok_or_else(|| EntityRefError::MissingKind(input.to_string()))?;

        let (namespace, name) = match rest.split_once('/') {
            Some((namespace, name)) => (Some(namespace), name),
            None => (None, rest),
        };

        Self::new(kind, namespace, name).map_err(|_| EntityRefError::Malformed(input.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn kind(&self) -> &str {
        self.split().0
    }

    pub fn namespace(&self) -> &str {
        self.split().1
    }

    pub fn name(&self) -> &str {
        self.split().2
    }

    // Canonical form always holds exactly one ':' followed by exactly one '/'.
    fn split(&self) -> (&str, &str, &str) {
        let (kind, rest) = self.0.split_once(':').unwrap_or(("", &self.0));
        let (namespace, name) = rest.split_once('/').unwrap_or(("", rest));
        (kind, namespace, name)
    }
}

impl Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for EntityRef {
    type Err = EntityRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for EntityRef {
    type Error = EntityRefError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<EntityRef> for String {
    fn from(value: EntityRef) -> Self {
        value.0
    }
}
