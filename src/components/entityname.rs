use bevy_ecs::prelude::Component;

/// Free-form label. Several entities may share the same name.
#[derive(Component, Clone, Debug, PartialEq, Eq)]
pub struct EntityName(pub String);

impl EntityName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for EntityName {
    fn default() -> Self {
        Self::new("entity")
    }
}
