//! Type-safe identifier wrappers around string keys.
//!
//! Every entity in the economy has a strongly-typed ID to prevent
//! accidental mixing of identifiers at compile time. IDs are plain
//! string keys because the game's data tables (resources, buildings,
//! goals) are authored by hand in configuration files.

use serde::{Deserialize, Serialize};

/// Generates a newtype wrapper around [`String`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub String);

        impl $name {
            /// Create an identifier from any string-like value.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Return the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the identifier and return the inner [`String`].
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

define_id! {
    /// Unique key for a resource kind (e.g. `wood`, `stone`, `population`).
    ResourceId
}

define_id! {
    /// Unique key for an individual villager.
    VillagerId
}

define_id! {
    /// Unique key for a placed building instance (e.g. `lumber_hut_1`).
    BuildingId
}

define_id! {
    /// Unique key for a building kind (e.g. `lumber_hut`), as used by the
    /// unlock set and the build-count goal kind.
    BuildingTypeId
}

define_id! {
    /// Unique key for a progression goal.
    GoalId
}

define_id! {
    /// Unique key for a research topic.
    ResearchId
}

define_id! {
    /// Unique key for an achievement.
    AchievementId
}
