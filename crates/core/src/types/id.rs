//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types. Every entity in the
//! relational store is keyed by a CHAR(36) UUIDv4 string minted by the
//! application, so the wrappers hold a `String` and delegate sqlx
//! encoding/decoding to it.

use uuid::Uuid;

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - `generate()` minting a fresh UUIDv4 value
/// - `new()`, `as_str()`, `into_inner()` conversion methods
/// - `From<String>` and `Display` implementations
/// - a transparent `sqlx::Type` derive (with the `mysql` feature)
///
/// # Example
///
/// ```rust
/// # use veranda_core::define_id;
/// define_id!(WidgetId);
/// define_id!(GadgetId);
///
/// let widget_id = WidgetId::generate();
///
/// // WidgetId and GadgetId are distinct types, so this won't compile:
/// // let _: GadgetId = widget_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[cfg_attr(feature = "mysql", derive(::sqlx::Type))]
        #[cfg_attr(feature = "mysql", sqlx(transparent))]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Mint a fresh random ID.
            #[must_use]
            pub fn generate() -> Self {
                Self($crate::types::id::new_uuid_string())
            }

            /// Wrap an existing ID value.
            #[must_use]
            pub const fn new(id: String) -> Self {
                Self(id)
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return its inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

/// Mint a hyphenated UUIDv4 string for a new entity ID.
#[must_use]
pub fn new_uuid_string() -> String {
    Uuid::new_v4().to_string()
}

// Define standard entity IDs
define_id!(UserId);
define_id!(FeatureId);
define_id!(ReasonId);
define_id!(SlideId);
define_id!(PostId);
define_id!(ContactId);
define_id!(SiteInfoId);
define_id!(ColorConfigId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_valid_uuid() {
        let id = UserId::generate();
        assert!(Uuid::parse_str(id.as_str()).is_ok());
    }

    #[test]
    fn test_generate_is_unique() {
        assert_ne!(UserId::generate(), UserId::generate());
    }

    #[test]
    fn test_display_matches_inner() {
        let id = FeatureId::new("abc-123".to_owned());
        assert_eq!(id.to_string(), "abc-123");
        assert_eq!(id.as_str(), "abc-123");
    }

    #[test]
    fn test_serde_transparent() {
        let id = SlideId::new("deadbeef".to_owned());
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"deadbeef\"");

        let back: SlideId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
