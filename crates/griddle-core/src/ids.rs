//! Newtype IDs for type-safe entity references.
//!
//! Every entity is keyed by a UUID, but a `ProductId` and a `CategoryId`
//! must never be interchangeable: discount conditions and quantity rules
//! carry both and the compiler keeps them apart.

/// Defines a UUID-backed ID wrapper.
///
/// Generated API:
/// - `new()` - random v4 id
/// - `nil()` / `is_nil()` - the "empty" id that constructors reject
/// - `from_uuid()` / `as_uuid()`
/// - `Display`, `FromStr`, transparent serde
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(::uuid::Uuid);

        impl $name {
            /// Generates a new random (v4) ID.
            pub fn new() -> Self {
                Self(::uuid::Uuid::new_v4())
            }

            /// The nil (all zero) ID.
            pub const fn nil() -> Self {
                Self(::uuid::Uuid::nil())
            }

            /// Wraps an existing UUID.
            pub const fn from_uuid(id: ::uuid::Uuid) -> Self {
                Self(id)
            }

            /// Returns the underlying UUID.
            pub const fn as_uuid(&self) -> ::uuid::Uuid {
                self.0
            }

            /// True for the nil ID.
            pub fn is_nil(&self) -> bool {
                self.0.is_nil()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = ::uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                ::uuid::Uuid::parse_str(s).map(Self)
            }
        }

        impl From<::uuid::Uuid> for $name {
            fn from(id: ::uuid::Uuid) -> Self {
                Self(id)
            }
        }
    };
}

define_id!(CategoryId);
define_id!(ProductId);
define_id!(CartId);
define_id!(CartItemId);
define_id!(OrderId);
define_id!(OrderItemId);
define_id!(DiscountId);
define_id!(RuleId);
