//! Newtype IDs for type-safe identifiers.
//!
//! Using newtypes prevents accidentally mixing up different ID types,
//! e.g., passing a ProductId where a CartId is expected. Generated IDs are
//! opaque prefixed tokens: a short kind prefix plus URL-safe base64 random
//! bytes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate newtype ID structs.
///
/// `$prefix` is the token prefix and `$bytes` the number of random bytes
/// behind a generated ID.
macro_rules! define_id {
    ($name:ident, $prefix:literal, $bytes:literal) => {
        /// A unique identifier.
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Create an ID from an existing string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Generate a new unique ID.
            pub fn generate() -> Self {
                Self(generate_token($prefix, $bytes))
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(ProductId, "prod", 9);
define_id!(CollectionId, "coll", 9);
define_id!(CustomerId, "cust", 9);
// Carts are addressed by an opaque 128-bit token handed to the client.
define_id!(CartId, "cart", 16);
define_id!(OrderId, "order", 9);
define_id!(ReviewId, "rev", 9);
define_id!(UserId, "user", 9);

/// Generate a prefixed random token, e.g. `cart_5fY…`.
fn generate_token(prefix: &str, bytes: usize) -> String {
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
    use rand::RngCore;

    let mut buf = vec![0u8; bytes];
    rand::thread_rng().fill_bytes(&mut buf);
    format!("{}_{}", prefix, URL_SAFE_NO_PAD.encode(buf))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = ProductId::new("prod-123");
        assert_eq!(id.as_str(), "prod-123");
    }

    #[test]
    fn test_id_generation_is_unique() {
        let id1 = CartId::generate();
        let id2 = CartId::generate();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_generated_id_prefix() {
        let id = CartId::generate();
        assert!(id.as_str().starts_with("cart_"));

        let id = OrderId::generate();
        assert!(id.as_str().starts_with("order_"));
    }

    #[test]
    fn test_cart_token_carries_128_bits() {
        // 16 random bytes -> 22 base64 chars, plus the "cart_" prefix.
        let id = CartId::generate();
        assert_eq!(id.as_str().len(), "cart_".len() + 22);
    }

    #[test]
    fn test_id_from_string() {
        let id: ProductId = "prod-456".into();
        assert_eq!(id.as_str(), "prod-456");
    }

    #[test]
    fn test_id_display() {
        let id = CustomerId::new("cust-789");
        assert_eq!(format!("{}", id), "cust-789");
    }

    #[test]
    fn test_id_serialization_is_transparent() {
        let id = ProductId::new("prod-1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, r#""prod-1""#);
    }
}
