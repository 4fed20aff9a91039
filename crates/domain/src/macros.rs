//! Macro for implementing Display and FromStr for name enums
//!
//! Several small enums (box kinds, request kinds) have a stable lowercase
//! name used in logs, metrics labels and error messages. This macro generates
//! both directions of that mapping from a single table.
//!
//! # Example
//!
//! ```rust
//! use axbridge_domain::impl_name_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Direction {
//!     Forward,
//!     Backward,
//! }
//!
//! impl_name_conversions!(Direction {
//!     Forward => "forward",
//!     Backward => "backward",
//! });
//!
//! assert_eq!(Direction::Forward.to_string(), "forward");
//! assert_eq!("BACKWARD".parse::<Direction>(), Ok(Direction::Backward));
//! ```

/// Implements Display and FromStr traits for name enums
///
/// This macro generates:
/// - Display trait: converts enum variants to their lowercase names
/// - FromStr trait: parses case-insensitive names to enum variants
#[macro_export]
macro_rules! impl_name_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Stable lowercase name of the variant.
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
