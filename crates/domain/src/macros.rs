//! Macro for implementing Display and FromStr for string-coded enums
//!
//! Routing values and lifecycle actions travel through logs and
//! configuration as lowercase strings; this macro keeps the two directions
//! of that mapping in one place.
//!
//! # Example
//!
//! ```rust
//! use traincast_domain::impl_domain_status_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Backend {
//!     Cloud,
//!     OnPremises,
//! }
//!
//! impl_domain_status_conversions!(Backend {
//!     Cloud => "cloud",
//!     OnPremises => "on_premises",
//! });
//! ```

/// Implements Display and FromStr traits for string-coded enums
///
/// Parsing is case-insensitive; display always emits the lowercase form.
#[macro_export]
macro_rules! impl_domain_status_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => write!(f, $str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                match s.to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
