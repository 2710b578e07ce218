//! Macro for implementing Display and FromStr for wire-name enums
//!
//! Several small enums in the model (wire format, response-code class) have a
//! canonical lowercase name that appears on the wire, in configuration files
//! or in log fields. This macro keeps the two directions of that mapping in
//! one place.
//!
//! # Example
//!
//! ```rust
//! use regwapi_domain::impl_wire_name_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Transport {
//!     Http,
//!     Https,
//! }
//!
//! impl_wire_name_conversions!(Transport {
//!     Http => "http",
//!     Https => "https",
//! });
//!
//! assert_eq!(Transport::Https.to_string(), "https");
//! assert_eq!("HTTP".parse::<Transport>(), Ok(Transport::Http));
//! ```

/// Implements Display and FromStr traits for wire-name enums
///
/// This macro generates:
/// - Display trait: writes the canonical name of the variant
/// - FromStr trait: parses case-insensitive names back to the variant
///
/// Parsing ignores surrounding whitespace; unknown names produce an error
/// message that includes the enum name.
#[macro_export]
macro_rules! impl_wire_name_conversions {
    ($enum_name:ident { $($variant:ident => $str:literal),+ $(,)? }) => {
        impl ::std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                match self {
                    $(Self::$variant => f.write_str($str),)+
                }
            }
        }

        impl ::std::str::FromStr for $enum_name {
            type Err = ::std::string::String;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($str => ::std::result::Result::Ok(Self::$variant),)+
                    _ => ::std::result::Result::Err(::std::format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
