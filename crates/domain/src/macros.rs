//! Macro for implementing Display and FromStr for status enums
//!
//! Outcome statuses and operation names cross the invocation boundary as
//! plain strings. This macro keeps the enum and its wire spelling in one
//! place.
//!
//! # Example
//!
//! ```rust
//! use onboarding_domain::impl_status_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum LinkStatus {
//!     Linked,
//!     Pending,
//! }
//!
//! impl_status_conversions!(LinkStatus {
//!     Linked => "LINKED",
//!     Pending => "PENDING",
//! });
//!
//! assert_eq!(LinkStatus::Linked.to_string(), "LINKED");
//! assert_eq!("pending".parse::<LinkStatus>().unwrap(), LinkStatus::Pending);
//! ```

/// Implements Display and FromStr traits for status enums
///
/// - Display writes the mapped string verbatim
/// - FromStr matches the mapped string case-insensitively
#[macro_export]
macro_rules! impl_status_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl ::core::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                match self {
                    $(Self::$variant => f.write_str($str),)+
                }
            }
        }

        impl ::core::str::FromStr for $enum_name {
            type Err = ::std::string::String;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                $(
                    if s.eq_ignore_ascii_case($str) {
                        return ::core::result::Result::Ok(Self::$variant);
                    }
                )+
                ::core::result::Result::Err(::std::format!(
                    "Invalid {}: {}",
                    ::core::stringify!($enum_name),
                    s
                ))
            }
        }
    };
}
