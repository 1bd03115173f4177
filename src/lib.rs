//! # Disha Protocol Parser
//!
//! This library decodes single messages of the Disha GPS tracker reporting
//! protocol, a `#`-delimited ASCII format:
//!
//! `$A#A#<imei>#<validity>#<time>#<date>#<latitude>#<N|S>#<longitude>#<E|W>#...*`
//!
//! Decoding is split into two strictly layered parts:
//! - a [`Grammar`] compiled from a declarative list of [`FieldSpec`]
//!   descriptors, which recognizes one message shape and exposes its
//!   captures in declaration order, and
//! - a report builder ([`DishaDecoder`]) that consumes the captures through
//!   a typed cursor and assembles a [`Report`].
//!
//! Transport framing, identity storage and report persistence stay outside:
//! the decoder takes one already framed line per call and resolves terminal
//! identifiers through the [`IdentityResolver`] trait.
//!
//! ## Usage
//!
//! ```rust
//! use disha_parser::{DeviceId, DishaDecoder, MemoryRegistry};
//!
//! let mut registry = MemoryRegistry::new();
//! registry.insert("123456789012345", DeviceId(7));
//!
//! let decoder = DishaDecoder::new(registry);
//! let report = decoder
//!     .decode(
//!         "$A#A#123456789012345#A#143000#051120#2233.8840#N#11406.5680#E#\
//!          12.5#270.0#08#1.2#23#2#83#512#256#45.6#12345.0#0101*",
//!     )
//!     .expect("grammar and builder agree")
//!     .expect("terminal is registered");
//!
//! assert!(report.valid);
//! assert_eq!(report.device, DeviceId(7));
//! ```
//!
//! Text that does not conform to the message shape, and messages from
//! unregistered terminals, decode to `Ok(None)`; [`DecodeError`] is reserved
//! for grammar/builder contract violations.

pub mod captures;
pub mod error;
pub mod grammar;
pub mod identity;
pub mod report;

mod disha;

pub use captures::Captures;
pub use disha::DishaDecoder;
pub use error::DecodeError;
pub use grammar::{FieldSpec, Grammar};
pub use identity::{DeviceId, IdentityResolver, MemoryRegistry};
pub use report::{AttributeValue, Report};

#[cfg(doctest)]
#[doc = include_str!("../README.md")]
struct README;
