//! # Error Types for the 2-3 Tree and Its Report Front End
//!
//! This module defines the error taxonomy shared by the map itself and the
//! traversal report generator built on top of it.
//!
//! ## Error Handling Strategy
//!
//! The map's own operations almost never fail. Lookups miss by returning
//! `None`, and the only raising accessor is [`Tree::at`](crate::Tree::at),
//! which reports a missing key as [`Error::KeyNotFound`] so callers can
//! distinguish "absent" from "present" without inventing sentinel values.
//!
//! Everything else in this enum belongs to the report generator boundary:
//! an unrecognized traversal selector, a checksum that leaves the 32-bit
//! range, or a failed read/write on the underlying stream. Those are fatal
//! to the run that produced them but never damage the map.
//!
//! Structural corruption - a dangling arena index, a split that breaks the
//! equal-leaf-depth invariant - is a programming error, not a recoverable
//! condition. Such states are guarded by assertions and the test-only
//! invariant checker rather than by variants here.

use thiserror::Error;

/// Errors produced by the map's raising accessors and the report generator.
#[derive(Error, Debug)]
pub enum Error {
	/// The requested key is not present in the map.
	///
	/// Raised only by [`Tree::at`](crate::Tree::at) and
	/// [`Tree::at_mut`](crate::Tree::at_mut). The non-raising lookups
	/// ([`Tree::get`](crate::Tree::get) and friends) report a miss as
	/// `None` instead.
	#[error("key not found")]
	KeyNotFound,

	/// The traversal mode selector did not name a known order.
	///
	/// The report generator accepts exactly three selectors:
	/// `"ascending"`, `"descending"` and `"breadth"`. Anything else ends
	/// the run before any output is produced.
	#[error("unknown traversal mode '{0}'")]
	UnknownMode(String),

	/// The running key checksum left the `i32` range.
	///
	/// The report generator accumulates visited keys in a 32-bit signed
	/// sum. Both overflow and underflow are reported through this variant;
	/// values emitted before the offending key remain on the output stream,
	/// matching the incremental write order of the report.
	#[error("integer overflow while summing keys")]
	IntegerOverflow,

	/// Reading the pair source or writing the report failed.
	#[error(transparent)]
	Io(#[from] std::io::Error),
}

/// A Result type alias using the crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
