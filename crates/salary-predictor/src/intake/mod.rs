//! Profile intake: turns loosely-typed form payloads into a validated [`Profile`].
//!
//! Intake never fails. Missing or malformed values fall back to documented
//! defaults, unknown categories collapse into the `Other/Unknown` bucket, and
//! unrecognized skills are dropped; the confidence scorer reports what was lost.
//!
//! [`Profile`]: crate::estimation::Profile

mod normalizer;
mod raw;

pub use normalizer::{canonicalize, normalize};
pub use raw::{RawProfile, RawSkills, RawValue};
