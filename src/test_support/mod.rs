//! Synthetic slice generation for validating the decoding pipeline without
//! physical USB hardware.
//!
//! Mirrors a reference implementation's `packet_generator` module: a
//! reusable in-crate builder for synthetic wire data, rather than checked-in
//! binary fixtures, used by both unit tests and the crate's integration
//! tests.

pub mod slices;
