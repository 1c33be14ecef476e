//! Export — encoders that consume a finished [`Render`](crate::sequencer::Render).
//!
//! The sequencing core never depends on anything in here.

pub mod smf;

pub use smf::{to_smf, to_smf_bytes, write_midi};
