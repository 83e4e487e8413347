//! Frames, non-empty frame sequences and timeline utilities shared by every transform.

pub(crate) mod model;
pub(crate) mod seq;
