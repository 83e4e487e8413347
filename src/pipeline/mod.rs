//! Byte-in, byte-out processing of user media.

pub(crate) mod processor;
