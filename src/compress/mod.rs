//! Size-bounded adaptive compression.

pub(crate) mod cancel;
pub(crate) mod compressor;
