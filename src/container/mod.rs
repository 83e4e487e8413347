//! Template images with slots that user media is placed into.

pub(crate) mod template;
