//! Pure transforms over frame sequences and single images.

pub(crate) mod bubble;
pub(crate) mod composite;
pub(crate) mod cutout;
pub(crate) mod fps;
pub(crate) mod speed;
pub(crate) mod transform;
pub(crate) mod workers;
