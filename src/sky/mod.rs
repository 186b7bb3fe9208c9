mod coord;
mod error;
mod observer;
mod transform;

pub use coord::{CoordText, EquatorialCoord};
pub use error::SkyError;
pub use observer::{Observer, ARO_ECEF_M};
pub use transform::{EquatorialTransform, HorizontalTransform};
