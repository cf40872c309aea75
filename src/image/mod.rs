pub mod io;
pub mod mask;
pub mod rgba;
pub mod traits;

pub use self::mask::BitMask;
pub use self::rgba::RasterImage;
pub use self::traits::{ImageView, ImageViewMut, Rows, RowsMut};
