pub mod error;
pub mod image;
pub mod product;

pub use error::{ImageError, ValidationError};
pub use image::{EncodedImage, extension_for, media_type_for, to_data_uri};
pub use product::{Price, ProductFields, ProductRecord, demo_inventory};
