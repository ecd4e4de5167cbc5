pub mod image_data;

pub use image_data::ImageData;
