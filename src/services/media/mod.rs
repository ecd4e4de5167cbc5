//! 미디어 파일 서비스

pub mod image_service;

pub use image_service::ImageService;
