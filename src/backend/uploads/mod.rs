//! Uploads Module
//!
//! Image uploads to local disk. Stored files are served back by the router
//! under `/uploads`.

pub mod handlers;

pub use handlers::{image_extension, upload_file, UploadResponse, UPLOADS_URL_PREFIX};
