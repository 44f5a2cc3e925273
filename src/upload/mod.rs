//! Uploading CSV bank statements to the backend.

mod controller;
mod multipart;
mod view;

pub use controller::{UploadController, UploadOutcome, UploadStatus};
pub(crate) use multipart::read_csv_file;
pub(crate) use view::upload_view;
