use axum::extract::{Multipart, multipart::Field};

use crate::{CsvFile, Error};

/// The name of the form field holding the CSV file.
pub(crate) const FILE_FIELD: &str = "file";

/// Read the CSV file from the upload form.
///
/// Returns `Ok(None)` when the form has no file selected, which browsers send
/// as a file field with an empty file name.
///
/// # Errors
///
/// Returns [Error::NotCSV] if the file is not a CSV file, or
/// [Error::MultipartError] if the form could not be read.
pub(crate) async fn read_csv_file(mut multipart: Multipart) -> Result<Option<CsvFile>, Error> {
    loop {
        let field = multipart.next_field().await.map_err(|error| {
            tracing::error!("Could not read multipart form: {error}");
            Error::MultipartError(error.body_text())
        })?;

        let Some(field) = field else {
            return Ok(None);
        };

        if field.name() == Some(FILE_FIELD) {
            return parse_file_field(field).await;
        }
    }
}

async fn parse_file_field(field: Field<'_>) -> Result<Option<CsvFile>, Error> {
    let file_name = match field.file_name() {
        Some(file_name) if !file_name.is_empty() => file_name.to_owned(),
        _ => return Ok(None),
    };

    if !is_csv(field.content_type(), &file_name) {
        tracing::debug!(
            "Rejecting '{file_name}' with content type {:?}",
            field.content_type()
        );
        return Err(Error::NotCSV);
    }

    let bytes = field.bytes().await.map_err(|error| {
        tracing::error!("Could not read data from multipart form field: {error}");
        Error::MultipartError("Could not read data from multipart form field.".to_owned())
    })?;

    tracing::debug!("Received file '{}' that is {} bytes", file_name, bytes.len());

    Ok(Some(CsvFile {
        file_name,
        bytes: bytes.to_vec(),
    }))
}

// Some browsers send CSV files as `application/vnd.ms-excel` or
// `application/octet-stream`, so fall back to the file extension.
fn is_csv(content_type: Option<&str>, file_name: &str) -> bool {
    content_type == Some("text/csv") || file_name.to_ascii_lowercase().ends_with(".csv")
}
