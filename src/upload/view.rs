use maud::{Markup, html};

use crate::{
    endpoints,
    html::{
        ALERT_CONTAINER_ID, ERROR_TEXT_STYLE, FORM_FILE_INPUT_STYLE, FORM_LABEL_STYLE,
        MUTED_TEXT_STYLE, loading_spinner,
    },
    upload::UploadStatus,
};

/// Shown while a file is being uploaded.
pub(crate) const UPLOADING_MESSAGE: &str = "Uploading...";

/// Render the upload panel.
///
/// Picking a file submits the form straight away. The file input is disabled
/// while the status does not accept uploads.
pub(crate) fn upload_view(status: &UploadStatus) -> Markup {
    let spinner = loading_spinner();
    // htmx shows the indicator while its own request is in flight. Once the
    // server knows about the upload it is shown unconditionally.
    let progress_style = if matches!(status, UploadStatus::Uploading { .. }) {
        format!("upload-progress mt-2 {MUTED_TEXT_STYLE}")
    } else {
        format!("upload-progress mt-2 htmx-indicator {MUTED_TEXT_STYLE}")
    };

    html! {
        section id="upload" class="w-full mb-8 bg-white dark:bg-gray-800 border border-gray-200
            dark:border-gray-700 rounded-lg p-4 shadow-md"
        {
            h3 class="text-xl font-semibold mb-4" { "Upload Bank Statement" }

            form
                id="upload-form"
                hx-post=(endpoints::UPLOAD_CSV)
                hx-trigger="change"
                enctype="multipart/form-data"
                hx-encoding="multipart/form-data"
                hx-disabled-elt="#file"
                hx-indicator="#upload-indicator"
                hx-target="#dashboard"
                hx-swap="outerHTML"
                hx-target-error={"#" (ALERT_CONTAINER_ID)}
            {
                label for="file" class=(FORM_LABEL_STYLE) { "Choose a CSV file" }

                input
                    id="file"
                    type="file"
                    name="file"
                    accept=".csv"
                    disabled[!status.is_enabled()]
                    class=(FORM_FILE_INPUT_STYLE);

                @if let Some(file_name) = status.file_name() {
                    p class={"upload-file-name mt-2 text-sm " (MUTED_TEXT_STYLE)} { (file_name) }
                }
            }

            p
                id="upload-indicator"
                class=(progress_style)
            {
                (spinner) (UPLOADING_MESSAGE)
            }

            @if let Some(error) = status.error() {
                p class={"upload-error mt-2 " (ERROR_TEXT_STYLE)} { (error) }
            }
        }
    }
}
