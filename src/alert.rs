//! Alert boxes for displaying success and error messages to users.

use axum::response::{Html, IntoResponse, Response};
use maud::{Markup, html};

/// A success or error message shown in a coloured box.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// A success message without details.
    SuccessSimple { message: String },
    /// An error message with a line of details underneath.
    Error { message: String, details: String },
    /// An error message without details.
    ErrorSimple { message: String },
}

impl Alert {
    pub fn into_html(self) -> Html<String> {
        Html(self.into_markup().into_string())
    }

    pub fn into_markup(self) -> Markup {
        let (role_style, message, details) = match self {
            Alert::SuccessSimple { message } => (SUCCESS_STYLE, message, None),
            Alert::Error { message, details } => (ERROR_STYLE, message, Some(details)),
            Alert::ErrorSimple { message } => (ERROR_STYLE, message, None),
        };

        html! {
            div class=(role_style) role="alert"
            {
                p class="font-medium" { (message) }

                @if let Some(details) = details {
                    p class="text-sm" { (details) }
                }
            }
        }
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        self.into_html().into_response()
    }
}

const SUCCESS_STYLE: &str = "alert-success p-4 mb-4 rounded-lg text-green-800 \
    bg-green-50 dark:bg-gray-800 dark:text-green-400";

const ERROR_STYLE: &str = "alert-error p-4 mb-4 rounded-lg text-red-800 \
    bg-red-50 dark:bg-gray-800 dark:text-red-400";
