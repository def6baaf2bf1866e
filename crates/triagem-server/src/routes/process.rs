//! Email classification route.
//!
//! POST /process takes a multipart form with either `email_content` (text)
//! or `email_file` (.txt/.pdf). A urlencoded form may carry
//! `email_content` only. Input problems answer 400; classifier failures are
//! already folded into the 200 payload.

use std::sync::Arc;

use axum::extract::multipart::MultipartError;
use axum::extract::{FromRequest, Multipart, Request, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Form, Json, Router};
use serde::Deserialize;
use tracing::warn;
use triagem_ingest::{EmailInput, UploadedFile};

use crate::pipeline;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/process", post(process_email))
}

/// Fields read from the form.
#[derive(Default)]
struct ProcessForm {
    email_content: Option<String>,
    email_file: Option<UploadedFile>,
}

impl ProcessForm {
    /// A named file wins over typed text.
    fn into_input(self) -> Option<EmailInput> {
        match (self.email_file, self.email_content) {
            (Some(file), _) => Some(EmailInput::File(file)),
            (None, Some(text)) => Some(EmailInput::RawText(text)),
            (None, None) => None,
        }
    }
}

#[derive(Deserialize)]
struct UrlencodedForm {
    email_content: Option<String>,
}

/// How the request body is encoded.
#[derive(Debug, PartialEq, Eq)]
enum BodyKind {
    Multipart,
    Urlencoded,
    /// No Content-Type at all: treated as an empty form.
    Missing,
    Other,
}

fn body_kind(headers: &HeaderMap) -> BodyKind {
    let Some(value) = headers.get(header::CONTENT_TYPE) else {
        return BodyKind::Missing;
    };
    let mime = value
        .to_str()
        .unwrap_or("")
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();
    match mime.as_str() {
        "multipart/form-data" => BodyKind::Multipart,
        "application/x-www-form-urlencoded" => BodyKind::Urlencoded,
        _ => BodyKind::Other,
    }
}

/// POST /process — classify an email and suggest a reply.
async fn process_email(State(state): State<Arc<AppState>>, request: Request) -> Response {
    let form = match read_request(request).await {
        Ok(form) => form,
        Err(response) => return response,
    };

    let Some(input) = form.into_input() else {
        return error_response(StatusCode::BAD_REQUEST, pipeline::EMPTY_CONTENT_MESSAGE);
    };

    match pipeline::run(&state, input).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e) => error_response(e.status(), e.to_string()),
    }
}

async fn read_request(request: Request) -> Result<ProcessForm, Response> {
    match body_kind(request.headers()) {
        BodyKind::Multipart => {
            let multipart = Multipart::from_request(request, &())
                .await
                .map_err(|e| invalid_request(e.status(), &e.body_text()))?;
            read_form(multipart).await.map_err(|e| {
                warn!("Rejected malformed multipart body: {}", e);
                invalid_request(e.status(), &e.body_text())
            })
        }
        BodyKind::Urlencoded => {
            let Form(fields) = Form::<UrlencodedForm>::from_request(request, &())
                .await
                .map_err(|e| invalid_request(e.status(), &e.body_text()))?;
            Ok(ProcessForm {
                email_content: fields.email_content,
                email_file: None,
            })
        }
        BodyKind::Missing => Ok(ProcessForm::default()),
        BodyKind::Other => Err(invalid_request(
            StatusCode::BAD_REQUEST,
            "envie um formulário multipart/form-data ou application/x-www-form-urlencoded",
        )),
    }
}

async fn read_form(mut multipart: Multipart) -> Result<ProcessForm, MultipartError> {
    let mut form = ProcessForm::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("email_file") => {
                let filename = field.file_name().unwrap_or("").to_string();
                let bytes = field.bytes().await?;
                // Browsers send an empty, unnamed part when no file was picked.
                if !filename.is_empty() {
                    form.email_file = Some(UploadedFile::new(filename, bytes.to_vec()));
                }
            }
            Some("email_content") => {
                form.email_content = Some(field.text().await?);
            }
            _ => {}
        }
    }

    Ok(form)
}

fn invalid_request(status: StatusCode, detail: &str) -> Response {
    error_response(status, format!("Requisição inválida: {}", detail))
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(serde_json::json!({ "error": message.into() })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_takes_precedence_over_text() {
        let form = ProcessForm {
            email_content: Some("texto".into()),
            email_file: Some(UploadedFile::new("email.txt", b"arquivo".to_vec())),
        };
        assert!(matches!(form.into_input(), Some(EmailInput::File(_))));
    }

    #[test]
    fn test_text_only() {
        let form = ProcessForm {
            email_content: Some("texto".into()),
            email_file: None,
        };
        assert!(matches!(form.into_input(), Some(EmailInput::RawText(t)) if t == "texto"));
    }

    #[test]
    fn test_body_kind() {
        let mut headers = HeaderMap::new();
        assert_eq!(body_kind(&headers), BodyKind::Missing);

        headers.insert(
            header::CONTENT_TYPE,
            "multipart/form-data; boundary=x".parse().unwrap(),
        );
        assert_eq!(body_kind(&headers), BodyKind::Multipart);

        headers.insert(
            header::CONTENT_TYPE,
            "Application/X-WWW-Form-Urlencoded; charset=utf-8".parse().unwrap(),
        );
        assert_eq!(body_kind(&headers), BodyKind::Urlencoded);

        headers.insert(header::CONTENT_TYPE, "application/json".parse().unwrap());
        assert_eq!(body_kind(&headers), BodyKind::Other);
    }

    #[test]
    fn test_empty_form() {
        assert!(ProcessForm::default().into_input().is_none());
    }
}
