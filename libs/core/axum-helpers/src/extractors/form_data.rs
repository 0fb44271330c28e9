//! Form extractor that accepts urlencoded and multipart bodies.

use crate::errors::AppError;
use axum::{
    body::Bytes,
    extract::{Form, FromRequest, Multipart, Request},
    http::header,
    response::{IntoResponse, Response},
};
use std::collections::HashMap;

/// A single uploaded file from a multipart request.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Original file name, if the client supplied one
    pub file_name: Option<String>,
    /// Declared content type, if any
    pub content_type: Option<String>,
    /// Raw file bytes
    pub data: Bytes,
}

/// Extractor for HTML-form style requests.
///
/// Accepts both `application/x-www-form-urlencoded` and
/// `multipart/form-data` bodies and flattens them into a single shape: text
/// fields as a string map, file parts (multipart only) keyed by field name.
///
/// # Example
/// ```ignore
/// use axum_helpers::FormData;
///
/// async fn create(form: FormData) -> impl IntoResponse {
///     let name = form.field("name");
///     let image = form.file("files[image]");
///     // ...
/// }
/// ```
#[derive(Debug, Default)]
pub struct FormData {
    /// Text fields by name
    pub fields: HashMap<String, String>,
    /// Uploaded files by field name
    pub files: HashMap<String, UploadedFile>,
}

impl FormData {
    /// Get a text field by name.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Get an uploaded file by field name.
    pub fn file(&self, name: &str) -> Option<&UploadedFile> {
        self.files.get(name)
    }
}

impl<S> FromRequest<S> for FormData
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();

        if content_type.starts_with("multipart/form-data") {
            let mut multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| e.into_response())?;

            let mut fields = HashMap::new();
            let mut files = HashMap::new();

            while let Some(field) = multipart
                .next_field()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()).into_response())?
            {
                let Some(name) = field.name().map(ToString::to_string) else {
                    continue;
                };

                if field.file_name().is_some() {
                    let file_name = field.file_name().map(ToString::to_string);
                    let content_type = field.content_type().map(ToString::to_string);
                    let data = field
                        .bytes()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()).into_response())?;

                    files.insert(
                        name,
                        UploadedFile {
                            file_name,
                            content_type,
                            data,
                        },
                    );
                } else {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()).into_response())?;
                    fields.insert(name, text);
                }
            }

            Ok(Self { fields, files })
        } else if content_type.is_empty() {
            // No body at all decodes as an empty form
            Ok(Self::default())
        } else {
            let Form(fields) = Form::<HashMap<String, String>>::from_request(req, state)
                .await
                .map_err(|e| e.into_response())?;

            Ok(Self {
                fields,
                files: HashMap::new(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request as HttpRequest;

    #[tokio::test]
    async fn test_urlencoded_fields() {
        let req = HttpRequest::builder()
            .method("POST")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from("name=Rust+Meetup&tagline=systems"))
            .unwrap();

        let form = FormData::from_request(req, &()).await.unwrap();
        assert_eq!(form.field("name"), Some("Rust Meetup"));
        assert_eq!(form.field("tagline"), Some("systems"));
        assert!(form.files.is_empty());
    }

    #[tokio::test]
    async fn test_missing_content_type_is_empty_form() {
        let req = HttpRequest::builder()
            .method("POST")
            .body(Body::empty())
            .unwrap();

        let form = FormData::from_request(req, &()).await.unwrap();
        assert!(form.fields.is_empty());
        assert!(form.files.is_empty());
    }

    #[tokio::test]
    async fn test_multipart_fields_and_file() {
        let body = concat!(
            "--BOUNDARY\r\n",
            "Content-Disposition: form-data; name=\"name\"\r\n\r\n",
            "Rust Meetup\r\n",
            "--BOUNDARY\r\n",
            "Content-Disposition: form-data; name=\"files[image]\"; filename=\"a.png\"\r\n",
            "Content-Type: image/png\r\n\r\n",
            "PNGDATA\r\n",
            "--BOUNDARY--\r\n",
        );

        let req = HttpRequest::builder()
            .method("POST")
            .header("content-type", "multipart/form-data; boundary=BOUNDARY")
            .body(Body::from(body))
            .unwrap();

        let form = FormData::from_request(req, &()).await.unwrap();
        assert_eq!(form.field("name"), Some("Rust Meetup"));

        let file = form.file("files[image]").unwrap();
        assert_eq!(file.file_name.as_deref(), Some("a.png"));
        assert_eq!(file.content_type.as_deref(), Some("image/png"));
        assert_eq!(&file.data[..], b"PNGDATA");
    }
}
