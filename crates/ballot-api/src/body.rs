//! Body extractor accepting JSON objects and url-encoded forms alike.

use axum::{
  Form, Json,
  extract::{FromRequest, Request},
  http::header,
};
use ballot_core::Record;
use serde_json::Value;

use crate::error::ApiError;

/// The submitted body as an untyped [`Record`].
///
/// Form fields arrive as strings. A request with no recognised content type
/// yields an empty record, so validation reports the missing fields instead of
/// the route failing with 415.
#[derive(Debug)]
pub struct Submission(pub Record);

impl<S> FromRequest<S> for Submission
where
  S: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
    let content_type = req
      .headers()
      .get(header::CONTENT_TYPE)
      .and_then(|v| v.to_str().ok())
      .unwrap_or_default()
      .to_ascii_lowercase();

    if content_type.starts_with("application/json") {
      let Json(record) = Json::<Record>::from_request(req, state).await?;
      Ok(Self(record))
    } else if content_type.starts_with("application/x-www-form-urlencoded") {
      let Form(fields) = Form::<Vec<(String, String)>>::from_request(req, state).await?;
      Ok(Self(
        fields
          .into_iter()
          .map(|(k, v)| (k, Value::String(v)))
          .collect(),
      ))
    } else {
      Ok(Self(Record::new()))
    }
  }
}
