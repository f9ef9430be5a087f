use mongodb::bson::Document;
use serde::{de, Deserialize, Deserializer};
use utoipa::ToSchema;

use crate::constants::{
    DOCUMENT_BODY_REQUIRED_MESSAGE, MOVIES_COLLECTION, MOVIE_CREATED_MESSAGE,
    MOVIE_DELETED_MESSAGE, MOVIE_EDITED_MESSAGE, MOVIE_NOT_FOUND_MESSAGE,
};
use crate::error::ApiError;

use super::resource::Resource;

/// The `movies` collection
pub struct Movies;

/// Movie fields accepted on create and update. Absent fields are left out of
/// the stored document or the `$set`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct MoviePayload {
    pub title: Option<String>,
    pub plot: Option<String>,
    #[serde(default, deserialize_with = "deserialize_year")]
    #[schema(example = 2010)]
    pub year: Option<i32>,
    pub poster: Option<String>,
}

impl MoviePayload {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.plot.is_none() && self.year.is_none() && self.poster.is_none()
    }

    fn into_document(self) -> Result<Document, ApiError> {
        if self.is_empty() {
            return Err(ApiError::BadRequest(DOCUMENT_BODY_REQUIRED_MESSAGE));
        }

        let mut document = Document::new();
        if let Some(title) = self.title {
            document.insert("title", title);
        }
        if let Some(plot) = self.plot {
            document.insert("plot", plot);
        }
        if let Some(year) = self.year {
            document.insert("year", year);
        }
        if let Some(poster) = self.poster {
            document.insert("poster", poster);
        }
        Ok(document)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum YearInput {
    Number(i64),
    Text(String),
}

/// Years arrive as numbers or as numeric strings from form-style clients
fn deserialize_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<YearInput>::deserialize(deserializer)? {
        None => Ok(None),
        Some(YearInput::Number(n)) => i32::try_from(n)
            .map(Some)
            .map_err(|_| de::Error::custom(format!("year out of range: {n}"))),
        Some(YearInput::Text(s)) => s
            .trim()
            .parse::<i32>()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("invalid year: {s}"))),
    }
}

impl Resource for Movies {
    const COLLECTION: &'static str = MOVIES_COLLECTION;

    const CREATED_MESSAGE: &'static str = MOVIE_CREATED_MESSAGE;
    const NOT_FOUND_MESSAGE: &'static str = MOVIE_NOT_FOUND_MESSAGE;
    const UPDATED_MESSAGE: &'static str = MOVIE_EDITED_MESSAGE;
    const DELETED_MESSAGE: &'static str = MOVIE_DELETED_MESSAGE;

    type Create = MoviePayload;
    type Patch = MoviePayload;

    fn create_document(payload: MoviePayload) -> Result<Document, ApiError> {
        payload.into_document()
    }

    fn patch_document(payload: MoviePayload) -> Result<Document, ApiError> {
        payload.into_document()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> Result<MoviePayload, serde_json::Error> {
        serde_json::from_value(value)
    }

    #[test]
    fn accepts_numeric_and_string_years() {
        assert_eq!(parse(json!({ "year": 2024 })).unwrap().year, Some(2024));
        assert_eq!(parse(json!({ "year": "1999" })).unwrap().year, Some(1999));
        assert_eq!(parse(json!({ "year": null })).unwrap().year, None);
        assert_eq!(parse(json!({ "title": "x" })).unwrap().year, None);
    }

    #[test]
    fn rejects_unusable_years() {
        assert!(parse(json!({ "year": "soon" })).is_err());
        assert!(parse(json!({ "year": 99999999999_i64 })).is_err());
    }

    #[test]
    fn builds_document_from_supplied_fields() {
        let payload = parse(json!({
            "title": "new Movie",
            "plot": "new movie",
            "year": 2024,
            "poster": "poster_url",
            "ignored": true
        }))
        .unwrap();

        assert_eq!(
            Movies::create_document(payload).unwrap(),
            doc! { "title": "new Movie", "plot": "new movie", "year": 2024, "poster": "poster_url" }
        );
    }

    #[test]
    fn patch_only_sets_named_fields() {
        let payload = parse(json!({ "plot": "rewritten" })).unwrap();
        assert_eq!(Movies::patch_document(payload).unwrap(), doc! { "plot": "rewritten" });
    }

    #[test]
    fn empty_payload_is_rejected() {
        let err = Movies::patch_document(MoviePayload::default()).unwrap_err();
        assert_eq!(err.message(), DOCUMENT_BODY_REQUIRED_MESSAGE);
    }
}
