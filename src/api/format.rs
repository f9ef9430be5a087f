use mongodb::bson::{Bson, Document};
use serde_json::{Map, Number, Value};

/// Convert a stored document into the public wire format.
///
/// ObjectIds become their 24-hex string and datetimes an RFC 3339 string, so
/// clients see the same shapes they send. Other BSON types fall back to
/// relaxed extended JSON.
pub fn document_to_api_value(document: Document) -> Value {
    let mut obj = Map::with_capacity(document.len());
    for (key, value) in document {
        obj.insert(key, bson_to_api_value(value));
    }
    Value::Object(obj)
}

pub fn documents_to_api_values(documents: Vec<Document>) -> Vec<Value> {
    documents.into_iter().map(document_to_api_value).collect()
}

fn bson_to_api_value(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => match dt.try_to_rfc3339_string() {
            Ok(s) => Value::String(s),
            Err(_) => Value::Number(dt.timestamp_millis().into()),
        },
        Bson::String(s) => Value::String(s),
        Bson::Boolean(b) => Value::Bool(b),
        Bson::Int32(i) => Value::Number(i.into()),
        Bson::Int64(i) => Value::Number(i.into()),
        // NaN and infinities have no JSON form
        Bson::Double(f) => Number::from_f64(f).map_or(Value::Null, Value::Number),
        Bson::Decimal128(d) => Value::String(d.to_string()),
        Bson::Null | Bson::Undefined => Value::Null,
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_api_value).collect()),
        Bson::Document(doc) => document_to_api_value(doc),
        other => other.into_relaxed_extjson(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{doc, oid::ObjectId, DateTime};
    use serde_json::json;

    #[test]
    fn renders_identifiers_as_hex() {
        let id = ObjectId::parse_str("573a1390f29313caabcd4135").unwrap();
        let value = document_to_api_value(doc! { "_id": id, "movie_id": id, "name": "Ned Stark" });
        assert_eq!(
            value,
            json!({
                "_id": "573a1390f29313caabcd4135",
                "movie_id": "573a1390f29313caabcd4135",
                "name": "Ned Stark"
            })
        );
    }

    #[test]
    fn renders_dates_as_rfc3339() {
        let date = DateTime::from_millis(0);
        let value = document_to_api_value(doc! { "date": date });
        let rendered = value["date"].as_str().expect("date string");
        assert!(rendered.starts_with("1970-01-01T00:00:00"), "got {rendered}");
    }

    #[test]
    fn renders_nested_values() {
        let value = document_to_api_value(doc! {
            "year": 2024,
            "runtime": 121_i64,
            "imdb": { "rating": 7.5, "votes": 1200 },
            "genres": ["Drama", "Comedy"],
            "awards": Bson::Null,
            "broken": f64::NAN,
        });
        assert_eq!(
            value,
            json!({
                "year": 2024,
                "runtime": 121,
                "imdb": { "rating": 7.5, "votes": 1200 },
                "genres": ["Drama", "Comedy"],
                "awards": null,
                "broken": null
            })
        );
    }
}
