use mongodb::bson::{oid::ObjectId, Bson, Document};
use serde::{Deserialize, Deserializer, Serialize};

/// A document of the `customers` collection.
///
/// The known attributes are typed; anything else the caller sent is kept in
/// `extra` and stored alongside them.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct Customer {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub customer_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<i64>,
    #[serde(flatten)]
    pub extra: Document,
}

/// Reads any document. The collection is not schema-checked, so a known
/// field holding an unexpected type stays in `extra` untouched instead of
/// failing the whole read.
impl<'de> Deserialize<'de> for Customer {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut extra = Document::deserialize(deserializer)?;

        Ok(Customer {
            id: take(&mut extra, "_id", |value| value.as_object_id()),
            first_name: take(&mut extra, "first_name", as_string),
            last_name: take(&mut extra, "last_name", as_string),
            customer_type: take(&mut extra, "type", as_string),
            state: take(&mut extra, "state", as_string),
            age: take(&mut extra, "age", as_integer),
            extra,
        })
    }
}

fn take<T>(document: &mut Document, key: &str, convert: impl Fn(&Bson) -> Option<T>) -> Option<T> {
    let value = convert(document.get(key)?)?;
    document.remove(key);
    Some(value)
}

fn as_string(value: &Bson) -> Option<String> {
    value.as_str().map(str::to_string)
}

fn as_integer(value: &Bson) -> Option<i64> {
    match value {
        Bson::Int32(value) => Some(i64::from(*value)),
        Bson::Int64(value) => Some(*value),
        _ => None,
    }
}
