//! Typed-value codec
//!
//! Converts between arbitrary serde-serializable values and value subtrees.
//! `serde_json::Value` is the interchange representation: encode goes
//! `T -> serde_json::Value -> Node`, decode goes the other way. The
//! `preserve_order` feature keeps struct field order intact, which is what
//! makes `set_all` append genuinely new keys in declaration order.
//!
//! Codec-produced entries carry no annotations and a default marker; the
//! merge path unions them with whatever the document already holds.
//!
//! ## Lossy conversions
//!
//! - Integers outside the `i64` range fall back to `Float`.
//! - Non-finite floats (`NaN`, infinities) have no JSON representation and
//!   decode as null.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::document::{Body, Entry};
use crate::error::CodecError;
use crate::key::KeyPath;
use crate::node::{Node, Scalar};

/// Encode a typed value into a value subtree
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Node, CodecError> {
    let json = serde_json::to_value(value)?;
    Ok(node_from_json(json))
}

/// Decode a value subtree into a typed value
pub fn decode<T: DeserializeOwned>(node: &Node) -> Result<T, CodecError> {
    Ok(serde_json::from_value(json_from_node(node))?)
}

/// Decode an entry sequence as one object-shaped aggregate
pub fn decode_body<T: DeserializeOwned>(body: &Body) -> Result<T, CodecError> {
    Ok(serde_json::from_value(json_from_body(body))?)
}

fn node_from_json(json: JsonValue) -> Node {
    match json {
        JsonValue::Null => Node::Scalar(Scalar::Null),
        JsonValue::Bool(b) => Node::Scalar(Scalar::Bool(b)),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Node::Scalar(Scalar::Int(i))
            } else {
                // u64 beyond i64::MAX and true floats both land here
                Node::Scalar(Scalar::Float(n.as_f64().unwrap_or(0.0)))
            }
        }
        JsonValue::String(s) => Node::Scalar(Scalar::String(s)),
        JsonValue::Array(items) => Node::List(items.into_iter().map(node_from_json).collect()),
        JsonValue::Object(map) => {
            let mut body = Body::new();
            for (key, value) in map {
                body.push(Entry::new(KeyPath::ident(key), node_from_json(value)));
            }
            Node::Object(body)
        }
    }
}

fn json_from_node(node: &Node) -> JsonValue {
    match node {
        Node::Scalar(Scalar::Null) => JsonValue::Null,
        Node::Scalar(Scalar::Bool(b)) => JsonValue::Bool(*b),
        Node::Scalar(Scalar::Int(i)) => JsonValue::from(*i),
        // Non-finite floats have no JSON representation; they become null
        Node::Scalar(Scalar::Float(f)) => serde_json::Number::from_f64(*f)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null),
        Node::Scalar(Scalar::String(s)) => JsonValue::String(s.clone()),
        Node::List(items) => JsonValue::Array(items.iter().map(json_from_node).collect()),
        Node::Object(body) => json_from_body(body),
    }
}

fn json_from_body(body: &Body) -> JsonValue {
    let mut map = serde_json::Map::with_capacity(body.len());
    for entry in body {
        // Multi-segment keys only arise in hand-built or parsed documents;
        // their segments join with '.' on the JSON side. Later duplicates
        // overwrite earlier ones, matching JSON object semantics.
        map.insert(entry.key.joined(), json_from_node(&entry.value));
    }
    JsonValue::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Server {
        host: String,
        ports: Vec<i64>,
        tls: bool,
    }

    #[test]
    fn test_encode_scalars() {
        assert_eq!(encode(&true).unwrap(), Node::from(true));
        assert_eq!(encode(&42i64).unwrap(), Node::from(42i64));
        assert_eq!(encode(&1.5f64).unwrap(), Node::from(1.5f64));
        assert_eq!(encode("hi").unwrap(), Node::from("hi"));
        assert_eq!(encode(&Option::<i64>::None).unwrap(), Node::null());
    }

    #[test]
    fn test_encode_struct_preserves_field_order() {
        let node = encode(&Server {
            host: "localhost".into(),
            ports: vec![80, 443],
            tls: true,
        })
        .unwrap();
        let body = node.as_object().expect("struct encodes to an object");
        let keys: Vec<_> = body.iter().map(|e| e.key.joined()).collect();
        assert_eq!(keys, ["host", "ports", "tls"]);
    }

    #[test]
    fn test_encode_nested_struct() {
        #[derive(Serialize)]
        struct Outer {
            inner: Server,
        }

        let node = encode(&Outer {
            inner: Server {
                host: "h".into(),
                ports: vec![],
                tls: false,
            },
        })
        .unwrap();
        let body = node.as_object().unwrap();
        assert!(body.entries()[0].value.is_object());
    }

    #[test]
    fn test_decode_round_trips_struct() {
        let original = Server {
            host: "localhost".into(),
            ports: vec![8080, 8081],
            tls: false,
        };
        let node = encode(&original).unwrap();
        let restored: Server = decode(&node).unwrap();
        assert_eq!(restored, original);
    }

    #[test]
    fn test_decode_shape_mismatch_fails() {
        let node = Node::from("not a number");
        assert!(decode::<i64>(&node).is_err());
    }

    #[test]
    fn test_u64_beyond_i64_falls_back_to_float() {
        let node = encode(&u64::MAX).unwrap();
        assert!(matches!(node, Node::Scalar(Scalar::Float(_))));
    }

    #[test]
    fn test_non_finite_float_decodes_as_null() {
        let node = Node::from(f64::NAN);
        let restored: Option<f64> = decode(&node).unwrap();
        assert_eq!(restored, None);
    }

    #[test]
    fn test_decode_body_as_aggregate() {
        let mut body = Body::new();
        body.push(Entry::new("a", 1i64));
        body.push(Entry::new("b", 2i64));
        let decoded: std::collections::HashMap<String, i64> = decode_body(&body).unwrap();
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded["a"], 1);
        assert_eq!(decoded["b"], 2);
    }
}
