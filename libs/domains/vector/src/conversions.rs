//! Conversions between domain types and the Qdrant client's protobuf types.

use std::collections::HashMap;

use qdrant_client::qdrant::{
    self, Distance, PointId, Value as QdrantValue, point_id::PointIdOptions, value::Kind,
};
use uuid::Uuid;

use crate::error::{VectorError, VectorResult};
use crate::models::{DistanceMetric, Payload, PointKey, ScoredPoint};

// ===== Distance Metric =====

pub fn distance_to_qdrant(metric: DistanceMetric) -> Distance {
    match metric {
        DistanceMetric::Cosine => Distance::Cosine,
        DistanceMetric::Euclidean => Distance::Euclid,
        DistanceMetric::DotProduct => Distance::Dot,
        DistanceMetric::Manhattan => Distance::Manhattan,
    }
}

// ===== Point IDs =====

pub fn point_key_to_qdrant(key: PointKey) -> PointId {
    match key {
        PointKey::Num(n) => PointId::from(n),
        PointKey::Uuid(u) => PointId::from(u.to_string()),
    }
}

/// Ids the store sends back that cannot be represented are dropped to `None`.
pub fn point_key_from_qdrant(point_id: &PointId) -> Option<PointKey> {
    match &point_id.point_id_options {
        Some(PointIdOptions::Num(n)) => Some(PointKey::Num(*n)),
        Some(PointIdOptions::Uuid(s)) => Uuid::parse_str(s).ok().map(PointKey::Uuid),
        None => None,
    }
}

// ===== Payload =====

pub fn payload_to_qdrant(payload: Payload) -> VectorResult<HashMap<String, QdrantValue>> {
    payload
        .into_iter()
        .map(|(key, val)| match json_to_qdrant_value(val) {
            Ok(converted) => Ok((key, converted)),
            Err(VectorError::Validation(msg)) => Err(VectorError::Validation(format!(
                "payload field '{}': {}",
                key, msg
            ))),
            Err(e) => Err(e),
        })
        .collect()
}

/// An empty map from the store is reported as no payload.
pub fn payload_from_qdrant(payload: HashMap<String, QdrantValue>) -> Option<Payload> {
    if payload.is_empty() {
        return None;
    }

    Some(
        payload
            .into_iter()
            .map(|(key, val)| (key, qdrant_value_to_json(val)))
            .collect(),
    )
}

/// Qdrant integers are signed 64-bit. Unsigned values above `i64::MAX` are
/// rejected instead of being rounded through a double.
pub fn json_to_qdrant_value(val: serde_json::Value) -> VectorResult<QdrantValue> {
    let kind = match val {
        serde_json::Value::Null => Kind::NullValue(0),
        serde_json::Value::Bool(b) => Kind::BoolValue(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Kind::IntegerValue(i)
            } else if n.is_u64() {
                return Err(VectorError::Validation(format!(
                    "integer {} does not fit in a signed 64-bit payload value",
                    n
                )));
            } else {
                Kind::DoubleValue(n.as_f64().unwrap_or_default())
            }
        }
        serde_json::Value::String(s) => Kind::StringValue(s),
        serde_json::Value::Array(items) => Kind::ListValue(qdrant::ListValue {
            values: items
                .into_iter()
                .map(json_to_qdrant_value)
                .collect::<VectorResult<_>>()?,
        }),
        serde_json::Value::Object(map) => Kind::StructValue(qdrant::Struct {
            fields: map
                .into_iter()
                .map(|(k, v)| Ok((k, json_to_qdrant_value(v)?)))
                .collect::<VectorResult<_>>()?,
        }),
    };

    Ok(QdrantValue { kind: Some(kind) })
}

pub fn qdrant_value_to_json(val: QdrantValue) -> serde_json::Value {
    match val.kind {
        None | Some(Kind::NullValue(_)) => serde_json::Value::Null,
        Some(Kind::BoolValue(b)) => serde_json::Value::Bool(b),
        Some(Kind::IntegerValue(i)) => serde_json::Value::Number(i.into()),
        Some(Kind::DoubleValue(f)) => serde_json::Number::from_f64(f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Some(Kind::StringValue(s)) => serde_json::Value::String(s),
        Some(Kind::ListValue(list)) => serde_json::Value::Array(
            list.values.into_iter().map(qdrant_value_to_json).collect(),
        ),
        Some(Kind::StructValue(s)) => serde_json::Value::Object(
            s.fields
                .into_iter()
                .map(|(k, v)| (k, qdrant_value_to_json(v)))
                .collect(),
        ),
    }
}

// ===== Search Hits =====

pub fn scored_point_from_qdrant(point: qdrant::ScoredPoint) -> ScoredPoint {
    ScoredPoint {
        id: point.id.as_ref().and_then(point_key_from_qdrant),
        score: point.score,
        payload: payload_from_qdrant(point.payload),
    }
}
