//! Input parsing for the upsert and search commands

use std::path::Path;

use domain_vector::{Payload, Point, PointKey};
use eyre::{Result, WrapErr, ensure};

/// Points split into the three parallel lists the storage upsert takes
#[derive(Debug, Default, PartialEq)]
pub struct PointBatch {
    pub ids: Vec<PointKey>,
    pub vectors: Vec<Vec<f32>>,
    pub payloads: Vec<Payload>,
}

impl PointBatch {
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl FromIterator<Point> for PointBatch {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        let mut batch = PointBatch::default();
        for point in iter {
            batch.ids.push(point.id);
            batch.vectors.push(point.vector);
            batch.payloads.push(point.payload);
        }
        batch
    }
}

/// Parse a JSON array of points
pub fn parse_points(raw: &str) -> Result<PointBatch> {
    let points: Vec<Point> =
        serde_json::from_str(raw).wrap_err("Point file must be a JSON array of points")?;
    Ok(points.into_iter().collect())
}

/// Read and parse a point file
pub fn load_points(path: &Path) -> Result<PointBatch> {
    let raw = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read point file {}", path.display()))?;
    parse_points(&raw).wrap_err_with(|| format!("Invalid point file {}", path.display()))
}

/// Parse a query vector given as a JSON array of numbers
pub fn parse_query_vector(raw: &str) -> Result<Vec<f32>> {
    let vector: Vec<f32> =
        serde_json::from_str(raw).wrap_err("Query vector must be a JSON array of numbers")?;
    ensure!(!vector.is_empty(), "Query vector must not be empty");
    Ok(vector)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_points_splits_fields() {
        let batch = parse_points(
            r#"[
                {"id": 1, "vector": [0.1, 0.2], "payload": {"text": "a", "source": "x.md"}},
                {"id": "67e55044-10b1-426f-9247-bb680e5fe0c8", "vector": [0.3, 0.4]}
            ]"#,
        )
        .unwrap();

        assert_eq!(batch.len(), 2);
        assert_eq!(batch.ids[0], PointKey::Num(1));
        assert!(matches!(batch.ids[1], PointKey::Uuid(_)));
        assert_eq!(batch.vectors, vec![vec![0.1, 0.2], vec![0.3, 0.4]]);
        assert_eq!(batch.payloads[0].get("text"), Some(&json!("a")));
        assert!(batch.payloads[1].is_empty());
    }

    #[test]
    fn test_parse_points_empty_array() {
        let batch = parse_points("[]").unwrap();
        assert!(batch.is_empty());
    }

    #[test]
    fn test_parse_points_rejects_bad_ids() {
        assert!(parse_points(r#"[{"id": "abc", "vector": [1.0]}]"#).is_err());
        assert!(parse_points(r#"[{"id": -4, "vector": [1.0]}]"#).is_err());
    }

    #[test]
    fn test_parse_points_rejects_non_array() {
        let err = parse_points(r#"{"id": 1, "vector": [1.0]}"#).unwrap_err();
        assert!(err.to_string().contains("JSON array"));
    }

    #[test]
    fn test_load_points_missing_file() {
        let err = load_points(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read point file"));
    }

    #[test]
    fn test_parse_query_vector() {
        assert_eq!(parse_query_vector("[1, 0.5, -2]").unwrap(), vec![1.0, 0.5, -2.0]);
        assert!(parse_query_vector("[]").is_err());
        assert!(parse_query_vector("1,2,3").is_err());
        assert!(parse_query_vector(r#"["a"]"#).is_err());
    }
}
