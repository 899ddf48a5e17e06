//! Integration tests for the Vector domain
//!
//! These tests run against a real Qdrant via testcontainers to ensure:
//! - Collections are created once and left alone afterwards
//! - Upserted payloads come back through search
//! - Sources are deduplicated across hits
//!
//! They need a Docker daemon: `cargo test -p domain_vector -- --ignored`

use domain_vector::*;
use serde_json::json;
use test_utils::{TestDataBuilder, TestQdrant, assertions::*};

const DIM: u64 = 4;

fn payload(value: serde_json::Value) -> Payload {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("expected object, got {}", other),
    }
}

async fn storage_for(qdrant: &TestQdrant, collection: &str) -> VectorStorage<QdrantRepository> {
    let config = QdrantConfig::new(qdrant.url()).with_collection(collection, DIM);
    VectorStorage::connect(&config)
        .await
        .expect("Failed to connect storage")
}

// ============================================================================
// Collection Tests
// ============================================================================

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_connect_creates_collection_once() {
    let qdrant = TestQdrant::new().await;
    let builder = TestDataBuilder::from_test_name("connect_creates_collection_once");
    let name = builder.name("collection", "main");

    let storage = storage_for(&qdrant, &name).await;
    assert!(qdrant.client().collection_exists(&name).await.unwrap());

    // Second call finds the collection already there
    let created = storage
        .ensure_collection(&name, DIM, DistanceMetric::Cosine)
        .await
        .unwrap();
    assert!(!created);

    // Reconnecting is also a no-op
    let again = storage_for(&qdrant, &name).await;
    assert_eq!(again.collection(), name);
}

// ============================================================================
// Upsert + Search Tests
// ============================================================================

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_upsert_then_search_returns_texts_and_distinct_sources() {
    let qdrant = TestQdrant::new().await;
    let builder = TestDataBuilder::from_test_name("upsert_then_search");
    let storage = storage_for(&qdrant, &builder.name("collection", "docs")).await;

    let written = storage
        .upsert(
            vec![
                PointKey::Num(1),
                PointKey::Uuid(builder.point_uuid(2)),
                PointKey::Num(3),
            ],
            vec![
                TestDataBuilder::unit_vector(DIM as usize, 0),
                TestDataBuilder::unit_vector(DIM as usize, 1),
                TestDataBuilder::unit_vector(DIM as usize, 2),
            ],
            vec![
                payload(json!({"text": "first chunk", "source": "manual.pdf", "page": 1})),
                payload(json!({"text": "second chunk", "source": "manual.pdf", "page": 2})),
                payload(json!({"text": "third chunk", "source": "faq.md"})),
            ],
        )
        .await
        .unwrap();
    assert_eq!(written, 3);

    let found = storage
        .search(vec![1.0, 1.0, 1.0, 0.0], DEFAULT_TOP_K)
        .await
        .unwrap();

    assert_same_items(
        &found.contexts,
        &["first chunk", "second chunk", "third chunk"],
        "contexts",
    );
    assert_same_items(&found.sources, &["manual.pdf", "faq.md"], "sources");
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_search_orders_contexts_by_similarity() {
    let qdrant = TestQdrant::new().await;
    let builder = TestDataBuilder::from_test_name("search_orders_contexts");
    let storage = storage_for(&qdrant, &builder.name("collection", "ranked")).await;

    storage
        .upsert(
            vec![PointKey::Num(10), PointKey::Num(20)],
            vec![vec![1.0, 0.0, 0.0, 0.0], vec![0.0, 1.0, 0.0, 0.0]],
            vec![
                payload(json!({"text": "near", "source": "a"})),
                payload(json!({"text": "far", "source": "b"})),
            ],
        )
        .await
        .unwrap();

    let found = storage.search(vec![0.9, 0.1, 0.0, 0.0], 1).await.unwrap();
    assert_eq!(found.contexts, vec!["near"]);
    assert_eq!(found.sources, vec!["a"]);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_upsert_overwrites_existing_point() {
    let qdrant = TestQdrant::new().await;
    let builder = TestDataBuilder::from_test_name("upsert_overwrites");
    let storage = storage_for(&qdrant, &builder.name("collection", "overwrite")).await;
    let vector = builder.vector(DIM as usize);

    for text in ["old", "new"] {
        storage
            .upsert(
                vec![PointKey::Num(1)],
                vec![vector.clone()],
                vec![payload(json!({"text": text}))],
            )
            .await
            .unwrap();
    }

    let found = storage.search(vector, DEFAULT_TOP_K).await.unwrap();
    assert_eq!(found.contexts, vec!["new"]);
    assert!(found.sources.is_empty());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_search_empty_collection() {
    let qdrant = TestQdrant::new().await;
    let builder = TestDataBuilder::from_test_name("search_empty_collection");
    let storage = storage_for(&qdrant, &builder.name("collection", "empty")).await;

    let found = storage
        .search(builder.vector(DIM as usize), DEFAULT_TOP_K)
        .await
        .unwrap();

    assert!(found.contexts.is_empty());
    assert!(found.sources.is_empty());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_wrong_dimension_surfaces_client_error() {
    let qdrant = TestQdrant::new().await;
    let builder = TestDataBuilder::from_test_name("wrong_dimension");
    let storage = storage_for(&qdrant, &builder.name("collection", "dims")).await;

    let result = storage
        .upsert(
            vec![PointKey::Num(1)],
            vec![vec![0.5; 3]],
            vec![Payload::new()],
        )
        .await;

    let err = result.unwrap_err();
    assert!(matches!(err, VectorError::Qdrant(_)), "unexpected error: {err}");
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_payload_round_trip_through_store() {
    let qdrant = TestQdrant::new().await;
    let builder = TestDataBuilder::from_test_name("payload_round_trip");
    let name = builder.name("collection", "payload");
    let storage = storage_for(&qdrant, &name).await;
    let repository = QdrantRepository::new(&QdrantConfig::new(qdrant.url())).unwrap();

    let original = payload(json!({
        "text": "nested",
        "tags": ["x", "y"],
        "meta": {"rev": 3, "ratio": 0.25, "draft": true}
    }));
    let vector = builder.vector(DIM as usize);

    storage
        .upsert(vec![PointKey::Num(5)], vec![vector.clone()], vec![original.clone()])
        .await
        .unwrap();

    let hits = repository.query_points(&name, vector, 1).await.unwrap();
    let hit = assert_some(hits.into_iter().next(), "stored point");

    assert_eq!(hit.id, Some(PointKey::Num(5)));
    assert_eq!(hit.payload, Some(original));
}
