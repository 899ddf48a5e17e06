//! Qdrant test infrastructure
//!
//! Provides a `TestQdrant` helper that creates a Qdrant container for testing.

use qdrant_client::Qdrant;
use testcontainers::core::{IntoContainerPort, WaitFor};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, GenericImage};

const IMAGE_NAME: &str = "qdrant/qdrant";

/// Pinned to a server release that supports the Query API
const IMAGE_TAG: &str = "v1.15.1";

/// Qdrant gRPC port inside the container
const GRPC_PORT: u16 = 6334;

/// Logged by the server once the gRPC endpoint accepts connections
const READY_MESSAGE: &str = "gRPC listening on 6334";

/// Container definition for a single-node Qdrant exposing its gRPC port
pub fn qdrant_image() -> GenericImage {
    GenericImage::new(IMAGE_NAME, IMAGE_TAG)
        .with_exposed_port(GRPC_PORT.tcp())
        .with_wait_for(WaitFor::message_on_stdout(READY_MESSAGE))
}

/// Test Qdrant wrapper that ensures proper cleanup
///
/// The container is automatically stopped and removed when this struct is dropped.
///
/// # Example
///
/// ```no_run
/// use test_utils::TestQdrant;
///
/// # async fn example() {
/// let qdrant = TestQdrant::new().await;
/// let exists = qdrant.client().collection_exists("docs").await.unwrap();
/// assert!(!exists);
/// # }
/// ```
pub struct TestQdrant {
    #[allow(dead_code)]
    container: ContainerAsync<GenericImage>,
    client: Qdrant,
    pub url: String,
}

impl TestQdrant {
    /// Create a new test Qdrant instance
    pub async fn new() -> Self {
        let container = qdrant_image()
            .start()
            .await
            .expect("Failed to start Qdrant container");

        let host_port = container
            .get_host_port_ipv4(GRPC_PORT)
            .await
            .expect("Failed to get Qdrant gRPC port");

        let url = format!("http://127.0.0.1:{}", host_port);

        let client = Qdrant::from_url(&url)
            .build()
            .expect("Failed to create Qdrant client");

        tracing::info!(port = host_port, tag = IMAGE_TAG, "Test Qdrant ready");

        Self {
            container,
            client,
            url,
        }
    }

    /// Client connected to the container
    pub fn client(&self) -> &Qdrant {
        &self.client
    }

    /// gRPC URL for building your own client or configuration
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Drop for TestQdrant {
    fn drop(&mut self) {
        tracing::debug!("Cleaning up test Qdrant container");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use testcontainers::Image;

    #[test]
    fn test_qdrant_image_definition() {
        let image = qdrant_image();

        assert_eq!(image.name(), "qdrant/qdrant");
        assert_eq!(image.tag(), "v1.15.1");
        assert_eq!(image.expose_ports(), &[GRPC_PORT.tcp()]);
        assert_eq!(image.ready_conditions().len(), 1);
    }

    #[tokio::test]
    #[ignore = "requires Docker"]
    async fn test_qdrant_container_starts_empty() {
        let qdrant = TestQdrant::new().await;

        let collections = qdrant.client().list_collections().await.unwrap();
        assert!(collections.collections.is_empty());
        assert!(qdrant.url().starts_with("http://127.0.0.1:"));
    }
}
