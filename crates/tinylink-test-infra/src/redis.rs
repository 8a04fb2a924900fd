use testcontainers::core::{IntoContainerPort, WaitFor};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, GenericImage};

/// A disposable Redis instance running in a container.
///
/// Panics on container failures; this crate is only ever consumed from
/// tests, where a broken environment should abort the run.
pub struct RedisServer {
    container: ContainerAsync<GenericImage>,
}

impl RedisServer {
    /// Starts a Redis container on a random available port.
    pub async fn start() -> Self {
        let container = GenericImage::new("redis", "8.6.0")
            .with_exposed_port(6379_u16.tcp())
            .with_wait_for(WaitFor::message_on_stdout("Ready to accept connections"))
            .start()
            .await
            .expect("Failed to start Redis container");
        Self { container }
    }

    pub async fn host(&self) -> String {
        let host = self
            .container
            .get_host()
            .await
            .expect("Failed to get Redis host")
            .to_string();

        match host.as_str() {
            "localhost" => String::from("127.0.0.1"),
            _ => host,
        }
    }

    pub async fn port(&self) -> u16 {
        self.container
            .get_host_port_ipv4(6379)
            .await
            .expect("Failed to get Redis port")
    }

    /// Returns a `redis://` connection URL for this instance.
    pub async fn url(&self) -> String {
        format!("redis://{}:{}", self.host().await, self.port().await)
    }
}
