#![allow(dead_code)]

use std::{net::SocketAddr, time::Duration};

use favorites::{ApiConfig, SwapiClient};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{TcpListener, TcpStream},
    task::JoinHandle,
};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// A one-shot HTTP server answering the first request with a canned reply.
///
/// The handle resolves to the raw request head that was received.
pub struct MockServer {
    pub addr: SocketAddr,
    pub handle: JoinHandle<String>,
}

impl MockServer {
    pub async fn respond(status: &'static str, body: &'static str) -> Self {
        Self::spawn(move |mut stream, request| async move {
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.ok();
            request
        })
        .await
    }

    /// Accepts the request and never answers.
    pub async fn silent() -> Self {
        Self::spawn(|stream, request| async move {
            let _open = stream;
            tokio::time::sleep(Duration::from_secs(5)).await;
            request
        })
        .await
    }

    async fn spawn<F, Fut>(reply: F) -> Self
    where
        F: FnOnce(TcpStream, String) -> Fut + Send + 'static,
        Fut: std::future::Future<Output = String> + Send,
    {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let request = read_head(&mut stream).await;
            reply(stream, request).await
        });

        Self { addr, handle }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    pub fn client(&self) -> SwapiClient {
        client_for(&self.base_url(), 10)
    }
}

pub fn client_for(base_url: &str, timeout_secs: u64) -> SwapiClient {
    let mut config = ApiConfig::with_base_url(base_url);
    config.timeout_secs = timeout_secs;
    SwapiClient::new(&config).unwrap()
}

async fn read_head(stream: &mut TcpStream) -> String {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buffer.windows(4).any(|w| w == b"\r\n\r\n") {
        let read = stream.read(&mut chunk).await.unwrap();
        if read == 0 {
            break;
        }
        buffer.extend_from_slice(&chunk[..read]);
    }
    String::from_utf8_lossy(&buffer).into_owned()
}

pub const LUKE: &str = r#"{
  "name": "Luke Skywalker",
  "height": "172",
  "mass": "77",
  "birth_year": "19BBY",
  "homeworld": "https://swapi.dev/api/planets/1/",
  "url": "https://swapi.dev/api/people/1/"
}"#;

pub const TATOOINE: &str = r#"{
  "name": "Tatooine",
  "climate": "arid",
  "terrain": "desert",
  "url": "https://swapi.dev/api/planets/1/"
}"#;
