//! Integration tests for the HTTP stream source against a local server.

use std::sync::Arc;
use std::time::Duration;

use scoreboard_core::projection::ScoreProjection;
use scoreboard_ingest::error::IngestError;
use scoreboard_ingest::pipeline::Ingestor;
use scoreboard_ingest::runner::consume;
use scoreboard_ingest::source::{Connector, HttpConnector};
use scoreboard_test_support::{FixedClock, RecordingProjection};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

const FRAME: &str =
    "event: score\ndata: {\"exam\": 1000, \"studentId\": \"John.Doe\", \"score\": 0.72}\n\n";

/// Serves one response that sends `FRAME` and then goes silent without
/// closing the connection.
async fn spawn_stalling_stream() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = [0_u8; 1024];
        let _ = socket.read(&mut request).await.unwrap();
        let response = format!(
            "HTTP/1.1 200 OK\r\ncontent-type: text/event-stream\r\ntransfer-encoding: chunked\r\n\r\n{:x}\r\n{FRAME}\r\n",
            FRAME.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.flush().await.unwrap();
        tokio::time::sleep(Duration::from_secs(30)).await;
    });
    format!("http://{addr}/scores")
}

#[tokio::test]
async fn test_stalled_stream_fails_after_read_timeout() {
    // Arrange
    let url = spawn_stalling_stream().await;
    let connector = HttpConnector::with_read_timeout(url, Duration::from_millis(200)).unwrap();
    let projection = Arc::new(RecordingProjection::new());
    let ingestor = Ingestor::new(
        vec![projection.clone() as Arc<dyn ScoreProjection>],
        Arc::new(FixedClock::reference()),
    );

    // Act
    let mut source = connector.connect().await.unwrap();
    let result = tokio::time::timeout(Duration::from_secs(10), consume(&mut source, &ingestor))
        .await
        .expect("read timeout should end the stream well before the guard");

    // Assert
    assert!(matches!(result, Err(IngestError::Http(_))));
    assert_eq!(projection.recorded().len(), 1);
}
