// Server module entry
// Listener setup, connection serving and shutdown signals

pub mod connection;
pub mod listener;
pub mod signal;

// `loop` is a keyword, so the module is exposed as `server_loop`
#[path = "loop.rs"]
pub mod server_loop;

pub use listener::create_reusable_listener;
pub use server_loop::start_server_loop;
pub use signal::start_signal_handler;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppState, Config};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;
    use tokio::sync::Notify;
    use tokio::task::LocalSet;

    fn state_in(dir: &std::path::Path) -> Arc<AppState> {
        let mut config = Config::default();
        config.storage.path = dir.to_string_lossy().into_owned();
        Arc::new(AppState::new(config))
    }

    async fn roundtrip(addr: std::net::SocketAddr, request: &str) -> String {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream.write_all(request.as_bytes()).await.unwrap();
        let mut buf = Vec::new();
        stream.read_to_end(&mut buf).await.unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[tokio::test]
    async fn test_serves_over_tcp_until_shutdown() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_in(dir.path());
        let listener = create_reusable_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = listener.local_addr().unwrap();
        let shutdown = Arc::new(Notify::new());
        let server_shutdown = Arc::clone(&shutdown);

        LocalSet::new()
            .run_until(async move {
                let server =
                    tokio::task::spawn_local(start_server_loop(listener, state, server_shutdown));

                let health = roundtrip(
                    addr,
                    "GET /health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
                )
                .await;
                assert!(health.starts_with("HTTP/1.1 200 OK"), "{health}");
                assert!(health.ends_with("\r\n\r\nOK"), "{health}");

                let created = roundtrip(
                    addr,
                    "POST /api/v1/configs/agent HTTP/1.1\r\nHost: localhost\r\nContent-Length: 5\r\nConnection: close\r\n\r\nbar{}",
                )
                .await;
                assert!(created.starts_with("HTTP/1.1 201 Created"), "{created}");

                let fetched = roundtrip(
                    addr,
                    "GET /api/v1/configs/agent HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
                )
                .await;
                assert!(fetched.starts_with("HTTP/1.1 200 OK"), "{fetched}");
                assert!(fetched.to_ascii_lowercase().contains("content-type: application/river"));
                assert!(fetched.ends_with("\r\n\r\nbar{}"), "{fetched}");

                shutdown.notify_one();
                tokio::time::timeout(Duration::from_secs(5), server)
                    .await
                    .expect("server loop did not stop")
                    .unwrap();
            })
            .await;

        assert_eq!(std::fs::read(dir.path().join("agent.alloy")).unwrap(), b"bar{}");
    }
}
