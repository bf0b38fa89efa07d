//! Info service over a real TCP connection.

use std::net::SocketAddr;
use std::time::Duration;

use serde_json::Value;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use devops_info_service::api::{serve, AppState};

/// Parsed HTTP response.
struct Reply {
    status: u16,
    content_type: Option<String>,
    body: Value,
}

/// Start a server on an ephemeral port.
async fn spawn_server() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        serve(listener, AppState::new(), std::future::pending::<()>())
            .await
            .unwrap();
    });

    addr
}

/// Issue a GET and read the whole response.
async fn get(addr: SocketAddr, path: &str, user_agent: Option<&str>) -> Reply {
    let mut stream = TcpStream::connect(addr).await.unwrap();

    let mut request = format!("GET {} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n", path);
    if let Some(agent) = user_agent {
        request.push_str(&format!("User-Agent: {}\r\n", agent));
    }
    request.push_str("\r\n");
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut raw = Vec::new();
    stream.read_to_end(&mut raw).await.unwrap();
    let raw = String::from_utf8(raw).unwrap();

    let (head, body) = raw.split_once("\r\n\r\n").unwrap();
    let mut lines = head.lines();
    let status = lines
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|code| code.parse().ok())
        .unwrap();
    let content_type = lines.find_map(|line| {
        let (name, value) = line.split_once(':')?;
        name.eq_ignore_ascii_case("content-type")
            .then(|| value.trim().to_string())
    });

    Reply {
        status,
        content_type,
        body: serde_json::from_str(body).unwrap(),
    }
}

#[tokio::test]
async fn index_reports_every_section() {
    let addr = spawn_server().await;
    let reply = get(addr, "/", Some("integration-test/1.0")).await;

    assert_eq!(reply.status, 200);
    assert_eq!(reply.content_type.as_deref(), Some("application/json"));

    let body = reply.body.as_object().unwrap();
    let mut keys: Vec<&str> = body.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["endpoints", "request", "runtime", "service", "system"]);

    for key in ["name", "version", "description", "framework"] {
        assert!(reply.body["service"].get(key).is_some(), "service.{} missing", key);
    }
    for key in [
        "hostname",
        "platform",
        "platform_version",
        "architecture",
        "cpu_count",
        "runtime_version",
    ] {
        assert!(reply.body["system"].get(key).is_some(), "system.{} missing", key);
    }
    for key in ["uptime_seconds", "uptime_human", "current_time", "timezone"] {
        assert!(reply.body["runtime"].get(key).is_some(), "runtime.{} missing", key);
    }

    assert_eq!(reply.body["request"]["client_ip"], "127.0.0.1");
    assert_eq!(reply.body["request"]["user_agent"], "integration-test/1.0");
    assert_eq!(reply.body["request"]["method"], "GET");
    assert_eq!(reply.body["request"]["path"], "/");

    let paths: Vec<&str> = reply.body["endpoints"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|e| e["path"].as_str())
        .collect();
    assert!(paths.len() >= 2);
    assert!(paths.contains(&"/"));
    assert!(paths.contains(&"/health"));
}

#[tokio::test]
async fn missing_user_agent_is_unknown() {
    let addr = spawn_server().await;
    let reply = get(addr, "/", None).await;

    assert_eq!(reply.body["request"]["user_agent"], "Unknown");
}

#[tokio::test]
async fn health_uptime_is_monotonic() {
    let addr = spawn_server().await;

    let first = get(addr, "/health", None).await;
    tokio::time::sleep(Duration::from_millis(1100)).await;
    let second = get(addr, "/health", None).await;

    assert_eq!(first.status, 200);
    assert_eq!(first.body["status"], "healthy");

    let before = first.body["uptime_seconds"].as_u64().unwrap();
    let after = second.body["uptime_seconds"].as_u64().unwrap();
    assert!(after >= before);
    assert!(after >= 1);
}

#[tokio::test]
async fn unknown_paths_are_echoed_in_404() {
    let addr = spawn_server().await;

    for path in ["/nonexistent", "/some/invalid/path"] {
        let reply = get(addr, path, None).await;

        assert_eq!(reply.status, 404);
        assert_eq!(reply.content_type.as_deref(), Some("application/json"));
        assert_eq!(reply.body["error"], "Not Found");
        assert_eq!(reply.body["message"], "The requested endpoint does not exist");
        assert_eq!(reply.body["path"], path);
    }
}
