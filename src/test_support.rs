//! Helpers shared by unit tests: a throwaway HTTP server and canned bodies.

use reqwest::Client as HttpClient;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;

/// Canned HTTP response
#[derive(Clone)]
pub struct Canned {
    pub status_line: &'static str,
    pub body: String,
}

impl Canned {
    pub fn ok(body: impl Into<String>) -> Self {
        Self { status_line: "200 OK", body: body.into() }
    }

    pub fn status(status_line: &'static str) -> Self {
        Self { status_line, body: r#"{"error":"boom"}"#.to_string() }
    }
}

/// Serve `responses` in order, one per connection, then stop.
///
/// Returns the base URL and a receiver yielding the request line of
/// every request served.
pub async fn serve(responses: Vec<Canned>) -> (String, mpsc::UnboundedReceiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        for canned in responses {
            let (mut socket, _) = match listener.accept().await {
                Ok(conn) => conn,
                Err(_) => return,
            };

            let mut buf = vec![0u8; 8192];
            let n = socket.read(&mut buf).await.unwrap_or(0);
            let request = String::from_utf8_lossy(&buf[..n]);
            let request_line = request.lines().next().unwrap_or_default().to_string();
            let _ = tx.send(request_line);

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                canned.status_line,
                canned.body.len(),
                canned.body
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });

    (format!("http://{}", addr), rx)
}

/// HTTP client that never routes through an environment proxy
pub fn direct_http_client() -> HttpClient {
    HttpClient::builder().no_proxy().build().unwrap()
}

/// A mindicador-style body with the given (fecha, valor) pairs
pub fn indicator_body(codigo: &str, serie: &[(&str, f64)]) -> String {
    let entries: Vec<serde_json::Value> = serie
        .iter()
        .map(|(fecha, valor)| serde_json::json!({ "fecha": fecha, "valor": valor }))
        .collect();
    serde_json::json!({
        "version": "1.7.0",
        "autor": "mindicador.cl",
        "codigo": codigo,
        "nombre": "Dólar observado",
        "unidad_medida": "Pesos",
        "serie": entries,
    })
    .to_string()
}
