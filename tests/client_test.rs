use sparcur::client::ClientError;
use sparcur::results::{ResultCursor, SparqlType};
use sparcur::{Connection, ConnectionConfig, Driver};
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::sync::mpsc;
use std::thread;

const ASK_XML: &str = "<sparql xmlns=\"http://www.w3.org/2005/sparql-results#\"><head/><boolean>true</boolean></sparql>";

const SELECT_JSON: &str = r#"{"head":{"vars":["s"]},"results":{"bindings":[{"s":{"type":"uri","value":"http://example.org/a"}}]}}"#;

/// What the mock endpoint saw
struct Captured {
    request_line: String,
    headers: Vec<String>,
    body: String,
}

/// Serve one canned response on a local port
fn serve_once(status: &str, content_type: Option<&str>, body: &str) -> (String, mpsc::Receiver<Captured>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let endpoint = format!("http://{}/sparql", listener.local_addr().unwrap());
    let mut response = format!("HTTP/1.1 {}\r\nConnection: close\r\nContent-Length: {}\r\n", status, body.len());
    if let Some(ct) = content_type {
        response.push_str(&format!("Content-Type: {}\r\n", ct));
    }
    response.push_str("\r\n");
    response.push_str(body);

    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream);
        let mut request_line = String::new();
        reader.read_line(&mut request_line).unwrap();

        let mut headers = Vec::new();
        let mut content_length = 0;
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            let line = line.trim_end().to_string();
            if line.is_empty() {
                break;
            }
            if let Some((name, value)) = line.split_once(':') {
                if name.eq_ignore_ascii_case("content-length") {
                    content_length = value.trim().parse().unwrap();
                }
            }
            headers.push(line);
        }
        let mut body = vec![0u8; content_length];
        reader.read_exact(&mut body).unwrap();

        let mut stream = reader.into_inner();
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();
        let _ = tx.send(Captured {
            request_line: request_line.trim_end().to_string(),
            headers,
            body: String::from_utf8(body).unwrap(),
        });
    });
    (endpoint, rx)
}

fn header<'a>(captured: &'a Captured, name: &str) -> Option<&'a str> {
    captured.headers.iter().find_map(|h| {
        let (n, v) = h.split_once(':')?;
        n.eq_ignore_ascii_case(name).then(|| v.trim())
    })
}

#[test]
fn test_short_query_uses_get() {
    let (endpoint, rx) = serve_once("200 OK", Some("application/sparql-results+xml"), ASK_XML);
    let conn = Connection::new(&endpoint).unwrap();
    let mut stmt = conn.create_statement();
    let mut rs = stmt.execute_query("ASK { ?s ?p ?o }").unwrap();
    assert_eq!(rs.sparql_type(), SparqlType::Boolean);
    assert!(rs.next().unwrap());
    assert_eq!(rs.get_boolean(1).unwrap(), Some(true));
    assert_eq!(stmt.last_query(), Some("ASK { ?s ?p ?o }"));

    let captured = rx.recv().unwrap();
    assert!(captured.request_line.starts_with("GET /sparql?query=ASK%20%7B%20%3Fs%20%3Fp%20%3Fo%20%7D "));
    let accept = header(&captured, "accept").unwrap();
    assert!(accept.contains("application/sparql-results+xml"));
    assert!(accept.contains("text/rdf+n3"));
}

#[test]
fn test_long_query_uses_post() {
    let (endpoint, rx) = serve_once("200 OK", Some("application/sparql-results+json"), SELECT_JSON);
    let mut conn = Connection::new(&endpoint).unwrap();
    conn.set_query_limit(16);
    let mut stmt = conn.create_statement();
    let mut rs = stmt.execute_query("SELECT ?s WHERE { ?s ?p ?o }").unwrap();
    assert_eq!(rs.sparql_type(), SparqlType::Bindings);
    assert!(rs.next().unwrap());
    assert_eq!(rs.get_string_by_name("s").unwrap(), Some("http://example.org/a"));

    let captured = rx.recv().unwrap();
    assert!(captured.request_line.starts_with("POST /sparql "));
    assert_eq!(
        header(&captured, "content-type"),
        Some("application/x-www-form-urlencoded")
    );
    assert!(captured.body.starts_with("query=SELECT%20%3Fs"));
}

#[test]
fn test_statement_graphs_override_connection() {
    let (endpoint, rx) = serve_once("200 OK", Some("application/sparql-results+xml"), ASK_XML);
    let mut conn = Connection::new(&endpoint).unwrap();
    conn.default_graphs_mut().add_str("http://example.org/conn").unwrap();
    conn.named_graphs_mut().add_str("http://example.org/named").unwrap();

    let mut stmt = conn.create_statement();
    stmt.default_graphs_mut().add_str("http://example.org/stmt").unwrap();
    let rs = stmt.execute_query("ASK {}").unwrap();
    let context = rs.statement().unwrap();
    assert_eq!(context.query, "ASK {}");

    let captured = rx.recv().unwrap();
    let line = &captured.request_line;
    assert!(line.contains("default-graph-uri=http%3A%2F%2Fexample.org%2Fstmt&"));
    assert!(!line.contains("example.org%2Fconn"));
    assert!(line.contains("named-graph-uri=http%3A%2F%2Fexample.org%2Fnamed&"));
}

#[test]
fn test_client_error_status() {
    let (endpoint, _rx) = serve_once("404 Not Found", Some("text/plain"), "no such endpoint");
    let conn = Connection::new(&endpoint).unwrap();
    let result = conn.create_statement().execute_query("ASK {}");
    assert!(matches!(result, Err(ClientError::ClientStatus { code: 404, .. })));
}

#[test]
fn test_server_error_status() {
    let (endpoint, _rx) = serve_once("500 Internal Server Error", Some("text/plain"), "boom");
    let conn = Connection::new(&endpoint).unwrap();
    let result = conn.create_statement().execute_query("ASK {}");
    assert!(matches!(result, Err(ClientError::ServerStatus { code: 500, .. })));
}

#[test]
fn test_unhandled_content_type() {
    let (endpoint, _rx) = serve_once("200 OK", Some("text/html"), "<html/>");
    let conn = Connection::new(&endpoint).unwrap();
    let result = conn.create_statement().execute_query("ASK {}");
    assert!(matches!(result, Err(ClientError::Unhandled(_))));
}

#[test]
fn test_missing_content_type() {
    let (endpoint, _rx) = serve_once("200 OK", None, ASK_XML);
    let conn = Connection::new(&endpoint).unwrap();
    let result = conn.create_statement().execute_query("ASK {}");
    assert!(matches!(result, Err(ClientError::Unhandled(_))));
}

#[test]
fn test_configured_headers_are_sent() {
    let (endpoint, rx) = serve_once("200 OK", Some("application/sparql-results+xml"), ASK_XML);
    let yaml = "timeout_ms: 2000\nheaders:\n  X-Api-Key: secret\n";
    let config = ConnectionConfig::from_yaml_str(yaml).unwrap().with_endpoint(endpoint);
    let conn = Driver::from_config(config).connect_default().unwrap();
    conn.create_statement().execute_query("ASK {}").unwrap();

    let captured = rx.recv().unwrap();
    assert_eq!(header(&captured, "x-api-key"), Some("secret"));
    assert!(header(&captured, "user-agent").unwrap().starts_with("sparcur/"));
}
