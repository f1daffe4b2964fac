//! Minimal HTTP/1.1 server that stands in for the upload endpoint in integration tests.
//!
//! Accepts POSTs, records each request body, and answers every request with
//! the configured status and JSON body after an optional delay.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct UploadServerOptions {
    pub status: u16,
    pub body: String,
    pub delay: Duration,
}

impl Default for UploadServerOptions {
    fn default() -> Self {
        Self {
            status: 200,
            body: r#"{"public_id":"abc123","width":720,"height":720,"format":"jpg"}"#.to_string(),
            delay: Duration::ZERO,
        }
    }
}

pub struct UploadServer {
    pub url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub content_type: Option<String>,
    pub body: String,
}

impl UploadServer {
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

/// Starts a server answering 200 with `{"public_id":"abc123",...}`.
pub fn start() -> UploadServer {
    start_with_options(UploadServerOptions::default())
}

pub fn start_with_options(opts: UploadServerOptions) -> UploadServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let recorded = Arc::clone(&requests);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let opts = opts.clone();
            let recorded = Arc::clone(&recorded);
            thread::spawn(move || handle(stream, &opts, &recorded));
        }
    });
    UploadServer {
        url: format!("http://127.0.0.1:{}/api/upload", port),
        requests,
    }
}

/// Returns a URL on a port with nothing listening.
pub fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/api/upload", port)
}

fn handle(mut stream: TcpStream, opts: &UploadServerOptions, recorded: &Mutex<Vec<RecordedRequest>>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));
    let Some(request) = read_request(&mut stream) else {
        return;
    };
    recorded.lock().unwrap().push(request);
    if !opts.delay.is_zero() {
        thread::sleep(opts.delay);
    }
    let reason = match opts.status {
        200 => "OK",
        400 => "Bad Request",
        500 => "Internal Server Error",
        _ => "Status",
    };
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        opts.status,
        reason,
        opts.body.len(),
        opts.body
    );
    let _ = stream.write_all(response.as_bytes());
}

fn read_request(stream: &mut TcpStream) -> Option<RecordedRequest> {
    let mut data = Vec::new();
    let mut buf = [0u8; 16 * 1024];
    let header_end = loop {
        let n = stream.read(&mut buf).ok()?;
        if n == 0 {
            return None;
        }
        data.extend_from_slice(&buf[..n]);
        if let Some(pos) = find(&data, b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&data[..header_end]).into_owned();
    let mut lines = head.lines();
    let method = lines.next()?.split_whitespace().next()?.to_string();
    let mut content_length = 0usize;
    let mut content_type = None;
    for line in lines {
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse().unwrap_or(0);
            }
            if name.trim().eq_ignore_ascii_case("content-type") {
                content_type = Some(value.trim().to_string());
            }
        }
    }
    // Answer `Expect: 100-continue` so curl stops waiting before sending the body.
    if head.to_ascii_lowercase().contains("expect: 100-continue") {
        let _ = stream.write_all(b"HTTP/1.1 100 Continue\r\n\r\n");
    }
    while data.len() < header_end + content_length {
        let n = stream.read(&mut buf).ok()?;
        if n == 0 {
            break;
        }
        data.extend_from_slice(&buf[..n]);
    }
    let end = (header_end + content_length).min(data.len());
    Some(RecordedRequest {
        method,
        content_type,
        body: String::from_utf8_lossy(&data[header_end..end]).into_owned(),
    })
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}
