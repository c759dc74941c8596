//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves a fixed set of routes. HEAD answers with the route's status,
//! `Content-Type`, and declared `Content-Length` (which may lie); GET answers
//! with the real body. Unknown paths get 404. Request counts per method and
//! the last `User-Agent` seen are recorded. Routes can also fail only the GET,
//! stall before answering it, or trickle its body out slowly.

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Route {
    pub status: u16,
    pub content_type: Option<String>,
    /// `Content-Length` sent on HEAD. `None` omits the header.
    pub declared_length: Option<u64>,
    pub body: Vec<u8>,
    /// Status for GET when it differs from HEAD's.
    pub get_status: Option<u16>,
    /// Silence before the GET response starts.
    pub get_stall: Option<Duration>,
    /// Send the GET body in this many chunks, pausing between them.
    pub trickle: Option<(usize, Duration)>,
}

impl Route {
    /// 200 with an honest declared length.
    pub fn image(content_type: &str, body: Vec<u8>) -> Self {
        Self {
            status: 200,
            content_type: Some(content_type.to_string()),
            declared_length: Some(body.len() as u64),
            body,
            get_status: None,
            get_stall: None,
            trickle: None,
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            content_type: Some("text/html".to_string()),
            declared_length: Some(0),
            body: Vec::new(),
            get_status: None,
            get_stall: None,
            trickle: None,
        }
    }

    pub fn declared(mut self, len: Option<u64>) -> Self {
        self.declared_length = len;
        self
    }

    /// HEAD keeps the route's status; GET answers `status` with `body`.
    pub fn get_fails(mut self, status: u16, body: Vec<u8>) -> Self {
        self.get_status = Some(status);
        self.body = body;
        self
    }

    pub fn stall_get(mut self, pause: Duration) -> Self {
        self.get_stall = Some(pause);
        self
    }

    pub fn trickle(mut self, chunks: usize, pause: Duration) -> Self {
        self.trickle = Some((chunks.max(1), pause));
        self
    }
}

#[derive(Debug, Default)]
pub struct Hits {
    pub head: AtomicUsize,
    pub get: AtomicUsize,
    pub user_agent: Mutex<Option<String>>,
}

impl Hits {
    pub fn heads(&self) -> usize {
        self.head.load(Ordering::SeqCst)
    }

    pub fn gets(&self) -> usize {
        self.get.load(Ordering::SeqCst)
    }

    pub fn total(&self) -> usize {
        self.heads() + self.gets()
    }
}

pub struct ImageServer {
    base: String,
    pub hits: Arc<Hits>,
}

impl ImageServer {
    /// Full URL for `path` (which must start with `/`).
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }
}

/// Starts a server in a background thread. The server runs until the process exits.
pub fn start(routes: Vec<(&str, Route)>) -> ImageServer {
    let routes: Arc<HashMap<String, Route>> = Arc::new(
        routes
            .into_iter()
            .map(|(p, r)| (p.to_string(), r))
            .collect(),
    );
    let hits = Arc::new(Hits::default());
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let server_hits = Arc::clone(&hits);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes);
            let hits = Arc::clone(&server_hits);
            thread::spawn(move || handle(stream, &routes, &hits));
        }
    });
    ImageServer {
        base: format!("http://127.0.0.1:{}", port),
        hits,
    }
}

/// A URL on a port nothing listens on.
pub fn closed_port_url(path: &str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}{}", port, path)
}

fn read_request(stream: &mut TcpStream) -> Option<String> {
    let mut data = Vec::new();
    let mut buf = [0u8; 4096];
    while !data.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => return None,
            Ok(n) => data.extend_from_slice(&buf[..n]),
        }
    }
    String::from_utf8(data).ok()
}

fn handle(mut stream: TcpStream, routes: &HashMap<String, Route>, hits: &Hits) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let Some(request) = read_request(&mut stream) else {
        return;
    };

    let mut lines = request.lines();
    let mut request_line = lines.next().unwrap_or("").split_whitespace();
    let method = request_line.next().unwrap_or("").to_string();
    let path = request_line.next().unwrap_or("/").to_string();
    for line in lines {
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("user-agent") {
                *hits.user_agent.lock().unwrap() = Some(value.trim().to_string());
            }
        }
    }

    let is_head = method.eq_ignore_ascii_case("HEAD");
    if is_head {
        hits.head.fetch_add(1, Ordering::SeqCst);
    } else if method.eq_ignore_ascii_case("GET") {
        hits.get.fetch_add(1, Ordering::SeqCst);
    }

    let route = routes.get(&path).cloned().unwrap_or_else(|| Route::status(404));
    let status = if is_head {
        route.status
    } else {
        route.get_status.unwrap_or(route.status)
    };
    if !is_head {
        if let Some(pause) = route.get_stall {
            thread::sleep(pause);
        }
    }
    let mut head = format!("HTTP/1.1 {} {}\r\n", status, reason(status));
    if let Some(ct) = &route.content_type {
        head.push_str(&format!("Content-Type: {}\r\n", ct));
    }
    if is_head {
        if let Some(len) = route.declared_length {
            head.push_str(&format!("Content-Length: {}\r\n", len));
        }
    } else {
        head.push_str(&format!("Content-Length: {}\r\n", route.body.len()));
    }
    head.push_str("Connection: close\r\n\r\n");

    let _ = stream.write_all(head.as_bytes());
    if !is_head {
        match route.trickle {
            Some((chunks, pause)) => {
                let size = route.body.len().div_ceil(chunks).max(1);
                for chunk in route.body.chunks(size) {
                    let _ = stream.write_all(chunk);
                    let _ = stream.flush();
                    thread::sleep(pause);
                }
            }
            None => {
                let _ = stream.write_all(&route.body);
            }
        }
    }
    let _ = stream.flush();
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        403 => "Forbidden",
        404 => "Not Found",
        410 => "Gone",
        500 => "Internal Server Error",
        _ => "Status",
    }
}
