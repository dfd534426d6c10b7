//! Minimal HTTP/1.1 server that replays scripted responses for integration tests.
//!
//! Each accepted connection consumes the next scripted reply; the last reply
//! repeats once the script runs out. Request heads are recorded so tests can
//! inspect the query string and headers.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

pub const PNG_BODY: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR-test-image";

#[derive(Debug, Clone)]
pub enum Reply {
    Png,
    Html,
    Status(u16),
    /// Read the request, then hold the connection open without answering.
    Stall(Duration),
}

#[derive(Clone)]
pub struct ServerHandle {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl ServerHandle {
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

/// Starts a server in a background thread. The server runs until the process exits.
pub fn start(script: Vec<Reply>) -> ServerHandle {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let recorded = Arc::clone(&requests);
    thread::spawn(move || {
        let mut script = script.into_iter();
        let mut last = Reply::Status(500);
        for stream in listener.incoming().flatten() {
            let reply = script.next().unwrap_or_else(|| last.clone());
            last = reply.clone();
            let recorded = Arc::clone(&recorded);
            thread::spawn(move || handle(stream, reply, &recorded));
        }
    });
    ServerHandle {
        base_url: format!("http://127.0.0.1:{}/barcode.asp", port),
        requests,
    }
}

fn handle(mut stream: std::net::TcpStream, reply: Reply, recorded: &Mutex<Vec<String>>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    recorded
        .lock()
        .unwrap()
        .push(String::from_utf8_lossy(&buf[..n]).into_owned());

    let (status, content_type, body): (u16, &str, &[u8]) = match reply {
        Reply::Png => (200, "image/png", PNG_BODY),
        Reply::Html => (200, "text/html", &b"<html><body>rate limited</body></html>"[..]),
        Reply::Status(code) => (code, "text/plain", &b"error"[..]),
        Reply::Stall(d) => {
            thread::sleep(d);
            return;
        }
    };
    let head = format!(
        "HTTP/1.1 {} X\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        content_type,
        body.len()
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(body);
}
