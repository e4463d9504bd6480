//! Shared fixtures for unit tests.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use crate::models::HotelListing;

#[allow(clippy::too_many_arguments)]
pub fn hotel(
    id: &str,
    title: &str,
    city: &str,
    price: f64,
    ai_score: f64,
    irr: f64,
    stars: u8,
    hotel_type: &str,
) -> HotelListing {
    HotelListing {
        id: id.to_string(),
        title: title.to_string(),
        city: city.to_string(),
        price,
        currency: "SAR".to_string(),
        ai_score,
        irr,
        stars,
        hotel_type: hotel_type.to_string(),
        images: vec![format!("https://cdn.example.com/{id}.jpg")],
        last_updated: "2025-06-01".to_string(),
    }
}

/// Small dataset covering every city and type used in the tests.
pub fn sample_hotels() -> Vec<HotelListing> {
    vec![
        hotel(
            "h1",
            "Jeddah Corniche Business Hotel",
            "Jeddah",
            32_000_000.0,
            82.0,
            8.7,
            4,
            "Business Hotel",
        ),
        hotel("h2", "Abha Mountain Boutique", "Abha", 18_000_000.0, 64.0, 9.4, 3, "Boutique Hotel"),
        hotel(
            "h3",
            "Red Sea Luxury Resort",
            "Jeddah",
            95_000_000.0,
            93.0,
            10.2,
            5,
            "Luxury Resort",
        ),
        hotel(
            "h4",
            "Sakaka Furnished Apartments",
            "Sakaka",
            12_000_000.0,
            58.0,
            7.1,
            3,
            "Furnished Apartments",
        ),
        hotel(
            "h5",
            "Jazan Gateway Business Hotel",
            "Jazan",
            26_000_000.0,
            71.0,
            7.8,
            4,
            "Business Hotel",
        ),
        hotel(
            "h6",
            "Khamis Mushait Inn",
            "Khamis Mushait",
            9_500_000.0,
            49.0,
            6.4,
            2,
            "Boutique Hotel",
        ),
    ]
}

/// How a stub search host answers.
#[derive(Debug, Clone)]
pub enum StubReply {
    Respond { status: &'static str, body: String },
    /// Accept the connection and never answer
    Hang,
}

impl StubReply {
    pub fn ok(body: &str) -> Self {
        Self::status("200 OK", body)
    }

    pub fn status(status: &'static str, body: &str) -> Self {
        Self::Respond {
            status,
            body: body.to_string(),
        }
    }
}

/// Raw requests received by a stub host.
pub type Captured = Arc<Mutex<Vec<String>>>;

/// Start a local HTTP/1.1 stub and return its query URL.
pub async fn stub_host(reply: StubReply) -> (String, Captured) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let captured: Captured = Arc::new(Mutex::new(Vec::new()));

    let log = Arc::clone(&captured);
    tokio::spawn(async move {
        while let Ok((socket, _)) = listener.accept().await {
            let reply = reply.clone();
            let log = Arc::clone(&log);
            tokio::spawn(async move { serve_one(socket, reply, log).await });
        }
    });

    (format!("http://{addr}/1/indexes/*/queries"), captured)
}

/// A URL whose port refuses connections.
pub async fn dead_host() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/1/indexes/*/queries")
}

async fn serve_one(mut socket: TcpStream, reply: StubReply, log: Captured) {
    let request = read_request(&mut socket).await;
    log.lock().unwrap().push(request);

    match reply {
        StubReply::Hang => tokio::time::sleep(Duration::from_secs(30)).await,
        StubReply::Respond { status, body } => {
            let response = format!(
                "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    }
}

/// Read headers and a `content-length` body.
async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        let n = match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => n,
        };
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf);
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .filter_map(|line| line.split_once(':'))
                .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
                .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }

    String::from_utf8_lossy(&buf).into_owned()
}
