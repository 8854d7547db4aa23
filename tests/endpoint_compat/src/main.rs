fn main() {
    println!("Run `cargo test -p endpoint-compat` to execute endpoint compatibility tests.");
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use picferry_gallery::{Clock, GalleryCache};
    use picferry_protocol::{EnvelopeUpload, UploadConfig};
    use picferry_transport::HttpTransport;
    use picferry_uploader::{
        Asset, BatchSummary, BatchUploader, ProgressCallback, ProgressUpdate, UploadErrorKind,
    };
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    #[derive(Debug, Clone)]
    struct UploadSeen {
        filename: String,
        envelope: bool,
    }

    #[derive(Default)]
    struct ServerState {
        uploads: Vec<UploadSeen>,
        gets: usize,
        fail_status: HashMap<String, u16>,
        listing_status: Option<u16>,
    }

    /// In-process media endpoint: accepts uploads in both wire shapes and
    /// serves a gallery listing of everything stored so far.
    struct Endpoint {
        url: String,
        state: Arc<Mutex<ServerState>>,
        task: tokio::task::JoinHandle<()>,
    }

    impl Endpoint {
        async fn start() -> Self {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            let state = Arc::new(Mutex::new(ServerState::default()));
            let server_state = state.clone();
            let task = tokio::spawn(async move {
                loop {
                    let Ok((stream, _)) = listener.accept().await else {
                        break;
                    };
                    let state = server_state.clone();
                    tokio::spawn(handle(stream, state));
                }
            });
            Self {
                url: format!("http://{addr}/upload.php"),
                state,
                task,
            }
        }

        fn fail_uploads_of(&self, filename: &str, status: u16) {
            self.state
                .lock()
                .unwrap()
                .fail_status
                .insert(filename.to_string(), status);
        }

        fn fail_listings(&self, status: u16) {
            self.state.lock().unwrap().listing_status = Some(status);
        }

        fn uploads(&self) -> Vec<UploadSeen> {
            self.state.lock().unwrap().uploads.clone()
        }

        fn gets(&self) -> usize {
            self.state.lock().unwrap().gets
        }

        fn stop(&self) {
            self.task.abort();
        }
    }

    async fn handle(mut stream: TcpStream, state: Arc<Mutex<ServerState>>) {
        let raw = read_http_request(&mut stream).await;
        let (status, body) = route(&raw, &state);
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let _ = stream.write_all(response.as_bytes()).await;
    }

    /// Reads one HTTP request: headers plus a Content-Length body.
    async fn read_http_request(stream: &mut TcpStream) -> Vec<u8> {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 8192];
        loop {
            let n = match stream.read(&mut chunk).await {
                Ok(0) | Err(_) => break,
                Ok(n) => n,
            };
            buf.extend_from_slice(&chunk[..n]);
            if let Some(header_end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                let body_start = header_end + 4;
                let headers = String::from_utf8_lossy(&buf[..header_end]).to_string();
                let declared = headers
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        if name.eq_ignore_ascii_case("content-length") {
                            value.trim().parse::<usize>().ok()
                        } else {
                            None
                        }
                    })
                    .unwrap_or(0);
                if buf.len() >= body_start + declared {
                    break;
                }
            }
        }
        buf
    }

    fn route(raw: &[u8], state: &Arc<Mutex<ServerState>>) -> (String, String) {
        let body_start = raw
            .windows(4)
            .position(|w| w == b"\r\n\r\n")
            .map(|p| p + 4)
            .unwrap_or(raw.len());
        let headers = String::from_utf8_lossy(&raw[..body_start]).to_string();

        if headers.starts_with("GET") {
            let mut state = state.lock().unwrap();
            state.gets += 1;
            if let Some(status) = state.listing_status {
                return (
                    format!("{status} Scripted Failure"),
                    r#"{"success":false,"error":"listing offline"}"#.to_string(),
                );
            }
            let images: Vec<String> = state
                .uploads
                .iter()
                .enumerate()
                .map(|(i, upload)| {
                    format!(
                        r#"{{"id":{i},"url":"https://cdn.example/{name}","name":"{name}"}}"#,
                        name = upload.filename
                    )
                })
                .collect();
            return (
                "200 OK".to_string(),
                format!(r#"{{"success":true,"images":[{}]}}"#, images.join(",")),
            );
        }

        let body = &raw[body_start..];
        let envelope = headers.to_ascii_lowercase().contains("text/plain");
        let filename = if envelope {
            EnvelopeUpload::from_json(&String::from_utf8_lossy(body))
                .map(|e| e.filename)
                .unwrap_or_default()
        } else {
            multipart_filename(&String::from_utf8_lossy(body))
        };

        let mut state = state.lock().unwrap();
        if let Some(status) = state.fail_status.get(&filename) {
            return (
                format!("{status} Scripted Failure"),
                r#"{"success":false,"error":"scripted failure"}"#.to_string(),
            );
        }
        let id = state.uploads.len() as i64 + 1;
        state.uploads.push(UploadSeen {
            filename: filename.clone(),
            envelope,
        });
        let method = if envelope { "envelope" } else { "structured" };
        (
            "200 OK".to_string(),
            format!(
                r#"{{"success":true,"id":{id},"url":"https://cdn.example/{filename}","name":"{filename}","method":"{method}"}}"#
            ),
        )
    }

    fn multipart_filename(body: &str) -> String {
        body.split_once("filename=\"")
            .and_then(|(_, rest)| rest.split_once('"'))
            .map(|(name, _)| name.to_string())
            .unwrap_or_default()
    }

    struct TestClock(AtomicU64);

    impl TestClock {
        fn at(ms: u64) -> Arc<Self> {
            Arc::new(Self(AtomicU64::new(ms)))
        }

        fn advance(&self, ms: u64) {
            self.0.fetch_add(ms, Ordering::SeqCst);
        }
    }

    impl Clock for TestClock {
        fn now_ms(&self) -> u64 {
            self.0.load(Ordering::SeqCst)
        }
    }

    fn transport() -> Arc<HttpTransport> {
        Arc::new(HttpTransport::new().unwrap())
    }

    fn collecting_callback() -> (Arc<Mutex<Vec<ProgressUpdate>>>, ProgressCallback) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let callback: ProgressCallback =
            Box::new(move |update: ProgressUpdate| sink.lock().unwrap().push(update));
        (seen, callback)
    }

    #[tokio::test]
    async fn batch_upload_then_gallery_listing_end_to_end() {
        let endpoint = Endpoint::start().await;
        let config = UploadConfig::new(&endpoint.url);
        let transport = transport();
        let (seen, callback) = collecting_callback();

        let assets = vec![
            Asset::new("a.png", "image/png", vec![1u8; 32]),
            Asset::new("b.jpg", "image/jpeg", vec![2u8; 32]),
            Asset::new("empty.png", "image/png", Vec::new()),
        ];
        let report = BatchUploader::new(transport.clone())
            .run(&assets, &config, Some(callback))
            .await;

        assert_eq!(report.summary(), BatchSummary::AllSucceeded);
        assert_eq!(report.successes.len(), 3);
        assert!(report.successes.iter().all(|s| s.remote_id > 0));

        let updates = seen.lock().unwrap();
        assert_eq!(
            updates.iter().map(|u| u.completed).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );

        let uploads = endpoint.uploads();
        assert_eq!(uploads.len(), 3);
        assert_eq!(
            uploads.iter().filter(|u| u.envelope).count(),
            1,
            "only the empty asset should use the envelope"
        );
        assert!(
            uploads
                .iter()
                .find(|u| u.filename == "empty.png")
                .unwrap()
                .envelope
        );

        let cache = GalleryCache::new(transport);
        let listing = cache.listing(&config).await.unwrap();
        let mut names: Vec<&str> = listing.images.iter().map(|i| i.name.as_str()).collect();
        names.sort_unstable();
        assert_eq!(names, vec!["a.png", "b.jpg", "empty.png"]);

        cache.listing(&config).await.unwrap();
        assert_eq!(endpoint.gets(), 1, "second listing must come from cache");

        endpoint.stop();
    }

    #[tokio::test]
    async fn scripted_rejections_classify_without_stopping_the_batch() {
        let endpoint = Endpoint::start().await;
        endpoint.fail_uploads_of("huge.png", 413);
        endpoint.fail_uploads_of("limited.png", 429);
        let config = UploadConfig::new(&endpoint.url);

        let assets = vec![
            Asset::new("ok1.png", "image/png", vec![1u8; 16]),
            Asset::new("huge.png", "image/png", vec![2u8; 16]),
            Asset::new("limited.png", "image/png", vec![3u8; 16]),
            Asset::new("ok2.png", "image/png", vec![4u8; 16]),
        ];
        let report = BatchUploader::new(transport())
            .run(&assets, &config, None)
            .await;

        assert_eq!(
            report.summary(),
            BatchSummary::Partial {
                succeeded: 2,
                failed: 2
            }
        );
        let kind_of = |name: &str| {
            report
                .failures
                .iter()
                .find(|f| f.asset_name == name)
                .map(|f| f.kind.clone())
        };
        assert_eq!(kind_of("huge.png"), Some(UploadErrorKind::PayloadTooLarge));
        assert_eq!(kind_of("limited.png"), Some(UploadErrorKind::RateLimited));

        endpoint.stop();
    }

    #[tokio::test]
    async fn gallery_serves_stale_data_when_the_endpoint_goes_away() {
        let endpoint = Endpoint::start().await;
        let config = UploadConfig::new(&endpoint.url);
        let transport = transport();

        BatchUploader::new(transport.clone())
            .run(
                &[Asset::new("keep.png", "image/png", vec![1u8; 8])],
                &config,
                None,
            )
            .await;

        let clock = TestClock::at(0);
        let cache = GalleryCache::with_options(transport, 50, clock.clone());
        let first = cache.listing(&config).await.unwrap();
        assert!(!first.stale);
        assert_eq!(first.images.len(), 1);

        endpoint.fail_listings(503);
        clock.advance(config.gallery_cache_ttl.as_millis() as u64 + 1);

        let stale = cache.listing(&config).await.unwrap();
        assert!(stale.stale, "listing should degrade to the cached entry");
        assert_eq!(stale.images.len(), 1);
        assert_eq!(stale.images[0].name, "keep.png");

        // A failed refresh never wipes the entry; it keeps covering.
        let again = cache.listing(&config).await.unwrap();
        assert!(again.stale);
        assert_eq!(again.images[0].name, "keep.png");

        endpoint.stop();
    }
}
