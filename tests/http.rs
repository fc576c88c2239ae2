use axum::{extract::Path, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use reqwest::Client;
use serde_json::{json, Value};
use std::io::Read;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};
use tokio::time::sleep;

const FULL_USER: u64 = 1;
const FAILING_USER: u64 = 2;
const MALFORMED_USER: u64 = 3;
const NO_TAGS_USER: u64 = 4;

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

#[cfg(unix)]
mod cleanup {
    use once_cell::sync::Lazy;
    use std::sync::{Mutex, Once};

    static REGISTER: Once = Once::new();
    static PIDS: Lazy<Mutex<Vec<i32>>> = Lazy::new(|| Mutex::new(Vec::new()));

    pub fn register(pid: u32) {
        if let Ok(mut pids) = PIDS.lock() {
            pids.push(pid as i32);
        }
        REGISTER.call_once(|| unsafe {
            libc::atexit(on_exit);
        });
    }

    extern "C" fn on_exit() {
        if let Ok(pids) = PIDS.lock() {
            for pid in pids.iter().filter(|pid| **pid > 0) {
                unsafe {
                    libc::kill(*pid, libc::SIGTERM);
                }
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn full_payload() -> Value {
    json!({
        "total_problems_solved": 42,
        "platform_stats": {
            "leetcode": {
                "total_solved": 10, "easy_solved": 5, "medium_solved": 3,
                "hard_solved": 2, "contest_rating": 1500.0, "contests_participated": 4
            },
            "codechef": {
                "total_solved": 8, "rating": 1800.0, "highest_rating": 1900.0,
                "contests_participated": 2, "categories": { "practice": 8 }
            },
            "codeforces": {
                "total_solved": 6, "rating": 1200.0, "rank": "specialist",
                "contests_participated": 0, "problem_tags": { "dp": 5, "greedy": 3 }
            }
        }
    })
}

async fn backend_stats(Path(user_id): Path<u64>) -> impl IntoResponse {
    match user_id {
        FULL_USER => (StatusCode::OK, Json(full_payload())).into_response(),
        FAILING_USER => (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response(),
        MALFORMED_USER => (StatusCode::OK, "{not json").into_response(),
        NO_TAGS_USER => Json(json!({
            "platform_stats": { "codeforces": { "rating": 800.0, "problem_tags": {} } }
        }))
        .into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Serves canned stats payloads on an ephemeral port.
async fn spawn_backend() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind backend");
    let addr = listener.local_addr().unwrap();
    let app = Router::new().route("/user/:id/stats", get(backend_stats));
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/health")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_dashboard(user_id: u64) -> TestServer {
    spawn_dashboard_with(user_id, Stdio::inherit()).await
}

async fn spawn_dashboard_with(user_id: u64, stderr: Stdio) -> TestServer {
    let backend = spawn_backend().await;
    let port = pick_free_port();
    let child = Command::new(env!("CARGO_BIN_EXE_stats_dashboard"))
        .env("PORT", port.to_string())
        .env("API_URL", backend)
        .env("USER_ID", user_id.to_string())
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(stderr)
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn dashboard_json(server: &TestServer) -> Value {
    Client::new()
        .get(format!("{}/api/dashboard", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn http_dashboard_renders_full_payload() {
    let server = spawn_dashboard(FULL_USER).await;
    let dashboard = dashboard_json(&server).await;

    let texts = &dashboard["texts"];
    assert_eq!(texts[".total-questions"], "42");
    assert_eq!(texts[".leetcode .platform-count"], "10");
    assert_eq!(texts[".codechef .max-rating"], "(max: 1900)");
    assert_eq!(texts[".codeforces .rank"], "specialist");
    assert_eq!(texts[".leetcode .contests"], "4");
    assert_eq!(texts[".codechef .categories"], "practice: 8");

    assert_eq!(dashboard["charts"]["difficulty"]["kind"], "doughnut");
    assert_eq!(dashboard["charts"]["difficulty"]["values"], json!([5.0, 3.0, 2.0]));
    assert_eq!(dashboard["charts"]["rating"]["kind"], "line");
    assert_eq!(
        dashboard["charts"]["rating"]["values"],
        json!([1500.0, 1800.0, 1200.0])
    );

    let bars = dashboard["topic_bars"].as_array().unwrap();
    assert_eq!(bars.len(), 2);
    assert_eq!(bars[0]["name"], "dp");
    assert_eq!(bars[0]["percentage"], 100.0);
    assert_eq!(bars[1]["name"], "greedy");
    assert_eq!(bars[1]["percentage"], 60.0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn http_index_page_shows_stats() {
    let server = spawn_dashboard(FULL_USER).await;
    let response = Client::new()
        .get(format!("{}/", server.base_url))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let html = response.text().await.unwrap();
    assert!(html.contains(r#"<span class="value total-questions">42</span>"#));
    assert!(html.contains(r#"<span class="rank">specialist</span>"#));
    assert!(html.contains(r#"style="width: 60%""#));
    assert_eq!(html.matches("<svg").count(), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn http_backend_error_leaves_dashboard_empty() {
    for user_id in [FAILING_USER, MALFORMED_USER] {
        let mut server = spawn_dashboard_with(user_id, Stdio::piped()).await;
        let dashboard = dashboard_json(&server).await;

        assert_eq!(dashboard["texts"], json!({}));
        assert_eq!(dashboard["charts"], json!({}));
        assert_eq!(dashboard["topic_bars"], json!([]));

        let html = Client::new()
            .get(format!("{}/", server.base_url))
            .send()
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert!(html.contains(r#"<span class="value total-questions">-</span>"#));

        let _ = server.child.kill();
        let mut logs = String::new();
        server
            .child
            .stderr
            .take()
            .expect("stderr is piped")
            .read_to_string(&mut logs)
            .unwrap();
        assert!(
            logs.contains("error fetching user stats"),
            "missing diagnostic for user {user_id}: {logs}"
        );
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn http_empty_tags_render_no_bars() {
    let server = spawn_dashboard(NO_TAGS_USER).await;
    let dashboard = dashboard_json(&server).await;

    assert_eq!(dashboard["texts"][".total-questions"], "0");
    assert_eq!(dashboard["texts"][".codeforces .rank"], "unrated");
    assert_eq!(dashboard["topic_bars"], json!([]));
    assert!(dashboard["charts"].get("difficulty").is_none());
    assert_eq!(dashboard["charts"]["rating"]["values"], json!([0.0, 0.0, 800.0]));
}
