use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct Workout {
    id: u64,
    workout_type: String,
    date: String,
    duration_minutes: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct DisplayEntry {
    workout_type: String,
    color: String,
}

#[derive(Debug, Deserialize)]
struct DayBucket {
    date: String,
    entries: Vec<DisplayEntry>,
    all_types: Vec<String>,
    is_today: bool,
}

#[derive(Debug, Deserialize)]
struct MonthGrid {
    year: i32,
    month: u32,
    weeks: Vec<Vec<Option<DayBucket>>>,
}

#[derive(Debug, Deserialize)]
struct CalendarWindow {
    today: String,
    weekday_labels: Vec<String>,
    months: Vec<MonthGrid>,
}

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

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
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

fn unique_data_path() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("workout_calendar_http_{}_{}.json", std::process::id(), nanos));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/workout-types")).send().await {
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

async fn spawn_server() -> TestServer {
    spawn_server_with_data(None).await
}

async fn spawn_server_with_data(seed: Option<&str>) -> TestServer {
    let port = pick_free_port();
    let data_path = unique_data_path();
    if let Some(contents) = seed {
        std::fs::write(&data_path, contents).expect("seed data file");
    }
    let child = Command::new(env!("CARGO_BIN_EXE_workout_calendar"))
        .env("PORT", port.to_string())
        .env("APP_DATA_PATH", data_path)
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn create(client: &Client, base_url: &str, body: serde_json::Value) -> Workout {
    let response = client
        .post(format!("{base_url}/api/workouts"))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    response.json().await.unwrap()
}

fn find_day<'a>(window: &'a CalendarWindow, date: &str) -> &'a DayBucket {
    window
        .months
        .iter()
        .flat_map(|month| month.weeks.iter().flatten().flatten())
        .find(|day| day.date == date)
        .expect("day missing from calendar")
}

#[tokio::test]
async fn http_logged_workouts_show_on_calendar() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    for workout_type in ["Running", "Powerlifting", "Yoga"] {
        create(
            &client,
            &server.base_url,
            serde_json::json!({ "workout_type": workout_type, "date": "2031-05-14" }),
        )
        .await;
    }

    let window: CalendarWindow = client
        .get(format!(
            "{}/api/calendar?today=2031-05-20&window=2&week_start=monday",
            server.base_url
        ))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(window.today, "2031-05-20");
    assert_eq!(window.weekday_labels[0], "Mon");
    let months: Vec<_> = window.months.iter().map(|m| (m.year, m.month)).collect();
    assert_eq!(months, [(2031, 4), (2031, 5)]);
    assert!(window.months.iter().all(|m| m.weeks.iter().all(|w| w.len() == 7)));

    let day = find_day(&window, "2031-05-14");
    let shown: Vec<_> = day.entries.iter().map(|e| e.workout_type.as_str()).collect();
    assert_eq!(shown, ["Yoga", "Powerlifting"]);
    assert!(day.entries.iter().all(|e| e.color.starts_with('#')));
    assert_eq!(day.all_types, ["Running", "Powerlifting", "Yoga"]);
    assert!(find_day(&window, "2031-05-20").is_today);
}

#[tokio::test]
async fn http_workout_crud_round_trip() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    let base = &server.base_url;

    let created = create(
        &client,
        base,
        serde_json::json!({ "workout_type": " Hiking ", "date": "2031-07-02", "duration_minutes": 90 }),
    )
    .await;
    assert_eq!(created.workout_type, "Hiking");
    assert_eq!(created.duration_minutes, Some(90));

    let updated: Workout = client
        .put(format!("{base}/api/workouts/{}", created.id))
        .json(&serde_json::json!({ "date": "2031-07-03" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(updated.date, "2031-07-03");
    assert_eq!(updated.workout_type, "Hiking");

    let listed: Vec<Workout> = client
        .get(format!("{base}/api/workouts?start_date=2031-07-01&end_date=2031-07-31"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(listed.iter().any(|w| w.id == created.id));

    let deleted = client
        .delete(format!("{base}/api/workouts/{}", created.id))
        .send()
        .await
        .unwrap();
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let missing = client
        .get(format!("{base}/api/workouts/{}", created.id))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn http_rejects_bad_input() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    let base = &server.base_url;

    let bad_date = client
        .post(format!("{base}/api/workouts"))
        .json(&serde_json::json!({ "workout_type": "Yoga", "date": "2031-02-30" }))
        .send()
        .await
        .unwrap();
    assert_eq!(bad_date.status(), StatusCode::BAD_REQUEST);

    let blank_type = client
        .post(format!("{base}/api/workouts"))
        .json(&serde_json::json!({ "workout_type": "   ", "date": "2031-02-03" }))
        .send()
        .await
        .unwrap();
    assert_eq!(blank_type.status(), StatusCode::BAD_REQUEST);

    let bad_window = client
        .get(format!("{base}/api/calendar?window=13"))
        .send()
        .await
        .unwrap();
    assert_eq!(bad_window.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn http_index_renders_calendar() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client.get(format!("{}/", server.base_url)).send().await.unwrap();
    assert!(response.status().is_success());
    let body = response.text().await.unwrap();
    assert!(body.contains("Workout Calendar"));
    assert!(body.contains(r#"class="months""#));
    assert!(body.contains("today"));
}

#[tokio::test]
async fn http_stored_malformed_date_is_unprocessable() {
    let _guard = TEST_LOCK.lock().await;
    let seed = r#"{"next_id": 3, "workouts": [
        {"id": 1, "workout_type": "Yoga", "date": "2031-05-14"},
        {"id": 2, "workout_type": "Golf", "date": "2031-13-45"}
    ]}"#;
    let server = spawn_server_with_data(Some(seed)).await;
    let client = Client::new();

    let calendar = client
        .get(format!("{}/api/calendar?today=2031-05-20", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(calendar.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let message = calendar.text().await.unwrap();
    assert!(message.contains("2031-13-45"), "{message}");

    let index = client.get(format!("{}/", server.base_url)).send().await.unwrap();
    assert_eq!(index.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let single: Workout = client
        .get(format!("{}/api/workouts/1", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(single.workout_type, "Yoga");
}
