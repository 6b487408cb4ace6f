use std::net::TcpListener;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use warc_core::{
    Applied, FormController, LeakDetection, ScenarioGenerator, Status, service::ServiceError,
};
use warc_http::HttpPredictionService;
use warp::{Filter, Reply, filters::BoxedFilter, http::StatusCode, reply::Response};

fn spawn_server(routes: BoxedFilter<(Response,)>) -> String {
    let (addr, server) = warp::serve(routes).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);
    format!("http://{addr}")
}

fn scenario_records(count: u64) -> Value {
    let records: Vec<Value> = (0..count)
        .map(|i| {
            json!({
                "Irrigation_Efficiency": 0.75,
                "Rainfall": 80 + i,
                "Temperature": 23.5,
                "Soil_Moisture": 28.0,
                "Crop_Type": "Wheat",
                "Water_Saved": 1200.0,
                "Water_Conservation_Efficiency": 0.7,
                "Extra_Field": "ignored"
            })
        })
        .collect();
    Value::Array(records)
}

/// Scenario service that counts calls. A request for a single scenario is
/// answered slowly.
fn scenario_routes(hits: Arc<AtomicUsize>) -> BoxedFilter<(Response,)> {
    warp::post()
        .and(warp::path!("generate_scenarios"))
        .and(warp::body::json())
        .and_then(move |body: Value| {
            let hits = hits.clone();
            async move {
                hits.fetch_add(1, Ordering::SeqCst);
                let count = body["num_scenarios"].as_u64().unwrap_or(0);
                if count == 1 {
                    tokio::time::sleep(Duration::from_millis(200)).await;
                }
                Ok::<_, warp::Rejection>(warp::reply::json(&scenario_records(count)).into_response())
            }
        })
        .boxed()
}

fn fill_leak_form(controller: &mut FormController<LeakDetection>) {
    for (name, value) in [
        ("pressure", "80"),
        ("flow_rate", "300"),
        ("vibration", "5"),
        ("temperature", "20"),
        ("acoustic_signal", "60"),
        ("pipe_age", "10"),
        ("distance", "500"),
    ] {
        controller.update_field(name, value).unwrap();
    }
}

#[tokio::test]
async fn leak_detection_renders_the_prediction() {
    let received = Arc::new(std::sync::Mutex::new(None));
    let seen = received.clone();
    let routes = warp::post()
        .and(warp::path!("predict"))
        .and(warp::body::json())
        .map(move |body: Value| {
            *seen.lock().unwrap() = Some(body);
            warp::reply::json(&json!({
                "leak_detected": true,
                "leak_probability": 0.82,
                "leak_location": 342.5
            }))
            .into_response()
        })
        .boxed();
    let base = spawn_server(routes);
    let service = HttpPredictionService::new(None).unwrap();
    let mut controller = FormController::<LeakDetection>::new(format!("{base}/predict"));
    fill_leak_form(&mut controller);

    controller.submit(&service).await.unwrap();

    assert_eq!(controller.status(), Status::Success);
    let view = controller.view().unwrap();
    assert_eq!(view.metric("Leak Detected").unwrap().value, "Yes");
    assert_eq!(view.metric("Leak Probability").unwrap().value, "82.00%");
    assert_eq!(view.metric("Leak Location").unwrap().value, "342.50 meters");
    assert_eq!(
        received.lock().unwrap().clone().unwrap()["acoustic_signal"],
        json!("60")
    );
}

#[tokio::test]
async fn five_scenarios_produce_a_five_row_table() {
    let hits = Arc::new(AtomicUsize::new(0));
    let base = spawn_server(scenario_routes(hits.clone()));
    let service = HttpPredictionService::new(None).unwrap();
    let mut controller =
        FormController::<ScenarioGenerator>::new(format!("{base}/generate_scenarios"));
    controller.update_field("num_scenarios", "5").unwrap();

    controller.submit(&service).await.unwrap();

    let table = controller.view().unwrap().table.unwrap();
    assert_eq!(table.row_count(), 5);
    assert_eq!(table.column_count(), 7);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn empty_form_never_reaches_the_service() {
    let hits = Arc::new(AtomicUsize::new(0));
    let base = spawn_server(scenario_routes(hits.clone()));
    let service = HttpPredictionService::new(None).unwrap();
    let mut controller =
        FormController::<ScenarioGenerator>::new(format!("{base}/generate_scenarios"));
    controller.update_field("num_scenarios", "").unwrap();

    assert!(controller.submit(&service).await.is_err());
    assert_eq!(hits.load(Ordering::SeqCst), 0);
    assert_eq!(controller.status(), Status::Idle);
}

#[tokio::test]
async fn identical_submissions_are_sent_independently() {
    let hits = Arc::new(AtomicUsize::new(0));
    let base = spawn_server(scenario_routes(hits.clone()));
    let service = HttpPredictionService::new(None).unwrap();
    let mut controller =
        FormController::<ScenarioGenerator>::new(format!("{base}/generate_scenarios"));
    controller.update_field("num_scenarios", "3").unwrap();

    controller.submit(&service).await.unwrap();
    controller.submit(&service).await.unwrap();

    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn server_error_shows_generic_message_and_no_result() {
    let routes = warp::post()
        .map(|| {
            warp::reply::with_status("boom", StatusCode::SERVICE_UNAVAILABLE).into_response()
        })
        .boxed();
    let base = spawn_server(routes);
    let service = HttpPredictionService::new(None).unwrap();
    let mut controller =
        FormController::<ScenarioGenerator>::new(format!("{base}/generate_scenarios"));

    controller.submit(&service).await.unwrap();

    assert_eq!(controller.status(), Status::Error);
    assert_eq!(
        controller.error(),
        Some("Error generating scenarios. Please try again.")
    );
    assert!(controller.view().is_none());
}

#[tokio::test]
async fn refused_connection_ends_in_error() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let service = HttpPredictionService::new(None).unwrap();
    let mut controller = FormController::<LeakDetection>::new(format!("http://{addr}/predict"));
    fill_leak_form(&mut controller);

    let submission = controller.begin_submit().unwrap();
    let completion = submission.dispatch(&service).await;
    assert!(matches!(completion.outcome(), Err(ServiceError::Transport(_))));
    controller.complete(completion);

    assert_eq!(controller.status(), Status::Error);
    assert_eq!(
        controller.error(),
        Some("Error fetching prediction. Please try again.")
    );
}

#[tokio::test]
async fn slow_earlier_response_is_discarded() {
    let hits = Arc::new(AtomicUsize::new(0));
    let base = spawn_server(scenario_routes(hits.clone()));
    let service = HttpPredictionService::new(None).unwrap();
    let mut controller =
        FormController::<ScenarioGenerator>::new(format!("{base}/generate_scenarios"));

    controller.update_field("num_scenarios", "1").unwrap();
    let slow = controller.begin_submit().unwrap();
    controller.update_field("num_scenarios", "4").unwrap();
    let fast = controller.begin_submit().unwrap();

    let (slow_done, fast_done) = tokio::join!(slow.dispatch(&service), fast.dispatch(&service));

    assert_eq!(controller.complete(fast_done), Applied::Accepted);
    assert_eq!(controller.complete(slow_done), Applied::Stale);
    assert_eq!(controller.status(), Status::Success);
    assert_eq!(controller.result().unwrap().len(), 4);
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}
