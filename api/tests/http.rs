use std::{fs, net::SocketAddr, path::Path, sync::Arc};

use model::{ArtifactPaths, MinMaxScaler, OrdinalEncoder, RandomForest, Tree, forest::LEAF};
use pricing::{
    CategoryRegistry, PricePredictor,
    columns::{CATEGORICAL_COLUMNS, MODEL_COLUMNS, SCALER_COLUMNS},
};
use serde_json::Value;
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{TcpListener, TcpStream},
    task::JoinHandle,
};

const EXAMPLE: [(&str, &str); 17] = [
    ("ram", "8"),
    ("scres_x", "1920"),
    ("scres_y", "1080"),
    ("scres_is_touchscreen", "0"),
    ("cpu_type", "Intel Core i5"),
    ("weight", "1.8"),
    ("cpu_frequency", "2.5"),
    ("ssd_capacity", "256"),
    ("hdd_capacity", "0"),
    ("flash_capacity", "0"),
    ("hybrid_capacity", "0"),
    ("inches", "15.6"),
    ("opsys", "Windows 10"),
    ("storage_type", "SSD"),
    ("gpu_brand", "Intel"),
    ("company", "Dell"),
    ("typename", "Notebook"),
];

fn names(cols: &[&str]) -> Vec<String> {
    cols.iter().map(|c| c.to_string()).collect()
}

/// Writes artifacts whose forest predicts 700 for `EXAMPLE` and -100 when the laptop has no
/// SSD and little RAM.
fn write_artifacts(dir: &Path, model_columns: &[&str]) -> ArtifactPaths {
    let paths = ArtifactPaths::in_dir(dir);
    let registry = CategoryRegistry;

    let categories = CATEGORICAL_COLUMNS
        .iter()
        .map(|col| names(registry.domain(col).unwrap()))
        .collect();
    let encoder = OrdinalEncoder::new(names(&CATEGORICAL_COLUMNS), categories).unwrap();

    let mut ranges = vec![
        (10.0, 18.0),
        (2.0, 64.0),
        (1.0, 3.0),
        (1366.0, 2880.0),
        (768.0, 1800.0),
        (0.0, 1.0),
        (0.0, 1000.0),
        (0.0, 1000.0),
        (0.0, 1000.0),
        (0.0, 1000.0),
        (1.2, 3.5),
    ];
    ranges.extend(
        CATEGORICAL_COLUMNS
            .iter()
            .map(|col| (0.0, registry.domain(col).unwrap().len() as f64 - 1.0)),
    );
    let scaler = MinMaxScaler::from_ranges(names(&SCALER_COLUMNS), &ranges).unwrap();

    let stump = |feature: i64, threshold: f64, low: f64, high: f64| {
        Tree::new(
            vec![1, LEAF, LEAF],
            vec![2, LEAF, LEAF],
            vec![feature, -2, -2],
            vec![threshold, -2.0, -2.0],
            vec![(low + high) / 2.0, low, high],
            MODEL_COLUMNS.len(),
        )
        .unwrap()
    };

    // Model feature 0 is Ram, model feature 6 is SSD_Capacity.
    let forest = RandomForest::new(
        names(model_columns),
        vec![stump(0, 0.2, 500.0, 1500.0), stump(6, 0.1, -700.0, 900.0)],
    )
    .unwrap();

    fs::write(&paths.encoder, encoder.to_json().unwrap()).unwrap();
    fs::write(&paths.scaler, scaler.to_json().unwrap()).unwrap();
    fs::write(&paths.model, forest.to_safetensors().unwrap()).unwrap();
    paths
}

async fn spawn_server(model_columns: &[&str]) -> (SocketAddr, JoinHandle<()>) {
    let dir = tempfile::tempdir().unwrap();
    let paths = write_artifacts(dir.path(), model_columns);
    let predictor = Arc::new(PricePredictor::load(&paths).unwrap());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        axum::serve(listener, api::router(predictor)).await.unwrap();
    });

    (addr, handle)
}

fn form_body(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(k, v)| format!("{k}={}", v.replace(' ', "+")))
        .collect::<Vec<_>>()
        .join("&")
}

fn example_with(field: &str, value: &str) -> Vec<(&'static str, String)> {
    EXAMPLE
        .iter()
        .map(|&(k, v)| (k, if k == field { value } else { v }.to_string()))
        .collect()
}

fn body_of(fields: &[(&'static str, String)]) -> String {
    let borrowed: Vec<(&str, &str)> = fields.iter().map(|(k, v)| (*k, v.as_str())).collect();
    form_body(&borrowed)
}

async fn send(addr: SocketAddr, request: String) -> (u16, Value) {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut raw = Vec::new();
    stream.read_to_end(&mut raw).await.unwrap();
    let raw = String::from_utf8(raw).unwrap();

    let (head, body) = raw.split_once("\r\n\r\n").unwrap();
    let status = head.split_whitespace().nth(1).unwrap().parse().unwrap();
    (status, serde_json::from_str(body).unwrap())
}

async fn post_form(addr: SocketAddr, body: &str) -> (u16, Value) {
    let request = format!(
        "POST /predict HTTP/1.1\r\n\
         Host: {addr}\r\n\
         Content-Type: application/x-www-form-urlencoded\r\n\
         Content-Length: {}\r\n\
         Connection: close\r\n\r\n{body}",
        body.len()
    );
    send(addr, request).await
}

fn multipart_body(boundary: &str, fields: &[(&str, &str)]) -> String {
    let mut body = String::new();
    for (name, value) in fields {
        body.push_str(&format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"{name}\"\r\n\r\n\
             {value}\r\n"
        ));
    }
    body.push_str(&format!("--{boundary}--\r\n"));
    body
}

async fn post_multipart(addr: SocketAddr, content_type: &str, body: &str) -> (u16, Value) {
    let request = format!(
        "POST /predict HTTP/1.1\r\n\
         Host: {addr}\r\n\
         Content-Type: {content_type}\r\n\
         Content-Length: {}\r\n\
         Connection: close\r\n\r\n{body}",
        body.len()
    );
    send(addr, request).await
}

#[tokio::test]
async fn root_lists_the_categories() {
    let (addr, server) = spawn_server(&MODEL_COLUMNS).await;

    let request = format!("GET / HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n");
    let (status, body) = send(addr, request).await;

    assert_eq!(status, 200);
    let categories = &body["categories"];
    assert_eq!(categories["Company"].as_array().unwrap().len(), 19);
    assert_eq!(categories["TypeName"].as_array().unwrap().len(), 6);
    assert_eq!(categories["OpSys"].as_array().unwrap().len(), 9);
    assert_eq!(categories["Storage_Type"].as_array().unwrap().len(), 5);
    assert_eq!(categories["Cpu_Type"].as_array().unwrap().len(), 10);
    assert_eq!(categories["Gpu_Brand"].as_array().unwrap().len(), 4);

    server.abort();
}

#[tokio::test]
async fn example_laptop_gets_a_price() {
    let (addr, server) = spawn_server(&MODEL_COLUMNS).await;

    let (status, body) = post_form(addr, &form_body(&EXAMPLE)).await;
    assert_eq!(status, 200, "{body}");
    assert_eq!(body["prediction"].as_f64(), Some(700.0));

    let (status, again) = post_form(addr, &form_body(&EXAMPLE)).await;
    assert_eq!(status, 200);
    assert_eq!(again, body);

    server.abort();
}

#[tokio::test]
async fn multipart_form_gets_the_same_price() {
    let (addr, server) = spawn_server(&MODEL_COLUMNS).await;

    let body = multipart_body("XBOUNDARYX", &EXAMPLE);
    let content_type = "multipart/form-data; boundary=XBOUNDARYX";
    let (status, body) = post_multipart(addr, content_type, &body).await;

    assert_eq!(status, 200, "{body}");
    assert_eq!(body["prediction"].as_f64(), Some(700.0));

    server.abort();
}

#[tokio::test]
async fn multipart_form_is_validated() {
    let (addr, server) = spawn_server(&MODEL_COLUMNS).await;

    let fields = example_with("ram", "128");
    let borrowed: Vec<(&str, &str)> = fields.iter().map(|(k, v)| (*k, v.as_str())).collect();
    let body = multipart_body("XBOUNDARYX", &borrowed);
    let content_type = "multipart/form-data; boundary=XBOUNDARYX";
    let (status, body) = post_multipart(addr, content_type, &body).await;

    assert_eq!(status, 400);
    assert_eq!(body["error"], "RAM must be between 2 and 64 GB");

    server.abort();
}

#[tokio::test]
async fn multipart_without_boundary_is_a_client_error() {
    let (addr, server) = spawn_server(&MODEL_COLUMNS).await;

    let body = multipart_body("XBOUNDARYX", &EXAMPLE);
    let (status, body) = post_multipart(addr, "multipart/form-data", &body).await;

    assert_eq!(status, 400);
    assert!(body["error"].is_string());

    server.abort();
}

#[tokio::test]
async fn negative_raw_prediction_is_reported_as_zero() {
    let (addr, server) = spawn_server(&MODEL_COLUMNS).await;

    // ram 8 -> 500, ssd 0 -> -700, mean -100
    let fields = example_with("ssd_capacity", "0");
    let (status, body) = post_form(addr, &body_of(&fields)).await;

    assert_eq!(status, 200, "{body}");
    assert_eq!(body["prediction"].as_f64(), Some(0.0));

    server.abort();
}

#[tokio::test]
async fn unknown_company_is_a_client_error() {
    let (addr, server) = spawn_server(&MODEL_COLUMNS).await;

    let fields = example_with("company", "Nonexistent");
    let (status, body) = post_form(addr, &body_of(&fields)).await;

    assert_eq!(status, 400);
    let msg = body["error"].as_str().unwrap();
    assert!(msg.starts_with("Company must be one of"), "{msg}");
    assert!(msg.contains("Dell"), "{msg}");
    assert!(body.get("prediction").is_none());

    server.abort();
}

#[tokio::test]
async fn ram_lower_bound_is_inclusive() {
    let (addr, server) = spawn_server(&MODEL_COLUMNS).await;

    let (status, _) = post_form(addr, &body_of(&example_with("ram", "2"))).await;
    assert_eq!(status, 200);

    let (status, body) = post_form(addr, &body_of(&example_with("ram", "1.999"))).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "RAM must be between 2 and 64 GB");

    server.abort();
}

#[tokio::test]
async fn missing_field_is_a_client_error() {
    let (addr, server) = spawn_server(&MODEL_COLUMNS).await;

    let body = form_body(&EXAMPLE[1..]);
    let (status, body) = post_form(addr, &body).await;

    assert_eq!(status, 400);
    assert_eq!(body["error"], "missing field: ram");

    server.abort();
}

#[tokio::test]
async fn non_form_body_is_a_client_error() {
    let (addr, server) = spawn_server(&MODEL_COLUMNS).await;

    let body = r#"{"ram": 8}"#;
    let request = format!(
        "POST /predict HTTP/1.1\r\n\
         Host: {addr}\r\n\
         Content-Type: application/json\r\n\
         Content-Length: {}\r\n\
         Connection: close\r\n\r\n{body}",
        body.len()
    );
    let (status, body) = send(addr, request).await;

    assert_eq!(status, 400);
    assert!(body["error"].is_string());

    server.abort();
}

#[tokio::test]
async fn schema_drift_is_a_server_error() {
    let mut drifted = MODEL_COLUMNS;
    drifted.swap(0, 7);
    let (addr, server) = spawn_server(&drifted).await;

    for _ in 0..2 {
        let (status, body) = post_form(addr, &form_body(&EXAMPLE)).await;
        assert_eq!(status, 500);
        assert!(body["error"].is_string());
        assert!(body.get("prediction").is_none());
    }

    server.abort();
}
