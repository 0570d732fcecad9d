//! HTTP surface tests over the full route table

mod common;

use actix_web::{test, web, App};
use common::database::seed_bimestre;
use common::fixtures::{adol_csv, multipart_body};
use common::TestDatabase;
use planacad_rs::config::Config;
use planacad_rs::server::{routes, AppState};
use planacad_rs::storage::database::entities::UploadBatch;
use sea_orm::{EntityTrait, PaginatorTrait};

const BOUNDARY: &str = "----planacadtestboundary";

fn app_state(db: &TestDatabase) -> web::Data<AppState> {
    web::Data::new(AppState::new(Config::default(), db.db().clone()))
}

macro_rules! test_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data($state.clone())
                .route("/health", web::get().to(routes::health::health_check))
                .configure(routes::uploads::configure_routes),
        )
        .await
    };
}

fn multipart_request(
    uri: &str,
    fields: &[(&str, &str)],
    file: Option<(&str, &[u8])>,
) -> actix_web::test::TestRequest {
    test::TestRequest::post()
        .uri(uri)
        .insert_header((
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        ))
        .set_payload(multipart_body(BOUNDARY, fields, file))
}

#[actix_web::test]
async fn missing_bimestre_returns_400_with_pinned_message() {
    let db = TestDatabase::new().await;
    let state = app_state(&db);
    let app = test_app!(state);

    let csv = adol_csv(&[("MAT101", "Algebra")]);
    let req = multipart_request("/uploads/adol", &[], Some(("adol.csv", &csv))).to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "El ID del bimestre es requerido");

    let batches = UploadBatch::find().count(&db.conn()).await.unwrap();
    assert_eq!(batches, 0, "no batch may be persisted on request errors");
}

#[actix_web::test]
async fn missing_file_returns_400() {
    let db = TestDatabase::new().await;
    let state = app_state(&db);
    let app = test_app!(state);

    let req = multipart_request("/uploads/adol", &[("bimestreId", "1")], None).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "No se ha proporcionado ningún archivo");
}

#[actix_web::test]
async fn non_numeric_bimestre_returns_400() {
    let db = TestDatabase::new().await;
    let state = app_state(&db);
    let app = test_app!(state);

    let csv = adol_csv(&[("MAT101", "Algebra")]);
    let req = multipart_request(
        "/uploads/adol",
        &[("bimestreId", "uno")],
        Some(("adol.csv", &csv)),
    )
    .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "El ID del bimestre debe ser un número válido");
}

#[actix_web::test]
async fn unknown_upload_type_returns_400() {
    let db = TestDatabase::new().await;
    let state = app_state(&db);
    let app = test_app!(state);

    let csv = adol_csv(&[("MAT101", "Algebra")]);
    let req = multipart_request(
        "/uploads/payment-codes",
        &[("bimestreId", "1")],
        Some(("x.csv", &csv)),
    )
    .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("Tipo de carga desconocido"));
}

#[actix_web::test]
async fn upload_detail_approve_flow() {
    let db = TestDatabase::new().await;
    seed_bimestre(&db, 1, "2025-1", true).await;
    let state = app_state(&db);
    let app = test_app!(state);

    // upload
    let csv = adol_csv(&[("MAT101", "Algebra"), ("FIS100", "Física")]);
    let req = multipart_request(
        "/uploads/adol",
        &[("bimestreId", "1"), ("mode", "UPSERT")],
        Some(("adol.csv", &csv)),
    )
    .insert_header(("X-User-Id", "7"))
    .to_request();

    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "Exitoso");
    assert_eq!(body["data"]["summary"]["totalRecords"], 2);
    let batch_id = body["data"]["batchId"].as_i64().unwrap();

    // detail
    let req = test::TestRequest::get()
        .uri(&format!("/uploads/{}", batch_id))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["batch"]["uploadedBy"], 7);
    assert_eq!(body["data"]["batch"]["isProcessed"], true);
    assert_eq!(body["data"]["validRecords"].as_array().unwrap().len(), 2);

    // approve
    let req = test::TestRequest::post()
        .uri(&format!("/uploads/{}/approve", batch_id))
        .set_json(serde_json::json!({ "userId": 2 }))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["approvalStatus"], "Aprobado");
    assert_eq!(body["data"]["approvedBy"], 2);

    // a second approve must lose
    let req = test::TestRequest::post()
        .uri(&format!("/uploads/{}/approve", batch_id))
        .set_json(serde_json::json!({ "userId": 3 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 409);
}

#[actix_web::test]
async fn reject_flow_records_reason() {
    let db = TestDatabase::new().await;
    seed_bimestre(&db, 1, "2025-1", true).await;
    let state = app_state(&db);
    let app = test_app!(state);

    let csv = adol_csv(&[("MAT101", "Algebra")]);
    let req = multipart_request(
        "/uploads/adol",
        &[("bimestreId", "1")],
        Some(("adol.csv", &csv)),
    )
    .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    let batch_id = body["data"]["batchId"].as_i64().unwrap();

    let req = test::TestRequest::post()
        .uri(&format!("/uploads/{}/reject", batch_id))
        .set_json(serde_json::json!({ "userId": 4, "reason": "datos obsoletos" }))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["approvalStatus"], "Rechazado");
    assert_eq!(body["data"]["rejectedBy"], 4);
    assert_eq!(body["data"]["rejectionReason"], "datos obsoletos");
}

#[actix_web::test]
async fn dry_run_upload_reports_validation_only() {
    let db = TestDatabase::new().await;
    seed_bimestre(&db, 1, "2025-1", true).await;
    let state = app_state(&db);
    let app = test_app!(state);

    let csv = adol_csv(&[("MAT101", "Algebra")]);
    let req = multipart_request(
        "/uploads/adol",
        &[("bimestreId", "1"), ("validateOnly", "true")],
        Some(("adol.csv", &csv)),
    )
    .to_request();

    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Archivo validado exitosamente");
}

#[actix_web::test]
async fn listing_and_admin_endpoints_respond() {
    let db = TestDatabase::new().await;
    seed_bimestre(&db, 1, "2025-1", true).await;
    let state = app_state(&db);
    let app = test_app!(state);

    let csv = adol_csv(&[("MAT101", "Algebra")]);
    let req = multipart_request(
        "/uploads/adol",
        &[("bimestreId", "1")],
        Some(("adol.csv", &csv)),
    )
    .to_request();
    let _: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::get()
        .uri("/uploads/recent?bimestreId=1")
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let req = test::TestRequest::get()
        .uri("/uploads/history?page=1&limit=10&uploadType=adol")
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["total"], 1);
    assert_eq!(body["data"]["pagination"]["pages"], 1);

    let req = test::TestRequest::get()
        .uri("/uploads/admin/stats")
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["production"]["adolPositions"], 1);

    let req = test::TestRequest::get()
        .uri("/uploads/admin/health")
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["status"], "healthy");

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
}
