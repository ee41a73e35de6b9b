#[macro_use]
mod common;

use actix_web::test;
use serde_json::{json, Value};
use taskbox_server::TokenService;

use common::{bearer, register_request, token_of, PASSWORD};

#[actix_web::test]
async fn test_task_routes_require_token() {
    let state = common::test_state().await;
    let app = spawn_app!(state);

    let no_header = test::TestRequest::get().uri("/task").send_request(&app).await;
    let wrong_scheme = test::TestRequest::get()
        .uri("/task")
        .insert_header(("Authorization", "Basic dXNlcjpwYXNz"))
        .send_request(&app)
        .await;
    let garbage = test::TestRequest::post()
        .uri("/task")
        .insert_header(bearer("not.a.token"))
        .set_json(json!({ "title": "x" }))
        .send_request(&app)
        .await;

    assert_eq!(no_header.status(), 401);
    assert_eq!(wrong_scheme.status(), 401);
    assert_eq!(garbage.status(), 401);

    let no_header: Value = test::read_body_json(no_header).await;
    let garbage: Value = test::read_body_json(garbage).await;
    assert_eq!(no_header, garbage);
    assert_eq!(no_header["success"], false);
}

#[actix_web::test]
async fn test_expired_and_tampered_tokens_rejected() {
    let state = common::test_state().await;
    let app = spawn_app!(state);

    let body: Value = test::call_and_read_body_json(
        &app,
        register_request("alice@example.com", PASSWORD).to_request(),
    )
    .await;
    let token = token_of(&body);

    let expired = TokenService::new("test_secret", -60)
        .issue(1, "alice@example.com")
        .expect("token issues");
    let resp = test::TestRequest::get()
        .uri("/task")
        .insert_header(bearer(&expired))
        .send_request(&app)
        .await;
    assert_eq!(resp.status(), 401);

    // Swap the first character of the signature.
    let split = token.rfind('.').expect("token has a signature") + 1;
    let replacement = if token[split..].starts_with('A') { "B" } else { "A" };
    let mut tampered = token.clone();
    tampered.replace_range(split..split + 1, replacement);
    let resp = test::TestRequest::get()
        .uri("/task")
        .insert_header(bearer(&tampered))
        .send_request(&app)
        .await;
    assert_eq!(resp.status(), 401);

    let resp = test::TestRequest::get()
        .uri("/task")
        .insert_header(bearer(&token))
        .send_request(&app)
        .await;
    assert_eq!(resp.status(), 200);
}

#[actix_web::test]
async fn test_task_lifecycle() {
    let state = common::test_state().await;
    let app = spawn_app!(state);

    let body: Value = test::call_and_read_body_json(
        &app,
        register_request("alice@example.com", PASSWORD).to_request(),
    )
    .await;
    let token = token_of(&body);

    let created: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::post()
            .uri("/task")
            .insert_header(bearer(&token))
            .set_json(json!({
                "title": "Write report",
                "dueDate": "2030-01-01T09:00:00Z",
                "priority": "high"
            }))
            .to_request(),
    )
    .await;
    assert_eq!(created["success"], true);
    let id = created["data"]["id"].as_i64().expect("task id");

    let listed: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/task")
            .insert_header(bearer(&token))
            .to_request(),
    )
    .await;
    let tasks = listed["data"]["tasks"].as_array().expect("task list");
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["id"], id);
    assert_eq!(tasks[0]["title"], "Write report");
    assert_eq!(tasks[0]["priority"], "high");
    assert_eq!(tasks[0]["userId"], 1);

    let resp = test::TestRequest::patch()
        .uri("/task")
        .insert_header(bearer(&token))
        .set_json(json!({ "id": id, "title": "Write final report" }))
        .send_request(&app)
        .await;
    assert_eq!(resp.status(), 200);

    let listed: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/task")
            .insert_header(bearer(&token))
            .to_request(),
    )
    .await;
    assert_eq!(listed["data"]["tasks"][0]["title"], "Write final report");
    assert_eq!(listed["data"]["tasks"][0]["priority"], "high");
    assert!(listed["data"]["tasks"][0]["dueDate"].is_string());

    let resp = test::TestRequest::patch()
        .uri("/task")
        .insert_header(bearer(&token))
        .set_json(json!({ "id": id, "dueDate": null }))
        .send_request(&app)
        .await;
    assert_eq!(resp.status(), 200);

    let listed: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/task")
            .insert_header(bearer(&token))
            .to_request(),
    )
    .await;
    assert!(listed["data"]["tasks"][0]["dueDate"].is_null());
    assert_eq!(listed["data"]["tasks"][0]["title"], "Write final report");

    let resp = test::TestRequest::delete()
        .uri("/task")
        .insert_header(bearer(&token))
        .set_json(json!({ "id": id }))
        .send_request(&app)
        .await;
    assert_eq!(resp.status(), 200);

    let listed: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/task")
            .insert_header(bearer(&token))
            .to_request(),
    )
    .await;
    assert!(listed["data"]["tasks"].as_array().expect("task list").is_empty());
}

#[actix_web::test]
async fn test_tasks_are_scoped_to_owner() {
    let state = common::test_state().await;
    let app = spawn_app!(state);

    let alice: Value = test::call_and_read_body_json(
        &app,
        register_request("alice@example.com", PASSWORD).to_request(),
    )
    .await;
    let bob: Value = test::call_and_read_body_json(
        &app,
        register_request("bob@example.com", PASSWORD).to_request(),
    )
    .await;
    let alice = token_of(&alice);
    let bob = token_of(&bob);

    let created: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::post()
            .uri("/task")
            .insert_header(bearer(&alice))
            .set_json(json!({ "title": "Private" }))
            .to_request(),
    )
    .await;
    let id = created["data"]["id"].as_i64().expect("task id");

    let listed: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/task")
            .insert_header(bearer(&bob))
            .to_request(),
    )
    .await;
    assert!(listed["data"]["tasks"].as_array().expect("task list").is_empty());

    let update = test::TestRequest::patch()
        .uri("/task")
        .insert_header(bearer(&bob))
        .set_json(json!({ "id": id, "title": "Mine now" }))
        .send_request(&app)
        .await;
    assert_eq!(update.status(), 404);
    let body: Value = test::read_body_json(update).await;
    assert_eq!(body["message"], "Task not found");

    let delete = test::TestRequest::delete()
        .uri("/task")
        .insert_header(bearer(&bob))
        .set_json(json!({ "id": id }))
        .send_request(&app)
        .await;
    assert_eq!(delete.status(), 404);

    let missing = test::TestRequest::delete()
        .uri("/task")
        .insert_header(bearer(&alice))
        .set_json(json!({ "id": 9999 }))
        .send_request(&app)
        .await;
    assert_eq!(missing.status(), 404);
}

#[actix_web::test]
async fn test_listing_pages_and_orders() {
    let state = common::test_state().await;
    let app = spawn_app!(state);

    let body: Value = test::call_and_read_body_json(
        &app,
        register_request("alice@example.com", PASSWORD).to_request(),
    )
    .await;
    let token = token_of(&body);

    for i in 1..=7 {
        let resp = test::TestRequest::post()
            .uri("/task")
            .insert_header(bearer(&token))
            .set_json(json!({ "title": format!("task {}", i) }))
            .send_request(&app)
            .await;
        assert_eq!(resp.status(), 200);
    }

    let page_two: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/task?page=2&order_field=id&order_direction=asc")
            .insert_header(bearer(&token))
            .to_request(),
    )
    .await;
    let ids: Vec<i64> = page_two["data"]["tasks"]
        .as_array()
        .expect("task list")
        .iter()
        .filter_map(|t| t["id"].as_i64())
        .collect();
    assert_eq!(ids, vec![6, 7]);

    let newest_first: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/task?order_field=id&order_direction=DESC")
            .insert_header(bearer(&token))
            .to_request(),
    )
    .await;
    assert_eq!(newest_first["data"]["tasks"].as_array().expect("task list").len(), 5);
    assert_eq!(newest_first["data"]["tasks"][0]["id"], 7);
}

#[actix_web::test]
async fn test_listing_rejects_bad_parameters() {
    let state = common::test_state().await;
    let app = spawn_app!(state);

    let body: Value = test::call_and_read_body_json(
        &app,
        register_request("alice@example.com", PASSWORD).to_request(),
    )
    .await;
    let token = token_of(&body);

    for uri in [
        "/task?order_field=password_hash",
        "/task?order_field=id;DROP%20TABLE%20tasks",
        "/task?order_direction=sideways",
        "/task?page=0",
        "/task?page=abc",
    ] {
        let resp = test::TestRequest::get()
            .uri(uri)
            .insert_header(bearer(&token))
            .send_request(&app)
            .await;
        assert_eq!(resp.status(), 400, "{}", uri);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
    }
}
