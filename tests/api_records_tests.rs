// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Record CRUD tests: ownership, validation and goal upsert.

use axum::http::{Method, StatusCode};
use serde_json::{json, Value};

mod common;

async fn create(app: &common::TestApp, token: &str, path: &str, body: Value) -> Value {
    let (status, created) = app.post(path, token, body).await;
    assert_eq!(status, StatusCode::CREATED, "create {path}: {created}");
    created
}

#[tokio::test]
async fn test_users_cannot_touch_each_others_records() {
    let app = common::create_test_app();
    let (alice, _) = app.register("alice").await;
    let (bob, _) = app.register("bob").await;

    let cases = [
        ("/api/agua", json!({"quantidade_ml": 500})),
        ("/api/exercicios", json!({"tipo_atividade": "Corrida", "duracao_minutos": 30})),
        ("/api/sono", json!({"horas_sono": 7.5})),
        ("/api/refeicoes", json!({"tipo_refeicao": "Almoço", "descricao": "arroz"})),
        ("/api/metas", json!({"meta_agua_ml": 2500})),
    ];

    for (path, body) in cases {
        let record = create(&app, &alice, path, body.clone()).await;
        let item = format!("{}/{}", path, record["id"].as_str().unwrap());

        let (status, list) = app.get(path, &bob).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list, json!([]), "{path} leaked into bob's list");

        let (status, _) = app.get(&item, &bob).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "GET {item}");

        let (status, _) = app
            .send(Method::PUT, &item, Some(&bob), Some(body.clone()))
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND, "PUT {item}");

        let (status, _) = app
            .send(Method::PATCH, &item, Some(&bob), Some(json!({})))
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND, "PATCH {item}");

        let (status, _) = app.send(Method::DELETE, &item, Some(&bob), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "DELETE {item}");

        // Still intact for the owner.
        let (status, fetched) = app.get(&item, &alice).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, record);
    }
}

#[tokio::test]
async fn test_create_attributes_record_to_caller() {
    let app = common::create_test_app();
    let (alice, alice_id) = app.register("alice").await;
    let (bob, bob_id) = app.register("bob").await;

    let record = create(
        &app,
        &alice,
        "/api/agua",
        json!({"quantidade_ml": 250, "user": bob_id, "id": "chosen-id"}),
    )
    .await;

    assert_eq!(record["user"], alice_id.as_str());
    assert_ne!(record["id"], "chosen-id");

    let (_, bob_list) = app.get("/api/agua", &bob).await;
    assert_eq!(bob_list, json!([]));
}

#[tokio::test]
async fn test_update_partial_update_and_delete() {
    let app = common::create_test_app();
    let (token, _) = app.register("alice").await;

    let record = create(
        &app,
        &token,
        "/api/exercicios",
        json!({"tipo_atividade": "Caminhada", "duracao_minutos": 20, "intensidade": "Baixa"}),
    )
    .await;
    let item = format!("/api/exercicios/{}", record["id"].as_str().unwrap());

    let (status, updated) = app
        .send(
            Method::PUT,
            &item,
            Some(&token),
            Some(json!({"tipo_atividade": "Natação", "duracao_minutos": 45})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["tipo_atividade"], "Natação");
    assert_eq!(updated["duracao_minutos"], 45);
    // Omitted on a full update: back to the default.
    assert_eq!(updated["intensidade"], "Moderada");
    assert_eq!(updated["data_criacao"], record["data_criacao"]);

    let (status, patched) = app
        .send(
            Method::PATCH,
            &item,
            Some(&token),
            Some(json!({"intensidade": "Intensa"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["intensidade"], "Intensa");
    assert_eq!(patched["tipo_atividade"], "Natação");
    assert_eq!(patched["duracao_minutos"], 45);

    let (status, body) = app.send(Method::DELETE, &item, Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = app.get(&item, &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_validation_errors() {
    let app = common::create_test_app();
    let (token, _) = app.register("alice").await;

    let (status, body) = app
        .post("/api/agua", &token, json!({"quantidade_ml": 0}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");

    let (status, body) = app
        .post("/api/sono", &token, json!({"horas_sono": 30}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");

    let (status, body) = app
        .post(
            "/api/exercicios",
            &token,
            json!({"tipo_atividade": "Paraquedismo", "duracao_minutos": 10}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");

    let (status, body) = app.post("/api/agua", &token, json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn test_goal_create_twice_keeps_one_row() {
    let app = common::create_test_app();
    let (token, user_id) = app.register("alice").await;

    let first = create(&app, &token, "/api/metas", json!({"meta_agua_ml": 2000})).await;
    let second = create(&app, &token, "/api/metas", json!({"meta_agua_ml": 3500})).await;

    assert_eq!(first["id"], user_id.as_str());
    assert_eq!(second["id"], user_id.as_str());

    let (_, goals) = app.get("/api/metas", &token).await;
    let goals = goals.as_array().unwrap();
    assert_eq!(goals.len(), 1);
    assert_eq!(goals[0]["meta_agua_ml"], 3500);
    // Defaults fill the rest.
    assert_eq!(goals[0]["meta_sono_horas"], 8.0);
    assert_eq!(goals[0]["meta_exercicio_min"], 60);
    assert_eq!(goals[0]["meta_refeicoes_qtd"], 5);
}

#[tokio::test]
async fn test_list_is_newest_first() {
    let app = common::create_test_app();
    let (token, _) = app.register("alice").await;

    for volume in [100, 200, 300] {
        create(&app, &token, "/api/agua", json!({"quantidade_ml": volume})).await;
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    }

    let (_, list) = app.get("/api/agua", &token).await;
    let volumes: Vec<u64> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|log| log["quantidade_ml"].as_u64().unwrap())
        .collect();
    assert_eq!(volumes, vec![300, 200, 100]);
}
