//! Shared fixtures for integration tests against a mock storefront API.

#![allow(dead_code)]

use serde_json::{json, Value};
use storefront_client::{AppState, Config};
use wiremock::MockServer;

/// App state pointed at the mock server.
pub fn app_for(server: &MockServer) -> AppState {
    let config = Config {
        api_base_url: server.uri(),
        ..Config::default()
    };
    AppState::new(config).expect("app state")
}

pub fn token_json(token: &str) -> Value {
    json!({ "access_token": token, "refresh_token": "refresh-unused" })
}

pub fn identity_json(id: i64, email: &str, name: &str) -> Value {
    json!({
        "id": id,
        "email": email,
        "password": "secret",
        "name": name,
        "role": "customer",
        "avatar": format!("https://i.imgur.com/{id}.jpg"),
        "creationAt": "2024-05-01T10:00:00.000Z",
        "updatedAt": "2024-05-01T10:00:00.000Z"
    })
}

pub fn product_json(id: i64, title: &str, price: f64) -> Value {
    json!({
        "id": id,
        "title": title,
        "slug": title.to_lowercase().replace(' ', "-"),
        "price": price,
        "description": format!("{title} description"),
        "category": {
            "id": 1,
            "name": "Clothes",
            "image": "https://i.imgur.com/QkIa5tT.jpeg"
        },
        "images": [format!("https://i.imgur.com/p{id}.jpeg")]
    })
}

pub fn user_json(id: i64, email: &str, name: &str, role: &str) -> Value {
    json!({
        "id": id,
        "email": email,
        "password": "changeme",
        "name": name,
        "role": role,
        "avatar": "https://picsum.photos/800"
    })
}
