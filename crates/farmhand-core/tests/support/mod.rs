//! In-process fake of the farm backend's HTTP contract.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use axum::extract::{Path, Request, State};
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, post, put};
use axum::{Json, Router};
use farmhand_core::session::MemoryTokenStore;
use farmhand_core::{ApiClient, ClientConfig, Session, SessionToken};
use serde_json::{json, Value};

const COLLECTIONS: [&str; 6] = [
    "attendance",
    "medicines",
    "seeds",
    "expenses",
    "contacts",
    "calendar",
];

#[derive(Default)]
struct Backend {
    collections: HashMap<String, Vec<Value>>,
    next_id: i64,
    users: HashMap<String, User>,
    tokens: HashSet<String>,
    issued: u64,
    requests: Vec<String>,
    failures: HashMap<String, (StatusCode, Value)>,
    delays: HashMap<String, Duration>,
}

struct User {
    password: String,
    security_answer: String,
}

type Shared = Arc<Mutex<Backend>>;

fn lock(shared: &Shared) -> MutexGuard<'_, Backend> {
    shared.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

pub struct FakeBackend {
    pub base_url: String,
    shared: Shared,
}

impl FakeBackend {
    pub async fn start() -> Self {
        let mut backend = Backend {
            next_id: 1,
            ..Backend::default()
        };
        for collection in COLLECTIONS {
            backend.collections.insert(collection.to_string(), Vec::new());
        }
        let shared = Arc::new(Mutex::new(backend));

        let router = Router::new()
            .route("/login", post(login))
            .route("/register", post(register))
            .route("/forgot-password", post(forgot_password))
            .route("/logout", post(logout))
            .route("/expenses/settle", put(settle_expense))
            .route(
                "/{collection}",
                axum::routing::get(list_items)
                    .post(create_item)
                    .put(update_by_body)
                    .delete(delete_by_body),
            )
            .route("/{collection}/{id}", delete(delete_by_path))
            .layer(middleware::from_fn_with_state(shared.clone(), record))
            .with_state(shared.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake backend");
        let address = listener.local_addr().expect("local address");
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Self {
            base_url: format!("http://{address}"),
            shared,
        }
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig::for_base_url(&self.base_url)
    }

    pub fn api(&self) -> ApiClient {
        ApiClient::new(&self.config()).expect("api client")
    }

    /// A token the backend accepts, without going through `/login`.
    pub fn issue_token(&self) -> String {
        let mut backend = lock(&self.shared);
        backend.issued += 1;
        let token = format!("token-{}", backend.issued);
        backend.tokens.insert(token.clone());
        token
    }

    pub fn signed_in_session(&self) -> Session {
        let token = SessionToken::new(self.issue_token()).expect("token");
        Session::restore(MemoryTokenStore::with_token(token)).expect("session")
    }

    pub fn add_user(&self, username: &str, password: &str, security_answer: &str) {
        lock(&self.shared).users.insert(
            username.to_string(),
            User {
                password: password.to_string(),
                security_answer: security_answer.to_string(),
            },
        );
    }

    pub fn password_of(&self, username: &str) -> Option<String> {
        lock(&self.shared)
            .users
            .get(username)
            .map(|user| user.password.clone())
    }

    /// Inserts items as if created earlier, assigning ids. Returns the ids.
    pub fn seed(&self, collection: &str, items: Vec<Value>) -> Vec<i64> {
        let mut backend = lock(&self.shared);
        let mut ids = Vec::new();
        for mut item in items {
            let id = backend.next_id;
            backend.next_id += 1;
            item["id"] = json!(id);
            ids.push(id);
            backend
                .collections
                .entry(collection.to_string())
                .or_default()
                .push(item);
        }
        ids
    }

    pub fn items(&self, collection: &str) -> Vec<Value> {
        lock(&self.shared)
            .collections
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    /// Every request seen so far, as `METHOD /path`.
    pub fn requests(&self) -> Vec<String> {
        lock(&self.shared).requests.clone()
    }

    /// Answers the next `method path` request with `status` and `body`.
    pub fn fail_next(&self, method: &str, path: &str, status: u16, body: Value) {
        let status = StatusCode::from_u16(status).expect("status code");
        lock(&self.shared)
            .failures
            .insert(format!("{method} {path}"), (status, body));
    }

    /// Holds back the response to the next `method path` request.
    pub fn delay_next(&self, method: &str, path: &str, delay: Duration) {
        lock(&self.shared)
            .delays
            .insert(format!("{method} {path}"), delay);
    }
}

async fn record(State(shared): State<Shared>, request: Request, next: Next) -> Response {
    let key = format!("{} {}", request.method(), request.uri().path());
    let (failure, delay) = {
        let mut backend = lock(&shared);
        backend.requests.push(key.clone());
        (backend.failures.remove(&key), backend.delays.remove(&key))
    };

    let response = match failure {
        Some((status, body)) => (status, Json(body)).into_response(),
        None => next.run(request).await,
    };
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
    response
}

fn reply(status: StatusCode, body: Value) -> Response {
    (status, Json(body)).into_response()
}

fn message(status: StatusCode, text: &str) -> Response {
    reply(status, json!({ "message": text }))
}

fn authorize(backend: &Backend, headers: &HeaderMap) -> Result<String, Response> {
    let token = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| {
            reply(
                StatusCode::UNAUTHORIZED,
                json!({ "msg": "Missing Authorization Header" }),
            )
        })?;
    if !backend.tokens.contains(token) {
        return Err(reply(
            StatusCode::UNAUTHORIZED,
            json!({ "msg": "Token has been revoked" }),
        ));
    }
    Ok(token.to_string())
}

fn text_field<'a>(body: &'a Value, field: &str) -> Option<&'a str> {
    body.get(field)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
}

async fn login(State(shared): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut backend = lock(&shared);
    let username = text_field(&body, "username").unwrap_or_default();
    let password = text_field(&body, "password").unwrap_or_default();
    let valid = backend
        .users
        .get(username)
        .is_some_and(|user| user.password == password);
    if !valid {
        return message(StatusCode::UNAUTHORIZED, "Invalid username or password");
    }
    backend.issued += 1;
    let token = format!("token-{}", backend.issued);
    backend.tokens.insert(token.clone());
    reply(
        StatusCode::OK,
        json!({ "message": "Login successful", "token": token }),
    )
}

async fn register(State(shared): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut backend = lock(&shared);
    let fields = ["username", "password", "security_question", "security_answer"];
    if fields.iter().any(|field| text_field(&body, field).is_none()) {
        return message(StatusCode::BAD_REQUEST, "All fields are required");
    }
    let username = text_field(&body, "username").unwrap_or_default().to_string();
    if backend.users.contains_key(&username) {
        return message(StatusCode::CONFLICT, "User already exists");
    }
    backend.users.insert(
        username,
        User {
            password: text_field(&body, "password").unwrap_or_default().to_string(),
            security_answer: text_field(&body, "security_answer")
                .unwrap_or_default()
                .to_string(),
        },
    );
    message(StatusCode::CREATED, "User registered successfully")
}

async fn forgot_password(State(shared): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut backend = lock(&shared);
    let username = text_field(&body, "username").unwrap_or_default();
    let answer = text_field(&body, "security_answer").unwrap_or_default();
    let new_password = text_field(&body, "new_password").unwrap_or_default().to_string();
    match backend.users.get_mut(username) {
        Some(user) if user.security_answer.eq_ignore_ascii_case(answer) => {
            user.password = new_password;
            message(StatusCode::OK, "Password has been reset successfully")
        }
        _ => message(StatusCode::BAD_REQUEST, "Invalid username or security answer"),
    }
}

async fn logout(State(shared): State<Shared>, headers: HeaderMap) -> Response {
    let mut backend = lock(&shared);
    let token = match authorize(&backend, &headers) {
        Ok(token) => token,
        Err(response) => return response,
    };
    backend.tokens.remove(&token);
    message(StatusCode::OK, "Logout successful")
}

async fn list_items(
    State(shared): State<Shared>,
    Path(collection): Path<String>,
    headers: HeaderMap,
) -> Response {
    let backend = lock(&shared);
    if let Err(response) = authorize(&backend, &headers) {
        return response;
    }
    match backend.collections.get(&collection) {
        Some(items) => reply(StatusCode::OK, Value::Array(items.clone())),
        None => message(StatusCode::NOT_FOUND, "Not found"),
    }
}

async fn create_item(
    State(shared): State<Shared>,
    Path(collection): Path<String>,
    headers: HeaderMap,
    Json(mut body): Json<Value>,
) -> Response {
    let mut backend = lock(&shared);
    if let Err(response) = authorize(&backend, &headers) {
        return response;
    }
    if !backend.collections.contains_key(&collection) {
        return message(StatusCode::NOT_FOUND, "Not found");
    }

    let id = backend.next_id;
    backend.next_id += 1;
    body["id"] = json!(id);
    match collection.as_str() {
        "attendance" => {
            body["attendance_date"] = json!("2024-06-01");
            body["notes"] = Value::Null;
        }
        "expenses" => body["settled"] = json!(false),
        _ => {}
    }
    if let Some(items) = backend.collections.get_mut(&collection) {
        items.push(body);
    }
    message(StatusCode::CREATED, &format!("Added to {collection}"))
}

fn remove_item(backend: &mut Backend, collection: &str, id: i64) -> Response {
    let Some(items) = backend.collections.get_mut(collection) else {
        return message(StatusCode::NOT_FOUND, "Not found");
    };
    let before = items.len();
    items.retain(|item| item["id"].as_i64() != Some(id));
    if items.len() == before {
        return message(StatusCode::NOT_FOUND, "Item not found");
    }
    message(StatusCode::OK, &format!("Removed from {collection}"))
}

async fn delete_by_path(
    State(shared): State<Shared>,
    Path((collection, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    let mut backend = lock(&shared);
    if let Err(response) = authorize(&backend, &headers) {
        return response;
    }
    match id.parse::<i64>() {
        Ok(id) => remove_item(&mut backend, &collection, id),
        Err(_) => message(StatusCode::NOT_FOUND, "Item not found"),
    }
}

async fn delete_by_body(
    State(shared): State<Shared>,
    Path(collection): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut backend = lock(&shared);
    if let Err(response) = authorize(&backend, &headers) {
        return response;
    }
    if collection != "calendar" {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }
    match body["id"].as_i64() {
        Some(id) => remove_item(&mut backend, &collection, id),
        None => message(StatusCode::BAD_REQUEST, "ID is required"),
    }
}

async fn update_by_body(
    State(shared): State<Shared>,
    Path(collection): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut backend = lock(&shared);
    if let Err(response) = authorize(&backend, &headers) {
        return response;
    }
    if collection != "calendar" {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }
    let (Some(id), Some(date), Some(description)) = (
        body["id"].as_i64(),
        text_field(&body, "date"),
        text_field(&body, "description"),
    ) else {
        return message(StatusCode::BAD_REQUEST, "ID, date, and description are required");
    };
    let event = backend
        .collections
        .get_mut("calendar")
        .and_then(|items| items.iter_mut().find(|item| item["id"].as_i64() == Some(id)));
    match event {
        Some(event) => {
            event["date"] = json!(date);
            event["description"] = json!(description);
            message(StatusCode::OK, "Calendar event updated successfully")
        }
        None => message(StatusCode::NOT_FOUND, "Calendar event not found"),
    }
}

async fn settle_expense(
    State(shared): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut backend = lock(&shared);
    if let Err(response) = authorize(&backend, &headers) {
        return response;
    }
    let Some(id) = body["id"].as_i64() else {
        return message(StatusCode::BAD_REQUEST, "Expense ID is required");
    };
    let expense = backend
        .collections
        .get_mut("expenses")
        .and_then(|items| items.iter_mut().find(|item| item["id"].as_i64() == Some(id)));
    match expense {
        Some(expense) => {
            expense["settled"] = json!(true);
            message(StatusCode::OK, "Expense settled successfully")
        }
        None => message(StatusCode::NOT_FOUND, "Expense not found"),
    }
}
