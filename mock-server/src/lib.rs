use std::{collections::HashMap, sync::Arc};

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: Uuid,
    pub name: String,
    pub age: u32,
}

#[derive(Deserialize)]
pub struct CreatePerson {
    pub name: String,
    pub age: u32,
}

pub type Db = Arc<RwLock<HashMap<Uuid, Person>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route("/names", get(names))
        .route("/text", get(text))
        .route("/invalid", get(invalid))
        .route("/empty", get(empty))
        .route("/status/{code}", get(status))
        .route("/redirect", get(redirect))
        .route("/bytes/{count}", get(filler_bytes))
        .route("/echo", post(echo))
        .route("/people", get(list_people).post(create_person))
        .route("/people/{id}", get(get_person))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn names() -> Json<Value> {
    Json(json!({ "names": ["Bob", "Tim", "Tina"] }))
}

async fn text() -> &'static str {
    "TEST"
}

async fn invalid() -> &'static str {
    "INVALID"
}

async fn empty() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// Respond with whatever status the path names, with a short text body.
async fn status(Path(code): Path<u16>) -> Result<(StatusCode, String), StatusCode> {
    let status = StatusCode::from_u16(code).map_err(|_| StatusCode::BAD_REQUEST)?;
    Ok((status, format!("status {code}")))
}

/// Send the client on to `/text`.
async fn redirect() -> impl IntoResponse {
    (StatusCode::FOUND, [(header::LOCATION, "/text")])
}

/// Largest body `/bytes/{count}` will produce.
pub const MAX_FILLER_BYTES: usize = 64 * 1024 * 1024;

/// A body of exactly `count` ASCII `a`s.
async fn filler_bytes(Path(count): Path<usize>) -> Result<Vec<u8>, StatusCode> {
    if count > MAX_FILLER_BYTES {
        return Err(StatusCode::BAD_REQUEST);
    }
    Ok(vec![b'a'; count])
}

/// Return the request body unchanged, with the same content type.
async fn echo(headers: HeaderMap, body: Bytes) -> impl IntoResponse {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("application/octet-stream")
        .to_string();
    ([(header::CONTENT_TYPE, content_type)], body)
}

async fn list_people(State(db): State<Db>) -> Json<Vec<Person>> {
    let people = db.read().await;
    Json(people.values().cloned().collect())
}

async fn create_person(
    State(db): State<Db>,
    Json(input): Json<CreatePerson>,
) -> (StatusCode, Json<Person>) {
    let person = Person {
        id: Uuid::new_v4(),
        name: input.name,
        age: input.age,
    };
    db.write().await.insert(person.id, person.clone());
    (StatusCode::CREATED, Json(person))
}

async fn get_person(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<Json<Person>, (StatusCode, Json<Value>)> {
    let people = db.read().await;
    people
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| (StatusCode::NOT_FOUND, Json(json!({ "error": "person not found" }))))
}
