//! Local REST fixture service shaped like JSONPlaceholder.
//!
//! `/users` serves ten fixed users; `/posts` is a small in-memory store
//! that echoes whatever fields it is sent.

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub username: String,
    pub email: String,
}

#[derive(Deserialize)]
pub struct UserFilter {
    pub id: Option<u64>,
}

/// A post is an arbitrary JSON object plus its `id`.
pub type Record = Map<String, Value>;

pub struct Store {
    users: Vec<User>,
    posts: RwLock<BTreeMap<u64, Record>>,
}

pub type Db = Arc<Store>;

const USERS: [(&str, &str, &str); 10] = [
    ("Leanne Graham", "Bret", "Sincere@april.biz"),
    ("Ervin Howell", "Antonette", "Shanna@melissa.tv"),
    ("Clementine Bauch", "Samantha", "Nathan@yesenia.net"),
    ("Patricia Lebsack", "Karianne", "Julianne.OConner@kory.org"),
    ("Chelsey Dietrich", "Kamren", "Lucio_Hettinger@annie.ca"),
    ("Mrs. Dennis Schulist", "Leopoldo_Corkery", "Karley_Dach@jasper.info"),
    ("Kurtis Weissnat", "Elwyn.Skiles", "Telly.Hoeger@billy.biz"),
    ("Nicholas Runolfsdottir V", "Maxime_Nienow", "Sherwood@rosamond.me"),
    ("Glenna Reichert", "Delphine", "Chaim_McDermott@dana.io"),
    ("Clementina DuBuque", "Moriah.Stanton", "Rey.Padberg@karina.biz"),
];

pub fn fixture_users() -> Vec<User> {
    USERS
        .iter()
        .zip(1..)
        .map(|(&(name, username, email), id)| User {
            id,
            name: name.to_string(),
            username: username.to_string(),
            email: email.to_string(),
        })
        .collect()
}

fn fixture_posts() -> BTreeMap<u64, Record> {
    let seed = [
        (1, "sunt aut facere repellat provident", "quia et suscipit"),
        (1, "qui est esse", "est rerum tempore vitae"),
        (2, "et ea vero quia laudantium autem", "delectus reiciendis molestiae"),
    ];
    seed.iter()
        .zip(1..)
        .map(|(&(user_id, title, body), id)| {
            let record = json!({ "id": id, "userId": user_id, "title": title, "body": body });
            (id, record.as_object().cloned().unwrap_or_default())
        })
        .collect()
}

pub fn app() -> Router {
    let db: Db = Arc::new(Store {
        users: fixture_users(),
        posts: RwLock::new(fixture_posts()),
    });
    Router::new()
        .route("/users", get(list_users))
        .route("/users/{id}", get(get_user))
        .route("/posts", get(list_posts).post(create_post))
        .route("/posts/{id}", get(get_post).put(update_post).delete(delete_post))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// `GET /users` lists everyone; `GET /users?id=N` answers with that user.
async fn list_users(
    State(db): State<Db>,
    Query(filter): Query<UserFilter>,
) -> Result<Json<Value>, StatusCode> {
    tracing::debug!(id = ?filter.id, "list users");
    match filter.id {
        Some(id) => find_user(&db, id).map(|user| Json(json!(user))),
        None => Ok(Json(json!(db.users))),
    }
}

async fn get_user(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<User>, StatusCode> {
    find_user(&db, id).map(Json)
}

fn find_user(db: &Store, id: u64) -> Result<User, StatusCode> {
    db.users
        .iter()
        .find(|user| user.id == id)
        .cloned()
        .ok_or(StatusCode::NOT_FOUND)
}

async fn list_posts(State(db): State<Db>) -> Json<Vec<Record>> {
    let posts = db.posts.read().await;
    Json(posts.values().cloned().collect())
}

/// An empty body is an empty object; anything else must be a JSON object.
fn parse_record(body: &Bytes) -> Result<Record, StatusCode> {
    if body.is_empty() {
        return Ok(Record::new());
    }
    match serde_json::from_slice(body) {
        Ok(Value::Object(record)) => Ok(record),
        _ => Err(StatusCode::BAD_REQUEST),
    }
}

async fn create_post(State(db): State<Db>, body: Bytes) -> Result<(StatusCode, Json<Record>), StatusCode> {
    let mut record = parse_record(&body)?;
    let mut posts = db.posts.write().await;
    let id = posts.keys().next_back().map_or(1, |last| last + 1);
    record.insert("id".to_string(), json!(id));
    posts.insert(id, record.clone());
    tracing::debug!(id, "created post");
    Ok((StatusCode::CREATED, Json(record)))
}

async fn get_post(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<Record>, StatusCode> {
    let posts = db.posts.read().await;
    posts.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_post(
    State(db): State<Db>,
    Path(id): Path<u64>,
    body: Bytes,
) -> Result<Json<Record>, StatusCode> {
    let mut record = parse_record(&body)?;
    let mut posts = db.posts.write().await;
    let existing = posts.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    record.insert("id".to_string(), json!(id));
    *existing = record.clone();
    Ok(Json(record))
}

async fn delete_post(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<Record>, StatusCode> {
    let mut posts = db.posts.write().await;
    posts.remove(&id).map(|_| Json(Record::new())).ok_or(StatusCode::NOT_FOUND)
}
