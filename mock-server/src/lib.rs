use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Food {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: String,
    #[serde(default)]
    pub available: bool,
    #[serde(default)]
    pub image: String,
}

#[derive(Deserialize)]
pub struct CreateFood {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: String,
    #[serde(default)]
    pub available: bool,
    #[serde(default)]
    pub image: String,
}

/// Fields left out of the body stay as they are. A body `id` is ignored.
#[derive(Deserialize)]
pub struct UpdateFood {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub available: Option<bool>,
    pub image: Option<String>,
}

/// Records in insertion order plus the next id to hand out.
#[derive(Debug)]
pub struct Store {
    foods: Vec<Food>,
    next_id: u64,
}

impl Store {
    pub fn seeded(foods: Vec<Food>) -> Self {
        let next_id = foods.iter().map(|f| f.id).max().unwrap_or(0) + 1;
        Self { foods, next_id }
    }

    fn position(&self, id: u64) -> Option<usize> {
        self.foods.iter().position(|f| f.id == id)
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    app_with(Vec::new())
}

pub fn app_with(foods: Vec<Food>) -> Router {
    let db: Db = Arc::new(RwLock::new(Store::seeded(foods)));
    Router::new()
        .route("/foods", get(list_foods).post(create_food))
        .route("/foods/{id}", get(get_food).put(update_food).delete(delete_food))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_foods(State(db): State<Db>) -> Json<Vec<Food>> {
    Json(db.read().await.foods.clone())
}

async fn create_food(
    State(db): State<Db>,
    Json(input): Json<CreateFood>,
) -> (StatusCode, Json<Food>) {
    let mut store = db.write().await;
    let food = Food {
        id: store.next_id,
        name: input.name,
        description: input.description,
        price: input.price,
        available: input.available,
        image: input.image,
    };
    store.next_id += 1;
    store.foods.push(food.clone());
    (StatusCode::CREATED, Json(food))
}

async fn get_food(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<Food>, StatusCode> {
    let store = db.read().await;
    let index = store.position(id).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(store.foods[index].clone()))
}

async fn update_food(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<UpdateFood>,
) -> Result<Json<Food>, StatusCode> {
    let mut store = db.write().await;
    let index = store.position(id).ok_or(StatusCode::NOT_FOUND)?;
    let food = &mut store.foods[index];
    if let Some(name) = input.name {
        food.name = name;
    }
    if let Some(description) = input.description {
        food.description = description;
    }
    if let Some(price) = input.price {
        food.price = price;
    }
    if let Some(available) = input.available {
        food.available = available;
    }
    if let Some(image) = input.image {
        food.image = image;
    }
    Ok(Json(food.clone()))
}

async fn delete_food(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<StatusCode, StatusCode> {
    let mut store = db.write().await;
    let index = store.position(id).ok_or(StatusCode::NOT_FOUND)?;
    store.foods.remove(index);
    Ok(StatusCode::NO_CONTENT)
}
