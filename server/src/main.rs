use axum::{
    extract::Query,
    http::{HeaderValue, Method, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use cross_solver::constants::ALL_COLORS;
use cross_solver::cubie::CubieCube;
use cross_solver::error::Error;
use cross_solver::scramble;
use cross_solver::solver::{self, BestSolutions, CrossSolution};

const ADDRESS: &str = "127.0.0.1:32125";
const TOP_K: usize = 10;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    env_logger::init();

    let cors = CorsLayer::new()
        .allow_origin(HeaderValue::from_static("http://127.0.0.1:8080"))
        .allow_methods([Method::GET]);
    let app = Router::new()
        .route("/", get(index))
        .route("/solve", get(solve))
        .route("/scramble", get(scramble))
        .layer(cors);

    let app = app.fallback(index);

    let listener = tokio::net::TcpListener::bind(ADDRESS).await?;
    info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await
}

async fn index() -> Html<&'static str> {
    Html("<p>Solve the crosses of a scramble: http://localhost:32125/solve?scramble=&lt;moves&gt;</p>
    Example: <a href=\"http://localhost:32125/solve?scramble=R%20U%20R'%20F2%20D%20L'\">http://localhost:32125/solve?scramble=R U R' F2 D L'</a>
    <p>Get a scramble: <a href=\"http://localhost:32125/scramble\">http://localhost:32125/scramble</a></p>")
}

async fn scramble() -> String {
    let ss = scramble::gen_scramble(25);
    let text = scramble::scramble_to_str(&ss).unwrap_or_default();
    format!("Scramble: {}", text)
}

#[derive(Deserialize)]
struct SolveQuery {
    scramble: String,
}

#[derive(Serialize)]
struct SolveResponse {
    scramble: String,
    best: BestSolutions,
    top: Vec<CrossSolution>,
}

struct SolveError(Error);

impl IntoResponse for SolveError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            Error::InvalidScramble => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        warn!("solve failed: {}", self.0);
        (status, self.0.to_string()).into_response()
    }
}

impl From<Error> for SolveError {
    fn from(error: Error) -> Self {
        Self(error)
    }
}

fn solve_scramble(scramble: String) -> Result<SolveResponse, Error> {
    let moves = scramble::scramble_from_str(&scramble)?;
    let state = CubieCube::from(&moves);
    let best = solver::best_cross_solutions(&state, None, &ALL_COLORS)?;
    let top = solver::top_k_cross_solutions(&state, None, TOP_K, &ALL_COLORS)?;
    Ok(SolveResponse {
        scramble: scramble::scramble_to_str(&moves)?,
        best,
        top,
    })
}

async fn solve(Query(query): Query<SolveQuery>) -> Result<Json<SolveResponse>, SolveError> {
    // table creation and search are CPU bound
    let result = tokio::task::spawn_blocking(move || solve_scramble(query.scramble))
        .await
        .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))?;
    Ok(Json(result?))
}
