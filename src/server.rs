//! Read-only HTTP API over the loaded content.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::json;
use serde_yaml::{Mapping, Value};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::content::AdventureSummary;
use crate::context::AppContext;
use crate::i18n::{LocaleConfig, CANONICAL_LANGUAGE};

type SharedContext = Arc<AppContext>;
type NotFound = (StatusCode, Json<serde_json::Value>);

#[derive(Debug, Default, Deserialize)]
pub struct KeywordQuery {
    keyword_lang: Option<String>,
}

impl KeywordQuery {
    fn language(&self) -> &str {
        self.keyword_lang.as_deref().unwrap_or(CANONICAL_LANGUAGE)
    }
}

fn not_found(what: String) -> NotFound {
    (StatusCode::NOT_FOUND, Json(json!({ "error": format!("{} not found", what) })))
}

/// Build the router with shared state.
pub fn build_router(ctx: SharedContext) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/languages", get(languages))
        .route("/api/keyword-languages", get(keyword_languages))
        .route("/api/research", get(research))
        .route("/api/metrics", get(metrics))
        .route("/api/commands/:lang/:level", get(commands))
        .route("/api/adventures/:lang", get(adventures))
        .route("/api/adventures/:lang/names", get(adventure_names))
        .route("/api/adventures/:lang/levels", get(adventure_levels))
        .route("/api/parsons/:lang/:level", get(parsons))
        .route("/api/parsons/:lang/:level/:exercise", get(parsons_exercise))
        .route("/api/quizzes/:lang/:level", get(quiz))
        .route("/api/quizzes/:lang/:level/:question", get(quiz_question))
        .route("/api/tutorials/:lang/:level", get(tutorial))
        .route("/api/tutorials/:lang/:level/:step", get(tutorial_step))
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

/// Bind to `port` on all interfaces and serve until the process exits.
pub async fn serve(ctx: SharedContext, port: u16) -> Result<()> {
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("Content API listening on {}", addr);
    axum::serve(listener, build_router(ctx))
        .await
        .context("Content API server error")
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn languages(State(ctx): State<SharedContext>) -> Json<Vec<LocaleConfig>> {
    Json(ctx.registry.list_all().into_iter().cloned().collect())
}

async fn keyword_languages(State(ctx): State<SharedContext>) -> Json<serde_json::Value> {
    Json(json!(ctx.registry.list_keyword_languages()))
}

async fn research(State(ctx): State<SharedContext>) -> Json<serde_json::Value> {
    Json(json!(ctx.research))
}

async fn metrics(State(ctx): State<SharedContext>) -> Json<serde_json::Value> {
    Json(json!({
        "strategy": ctx.config.cache_strategy.to_string(),
        "cache": ctx.cache_report(),
    }))
}

async fn commands(
    State(ctx): State<SharedContext>,
    Path((lang, level)): Path<(String, String)>,
    Query(query): Query<KeywordQuery>,
) -> Json<Vec<Value>> {
    Json(ctx.commands(&lang).commands_for_level(&level, query.language()))
}

async fn adventures(
    State(ctx): State<SharedContext>,
    Path(lang): Path<String>,
    Query(query): Query<KeywordQuery>,
) -> Json<Mapping> {
    Json(ctx.adventures(&lang).adventures(query.language()))
}

async fn adventure_names(
    State(ctx): State<SharedContext>,
    Path(lang): Path<String>,
) -> Json<serde_json::Value> {
    // Pairs keep curriculum order, which a JSON object would not guarantee
    let names: Vec<_> = ctx
        .adventures(&lang)
        .adventure_names()
        .into_iter()
        .map(|(key, name)| json!({ "key": key, "name": name }))
        .collect();
    Json(json!(names))
}

async fn adventure_levels(
    State(ctx): State<SharedContext>,
    Path(lang): Path<String>,
) -> Json<Vec<AdventureSummary>> {
    Json(ctx.adventures(&lang).adventure_keyname_name_levels())
}

async fn parsons(
    State(ctx): State<SharedContext>,
    Path((lang, level)): Path<(String, String)>,
    Query(query): Query<KeywordQuery>,
) -> Json<Mapping> {
    Json(ctx.parsons(&lang).parsons_for_level(&level, query.language()))
}

async fn parsons_exercise(
    State(ctx): State<SharedContext>,
    Path((lang, level, exercise)): Path<(String, String, String)>,
    Query(query): Query<KeywordQuery>,
) -> Result<Json<Value>, NotFound> {
    ctx.parsons(&lang)
        .parsons_exercise(&level, &exercise, query.language())
        .map(Json)
        .ok_or_else(|| not_found(format!("Parsons exercise {} of level {}", exercise, level)))
}

async fn quiz(
    State(ctx): State<SharedContext>,
    Path((lang, level)): Path<(String, String)>,
    Query(query): Query<KeywordQuery>,
) -> Json<Mapping> {
    Json(ctx.quizzes(&lang).quiz_for_level(&level, query.language()))
}

async fn quiz_question(
    State(ctx): State<SharedContext>,
    Path((lang, level, question)): Path<(String, String, String)>,
    Query(query): Query<KeywordQuery>,
) -> Result<Json<Value>, NotFound> {
    ctx.quizzes(&lang)
        .quiz_question(&level, &question, query.language())
        .map(Json)
        .ok_or_else(|| not_found(format!("Question {} of level {}", question, level)))
}

async fn tutorial(
    State(ctx): State<SharedContext>,
    Path((lang, level)): Path<(String, String)>,
    Query(query): Query<KeywordQuery>,
) -> Json<Mapping> {
    Json(ctx.tutorials(&lang).tutorial_for_level(&level, query.language()))
}

async fn tutorial_step(
    State(ctx): State<SharedContext>,
    Path((lang, level, step)): Path<(String, String, String)>,
    Query(query): Query<KeywordQuery>,
) -> Result<Json<Value>, NotFound> {
    ctx.tutorials(&lang)
        .tutorial_step(&level, &step, query.language())
        .map(Json)
        .ok_or_else(|| not_found(format!("Tutorial step {} of level {}", step, level)))
}
