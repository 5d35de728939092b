//! HTTP routes.

use axum::{
    extract::{Form, Path, Query, State},
    response::Redirect,
    routing::{delete, get, post, put},
    Json, Router,
};
use pitlane_domain::{CarBuild, Interaction, InteractionId, NpcId, Player, PlayerId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::app::App;
use crate::infrastructure::ports::RepoError;
use crate::use_cases::{
    BuildError, BuildSelection, ChatError, ChatReply, InteractionError, PlayerError,
    Registration, ScriptError,
};

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/health", get(health))
        // Interactions
        .route("/store_interaction", post(store_interaction))
        .route("/get_interactions/{player_id}/{npc_id}", get(get_interactions))
        .route("/update_interaction/{id}", put(update_interaction))
        .route("/delete_interaction/{id}", delete(delete_interaction))
        // Players
        .route("/create_player", post(create_player))
        .route("/players", get(list_players))
        .route("/register_player", post(register_player))
        .route("/verify_player", get(verify_player))
        // Chat
        .route("/chat_api", post(chat_api))
        .route("/chat_api_static", post(chat_api_static))
        .route("/start_chat", get(start_chat))
        // Builds
        .route("/save_car_build", post(save_car_build))
        .route("/get_builds/{player_id}", get(get_builds))
        .route("/get_builds/{player_id}/latest", get(get_latest_build))
}

#[derive(Serialize)]
struct StatusBody {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
}

async fn health() -> Json<StatusBody> {
    Json(StatusBody {
        status: "OK",
        message: None,
    })
}

// =============================================================================
// Interactions
// =============================================================================

#[derive(Deserialize)]
struct StoreInteractionRequest {
    player_id: PlayerId,
    #[serde(default)]
    npc_id: NpcId,
    dialogue: String,
}

#[derive(Deserialize)]
struct UpdateInteractionRequest {
    dialogue: String,
}

async fn store_interaction(
    State(app): State<Arc<App>>,
    Json(body): Json<StoreInteractionRequest>,
) -> Result<Json<Interaction>, ApiError> {
    let interaction = app
        .use_cases
        .interaction
        .store(body.player_id, body.npc_id, body.dialogue)
        .await?;
    Ok(Json(interaction))
}

async fn get_interactions(
    State(app): State<Arc<App>>,
    Path((player_id, npc_id)): Path<(PlayerId, NpcId)>,
) -> Result<Json<Vec<Interaction>>, ApiError> {
    let interactions = app.use_cases.interaction.list(player_id, npc_id).await?;
    Ok(Json(interactions))
}

async fn update_interaction(
    State(app): State<Arc<App>>,
    Path(id): Path<InteractionId>,
    Json(body): Json<UpdateInteractionRequest>,
) -> Result<Json<Interaction>, ApiError> {
    let interaction = app.use_cases.interaction.update(id, body.dialogue).await?;
    Ok(Json(interaction))
}

async fn delete_interaction(
    State(app): State<Arc<App>>,
    Path(id): Path<InteractionId>,
) -> Result<Json<Interaction>, ApiError> {
    let interaction = app.use_cases.interaction.delete(id).await?;
    Ok(Json(interaction))
}

// =============================================================================
// Players
// =============================================================================

#[derive(Deserialize)]
struct CreatePlayerRequest {
    name: String,
    email: Option<String>,
    role: Option<String>,
}

#[derive(Deserialize)]
struct RegisterPlayerForm {
    name: String,
    pin: String,
}

#[derive(Deserialize)]
struct VerifyPlayerQuery {
    uuid: String,
    pin: String,
}

#[derive(Serialize)]
struct VerifiedPlayer {
    player_id: PlayerId,
}

async fn create_player(
    State(app): State<Arc<App>>,
    Json(body): Json<CreatePlayerRequest>,
) -> Result<Json<Player>, ApiError> {
    let player = app
        .use_cases
        .player
        .create(body.name, body.email, body.role)
        .await?;
    Ok(Json(player))
}

async fn list_players(State(app): State<Arc<App>>) -> Result<Json<Vec<Player>>, ApiError> {
    Ok(Json(app.use_cases.player.list().await?))
}

async fn register_player(
    State(app): State<Arc<App>>,
    Form(form): Form<RegisterPlayerForm>,
) -> Result<Json<Registration>, ApiError> {
    let registration = app.use_cases.player.register(form.name, form.pin).await?;
    Ok(Json(registration))
}

async fn verify_player(
    State(app): State<Arc<App>>,
    Query(query): Query<VerifyPlayerQuery>,
) -> Result<Json<VerifiedPlayer>, ApiError> {
    let player_id = app.use_cases.player.verify(&query.uuid, &query.pin).await?;
    Ok(Json(VerifiedPlayer { player_id }))
}

// =============================================================================
// Chat
// =============================================================================

#[derive(Deserialize)]
struct ChatForm {
    player_id: PlayerId,
    #[serde(default)]
    npc_id: NpcId,
    dialogue: String,
}

#[derive(Deserialize)]
struct StartChatQuery {
    player_id: PlayerId,
}

async fn chat_api(
    State(app): State<Arc<App>>,
    Form(form): Form<ChatForm>,
) -> Result<Json<ChatReply>, ApiError> {
    let reply = app
        .use_cases
        .chat
        .execute(form.player_id, form.npc_id, form.dialogue)
        .await?;
    Ok(Json(reply))
}

async fn chat_api_static(
    State(app): State<Arc<App>>,
    Form(form): Form<ChatForm>,
) -> Result<Json<ChatReply>, ApiError> {
    let npc_reply = app
        .use_cases
        .scripted
        .execute(form.player_id, &form.dialogue)
        .await?;
    Ok(Json(ChatReply {
        player_dialogue: form.dialogue,
        npc_reply,
    }))
}

async fn start_chat(
    State(app): State<Arc<App>>,
    Query(query): Query<StartChatQuery>,
) -> Redirect {
    let npc = app.use_cases.pick_npc.execute();
    tracing::debug!(player_id = %query.player_id, npc = ?npc, "Chat started");
    Redirect::temporary(&format!("{}?player_id={}", npc.chat_path(), query.player_id))
}

// =============================================================================
// Builds
// =============================================================================

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SaveBuildForm {
    #[serde(alias = "player_id")]
    player_id: PlayerId,
    #[serde(default)]
    chassis: String,
    #[serde(default)]
    engine: String,
    #[serde(default)]
    tires: String,
    #[serde(default)]
    front_wing: String,
    #[serde(default)]
    rear_wing: String,
    car_image: Option<String>,
}

impl From<SaveBuildForm> for BuildSelection {
    fn from(form: SaveBuildForm) -> Self {
        Self {
            chassis: form.chassis,
            engine: form.engine,
            tires: form.tires,
            front_wing: form.front_wing,
            rear_wing: form.rear_wing,
            car_image: form.car_image,
        }
    }
}

async fn save_car_build(
    State(app): State<Arc<App>>,
    Form(form): Form<SaveBuildForm>,
) -> Result<Json<StatusBody>, ApiError> {
    let player_id = form.player_id;
    app.use_cases.build.save(player_id, form.into()).await?;
    Ok(Json(StatusBody {
        status: "success",
        message: Some("Build saved successfully!"),
    }))
}

async fn get_builds(
    State(app): State<Arc<App>>,
    Path(player_id): Path<PlayerId>,
) -> Result<Json<Vec<CarBuild>>, ApiError> {
    Ok(Json(app.use_cases.build.list(player_id).await?))
}

async fn get_latest_build(
    State(app): State<Arc<App>>,
    Path(player_id): Path<PlayerId>,
) -> Result<Json<CarBuild>, ApiError> {
    let build = app
        .use_cases
        .build
        .latest(player_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No builds for player {player_id}")))?;
    Ok(Json(build))
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Unauthorized,
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    detail: &'a str,
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        use axum::http::StatusCode;

        let (status, detail) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.as_str()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.as_str()),
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized"),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
            }
        };
        (status, Json(ErrorBody { detail })).into_response()
    }
}

impl From<RepoError> for ApiError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::NotFound { .. } => ApiError::NotFound(e.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<InteractionError> for ApiError {
    fn from(e: InteractionError) -> Self {
        match e {
            InteractionError::Duplicate => ApiError::BadRequest(e.to_string()),
            InteractionError::NotFound(_)
            | InteractionError::NoneFound { .. }
            | InteractionError::PlayerNotFound(_) => ApiError::NotFound(e.to_string()),
            InteractionError::Repo(e) => e.into(),
        }
    }
}

impl From<ChatError> for ApiError {
    fn from(e: ChatError) -> Self {
        match e {
            ChatError::PlayerNotFound(_) => ApiError::NotFound(e.to_string()),
            ChatError::Repo(e) => e.into(),
        }
    }
}

impl From<PlayerError> for ApiError {
    fn from(e: PlayerError) -> Self {
        match e {
            PlayerError::NameTaken(_) | PlayerError::Invalid(_) | PlayerError::InvalidLogin => {
                ApiError::BadRequest(e.to_string())
            }
            PlayerError::Unauthorized => ApiError::Unauthorized,
            PlayerError::Repo(e) => e.into(),
        }
    }
}

impl From<BuildError> for ApiError {
    fn from(e: BuildError) -> Self {
        match e {
            BuildError::PlayerNotFound(_) => ApiError::NotFound(e.to_string()),
            BuildError::InvalidPart(_) => ApiError::BadRequest(e.to_string()),
            BuildError::Repo(e) => e.into(),
        }
    }
}

impl From<ScriptError> for ApiError {
    fn from(e: ScriptError) -> Self {
        match e {
            ScriptError::State(_) => ApiError::Internal(e.to_string()),
            ScriptError::Repo(e) => e.into(),
        }
    }
}
