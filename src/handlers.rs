use crate::counter::Action;
use crate::errors::AppError;
use crate::models::{ActionRequest, SessionView};
use crate::quote::QuoteDisplay;
use crate::state::AppState;
use crate::ui::render_index;
use axum::{
    extract::State,
    response::{Html, Redirect},
    Form, Json,
};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let quote = state.quotes.current().await;
    let store = state.store.lock().await;
    Html(render_index(store.session(), &quote))
}

pub async fn get_state(State(state): State<AppState>) -> Json<SessionView> {
    let store = state.store.lock().await;
    Json(store.session().view())
}

pub async fn api_action(
    State(state): State<AppState>,
    Json(payload): Json<ActionRequest>,
) -> Result<Json<SessionView>, AppError> {
    let view = apply_action(&state, payload).await?;
    Ok(Json(view))
}

pub async fn form_action(
    State(state): State<AppState>,
    Form(payload): Form<ActionRequest>,
) -> Result<Redirect, AppError> {
    apply_action(&state, payload).await?;
    Ok(Redirect::to("/"))
}

pub async fn get_quote(State(state): State<AppState>) -> Json<QuoteDisplay> {
    Json(state.quotes.current().await)
}

pub async fn refresh_quote(State(state): State<AppState>) -> Json<QuoteDisplay> {
    Json(state.quotes.refresh().await)
}

pub async fn form_refresh_quote(State(state): State<AppState>) -> Redirect {
    state.quotes.refresh().await;
    Redirect::to("/")
}

async fn apply_action(state: &AppState, payload: ActionRequest) -> Result<SessionView, AppError> {
    let action = Action::try_from(payload)?;
    let mut store = state.store.lock().await;
    let session = store.dispatch(action).await?;
    Ok(session.view())
}
