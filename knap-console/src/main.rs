use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::Html,
    routing::get,
    Router,
};
use kube::ResourceExt;
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tracing::{error, info};

use knap_common::Appengine;
use knap_console::config::KnapConfig;
use knap_console::error::ApiError;
use knap_console::forms::{CreateEngineForm, NameQuery, UpdateEngineForm};
use knap_console::kubernetes::{engines, K8sClient};
use knap_console::views::ViewRenderer;
use knap_console::{logging, output, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = KnapConfig::load();

    // Initialize logging
    logging::init(&config.logging)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    if let Err(e) = config.validate() {
        error!("Configuration validation failed: {}", e);
        return Err(anyhow::anyhow!("Invalid configuration: {}", e));
    }
    info!("Configuration loaded successfully");
    let config = Arc::new(config);

    // Connect to the cluster once; handlers only borrow the handle, so a
    // failing request can never take the process down with it
    let k8s = K8sClient::from_settings(&config.kubernetes)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to build Kubernetes client: {}", e))?;
    info!("Kubernetes client ready for namespace {}", k8s.namespace());

    // Load all templates up front; a malformed template aborts startup
    let views = ViewRenderer::from_dir(&config.paths.views)?;
    info!(
        "Loaded {} view templates from {:?}",
        views.template_names().len(),
        config.paths.views
    );

    let state = Arc::new(AppState {
        config: config.clone(),
        k8s: Arc::new(k8s),
        views: Arc::new(views),
    });

    // Build the app: rendered pages plus static status icons
    let app = Router::new()
        .merge(page_routes())
        .merge(engine_routes())
        .with_state(state)
        .nest_service("/img", ServeDir::new(&config.paths.assets));

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Knap console listening on {}", addr);

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// =============================================================================
// Route Builder Functions
// =============================================================================

/// Build the static page routes (index, create form, template picker, hello)
fn page_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(index_page))
        .route("/create", get(create_page))
        .route("/templates", get(templates_page))
        .route("/hello", get(hello_page))
}

/// Build the engine CRUD routes
fn engine_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Three named list views over one query
        .route("/list", get(list_page))
        .route("/spaces", get(spaces_page))
        .route("/services", get(services_page))
        // Single-engine pages
        .route("/get", get(get_page))
        .route("/edit", get(edit_page))
        // Mutations, submitted as GET by the forms
        .route("/createnew", get(create_new))
        .route("/getedit", get(get_edit))
        .route("/delete", get(delete_page))
}

// =============================================================================
// Page handlers
// =============================================================================

async fn index_page(State(state): State<Arc<AppState>>) -> Result<Html<String>, ApiError> {
    render_static(&state, "index")
}

async fn create_page(State(state): State<Arc<AppState>>) -> Result<Html<String>, ApiError> {
    render_static(&state, "create")
}

async fn templates_page(State(state): State<Arc<AppState>>) -> Result<Html<String>, ApiError> {
    render_static(&state, "templates")
}

/// Greet with the name of the first engine in the namespace
async fn hello_page(State(state): State<Arc<AppState>>) -> Result<Html<String>, ApiError> {
    let engines = engines::list_engines(&state.k8s).await?;
    output::print_engine_table(&engines);

    let first = engines
        .first()
        .map(|e| e.name_any())
        .unwrap_or_else(|| "-".to_string());

    let html = state.views.render("hello", &json!({ "name": first }))?;
    Ok(Html(html))
}

/// Render a view that takes no data beyond the helpers
fn render_static(state: &AppState, view: &str) -> Result<Html<String>, ApiError> {
    let html = state.views.render(view, &json!({}))?;
    Ok(Html(html))
}

// =============================================================================
// Engine handlers
// =============================================================================

async fn list_page(State(state): State<Arc<AppState>>) -> Result<Html<String>, ApiError> {
    render_engine_list(&state, "list").await
}

async fn spaces_page(State(state): State<Arc<AppState>>) -> Result<Html<String>, ApiError> {
    render_engine_list(&state, "spaces").await
}

async fn services_page(State(state): State<Arc<AppState>>) -> Result<Html<String>, ApiError> {
    render_engine_list(&state, "services").await
}

/// One namespace-wide query backs the three named list views
async fn render_engine_list(state: &AppState, view: &str) -> Result<Html<String>, ApiError> {
    let engines = engines::list_engines(&state.k8s).await?;

    // Operator-facing summary on the process console
    output::print_engine_table(&engines);

    info!(count = engines.len(), view, "Listed engines");

    let html = state.views.render(
        view,
        &json!({
            "engines": engines,
            "namespace": state.k8s.namespace(),
        }),
    )?;
    Ok(Html(html))
}

async fn get_page(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NameQuery>,
) -> Result<Html<String>, ApiError> {
    let engine = engines::get_engine(&state.k8s, &query.name).await?;

    let html = state.views.render("detail", &json!({ "engine": engine }))?;
    Ok(Html(html))
}

async fn edit_page(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NameQuery>,
) -> Result<Html<String>, ApiError> {
    let engine = engines::get_engine(&state.k8s, &query.name).await?;

    let html = state.views.render("edit", &json!({ "engine": engine }))?;
    Ok(Html(html))
}

async fn create_new(
    State(state): State<Arc<AppState>>,
    Query(form): Query<CreateEngineForm>,
) -> Result<Html<String>, ApiError> {
    let name = form.engine_name();
    let spec = form.into_spec()?;

    let created = engines::create_engine(&state.k8s, Appengine::new(&name, spec)).await?;
    info!(engine = %name, "Created engine");

    let html = state
        .views
        .render("created", &json!({ "name": name, "engine": created }))?;
    Ok(Html(html))
}

async fn get_edit(
    State(state): State<Arc<AppState>>,
    Query(form): Query<UpdateEngineForm>,
) -> Result<Html<String>, ApiError> {
    let name = form.engine_name();

    let mut engine = engines::get_engine(&state.k8s, &name).await?;
    form.apply_to(&mut engine.spec)?;

    let updated = engines::update_engine(&state.k8s, engine).await?;
    info!(engine = %name, "Updated engine");

    let html = state
        .views
        .render("updated", &json!({ "name": name, "engine": updated }))?;
    Ok(Html(html))
}

async fn delete_page(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NameQuery>,
) -> Result<Html<String>, ApiError> {
    let engine = engines::get_engine(&state.k8s, &query.name).await?;
    let app_name = engine.spec.app_name.clone();

    engines::delete_engine(&state.k8s, &query.name).await?;
    info!(engine = %query.name, "Deleted engine");

    let html = state
        .views
        .render("deleted", &json!({ "name": query.name, "appName": app_name }))?;
    Ok(Html(html))
}
