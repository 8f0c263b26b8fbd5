use dioxus::prelude::*;

use ui::{AuthProvider, ToastProvider};
use views::{Home, Profile, SinglePost};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Home {},
    #[route("/post/:id")]
    SinglePost { id: String },
    #[route("/:slug")]
    Profile { slug: String },
}

const FAVICON: Asset = asset!("/assets/favicon.svg");

#[cfg(feature = "server")]
fn main() -> anyhow::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "web=info,api=info,tower_sessions=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tokio::runtime::Runtime::new()?.block_on(launch_server())
}

#[cfg(not(feature = "server"))]
fn main() {
    dioxus::launch(App);
}

#[cfg(feature = "server")]
async fn launch_server() -> anyhow::Result<()> {
    use anyhow::Context;
    use axum::routing::get;
    use dioxus::server::{DioxusRouterExt, ServeConfig};
    use tower_sessions::cookie::SameSite;
    use tower_sessions::{Expiry, SessionManagerLayer};
    use tower_sessions_sqlx_store::PostgresStore;

    dotenvy::dotenv().ok();

    let settings = api::settings::settings()?;

    let pool = api::db::get_pool()
        .await
        .context("Failed to connect to database")?;

    sqlx::migrate!("../api/migrations")
        .run(pool)
        .await
        .context("Failed to run migrations")?;

    let session_store = PostgresStore::new(pool.clone());
    session_store
        .migrate()
        .await
        .context("Failed to migrate session store")?;

    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(settings.session.secure)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::days(
            settings.session.expiry_days,
        )));

    // OAuth callbacks are plain routes; everything else is the Dioxus app
    let router = axum::Router::new()
        .route("/auth/{provider}/callback", get(oauth_callback))
        .serve_dioxus_application(ServeConfig::new(), App)
        .layer(session_layer);

    // Use the address from dx serve or default to localhost:8080
    let addr = dioxus::cli_config::fullstack_address_or_localhost();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router.into_make_service()).await?;
    Ok(())
}

/// Provider redirect target. Signs the user in and sends them home either way;
/// failures are only logged.
#[cfg(feature = "server")]
async fn oauth_callback(
    axum::extract::Path(provider): axum::extract::Path<String>,
    axum::extract::Query(params): axum::extract::Query<std::collections::HashMap<String, String>>,
    session: tower_sessions::Session,
) -> axum::response::Redirect {
    if let Err(e) = complete_sign_in(&provider, &params, &session).await {
        tracing::error!(%provider, "OAuth sign-in failed: {}", e);
    }
    axum::response::Redirect::to("/")
}

#[cfg(feature = "server")]
async fn complete_sign_in(
    provider: &str,
    params: &std::collections::HashMap<String, String>,
    session: &tower_sessions::Session,
) -> Result<(), api::ApiError> {
    use api::auth::{sign_in, OAuthFlow, Provider};
    use api::ApiError;

    let provider = Provider::from_name(provider)
        .ok_or_else(|| ApiError::NotFound(format!("Unknown provider: {provider}")))?;
    let code = params
        .get("code")
        .ok_or_else(|| ApiError::Internal("Callback missing code".to_string()))?;
    let state = params
        .get("state")
        .ok_or_else(|| ApiError::Internal("Callback missing state".to_string()))?;

    let user = OAuthFlow::new(provider)?.exchange_code(code, state).await?;
    sign_in(session, user.id).await?;
    tracing::info!(user_id = %user.id, provider = provider.name(), "Signed in");

    Ok(())
}

#[component]
fn App() -> Element {
    rsx! {
        document::Link { rel: "icon", href: FAVICON }

        ToastProvider {
            AuthProvider {
                Router::<Route> {}
            }
        }
    }
}
