use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Deserialize;
use tokio::net::TcpListener;

use crate::catalog::Visibility;
use crate::filter::{FacetChoice, FilterState, is_visible, visible_count};
use crate::html::Fragment;
use crate::render::{self, FacetButton, FacetGroup};
use crate::site::SiteContext;

type SharedContext = Arc<SiteContext>;

/// RFC 3986 unreserved characters stay readable in query strings.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

// ---------------------------------------------------------------------------
// Request parameters
// ---------------------------------------------------------------------------

/// Listing query parameters. Every request derives a fresh [`FilterState`]
/// from these; the server holds no mutable session state, so the url is the
/// whole session.
#[derive(Debug, Default, Deserialize)]
struct ListingParams {
    q: Option<String>,
    visibility: Option<String>,
    fork: Option<String>,
    archived: Option<String>,
    runtime: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct DetailParams {
    repo: Option<String>,
}

/// Rebuild the filter state a url stands for. Unrecognized values are
/// dropped rather than rejected, so a stale or hand-edited link still
/// renders a page.
fn state_from_params(params: &ListingParams) -> FilterState {
    let mut state = FilterState::new();
    if let Some(q) = params.q.as_deref() {
        state.set_search_term(q);
    }
    if let Some(v) = params.visibility.as_deref().and_then(Visibility::parse) {
        state.toggle(FacetChoice::Visibility(v));
    }
    if let Some(f) = params.fork.as_deref().and_then(parse_bool) {
        state.toggle(FacetChoice::Fork(f));
    }
    if let Some(a) = params.archived.as_deref().and_then(parse_bool) {
        state.toggle(FacetChoice::Archived(a));
    }
    if let Some(r) = params.runtime.as_deref() {
        let runtime = r.trim().to_lowercase();
        if !runtime.is_empty() {
            state.toggle(FacetChoice::Runtime(runtime));
        }
    }
    state
}

fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Encode `state` as a listing url, the inverse of [`state_from_params`].
fn listing_href(state: &FilterState) -> String {
    let mut pairs: Vec<String> = Vec::new();
    let term = state.search_term().trim();
    if !term.is_empty() {
        pairs.push(format!("q={}", encode(term)));
    }
    if let Some(v) = state.visibility() {
        pairs.push(format!("visibility={}", v.as_str()));
    }
    if let Some(f) = state.fork() {
        pairs.push(format!("fork={f}"));
    }
    if let Some(a) = state.archived() {
        pairs.push(format!("archived={a}"));
    }
    if let Some(r) = state.runtime() {
        pairs.push(format!("runtime={}", encode(r)));
    }
    if pairs.is_empty() {
        "/".to_owned()
    } else {
        format!("/?{}", pairs.join("&"))
    }
}

fn encode(value: &str) -> String {
    utf8_percent_encode(value, QUERY_VALUE).to_string()
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn listing(
    State(ctx): State<SharedContext>,
    Query(params): Query<ListingParams>,
) -> Html<String> {
    let state = state_from_params(&params);
    tracing::debug!("listing request, params {params:?}");
    Html(render_listing(&ctx, &state))
}

async fn detail(
    State(ctx): State<SharedContext>,
    Query(params): Query<DetailParams>,
) -> impl IntoResponse {
    let stylesheet = "/style.css";
    match params.repo.as_deref() {
        None | Some("") => (
            StatusCode::BAD_REQUEST,
            Html(render::error_page(
                &ctx.title,
                "No action specified.",
                "/",
                stylesheet,
            )),
        ),
        Some(repo) => match ctx.snapshot.find_by_repo(repo) {
            Some(record) => (
                StatusCode::OK,
                Html(render::detail_page(&ctx.title, record, "/", stylesheet)),
            ),
            None => {
                tracing::debug!("detail request for unknown repo {repo:?}");
                (
                    StatusCode::NOT_FOUND,
                    Html(render::error_page(
                        &ctx.title,
                        "Action not found.",
                        "/",
                        stylesheet,
                    )),
                )
            }
        },
    }
}

async fn stylesheet() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        render::STYLESHEET,
    )
}

async fn healthz(State(ctx): State<SharedContext>) -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "actions": ctx.snapshot.actions.len(),
        "lastUpdated": ctx.snapshot.last_updated,
    }))
}

// ---------------------------------------------------------------------------
// Page assembly
// ---------------------------------------------------------------------------

fn render_listing(ctx: &SiteContext, state: &FilterState) -> String {
    let shown = visible_count(&ctx.indexes, state);
    let total = ctx.indexes.len();

    let mut body = Fragment::new();
    body.fragment(&render::listing_header(
        &ctx.title,
        &ctx.snapshot,
        shown,
        total,
    ));
    body.fragment(&render::search_form(
        state.search_term(),
        &hidden_fields(state),
    ));
    let clear = if state.is_empty() { None } else { Some("/") };
    body.fragment(&render::facet_controls(&facet_groups(ctx, state), clear));

    for (record, entry) in ctx.snapshot.actions.iter().zip(&ctx.indexes) {
        if !is_visible(entry, state) {
            continue;
        }
        let href = format!("/action?repo={}", encode(&record.repo));
        body.fragment(&render::action_panel(record, entry, &href));
    }
    if shown == 0 {
        body.markup("<p class=\"count\">No actions match the current filters.</p>\n");
    }

    render::page(&ctx.title, "/style.css", &body)
}

/// Facet link rows. Counts come from the load-time tally and never change
/// with the filter; each href is the current state with that one value
/// toggled.
fn facet_groups(ctx: &SiteContext, state: &FilterState) -> Vec<FacetGroup> {
    let visibility = ctx
        .tally
        .visibility
        .iter()
        .map(|(&vis, &count)| {
            button(
                vis.label().to_owned(),
                count,
                state,
                FacetChoice::Visibility(vis),
            )
        })
        .collect();

    let flags = vec![
        button(
            "Forks".to_owned(),
            ctx.tally.forks,
            state,
            FacetChoice::Fork(true),
        ),
        button(
            "Archived".to_owned(),
            ctx.tally.archived,
            state,
            FacetChoice::Archived(true),
        ),
    ];

    let runtimes = ctx
        .tally
        .runtimes
        .iter()
        .map(|(family, &count)| {
            button(
                family.clone(),
                count,
                state,
                FacetChoice::Runtime(family.clone()),
            )
        })
        .collect();

    vec![
        FacetGroup {
            title: "Visibility",
            buttons: visibility,
        },
        FacetGroup {
            title: "Flags",
            buttons: flags,
        },
        FacetGroup {
            title: "Runtime",
            buttons: runtimes,
        },
    ]
}

fn button(label: String, count: usize, state: &FilterState, choice: FacetChoice) -> FacetButton {
    FacetButton {
        label,
        count,
        href: listing_href(&state.toggled(choice.clone())),
        active: state.is_active(&choice),
    }
}

/// Active facet selections as hidden form fields, so submitting a search
/// term keeps them.
fn hidden_fields(state: &FilterState) -> Vec<(&'static str, String)> {
    let mut fields = Vec::new();
    if let Some(v) = state.visibility() {
        fields.push(("visibility", v.as_str().to_owned()));
    }
    if let Some(f) = state.fork() {
        fields.push(("fork", f.to_string()));
    }
    if let Some(a) = state.archived() {
        fields.push(("archived", a.to_string()));
    }
    if let Some(r) = state.runtime() {
        fields.push(("runtime", r.to_owned()));
    }
    fields
}

// ---------------------------------------------------------------------------
// App wiring
// ---------------------------------------------------------------------------

pub fn app(ctx: SharedContext) -> Router {
    Router::new()
        .route("/", get(listing))
        .route("/action", get(detail))
        .route("/style.css", get(stylesheet))
        .route("/healthz", get(healthz))
        .with_state(ctx)
}

pub async fn serve(ctx: SiteContext, addr: SocketAddr) -> Result<()> {
    let router = app(Arc::new(ctx));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!("listening on http://{addr}");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving catalog")?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}
