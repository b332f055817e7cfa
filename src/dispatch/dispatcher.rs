//! Binding declarations into the host router.
//!
//! # Responsibilities
//! - Register one axum `MethodRouter` per path template
//! - Turn an axum request into a `RequestContext`
//! - Wrap each request in a span and record request metrics
//! - Submit every bound route to the descriptor sink, if any
//!
//! # Design Decisions
//! - The host does all path matching; templates are passed through as-is
//! - Duplicate (verb, path) pairs and templated prefixes are setup errors,
//!   not host panics

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    response::{IntoResponse, Response},
    routing::MethodRouter,
    Router,
};
use futures_util::future::{BoxFuture, FutureExt};
use tracing::Instrument;

use crate::binding::RawValues;
use crate::docs::DescriptorSink;
use crate::hooks::HookBus;
use crate::http::RequestIdExt;
use crate::observability::metrics;
use crate::routing::{normalize_path, RouteDeclaration, RouteRegistry};

use super::context::RequestContext;
use super::error::BuildError;

/// Wires a finished registry into an axum router.
pub struct Dispatcher {
    prefix: String,
    registry: RouteRegistry,
    hooks: Arc<HookBus>,
    sink: Option<Arc<dyn DescriptorSink>>,
}

impl Dispatcher {
    pub fn new(
        prefix: &str,
        registry: RouteRegistry,
        hooks: HookBus,
        sink: Option<Arc<dyn DescriptorSink>>,
    ) -> Self {
        Self {
            prefix: normalize_path(prefix),
            registry,
            hooks: Arc::new(hooks),
            sink,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Build the router. Routes are nested under the prefix unless it is `/`.
    pub fn bind(self) -> Result<Router, BuildError> {
        if self.prefix.contains(['{', '}', '*']) {
            return Err(BuildError::InvalidPrefix(self.prefix));
        }

        let mut api = Router::new();
        for (path, routes) in self.registry.grouped() {
            let mut verbs = HashSet::new();
            let mut method_router = MethodRouter::new();
            for route in routes {
                if !verbs.insert(route.verb()) {
                    return Err(BuildError::DuplicateRoute {
                        verb: route.verb(),
                        path: self.full_path(path),
                    });
                }
                if let Some(sink) = &self.sink {
                    sink.submit(&self.prefix, route);
                }
                method_router = method_router.on(route.verb().method_filter(), self.handler_for(route));
            }
            api = api.route(path, method_router);
        }

        tracing::info!(
            prefix = %self.prefix,
            routes = self.registry.len(),
            "API routes bound"
        );

        if self.prefix == "/" {
            Ok(api)
        } else {
            Ok(Router::new().nest(&self.prefix, api))
        }
    }

    fn full_path(&self, path: &str) -> String {
        if self.prefix == "/" {
            path.to_string()
        } else if path == "/" {
            self.prefix.clone()
        } else {
            format!("{}{}", self.prefix, path)
        }
    }

    fn handler_for(
        &self,
        route: &Arc<RouteDeclaration>,
    ) -> impl Fn(Request) -> BoxFuture<'static, Response> + Clone + Send + Sync + 'static {
        let route = Arc::clone(route);
        let hooks = Arc::clone(&self.hooks);
        let full_path: Arc<str> = Arc::from(self.full_path(route.path()));
        move |request: Request| {
            let route = Arc::clone(&route);
            let hooks = Arc::clone(&hooks);
            let full_path = Arc::clone(&full_path);
            dispatch(route, hooks, full_path, request).boxed()
        }
    }
}

async fn dispatch(
    route: Arc<RouteDeclaration>,
    hooks: Arc<HookBus>,
    full_path: Arc<str>,
    request: Request,
) -> Response {
    let start = Instant::now();
    let verb = route.verb();

    let ctx = match context_from(&route, &full_path, request).await {
        Ok(ctx) => ctx,
        Err(rejection) => {
            metrics::record_request(verb.as_str(), &full_path, rejection.status().as_u16(), start);
            return rejection;
        }
    };

    let span = tracing::info_span!(
        "route",
        verb = %verb,
        path = %full_path,
        request_id = ctx.request_id.as_deref().unwrap_or("unknown"),
    );
    let response = match route
        .invoker()
        .invoke(Arc::clone(&route), hooks, ctx)
        .instrument(span)
        .await
    {
        Ok(response) => response,
        Err(err) => err.into_response(),
    };

    metrics::record_request(verb.as_str(), &full_path, response.status().as_u16(), start);
    response
}

async fn context_from(
    route: &RouteDeclaration,
    full_path: &str,
    request: Request,
) -> Result<RequestContext, Response> {
    let (mut parts, body) = request.into_parts();

    let path_values = match Path::<Vec<(String, String)>>::from_request_parts(&mut parts, &()).await {
        Ok(Path(pairs)) => RawValues::from_pairs(pairs),
        Err(rejection) if !route.placeholders().is_empty() => return Err(rejection.into_response()),
        Err(_) => RawValues::new(),
    };
    let query_values = RawValues::from_query(parts.uri.query());
    let request_id = parts.headers.request_id().map(str::to_string);

    let body = if route.binds_body() {
        Bytes::from_request(Request::from_parts(parts, body), &())
            .await
            .map_err(IntoResponse::into_response)?
    } else {
        Bytes::new()
    };

    Ok(RequestContext::new(route.verb(), full_path)
        .with_path_values(path_values)
        .with_query_values(query_values)
        .with_body(body)
        .with_request_id(request_id))
}
