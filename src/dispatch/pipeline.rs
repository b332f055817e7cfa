//! Per-request pipeline.
//!
//! # Responsibilities
//! - Build the input, run hooks, invoke the handler, serialize the output
//! - Report which step a failed request reached
//!
//! # Design Decisions
//! - The pipeline never catches handler or hook failures; they end the
//!   request and surface as server errors
//! - The input is only cloned for after-hooks when any are registered

use std::fmt;
use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use futures_util::future::BoxFuture;
use serde_json::Value;

use crate::hooks::{HookBus, HookPhase, RouteResult};
use crate::routing::RouteDeclaration;

use super::context::RequestContext;
use super::error::DispatchError;
use super::handler::{Endpoint, Reply, RouteInput};

/// Type-erased entry point stored on each route declaration.
pub trait Invoke: Send + Sync {
    fn invoke(
        &self,
        route: Arc<RouteDeclaration>,
        hooks: Arc<HookBus>,
        ctx: RequestContext,
    ) -> BoxFuture<'static, Result<Response, DispatchError>>;
}

/// Steps of one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestPhase {
    Matched,
    InputBuilt,
    BeforeHooksRun,
    HandlerInvoked,
    OutputSerialized,
    AfterHooksRun,
    Complete,
    Failed,
}

impl fmt::Display for RequestPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RequestPhase::Matched => "matched",
            RequestPhase::InputBuilt => "input_built",
            RequestPhase::BeforeHooksRun => "before_hooks_run",
            RequestPhase::HandlerInvoked => "handler_invoked",
            RequestPhase::OutputSerialized => "output_serialized",
            RequestPhase::AfterHooksRun => "after_hooks_run",
            RequestPhase::Complete => "complete",
            RequestPhase::Failed => "failed",
        };
        f.write_str(name)
    }
}

pub(crate) struct Pipeline<E> {
    endpoint: Arc<E>,
}

impl<E: Endpoint> Pipeline<E> {
    pub(crate) fn new(endpoint: E) -> Self {
        Self {
            endpoint: Arc::new(endpoint),
        }
    }
}

impl<E: Endpoint> Invoke for Pipeline<E> {
    fn invoke(
        &self,
        route: Arc<RouteDeclaration>,
        hooks: Arc<HookBus>,
        ctx: RequestContext,
    ) -> BoxFuture<'static, Result<Response, DispatchError>> {
        let endpoint = Arc::clone(&self.endpoint);
        Box::pin(async move {
            let mut phase = RequestPhase::Matched;
            let outcome = execute(&*endpoint, &route, &hooks, &ctx, &mut phase).await;
            match &outcome {
                Ok(_) => {
                    advance(&mut phase, RequestPhase::Complete);
                    tracing::debug!("Request complete");
                }
                Err(err) if err.is_client_error() => {
                    tracing::warn!(reached = %phase, code = err.code(), error = %err, "Request rejected");
                    advance(&mut phase, RequestPhase::Failed);
                }
                Err(err) => {
                    tracing::error!(reached = %phase, code = err.code(), error = %err, "Request failed");
                    advance(&mut phase, RequestPhase::Failed);
                }
            }
            outcome
        })
    }
}

async fn execute<E: Endpoint>(
    endpoint: &E,
    route: &RouteDeclaration,
    hooks: &HookBus,
    ctx: &RequestContext,
    phase: &mut RequestPhase,
) -> Result<Response, DispatchError> {
    let input = E::Input::build(ctx, route.body())?;
    let type_key = route.input().map(|spec| spec.type_key());
    advance(phase, RequestPhase::InputBuilt);

    {
        let record = RouteResult::new(ctx.verb, &ctx.matched_path).with_input(input.as_any(), type_key);
        hooks.run(HookPhase::Before, &record)?;
    }
    advance(phase, RequestPhase::BeforeHooksRun);

    let kept = hooks.has_after().then(|| input.clone());
    let output = endpoint.call(input).await;
    advance(phase, RequestPhase::HandlerInvoked);

    let result = output.into_result()?;
    let response = render(result.as_ref())?;
    advance(phase, RequestPhase::OutputSerialized);

    if let Some(input) = &kept {
        let record = RouteResult::new(ctx.verb, &ctx.matched_path)
            .with_input(input.as_any(), type_key)
            .with_result(result.as_ref());
        hooks.run(HookPhase::After, &record)?;
    }
    advance(phase, RequestPhase::AfterHooksRun);

    Ok(response)
}

fn advance(phase: &mut RequestPhase, next: RequestPhase) {
    tracing::trace!(from = %phase, to = %next, "Pipeline step");
    *phase = next;
}

/// JSON body for routes with output, empty `200` otherwise.
fn render(result: Option<&Value>) -> Result<Response, DispatchError> {
    let Some(value) = result else {
        return Ok(StatusCode::OK.into_response());
    };
    let body = serde_json::to_vec(value)?;
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))],
        body,
    )
        .into_response())
}

