//! Handler signatures accepted by the route builder.
//!
//! # Responsibilities
//! - Accept plain functions and closures taking zero or one input
//! - Accept synchronous results and futures
//! - Classify inputs (`RouteInput`) and outputs (`Reply`)
//!
//! # Design Decisions
//! - Arity is selected with marker types, so `fn() -> R` and `fn(I) -> R`
//!   share one builder method
//! - Sync and async handlers use separate builder methods; a sync handler
//!   runs inline when the pipeline reaches it

use std::any::Any;
use std::future::Future;
use std::marker::PhantomData;

use futures_util::future::{self, BoxFuture, FutureExt};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::binding::{decode_body, materialize};
use crate::hooks::BoxError;
use crate::routing::{BodyBinding, InputSpec, OutputSpec};
use crate::shape::{shape_of, Shape};

use super::context::RequestContext;
use super::error::DispatchError;

/// A value the pipeline can build from a request.
///
/// Implemented for every `Shape` that is also `Default + Clone +
/// DeserializeOwned`, and for `()` (no input).
pub trait RouteInput: Clone + Send + Sync + 'static {
    fn spec() -> Option<InputSpec>;

    fn build(ctx: &RequestContext, body: BodyBinding) -> Result<Self, DispatchError>;

    /// Type-erased view for hooks; `None` when there is no input.
    fn as_any(&self) -> Option<&(dyn Any + Send + Sync)>;
}

impl<T> RouteInput for T
where
    T: Shape + Default + Clone + DeserializeOwned,
{
    fn spec() -> Option<InputSpec> {
        Some(InputSpec::of::<T>())
    }

    fn build(ctx: &RequestContext, body: BodyBinding) -> Result<Self, DispatchError> {
        let shape = shape_of::<T>();
        let start = match body {
            BodyBinding::Json => decode_body(&shape, &ctx.body)?,
            BodyBinding::None => T::default(),
        };
        Ok(materialize(&shape, start, &ctx.path_values, &ctx.query_values)?)
    }

    fn as_any(&self) -> Option<&(dyn Any + Send + Sync)> {
        Some(self)
    }
}

impl RouteInput for () {
    fn spec() -> Option<InputSpec> {
        None
    }

    fn build(_: &RequestContext, _: BodyBinding) -> Result<Self, DispatchError> {
        Ok(())
    }

    fn as_any(&self) -> Option<&(dyn Any + Send + Sync)> {
        None
    }
}

/// A handler result the pipeline can serialize.
pub trait Reply: Send + 'static {
    fn spec() -> Option<OutputSpec>;

    /// Serialized result; `None` for routes without output.
    fn into_result(self) -> Result<Option<Value>, DispatchError>;
}

impl<T> Reply for T
where
    T: Shape + Serialize,
{
    fn spec() -> Option<OutputSpec> {
        Some(OutputSpec::of::<T>())
    }

    fn into_result(self) -> Result<Option<Value>, DispatchError> {
        Ok(Some(serde_json::to_value(&self)?))
    }
}

impl Reply for () {
    fn spec() -> Option<OutputSpec> {
        None
    }

    fn into_result(self) -> Result<Option<Value>, DispatchError> {
        Ok(None)
    }
}

impl<T, E> Reply for Result<T, E>
where
    T: Reply,
    E: Into<BoxError> + Send + 'static,
{
    fn spec() -> Option<OutputSpec> {
        T::spec()
    }

    fn into_result(self) -> Result<Option<Value>, DispatchError> {
        match self {
            Ok(value) => value.into_result(),
            Err(err) => Err(DispatchError::Handler(err.into())),
        }
    }
}

/// Synchronous handler; `M` selects the arity.
pub trait Handler<M>: Send + Sync + 'static {
    type Input: RouteInput;
    type Output: Reply;

    fn call(&self, input: Self::Input) -> Self::Output;
}

impl<F, R> Handler<()> for F
where
    F: Fn() -> R + Send + Sync + 'static,
    R: Reply,
{
    type Input = ();
    type Output = R;

    fn call(&self, _: ()) -> R {
        self()
    }
}

impl<F, I, R> Handler<(I,)> for F
where
    F: Fn(I) -> R + Send + Sync + 'static,
    I: RouteInput,
    R: Reply,
{
    type Input = I;
    type Output = R;

    fn call(&self, input: I) -> R {
        self(input)
    }
}

/// Handler returning a future; `M` selects the arity.
pub trait AsyncHandler<M>: Send + Sync + 'static {
    type Input: RouteInput;
    type Output: Reply;

    fn call(&self, input: Self::Input) -> BoxFuture<'static, Self::Output>;
}

impl<F, Fut, R> AsyncHandler<()> for F
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: Reply,
{
    type Input = ();
    type Output = R;

    fn call(&self, _: ()) -> BoxFuture<'static, R> {
        self().boxed()
    }
}

impl<F, I, Fut, R> AsyncHandler<(I,)> for F
where
    F: Fn(I) -> Fut + Send + Sync + 'static,
    I: RouteInput,
    Fut: Future<Output = R> + Send + 'static,
    R: Reply,
{
    type Input = I;
    type Output = R;

    fn call(&self, input: I) -> BoxFuture<'static, R> {
        self(input).boxed()
    }
}

/// Common form of sync and async handlers used by the pipeline.
pub(crate) trait Endpoint: Send + Sync + 'static {
    type Input: RouteInput;
    type Output: Reply;

    fn call(&self, input: Self::Input) -> BoxFuture<'static, Self::Output>;
}

pub(crate) struct Blocking<H, M> {
    handler: H,
    _marker: PhantomData<fn() -> M>,
}

impl<H, M> Blocking<H, M> {
    pub(crate) fn new(handler: H) -> Self {
        Self {
            handler,
            _marker: PhantomData,
        }
    }
}

impl<H, M> Endpoint for Blocking<H, M>
where
    H: Handler<M>,
    M: 'static,
{
    type Input = H::Input;
    type Output = H::Output;

    fn call(&self, input: Self::Input) -> BoxFuture<'static, Self::Output> {
        future::ready(self.handler.call(input)).boxed()
    }
}

pub(crate) struct Deferred<H, M> {
    handler: H,
    _marker: PhantomData<fn() -> M>,
}

impl<H, M> Deferred<H, M> {
    pub(crate) fn new(handler: H) -> Self {
        Self {
            handler,
            _marker: PhantomData,
        }
    }
}

impl<H, M> Endpoint for Deferred<H, M>
where
    H: AsyncHandler<M>,
    M: 'static,
{
    type Input = H::Input;
    type Output = H::Output;

    fn call(&self, input: Self::Input) -> BoxFuture<'static, Self::Output> {
        self.handler.call(input)
    }
}
