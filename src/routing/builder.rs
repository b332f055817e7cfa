//! Fluent route declaration.
//!
//! ```ignore
//! let router = ApiBuilder::new("/api")
//!     .get("/hello", hello)
//!     .get("/contacts/{id}", move |q: GetContactByIdQuery| store.find(q.id))
//!     .post("/contacts", move |c: CreateContactCommand| store.create(c.name))
//!     .after_each(|record| { tracing::info!(path = record.path()); Ok(()) })
//!     .build()?;
//! ```

use std::any::Any;
use std::sync::Arc;

use axum::Router;

use crate::dispatch::handler::Endpoint;
use crate::dispatch::{
    AsyncHandler, Blocking, BuildError, Deferred, Dispatcher, Handler, Pipeline, Reply, RouteInput,
};
use crate::docs::DescriptorSink;
use crate::hooks::{HookBus, HookResult, RouteResult};

use super::declaration::{BodyBinding, HttpVerb, RouteDeclaration};
use super::registry::RouteRegistry;
use super::template::normalize_path;

/// Accumulates route declarations and hooks, then binds them.
pub struct ApiBuilder {
    prefix: String,
    registry: RouteRegistry,
    hooks: HookBus,
    sink: Option<Arc<dyn DescriptorSink>>,
}

impl ApiBuilder {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: normalize_path(prefix),
            registry: RouteRegistry::new(),
            hooks: HookBus::new(),
            sink: None,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn registry(&self) -> &RouteRegistry {
        &self.registry
    }

    pub fn hooks(&self) -> &HookBus {
        &self.hooks
    }

    pub fn get<H, M>(self, path: &str, handler: H) -> Self
    where
        H: Handler<M>,
        M: 'static,
    {
        self.map(HttpVerb::Get, BodyBinding::None, path, Blocking::new(handler))
    }

    pub fn post<H, M>(self, path: &str, handler: H) -> Self
    where
        H: Handler<M>,
        M: 'static,
    {
        self.map(HttpVerb::Post, BodyBinding::Json, path, Blocking::new(handler))
    }

    pub fn put<H, M>(self, path: &str, handler: H) -> Self
    where
        H: Handler<M>,
        M: 'static,
    {
        self.map(HttpVerb::Put, BodyBinding::Json, path, Blocking::new(handler))
    }

    /// DELETE bound from path and query only.
    pub fn delete<H, M>(self, path: &str, handler: H) -> Self
    where
        H: Handler<M>,
        M: 'static,
    {
        self.map(HttpVerb::Delete, BodyBinding::None, path, Blocking::new(handler))
    }

    /// DELETE whose input is read from a JSON body first.
    pub fn delete_with_body<H, M>(self, path: &str, handler: H) -> Self
    where
        H: Handler<M>,
        M: 'static,
    {
        self.map(HttpVerb::Delete, BodyBinding::Json, path, Blocking::new(handler))
    }

    pub fn get_async<H, M>(self, path: &str, handler: H) -> Self
    where
        H: AsyncHandler<M>,
        M: 'static,
    {
        self.map(HttpVerb::Get, BodyBinding::None, path, Deferred::new(handler))
    }

    pub fn post_async<H, M>(self, path: &str, handler: H) -> Self
    where
        H: AsyncHandler<M>,
        M: 'static,
    {
        self.map(HttpVerb::Post, BodyBinding::Json, path, Deferred::new(handler))
    }

    pub fn put_async<H, M>(self, path: &str, handler: H) -> Self
    where
        H: AsyncHandler<M>,
        M: 'static,
    {
        self.map(HttpVerb::Put, BodyBinding::Json, path, Deferred::new(handler))
    }

    pub fn delete_async<H, M>(self, path: &str, handler: H) -> Self
    where
        H: AsyncHandler<M>,
        M: 'static,
    {
        self.map(HttpVerb::Delete, BodyBinding::None, path, Deferred::new(handler))
    }

    fn map<E: Endpoint>(mut self, verb: HttpVerb, body: BodyBinding, path: &str, endpoint: E) -> Self {
        let declaration = RouteDeclaration::new(
            verb,
            normalize_path(path),
            body,
            <E::Input as RouteInput>::spec(),
            <E::Output as Reply>::spec(),
            Arc::new(Pipeline::new(endpoint)),
        );
        self.registry.register(declaration);
        self
    }

    pub fn before_each<F>(mut self, hook: F) -> Self
    where
        F: Fn(&RouteResult<'_>) -> HookResult + Send + Sync + 'static,
    {
        self.hooks.add_before(hook);
        self
    }

    /// Before-hook restricted to requests whose input is a `T`.
    pub fn before_each_for<T, F>(mut self, hook: F) -> Self
    where
        T: Any,
        F: Fn(&RouteResult<'_>) -> HookResult + Send + Sync + 'static,
    {
        self.hooks.add_before_for::<T, F>(hook);
        self
    }

    pub fn after_each<F>(mut self, hook: F) -> Self
    where
        F: Fn(&RouteResult<'_>) -> HookResult + Send + Sync + 'static,
    {
        self.hooks.add_after(hook);
        self
    }

    /// After-hook restricted to requests whose input is a `T`.
    pub fn after_each_for<T, F>(mut self, hook: F) -> Self
    where
        T: Any,
        F: Fn(&RouteResult<'_>) -> HookResult + Send + Sync + 'static,
    {
        self.hooks.add_after_for::<T, F>(hook);
        self
    }

    /// Every bound route is also submitted to `sink`.
    pub fn with_descriptor_sink(mut self, sink: Arc<dyn DescriptorSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn build(self) -> Result<Router, BuildError> {
        Dispatcher::new(&self.prefix, self.registry, self.hooks, self.sink).bind()
    }
}
