//! Command/query dispatcher
//!
//! Each request type is bound to exactly one handler when the dispatcher is
//! built. Commands go in through [`Dispatcher::execute`], queries through
//! [`Dispatcher::ask`]; a query type cannot be registered or sent as a
//! command. Dispatching looks the handler up by the request's type, awaits
//! it in line and hands back whatever it returned. Nothing is queued.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{AppError, DispatchError};

/// A use case request. `Output` is what its handler returns on success.
pub trait Request: Send + 'static {
    type Output: Send + 'static;

    /// Stable name used in logs and wiring errors
    const NAME: &'static str;
}

/// Request that changes state
pub trait Command: Request {}

/// Request that only reads
pub trait Query: Request {}

/// Executes one request type
#[async_trait]
pub trait Handler<R: Request>: Send + Sync {
    async fn handle(&self, request: R) -> Result<R::Output, AppError>;
}

type ErasedHandler = Box<dyn Any + Send + Sync>;

/// Routes requests to their single registered handler
pub struct Dispatcher {
    handlers: HashMap<TypeId, ErasedHandler>,
}

impl Dispatcher {
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::default()
    }

    pub fn is_registered<R: Request>(&self) -> bool {
        self.handlers.contains_key(&TypeId::of::<R>())
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Run a state-changing request through its handler
    pub async fn execute<C: Command>(&self, command: C) -> Result<C::Output, AppError> {
        self.dispatch("command", command).await
    }

    /// Run a read-only request through its handler
    pub async fn ask<Q: Query>(&self, query: Q) -> Result<Q::Output, AppError> {
        self.dispatch("query", query).await
    }

    /// A missing handler is a wiring defect and comes back as
    /// [`DispatchError::NoHandler`]; it is never retried.
    async fn dispatch<R: Request>(
        &self,
        kind: &'static str,
        request: R,
    ) -> Result<R::Output, AppError> {
        let handler = self
            .handlers
            .get(&TypeId::of::<R>())
            .and_then(|h| h.downcast_ref::<Arc<dyn Handler<R>>>())
            .ok_or_else(|| {
                tracing::error!(request = R::NAME, kind, "no handler registered");
                DispatchError::NoHandler(R::NAME)
            })?;

        tracing::debug!(request = R::NAME, kind, "dispatching");
        handler.handle(request).await
    }
}

/// Collects handler registrations; see [`Dispatcher::builder`]
#[derive(Default)]
pub struct DispatcherBuilder {
    handlers: HashMap<TypeId, ErasedHandler>,
}

impl DispatcherBuilder {
    /// Bind `handler` to command type `C`. Fails if `C` already has one.
    pub fn register_command<C, H>(self, handler: H) -> Result<Self, DispatchError>
    where
        C: Command,
        H: Handler<C> + 'static,
    {
        self.insert::<C, H>(handler)
    }

    /// Bind `handler` to query type `Q`. Fails if `Q` already has one.
    pub fn register_query<Q, H>(self, handler: H) -> Result<Self, DispatchError>
    where
        Q: Query,
        H: Handler<Q> + 'static,
    {
        self.insert::<Q, H>(handler)
    }

    fn insert<R, H>(mut self, handler: H) -> Result<Self, DispatchError>
    where
        R: Request,
        H: Handler<R> + 'static,
    {
        let key = TypeId::of::<R>();
        if self.handlers.contains_key(&key) {
            return Err(DispatchError::DuplicateHandler(R::NAME));
        }

        let handler: Arc<dyn Handler<R>> = Arc::new(handler);
        self.handlers.insert(key, Box::new(handler));
        Ok(self)
    }

    /// Fail the build early if `R` has not been wired
    pub fn require<R: Request>(self) -> Result<Self, DispatchError> {
        if self.handlers.contains_key(&TypeId::of::<R>()) {
            Ok(self)
        } else {
            Err(DispatchError::NoHandler(R::NAME))
        }
    }

    pub fn build(self) -> Dispatcher {
        Dispatcher {
            handlers: self.handlers,
        }
    }
}
