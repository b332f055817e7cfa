//! Ordered before/after callback lists.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::dispatch::DispatchError;

use super::record::RouteResult;

/// Error type hooks and handlers may fail with.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Outcome of one hook invocation.
pub type HookResult = Result<(), BoxError>;

type Callback = Arc<dyn Fn(&RouteResult<'_>) -> HookResult + Send + Sync>;

/// When a hook runs relative to the handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookPhase {
    Before,
    After,
}

impl fmt::Display for HookPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HookPhase::Before => f.write_str("before"),
            HookPhase::After => f.write_str("after"),
        }
    }
}

/// One registered callback.
#[derive(Clone)]
pub struct HookRegistration {
    filter: Option<&'static str>,
    callback: Callback,
}

impl HookRegistration {
    /// Input type name the hook is restricted to, if any.
    pub fn filter(&self) -> Option<&'static str> {
        self.filter
    }
}

impl fmt::Debug for HookRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookRegistration")
            .field("filter", &self.filter)
            .finish_non_exhaustive()
    }
}

/// Before and after hook lists.
///
/// Each phase is a single list in registration order. Filtered hooks sit in
/// the same list as global ones and are skipped when the input type differs.
#[derive(Debug, Default, Clone)]
pub struct HookBus {
    before: Vec<HookRegistration>,
    after: Vec<HookRegistration>,
}

impl HookBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_before<F>(&mut self, callback: F)
    where
        F: Fn(&RouteResult<'_>) -> HookResult + Send + Sync + 'static,
    {
        self.before.push(global(callback));
    }

    /// Before-hook that only runs when the input is a `T`.
    pub fn add_before_for<T, F>(&mut self, callback: F)
    where
        T: Any,
        F: Fn(&RouteResult<'_>) -> HookResult + Send + Sync + 'static,
    {
        self.before.push(filtered::<T, F>(callback));
    }

    pub fn add_after<F>(&mut self, callback: F)
    where
        F: Fn(&RouteResult<'_>) -> HookResult + Send + Sync + 'static,
    {
        self.after.push(global(callback));
    }

    /// After-hook that only runs when the input is a `T`.
    pub fn add_after_for<T, F>(&mut self, callback: F)
    where
        T: Any,
        F: Fn(&RouteResult<'_>) -> HookResult + Send + Sync + 'static,
    {
        self.after.push(filtered::<T, F>(callback));
    }

    pub fn hooks(&self, phase: HookPhase) -> &[HookRegistration] {
        match phase {
            HookPhase::Before => &self.before,
            HookPhase::After => &self.after,
        }
    }

    pub fn has_after(&self) -> bool {
        !self.after.is_empty()
    }

    /// Run every hook of `phase` in order; the first failure stops the rest.
    pub fn run(&self, phase: HookPhase, record: &RouteResult<'_>) -> Result<(), DispatchError> {
        for hook in self.hooks(phase) {
            (hook.callback)(record).map_err(|source| DispatchError::Hook { phase, source })?;
        }
        Ok(())
    }
}

fn global<F>(callback: F) -> HookRegistration
where
    F: Fn(&RouteResult<'_>) -> HookResult + Send + Sync + 'static,
{
    HookRegistration {
        filter: None,
        callback: Arc::new(callback),
    }
}

fn filtered<T, F>(callback: F) -> HookRegistration
where
    T: Any,
    F: Fn(&RouteResult<'_>) -> HookResult + Send + Sync + 'static,
{
    HookRegistration {
        filter: Some(std::any::type_name::<T>()),
        callback: Arc::new(move |record: &RouteResult<'_>| {
            if record.input_is::<T>() {
                callback(record)
            } else {
                Ok(())
            }
        }),
    }
}
