//! Location requester with boundary logging.
//!
//! ## Logging Ownership
//!
//! The requester owns lifecycle logging for its operations:
//! - `log_op_start!` at entry
//! - `log_op_end!` on success
//! - `log_op_error!` on failure
//!
//! Every event of one call carries the same `request_id`; the store layer
//! below only uses `tracing::debug!()`.

use std::time::Instant;

use visloc_core::errors::{ExError, Result};
use visloc_core::model::{Command, Location, QueueKeys};
use visloc_core::ops::CommandStore;
use visloc_core::{log_op_end, log_op_error, log_op_start};
use visloc_core_types::schema::{
    OP_CLEAR_COMMANDS, OP_GET_LOCATION, OP_LOCATE, OP_PENDING_COMMANDS,
};
use visloc_core_types::{RequestContext, TraceId};

/// Producer side of the locate convention
///
/// Pushes `{"locate": thing}` commands onto the command queue and reads back
/// whatever location the counterpart last published. Holds nothing but the
/// store handle and the key names; every call is an independent request.
#[derive(Debug)]
pub struct LocationRequester<S: CommandStore> {
    store: S,
    keys: QueueKeys,
    trace_id: Option<TraceId>,
}

impl<S: CommandStore> LocationRequester<S> {
    /// Requester using the default key names
    pub fn new(store: S) -> Self {
        Self {
            store,
            keys: QueueKeys::default(),
            trace_id: None,
        }
    }

    /// Requester using custom key names
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the key names are empty or identical.
    pub fn with_keys(store: S, keys: QueueKeys) -> Result<Self> {
        keys.validate()?;
        Ok(Self {
            store,
            keys,
            trace_id: None,
        })
    }

    /// Tag every subsequent request with `trace_id`
    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }

    pub fn keys(&self) -> &QueueKeys {
        &self.keys
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Give the store handle back, ending the requester
    pub fn into_store(self) -> S {
        self.store
    }

    fn context(&self) -> RequestContext {
        let ctx = RequestContext::new();
        match &self.trace_id {
            Some(trace_id) => ctx.with_trace_id(trace_id.clone()),
            None => ctx,
        }
    }

    /// Ask the counterpart to locate `thing`
    ///
    /// Appends one encoded command to the tail of the command queue. `thing`
    /// is not checked against any list of known names.
    ///
    /// ## Returns
    ///
    /// Queue length after the push, as reported by the store.
    ///
    /// ## Errors
    ///
    /// - `Serialization`: the command could not be encoded
    /// - `WrongType`: the queue key holds something other than a list
    /// - `Connection` / `Timeout` / `ExternalService`: the store failed
    pub fn locate(&mut self, thing: &str) -> Result<u64> {
        let ctx = self.context();
        log_op_start!(
            OP_LOCATE,
            request_id = ctx.request_id.as_str(),
            trace_id = ctx.trace_str(),
            key = self.keys.commands.as_str(),
            thing = thing
        );
        let start = Instant::now();

        let queue_len = self.locate_impl(thing).map_err(|e| {
            let e = annotate(e, &ctx);
            log_op_error!(
                OP_LOCATE,
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                request_id = ctx.request_id.as_str()
            );
            e
        })?;

        log_op_end!(
            OP_LOCATE,
            duration_ms = start.elapsed().as_millis() as u64,
            request_id = ctx.request_id.as_str(),
            queue_len = queue_len
        );

        Ok(queue_len)
    }

    fn locate_impl(&mut self, thing: &str) -> Result<u64> {
        let payload = Command::locate(thing).encode()?;
        self.store.push_command(&self.keys.commands, &payload)
    }

    /// Drop every pending command
    ///
    /// Idempotent: clearing an absent queue is not an error.
    ///
    /// ## Returns
    ///
    /// 1 if a queue existed and was removed, 0 otherwise.
    ///
    /// ## Errors
    ///
    /// - `Connection` / `Timeout` / `ExternalService`: the store failed
    pub fn clear_commands(&mut self) -> Result<u64> {
        let ctx = self.context();
        log_op_start!(
            OP_CLEAR_COMMANDS,
            request_id = ctx.request_id.as_str(),
            trace_id = ctx.trace_str(),
            key = self.keys.commands.as_str()
        );
        let start = Instant::now();

        let removed = self
            .store
            .delete_key(&self.keys.commands)
            .map_err(|e| {
                let e = annotate(e, &ctx);
                log_op_error!(
                    OP_CLEAR_COMMANDS,
                    e.clone(),
                    duration_ms = start.elapsed().as_millis() as u64,
                    request_id = ctx.request_id.as_str()
                );
                e
            })?;

        log_op_end!(
            OP_CLEAR_COMMANDS,
            duration_ms = start.elapsed().as_millis() as u64,
            request_id = ctx.request_id.as_str(),
            removed = removed
        );

        Ok(removed)
    }

    /// Read the location the counterpart last published
    ///
    /// ## Returns
    ///
    /// - `Some(location)` when the key holds a well-formed location
    /// - `None` when nothing has been published yet
    ///
    /// ## Errors
    ///
    /// - `Serialization`: the key holds text that is not a location; this is
    ///   never reported as `None`
    /// - `WrongType`: the key holds a list
    /// - `Connection` / `Timeout` / `ExternalService`: the store failed
    pub fn get_location(&mut self) -> Result<Option<Location>> {
        let ctx = self.context();
        log_op_start!(
            OP_GET_LOCATION,
            request_id = ctx.request_id.as_str(),
            trace_id = ctx.trace_str(),
            key = self.keys.location.as_str()
        );
        let start = Instant::now();

        let location = self.get_location_impl().map_err(|e| {
            let e = annotate(e, &ctx);
            log_op_error!(
                OP_GET_LOCATION,
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                request_id = ctx.request_id.as_str()
            );
            e
        })?;

        match &location {
            Some(loc) => {
                log_op_end!(
                    OP_GET_LOCATION,
                    duration_ms = start.elapsed().as_millis() as u64,
                    request_id = ctx.request_id.as_str(),
                    present = true,
                    azimuth = loc.azimuth,
                    altitude = loc.altitude
                );
            }
            None => {
                log_op_end!(
                    OP_GET_LOCATION,
                    duration_ms = start.elapsed().as_millis() as u64,
                    request_id = ctx.request_id.as_str(),
                    present = false
                );
            }
        }

        Ok(location)
    }

    fn get_location_impl(&mut self) -> Result<Option<Location>> {
        let key = &self.keys.location;
        match self.store.get_value(key)? {
            None => Ok(None),
            Some(text) => Location::decode(key, &text).map(Some),
        }
    }

    /// Number of commands waiting in the queue, 0 when it is absent
    ///
    /// ## Errors
    ///
    /// - `WrongType`: the queue key holds something other than a list
    /// - `Connection` / `Timeout` / `ExternalService`: the store failed
    pub fn pending_commands(&mut self) -> Result<u64> {
        let ctx = self.context();
        log_op_start!(
            OP_PENDING_COMMANDS,
            request_id = ctx.request_id.as_str(),
            trace_id = ctx.trace_str(),
            key = self.keys.commands.as_str()
        );
        let start = Instant::now();

        let queue_len = self.store.list_len(&self.keys.commands).map_err(|e| {
            let e = annotate(e, &ctx);
            log_op_error!(
                OP_PENDING_COMMANDS,
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                request_id = ctx.request_id.as_str()
            );
            e
        })?;

        log_op_end!(
            OP_PENDING_COMMANDS,
            duration_ms = start.elapsed().as_millis() as u64,
            request_id = ctx.request_id.as_str(),
            queue_len = queue_len
        );

        Ok(queue_len)
    }
}

fn annotate(err: ExError, ctx: &RequestContext) -> ExError {
    let err = err.with_request_id(ctx.request_id.clone());
    match &ctx.trace_id {
        Some(trace_id) => err.with_trace_id(trace_id.clone()),
        None => err,
    }
}
