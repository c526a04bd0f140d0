//! visloc engine - request/response layer over the command store
//!
//! Provides `LocationRequester`, which turns "locate this" and "where is it"
//! into store primitives and owns lifecycle logging for those operations.

pub mod requester;

pub use requester::LocationRequester;
