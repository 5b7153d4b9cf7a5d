#![forbid(unsafe_code)]

//! `reqlog` - structured logging facade with request correlation.
//!
//! - Immutable, chainable records: every call returns a new value
//! - Correlation id carried on an explicit [`RequestContext`] and emitted under a
//!   configurable key
//! - JSON lines to stderr, a size-rotated daily file, or both
//!
//! # Example
//!
//! ```no_run
//! use reqlog::{Logger, LoggerConfig, OutputMode, RequestContext};
//!
//! let logger = Logger::with_config(
//!     LoggerConfig::new()
//!         .output_mode(OutputMode::Terminal)
//!         .request_id_key("trace_id"),
//! );
//!
//! let ctx = RequestContext::background().with_request_id("req-123");
//! logger
//!     .with_context(&ctx)
//!     .info("user logged in")
//!     .data("user_id", 123)
//!     .send();
//! // {"timestamp":"..","level":"INFO","caller":"src/main.rs:12","msg":"user logged in","trace_id":"req-123","user_id":123}
//!
//! logger.shutdown();
//! ```

pub mod config;
pub mod context;
pub mod engine;
mod error;
pub mod internal;
pub mod level;
pub mod logger;
pub mod output;

pub use config::{LoggerConfig, OutputMode, RotationConfig};
pub use context::{RequestContext, bind_request_id, request_id};
pub use engine::{Engine, EngineBuilder, FatalHook, ProcessExit, build_engine};
pub use error::Error;
pub use level::{Escalation, Level};
pub use logger::{Logger, Record};
pub use output::{FileOutput, LogRecord, Output, RotationPolicy, TerminalOutput};
