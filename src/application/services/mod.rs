//! Business logic services for the application layer.

pub mod dispatch_service;
pub mod link_rewriter;

pub use dispatch_service::{DispatchService, Dispatcher};
pub use link_rewriter::{LinkRewriter, RewriteFailure, RewrittenBody};

#[cfg(test)]
pub use dispatch_service::MockDispatcher;
