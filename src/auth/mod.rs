pub mod handlers;
pub mod middleware;
pub mod policy;
pub mod session;
