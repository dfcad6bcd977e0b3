pub mod catalog;
pub mod encoding;
pub mod events;
pub mod invocation;
pub mod output;
pub mod schema;
