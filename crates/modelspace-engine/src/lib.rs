pub mod acquire;
pub mod config;
pub mod error;
pub mod service;
pub mod session;

pub use config::ServiceConfig;
pub use error::{Result, SpaceError};
pub use service::{HttpModelSpaceService, ModelSpaceService};
pub use session::{InvocationSession, InvocationState, PreparedInvocation, ResultView};
