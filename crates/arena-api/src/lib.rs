pub mod error;
pub mod forum;
pub mod routes;
pub mod state;
pub mod tournament;

pub use error::ApiError;
pub use routes::router;
pub use state::{AppState, AppStateInner};
