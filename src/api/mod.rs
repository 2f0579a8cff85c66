//! api
//!
//! The `/gitapi` surface: config entries and working tree status.
//!
//! # Modules
//!
//! - `handlers`: [`GitApi`] handlers and the [`GitApi::dispatch`] router
//! - [`location`]: Route prefixes and link builders
//! - `model`: JSON response bodies
//! - `error`: [`ApiError`] and its status code mapping
//!
//! # Example
//!
//! ```
//! use gitapi::api::{GitApi, Method};
//! use gitapi::provider::mock::{MockProvider, MockRepo};
//!
//! # tokio_test::block_on(async {
//! let provider = MockProvider::new()
//!     .with_repo("/file/project/", MockRepo::new().config("[user]\n\tname = Ada\n"));
//! let api = GitApi::new(provider);
//!
//! let response = api
//!     .dispatch(Method::Get, "/gitapi/config/user.name/clone/file/project/", None, None)
//!     .await;
//! assert_eq!(response.status, 200);
//! assert_eq!(response.body["Value"][0], "Ada");
//! # });
//! ```

mod error;
mod handlers;
pub mod location;
mod model;

pub use error::ApiError;
pub use handlers::{ApiResponse, ConfigTarget, GitApi, Method};
pub use model::{ConfigEntryJson, ConfigListJson, FileGitJson, FileJson, StatusJson};
