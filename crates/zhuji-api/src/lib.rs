//! zhuji-api crate
//!
//! Web server providing the character annotation pipeline as HTTP API.
//!
//! ## Endpoints
//! - `POST /annotate` - Annotate new characters and return their details
//! - `GET /characters/{character}` - Cached record of one character
//! - `GET /lists`, `POST /lists` - List names / create a list
//! - `GET /lists/{name}`, `DELETE /lists/{name}` - List contents / delete a list
//! - `POST /lists/{name}/characters` - Add a character to a list
//! - `DELETE /lists/{name}/characters/{character}` - Remove a character from a list
//! - `GET /health` - Health Check
//!
//! ## Usage Example
//! ```bash
//! curl -X POST http://127.0.0.1:5530/annotate \
//!   -H "Content-Type: application/json" \
//!   -d '{"text": "你好，世界"}'
//! ```

pub mod api;
pub mod config;
pub mod errors;
pub mod models;
pub mod service;

pub use api::AppState;
pub use config::Config;
pub use errors::{ApiError, ApiErrorKind};
pub use models::{AnnotateRequest, AnnotateResponse, CharacterDto};
pub use service::ZhujiApiServiceFull;
