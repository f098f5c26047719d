//! モデルモジュール

mod request;
mod response;

pub use request::{AnnotateRequest, CreateListRequest, ListCharacterRequest};
pub use response::{AnnotateResponse, CharacterDto, ListResponse, ListUpdateResponse, ListsResponse};
