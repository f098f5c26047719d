//! Service module

mod zhuji_api_service;

pub use zhuji_api_service::{ZhujiApiService, ZhujiApiServiceFull, parse_character};
