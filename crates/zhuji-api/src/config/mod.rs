//! Config module

mod constants;
mod env;

pub use constants::{
  DEFAULT_BIND_ADDR, ENV_BIND_ADDR, ENV_DATA_DIR, ENV_DICT_PATH, ENV_LOG_LEVEL, MAX_TEXT_LENGTH,
};
pub use env::Config;
