//! API module

mod handlers;
mod routes;
mod state;

pub use handlers::{
  delete_list, delete_list_character, get_character, get_list, get_lists, health_check, post_annotate,
  post_list, post_list_character,
};
pub use routes::{create_router, run_server};
pub use state::AppState;
