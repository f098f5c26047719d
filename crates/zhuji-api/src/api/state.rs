//! API State Definition

use std::sync::Arc;

use crate::config::Config;
use crate::service::ZhujiApiService;

/// Application State
///
/// State shared across the entire server.
/// Contains configuration and service.
#[derive(Clone)]
pub struct AppState {
  /// Configuration
  pub config: Config,
  /// Annotation Service
  ///
  /// - Production: `Arc::new(ZhujiApiServiceFull::new(&config)?)`
  /// - Test: `Arc::new(StubZhujiApiService)`
  pub service: Arc<dyn ZhujiApiService>,
}

impl AppState {
  /// Creates a new AppState
  #[must_use]
  pub fn new(config: Config, service: Arc<dyn ZhujiApiService>) -> Self {
    Self { config, service }
  }
}
