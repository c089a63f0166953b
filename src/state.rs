use std::sync::Arc;

use edubook_auth::{CookieTransport, CredentialTransport};
use edubook_config::{CorsConfig, JwtConfig};
use edubook_db::{CourseStore, EnrollmentStore, IdentityProvider, ProfileStore};

/// Shared, immutable application state cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub identity: Arc<dyn IdentityProvider>,
    pub profiles: Arc<dyn ProfileStore>,
    pub courses: Arc<dyn CourseStore>,
    pub enrollments: Arc<dyn EnrollmentStore>,
    pub transport: Arc<dyn CredentialTransport>,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
}

impl AppState {
    /// Builds state around one backend that serves every store interface.
    pub fn new<S>(store: Arc<S>, jwt_config: JwtConfig, cors_config: CorsConfig) -> Self
    where
        S: IdentityProvider + ProfileStore + CourseStore + EnrollmentStore + 'static,
    {
        Self {
            identity: store.clone(),
            profiles: store.clone(),
            courses: store.clone(),
            enrollments: store,
            transport: Arc::new(CookieTransport::from_config(&jwt_config)),
            jwt_config,
            cors_config,
        }
    }
}
