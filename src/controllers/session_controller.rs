use std::sync::Arc;

use crate::services::identity_service::{IdentityProvider, SessionContext};
use crate::utils::errors::AppResult;

pub struct SessionController {
    identity: Arc<dyn IdentityProvider>,
}

impl SessionController {
    pub fn new(identity: Arc<dyn IdentityProvider>) -> Self {
        Self { identity }
    }

    /// Un único intento; el fallo se devuelve tal cual, sin reintentos
    pub async fn start(&self) -> AppResult<SessionContext> {
        let session = self.identity.sign_in_anonymously().await?;
        Ok(session)
    }
}
