//! Account actions.

use tracing::{info, warn};

use crate::api::FitpinApi;
use crate::session::SessionContext;
use crate::ClientError;

/// Forget the signed-in user.
pub fn logout(session: &mut SessionContext) {
    if let Some(email) = &session.email {
        info!(%email, "signed out");
    }
    session.sign_out();
}

/// Delete the account, then sign out.
pub async fn withdraw(api: &FitpinApi, session: &mut SessionContext) -> Result<(), ClientError> {
    let email = session.require_email()?.clone();
    if api.delete_member(&email).await? {
        info!(%email, "account deleted");
        logout(session);
        Ok(())
    } else {
        warn!(%email, "account deletion refused");
        Err(ClientError::rejected("account deletion was not confirmed"))
    }
}
