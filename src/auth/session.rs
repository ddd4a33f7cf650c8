use std::sync::Arc;

use actix_web::{FromRequest, HttpMessage, HttpRequest, dev::Payload};
use futures::future::{Ready, ready};

use crate::client::SessionClient;
use crate::error::PortalError;
use crate::model::role::Role;
use crate::model::user::User;
use crate::session::SessionContext;

/// The signed-in session of the current request, placed in the request
/// extensions by the session middleware.
#[derive(Clone)]
pub struct AuthSession {
    context: Arc<SessionContext>,
    client: SessionClient,
}

impl AuthSession {
    pub fn new(context: Arc<SessionContext>, client: SessionClient) -> Self {
        Self { context, client }
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    pub fn user(&self) -> &User {
        self.context.user()
    }

    pub fn role(&self) -> Option<Role> {
        self.context.role()
    }

    /// Backend client carrying this session's token.
    pub fn client(&self) -> &SessionClient {
        &self.client
    }

    pub fn is_admin(&self) -> bool {
        self.role() == Some(Role::Admin)
    }

    pub fn require_admin(&self) -> Result<(), PortalError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(PortalError::Forbidden("Solo administradores".to_string()))
        }
    }

    /// Employee record id of an employee-role user.
    pub fn require_employee(&self) -> Result<u64, PortalError> {
        match (self.role(), self.context.employee_id()) {
            (Some(Role::Employee), Some(employee_id)) => Ok(employee_id),
            (Some(Role::Employee), None) => Err(PortalError::NotFound(
                "El usuario no tiene un empleado asociado".to_string(),
            )),
            _ => Err(PortalError::Forbidden("Solo empleados".to_string())),
        }
    }
}

impl FromRequest for AuthSession {
    type Error = PortalError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<AuthSession>()
                .cloned()
                .ok_or(PortalError::SessionExpired { redirect: true }),
        )
    }
}
