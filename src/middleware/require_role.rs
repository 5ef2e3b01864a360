/// Role-gated JWT middleware
///
/// Runs the admin gate on every request in the wrapped scope. On success
/// the verified `Claims` are placed in request extensions for handlers to
/// read through `web::ReqData<Claims>`; on failure the request never
/// reaches a handler and the JSON rejection is returned as a normal
/// response, so outer middleware still sees it.

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage, ResponseError,
};
use futures::future::LocalBoxFuture;
use std::rc::Rc;

use crate::auth::{check_request, Role};
use crate::configuration::JwtSettings;
use crate::error::AppError;

pub struct RequireRole {
    jwt_config: JwtSettings,
    role: Role,
}

impl RequireRole {
    pub fn new(jwt_config: JwtSettings, role: Role) -> Self {
        Self { jwt_config, role }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireRoleService<S>;
    type Future = std::future::Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        std::future::ready(Ok(RequireRoleService {
            service: Rc::new(service),
            jwt_config: self.jwt_config.clone(),
            role: self.role,
        }))
    }
}

pub struct RequireRoleService<S> {
    service: Rc<S>,
    jwt_config: JwtSettings,
    role: Role,
}

impl<S, B> Service<ServiceRequest> for RequireRoleService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        match check_request(req.headers(), &self.jwt_config, self.role) {
            Ok(claims) => {
                tracing::debug!(
                    user_id = %claims.sub,
                    role = %claims.role,
                    path = %req.path(),
                    "Admin token accepted"
                );
                req.extensions_mut().insert(claims);

                let service = self.service.clone();
                Box::pin(async move {
                    service
                        .call(req)
                        .await
                        .map(ServiceResponse::map_into_left_body)
                })
            }
            Err(e) => {
                tracing::warn!(
                    method = %req.method(),
                    path = %req.path(),
                    reason = %e,
                    "Admin request rejected"
                );
                let response = ResponseError::error_response(&AppError::Auth(e));
                let rejected = req.into_response(response).map_into_right_body();
                Box::pin(async move { Ok(rejected) })
            }
        }
    }
}
