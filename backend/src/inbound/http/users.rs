//! Current-user profile handler.
//!
//! ```text
//! GET /users/me
//! ```

use actix_web::{get, web};

use crate::domain::{Error, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Return the signed-in user's profile.
#[utoipa::path(
    get,
    path = "/users/me",
    responses(
        (status = 200, description = "Current user", body = User),
        (status = 401, description = "User is not logged in", body = Error),
        (status = 503, description = "User store unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "currentUser",
    security(("SessionCookie" = []))
)]
#[get("/users/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<User>> {
    let user_id = session.require_user_id()?;
    let user = state.profile.fetch_profile(&user_id).await?;
    Ok(web::Json(user))
}

#[cfg(test)]
mod tests {
    use actix_session::SessionExt;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpRequest, HttpResponse, test as actix_test};
    use rstest::rstest;
    use serde_json::Value;

    use super::*;
    use crate::domain::{NOT_LOGGED_IN, UserId};
    use crate::inbound::http::test_utils::{MockPorts, sample_user, test_session_middleware};

    const USER_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

    async fn sign_in(req: HttpRequest) -> HttpResponse {
        match req.get_session().insert("user_id", USER_ID) {
            Ok(()) => HttpResponse::Ok().finish(),
            Err(_) => HttpResponse::InternalServerError().finish(),
        }
    }

    fn test_app(
        ports: MockPorts,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(ports.into_state()))
            .wrap(test_session_middleware())
            .route("/test/signin", web::get().to(sign_in))
            .service(current_user)
    }

    #[rstest]
    #[actix_web::test]
    async fn returns_profile_for_session_user() {
        let id = UserId::new(USER_ID).expect("fixture id");
        let mut ports = MockPorts::default();
        ports
            .profile
            .expect_fetch_profile()
            .withf(move |user_id| *user_id == id)
            .times(1)
            .return_once(move |_| Ok(sample_user(id)));
        let app = actix_test::init_service(test_app(ports)).await;

        let login = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/test/signin").to_request(),
        )
        .await;
        let cookie = login
            .response()
            .cookies()
            .find(|c| c.name() == "session")
            .expect("session cookie")
            .into_owned();

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/users/me")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = actix_test::read_body(response).await;
        let value: Value = serde_json::from_slice(&body).expect("response JSON");
        assert_eq!(value["_id"], USER_ID);
        assert_eq!(value["firstName"], "Full");
        assert_eq!(value["provider"], "local");
    }

    #[rstest]
    #[actix_web::test]
    async fn rejects_anonymous_requests() {
        let mut ports = MockPorts::default();
        ports.profile.expect_fetch_profile().never();
        let app = actix_test::init_service(test_app(ports)).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/users/me").to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = actix_test::read_body(response).await;
        let value: Value = serde_json::from_slice(&body).expect("response JSON");
        assert_eq!(value["message"], NOT_LOGGED_IN);
    }
}
