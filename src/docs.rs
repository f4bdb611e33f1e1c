use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use skillswap_core::{ErrorKind, ErrorResponse, ResponseStatus};
use skillswap_models::{
    AuthResponse, CreateSwapRequestDto, LoginRequest, PublicProfile, SignupDto, SocialLinks,
    SwapRequestData, SwapRequestResponse, SwapRequestView, SwapRequestsData,
    SwapRequestsResponse, SwapStatus, UpdateProfileDto, UpdateSwapStatusDto, User, UserData,
    UserRef, UserResponse, UserSummary, UsersData, UsersResponse,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::signup,
        crate::modules::auth::controller::login,
        crate::modules::users::controller::get_users,
        crate::modules::users::controller::get_me,
        crate::modules::users::controller::update_me,
        crate::modules::swap_requests::controller::create_swap_request,
        crate::modules::swap_requests::controller::get_received,
        crate::modules::swap_requests::controller::get_sent,
        crate::modules::swap_requests::controller::update_swap_request,
    ),
    components(
        schemas(
            ResponseStatus,
            ErrorKind,
            ErrorResponse,
            SignupDto,
            LoginRequest,
            AuthResponse,
            User,
            UserData,
            UserResponse,
            SocialLinks,
            PublicProfile,
            UsersData,
            UsersResponse,
            UpdateProfileDto,
            UserSummary,
            UserRef,
            SwapStatus,
            SwapRequestView,
            SwapRequestData,
            SwapRequestResponse,
            SwapRequestsData,
            SwapRequestsResponse,
            CreateSwapRequestDto,
            UpdateSwapStatusDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Signup and login"),
        (name = "Users", description = "User directory and self-service profile"),
        (name = "Swap Requests", description = "Sending and answering skill swap requests")
    ),
    info(
        title = "SkillSwap API",
        version = "0.1.0",
        description = "Skill exchange marketplace: find people, propose swaps, trade contact details on acceptance.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for expected in [
            "/api/auth/signup",
            "/api/auth/login",
            "/api/users",
            "/api/users/me",
            "/api/swap-requests",
            "/api/swap-requests/received",
            "/api/swap-requests/sent",
            "/api/swap-requests/{id}",
        ] {
            assert!(paths.contains(&expected), "missing {expected}");
        }
    }
}
