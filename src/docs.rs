use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use campus_auth::Role;
use campus_core::{ListResponse, PaginationMeta};
use campus_models::{
    AuthResponse, Class, CreateClassDto, CreateMemberDto, CreateSchoolDto, CreateSubjectDto,
    LoginRequest, RegisterSuperAdminRequest, School, Subject, UpdateClassDto, UpdateSchoolDto,
    UpdateSubjectDto, User,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register_super_admin,
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::profile,
        crate::modules::auth::controller::deactivate_admin,
        crate::modules::schools::controller::create_school,
        crate::modules::schools::controller::get_schools,
        crate::modules::schools::controller::get_school,
        crate::modules::schools::controller::update_school,
        crate::modules::schools::controller::delete_school,
        crate::modules::users::controller::create_member,
        crate::modules::users::controller::get_members,
        crate::modules::users::controller::get_member,
        crate::modules::users::controller::delete_member,
        crate::modules::classes::controller::create_class,
        crate::modules::classes::controller::get_classes,
        crate::modules::classes::controller::get_class,
        crate::modules::classes::controller::update_class,
        crate::modules::classes::controller::delete_class,
        crate::modules::subjects::controller::create_subject,
        crate::modules::subjects::controller::get_subjects,
        crate::modules::subjects::controller::get_subject,
        crate::modules::subjects::controller::update_subject,
        crate::modules::subjects::controller::delete_subject,
    ),
    components(
        schemas(
            Role,
            User,
            CreateMemberDto,
            School,
            CreateSchoolDto,
            UpdateSchoolDto,
            Class,
            CreateClassDto,
            UpdateClassDto,
            Subject,
            CreateSubjectDto,
            UpdateSubjectDto,
            LoginRequest,
            RegisterSuperAdminRequest,
            AuthResponse,
            ListResponse,
            PaginationMeta,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login, bootstrap and account management"),
        (name = "Schools", description = "Tenant management, super admin only"),
        (name = "Users", description = "School members"),
        (name = "Classes", description = "Classes of a school"),
        (name = "Subjects", description = "Subjects of a school")
    ),
    info(
        title = "Campus API",
        version = "0.1.0",
        description = "Multi-tenant school management API. Tokens go in `Authorization: Bearer <token>` or `x-auth-token`.",
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
