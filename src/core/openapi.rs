use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::users::{dtos as users_dtos, handlers as users_handlers};
use crate::features::villa_numbers::{
    dtos as villa_numbers_dtos, handlers as villa_numbers_handlers,
};
use crate::features::villas::{dtos as villas_dtos, handlers as villas_handlers};
use crate::shared::types::ApiResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Users
        users_handlers::login,
        users_handlers::register,
        // Villas
        villas_handlers::list_villas,
        villas_handlers::get_villa,
        villas_handlers::create_villa,
        villas_handlers::update_villa,
        villas_handlers::patch_villa,
        villas_handlers::delete_villa,
        // Villa numbers
        villa_numbers_handlers::list_villa_numbers,
        villa_numbers_handlers::get_villa_number,
        villa_numbers_handlers::create_villa_number,
        villa_numbers_handlers::update_villa_number,
        villa_numbers_handlers::delete_villa_number,
        villa_numbers_handlers::get_string,
    ),
    components(
        schemas(
            // Users
            users_dtos::UserDto,
            users_dtos::LoginRequestDto,
            users_dtos::LoginResponseDto,
            users_dtos::RegisterRequestDto,
            ApiResponse<users_dtos::UserDto>,
            ApiResponse<users_dtos::LoginResponseDto>,
            // Villas
            villas_dtos::VillaDto,
            villas_dtos::VillaCreateDto,
            villas_dtos::VillaUpdateDto,
            ApiResponse<villas_dtos::VillaDto>,
            ApiResponse<Vec<villas_dtos::VillaDto>>,
            // Villa numbers
            villa_numbers_dtos::VillaNumberDto,
            villa_numbers_dtos::VillaNumberCreateDto,
            villa_numbers_dtos::VillaNumberUpdateDto,
            ApiResponse<villa_numbers_dtos::VillaNumberDto>,
            ApiResponse<Vec<villa_numbers_dtos::VillaNumberDto>>,
        )
    ),
    tags(
        (name = "Users", description = "Account registration and login"),
        (name = "VillaAPI", description = "Villa listings"),
        (name = "VillaNumberAPI", description = "Bookable units within villas"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Villa API",
        version = "0.1.0",
        description = "CRUD API for villa rental listings",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
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
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
