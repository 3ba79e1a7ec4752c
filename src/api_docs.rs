use crate::api;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::site::list_locales,
        api::home::home_page,
        api::experiences::list_experiences,
        api::experiences::get_experience,
        api::packages::list_packages,
        api::packages::get_package,
        api::legal::get_legal_page,
        api::site::get_hero,
        api::site::get_settings,
        api::site::get_texts,
        api::quotes::submit_quote,
    ),
    tags(
        (name = "terramar", description = "Terramar website API")
    )
)]
pub struct ApiDoc;
