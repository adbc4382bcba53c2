use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(crate::modules::thumbnail::handler::process_image),
    components(
        schemas(
            crate::modules::thumbnail::dto::ProcessImageRequest,
            crate::common::response::ProcessSuccess,
            crate::common::response::ErrorBody,
        )
    ),
    tags(
        (name = "Thumbnails", description = "Image thumbnail processing")
    )
)]
pub struct ApiDoc;
