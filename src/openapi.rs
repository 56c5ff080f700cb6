use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// OpenAPI document for the storefront API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Storefront API",
        description = "Catalog, checkout and admin API for the clothing storefront"
    ),
    paths(
        crate::handlers::health::health_check,
        crate::handlers::products::list_products,
        crate::handlers::products::search_products,
        crate::handlers::products::random_products,
        crate::handlers::products::get_product,
        crate::handlers::products::create_product,
        crate::handlers::products::update_product,
        crate::handlers::products::delete_product,
        crate::handlers::products::create_variant,
        crate::handlers::products::update_variant,
        crate::handlers::products::delete_variant,
        crate::handlers::categories::list_categories,
        crate::handlers::categories::list_seasons,
        crate::handlers::orders::place_order,
        crate::handlers::orders::list_orders,
        crate::handlers::orders::place_quick_order,
        crate::handlers::orders::list_quick_orders,
        crate::handlers::customers::register,
        crate::handlers::customers::login,
        crate::handlers::customers::get_customer,
        crate::handlers::customers::set_discount,
        crate::handlers::pages::list_pages,
        crate::handlers::pages::get_page,
        crate::handlers::pages::upsert_page,
        crate::handlers::shipping::rate_quote,
    ),
    tags(
        (name = "Health", description = "Liveness"),
        (name = "Products", description = "Catalog listings, search and admin writes"),
        (name = "Catalog", description = "Reference data"),
        (name = "Orders", description = "Checkout and quick orders"),
        (name = "Customers", description = "Customer accounts"),
        (name = "Pages", description = "CMS content"),
        (name = "Shipping", description = "Delivery rate quotes")
    )
)]
pub struct ApiDoc;

/// Swagger UI at `/docs`, raw document at `/api-docs/openapi.json`.
pub fn swagger_routes() -> SwaggerUi {
    SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi())
}
