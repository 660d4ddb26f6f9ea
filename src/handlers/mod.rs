pub mod admin;
pub mod artisans;
pub mod auth;
pub mod cart;
pub mod categories;
pub mod orders;
pub mod products;
pub mod reviews;
pub mod tutorials;
pub mod users;

use actix_web::web;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // ── Auth & public entry points ──
    cfg.route("/register", web::post().to(auth::register));
    cfg.route("/login", web::post().to(auth::login));
    cfg.route("/check-email", web::get().to(auth::check_email));
    cfg.route(
        "/send-verification-code",
        web::post().to(auth::send_verification_code),
    );
    cfg.route("/contact", web::post().to(auth::contact));

    // ── User routes (admin only) ──
    cfg.service(web::resource("/users").route(web::get().to(users::get_users)));
    cfg.service(
        web::resource("/users/{id}")
            .route(web::get().to(users::get_user))
            .route(web::put().to(users::update_user))
            .route(web::delete().to(users::delete_user)),
    );

    // ── Catalog ──
    cfg.service(
        web::resource("/categories")
            .route(web::get().to(categories::get_categories))
            .route(web::post().to(categories::create_category)),
    );
    cfg.service(
        web::resource("/categories/{id}")
            .route(web::get().to(categories::get_category))
            .route(web::put().to(categories::update_category))
            .route(web::delete().to(categories::delete_category)),
    );
    cfg.service(
        web::scope("/products")
            .route("", web::get().to(products::get_products))
            .route("", web::post().to(products::create_product))
            .route("/{id}", web::get().to(products::get_product))
            .route("/{id}", web::put().to(products::update_product))
            .route("/{id}", web::delete().to(products::delete_product))
            .route("/{id}/related", web::get().to(products::get_related))
            .route(
                "/{id}/artisan-products",
                web::get().to(products::get_artisan_products),
            ),
    );

    // ── Cart (dual mode: JWT or X-Session-Id) ──
    cfg.service(
        web::resource("/cart")
            .route(web::get().to(cart::get_cart))
            .route(web::post().to(cart::add_to_cart)),
    );
    cfg.service(
        web::resource("/cart/{item_id}")
            .route(web::put().to(cart::update_cart_item))
            .route(web::delete().to(cart::remove_cart_item)),
    );

    // ── Reviews (anonymous allowed) ──
    cfg.service(
        web::resource("/reviews")
            .route(web::get().to(reviews::get_reviews))
            .route(web::post().to(reviews::create_review)),
    );
    cfg.service(
        web::resource("/reviews/by-artisan/{artisan_id}")
            .route(web::get().to(reviews::get_reviews_by_artisan)),
    );

    // ── Orders ──
    cfg.service(
        web::resource("/orders")
            .route(web::get().to(orders::get_orders))
            .route(web::post().to(orders::create_order)),
    );
    cfg.service(web::resource("/orders/{id}").route(web::get().to(orders::get_order)));

    // ── Artisans. /stats must be registered before /{id}. ──
    cfg.service(
        web::scope("/artisans")
            .route("", web::get().to(artisans::get_artisans))
            .route("", web::post().to(artisans::submit_artisan))
            .route("/stats", web::get().to(artisans::get_stats))
            .route("/{id}", web::get().to(artisans::get_artisan))
            .route("/{id}", web::patch().to(artisans::update_artisan))
            .route("/{id}/validate", web::post().to(artisans::validate_artisan))
            .route("/{id}/reject", web::post().to(artisans::reject_artisan)),
    );
    cfg.service(
        web::resource("/artisan-by-shop").route(web::get().to(artisans::get_artisan_by_shop)),
    );

    // ── Tutorials ──
    cfg.service(
        web::resource("/training-fields")
            .route(web::get().to(tutorials::get_fields))
            .route(web::post().to(tutorials::create_field)),
    );
    cfg.service(
        web::resource("/training-fields/{id}")
            .route(web::get().to(tutorials::get_field))
            .route(web::put().to(tutorials::update_field))
            .route(web::delete().to(tutorials::delete_field)),
    );
    cfg.service(
        web::resource("/tutorial-categories")
            .route(web::get().to(tutorials::get_categories))
            .route(web::post().to(tutorials::create_category)),
    );
    cfg.service(
        web::resource("/tutorial-categories/{id}")
            .route(web::get().to(tutorials::get_category))
            .route(web::put().to(tutorials::update_category))
            .route(web::delete().to(tutorials::delete_category)),
    );
    cfg.service(
        web::resource("/tutorials")
            .route(web::get().to(tutorials::get_tutorials))
            .route(web::post().to(tutorials::create_tutorial)),
    );
    cfg.service(
        web::resource("/tutorials/{id}")
            .route(web::get().to(tutorials::get_tutorial))
            .route(web::put().to(tutorials::update_tutorial))
            .route(web::delete().to(tutorials::delete_tutorial)),
    );

    // ── Admin console ──
    cfg.service(
        web::scope("/admin")
            .route("/stats", web::get().to(admin::get_stats))
            .route(
                "/artisans/bulk-validate",
                web::post().to(admin::bulk_validate),
            )
            .route(
                "/artisans/bulk-suspend",
                web::post().to(admin::bulk_suspend),
            )
            .route(
                "/artisans/{id}/documents",
                web::get().to(admin::get_documents),
            ),
    );
}
