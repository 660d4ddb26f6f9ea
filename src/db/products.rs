use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::*;
use uuid::Uuid;

use crate::models::artisans;
use crate::models::products::{
    self, CreateProduct, ProductListQuery, ProductStatus, UpdateProduct,
};

pub async fn insert_product(
    db: &DatabaseConnection,
    input: CreateProduct,
) -> Result<products::Model, DbErr> {
    let new_product = products::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(input.name),
        description: Set(input.description),
        category_id: Set(input.category_id),
        artisan_id: Set(input.artisan_id),
        price: Set(input.price),
        stock: Set(input.stock),
        image: Set(input.image),
        status: Set(input.status.unwrap_or(ProductStatus::Active)),
        variants: Set(serde_json::json!(input.variants.unwrap_or_default())),
        created_at: Set(chrono::Utc::now()),
    };

    new_product.insert(db).await
}

/// Catalog listing with the public filters. Non-staff callers only ever see
/// active products, whatever the `status` filter says.
pub async fn get_products_filtered(
    db: &DatabaseConnection,
    query: &ProductListQuery,
    include_inactive: bool,
) -> Result<Vec<products::Model>, DbErr> {
    let mut find = products::Entity::find();

    if !include_inactive {
        find = find.filter(products::Column::Status.eq(ProductStatus::Active));
    } else if let Some(status) = query
        .status
        .as_deref()
        .and_then(|s| ProductStatus::try_from_value(&s.to_string()).ok())
    {
        find = find.filter(products::Column::Status.eq(status));
    }

    if let Some(category) = query.category {
        find = find.filter(products::Column::CategoryId.eq(category));
    }
    if let Some(artisan) = query.artisan {
        find = find.filter(products::Column::ArtisanId.eq(artisan));
    }
    if let Some(ville) = query.ville.as_deref().filter(|v| !v.is_empty()) {
        find = find
            .join(JoinType::InnerJoin, products::Relation::Artisan.def())
            .filter(
                Expr::col((artisans::Entity, artisans::Column::Ville)).ilike(format!("%{ville}%")),
            );
    }
    if let Some(search) = query.search.as_deref().filter(|s| !s.is_empty()) {
        let pattern = format!("%{search}%");
        find = find.filter(
            Condition::any()
                .add(Expr::col((products::Entity, products::Column::Name)).ilike(pattern.clone()))
                .add(Expr::col((products::Entity, products::Column::Description)).ilike(pattern)),
        );
    }

    find = match query.ordering.as_deref() {
        Some("price") => find.order_by_asc(products::Column::Price),
        Some("-price") => find.order_by_desc(products::Column::Price),
        Some("name") => find.order_by_asc(products::Column::Name),
        Some("stock") => find.order_by_asc(products::Column::Stock),
        Some("created_at") => find.order_by_asc(products::Column::CreatedAt),
        _ => find.order_by_desc(products::Column::CreatedAt),
    };

    find.all(db).await
}

pub async fn get_product_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<products::Model>, DbErr> {
    products::Entity::find_by_id(id).one(db).await
}

/// Up to 8 other products in the same category.
pub async fn get_related_products(
    db: &DatabaseConnection,
    product: &products::Model,
) -> Result<Vec<products::Model>, DbErr> {
    products::Entity::find()
        .filter(products::Column::CategoryId.eq(product.category_id))
        .filter(products::Column::Id.ne(product.id))
        .limit(8)
        .all(db)
        .await
}

/// Up to 8 other products by the same artisan; empty when the product has
/// no artisan.
pub async fn get_artisan_products(
    db: &DatabaseConnection,
    product: &products::Model,
) -> Result<Vec<products::Model>, DbErr> {
    let Some(artisan_id) = product.artisan_id else {
        return Ok(Vec::new());
    };

    products::Entity::find()
        .filter(products::Column::ArtisanId.eq(artisan_id))
        .filter(products::Column::Id.ne(product.id))
        .limit(8)
        .all(db)
        .await
}

/// All product ids owned by an artisan (reviews-by-artisan lookup).
pub async fn get_product_ids_by_artisan(
    db: &DatabaseConnection,
    artisan_id: Uuid,
) -> Result<Vec<Uuid>, DbErr> {
    Ok(products::Entity::find()
        .filter(products::Column::ArtisanId.eq(artisan_id))
        .all(db)
        .await?
        .into_iter()
        .map(|p| p.id)
        .collect())
}

pub async fn update_product(
    db: &DatabaseConnection,
    id: Uuid,
    input: UpdateProduct,
) -> Result<products::Model, DbErr> {
    let product = products::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Product not found".to_string()))?;

    let mut active: products::ActiveModel = product.into();

    if let Some(name) = input.name {
        active.name = Set(name);
    }
    if let Some(description) = input.description {
        active.description = Set(description);
    }
    if let Some(category_id) = input.category_id {
        active.category_id = Set(category_id);
    }
    if let Some(artisan_id) = input.artisan_id {
        active.artisan_id = Set(Some(artisan_id));
    }
    if let Some(price) = input.price {
        active.price = Set(price);
    }
    if let Some(stock) = input.stock {
        active.stock = Set(stock);
    }
    if let Some(image) = input.image {
        active.image = Set(Some(image));
    }
    if let Some(status) = input.status {
        active.status = Set(status);
    }
    if let Some(variants) = input.variants {
        active.variants = Set(serde_json::json!(variants));
    }

    active.update(db).await
}

pub async fn delete_product(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    products::Entity::delete_by_id(id).exec(db).await
}

pub async fn count_products(db: &DatabaseConnection) -> Result<u64, DbErr> {
    products::Entity::find().count(db).await
}
