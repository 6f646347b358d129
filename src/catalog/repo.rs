use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// Supplement ingredient, unique by name.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Ingredient {
    pub id: Uuid,
    pub name: String,
}

/// Supplement product; linked to ingredients through products_ingredients.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub manufacturer: Option<String>,
    pub price: Option<String>,
    pub efficacy: Option<String>,
    pub image_url: Option<String>,
}

/// Intersects the candidate names against the catalog. Name match is exact
/// and case-sensitive; unknown names simply do not come back.
pub async fn ingredients_by_names(
    db: &PgPool,
    names: &[String],
) -> Result<Vec<Ingredient>, sqlx::Error> {
    let rows = sqlx::query_as::<_, Ingredient>(
        r#"
        SELECT id, name
        FROM ingredients
        WHERE name = ANY($1)
        "#,
    )
    .bind(names)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

/// Every product containing at least one of the given ingredients, each
/// product once even when it matches several.
pub async fn products_for_ingredients(
    db: &PgPool,
    ingredient_ids: &[Uuid],
) -> Result<Vec<Product>, sqlx::Error> {
    let rows = sqlx::query_as::<_, Product>(
        r#"
        SELECT DISTINCT p.id, p.name, p.manufacturer, p.price, p.efficacy, p.image_url
        FROM products p
        JOIN products_ingredients pi ON pi.product_id = p.id
        WHERE pi.ingredient_id = ANY($1)
        "#,
    )
    .bind(ingredient_ids)
    .fetch_all(db)
    .await?;
    Ok(rows)
}
