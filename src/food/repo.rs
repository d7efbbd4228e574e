use anyhow::Context;
use async_trait::async_trait;
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// A persisted food listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    pub id: Uuid,
    pub name: Option<String>,
    pub description: Option<String>,
    pub video: String,
    pub food_partner: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Insert payload. `video` and `food_partner` are filled server-side.
#[derive(Debug, Clone)]
pub struct NewFood {
    pub name: Option<String>,
    pub description: Option<String>,
    pub video: String,
    pub food_partner: Uuid,
}

/// Selection for [`FoodRepository::find`]; the default matches everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct FoodFilter {
    pub food_partner: Option<Uuid>,
}

impl FoodFilter {
    pub fn matches(&self, item: &FoodItem) -> bool {
        self.food_partner.map_or(true, |p| p == item.food_partner)
    }
}

#[async_trait]
pub trait FoodRepository: Send + Sync {
    async fn create(&self, food: NewFood) -> anyhow::Result<FoodItem>;
    /// Records come back in insertion order.
    async fn find(&self, filter: FoodFilter) -> anyhow::Result<Vec<FoodItem>>;
}

#[derive(Clone)]
pub struct PgFoodRepository {
    db: PgPool,
}

impl PgFoodRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FoodRepository for PgFoodRepository {
    async fn create(&self, food: NewFood) -> anyhow::Result<FoodItem> {
        let row = sqlx::query_as::<_, FoodItem>(
            r#"
            INSERT INTO foods (name, description, video, food_partner)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, description, video, food_partner, created_at
            "#,
        )
        .bind(food.name)
        .bind(food.description)
        .bind(food.video)
        .bind(food.food_partner)
        .fetch_one(&self.db)
        .await
        .context("insert food")?;
        Ok(row)
    }

    async fn find(&self, filter: FoodFilter) -> anyhow::Result<Vec<FoodItem>> {
        let rows = sqlx::query_as::<_, FoodItem>(
            r#"
            SELECT id, name, description, video, food_partner, created_at
              FROM foods
             WHERE ($1::uuid IS NULL OR food_partner = $1)
             ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(filter.food_partner)
        .fetch_all(&self.db)
        .await
        .context("list foods")?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(partner: Uuid) -> FoodItem {
        FoodItem {
            id: Uuid::new_v4(),
            name: Some("Dal".into()),
            description: None,
            video: "https://cdn.example.com/k".into(),
            food_partner: partner,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn default_filter_matches_everything() {
        assert!(FoodFilter::default().matches(&item(Uuid::new_v4())));
    }

    #[test]
    fn partner_filter_matches_only_that_partner() {
        let partner = Uuid::new_v4();
        let filter = FoodFilter {
            food_partner: Some(partner),
        };
        assert!(filter.matches(&item(partner)));
        assert!(!filter.matches(&item(Uuid::new_v4())));
    }

    #[test]
    fn serializes_with_client_field_names() {
        let partner = Uuid::new_v4();
        let json = serde_json::to_value(item(partner)).unwrap();
        assert_eq!(json["foodPartner"], partner.to_string());
        assert!(json["createdAt"].is_string());
        assert!(json["description"].is_null());
        assert!(json.get("food_partner").is_none());
    }
}
