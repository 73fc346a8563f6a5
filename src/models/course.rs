use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    /// URL-safe handle, unique among live courses
    pub slug: String,
    pub description: Option<String>,
    pub instructor_id: Uuid,
    /// List price in VND (no minor unit)
    pub price_vnd: i64,
    pub is_published: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
    pub is_deleted: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::InstructorId",
        to = "super::user::Column::Id"
    )]
    Instructor,
    #[sea_orm(has_many = "super::order::Entity")]
    Orders,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

audited_model!();

impl Model {
    pub fn new(
        title: impl Into<String>,
        slug: impl Into<String>,
        instructor_id: Uuid,
        price_vnd: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            slug: slug.into(),
            description: None,
            instructor_id,
            price_vnd,
            is_published: false,
            created_at: chrono::Utc::now(),
            updated_at: None,
            is_deleted: false,
        }
    }
}
