use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_PAID: &str = "paid";
pub const STATUS_CANCELLED: &str = "cancelled";
pub const STATUS_REFUNDED: &str = "refunded";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub course_id: Uuid,
    /// Amount charged in VND, copied from the course price at checkout
    pub amount_vnd: i64,
    /// Payment lifecycle.
    /// Valid values:
    /// - `pending`: created, waiting for the gateway
    /// - `paid`: gateway confirmed the transaction
    /// - `cancelled`: abandoned before payment
    /// - `refunded`: paid, then returned
    pub status: String,
    /// Gateway transaction reference, opaque to this layer
    pub payment_ref: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
    pub is_deleted: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::Id"
    )]
    Course,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

audited_model!();

impl Model {
    pub fn new(user_id: Uuid, course_id: Uuid, amount_vnd: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            course_id,
            amount_vnd,
            status: STATUS_PENDING.to_string(),
            payment_ref: None,
            created_at: chrono::Utc::now(),
            updated_at: None,
            is_deleted: false,
        }
    }
}
