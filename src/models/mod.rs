use sea_orm::EntityTrait;

/// Column handles the generic repository needs on every audited table.
pub trait AuditedTable: EntityTrait {
    type ActiveModel;

    fn id_column() -> Self::Column;
    fn created_at_column() -> Self::Column;
    fn deleted_column() -> Self::Column;
}

/// Wires a model's `id`, `created_at`, `updated_at` and `is_deleted`
/// columns into [`AuditedEntity`](crate::domain::AuditedEntity) and
/// [`AuditedTable`]. Invoke inside an entity module, after `Model`.
macro_rules! audited_model {
    () => {
        impl $crate::domain::AuditedEntity for Model {
            fn id(&self) -> Uuid {
                self.id
            }

            fn created_at(&self) -> DateTimeUtc {
                self.created_at
            }

            fn updated_at(&self) -> Option<DateTimeUtc> {
                self.updated_at
            }

            fn is_deleted(&self) -> bool {
                self.is_deleted
            }

            fn set_created_at(&mut self, at: DateTimeUtc) {
                self.created_at = at;
            }

            fn set_updated_at(&mut self, at: DateTimeUtc) {
                self.updated_at = Some(at);
            }

            fn clear_updated_at(&mut self) {
                self.updated_at = None;
            }

            fn set_deleted(&mut self, deleted: bool) {
                self.is_deleted = deleted;
            }
        }

        impl $crate::models::AuditedTable for Entity {
            type ActiveModel = ActiveModel;

            fn id_column() -> Column {
                Column::Id
            }

            fn created_at_column() -> Column {
                Column::CreatedAt
            }

            fn deleted_column() -> Column {
                Column::IsDeleted
            }
        }
    };
}

pub mod course;
pub mod order;
pub mod role;
pub mod user;

pub use course::Model as Course;
pub use order::Model as Order;
pub use role::Model as Role;
pub use user::Model as User;
