use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "complaints")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    // Owner; never changes after creation
    pub student_id: String,
    // Must reference an active staff user while set
    pub assigned_staff_id: Option<String>,

    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub category: String,

    // "open" | "in_progress" | "resolved"
    pub status: String,

    // Optimistic concurrency token, bumped on every accepted update
    pub version: i32,

    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
