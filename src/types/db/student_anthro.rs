use sea_orm::entity::prelude::*;

/// One height/weight measurement taken by a teacher
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "student_anthros")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub teacher_user_id: i32,
    pub student_user_id: i32,
    pub date_recorded: Date,
    #[sea_orm(column_type = "Double")]
    pub height: f64,
    #[sea_orm(column_type = "Double")]
    pub weight: f64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::StudentUserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Student,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
