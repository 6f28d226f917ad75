use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "student_performance_grades")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub performance_type_id: i32,
    pub teacher_user_id: i32,
    pub student_user_id: i32,
    pub date_taken: Date,
    #[sea_orm(column_type = "Double")]
    pub grade: f64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::performance_type::Entity",
        from = "Column::PerformanceTypeId",
        to = "super::performance_type::Column::Id",
        on_delete = "Cascade"
    )]
    PerformanceType,
}

impl Related<super::performance_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PerformanceType.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
