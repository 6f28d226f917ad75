use sea_orm::entity::prelude::*;

/// A kind of performance test, e.g. a timed mile
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "student_performance_types")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub unit: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::assigned_performance_test::Entity")]
    AssignedTests,
    #[sea_orm(has_many = "super::performance_grade::Entity")]
    Grades,
}

impl Related<super::assigned_performance_test::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AssignedTests.def()
    }
}

impl Related<super::performance_grade::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Grades.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
