use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Grade-level category shared by sections and students
///
/// Grades 10 through 12 share a single category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum GradeLevel {
    #[sea_orm(string_value = "6")]
    Grade6,
    #[sea_orm(string_value = "7")]
    Grade7,
    #[sea_orm(string_value = "8")]
    Grade8,
    #[sea_orm(string_value = "9")]
    Grade9,
    #[sea_orm(string_value = "10-11-12")]
    Grades10To12,
}

impl GradeLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            GradeLevel::Grade6 => "6",
            GradeLevel::Grade7 => "7",
            GradeLevel::Grade8 => "8",
            GradeLevel::Grade9 => "9",
            GradeLevel::Grades10To12 => "10-11-12",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "6" => Some(GradeLevel::Grade6),
            "7" => Some(GradeLevel::Grade7),
            "8" => Some(GradeLevel::Grade8),
            "9" => Some(GradeLevel::Grade9),
            "10-11-12" => Some(GradeLevel::Grades10To12),
            _ => None,
        }
    }

    /// Category for a numeric school grade, if the school teaches it
    pub fn for_grade(grade: i32) -> Option<Self> {
        match grade {
            6 => Some(GradeLevel::Grade6),
            7 => Some(GradeLevel::Grade7),
            8 => Some(GradeLevel::Grade8),
            9 => Some(GradeLevel::Grade9),
            10..=12 => Some(GradeLevel::Grades10To12),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "sections")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub section_code: String,
    pub grade_level: GradeLevel,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::section_roster::Entity")]
    SectionRoster,
}

impl Related<super::section_roster::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SectionRoster.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
