use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Discriminator selecting which detail record a user owns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum UserType {
    #[sea_orm(string_value = "student")]
    Student,
    #[sea_orm(string_value = "teacher")]
    Teacher,
    #[sea_orm(string_value = "admin")]
    Admin,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Student => "student",
            UserType::Teacher => "teacher",
            UserType::Admin => "admin",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "student" => Some(UserType::Student),
            "teacher" => Some(UserType::Teacher),
            "admin" => Some(UserType::Admin),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: Date,
    pub gender_identity: Option<String>,
    pub pronouns: Option<String>,
    pub user_type: UserType,
    pub photo_url: Option<String>,
    pub is_archived: bool,
    pub date_archived: Option<Date>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::student_detail::Entity")]
    StudentDetail,
    #[sea_orm(has_one = "super::teacher_detail::Entity")]
    TeacherDetail,
    #[sea_orm(has_one = "super::admin_detail::Entity")]
    AdminDetail,
    #[sea_orm(has_many = "super::section_roster::Entity")]
    SectionRoster,
}

impl Related<super::student_detail::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StudentDetail.def()
    }
}

impl Related<super::teacher_detail::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TeacherDetail.def()
    }
}

impl Related<super::admin_detail::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AdminDetail.def()
    }
}

impl Related<super::section_roster::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SectionRoster.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
