use chrono::NaiveDate;

use crate::types::db::user::{self, UserType};
use crate::types::db::{admin_detail, student_detail, teacher_detail};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaffDetails {
    pub years_exp: Option<i32>,
    pub bio: Option<String>,
}

/// Role-specific attributes; the variant decides the user type
#[derive(Debug, Clone, PartialEq)]
pub enum RoleDetails {
    Student { grad_year: i32 },
    Teacher(StaffDetails),
    Admin(StaffDetails),
}

impl RoleDetails {
    pub fn user_type(&self) -> UserType {
        match self {
            RoleDetails::Student { .. } => UserType::Student,
            RoleDetails::Teacher(_) => UserType::Teacher,
            RoleDetails::Admin(_) => UserType::Admin,
        }
    }
}

/// Validated registration input
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub gender_identity: Option<String>,
    pub pronouns: Option<String>,
    pub photo_url: Option<String>,
    pub details: RoleDetails,
}

/// Validated partial update; `None` leaves the value unchanged
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserChanges {
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub gender_identity: Option<String>,
    pub pronouns: Option<String>,
    pub photo_url: Option<String>,
    pub is_archived: Option<bool>,
    pub grad_year: Option<i32>,
    pub years_exp: Option<i32>,
    pub bio: Option<String>,
}

impl UserChanges {
    pub fn touches_staff_details(&self) -> bool {
        self.years_exp.is_some() || self.bio.is_some()
    }
}

/// User row plus whichever detail record it owns
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub user: user::Model,
    pub student_details: Option<student_detail::Model>,
    pub teacher_details: Option<teacher_detail::Model>,
    pub admin_details: Option<admin_detail::Model>,
}

/// Which users a listing returns
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserFilter {
    /// Empty means every type
    pub user_types: Vec<UserType>,
    pub archived: Option<bool>,
}

impl UserFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn of_type(user_type: UserType) -> Self {
        Self {
            user_types: vec![user_type],
            archived: None,
        }
    }

    pub fn staff() -> Self {
        Self {
            user_types: vec![UserType::Teacher, UserType::Admin],
            archived: None,
        }
    }

    pub fn active(mut self) -> Self {
        self.archived = Some(false);
        self
    }

    pub fn archived(mut self) -> Self {
        self.archived = Some(true);
        self
    }
}
