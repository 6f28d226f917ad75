use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::errors::internal::UserError;
use crate::errors::InternalError;
use crate::stores::is_unique_violation;
use crate::types::db::user::{self, Entity as User, UserType};
use crate::types::db::{admin_detail, student_detail, teacher_detail};
use crate::types::internal::user::{NewUser, RoleDetails, StaffDetails, UserChanges, UserFilter, UserRecord};

pub struct UserStore;

impl UserStore {
    pub fn new() -> Self {
        Self
    }

    pub async fn find_by_id(
        &self,
        conn: &impl ConnectionTrait,
        user_id: i32,
    ) -> Result<Option<user::Model>, InternalError> {
        User::find_by_id(user_id)
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_user_by_id", e))
    }

    /// Lookup by already-normalized email
    pub async fn find_by_email(
        &self,
        conn: &impl ConnectionTrait,
        email: &str,
    ) -> Result<Option<user::Model>, InternalError> {
        User::find()
            .filter(user::Column::Email.eq(email))
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_user_by_email", e))
    }

    pub async fn find_by_emails(
        &self,
        conn: &impl ConnectionTrait,
        emails: &[String],
    ) -> Result<Vec<user::Model>, InternalError> {
        if emails.is_empty() {
            return Ok(Vec::new());
        }

        User::find()
            .filter(user::Column::Email.is_in(emails.iter().cloned()))
            .all(conn)
            .await
            .map_err(|e| InternalError::database("find_users_by_emails", e))
    }

    pub async fn list(
        &self,
        conn: &impl ConnectionTrait,
        filter: &UserFilter,
    ) -> Result<Vec<user::Model>, InternalError> {
        let mut query = User::find();
        if !filter.user_types.is_empty() {
            query = query.filter(user::Column::UserType.is_in(filter.user_types.iter().copied()));
        }
        if let Some(archived) = filter.archived {
            query = query.filter(user::Column::IsArchived.eq(archived));
        }

        query
            .order_by_asc(user::Column::LastName)
            .order_by_asc(user::Column::FirstName)
            .order_by_asc(user::Column::Id)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("list_users", e))
    }

    pub async fn find_student_detail(
        &self,
        conn: &impl ConnectionTrait,
        user_id: i32,
    ) -> Result<Option<student_detail::Model>, InternalError> {
        student_detail::Entity::find_by_id(user_id)
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_student_detail", e))
    }

    /// Attach the detail record matching the user's type
    pub async fn load_record(
        &self,
        conn: &impl ConnectionTrait,
        user: user::Model,
    ) -> Result<UserRecord, InternalError> {
        let mut record = UserRecord {
            student_details: None,
            teacher_details: None,
            admin_details: None,
            user,
        };

        match record.user.user_type {
            UserType::Student => {
                record.student_details = self.find_student_detail(conn, record.user.id).await?;
            }
            UserType::Teacher => {
                record.teacher_details = teacher_detail::Entity::find_by_id(record.user.id)
                    .one(conn)
                    .await
                    .map_err(|e| InternalError::database("find_teacher_detail", e))?;
            }
            UserType::Admin => {
                record.admin_details = admin_detail::Entity::find_by_id(record.user.id)
                    .one(conn)
                    .await
                    .map_err(|e| InternalError::database("find_admin_detail", e))?;
            }
        }

        Ok(record)
    }

    /// Insert the user row and its detail record
    ///
    /// Run inside a transaction so a failed detail insert leaves no orphan user.
    pub async fn insert(
        &self,
        conn: &impl ConnectionTrait,
        new_user: &NewUser,
        password_hash: String,
    ) -> Result<UserRecord, InternalError> {
        let now = Utc::now().timestamp();

        let user = user::ActiveModel {
            email: Set(new_user.email.clone()),
            password_hash: Set(password_hash),
            first_name: Set(new_user.first_name.clone()),
            last_name: Set(new_user.last_name.clone()),
            birth_date: Set(new_user.birth_date),
            gender_identity: Set(new_user.gender_identity.clone()),
            pronouns: Set(new_user.pronouns.clone()),
            user_type: Set(new_user.details.user_type()),
            photo_url: Set(new_user.photo_url.clone()),
            is_archived: Set(false),
            date_archived: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(conn)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                InternalError::User(UserError::EmailTaken {
                    email: new_user.email.clone(),
                })
            } else {
                InternalError::database("insert_user", e)
            }
        })?;

        match &new_user.details {
            RoleDetails::Student { grad_year } => {
                self.upsert_student_detail(conn, user.id, *grad_year).await?;
            }
            RoleDetails::Teacher(staff) | RoleDetails::Admin(staff) => {
                self.upsert_staff_detail(conn, user.id, user.user_type, staff.clone()).await?;
            }
        }

        self.load_record(conn, user).await
    }

    /// Apply a partial update to the user and its detail record
    pub async fn update(
        &self,
        conn: &impl ConnectionTrait,
        existing: user::Model,
        changes: &UserChanges,
        password_hash: Option<String>,
        today: NaiveDate,
    ) -> Result<UserRecord, InternalError> {
        let user_id = existing.id;
        let user_type = existing.user_type;
        let mut active: user::ActiveModel = existing.into();

        if let Some(email) = &changes.email {
            active.email = Set(email.clone());
        }
        if let Some(hash) = password_hash {
            active.password_hash = Set(hash);
        }
        if let Some(first_name) = &changes.first_name {
            active.first_name = Set(first_name.clone());
        }
        if let Some(last_name) = &changes.last_name {
            active.last_name = Set(last_name.clone());
        }
        if let Some(birth_date) = changes.birth_date {
            active.birth_date = Set(birth_date);
        }
        if let Some(gender_identity) = &changes.gender_identity {
            active.gender_identity = Set(Some(gender_identity.clone()));
        }
        if let Some(pronouns) = &changes.pronouns {
            active.pronouns = Set(Some(pronouns.clone()));
        }
        if let Some(photo_url) = &changes.photo_url {
            active.photo_url = Set(Some(photo_url.clone()));
        }
        if let Some(is_archived) = changes.is_archived {
            active.is_archived = Set(is_archived);
            active.date_archived = Set(is_archived.then_some(today));
        }
        active.updated_at = Set(Utc::now().timestamp());

        let user = active.update(conn).await.map_err(|e| {
            if is_unique_violation(&e) {
                InternalError::User(UserError::EmailTaken {
                    email: changes.email.clone().unwrap_or_default(),
                })
            } else {
                InternalError::database("update_user", e)
            }
        })?;

        match user_type {
            UserType::Student => {
                if let Some(grad_year) = changes.grad_year {
                    self.upsert_student_detail(conn, user_id, grad_year).await?;
                }
            }
            UserType::Teacher | UserType::Admin => {
                if changes.touches_staff_details() {
                    let staff = StaffDetails {
                        years_exp: changes.years_exp,
                        bio: changes.bio.clone(),
                    };
                    self.upsert_staff_detail(conn, user_id, user_type, staff).await?;
                }
            }
        }

        self.load_record(conn, user).await
    }

    pub async fn delete(&self, conn: &impl ConnectionTrait, user_id: i32) -> Result<(), InternalError> {
        User::delete_by_id(user_id)
            .exec(conn)
            .await
            .map_err(|e| InternalError::database("delete_user", e))?;

        Ok(())
    }

    async fn upsert_student_detail(
        &self,
        conn: &impl ConnectionTrait,
        user_id: i32,
        grad_year: i32,
    ) -> Result<(), InternalError> {
        let detail = student_detail::ActiveModel {
            user_id: Set(user_id),
            grad_year: Set(grad_year),
        };

        match self.find_student_detail(conn, user_id).await? {
            Some(_) => detail.update(conn).await.map(|_| ()),
            None => detail.insert(conn).await.map(|_| ()),
        }
        .map_err(|e| InternalError::database("upsert_student_detail", e))
    }

    /// Missing staff fields keep their stored value
    async fn upsert_staff_detail(
        &self,
        conn: &impl ConnectionTrait,
        user_id: i32,
        user_type: UserType,
        staff: StaffDetails,
    ) -> Result<(), InternalError> {
        match user_type {
            UserType::Teacher => {
                let existing = teacher_detail::Entity::find_by_id(user_id)
                    .one(conn)
                    .await
                    .map_err(|e| InternalError::database("find_teacher_detail", e))?;
                let result = match existing {
                    Some(model) => {
                        let mut active: teacher_detail::ActiveModel = model.into();
                        if staff.years_exp.is_some() {
                            active.years_exp = Set(staff.years_exp);
                        }
                        if staff.bio.is_some() {
                            active.bio = Set(staff.bio);
                        }
                        active.update(conn).await.map(|_| ())
                    }
                    None => teacher_detail::ActiveModel {
                        user_id: Set(user_id),
                        years_exp: Set(staff.years_exp),
                        bio: Set(staff.bio),
                    }
                    .insert(conn)
                    .await
                    .map(|_| ()),
                };
                result.map_err(|e| InternalError::database("upsert_teacher_detail", e))
            }
            UserType::Admin => {
                let existing = admin_detail::Entity::find_by_id(user_id)
                    .one(conn)
                    .await
                    .map_err(|e| InternalError::database("find_admin_detail", e))?;
                let result = match existing {
                    Some(model) => {
                        let mut active: admin_detail::ActiveModel = model.into();
                        if staff.years_exp.is_some() {
                            active.years_exp = Set(staff.years_exp);
                        }
                        if staff.bio.is_some() {
                            active.bio = Set(staff.bio);
                        }
                        active.update(conn).await.map(|_| ())
                    }
                    None => admin_detail::ActiveModel {
                        user_id: Set(user_id),
                        years_exp: Set(staff.years_exp),
                        bio: Set(staff.bio),
                    }
                    .insert(conn)
                    .await
                    .map(|_| ()),
                };
                result.map_err(|e| InternalError::database("upsert_admin_detail", e))
            }
            UserType::Student => Ok(()),
        }
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}
