use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use sea_orm::DatabaseConnection;

use crate::app_data::AppData;
use crate::config::{begin_transaction, commit_transaction};
use crate::errors::internal::{UserError, ValidationError};
use crate::errors::InternalError;
use crate::providers::{CryptoProvider, CsvProvider, GuardProvider, UserCsvHandler, ValidationProvider};
use crate::stores::UserStore;
use crate::types::dto::user::{RegisterUserRequest, UpdateUserRequest};
use crate::types::internal::context::RequestContext;
use crate::types::internal::user::{UserFilter, UserRecord};

/// User lifecycle: registration, listing, updates, archiving and deletion
pub struct UserCoordinator {
    db: DatabaseConnection,
    user_store: Arc<UserStore>,
    crypto_provider: Arc<CryptoProvider>,
    guards: GuardProvider,
    validator: ValidationProvider,
    csv_provider: CsvProvider,
}

impl UserCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        let guards = GuardProvider::new(
            app_data.section_store.clone(),
            app_data.roster_store.clone(),
            app_data.user_store.clone(),
        );

        Self {
            db: app_data.db.clone(),
            user_store: app_data.user_store.clone(),
            crypto_provider: app_data.crypto_provider.clone(),
            guards,
            validator: ValidationProvider::new(),
            csv_provider: CsvProvider::new(),
        }
    }

    /// Register one user with its role detail record
    ///
    /// Steps:
    /// 1. Validate every field
    /// 2. Hash the password
    /// 3. Check the email and insert user + details in one transaction
    pub async fn register_user(&self, ctx: &RequestContext, req: RegisterUserRequest) -> Result<UserRecord, InternalError> {
        let new_user = self.validator.validate_new_user(&req).map_err(ValidationError::Fields)?;
        let password_hash = self.crypto_provider.hash_password(&new_user.password)?;

        let txn = begin_transaction(&self.db).await?;

        self.guards.require_email_available(&txn, &new_user.email, None).await?;
        let record = self.user_store.insert(&txn, &new_user, password_hash).await?;

        commit_transaction(txn).await?;

        tracing::info!(
            request_id = %ctx.request_id,
            user_id = record.user.id,
            user_type = record.user.user_type.as_str(),
            "User registered"
        );

        Ok(record)
    }

    pub async fn list_users(&self, _ctx: &RequestContext, filter: UserFilter) -> Result<Vec<UserRecord>, InternalError> {
        let users = self.user_store.list(&self.db, &filter).await?;

        let mut records = Vec::with_capacity(users.len());
        for user in users {
            records.push(self.user_store.load_record(&self.db, user).await?);
        }

        Ok(records)
    }

    pub async fn get_user(&self, _ctx: &RequestContext, user_id: i32) -> Result<UserRecord, InternalError> {
        let user = self.guards.require_user(&self.db, user_id).await?;
        self.user_store.load_record(&self.db, user).await
    }

    /// Register every user in the file or none of them
    pub async fn register_users_from_csv(&self, ctx: &RequestContext, content: &[u8]) -> Result<Vec<UserRecord>, InternalError> {
        let parsed = self.csv_provider.parse(content, &UserCsvHandler::new())?;
        if !parsed.rejected.is_empty() {
            return Err(ValidationError::Rows(parsed.rejected).into());
        }

        let mut seen = HashSet::new();
        let mut repeated: Vec<String> = Vec::new();
        for new_user in &parsed.rows {
            if !seen.insert(new_user.email.as_str()) && !repeated.contains(&new_user.email) {
                repeated.push(new_user.email.clone());
            }
        }
        if !repeated.is_empty() {
            return Err(UserError::DuplicateEmails { emails: repeated }.into());
        }

        let mut hashes = Vec::with_capacity(parsed.rows.len());
        for new_user in &parsed.rows {
            hashes.push(self.crypto_provider.hash_password(&new_user.password)?);
        }

        let txn = begin_transaction(&self.db).await?;

        let emails: Vec<String> = parsed.rows.iter().map(|u| u.email.clone()).collect();
        let taken = self.user_store.find_by_emails(&txn, &emails).await?;
        if !taken.is_empty() {
            let emails = taken.into_iter().map(|u| u.email).collect();
            return Err(UserError::DuplicateEmails { emails }.into());
        }

        let mut records = Vec::with_capacity(parsed.rows.len());
        for (new_user, password_hash) in parsed.rows.iter().zip(hashes) {
            records.push(self.user_store.insert(&txn, new_user, password_hash).await?);
        }

        commit_transaction(txn).await?;

        tracing::info!(request_id = %ctx.request_id, count = records.len(), "Users registered from CSV");

        Ok(records)
    }

    /// Partial update; archiving a rostered student is refused
    pub async fn update_user(
        &self,
        ctx: &RequestContext,
        user_id: i32,
        req: UpdateUserRequest,
    ) -> Result<UserRecord, InternalError> {
        let txn = begin_transaction(&self.db).await?;

        let user = self.guards.require_user(&txn, user_id).await?;
        let changes = self
            .validator
            .validate_user_changes(&req, user.user_type)
            .map_err(ValidationError::Fields)?;

        if let Some(email) = &changes.email {
            self.guards.require_email_available(&txn, email, Some(user_id)).await?;
        }
        if changes.is_archived == Some(true) && !user.is_archived {
            self.guards.require_not_rostered(&txn, &user).await?;
        }
        let password_hash = match &changes.password {
            Some(password) => Some(self.crypto_provider.hash_password(password)?),
            None => None,
        };

        let today = Utc::now().date_naive();
        let record = self.user_store.update(&txn, user, &changes, password_hash, today).await?;

        commit_transaction(txn).await?;

        tracing::info!(request_id = %ctx.request_id, user_id, "User updated");

        Ok(record)
    }

    /// Hard delete; detail records and measurements cascade
    pub async fn delete_user(&self, ctx: &RequestContext, user_id: i32) -> Result<(), InternalError> {
        let txn = begin_transaction(&self.db).await?;

        let user = self.guards.require_user(&txn, user_id).await?;
        self.guards.require_not_rostered(&txn, &user).await?;
        self.user_store.delete(&txn, user.id).await?;

        commit_transaction(txn).await?;

        tracing::info!(request_id = %ctx.request_id, user_id, "User deleted");

        Ok(())
    }
}
