use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Email).string().not_null().unique_key())
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::FirstName).string().not_null())
                    .col(ColumnDef::new(Users::LastName).string().not_null())
                    .col(ColumnDef::new(Users::BirthDate).date().not_null())
                    .col(ColumnDef::new(Users::GenderIdentity).string().null())
                    .col(ColumnDef::new(Users::Pronouns).string().null())
                    .col(ColumnDef::new(Users::UserType).string_len(16).not_null())
                    .col(ColumnDef::new(Users::PhotoUrl).string().null())
                    .col(ColumnDef::new(Users::IsArchived).boolean().not_null().default(false))
                    .col(ColumnDef::new(Users::DateArchived).date().null())
                    .col(ColumnDef::new(Users::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_users_user_type")
                    .table(Users::Table)
                    .col(Users::UserType)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(StudentDetails::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(StudentDetails::UserId).integer().not_null().primary_key())
                    .col(ColumnDef::new(StudentDetails::GradYear).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_student_details_user_id")
                            .from(StudentDetails::Table, StudentDetails::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TeacherDetails::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(TeacherDetails::UserId).integer().not_null().primary_key())
                    .col(ColumnDef::new(TeacherDetails::YearsExp).integer().null())
                    .col(ColumnDef::new(TeacherDetails::Bio).text().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_teacher_details_user_id")
                            .from(TeacherDetails::Table, TeacherDetails::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AdminDetails::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(AdminDetails::UserId).integer().not_null().primary_key())
                    .col(ColumnDef::new(AdminDetails::YearsExp).integer().null())
                    .col(ColumnDef::new(AdminDetails::Bio).text().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_admin_details_user_id")
                            .from(AdminDetails::Table, AdminDetails::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AdminDetails::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TeacherDetails::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StudentDetails::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub(crate) enum Users {
    Table,
    Id,
    Email,
    PasswordHash,
    FirstName,
    LastName,
    BirthDate,
    GenderIdentity,
    Pronouns,
    UserType,
    PhotoUrl,
    IsArchived,
    DateArchived,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum StudentDetails {
    Table,
    UserId,
    GradYear,
}

#[derive(DeriveIden)]
enum TeacherDetails {
    Table,
    UserId,
    YearsExp,
    Bio,
}

#[derive(DeriveIden)]
enum AdminDetails {
    Table,
    UserId,
    YearsExp,
    Bio,
}
