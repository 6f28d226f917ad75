use sea_orm_migration::prelude::*;

use crate::m20250301_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(StudentAnthros::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StudentAnthros::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(StudentAnthros::TeacherUserId).integer().not_null())
                    .col(ColumnDef::new(StudentAnthros::StudentUserId).integer().not_null())
                    .col(ColumnDef::new(StudentAnthros::DateRecorded).date().not_null())
                    .col(ColumnDef::new(StudentAnthros::Height).double().not_null())
                    .col(ColumnDef::new(StudentAnthros::Weight).double().not_null())
                    .col(ColumnDef::new(StudentAnthros::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(StudentAnthros::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_student_anthros_teacher_user_id")
                            .from(StudentAnthros::Table, StudentAnthros::TeacherUserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_student_anthros_student_user_id")
                            .from(StudentAnthros::Table, StudentAnthros::StudentUserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_student_anthros_student_user_id")
                    .table(StudentAnthros::Table)
                    .col(StudentAnthros::StudentUserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(StudentAnthros::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum StudentAnthros {
    Table,
    Id,
    TeacherUserId,
    StudentUserId,
    DateRecorded,
    Height,
    Weight,
    CreatedAt,
    UpdatedAt,
}
