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
                    .table(Sections::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Sections::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Sections::SectionCode).string_len(10).not_null().unique_key())
                    .col(ColumnDef::new(Sections::GradeLevel).string_len(16).not_null())
                    .col(ColumnDef::new(Sections::IsActive).boolean().not_null().default(true))
                    .col(ColumnDef::new(Sections::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Sections::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // One roster row per student is enforced by the roster workflow, not by a unique index
        manager
            .create_table(
                Table::create()
                    .table(SectionRosters::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SectionRosters::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SectionRosters::StudentUserId).integer().not_null())
                    .col(ColumnDef::new(SectionRosters::SectionId).integer().not_null())
                    .col(ColumnDef::new(SectionRosters::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_section_rosters_student_user_id")
                            .from(SectionRosters::Table, SectionRosters::StudentUserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_section_rosters_section_id")
                            .from(SectionRosters::Table, SectionRosters::SectionId)
                            .to(Sections::Table, Sections::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_section_rosters_student_user_id")
                    .table(SectionRosters::Table)
                    .col(SectionRosters::StudentUserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_section_rosters_section_id")
                    .table(SectionRosters::Table)
                    .col(SectionRosters::SectionId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SectionRosters::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Sections::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Sections {
    Table,
    Id,
    SectionCode,
    GradeLevel,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum SectionRosters {
    Table,
    Id,
    StudentUserId,
    SectionId,
    CreatedAt,
}
