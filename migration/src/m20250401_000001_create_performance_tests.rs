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
                    .table(StudentPerformanceTypes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StudentPerformanceTypes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(StudentPerformanceTypes::Name).string().not_null().unique_key())
                    .col(ColumnDef::new(StudentPerformanceTypes::Unit).string())
                    .col(ColumnDef::new(StudentPerformanceTypes::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(StudentPerformanceTypes::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(StudentAssignedPerformanceTests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StudentAssignedPerformanceTests::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(StudentAssignedPerformanceTests::PerformanceTypeId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentAssignedPerformanceTests::TeacherUserId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentAssignedPerformanceTests::StudentUserId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(StudentAssignedPerformanceTests::DateAssigned).date())
                    .col(
                        ColumnDef::new(StudentAssignedPerformanceTests::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_assigned_performance_tests_type_id")
                            .from(
                                StudentAssignedPerformanceTests::Table,
                                StudentAssignedPerformanceTests::PerformanceTypeId,
                            )
                            .to(StudentPerformanceTypes::Table, StudentPerformanceTypes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_assigned_performance_tests_teacher_user_id")
                            .from(
                                StudentAssignedPerformanceTests::Table,
                                StudentAssignedPerformanceTests::TeacherUserId,
                            )
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_assigned_performance_tests_student_user_id")
                            .from(
                                StudentAssignedPerformanceTests::Table,
                                StudentAssignedPerformanceTests::StudentUserId,
                            )
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One assignment per type and student
        manager
            .create_index(
                Index::create()
                    .name("idx_assigned_performance_tests_type_student")
                    .table(StudentAssignedPerformanceTests::Table)
                    .col(StudentAssignedPerformanceTests::PerformanceTypeId)
                    .col(StudentAssignedPerformanceTests::StudentUserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(StudentPerformanceGrades::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StudentPerformanceGrades::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(StudentPerformanceGrades::PerformanceTypeId).integer().not_null())
                    .col(ColumnDef::new(StudentPerformanceGrades::TeacherUserId).integer().not_null())
                    .col(ColumnDef::new(StudentPerformanceGrades::StudentUserId).integer().not_null())
                    .col(ColumnDef::new(StudentPerformanceGrades::DateTaken).date().not_null())
                    .col(ColumnDef::new(StudentPerformanceGrades::Grade).double().not_null())
                    .col(ColumnDef::new(StudentPerformanceGrades::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(StudentPerformanceGrades::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_performance_grades_type_id")
                            .from(StudentPerformanceGrades::Table, StudentPerformanceGrades::PerformanceTypeId)
                            .to(StudentPerformanceTypes::Table, StudentPerformanceTypes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_performance_grades_teacher_user_id")
                            .from(StudentPerformanceGrades::Table, StudentPerformanceGrades::TeacherUserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_performance_grades_student_user_id")
                            .from(StudentPerformanceGrades::Table, StudentPerformanceGrades::StudentUserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_performance_grades_student_user_id")
                    .table(StudentPerformanceGrades::Table)
                    .col(StudentPerformanceGrades::StudentUserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(StudentPerformanceGrades::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StudentAssignedPerformanceTests::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StudentPerformanceTypes::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum StudentPerformanceTypes {
    Table,
    Id,
    Name,
    Unit,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum StudentAssignedPerformanceTests {
    Table,
    Id,
    PerformanceTypeId,
    TeacherUserId,
    StudentUserId,
    DateAssigned,
    CreatedAt,
}

#[derive(DeriveIden)]
enum StudentPerformanceGrades {
    Table,
    Id,
    PerformanceTypeId,
    TeacherUserId,
    StudentUserId,
    DateTaken,
    Grade,
    CreatedAt,
    UpdatedAt,
}
