use sea_orm_migration::prelude::*;
use sea_orm_migration::schema::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Section::Table)
                    .if_not_exists()
                    .col(pk_auto(Section::Id))
                    // Stored upper-cased; uniqueness is case-sensitive on purpose.
                    .col(string_len(Section::Name, 100).unique_key())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Student::Table)
                    .if_not_exists()
                    .col(pk_auto(Student::Id))
                    .col(string_len(Student::Name, 100))
                    .col(integer(Student::SectionId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-student-section_id")
                            .from(Student::Table, Student::SectionId)
                            .to(Section::Table, Section::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Course::Table)
                    .if_not_exists()
                    .col(pk_auto(Course::Id))
                    .col(string_len(Course::Name, 100).unique_key())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Teacher::Table)
                    .if_not_exists()
                    .col(pk_auto(Teacher::Id))
                    .col(string_len(Teacher::Name, 100).unique_key())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Assignment::Table)
                    .if_not_exists()
                    .col(pk_auto(Assignment::Id))
                    .col(integer(Assignment::SectionId))
                    .col(integer(Assignment::CourseId))
                    .col(integer(Assignment::TeacherId))
                    .col(timestamp(Assignment::CreatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-assignment-section_id")
                            .from(Assignment::Table, Assignment::SectionId)
                            .to(Section::Table, Section::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-assignment-course_id")
                            .from(Assignment::Table, Assignment::CourseId)
                            .to(Course::Table, Course::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-assignment-teacher_id")
                            .from(Assignment::Table, Assignment::TeacherId)
                            .to(Teacher::Table, Teacher::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One teacher per (section, course) pair; re-assignment overwrites.
        manager
            .create_index(
                Index::create()
                    .name("uq_assignment_section_course")
                    .table(Assignment::Table)
                    .col(Assignment::SectionId)
                    .col(Assignment::CourseId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Report::Table)
                    .if_not_exists()
                    .col(pk_auto(Report::Id))
                    .col(integer(Report::StudentId))
                    .col(integer(Report::CourseId))
                    .col(integer(Report::TeacherId))
                    .col(string_len(Report::Month, 7))
                    .col(text(Report::Body))
                    .col(timestamp(Report::CreatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-report-student_id")
                            .from(Report::Table, Report::StudentId)
                            .to(Student::Table, Student::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-report-course_id")
                            .from(Report::Table, Report::CourseId)
                            .to(Course::Table, Course::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-report-teacher_id")
                            .from(Report::Table, Report::TeacherId)
                            .to(Teacher::Table, Teacher::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // No unique key on (student_id, course_id, month): duplicate prevention
        // is an application-level pre-insert check.
        manager
            .create_index(
                Index::create()
                    .name("idx_report_student_month")
                    .table(Report::Table)
                    .col(Report::StudentId)
                    .col(Report::Month)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_report_month")
                    .table(Report::Table)
                    .col(Report::Month)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Report::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Assignment::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Teacher::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Course::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Student::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Section::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Section {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum Student {
    Table,
    Id,
    Name,
    SectionId,
}

#[derive(DeriveIden)]
enum Course {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum Teacher {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum Assignment {
    Table,
    Id,
    SectionId,
    CourseId,
    TeacherId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Report {
    Table,
    Id,
    StudentId,
    CourseId,
    TeacherId,
    Month,
    Body,
    CreatedAt,
}
