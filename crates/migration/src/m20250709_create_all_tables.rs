use sea_orm_migration::{prelude::*, sea_orm::DbBackend};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Professors and departments reference each other. SQLite can't add a
        // foreign key after the fact but accepts one to a table that doesn't
        // exist yet; everything else gets it once departments exists.
        let is_sqlite = manager.get_database_backend() == DbBackend::Sqlite;

        // Create students table
        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Students::StudentNumber)
                            .string_len(8)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Students::FirstName).string_len(50).not_null())
                    .col(ColumnDef::new(Students::LastName).string_len(50).not_null())
                    .col(ColumnDef::new(Students::EnrollmentYear).date().not_null())
                    .col(ColumnDef::new(Students::Major).string_len(4).not_null())
                    .to_owned(),
            )
            .await?;

        // Create professors table
        let mut professors = Table::create();
        professors
            .table(Professors::Table)
            .if_not_exists()
            .col(
                ColumnDef::new(Professors::StaffNumber)
                    .string_len(8)
                    .not_null()
                    .primary_key(),
            )
            .col(ColumnDef::new(Professors::FirstName).string_len(50).not_null())
            .col(ColumnDef::new(Professors::LastName).string_len(50).not_null())
            .col(ColumnDef::new(Professors::HiringDate).date())
            .col(ColumnDef::new(Professors::DepartmentId).integer());

        if is_sqlite {
            professors.foreign_key(&mut professor_department_fk());
        }

        manager.create_table(professors).await?;

        // Create departments table
        manager
            .create_table(
                Table::create()
                    .table(Departments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Departments::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Departments::Name)
                            .string_len(50)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Departments::HeadOfDepartment).string_len(8))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-departments-head_of_department")
                            .from(Departments::Table, Departments::HeadOfDepartment)
                            .to(Professors::Table, Professors::StaffNumber)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        if !is_sqlite {
            manager
                .create_foreign_key(professor_department_fk())
                .await?;
        }

        // Create courses table
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Courses::CourseCode)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Courses::CourseName).string_len(50).not_null())
                    .col(ColumnDef::new(Courses::UnitCount).small_integer().not_null())
                    .col(ColumnDef::new(Courses::OfferedBy).string_len(8))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-courses-offered_by")
                            .from(Courses::Table, Courses::OfferedBy)
                            .to(Professors::Table, Professors::StaffNumber)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Create enrollments junction table (many-to-many)
        manager
            .create_table(
                Table::create()
                    .table(Enrollments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Enrollments::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Enrollments::Semester).string_len(8).not_null())
                    .col(ColumnDef::new(Enrollments::StudentId).string_len(8).not_null())
                    .col(ColumnDef::new(Enrollments::CourseId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-enrollments-student_id")
                            .from(Enrollments::Table, Enrollments::StudentId)
                            .to(Students::Table, Students::StudentNumber)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-enrollments-course_id")
                            .from(Enrollments::Table, Enrollments::CourseId)
                            .to(Courses::Table, Courses::CourseCode)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create classrooms table
        manager
            .create_table(
                Table::create()
                    .table(Classrooms::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Classrooms::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Classrooms::ClassNumber).string_len(3).not_null())
                    .col(ColumnDef::new(Classrooms::DepartmentId).integer())
                    .col(
                        ColumnDef::new(Classrooms::Capacity)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-classrooms-department_id")
                            .from(Classrooms::Table, Classrooms::DepartmentId)
                            .to(Departments::Table, Departments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create schedules table
        manager
            .create_table(
                Table::create()
                    .table(Schedules::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Schedules::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Schedules::StudentId).string_len(8))
                    .col(ColumnDef::new(Schedules::CourseId).integer())
                    .col(ColumnDef::new(Schedules::ClassroomId).integer())
                    // Longest value is "MON,TUE,WED,THU,FRI,SAT,SUN"
                    .col(ColumnDef::new(Schedules::Day).string_len(27).not_null())
                    .col(ColumnDef::new(Schedules::StartTime).time())
                    .col(ColumnDef::new(Schedules::EndTime).time())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-schedules-student_id")
                            .from(Schedules::Table, Schedules::StudentId)
                            .to(Students::Table, Students::StudentNumber)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-schedules-course_id")
                            .from(Schedules::Table, Schedules::CourseId)
                            .to(Courses::Table, Courses::CourseCode)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-schedules-classroom_id")
                            .from(Schedules::Table, Schedules::ClassroomId)
                            .to(Classrooms::Table, Classrooms::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Create assignments table
        manager
            .create_table(
                Table::create()
                    .table(Assignments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Assignments::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Assignments::Title).string_len(50).not_null())
                    .col(ColumnDef::new(Assignments::CourseId).integer())
                    .col(ColumnDef::new(Assignments::Deadline).date().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-assignments-course_id")
                            .from(Assignments::Table, Assignments::CourseId)
                            .to(Courses::Table, Courses::CourseCode)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create grade_reports table
        manager
            .create_table(
                Table::create()
                    .table(GradeReports::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GradeReports::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(GradeReports::StudentId).string_len(8))
                    .col(ColumnDef::new(GradeReports::CourseId).integer())
                    .col(ColumnDef::new(GradeReports::Grade).double().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-grade_reports-student_id")
                            .from(GradeReports::Table, GradeReports::StudentId)
                            .to(Students::Table, Students::StudentNumber)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-grade_reports-course_id")
                            .from(GradeReports::Table, GradeReports::CourseId)
                            .to(Courses::Table, Courses::CourseCode)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        if manager.get_database_backend() != DbBackend::Sqlite {
            manager
                .drop_foreign_key(
                    ForeignKey::drop()
                        .name("fk-professors-department_id")
                        .table(Professors::Table)
                        .to_owned(),
                )
                .await?;
        }

        // Drop tables in reverse order due to foreign key constraints
        manager
            .drop_table(Table::drop().table(GradeReports::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Assignments::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Schedules::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Classrooms::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Enrollments::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Departments::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Professors::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await?;

        Ok(())
    }
}

fn professor_department_fk() -> ForeignKeyCreateStatement {
    ForeignKey::create()
        .name("fk-professors-department_id")
        .from(Professors::Table, Professors::DepartmentId)
        .to(Departments::Table, Departments::Id)
        .on_delete(ForeignKeyAction::SetNull)
        .to_owned()
}

#[derive(Iden)]
enum Students {
    Table,
    StudentNumber,
    FirstName,
    LastName,
    EnrollmentYear,
    Major,
}

#[derive(Iden)]
enum Professors {
    Table,
    StaffNumber,
    FirstName,
    LastName,
    HiringDate,
    DepartmentId,
}

#[derive(Iden)]
enum Departments {
    Table,
    Id,
    Name,
    HeadOfDepartment,
}

#[derive(Iden)]
enum Courses {
    Table,
    CourseCode,
    CourseName,
    UnitCount,
    OfferedBy,
}

#[derive(Iden)]
enum Enrollments {
    Table,
    Id,
    Semester,
    StudentId,
    CourseId,
}

#[derive(Iden)]
enum Classrooms {
    Table,
    Id,
    ClassNumber,
    DepartmentId,
    Capacity,
}

#[derive(Iden)]
enum Schedules {
    Table,
    Id,
    StudentId,
    CourseId,
    ClassroomId,
    Day,
    StartTime,
    EndTime,
}

#[derive(Iden)]
enum Assignments {
    Table,
    Id,
    Title,
    CourseId,
    Deadline,
}

#[derive(Iden)]
enum GradeReports {
    Table,
    Id,
    StudentId,
    CourseId,
    Grade,
}
