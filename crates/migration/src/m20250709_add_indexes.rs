use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Indexes on enrollments for faster many-to-many lookups
        manager
            .create_index(
                Index::create()
                    .name("idx_enrollments_student_id")
                    .table(Enrollments::Table)
                    .col(Enrollments::StudentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_enrollments_course_id")
                    .table(Enrollments::Table)
                    .col(Enrollments::CourseId)
                    .to_owned(),
            )
            .await?;

        // Foreign keys that are nulled when a professor is removed
        manager
            .create_index(
                Index::create()
                    .name("idx_courses_offered_by")
                    .table(Courses::Table)
                    .col(Courses::OfferedBy)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_departments_head_of_department")
                    .table(Departments::Table)
                    .col(Departments::HeadOfDepartment)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_professors_department_id")
                    .table(Professors::Table)
                    .col(Professors::DepartmentId)
                    .to_owned(),
            )
            .await?;

        // Index on classrooms.department_id for faster joins
        manager
            .create_index(
                Index::create()
                    .name("idx_classrooms_department_id")
                    .table(Classrooms::Table)
                    .col(Classrooms::DepartmentId)
                    .to_owned(),
            )
            .await?;

        // Indexes on schedules for faster joins
        manager
            .create_index(
                Index::create()
                    .name("idx_schedules_course_id")
                    .table(Schedules::Table)
                    .col(Schedules::CourseId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_schedules_classroom_id")
                    .table(Schedules::Table)
                    .col(Schedules::ClassroomId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_schedules_student_id")
                    .table(Schedules::Table)
                    .col(Schedules::StudentId)
                    .to_owned(),
            )
            .await?;

        // Indexes on the remaining course and student references
        manager
            .create_index(
                Index::create()
                    .name("idx_assignments_course_id")
                    .table(Assignments::Table)
                    .col(Assignments::CourseId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_grade_reports_student_id")
                    .table(GradeReports::Table)
                    .col(GradeReports::StudentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_grade_reports_course_id")
                    .table(GradeReports::Table)
                    .col(GradeReports::CourseId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_enrollments_student_id").table(Enrollments::Table).to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_enrollments_course_id").table(Enrollments::Table).to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_courses_offered_by").table(Courses::Table).to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_departments_head_of_department").table(Departments::Table).to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_professors_department_id").table(Professors::Table).to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_classrooms_department_id").table(Classrooms::Table).to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_schedules_course_id").table(Schedules::Table).to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_schedules_classroom_id").table(Schedules::Table).to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_schedules_student_id").table(Schedules::Table).to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_assignments_course_id").table(Assignments::Table).to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_grade_reports_student_id").table(GradeReports::Table).to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_grade_reports_course_id").table(GradeReports::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Enrollments {
    Table,
    StudentId,
    CourseId,
}

#[derive(Iden)]
enum Courses {
    Table,
    OfferedBy,
}

#[derive(Iden)]
enum Departments {
    Table,
    HeadOfDepartment,
}

#[derive(Iden)]
enum Professors {
    Table,
    DepartmentId,
}

#[derive(Iden)]
enum Classrooms {
    Table,
    DepartmentId,
}

#[derive(Iden)]
enum Schedules {
    Table,
    StudentId,
    CourseId,
    ClassroomId,
}

#[derive(Iden)]
enum Assignments {
    Table,
    CourseId,
}

#[derive(Iden)]
enum GradeReports {
    Table,
    StudentId,
    CourseId,
}
