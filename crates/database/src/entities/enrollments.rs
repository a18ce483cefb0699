use super::or_absent;
use crate::{
    error::RecordError,
    services::{Record, record::ensure_exists},
    validate::{Validate, present},
};
use models::{ValidationError, validators};
use sea_orm::{
    ActiveValue::{NotSet, Set},
    DatabaseConnection, DatabaseTransaction,
    entity::prelude::*,
};
use serde::{Deserialize, Serialize};

/// A student taking a course in a given semester
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "enrollments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// e.g. `Fall23`
    pub semester: String,
    pub student_id: String,
    pub course_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::StudentNumber",
        on_delete = "Cascade"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::CourseId",
        to = "super::courses::Column::CourseCode",
        on_delete = "Cascade"
    )]
    Course,
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(self, _db: &C, _insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        self.validate().map_err(|e| DbErr::Custom(e.to_string()))?;
        Ok(self)
    }
}

impl Validate for ActiveModel {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(semester) = present(&self.semester) {
            validators::semester(semester)?;
        }
        if let Some(student) = present(&self.student_id) {
            validators::student_number(student)?;
        }
        Ok(())
    }
}

impl Model {
    pub fn describe(
        &self,
        student: Option<&super::students::Model>,
        course: Option<&super::courses::Model>,
    ) -> String {
        format!(
            "{} is enrolled in {} for semester {}",
            or_absent(student),
            or_absent(course),
            self.semester
        )
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Form {
    pub semester: String,
    pub student_id: String,
    pub course_id: i32,
}

#[async_trait::async_trait]
impl Record for Entity {
    const NAME: &'static str = "enrollments";
    const VERBOSE_NAME: &'static str = "Enrollment";

    type Form = Form;
    type Active = ActiveModel;

    fn search_columns() -> Vec<Column> {
        vec![Column::Semester, Column::StudentId]
    }

    fn into_active_model(form: Form, key: Option<i32>) -> ActiveModel {
        ActiveModel {
            id: key.map_or(NotSet, Set),
            semester: Set(form.semester),
            student_id: Set(form.student_id),
            course_id: Set(form.course_id),
        }
    }

    async fn check_references(
        txn: &DatabaseTransaction,
        active: &ActiveModel,
    ) -> Result<(), RecordError> {
        if let Some(student) = present(&active.student_id) {
            ensure_exists::<super::students::Entity>(txn, student.clone()).await?;
        }
        if let Some(course) = present(&active.course_id) {
            ensure_exists::<super::courses::Entity>(txn, *course).await?;
        }
        Ok(())
    }

    async fn release(_txn: &DatabaseTransaction, _model: &Model) -> Result<(), DbErr> {
        Ok(())
    }

    async fn display(db: &DatabaseConnection, model: &Model) -> Result<String, DbErr> {
        let student = model.find_related(super::students::Entity).one(db).await?;
        let course = model.find_related(super::courses::Entity).one(db).await?;
        Ok(model.describe(student.as_ref(), course.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::{major::Major, unit_count::UnitCount};

    fn enrollment() -> Model {
        Model {
            id: 1,
            semester: "Fall23".to_owned(),
            student_id: "12345678".to_owned(),
            course_id: 40123,
        }
    }

    #[test]
    fn test_describe() {
        let student = super::super::students::Model {
            student_number: "12345678".to_owned(),
            first_name: "Ada".to_owned(),
            last_name: "Lovelace".to_owned(),
            enrollment_year: Date::from_ymd_opt(2023, 9, 1).unwrap(),
            major: Major::CS,
        };
        let course = super::super::courses::Model {
            course_code: 40123,
            course_name: "Compilers".to_owned(),
            unit_count: UnitCount::Three,
            offered_by: None,
        };

        assert_eq!(
            enrollment().describe(Some(&student), Some(&course)),
            "Ada Lovelace (12345678) is enrolled in Compilers (40123) for semester Fall23"
        );
    }

    #[test]
    fn test_describe_missing_relations() {
        assert_eq!(
            enrollment().describe(None, None),
            "N/A is enrolled in N/A for semester Fall23"
        );
    }

    #[test]
    fn test_validate_semester() {
        let mut active: ActiveModel = enrollment().into();
        assert!(active.validate().is_ok());

        for semester in ["Fall 23", "fall23", "Autumn23", "Fall2023"] {
            active.semester = Set(semester.to_owned());
            assert_eq!(
                active.validate().unwrap_err().field(),
                Some("semester"),
                "{semester} should be rejected"
            );
        }
    }
}
