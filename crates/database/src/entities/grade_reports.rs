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

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "grade_reports")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub student_id: Option<String>,
    pub course_id: Option<i32>,
    /// Out of 20
    pub grade: f64,
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
        if let Some(grade) = present(&self.grade) {
            validators::grade(*grade)?;
        }
        Ok(())
    }
}

impl Model {
    /// The student is named by number, so it needs no lookup
    pub fn describe(&self, course: Option<&super::courses::Model>) -> String {
        format!(
            "{} (course: {}) : {}",
            or_absent(self.student_id.as_ref()),
            or_absent(course.map(|course| &course.course_name)),
            self.grade
        )
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Form {
    #[serde(default)]
    pub student_id: Option<String>,
    #[serde(default)]
    pub course_id: Option<i32>,
    pub grade: f64,
}

#[async_trait::async_trait]
impl Record for Entity {
    const NAME: &'static str = "grade_reports";
    const VERBOSE_NAME: &'static str = "Grade report";

    type Form = Form;
    type Active = ActiveModel;

    fn search_columns() -> Vec<Column> {
        vec![Column::StudentId]
    }

    fn into_active_model(form: Form, key: Option<i32>) -> ActiveModel {
        ActiveModel {
            id: key.map_or(NotSet, Set),
            student_id: Set(form.student_id),
            course_id: Set(form.course_id),
            grade: Set(form.grade),
        }
    }

    async fn check_references(
        txn: &DatabaseTransaction,
        active: &ActiveModel,
    ) -> Result<(), RecordError> {
        if let Some(Some(student)) = present(&active.student_id) {
            ensure_exists::<super::students::Entity>(txn, student.clone()).await?;
        }
        if let Some(Some(course)) = present(&active.course_id) {
            ensure_exists::<super::courses::Entity>(txn, *course).await?;
        }
        Ok(())
    }

    async fn release(_txn: &DatabaseTransaction, _model: &Model) -> Result<(), DbErr> {
        Ok(())
    }

    async fn display(db: &DatabaseConnection, model: &Model) -> Result<String, DbErr> {
        let course = model.find_related(super::courses::Entity).one(db).await?;
        Ok(model.describe(course.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::unit_count::UnitCount;

    fn report(grade: f64) -> Model {
        Model {
            id: 1,
            student_id: Some("12345678".to_owned()),
            course_id: Some(40123),
            grade,
        }
    }

    #[test]
    fn test_describe() {
        let course = super::super::courses::Model {
            course_code: 40123,
            course_name: "Compilers".to_owned(),
            unit_count: UnitCount::Four,
            offered_by: None,
        };
        assert_eq!(
            report(17.5).describe(Some(&course)),
            "12345678 (course: Compilers) : 17.5"
        );

        let mut orphan = report(20.0);
        orphan.student_id = None;
        assert_eq!(orphan.describe(None), "N/A (course: N/A) : 20");
    }

    #[test]
    fn test_validate_grade_bounds() {
        for grade in [0.0, 12.25, 20.0] {
            let active: ActiveModel = report(grade).into();
            assert!(active.validate().is_ok(), "{grade} should be accepted");
        }

        for grade in [-0.5, 20.01, 21.0, f64::NAN, f64::INFINITY] {
            let active: ActiveModel = report(grade).into();
            assert_eq!(
                active.validate().unwrap_err().field(),
                Some("grade"),
                "{grade} should be rejected"
            );
        }
    }
}
