use crate::{
    error::RecordError,
    services::{Record, record::ensure_exists},
    validate::{Validate, present},
};
use models::{ValidationError, unit_count::UnitCount, validators};
use sea_orm::{ActiveValue::Set, DatabaseConnection, DatabaseTransaction, entity::prelude::*};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub course_code: i32,
    pub course_name: String,
    #[sea_orm(column_type = "SmallInteger")]
    pub unit_count: UnitCount,
    pub offered_by: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::professors::Entity",
        from = "Column::OfferedBy",
        to = "super::professors::Column::StaffNumber",
        on_delete = "SetNull"
    )]
    Professor,
    #[sea_orm(has_many = "super::enrollments::Entity")]
    Enrollments,
    #[sea_orm(has_many = "super::assignments::Entity")]
    Assignments,
    #[sea_orm(has_many = "super::schedules::Entity")]
    Schedules,
    #[sea_orm(has_many = "super::grade_reports::Entity")]
    GradeReports,
}

impl Related<super::professors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Professor.def()
    }
}

impl Related<super::enrollments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Enrollments.def()
    }
}

impl Related<super::assignments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignments.def()
    }
}

impl Related<super::schedules::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Schedules.def()
    }
}

impl Related<super::grade_reports::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GradeReports.def()
    }
}

// Students enrolled in a course
impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        super::enrollments::Relation::Student.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::enrollments::Relation::Course.def().rev())
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
        if let Some(code) = present(&self.course_code) {
            validators::course_code(*code)?;
        }
        if let Some(name) = present(&self.course_name) {
            validators::text("course_name", name)?;
        }
        Ok(())
    }
}

impl Display for Model {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{} ({})", self.course_name, self.course_code)
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Form {
    pub course_code: i32,
    pub course_name: String,
    #[serde(default)]
    pub unit_count: UnitCount,
    #[serde(default)]
    pub offered_by: Option<String>,
}

#[async_trait::async_trait]
impl Record for Entity {
    const NAME: &'static str = "courses";
    const VERBOSE_NAME: &'static str = "Course";

    type Form = Form;
    type Active = ActiveModel;

    fn search_columns() -> Vec<Column> {
        vec![Column::CourseName]
    }

    fn into_active_model(form: Form, key: Option<i32>) -> ActiveModel {
        ActiveModel {
            course_code: Set(key.unwrap_or(form.course_code)),
            course_name: Set(form.course_name),
            unit_count: Set(form.unit_count),
            offered_by: Set(form.offered_by),
        }
    }

    async fn check_references(
        txn: &DatabaseTransaction,
        active: &ActiveModel,
    ) -> Result<(), RecordError> {
        if let Some(Some(professor)) = present(&active.offered_by) {
            ensure_exists::<super::professors::Entity>(txn, professor.clone()).await?;
        }
        Ok(())
    }

    /// Everything hanging off a course goes with it
    async fn release(txn: &DatabaseTransaction, model: &Model) -> Result<(), DbErr> {
        super::enrollments::Entity::delete_many()
            .filter(super::enrollments::Column::CourseId.eq(model.course_code))
            .exec(txn)
            .await?;

        super::assignments::Entity::delete_many()
            .filter(super::assignments::Column::CourseId.eq(model.course_code))
            .exec(txn)
            .await?;

        super::grade_reports::Entity::delete_many()
            .filter(super::grade_reports::Column::CourseId.eq(model.course_code))
            .exec(txn)
            .await?;

        super::schedules::Entity::delete_many()
            .filter(super::schedules::Column::CourseId.eq(model.course_code))
            .exec(txn)
            .await?;

        Ok(())
    }

    async fn display(_db: &DatabaseConnection, model: &Model) -> Result<String, DbErr> {
        Ok(model.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let course = Model {
            course_code: 40123,
            course_name: "Compilers".to_owned(),
            unit_count: UnitCount::Three,
            offered_by: None,
        };
        assert_eq!(course.to_string(), "Compilers (40123)");
    }

    #[test]
    fn test_validate_course_code() {
        for code in [9999, 100000, -12345] {
            let active = ActiveModel {
                course_code: Set(code),
                ..Default::default()
            };
            assert_eq!(
                active.validate().unwrap_err().field(),
                Some("course_code"),
                "{code} should be rejected"
            );
        }
    }

    #[test]
    fn test_form_unit_count_defaults_to_zero() {
        let form: Form =
            serde_json::from_str(r#"{"course_code": 40123, "course_name": "Compilers"}"#).unwrap();
        assert_eq!(form.unit_count, UnitCount::Zero);
        assert_eq!(form.offered_by, None);
    }
}
