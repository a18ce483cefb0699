use crate::{
    error::RecordError,
    services::Record,
    validate::{Validate, present},
};
use models::{ValidationError, major::Major, validators};
use sea_orm::{ActiveValue::Set, DatabaseConnection, DatabaseTransaction, entity::prelude::*};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub student_number: String,
    pub first_name: String,
    pub last_name: String,
    pub enrollment_year: Date,
    #[sea_orm(column_type = "Text")]
    pub major: Major,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::enrollments::Entity")]
    Enrollments,
    #[sea_orm(has_many = "super::grade_reports::Entity")]
    GradeReports,
    #[sea_orm(has_many = "super::schedules::Entity")]
    Schedules,
}

impl Related<super::enrollments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Enrollments.def()
    }
}

impl Related<super::grade_reports::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GradeReports.def()
    }
}

impl Related<super::schedules::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Schedules.def()
    }
}

// Courses a student is enrolled in
impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        super::enrollments::Relation::Course.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::enrollments::Relation::Student.def().rev())
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
        if let Some(number) = present(&self.student_number) {
            validators::student_number(number)?;
        }
        if let Some(name) = present(&self.first_name) {
            validators::text("first_name", name)?;
        }
        if let Some(name) = present(&self.last_name) {
            validators::text("last_name", name)?;
        }
        Ok(())
    }
}

impl Display for Model {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "{} {} ({})",
            self.first_name, self.last_name, self.student_number
        )
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Form {
    pub student_number: String,
    pub first_name: String,
    pub last_name: String,
    pub enrollment_year: Date,
    pub major: Major,
}

#[async_trait::async_trait]
impl Record for Entity {
    const NAME: &'static str = "students";
    const VERBOSE_NAME: &'static str = "Student";

    type Form = Form;
    type Active = ActiveModel;

    fn search_columns() -> Vec<Column> {
        vec![Column::StudentNumber, Column::FirstName, Column::LastName]
    }

    fn into_active_model(form: Form, key: Option<String>) -> ActiveModel {
        ActiveModel {
            student_number: Set(key.unwrap_or(form.student_number)),
            first_name: Set(form.first_name),
            last_name: Set(form.last_name),
            enrollment_year: Set(form.enrollment_year),
            major: Set(form.major),
        }
    }

    async fn check_references(
        _txn: &DatabaseTransaction,
        _active: &ActiveModel,
    ) -> Result<(), RecordError> {
        Ok(())
    }

    async fn release(txn: &DatabaseTransaction, model: &Model) -> Result<(), DbErr> {
        super::enrollments::Entity::delete_many()
            .filter(super::enrollments::Column::StudentId.eq(model.student_number.as_str()))
            .exec(txn)
            .await?;

        super::grade_reports::Entity::delete_many()
            .filter(super::grade_reports::Column::StudentId.eq(model.student_number.as_str()))
            .exec(txn)
            .await?;

        super::schedules::Entity::delete_many()
            .filter(super::schedules::Column::StudentId.eq(model.student_number.as_str()))
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
    use sea_orm::ActiveValue::NotSet;

    fn ada() -> Model {
        Model {
            student_number: "12345678".to_owned(),
            first_name: "Ada".to_owned(),
            last_name: "Lovelace".to_owned(),
            enrollment_year: Date::from_ymd_opt(2023, 9, 1).unwrap(),
            major: Major::CS,
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(ada().to_string(), "Ada Lovelace (12345678)");
    }

    #[test]
    fn test_validate_student_number() {
        let mut active: ActiveModel = ada().into();
        assert!(active.validate().is_ok());

        active.student_number = Set("1234567".to_owned());
        let err = active.validate().unwrap_err();
        assert_eq!(err.field(), Some("student_number"));
    }

    #[test]
    fn test_validate_skips_unset_fields() {
        let active = ActiveModel {
            first_name: Set("Ada".to_owned()),
            student_number: NotSet,
            ..Default::default()
        };
        assert!(active.validate().is_ok());
    }

    #[test]
    fn test_path_key_overrides_form_key() {
        let form = Form {
            student_number: "11111111".to_owned(),
            first_name: "Ada".to_owned(),
            last_name: "Lovelace".to_owned(),
            enrollment_year: Date::from_ymd_opt(2023, 9, 1).unwrap(),
            major: Major::CS,
        };
        let active = Entity::into_active_model(form, Some("12345678".to_owned()));
        assert_eq!(active.student_number, Set("12345678".to_owned()));
    }
}
