use crate::{
    error::RecordError,
    services::{Record, record::ensure_exists},
    validate::{Validate, present},
};
use models::{ValidationError, validators};
use sea_orm::{
    ActiveValue::Set, DatabaseConnection, DatabaseTransaction, Value, entity::prelude::*,
};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "professors")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub staff_number: String,
    pub first_name: String,
    pub last_name: String,
    pub hiring_date: Option<Date>,
    pub department_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::departments::Entity",
        from = "Column::DepartmentId",
        to = "super::departments::Column::Id",
        on_delete = "SetNull"
    )]
    Department,
    #[sea_orm(has_many = "super::courses::Entity")]
    Courses,
}

impl Related<super::departments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Department.def()
    }
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Courses.def()
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
        if let Some(number) = present(&self.staff_number) {
            validators::staff_number(number)?;
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
            self.first_name, self.last_name, self.staff_number
        )
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Form {
    pub staff_number: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub hiring_date: Option<Date>,
    #[serde(default)]
    pub department_id: Option<i32>,
}

#[async_trait::async_trait]
impl Record for Entity {
    const NAME: &'static str = "professors";
    const VERBOSE_NAME: &'static str = "Professor";

    type Form = Form;
    type Active = ActiveModel;

    fn search_columns() -> Vec<Column> {
        vec![Column::StaffNumber, Column::FirstName, Column::LastName]
    }

    fn into_active_model(form: Form, key: Option<String>) -> ActiveModel {
        ActiveModel {
            staff_number: Set(key.unwrap_or(form.staff_number)),
            first_name: Set(form.first_name),
            last_name: Set(form.last_name),
            hiring_date: Set(form.hiring_date),
            department_id: Set(form.department_id),
        }
    }

    async fn check_references(
        txn: &DatabaseTransaction,
        active: &ActiveModel,
    ) -> Result<(), RecordError> {
        if let Some(Some(department)) = present(&active.department_id) {
            ensure_exists::<super::departments::Entity>(txn, *department).await?;
        }
        Ok(())
    }

    /// Courses and departments outlive the professor; they just lose the reference
    async fn release(txn: &DatabaseTransaction, model: &Model) -> Result<(), DbErr> {
        super::courses::Entity::update_many()
            .col_expr(
                super::courses::Column::OfferedBy,
                Expr::value(Value::String(None)),
            )
            .filter(super::courses::Column::OfferedBy.eq(model.staff_number.as_str()))
            .exec(txn)
            .await?;

        super::departments::Entity::update_many()
            .col_expr(
                super::departments::Column::HeadOfDepartment,
                Expr::value(Value::String(None)),
            )
            .filter(super::departments::Column::HeadOfDepartment.eq(model.staff_number.as_str()))
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
        let professor = Model {
            staff_number: "87654321".to_owned(),
            first_name: "Alan".to_owned(),
            last_name: "Turing".to_owned(),
            hiring_date: None,
            department_id: None,
        };
        assert_eq!(professor.to_string(), "Alan Turing (87654321)");
    }

    #[test]
    fn test_form_optional_fields_default_to_absent() {
        let form: Form = serde_json::from_str(
            r#"{"staff_number": "87654321", "first_name": "Alan", "last_name": "Turing"}"#,
        )
        .unwrap();
        assert_eq!(form.hiring_date, None);
        assert_eq!(form.department_id, None);
    }

    #[test]
    fn test_validate_rejects_long_name() {
        let active = ActiveModel {
            last_name: Set("x".repeat(51)),
            ..Default::default()
        };
        assert_eq!(active.validate().unwrap_err().field(), Some("last_name"));
    }
}
