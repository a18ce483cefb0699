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
#[sea_orm(table_name = "assignments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub course_id: Option<i32>,
    pub deadline: Date,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::CourseId",
        to = "super::courses::Column::CourseCode",
        on_delete = "Cascade"
    )]
    Course,
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
        if let Some(title) = present(&self.title) {
            validators::text("title", title)?;
        }
        Ok(())
    }
}

impl Model {
    pub fn describe(&self, course: Option<&super::courses::Model>) -> String {
        format!(
            "{} (course: {}) (deadline: {})",
            self.title,
            or_absent(course.map(|course| &course.course_name)),
            self.deadline
        )
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Form {
    pub title: String,
    #[serde(default)]
    pub course_id: Option<i32>,
    pub deadline: Date,
}

#[async_trait::async_trait]
impl Record for Entity {
    const NAME: &'static str = "assignments";
    const VERBOSE_NAME: &'static str = "Assignment";

    type Form = Form;
    type Active = ActiveModel;

    fn search_columns() -> Vec<Column> {
        vec![Column::Title]
    }

    fn into_active_model(form: Form, key: Option<i32>) -> ActiveModel {
        ActiveModel {
            id: key.map_or(NotSet, Set),
            title: Set(form.title),
            course_id: Set(form.course_id),
            deadline: Set(form.deadline),
        }
    }

    async fn check_references(
        txn: &DatabaseTransaction,
        active: &ActiveModel,
    ) -> Result<(), RecordError> {
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

    #[test]
    fn test_describe() {
        let assignment = Model {
            id: 1,
            title: "Parser".to_owned(),
            course_id: None,
            deadline: Date::from_ymd_opt(2024, 5, 1).unwrap(),
        };
        assert_eq!(
            assignment.describe(None),
            "Parser (course: N/A) (deadline: 2024-05-01)"
        );
    }

    #[test]
    fn test_validate_title() {
        let active = ActiveModel {
            title: Set("  ".to_owned()),
            ..Default::default()
        };
        assert_eq!(
            active.validate().unwrap_err(),
            ValidationError::Blank { field: "title" }
        );
    }
}
