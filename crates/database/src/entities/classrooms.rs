use super::or_absent;
use crate::{
    error::RecordError,
    services::{Record, record::ensure_exists},
    validate::{Validate, present},
};
use models::{ValidationError, validators};
use sea_orm::{
    ActiveValue::{NotSet, Set},
    DatabaseConnection, DatabaseTransaction, Value,
    entity::prelude::*,
};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "classrooms")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub class_number: String,
    pub department_id: Option<i32>,
    #[sea_orm(default_value = 0)]
    pub capacity: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::departments::Entity",
        from = "Column::DepartmentId",
        to = "super::departments::Column::Id",
        on_delete = "Cascade"
    )]
    Department,
    #[sea_orm(has_many = "super::schedules::Entity")]
    Schedules,
}

impl Related<super::departments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Department.def()
    }
}

impl Related<super::schedules::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Schedules.def()
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
        if let Some(number) = present(&self.class_number) {
            validators::class_number(number)?;
        }
        if let Some(capacity) = present(&self.capacity) {
            validators::capacity(*capacity)?;
        }
        Ok(())
    }
}

impl Model {
    pub fn describe(&self, department: Option<&super::departments::Model>) -> String {
        format!(
            "{} ({}) (capacity: {})",
            self.class_number,
            or_absent(department.map(|department| &department.name)),
            self.capacity
        )
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Form {
    pub class_number: String,
    #[serde(default)]
    pub department_id: Option<i32>,
    #[serde(default)]
    pub capacity: i32,
}

#[async_trait::async_trait]
impl Record for Entity {
    const NAME: &'static str = "classrooms";
    const VERBOSE_NAME: &'static str = "Classroom";

    type Form = Form;
    type Active = ActiveModel;

    fn search_columns() -> Vec<Column> {
        vec![Column::ClassNumber]
    }

    fn into_active_model(form: Form, key: Option<i32>) -> ActiveModel {
        ActiveModel {
            id: key.map_or(NotSet, Set),
            class_number: Set(form.class_number),
            department_id: Set(form.department_id),
            capacity: Set(form.capacity),
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

    /// Schedules keep their slot but lose the room
    async fn release(txn: &DatabaseTransaction, model: &Model) -> Result<(), DbErr> {
        super::schedules::Entity::update_many()
            .col_expr(
                super::schedules::Column::ClassroomId,
                Expr::value(Value::Int(None)),
            )
            .filter(super::schedules::Column::ClassroomId.eq(model.id))
            .exec(txn)
            .await?;

        Ok(())
    }

    async fn display(db: &DatabaseConnection, model: &Model) -> Result<String, DbErr> {
        let department = model.find_related(super::departments::Entity).one(db).await?;
        Ok(model.describe(department.as_ref()))
    }
}
