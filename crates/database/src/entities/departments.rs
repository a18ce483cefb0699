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
#[sea_orm(table_name = "departments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub head_of_department: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::professors::Entity",
        from = "Column::HeadOfDepartment",
        to = "super::professors::Column::StaffNumber",
        on_delete = "SetNull"
    )]
    Head,
    #[sea_orm(has_many = "super::classrooms::Entity")]
    Classrooms,
}

impl Related<super::classrooms::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Classrooms.def()
    }
}

// A department relates to professors both as head and as members. The head
// is the relation worth following from here; members are reached through
// `professors::Relation::Department`.
impl Related<super::professors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Head.def()
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
        if let Some(name) = present(&self.name) {
            validators::text("name", name)?;
        }
        Ok(())
    }
}

impl Model {
    pub fn describe(&self, head: Option<&super::professors::Model>) -> String {
        format!("{} (head: {})", self.name, or_absent(head))
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Form {
    pub name: String,
    #[serde(default)]
    pub head_of_department: Option<String>,
}

#[async_trait::async_trait]
impl Record for Entity {
    const NAME: &'static str = "departments";
    const VERBOSE_NAME: &'static str = "Department";

    type Form = Form;
    type Active = ActiveModel;

    fn search_columns() -> Vec<Column> {
        vec![Column::Name]
    }

    fn into_active_model(form: Form, key: Option<i32>) -> ActiveModel {
        ActiveModel {
            id: key.map_or(NotSet, Set),
            name: Set(form.name),
            head_of_department: Set(form.head_of_department),
        }
    }

    async fn check_references(
        txn: &DatabaseTransaction,
        active: &ActiveModel,
    ) -> Result<(), RecordError> {
        if let Some(Some(head)) = present(&active.head_of_department) {
            ensure_exists::<super::professors::Entity>(txn, head.clone()).await?;
        }
        Ok(())
    }

    /// Classrooms go with the department; members stay on without one
    async fn release(txn: &DatabaseTransaction, model: &Model) -> Result<(), DbErr> {
        let classrooms = super::classrooms::Entity::find()
            .filter(super::classrooms::Column::DepartmentId.eq(model.id))
            .all(txn)
            .await?;

        for classroom in &classrooms {
            <super::classrooms::Entity as Record>::release(txn, classroom).await?;
        }

        super::classrooms::Entity::delete_many()
            .filter(super::classrooms::Column::DepartmentId.eq(model.id))
            .exec(txn)
            .await?;

        super::professors::Entity::update_many()
            .col_expr(
                super::professors::Column::DepartmentId,
                Expr::value(Value::Int(None)),
            )
            .filter(super::professors::Column::DepartmentId.eq(model.id))
            .exec(txn)
            .await?;

        Ok(())
    }

    async fn display(db: &DatabaseConnection, model: &Model) -> Result<String, DbErr> {
        let head = model.find_related(super::professors::Entity).one(db).await?;
        Ok(model.describe(head.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn computer_science() -> Model {
        Model {
            id: 1,
            name: "Computer Science".to_owned(),
            head_of_department: Some("87654321".to_owned()),
        }
    }

    #[test]
    fn test_describe_with_head() {
        let head = super::super::professors::Model {
            staff_number: "87654321".to_owned(),
            first_name: "Alan".to_owned(),
            last_name: "Turing".to_owned(),
            hiring_date: None,
            department_id: Some(1),
        };
        assert_eq!(
            computer_science().describe(Some(&head)),
            "Computer Science (head: Alan Turing (87654321))"
        );
    }

    #[test]
    fn test_describe_without_head() {
        assert_eq!(
            computer_science().describe(None),
            "Computer Science (head: N/A)"
        );
    }

    #[test]
    fn test_new_department_leaves_id_to_the_database() {
        let form = Form {
            name: "Physics".to_owned(),
            head_of_department: None,
        };
        let active = Entity::into_active_model(form, None);
        assert_eq!(active.id, NotSet);
    }
}
