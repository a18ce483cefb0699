use super::{TO_BE_ANNOUNCED, or_absent};
use crate::{
    error::RecordError,
    services::{Record, record::ensure_exists},
    validate::{Validate, present},
};
use models::{ValidationError, days::DaySet, validators};
use sea_orm::{
    ActiveValue::{NotSet, Set},
    DatabaseConnection, DatabaseTransaction,
    entity::prelude::*,
};
use serde::{Deserialize, Serialize};

const TIME_FORMAT: &str = "%H:%M";

/// When and where a course meets
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "schedules")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub student_id: Option<String>,
    pub course_id: Option<i32>,
    pub classroom_id: Option<i32>,
    #[sea_orm(column_type = "Text")]
    pub day: DaySet,
    pub start_time: Option<Time>,
    pub end_time: Option<Time>,
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
    #[sea_orm(
        belongs_to = "super::classrooms::Entity",
        from = "Column::ClassroomId",
        to = "super::classrooms::Column::Id",
        on_delete = "SetNull"
    )]
    Classroom,
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

impl Related<super::classrooms::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Classroom.def()
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
        if let Some(Some(student)) = present(&self.student_id) {
            validators::student_number(student)?;
        }
        if present(&self.day).is_some_and(|day| day.is_empty()) {
            return Err(ValidationError::NoDays { field: "day" });
        }

        // Only compare the window when both ends are part of the write
        if let (Some(start), Some(end)) = (present(&self.start_time), present(&self.end_time)) {
            validators::time_range(*start, *end)?;
        }

        Ok(())
    }
}

impl Model {
    /// The days and hours, e.g. `MON,WED 09:00-10:30`
    pub fn time_slot(&self) -> String {
        let window = match (self.start_time, self.end_time) {
            (None, None) => TO_BE_ANNOUNCED.to_owned(),
            (start, end) => format!("{}-{}", format_time(start), format_time(end)),
        };
        format!("{} {}", self.day, window)
    }

    /// The student is named by number, so it needs no lookup
    pub fn describe(
        &self,
        course: Option<&super::courses::Model>,
        classroom: Option<&super::classrooms::Model>,
    ) -> String {
        format!(
            "{}: {} @ {} ({})",
            or_absent(self.student_id.as_ref()),
            or_absent(course.map(|course| &course.course_name)),
            or_absent(classroom.map(|classroom| &classroom.class_number)),
            self.time_slot()
        )
    }
}

fn format_time(time: Option<Time>) -> String {
    time.map_or_else(
        || TO_BE_ANNOUNCED.to_owned(),
        |time| time.format(TIME_FORMAT).to_string(),
    )
}

#[derive(Clone, Debug, Deserialize)]
pub struct Form {
    #[serde(default)]
    pub student_id: Option<String>,
    #[serde(default)]
    pub course_id: Option<i32>,
    #[serde(default)]
    pub classroom_id: Option<i32>,
    pub day: DaySet,
    #[serde(default)]
    pub start_time: Option<Time>,
    #[serde(default)]
    pub end_time: Option<Time>,
}

#[async_trait::async_trait]
impl Record for Entity {
    const NAME: &'static str = "schedules";
    const VERBOSE_NAME: &'static str = "Schedule";

    type Form = Form;
    type Active = ActiveModel;

    fn search_columns() -> Vec<Column> {
        vec![Column::StudentId, Column::Day]
    }

    fn into_active_model(form: Form, key: Option<i32>) -> ActiveModel {
        ActiveModel {
            id: key.map_or(NotSet, Set),
            student_id: Set(form.student_id),
            course_id: Set(form.course_id),
            classroom_id: Set(form.classroom_id),
            day: Set(form.day),
            start_time: Set(form.start_time),
            end_time: Set(form.end_time),
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
        if let Some(Some(classroom)) = present(&active.classroom_id) {
            ensure_exists::<super::classrooms::Entity>(txn, *classroom).await?;
        }
        Ok(())
    }

    async fn release(_txn: &DatabaseTransaction, _model: &Model) -> Result<(), DbErr> {
        Ok(())
    }

    async fn display(db: &DatabaseConnection, model: &Model) -> Result<String, DbErr> {
        let course = model.find_related(super::courses::Entity).one(db).await?;
        let classroom = model.find_related(super::classrooms::Entity).one(db).await?;
        Ok(model.describe(course.as_ref(), classroom.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::unit_count::UnitCount;

    fn lecture() -> Model {
        Model {
            id: 1,
            student_id: Some("12345678".to_owned()),
            course_id: Some(40123),
            classroom_id: Some(1),
            day: DaySet::MONDAY | DaySet::WEDNESDAY,
            start_time: Time::from_hms_opt(9, 0, 0),
            end_time: Time::from_hms_opt(10, 30, 0),
        }
    }

    #[test]
    fn test_describe() {
        let course = super::super::courses::Model {
            course_code: 40123,
            course_name: "Compilers".to_owned(),
            unit_count: UnitCount::Three,
            offered_by: None,
        };
        let classroom = super::super::classrooms::Model {
            id: 1,
            class_number: "101".to_owned(),
            department_id: None,
            capacity: 30,
        };

        assert_eq!(
            lecture().describe(Some(&course), Some(&classroom)),
            "12345678: Compilers @ 101 (MON,WED 09:00-10:30)"
        );

        let mut unassigned = lecture();
        unassigned.student_id = None;
        assert_eq!(
            unassigned.describe(None, None),
            "N/A: N/A @ N/A (MON,WED 09:00-10:30)"
        );
    }

    #[test]
    fn test_time_slot_without_times() {
        let mut schedule = lecture();
        schedule.end_time = None;
        assert_eq!(schedule.time_slot(), "MON,WED 09:00-TBA");

        schedule.start_time = None;
        assert_eq!(schedule.time_slot(), "MON,WED TBA");
    }

    #[test]
    fn test_validate() {
        let mut active: ActiveModel = lecture().into();
        assert!(active.validate().is_ok());

        active.end_time = Set(Time::from_hms_opt(8, 0, 0));
        assert_eq!(active.validate().unwrap_err(), ValidationError::TimeRange);

        active.end_time = Set(None);
        assert!(active.validate().is_ok());

        active.student_id = Set(Some("123".to_owned()));
        assert_eq!(active.validate().unwrap_err().field(), Some("student_number"));
        active.student_id = Set(None);

        active.day = Set(DaySet::NONE);
        assert_eq!(active.validate().unwrap_err().field(), Some("day"));
    }

    #[test]
    fn test_form_parses_day_codes() {
        let form: Form =
            serde_json::from_str(r#"{"day": "MON,WED", "start_time": "09:00:00"}"#).unwrap();
        assert_eq!(form.day, DaySet::MONDAY | DaySet::WEDNESDAY);
        assert_eq!(form.start_time, Time::from_hms_opt(9, 0, 0));
        assert_eq!(form.end_time, None);
    }
}
