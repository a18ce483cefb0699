use crate::{entities::*, services::Record};
use serde::Serialize;

/// A model registered with the record administration surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModelAdmin {
    pub name: &'static str,
    pub verbose_name: &'static str,
}

impl ModelAdmin {
    pub fn of<E: Record>() -> Self {
        Self {
            name: E::NAME,
            verbose_name: E::VERBOSE_NAME,
        }
    }
}

/// Every registered model, in the order they are listed
pub fn site() -> Vec<ModelAdmin> {
    vec![
        ModelAdmin::of::<students::Entity>(),
        ModelAdmin::of::<professors::Entity>(),
        ModelAdmin::of::<courses::Entity>(),
        ModelAdmin::of::<enrollments::Entity>(),
        ModelAdmin::of::<departments::Entity>(),
        ModelAdmin::of::<classrooms::Entity>(),
        ModelAdmin::of::<schedules::Entity>(),
        ModelAdmin::of::<assignments::Entity>(),
        ModelAdmin::of::<grade_reports::Entity>(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_site_registers_every_model_once() {
        let site = site();
        assert_eq!(site.len(), 9);

        let names: HashSet<_> = site.iter().map(|model| model.name).collect();
        assert_eq!(names.len(), site.len());
    }

    #[test]
    fn test_names_match_tables() {
        use sea_orm::EntityName;

        assert_eq!(students::Entity::NAME, students::Entity.table_name());
        assert_eq!(
            grade_reports::Entity::NAME,
            grade_reports::Entity.table_name()
        );
    }
}
