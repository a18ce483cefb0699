use crate::{
    dtos::record::{ListParams, ModelResponse, PaginatedRecordsResponse, RecordResponse},
    routes::{admin, health},
};
use database::admin::site;
use utoipa::{
    IntoParams, Modify, OpenApi,
    openapi::{
        Required, ResponseBuilder,
        path::{Operation, OperationBuilder, ParameterBuilder, ParameterIn, PathItem},
    },
};

/// Documents the generic record routes of every registered model
struct RecordPaths;

impl RecordPaths {
    fn operation(name: &str, summary: String, responses: &[(&str, &str)]) -> OperationBuilder {
        responses.iter().fold(
            OperationBuilder::new().tag("Admin").summary(Some(summary)).operation_id(Some(name)),
            |operation, (status, description)| {
                operation.response(*status, ResponseBuilder::new().description(*description).build())
            },
        )
    }

    fn with_key(operation: OperationBuilder) -> Operation {
        operation
            .parameter(
                ParameterBuilder::new()
                    .name("key")
                    .parameter_in(ParameterIn::Path)
                    .required(Required::True)
                    .description(Some("Primary key of the record")),
            )
            .build()
    }
}

impl Modify for RecordPaths {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        for model in site() {
            let name = model.name;
            let verbose = model.verbose_name;

            let list = ListParams::into_params(|| Some(ParameterIn::Query))
                .into_iter()
                .fold(
                    Self::operation(
                        &format!("list_{name}"),
                        format!("List {verbose} records"),
                        &[("200", "One page of records")],
                    ),
                    |operation, parameter| operation.parameter(parameter),
                )
                .build();

            let create = Self::operation(
                &format!("create_{name}"),
                format!("Create a {verbose}"),
                &[
                    ("201", "Record created"),
                    ("409", "A unique value is already taken"),
                    ("422", "Invalid field or missing referenced record"),
                ],
            )
            .build();

            let mut collection = PathItem::default();
            collection.get = Some(list);
            collection.post = Some(create);

            let retrieve = Self::with_key(Self::operation(
                &format!("retrieve_{name}"),
                format!("Get a {verbose}"),
                &[("200", "Record found"), ("404", "No such record")],
            ));

            let update = Self::with_key(Self::operation(
                &format!("update_{name}"),
                format!("Replace a {verbose}"),
                &[
                    ("200", "Record updated"),
                    ("404", "No such record"),
                    ("422", "Invalid field or missing referenced record"),
                ],
            ));

            let destroy = Self::with_key(Self::operation(
                &format!("destroy_{name}"),
                format!("Delete a {verbose} and apply its delete policy"),
                &[("204", "Record deleted"), ("404", "No such record")],
            ));

            let mut member = PathItem::default();
            member.get = Some(retrieve);
            member.put = Some(update);
            member.delete = Some(destroy);

            openapi
                .paths
                .paths
                .insert(format!("/admin/{name}"), collection);
            openapi
                .paths
                .paths
                .insert(format!("/admin/{name}/{{key}}"), member);
        }
    }
}

/// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(health::health, admin::index),
    components(schemas(ModelResponse, RecordResponse, PaginatedRecordsResponse)),
    modifiers(&RecordPaths),
    tags(
        (name = "Health", description = "Service status"),
        (name = "Admin", description = "Record administration"),
    ),
    info(
        title = "Academic Records API",
        version = "1.0.0",
        description = "Administration of students, professors, courses and their records",
        license(
            name = "MIT OR Apache-2.0",
        )
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_model_is_documented() {
        let doc = ApiDoc::openapi();

        assert!(doc.paths.paths.contains_key("/health"));
        assert!(doc.paths.paths.contains_key("/admin"));

        for model in site() {
            let collection = &doc.paths.paths[&format!("/admin/{}", model.name)];
            assert!(collection.get.is_some() && collection.post.is_some());

            let member = &doc.paths.paths[&format!("/admin/{}/{{key}}", model.name)];
            assert!(member.get.is_some() && member.put.is_some() && member.delete.is_some());
        }
    }
}
