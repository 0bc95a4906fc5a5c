//! Transforms a swagger document into the API model.

use tracing::debug;

use crate::error::{Error, Result};
use crate::model::{
    ApiEnumDefinition, ApiMethod, ApiModel, ApiModelDefinition, ApiParameter, EnumItem,
    ParameterLocation,
};
use crate::resolve::resolve_type_name;
use crate::swagger::{SwaggerDocument, SwaggerProperty};

/// Success status codes, checked in priority order; the first one present
/// on an operation supplies the response type.
const SUCCESS_CODES: [&str; 4] = ["200", "201", "202", "204"];

/// Builds the [`ApiModel`] from a [`SwaggerDocument`].
pub struct ModelBuilder;

impl ModelBuilder {
    /// Walk every (path, verb) pair and every schema definition, producing
    /// the complete model. Any unresolvable type or unrecognized parameter
    /// location aborts the build.
    pub fn build(doc: &SwaggerDocument) -> Result<ApiModel> {
        let mut model = ApiModel {
            api_version: doc.resolved_api_version().map(str::to_string),
            ..Default::default()
        };

        // Paths and verbs iterate in ascending order via BTreeMap
        for (path, verbs) in &doc.paths {
            for (verb, operation) in verbs {
                let mut method = ApiMethod {
                    name: operation.operation_id.clone().unwrap_or_default(),
                    category: operation.tags.first().cloned().unwrap_or_default(),
                    uri: path.clone(),
                    http_verb: verb.clone(),
                    summary: operation.summary.clone(),
                    description: operation.description.clone(),
                    parameters: Vec::new(),
                    body_param: None,
                    response_type: None,
                    response_type_name: None,
                };

                for parameter in &operation.parameters {
                    let name = parameter.name.clone().unwrap_or_default();
                    let location = parameter.location.as_deref().unwrap_or_default();
                    let location = ParameterLocation::from_swagger(location).ok_or_else(|| {
                        Error::UnknownParameterLocation {
                            location: location.to_string(),
                            name: name.clone(),
                        }
                    })?;

                    let mut param = resolve_parameter(parameter, location)?;
                    if location == ParameterLocation::Body {
                        // The body parameter is always rendered as `model`
                        // and re-appended after the loop so it sorts last
                        param.name = "model".to_string();
                        param.clean_name = "model".to_string();
                        method.body_param = Some(param);
                    } else {
                        method.parameters.push(param);
                    }

                    if parameter.enum_data_type.is_some() {
                        register_enum(&mut model.enums, parameter);
                    }
                }
                if let Some(body) = method.body_param.clone() {
                    method.parameters.push(body);
                }

                for code in SUCCESS_CODES {
                    if let Some(response) = operation.responses.get(code) {
                        let schema = response.schema.as_ref();
                        method.response_type =
                            schema.and_then(|s| s.prop_type.clone());
                        method.response_type_name = Some(resolve_type_name(schema)?);
                        if let Some(schema) = schema {
                            if schema.enum_data_type.is_some() {
                                register_enum(&mut model.enums, schema);
                            }
                        }
                        break;
                    }
                }

                model.methods.push(method);
            }
        }

        for (schema_name, definition) in &doc.definitions {
            let mut def = ApiModelDefinition {
                schema_name: schema_name.clone(),
                comment: definition.description.clone().unwrap_or_default(),
                example: definition.example.clone(),
                properties: Vec::new(),
            };

            for (prop_name, prop) in &definition.properties {
                // The schema-level required list overrides the
                // per-property default
                let mut prop = prop.clone();
                if !prop.required {
                    if let Some(required) = &definition.required {
                        prop.required = required.contains(prop_name);
                    }
                }

                let mut resolved = resolve_parameter(&prop, ParameterLocation::Body)?;
                resolved.name = prop_name.clone();
                resolved.clean_name = clean_name(prop_name);
                def.properties.push(resolved);

                if prop.enum_data_type.is_some() {
                    register_enum(&mut model.enums, &prop);
                }
            }

            model.models.push(def);
        }

        model
            .methods
            .sort_by(|a, b| (&a.category, &a.name).cmp(&(&b.category, &b.name)));
        model.categories = model.methods.iter().map(|m| m.category.clone()).collect();
        model.categories.dedup();

        debug!(
            methods = model.methods.len(),
            models = model.models.len(),
            enums = model.enums.len(),
            "Built API model"
        );
        Ok(model)
    }
}

/// Resolve one swagger descriptor into an [`ApiParameter`].
fn resolve_parameter(
    prop: &SwaggerProperty,
    location: ParameterLocation,
) -> Result<ApiParameter> {
    let name = prop.name.clone().unwrap_or_default();
    let is_array = prop.prop_type.as_deref() == Some("array");
    let array_element_type = if is_array {
        // Invariant: is_array implies the element type is present
        Some(resolve_type_name(prop.items.as_deref())?.replace('?', ""))
    } else {
        None
    };

    Ok(ApiParameter {
        clean_name: clean_name(&name),
        name,
        type_name: resolve_type_name(Some(prop))?,
        location,
        comment: prop.description.clone().unwrap_or_default(),
        required: prop.required,
        read_only: prop.read_only,
        max_length: prop.max_length,
        min_length: prop.min_length,
        is_array,
        array_element_type,
    })
}

/// Strip the `$` prefix the exporter puts on paging options so the name is
/// a valid identifier in the generated clients.
fn clean_name(name: &str) -> String {
    name.replace('$', "")
}

/// Find-or-create the enum named by the descriptor and merge in any values
/// not already present. Duplicate registrations by name never create a
/// second definition.
fn register_enum(enums: &mut Vec<ApiEnumDefinition>, prop: &SwaggerProperty) {
    let Some(enum_name) = prop.enum_data_type.as_deref() else {
        return;
    };

    let index = match enums.iter().position(|e| e.name == enum_name) {
        Some(index) => index,
        None => {
            enums.push(ApiEnumDefinition {
                name: enum_name.to_string(),
                items: Vec::new(),
            });
            enums.len() - 1
        }
    };
    let entry = &mut enums[index];

    if let Some(values) = &prop.enum_values {
        for value in values {
            if !entry.items.iter().any(|i| &i.value == value) {
                entry.items.push(EnumItem {
                    value: value.clone(),
                    comment: None,
                });
            }
        }
    }
}
