//! Java sources for the data models of a generated client library.
//!
//! The input is a [`CodeModel`] deserialized from the mapper's JSON output. [`generate`]
//! validates it and writes one file per model and enum into the `models` package, plus the
//! merge-patch helper when any model needs it.

mod content;
mod enum_template;
mod error;
mod merge_patch;
mod model;
mod model_template;

use std::collections::BTreeSet;

use quill_emit::{JavaFile, JavaPackage};

pub use content::{BodySerializer, ContentKind};
pub use enum_template::EnumTemplate;
pub use error::{Result, TemplateError};
pub use merge_patch::{JsonMergePatchHelperTemplate, JSON_MERGE_PATCH_HELPER};
pub use model::{ClientModel, ClientProperty, CodeModel, EnumType, EnumValue};
pub use model_template::ModelTemplate;

use model::check_identifier;

/// Validates `code_model` and renders every file it describes.
pub fn generate(code_model: &CodeModel) -> Result<JavaPackage> {
    validate(code_model)?;

    let mut package = JavaPackage::new();
    let factory = package.factory();
    let models_package = code_model.models_package();

    let model_template = ModelTemplate::new(code_model);
    for model in &code_model.models {
        let mut file = factory.create_source_file(&models_package, &model.name);
        model_template.write(model, &mut file)?;
        package.add_java_file(file);
    }

    let enum_template = EnumTemplate::new();
    for enum_type in &code_model.enums {
        let mut file = factory.create_source_file(&models_package, &enum_type.name);
        enum_template.write(enum_type, &mut file)?;
        package.add_java_file(file);
    }

    if code_model.merge_patch_models().next().is_some() {
        let mut file = factory.create_source_file(
            &code_model.implementation_package(),
            JSON_MERGE_PATCH_HELPER,
        );
        JsonMergePatchHelperTemplate::new(code_model).write(&mut file);
        package.add_java_file(file);
    }

    if !code_model.models.is_empty() || !code_model.enums.is_empty() {
        let mut file = factory.create_package_info(&models_package);
        write_package_info(code_model, &mut file);
        package.add_java_file(file);
    }

    tracing::info!(
        target = "quill.templates",
        package = %code_model.package_name,
        models = code_model.models.len(),
        enums = code_model.enums.len(),
        files = package.java_files().len(),
        "generated models"
    );
    Ok(package)
}

fn write_package_info(code_model: &CodeModel, file: &mut JavaFile) {
    file.javadoc_comment(&format!(
        "Package containing the data models for {}",
        code_model.package_name
    ));
    file.line(&format!("package {};", code_model.models_package()));
}

/// Rejects code models that would produce Java that doesn't compile.
pub fn validate(code_model: &CodeModel) -> Result<()> {
    for segment in code_model.package_name.split('.') {
        check_identifier("package", segment)?;
    }

    let mut types = BTreeSet::new();
    let type_names = code_model
        .models
        .iter()
        .map(|model| model.name.as_str())
        .chain(code_model.enums.iter().map(|enum_type| enum_type.name.as_str()));
    for name in type_names {
        check_identifier("type", name)?;
        if !types.insert(name) {
            return Err(TemplateError::DuplicateType(name.to_string()));
        }
    }

    let template = ModelTemplate::new(code_model);
    for model in &code_model.models {
        let mut properties = BTreeSet::new();
        for property in &model.properties {
            check_identifier("property", &property.name)?;
            if !properties.insert(property.name.as_str()) {
                return Err(TemplateError::DuplicateProperty {
                    model: model.name.clone(),
                    property: property.name.clone(),
                });
            }
        }
        template.ancestors(model)?;
        if model.is_merge_patch() && model.parent.is_some() {
            return Err(TemplateError::MergePatchChild(model.name.clone()));
        }
        model.content_kind()?;
    }

    for enum_type in &code_model.enums {
        if enum_type.expandable && !enum_type.is_string() {
            return Err(TemplateError::UnsupportedEnum {
                name: enum_type.name.clone(),
                element_type: enum_type.element_type.clone(),
            });
        }
        let mut constants = BTreeSet::new();
        for value in &enum_type.values {
            let constant = value.constant_name();
            check_identifier("enum value", &constant)?;
            if !constants.insert(constant.clone()) {
                return Err(TemplateError::DuplicateProperty {
                    model: enum_type.name.clone(),
                    property: constant,
                });
            }
        }
    }

    tracing::debug!(
        target = "quill.templates",
        package = %code_model.package_name,
        types = types.len(),
        "code model is valid"
    );
    Ok(())
}
