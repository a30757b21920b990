//! Declarative customizations, deserialized from a config file.
//!
//! A script is a list of operations applied in order, each one resolving its targets afresh:
//!
//! ```toml
//! [[operation]]
//! kind = "rename-method"
//! package = "com.example"
//! class = "Widget"
//! method = "getName"
//! new-name = "getTitle"
//!
//! [[operation]]
//! kind = "add-annotation"
//! package = "com.example"
//! class = "Widget"
//! member = { property = "name" }
//! annotation = "@JsonProperty(\"name\")"
//! ```

use serde::Deserialize;

use crate::error::{CustomizationError, Result};
use crate::library::LibraryCustomization;
use crate::modifiers::Modifiers;
use crate::{ClassCustomization, Customization, JavadocCustomization};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CustomizationScript {
    #[serde(default, rename = "operation")]
    pub operations: Vec<Operation>,
}

/// A member of a class, addressed by kind.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Member {
    /// Bare name or signature.
    Method(String),
    /// Bare name or signature.
    Constructor(String),
    Property(String),
    Constant(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case", rename_all_fields = "kebab-case")]
pub enum Operation {
    RenameClass {
        package: String,
        class: String,
        new_name: String,
    },
    RenameMethod {
        package: String,
        class: String,
        method: String,
        new_name: String,
    },
    RenameProperty {
        package: String,
        class: String,
        property: String,
        new_name: String,
    },
    RenameConstant {
        package: String,
        class: String,
        constant: String,
        new_name: String,
    },
    AddMethod {
        package: String,
        class: String,
        code: String,
        #[serde(default)]
        imports: Vec<String>,
    },
    AddConstructor {
        package: String,
        class: String,
        code: String,
        #[serde(default)]
        imports: Vec<String>,
    },
    AddStaticBlock {
        package: String,
        class: String,
        code: String,
        #[serde(default)]
        imports: Vec<String>,
    },
    AddImports {
        package: String,
        class: String,
        imports: Vec<String>,
    },
    RemoveMethod {
        package: String,
        class: String,
        method: String,
    },
    ReplaceBody {
        package: String,
        class: String,
        member: Member,
        body: String,
        #[serde(default)]
        imports: Vec<String>,
    },
    ReplaceParameters {
        package: String,
        class: String,
        member: Member,
        parameters: String,
        #[serde(default)]
        imports: Vec<String>,
    },
    SetReturnType {
        package: String,
        class: String,
        method: String,
        return_type: String,
        #[serde(default)]
        formatter: String,
    },
    /// Targets the class itself when `member` is absent.
    SetModifier {
        package: String,
        class: String,
        #[serde(default)]
        member: Option<Member>,
        modifiers: Vec<String>,
    },
    AddAnnotation {
        package: String,
        class: String,
        #[serde(default)]
        member: Option<Member>,
        annotation: String,
    },
    RemoveAnnotation {
        package: String,
        class: String,
        #[serde(default)]
        member: Option<Member>,
        annotation: String,
    },
    SetDescription {
        package: String,
        class: String,
        #[serde(default)]
        member: Option<Member>,
        description: String,
    },
    GenerateGetterAndSetter {
        package: String,
        class: String,
        property: String,
    },
}

impl Operation {
    /// Short name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Operation::RenameClass { .. } => "rename-class",
            Operation::RenameMethod { .. } => "rename-method",
            Operation::RenameProperty { .. } => "rename-property",
            Operation::RenameConstant { .. } => "rename-constant",
            Operation::AddMethod { .. } => "add-method",
            Operation::AddConstructor { .. } => "add-constructor",
            Operation::AddStaticBlock { .. } => "add-static-block",
            Operation::AddImports { .. } => "add-imports",
            Operation::RemoveMethod { .. } => "remove-method",
            Operation::ReplaceBody { .. } => "replace-body",
            Operation::ReplaceParameters { .. } => "replace-parameters",
            Operation::SetReturnType { .. } => "set-return-type",
            Operation::SetModifier { .. } => "set-modifier",
            Operation::AddAnnotation { .. } => "add-annotation",
            Operation::RemoveAnnotation { .. } => "remove-annotation",
            Operation::SetDescription { .. } => "set-description",
            Operation::GenerateGetterAndSetter { .. } => "generate-getter-and-setter",
        }
    }

    pub fn apply(&self, library: &mut LibraryCustomization) -> Result<()> {
        match self {
            Operation::RenameClass {
                package,
                class,
                new_name,
            } => {
                library.get_class(package, class)?.rename(library, new_name)?;
            }
            Operation::RenameMethod {
                package,
                class,
                method,
                new_name,
            } => {
                library
                    .get_class(package, class)?
                    .get_method(library, method)?
                    .rename(library, new_name)?;
            }
            Operation::RenameProperty {
                package,
                class,
                property,
                new_name,
            } => {
                library
                    .get_class(package, class)?
                    .get_property(library, property)?
                    .rename(library, new_name)?;
            }
            Operation::RenameConstant {
                package,
                class,
                constant,
                new_name,
            } => {
                library
                    .get_class(package, class)?
                    .get_constant(library, constant)?
                    .rename(library, new_name)?;
            }
            Operation::AddMethod {
                package,
                class,
                code,
                imports,
            } => {
                library
                    .get_class(package, class)?
                    .add_method(library, code, imports)?;
            }
            Operation::AddConstructor {
                package,
                class,
                code,
                imports,
            } => {
                library
                    .get_class(package, class)?
                    .add_constructor(library, code, imports)?;
            }
            Operation::AddStaticBlock {
                package,
                class,
                code,
                imports,
            } => {
                library
                    .get_class(package, class)?
                    .add_static_block(library, code, imports)?;
            }
            Operation::AddImports {
                package,
                class,
                imports,
            } => {
                library.get_class(package, class)?.add_imports(library, imports)?;
            }
            Operation::RemoveMethod {
                package,
                class,
                method,
            } => {
                library
                    .get_class(package, class)?
                    .remove_method(library, method)?;
            }
            Operation::ReplaceBody {
                package,
                class,
                member,
                body,
                imports,
            } => {
                let class = library.get_class(package, class)?;
                match member {
                    Member::Method(method) => {
                        class
                            .get_method(library, method)?
                            .replace_body(library, body, imports)?;
                    }
                    Member::Constructor(constructor) => {
                        class
                            .get_constructor(library, constructor)?
                            .replace_body(library, body, imports)?;
                    }
                    other => return Err(unsupported("replace-body", other)),
                }
            }
            Operation::ReplaceParameters {
                package,
                class,
                member,
                parameters,
                imports,
            } => {
                let class = library.get_class(package, class)?;
                match member {
                    Member::Method(method) => {
                        class
                            .get_method(library, method)?
                            .replace_parameters(library, parameters, imports)?;
                    }
                    Member::Constructor(constructor) => {
                        class
                            .get_constructor(library, constructor)?
                            .replace_parameters(library, parameters, imports)?;
                    }
                    other => return Err(unsupported("replace-parameters", other)),
                }
            }
            Operation::SetReturnType {
                package,
                class,
                method,
                return_type,
                formatter,
            } => {
                library
                    .get_class(package, class)?
                    .get_method(library, method)?
                    .set_return_type(library, return_type, formatter)?;
            }
            Operation::SetModifier {
                package,
                class,
                member,
                modifiers,
            } => {
                let modifiers = Modifiers::from_keywords(modifiers)?;
                let class = library.get_class(package, class)?;
                match member {
                    None => {
                        class.set_modifier(library, modifiers)?;
                    }
                    Some(Member::Method(method)) => {
                        class.get_method(library, method)?.set_modifier(library, modifiers)?;
                    }
                    Some(Member::Constructor(constructor)) => {
                        class
                            .get_constructor(library, constructor)?
                            .set_modifier(library, modifiers)?;
                    }
                    Some(Member::Property(property)) => {
                        class
                            .get_property(library, property)?
                            .set_modifier(library, modifiers)?;
                    }
                    Some(Member::Constant(constant)) => {
                        class
                            .get_constant(library, constant)?
                            .set_modifier(library, modifiers)?;
                    }
                }
            }
            Operation::AddAnnotation {
                package,
                class,
                member,
                annotation,
            } => {
                let class = library.get_class(package, class)?;
                annotate(library, &class, member.as_ref(), annotation, true)?;
            }
            Operation::RemoveAnnotation {
                package,
                class,
                member,
                annotation,
            } => {
                let class = library.get_class(package, class)?;
                annotate(library, &class, member.as_ref(), annotation, false)?;
            }
            Operation::SetDescription {
                package,
                class,
                member,
                description,
            } => {
                let class = library.get_class(package, class)?;
                javadoc_of(library, &class, member.as_ref())?
                    .set_description(library, description)?;
            }
            Operation::GenerateGetterAndSetter {
                package,
                class,
                property,
            } => {
                library
                    .get_class(package, class)?
                    .get_property(library, property)?
                    .generate_getter_and_setter(library)?;
            }
        }
        Ok(())
    }
}

fn unsupported(operation: &str, member: &Member) -> CustomizationError {
    CustomizationError::InvalidArgument(format!("{operation} does not apply to {member:?}"))
}

fn annotate(
    library: &mut LibraryCustomization,
    class: &ClassCustomization,
    member: Option<&Member>,
    annotation: &str,
    add: bool,
) -> Result<()> {
    macro_rules! apply {
        ($handle:expr) => {{
            let handle = $handle;
            if add {
                handle.add_annotation(library, annotation)?;
            } else {
                handle.remove_annotation(library, annotation)?;
            }
        }};
    }
    match member {
        None => apply!(class),
        Some(Member::Method(method)) => apply!(class.get_method(library, method)?),
        Some(Member::Constructor(constructor)) => {
            apply!(class.get_constructor(library, constructor)?)
        }
        Some(Member::Property(property)) => apply!(class.get_property(library, property)?),
        Some(Member::Constant(constant)) => apply!(class.get_constant(library, constant)?),
    }
    Ok(())
}

fn javadoc_of(
    library: &LibraryCustomization,
    class: &ClassCustomization,
    member: Option<&Member>,
) -> Result<JavadocCustomization> {
    match member {
        None => class.get_javadoc(library),
        Some(Member::Method(method)) => class.get_method(library, method)?.get_javadoc(library),
        Some(Member::Constructor(constructor)) => class
            .get_constructor(library, constructor)?
            .get_javadoc(library),
        Some(Member::Property(property)) => {
            class.get_property(library, property)?.get_javadoc(library)
        }
        Some(Member::Constant(constant)) => {
            class.get_constant(library, constant)?.get_javadoc(library)
        }
    }
}

impl Customization for CustomizationScript {
    fn customize(&self, library: &mut LibraryCustomization) -> Result<()> {
        for (index, operation) in self.operations.iter().enumerate() {
            tracing::debug!(
                target = "quill.customize",
                index,
                kind = operation.kind(),
                "applying operation"
            );
            operation.apply(library)?;
        }
        Ok(())
    }
}
