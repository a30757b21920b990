//! Declarations and name references of a Java file, read from a `tree-sitter-java` tree.
//!
//! Declarations are the types of the file and their direct members; members of local and
//! anonymous classes are not reported. References are every identifier in code position,
//! tagged with what it names: a type, a simple name (resolved against the fields, parameters
//! and locals in scope), a method call or a field access. Receivers are kept as unresolved
//! expressions; the index resolves them across files when it computes a rename.

use std::cell::RefCell;
use std::ops::Range;

use lsp_types::SymbolKind;
use tree_sitter::{Node, Parser, Tree};

thread_local! {
    static JAVA_PARSER: RefCell<Result<Parser, String>> = RefCell::new({
        let mut parser = Parser::new();
        match parser.set_language(tree_sitter_java::language()) {
            Ok(()) => Ok(parser),
            Err(_) => Err("tree-sitter-java language load failed".to_string()),
        }
    });
}

fn parse_tree(source: &str) -> Result<Tree, String> {
    JAVA_PARSER.with(|parser_cell| {
        let mut parser = parser_cell
            .try_borrow_mut()
            .map_err(|_| "tree-sitter parser is already in use".to_string())?;
        let parser = match parser.as_mut() {
            Ok(parser) => parser,
            Err(err) => return Err(err.clone()),
        };

        parser
            .parse(source, None)
            .ok_or_else(|| "tree-sitter failed to produce a syntax tree".to_string())
    })
}

const TYPE_DECLARATIONS: &[&str] = &[
    "class_declaration",
    "interface_declaration",
    "enum_declaration",
    "record_declaration",
    "annotation_type_declaration",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    Class,
    Interface,
    Enum,
    Record,
    Method,
    Constructor,
    Field,
    Constant,
    EnumMember,
}

impl DeclKind {
    pub fn symbol_kind(self) -> SymbolKind {
        match self {
            DeclKind::Class | DeclKind::Record => SymbolKind::CLASS,
            DeclKind::Interface => SymbolKind::INTERFACE,
            DeclKind::Enum => SymbolKind::ENUM,
            DeclKind::Method => SymbolKind::METHOD,
            DeclKind::Constructor => SymbolKind::CONSTRUCTOR,
            DeclKind::Field => SymbolKind::FIELD,
            DeclKind::Constant => SymbolKind::CONSTANT,
            DeclKind::EnumMember => SymbolKind::ENUM_MEMBER,
        }
    }

    pub fn is_type(self) -> bool {
        matches!(
            self,
            DeclKind::Class | DeclKind::Interface | DeclKind::Enum | DeclKind::Record
        )
    }

    pub fn is_variable(self) -> bool {
        matches!(
            self,
            DeclKind::Field | DeclKind::Constant | DeclKind::EnumMember
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// `name(Type, Type)` for callables, the plain name otherwise.
    pub name: String,
    pub simple_name: String,
    pub kind: DeclKind,
    /// Enclosing type, `None` for top-level types.
    pub container: Option<String>,
    /// Byte range of the declared name.
    pub name_span: Range<usize>,
    /// Byte range of the whole declaration node.
    pub span: Range<usize>,
    pub param_types: Vec<String>,
    pub varargs: bool,
    /// Simple name of a field's type or a method's return type.
    pub value_type: Option<String>,
}

impl Declaration {
    pub fn accepts_arguments(&self, args: usize) -> bool {
        if self.varargs {
            args + 1 >= self.param_types.len()
        } else {
            args == self.param_types.len()
        }
    }
}

/// The expression a call or field access is made on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Receiver {
    /// No qualifier: the enclosing type.
    Implicit,
    This,
    Super,
    /// A value or type whose declared type has this simple name.
    Type(String),
    Call {
        receiver: Box<Receiver>,
        name: String,
    },
    Field {
        receiver: Box<Receiver>,
        name: String,
    },
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceKind {
    /// A type name. `qualifier` is the package or outer type written in front of it.
    Type { qualifier: Option<String> },
    /// A simple name in an expression; `variable` is the name offset of the field, parameter
    /// or local it resolves to in this file.
    Name { variable: Option<usize> },
    Call { receiver: Receiver, args: usize },
    FieldAccess { receiver: Receiver },
    MethodRef { receiver: Receiver },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub name: String,
    pub span: Range<usize>,
    pub kind: ReferenceKind,
    /// Innermost type declaration the reference sits in.
    pub enclosing: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedFile {
    pub package: Option<String>,
    /// Single-type and on-demand (`pkg.*`) imports; static imports are left out.
    pub imports: Vec<String>,
    pub declarations: Vec<Declaration>,
    pub references: Vec<Reference>,
}

pub fn parse_java(text: &str) -> Result<ParsedFile, String> {
    let tree = parse_tree(text)?;
    let root = tree.root_node();
    let mut extractor = Extractor {
        text,
        variables: Vec::new(),
        file: ParsedFile::default(),
    };
    extractor.header(root);
    extractor.members(root, None, false);
    visit_nodes(root, &mut |node| extractor.variable(node));
    visit_nodes(root, &mut |node| extractor.reference(node));
    Ok(extractor.file)
}

#[derive(Debug)]
struct Variable {
    name: String,
    ty: Option<String>,
    scope: Range<usize>,
    declared_at: usize,
}

struct Extractor<'a> {
    text: &'a str,
    variables: Vec<Variable>,
    file: ParsedFile,
}

fn visit_nodes<'a, F: FnMut(Node<'a>)>(node: Node<'a>, f: &mut F) {
    f(node);
    if node.child_count() == 0 {
        return;
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        visit_nodes(child, f);
    }
}

fn named_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    let children = node.named_children(&mut cursor).collect();
    children
}

fn modifier_node(node: Node<'_>) -> Option<Node<'_>> {
    node.child_by_field_name("modifiers")
        .or_else(|| named_children(node).into_iter().find(|child| child.kind() == "modifiers"))
}

fn has_modifier(node: Node<'_>, keyword: &str) -> bool {
    modifier_node(node).is_some_and(|modifiers| {
        let mut cursor = modifiers.walk();
        let found = modifiers
            .children(&mut cursor)
            .any(|child| child.kind() == keyword);
        found
    })
}

fn ancestor<'t>(node: Node<'t>, kinds: &[&str]) -> Option<Node<'t>> {
    let mut current = node.parent();
    while let Some(parent) = current {
        if kinds.contains(&parent.kind()) {
            return Some(parent);
        }
        current = parent.parent();
    }
    None
}

fn is_field(parent: Node<'_>, field: &str, node: Node<'_>) -> bool {
    parent.child_by_field_name(field) == Some(node)
}

fn normalize_type(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut out = String::with_capacity(collapsed.len());
    let chars: Vec<char> = collapsed.chars().collect();
    for (index, ch) in chars.iter().enumerate() {
        if *ch == ' ' {
            let previous = index.checked_sub(1).and_then(|i| chars.get(i));
            let next = chars.get(index + 1);
            let tight = |c: Option<&char>| c.is_some_and(|c| "<>,[].".contains(*c));
            if tight(previous) || tight(next) {
                continue;
            }
        }
        out.push(*ch);
    }
    out
}

impl<'a> Extractor<'a> {
    fn text(&self, node: Node<'_>) -> &'a str {
        self.text.get(node.byte_range()).unwrap_or_default()
    }

    fn compact_text(&self, node: Node<'_>) -> String {
        self.text(node).split_whitespace().collect()
    }

    /// Simple name of a class type; `None` for primitives, arrays and `var`.
    fn simple_type(&self, node: Node<'_>) -> Option<String> {
        match node.kind() {
            "type_identifier" => {
                let name = self.text(node);
                (name != "var").then(|| name.to_string())
            }
            "generic_type" => node.named_child(0).and_then(|ty| self.simple_type(ty)),
            "scoped_type_identifier" => named_children(node)
                .into_iter()
                .next_back()
                .and_then(|ty| self.simple_type(ty)),
            _ => None,
        }
    }

    fn header(&mut self, root: Node<'_>) {
        for child in named_children(root) {
            match child.kind() {
                "package_declaration" => {
                    self.file.package = named_children(child)
                        .into_iter()
                        .find(|name| matches!(name.kind(), "identifier" | "scoped_identifier"))
                        .map(|name| self.compact_text(name));
                }
                "import_declaration" => {
                    let mut cursor = child.walk();
                    let tokens: Vec<Node<'_>> = child.children(&mut cursor).collect();
                    if tokens.iter().any(|token| token.kind() == "static") {
                        continue;
                    }
                    let Some(name) = tokens
                        .iter()
                        .find(|token| matches!(token.kind(), "identifier" | "scoped_identifier"))
                    else {
                        continue;
                    };
                    let mut import = self.compact_text(*name);
                    if tokens.iter().any(|token| token.kind() == "asterisk") {
                        import.push_str(".*");
                    }
                    self.file.imports.push(import);
                }
                _ => {}
            }
        }
    }

    fn push(&mut self, declaration: Declaration) {
        self.file.declarations.push(declaration);
    }

    fn declaration(
        &self,
        node: Node<'_>,
        name: Node<'_>,
        kind: DeclKind,
        container: Option<&str>,
    ) -> Declaration {
        let simple_name = self.text(name).to_string();
        Declaration {
            name: simple_name.clone(),
            simple_name,
            kind,
            container: container.map(str::to_string),
            name_span: name.byte_range(),
            span: node.byte_range(),
            param_types: Vec::new(),
            varargs: false,
            value_type: None,
        }
    }

    fn members(&mut self, body: Node<'_>, container: Option<&str>, interface: bool) {
        for member in named_children(body) {
            match member.kind() {
                "class_declaration" | "record_declaration" => {
                    self.type_declaration(member, DeclKind::Class, container)
                }
                "interface_declaration" | "annotation_type_declaration" => {
                    self.type_declaration(member, DeclKind::Interface, container)
                }
                "enum_declaration" => self.type_declaration(member, DeclKind::Enum, container),
                "method_declaration" | "annotation_type_element_declaration" => {
                    self.callable(member, DeclKind::Method, container)
                }
                "constructor_declaration" => {
                    self.callable(member, DeclKind::Constructor, container)
                }
                "field_declaration" | "constant_declaration" => {
                    let constant = interface
                        || member.kind() == "constant_declaration"
                        || (has_modifier(member, "static") && has_modifier(member, "final"));
                    let kind = if constant {
                        DeclKind::Constant
                    } else {
                        DeclKind::Field
                    };
                    self.fields(member, kind, container);
                }
                _ => {}
            }
        }
    }

    fn type_declaration(&mut self, node: Node<'_>, kind: DeclKind, container: Option<&str>) {
        let Some(name) = node.child_by_field_name("name") else {
            return;
        };
        let declaration = self.declaration(node, name, kind, container);
        let type_name = declaration.simple_name.clone();
        self.push(declaration);

        let Some(body) = node.child_by_field_name("body") else {
            return;
        };
        if kind != DeclKind::Enum {
            self.members(body, Some(&type_name), kind == DeclKind::Interface);
            return;
        }
        for child in named_children(body) {
            match child.kind() {
                "enum_constant" => {
                    if let Some(constant) = child.child_by_field_name("name") {
                        let mut declaration = self.declaration(
                            child,
                            constant,
                            DeclKind::EnumMember,
                            Some(&type_name),
                        );
                        declaration.value_type = Some(type_name.clone());
                        self.push(declaration);
                    }
                }
                "enum_body_declarations" => self.members(child, Some(&type_name), false),
                _ => {}
            }
        }
    }

    fn callable(&mut self, node: Node<'_>, kind: DeclKind, container: Option<&str>) {
        let Some(name) = node.child_by_field_name("name") else {
            return;
        };
        let mut declaration = self.declaration(node, name, kind, container);
        if let Some(parameters) = node.child_by_field_name("parameters") {
            for parameter in named_children(parameters) {
                match parameter.kind() {
                    "formal_parameter" => {
                        let Some(ty) = parameter.child_by_field_name("type") else {
                            continue;
                        };
                        let mut rendered = normalize_type(self.text(ty));
                        if let Some(dimensions) = parameter.child_by_field_name("dimensions") {
                            rendered.push_str(&self.compact_text(dimensions));
                        }
                        declaration.param_types.push(rendered);
                    }
                    "spread_parameter" => {
                        let ty = named_children(parameter).into_iter().find(|child| {
                            !matches!(child.kind(), "modifiers" | "variable_declarator")
                        });
                        if let Some(ty) = ty {
                            declaration
                                .param_types
                                .push(format!("{}...", normalize_type(self.text(ty))));
                            declaration.varargs = true;
                        }
                    }
                    _ => {}
                }
            }
        }
        if kind == DeclKind::Method {
            declaration.value_type = node
                .child_by_field_name("type")
                .and_then(|ty| self.simple_type(ty));
        }
        declaration.name = format!(
            "{}({})",
            declaration.simple_name,
            declaration.param_types.join(", ")
        );
        self.push(declaration);
    }

    fn fields(&mut self, node: Node<'_>, kind: DeclKind, container: Option<&str>) {
        let value_type = node
            .child_by_field_name("type")
            .and_then(|ty| self.simple_type(ty));
        let mut cursor = node.walk();
        let declarators: Vec<Node<'_>> = node
            .children_by_field_name("declarator", &mut cursor)
            .collect();
        for declarator in declarators {
            let Some(name) = declarator.child_by_field_name("name") else {
                continue;
            };
            let mut declaration = self.declaration(node, name, kind, container);
            declaration.value_type = value_type.clone();
            self.push(declaration);
        }
    }

    fn bind(&mut self, name: Node<'_>, ty: Option<String>, scope: Option<Node<'_>>) {
        let Some(scope) = scope else {
            return;
        };
        let variable = Variable {
            name: self.text(name).to_string(),
            ty,
            scope: scope.byte_range(),
            declared_at: name.start_byte(),
        };
        self.variables.push(variable);
    }

    fn variable(&mut self, node: Node<'_>) {
        let declared_type = |this: &Self| {
            node.child_by_field_name("type")
                .and_then(|ty| this.simple_type(ty))
        };
        match node.kind() {
            "field_declaration" | "constant_declaration" | "local_variable_declaration" => {
                let ty = declared_type(self);
                let scope = if node.kind() == "local_variable_declaration" {
                    node.parent()
                } else {
                    ancestor(node, &["class_body", "interface_body", "enum_body"])
                };
                let mut cursor = node.walk();
                let declarators: Vec<Node<'_>> = node
                    .children_by_field_name("declarator", &mut cursor)
                    .collect();
                for declarator in declarators {
                    if let Some(name) = declarator.child_by_field_name("name") {
                        self.bind(name, ty.clone(), scope);
                    }
                }
            }
            "formal_parameter" => {
                if let Some(name) = node.child_by_field_name("name") {
                    let scope = ancestor(
                        node,
                        &[
                            "method_declaration",
                            "constructor_declaration",
                            "lambda_expression",
                            "record_declaration",
                        ],
                    );
                    let ty = if node.child_by_field_name("dimensions").is_some() {
                        None
                    } else {
                        declared_type(self)
                    };
                    self.bind(name, ty, scope);
                }
            }
            "spread_parameter" => {
                let name = named_children(node)
                    .into_iter()
                    .find(|child| child.kind() == "variable_declarator")
                    .and_then(|declarator| declarator.child_by_field_name("name"));
                if let Some(name) = name {
                    let scope = ancestor(
                        node,
                        &["method_declaration", "constructor_declaration", "lambda_expression"],
                    );
                    self.bind(name, None, scope);
                }
            }
            "catch_formal_parameter" => {
                if let Some(name) = node.child_by_field_name("name") {
                    self.bind(name, None, ancestor(node, &["catch_clause"]));
                }
            }
            "enhanced_for_statement" | "resource" => {
                if let Some(name) = node.child_by_field_name("name") {
                    let scope = if node.kind() == "resource" {
                        ancestor(node, &["try_with_resources_statement"])
                    } else {
                        Some(node)
                    };
                    let ty = declared_type(self);
                    self.bind(name, ty, scope);
                }
            }
            "lambda_expression" => {
                let Some(parameters) = node.child_by_field_name("parameters") else {
                    return;
                };
                match parameters.kind() {
                    "identifier" => self.bind(parameters, None, Some(node)),
                    "inferred_parameters" => {
                        for name in named_children(parameters) {
                            self.bind(name, None, Some(node));
                        }
                    }
                    _ => {}
                }
            }
            "enum_constant" => {
                if let Some(name) = node.child_by_field_name("name") {
                    let ty = ancestor(node, &["enum_declaration"])
                        .and_then(|decl| decl.child_by_field_name("name"))
                        .map(|decl| self.text(decl).to_string());
                    self.bind(name, ty, ancestor(node, &["enum_body"]));
                }
            }
            _ => {}
        }
    }

    /// The innermost variable named `name` whose scope covers `offset`.
    fn variable_at(&self, name: &str, offset: usize) -> Option<&Variable> {
        self.variables
            .iter()
            .filter(|variable| variable.name == name && variable.scope.contains(&offset))
            .min_by_key(|variable| variable.scope.len())
    }

    fn enclosing_type(&self, node: Node<'_>) -> Option<String> {
        ancestor(node, TYPE_DECLARATIONS)
            .and_then(|decl| decl.child_by_field_name("name"))
            .map(|name| self.text(name).to_string())
    }

    fn receiver(&self, node: Option<Node<'_>>) -> Receiver {
        let Some(node) = node else {
            return Receiver::Implicit;
        };
        match node.kind() {
            "this" => Receiver::This,
            "super" => Receiver::Super,
            "identifier" => {
                let name = self.text(node);
                match self.variable_at(name, node.start_byte()) {
                    Some(variable) => variable
                        .ty
                        .clone()
                        .map_or(Receiver::Unknown, Receiver::Type),
                    None if name.starts_with(|c: char| c.is_uppercase()) => {
                        Receiver::Type(name.to_string())
                    }
                    None => Receiver::Unknown,
                }
            }
            "field_access" => match node.child_by_field_name("field") {
                Some(field) => Receiver::Field {
                    receiver: Box::new(self.receiver(node.child_by_field_name("object"))),
                    name: self.text(field).to_string(),
                },
                None => Receiver::Unknown,
            },
            "method_invocation" => match node.child_by_field_name("name") {
                Some(name) => Receiver::Call {
                    receiver: Box::new(self.receiver(node.child_by_field_name("object"))),
                    name: self.text(name).to_string(),
                },
                None => Receiver::Unknown,
            },
            "object_creation_expression" | "cast_expression" => node
                .child_by_field_name("type")
                .and_then(|ty| self.simple_type(ty))
                .map_or(Receiver::Unknown, Receiver::Type),
            "parenthesized_expression" => match node.named_child(0) {
                Some(inner) => self.receiver(Some(inner)),
                None => Receiver::Unknown,
            },
            "type_identifier" | "generic_type" | "scoped_type_identifier" => self
                .simple_type(node)
                .map_or(Receiver::Unknown, Receiver::Type),
            _ => Receiver::Unknown,
        }
    }

    fn reference_kind(&self, node: Node<'_>) -> Option<ReferenceKind> {
        let parent = node.parent()?;
        if node.kind() == "type_identifier" {
            if parent.kind() == "scoped_type_identifier"
                && named_children(parent).last() == Some(&node)
            {
                let qualifier = self
                    .text
                    .get(parent.start_byte()..node.start_byte())
                    .unwrap_or_default()
                    .trim_end_matches(|c: char| c == '.' || c.is_whitespace());
                return Some(ReferenceKind::Type {
                    qualifier: Some(qualifier.split_whitespace().collect()),
                });
            }
            return Some(ReferenceKind::Type { qualifier: None });
        }

        match parent.kind() {
            kind if TYPE_DECLARATIONS.contains(&kind) || kind == "constructor_declaration" => {
                is_field(parent, "name", node).then_some(ReferenceKind::Type { qualifier: None })
            }
            "marker_annotation" | "annotation" => {
                is_field(parent, "name", node).then_some(ReferenceKind::Type { qualifier: None })
            }
            "scoped_identifier" => {
                let in_package = ancestor(node, &["package_declaration"]).is_some();
                if in_package || !is_field(parent, "name", node) {
                    return None;
                }
                let qualifier = parent.child_by_field_name("scope")?;
                Some(ReferenceKind::Type {
                    qualifier: Some(self.compact_text(qualifier)),
                })
            }
            "method_invocation" if is_field(parent, "name", node) => {
                let args = parent
                    .child_by_field_name("arguments")
                    .map_or(0, |arguments| {
                        named_children(arguments)
                            .into_iter()
                            .filter(|arg| !arg.is_extra())
                            .count()
                    });
                Some(ReferenceKind::Call {
                    receiver: self.receiver(parent.child_by_field_name("object")),
                    args,
                })
            }
            "field_access" if is_field(parent, "field", node) => {
                Some(ReferenceKind::FieldAccess {
                    receiver: self.receiver(parent.child_by_field_name("object")),
                })
            }
            "method_reference" => {
                let children = named_children(parent);
                if children.len() < 2 || children.last() != Some(&node) {
                    return Some(self.name_reference(node));
                }
                Some(ReferenceKind::MethodRef {
                    receiver: self.receiver(children.first().copied()),
                })
            }
            "method_declaration"
            | "annotation_type_element_declaration"
            | "variable_declarator"
            | "formal_parameter"
            | "catch_formal_parameter"
            | "enhanced_for_statement"
            | "resource"
            | "enum_constant"
                if is_field(parent, "name", node) =>
            {
                None
            }
            "lambda_expression" if is_field(parent, "parameters", node) => None,
            "element_value_pair" if is_field(parent, "key", node) => None,
            "inferred_parameters"
            | "labeled_statement"
            | "break_statement"
            | "continue_statement"
            | "package_declaration"
            | "import_declaration" => None,
            _ => Some(self.name_reference(node)),
        }
    }

    fn name_reference(&self, node: Node<'_>) -> ReferenceKind {
        ReferenceKind::Name {
            variable: self
                .variable_at(self.text(node), node.start_byte())
                .map(|variable| variable.declared_at),
        }
    }

    fn reference(&mut self, node: Node<'_>) {
        if !matches!(node.kind(), "identifier" | "type_identifier") {
            return;
        }
        let Some(kind) = self.reference_kind(node) else {
            return;
        };
        let reference = Reference {
            name: self.text(node).to_string(),
            span: node.byte_range(),
            kind,
            enclosing: self.enclosing_type(node),
        };
        self.file.references.push(reference);
    }
}
