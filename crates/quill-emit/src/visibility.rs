use std::fmt;

/// Access level written in front of a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    Public,
    Protected,
    Private,
    /// No keyword at all.
    PackagePrivate,
}

impl Visibility {
    pub const fn keyword(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Protected => "protected",
            Visibility::Private => "private",
            Visibility::PackagePrivate => "",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JavaModifier {
    Abstract,
    Default,
    Final,
    Native,
    Static,
    Synchronized,
    Transient,
    Volatile,
}

impl JavaModifier {
    pub const fn keyword(self) -> &'static str {
        match self {
            JavaModifier::Abstract => "abstract",
            JavaModifier::Default => "default",
            JavaModifier::Final => "final",
            JavaModifier::Native => "native",
            JavaModifier::Static => "static",
            JavaModifier::Synchronized => "synchronized",
            JavaModifier::Transient => "transient",
            JavaModifier::Volatile => "volatile",
        }
    }
}

impl fmt::Display for JavaModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Joins visibility, modifiers and the remaining declaration text with single spaces,
/// skipping empty parts so package-private declarations don't start with a space.
pub(crate) fn declaration_header(
    visibility: Visibility,
    modifiers: &[JavaModifier],
    rest: &str,
) -> String {
    let mut parts: Vec<&str> = Vec::with_capacity(modifiers.len() + 2);
    if !visibility.keyword().is_empty() {
        parts.push(visibility.keyword());
    }
    parts.extend(modifiers.iter().map(|modifier| modifier.keyword()));
    if !rest.is_empty() {
        parts.push(rest);
    }
    parts.join(" ")
}
