//! Post-generation customization of Java sources.
//!
//! Generated files are loaded into an [`Editor`]; a [`LanguageClient`] provides the symbols
//! and rename edits. Customizations navigate from [`LibraryCustomization`] to classes and
//! their members and mutate them through handles:
//!
//! - every handle records the version of its file and fails with
//!   [`CustomizationError::StaleHandle`] once that file has changed
//! - every mutation returns a freshly resolved handle to chain from
//! - the language client is notified after each mutation so its index follows the buffers
//!
//! [`IndexedLanguageClient`] is an in-process client that parses the sources itself with
//! `tree-sitter-java`.

mod class;
mod client;
mod constant;
mod constructor;
mod editor;
mod error;
mod handle;
mod index;
mod javadoc;
mod library;
mod method;
mod modifiers;
mod ops;
mod property;
pub mod script;
mod syntax;
mod text_pos;
mod utils;

use std::collections::BTreeMap;

pub use class::ClassCustomization;
pub use client::LanguageClient;
pub use constant::ConstantCustomization;
pub use constructor::ConstructorCustomization;
pub use editor::{leading_whitespace, Editor, DEFAULT_ROOT_URI};
pub use error::{ClientError, CustomizationError, EditorError, Result};
pub use handle::CodeCustomization;
pub use index::IndexedLanguageClient;
pub use javadoc::JavadocCustomization;
pub use library::{LibraryCustomization, PackageCustomization};
pub use method::MethodCustomization;
pub use modifiers::{DeclarationKind, Modifiers};
pub use property::PropertyCustomization;
pub use script::{CustomizationScript, Member, Operation};

/// A set of changes applied to a generated library.
pub trait Customization {
    fn customize(&self, library: &mut LibraryCustomization) -> Result<()>;
}

impl<F> Customization for F
where
    F: Fn(&mut LibraryCustomization) -> Result<()>,
{
    fn customize(&self, library: &mut LibraryCustomization) -> Result<()> {
        self(library)
    }
}

/// Loads `files` (relative path to content) into an editor with an [`IndexedLanguageClient`],
/// runs `customize` and returns the resulting files.
pub fn run<F>(files: BTreeMap<String, String>, customize: F) -> Result<BTreeMap<String, String>>
where
    F: FnOnce(&mut LibraryCustomization) -> Result<()>,
{
    let count = files.len();
    let mut library = LibraryCustomization::with_indexed_client(Editor::from_files(files))?;
    customize(&mut library)?;
    let out = library.into_editor().into_contents();
    tracing::info!(
        target = "quill.customize",
        input_files = count,
        output_files = out.len(),
        "customization finished"
    );
    Ok(out)
}

pub fn run_customization(
    files: BTreeMap<String, String>,
    customization: &dyn Customization,
) -> Result<BTreeMap<String, String>> {
    run(files, |library| customization.customize(library))
}
