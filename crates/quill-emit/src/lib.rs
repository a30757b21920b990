//! Structured writers for Java source files.
//!
//! Files are built top to bottom through nested closures: a [`JavaFile`] hands out a
//! [`JavaClass`], whose methods hand out a [`JavaBlock`], and so on. Every writer appends to
//! the same [`JavaFileContents`], which owns indentation, blank-line separation between
//! members and the `if`/`else`, `try`/`catch` continuation rules.

mod block;
mod class;
mod contents;
mod enums;
mod file;
mod imports;
mod interface;
mod javadoc;
mod lambda;
mod package;
mod visibility;

pub use block::{JavaBlock, JavaIfBlock, JavaLineComment, JavaTryBlock};
pub use class::JavaClass;
pub use contents::{JavaFileContents, LineState, INDENT};
pub use enums::JavaEnum;
pub use file::{package_path, JavaFile, JavaFileFactory, SourceSet};
pub use imports::{compare_imports, is_same_package_member, organize_imports};
pub use interface::JavaInterface;
pub use javadoc::{escape_comment_end, process_description, JavaJavadocComment};
pub use lambda::JavaLambda;
pub use package::{JavaPackage, TextFile};
pub use visibility::{JavaModifier, Visibility};
