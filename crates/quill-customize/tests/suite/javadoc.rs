use pretty_assertions::assert_eq;

use super::{library, line, WIDGET};

#[test]
fn reads_the_parts_of_a_block() {
    let library = library();
    let class = library.get_class("com.example", "Widget").unwrap();

    let doc = class.get_javadoc(&library).unwrap();
    assert_eq!(doc.description(), Some("A widget."));
    assert_eq!(doc.block_lines(), Some((4, 6)));

    let doc = class
        .get_method(&library, "getName")
        .unwrap()
        .get_javadoc(&library)
        .unwrap();
    assert_eq!(doc.description(), Some("Gets the name."));
    assert_eq!(doc.return_doc(), Some("the name"));

    let doc = class
        .get_constructor(&library, "Widget")
        .unwrap()
        .get_javadoc(&library)
        .unwrap();
    assert_eq!(doc.param("count"), Some("the count"));
    assert_eq!(doc.param("other"), None);
}

#[test]
fn setters_rewrite_the_block_in_tag_order() {
    let mut library = library();
    let class = library.get_class("com.example", "Widget").unwrap();
    let doc = class
        .get_method(&library, "getName")
        .unwrap()
        .get_javadoc(&library)
        .unwrap();

    let doc = doc
        .set_since(&mut library, "1.2")
        .unwrap()
        .set_description(&mut library, "Returns the name of the widget.")
        .unwrap();
    assert_eq!(doc.owner().line(), 29);
    assert_eq!(doc.block_lines(), Some((23, 28)));

    let block: Vec<String> = (23..=29).map(|n| line(&library, WIDGET, n)).collect();
    assert_eq!(
        block,
        [
            "    /**",
            "     * Returns the name of the widget.",
            "     *",
            "     * @return the name",
            "     * @since 1.2",
            "     */",
            "    public String getName() {",
        ]
    );
}

#[test]
fn a_block_is_created_when_missing() {
    let mut library = library();
    let class = library.get_class("com.example", "Widget").unwrap();
    let property = class.get_property(&library, "count").unwrap();
    let doc = property.get_javadoc(&library).unwrap();
    assert_eq!(doc.block_lines(), None);

    let doc = doc.set_description(&mut library, "The count.").unwrap();
    assert_eq!(doc.block_lines(), Some((12, 14)));
    assert_eq!(line(&library, WIDGET, 12), "    /**");
    assert_eq!(line(&library, WIDGET, 13), "     * The count.");
    assert_eq!(line(&library, WIDGET, 14), "     */");
    assert_eq!(line(&library, WIDGET, 15), "    private final int count;");
}

#[test]
fn blank_text_leaves_the_block_alone() {
    let mut library = library();
    let class = library.get_class("com.example", "Widget").unwrap();
    let doc = class.get_javadoc(&library).unwrap();
    let same = doc.set_description(&mut library, "   ").unwrap();
    assert_eq!(same, doc);
    assert_eq!(library.editor().version(WIDGET), Some(doc.owner().version()));
}

#[test]
fn removing_every_part_removes_the_block() {
    let mut library = library();
    let class = library.get_class("com.example", "Widget").unwrap();
    let doc = class
        .get_constructor(&library, "Widget")
        .unwrap()
        .get_javadoc(&library)
        .unwrap();

    let doc = doc
        .remove_param(&mut library, "count")
        .unwrap()
        .remove_description(&mut library)
        .unwrap();
    assert_eq!(doc.block_lines(), None);
    assert_eq!(doc.owner().line(), 14);
    assert_eq!(line(&library, WIDGET, 13), "");
    assert_eq!(line(&library, WIDGET, 14), "    public Widget(int count) {");
}

#[test]
fn comment_terminators_are_escaped() {
    let mut library = library();
    let class = library.get_class("com.example", "Widget").unwrap();
    let doc = class.get_javadoc(&library).unwrap();
    doc.set_description(&mut library, "Matches a/*/b paths.").unwrap();
    assert_eq!(line(&library, WIDGET, 5), " * Matches a/*&#47;b paths.");
}

#[test]
fn replace_copies_another_block() {
    let mut library = library();
    let class = library.get_class("com.example", "Widget").unwrap();
    let source = class
        .get_constructor(&library, "Widget")
        .unwrap()
        .get_javadoc(&library)
        .unwrap();
    let target = class
        .get_method(&library, "getMaxSize")
        .unwrap()
        .get_javadoc(&library)
        .unwrap();

    let doc = target.replace(&mut library, &source).unwrap();
    assert_eq!(doc.description(), Some("Creates a widget."));
    assert_eq!(doc.params(), [("count".to_string(), "the count".to_string())]);
    let header = doc.owner().line();
    assert_eq!(line(&library, WIDGET, header), "    public int getMaxSize() {");
    assert_eq!(line(&library, WIDGET, header - 1), "     */");
}
