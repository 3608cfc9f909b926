// Copyright 2022 Bryant Luk
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use iati_xml::{Attributes, Error, XmlWriter};
use pretty_assertions::assert_eq;

type Result<T> = core::result::Result<T, Error>;

fn empty() -> Attributes {
    Attributes::new()
}

fn started() -> Result<XmlWriter<Vec<String>>> {
    let mut w = XmlWriter::new(Vec::new());
    w.start_document(None)?;
    Ok(w)
}

#[test]
fn leaf_inside_root() -> Result<()> {
    let mut w = XmlWriter::new(Vec::new());
    w.start_document(None)?;
    w.start_block("root", &empty())?;
    w.simple_element("child", &empty(), Some("a&b"))?;
    w.end_block("root")?;
    w.end_document()?;

    assert_eq!(
        vec![
            r#"<?xml version="1.0"?>"#,
            "",
            "<root>",
            "  <child>a&amp;b</child>",
            "</root>",
            "",
        ],
        w.into_inner()
    );
    Ok(())
}

#[test]
fn close_without_open_element() -> Result<()> {
    let mut w = started()?;
    let err = w.end_block("root").unwrap_err();
    assert!(matches!(err, Error::EmptyStack { ref name } if name == "root"));
    assert_eq!(vec![r#"<?xml version="1.0"?>"#, ""], w.into_inner());
    Ok(())
}

#[test]
fn close_wrong_element() -> Result<()> {
    let mut w = started()?;
    w.start_block("a", &empty())?;
    let err = w.end_block("b").unwrap_err();
    assert!(matches!(
        err,
        Error::MismatchedElement { ref expected, ref found } if expected == "a" && found == "b"
    ));
    assert_eq!(["a"], w.open_elements());
    Ok(())
}

#[test]
fn second_root_leaf() -> Result<()> {
    let mut w = started()?;
    w.simple_element("x", &empty(), None)?;
    let err = w.simple_element("y", &empty(), None).unwrap_err();
    assert!(matches!(err, Error::MultipleRootElements { ref name } if name == "y"));

    // A single empty element is a complete document.
    w.end_document()?;
    assert_eq!(
        vec![r#"<?xml version="1.0"?>"#, "", "<x/>", ""],
        w.into_inner()
    );
    Ok(())
}

#[test]
fn second_root_after_closed_root() -> Result<()> {
    let mut w = started()?;
    w.start_block("a", &empty())?;
    w.end_block("a")?;
    let err = w.start_block("b", &empty()).unwrap_err();
    assert!(matches!(err, Error::MultipleRootElements { .. }));
    Ok(())
}

#[test]
fn malformed_element_name() -> Result<()> {
    let mut w = started()?;
    let err = w.start_block("1bad", &empty()).unwrap_err();
    assert!(matches!(err, Error::MalformedName { ref name } if name == "1bad"));
    assert_eq!(0, w.depth());
    Ok(())
}

#[test]
fn malformed_attribute_name() -> Result<()> {
    let mut w = started()?;
    w.start_block("root", &empty())?;
    let err = w
        .simple_element("a", &Attributes::from([("good", "1"), ("x:y:z", "2")]), None)
        .unwrap_err();
    assert!(matches!(err, Error::MalformedName { ref name } if name == "x:y:z"));
    assert_eq!(3, w.get_ref().len());
    Ok(())
}

#[test]
fn end_with_open_element() -> Result<()> {
    let mut w = started()?;
    w.start_block("root", &empty())?;
    let err = w.end_document().unwrap_err();
    assert!(matches!(err, Error::UnclosedElements { ref names } if names == &["root"]));
    assert!(w.is_started());
    Ok(())
}

#[test]
fn unclosed_elements_innermost_last() -> Result<()> {
    let mut w = started()?;
    w.start_block("a", &empty())?;
    w.start_block("b", &empty())?;
    w.start_block("c", &empty())?;
    match w.end_document() {
        Err(Error::UnclosedElements { names }) => assert_eq!(vec!["a", "b", "c"], names),
        other => panic!("unexpected result: {other:?}"),
    }
    Ok(())
}

#[test]
fn document_lifecycle_errors() -> Result<()> {
    let mut w = XmlWriter::new(Vec::new());
    assert!(matches!(w.end_document(), Err(Error::NoDocument)));
    assert!(matches!(
        w.simple_element("a", &empty(), None),
        Err(Error::ElementBeforeDocument { ref name }) if name == "a"
    ));
    assert!(w.get_ref().is_empty());

    w.start_document(None)?;
    assert!(matches!(w.start_document(None), Err(Error::AlreadyStarted)));
    assert!(matches!(w.end_document(), Err(Error::NoRootElement)));
    Ok(())
}

#[test]
fn writer_is_reusable() -> Result<()> {
    let mut w = XmlWriter::new(Vec::new());
    for name in ["first", "second"] {
        w.start_document(None)?;
        w.simple_element(name, &empty(), None)?;
        w.end_document()?;
        assert!(!w.is_started());
    }

    assert_eq!(
        vec![
            r#"<?xml version="1.0"?>"#,
            "",
            "<first/>",
            "",
            r#"<?xml version="1.0"?>"#,
            "",
            "<second/>",
            "",
        ],
        w.into_inner()
    );
    Ok(())
}

#[test]
fn attributes_are_escaped() -> Result<()> {
    let mut w = started()?;
    w.simple_element(
        "sector",
        &Attributes::new()
            .with("name", "Abris d'urgence & \"NFI\"")
            .with("code", "<SHL>"),
        Some("Shelter > \"NFI\""),
    )?;
    assert_eq!(
        r#"<sector name="Abris d&apos;urgence &amp; &quot;NFI&quot;" code="&lt;SHL&gt;">Shelter &gt; "NFI"</sector>"#,
        w.get_ref()[2]
    );
    Ok(())
}

#[test]
fn balanced_blocks_restore_depth() -> Result<()> {
    let mut w = started()?;
    w.start_block("a", &empty())?;
    for depth in 1..5 {
        assert_eq!(depth, w.depth());
        let name = format!("level-{depth}");
        w.start_block(&name, &empty())?;
        w.start_block("inner", &empty())?;
        w.end_block("inner")?;
        w.end_block(&name)?;
        assert_eq!(depth, w.depth());
        w.start_block(&name, &empty())?;
    }
    assert_eq!(5, w.depth());
    Ok(())
}

#[test]
fn narrative_without_text() -> Result<()> {
    let mut w = started()?;
    w.start_block("iati-activity", &empty())?;
    w.narrative_element("reporting-org", &Attributes::from([("ref", "XM-OCHA")]), None)?;
    assert_eq!(r#"  <reporting-org ref="XM-OCHA"/>"#, w.get_ref()[3]);
    assert_eq!(1, w.depth());
    Ok(())
}

#[test]
fn narrative_as_root() -> Result<()> {
    let mut w = started()?;
    w.narrative_element("title", &empty(), Some("x"))?;
    assert!(matches!(
        w.narrative_element("title", &empty(), Some("y")),
        Err(Error::MultipleRootElements { .. })
    ));
    w.end_document()?;
    assert_eq!(
        vec![
            r#"<?xml version="1.0"?>"#,
            "",
            "<title>",
            "  <narrative>x</narrative>",
            "</title>",
            "",
        ],
        w.into_inner()
    );
    Ok(())
}
