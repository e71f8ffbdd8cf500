mod common;

use std::io::{Cursor, Read};

use abnt_docx::{BlockKind, Document, DocxEncoder, ExportOptions, export_document, export_to_path};
use common::{block, metadata, paragraph, subtitle, title};
use zip::ZipArchive;

const WML: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

fn sample_document() -> Document {
    Document {
        metadata: metadata(),
        blocks: vec![
            title("h1", 1, 1, "Introdução"),
            paragraph("p1", 2, " Texto com espaço inicial."),
            block("c1", BlockKind::Citation, 3, "Citação direta longa."),
            subtitle("h2", 4, 2, "Objetivos & metas"),
            block("pb", BlockKind::PageBreak, 5, ""),
            block("r1", BlockKind::References, 6, "SILVA, M. Livro.\nSOUZA, J. Artigo."),
        ],
    }
}

fn export(options: &ExportOptions) -> ZipArchive<Cursor<Vec<u8>>> {
    let bytes = export_document(&sample_document(), options, &DocxEncoder::new()).expect("export");
    ZipArchive::new(Cursor::new(bytes)).expect("valid zip")
}

fn read_part(archive: &mut ZipArchive<Cursor<Vec<u8>>>, name: &str) -> String {
    let mut file = archive.by_name(name).unwrap_or_else(|_| panic!("missing part {name}"));
    let mut xml = String::new();
    file.read_to_string(&mut xml).expect("utf-8 part");
    xml
}

fn w<'a, 'input>(node: roxmltree::Node<'a, 'input>, name: &str) -> Vec<roxmltree::Node<'a, 'input>> {
    node.descendants()
        .filter(|n| n.tag_name().name() == name && n.tag_name().namespace() == Some(WML))
        .collect()
}

fn attr_i64(node: roxmltree::Node, name: &str) -> i64 {
    node.attribute((WML, name))
        .and_then(|v| v.parse().ok())
        .unwrap_or_else(|| panic!("missing w:{name}"))
}

#[test]
fn package_has_expected_parts() {
    common::init_logging();
    let archive = export(&ExportOptions::default());
    let names: Vec<&str> = archive.file_names().collect();
    for part in [
        "[Content_Types].xml",
        "_rels/.rels",
        "docProps/core.xml",
        "word/_rels/document.xml.rels",
        "word/document.xml",
        "word/styles.xml",
        "word/settings.xml",
        "word/header1.xml",
    ] {
        assert!(names.contains(&part), "missing {part} in {names:?}");
    }
}

#[test]
fn every_part_is_well_formed_xml() {
    let mut archive = export(&ExportOptions {
        include_table_of_contents: true,
        ..ExportOptions::default()
    });
    let names: Vec<String> = archive.file_names().map(str::to_string).collect();
    for name in names {
        let xml = read_part(&mut archive, &name);
        roxmltree::Document::parse(&xml).unwrap_or_else(|e| panic!("{name}: {e}"));
    }
}

#[test]
fn sections_use_abnt_page_geometry() {
    let mut archive = export(&ExportOptions::default());
    let xml = read_part(&mut archive, "word/document.xml");
    let doc = roxmltree::Document::parse(&xml).expect("parse");

    let sections = w(doc.root(), "sectPr");
    // Cover, title page, body.
    assert_eq!(sections.len(), 3);
    for sect in sections {
        let size = w(sect, "pgSz")[0];
        assert!((attr_i64(size, "w") - 11906).abs() <= 1);
        assert!((attr_i64(size, "h") - 16838).abs() <= 1);

        let margins = w(sect, "pgMar")[0];
        assert!((attr_i64(margins, "top") - 1701).abs() <= 1);
        assert!((attr_i64(margins, "left") - 1701).abs() <= 1);
        assert!((attr_i64(margins, "bottom") - 1134).abs() <= 1);
        assert!((attr_i64(margins, "right") - 1134).abs() <= 1);
    }
}

#[test]
fn only_body_section_references_header() {
    let mut archive = export(&ExportOptions::default());
    let xml = read_part(&mut archive, "word/document.xml");
    let doc = roxmltree::Document::parse(&xml).expect("parse");

    let sections = w(doc.root(), "sectPr");
    let with_header: Vec<bool> = sections
        .iter()
        .map(|s| !w(*s, "headerReference").is_empty())
        .collect();
    assert_eq!(with_header, [false, false, true]);

    let header = read_part(&mut archive, "word/header1.xml");
    assert!(header.contains("PAGE"));

    let rels = read_part(&mut archive, "word/_rels/document.xml.rels");
    assert!(rels.contains("header1.xml"));
}

#[test]
fn no_header_part_without_page_numbers() {
    let archive = export(&ExportOptions {
        page_numbers: false,
        ..ExportOptions::default()
    });
    assert!(!archive.file_names().any(|n| n.starts_with("word/header")));
}

#[test]
fn body_paragraph_formatting_reaches_xml() {
    let mut archive = export(&ExportOptions::default());
    let xml = read_part(&mut archive, "word/document.xml");
    let doc = roxmltree::Document::parse(&xml).expect("parse");

    let paragraphs = w(doc.root(), "p");
    let text_of = |p: roxmltree::Node| -> String {
        w(p, "t").iter().filter_map(|t| t.text()).collect()
    };
    let find = |needle: &str| {
        *paragraphs
            .iter()
            .find(|p| text_of(**p).contains(needle))
            .unwrap_or_else(|| panic!("no paragraph containing {needle:?}"))
    };

    let heading = find("1 Introdução");
    let style = w(heading, "pStyle")[0];
    assert_eq!(style.attribute((WML, "val")), Some("Heading1"));

    let body = find("Texto com espaço inicial.");
    let ind = w(body, "ind")[0];
    assert_eq!(attr_i64(ind, "firstLine"), 709);
    let spacing = w(body, "spacing")[0];
    assert_eq!(attr_i64(spacing, "line"), 360);
    assert_eq!(w(body, "jc")[0].attribute((WML, "val")), Some("both"));

    let citation = find("Citação direta longa.");
    assert_eq!(attr_i64(w(citation, "ind")[0], "left"), 2268);
    assert_eq!(attr_i64(w(citation, "sz")[0], "val"), 20);

    let subheading = find("1.1 Objetivos & metas");
    assert_eq!(w(subheading, "pStyle")[0].attribute((WML, "val")), Some("Heading2"));

    let reference = find("SOUZA, J. Artigo.");
    assert_eq!(attr_i64(w(reference, "ind")[0], "hanging"), 709);

    assert!(paragraphs.iter().any(|p| !w(*p, "pageBreakBefore").is_empty()));
}

#[test]
fn leading_space_is_preserved() {
    let mut archive = export(&ExportOptions::default());
    let xml = read_part(&mut archive, "word/document.xml");
    let doc = roxmltree::Document::parse(&xml).expect("parse");
    let preserved = w(doc.root(), "t").into_iter().find(|t| {
        t.text().is_some_and(|s| s.starts_with(" Texto"))
    });
    let preserved = preserved.expect("text run with leading space");
    assert_eq!(
        preserved.attribute(("http://www.w3.org/XML/1998/namespace", "space")),
        Some("preserve")
    );
}

#[test]
fn styles_define_heading_outline_levels() {
    let mut archive = export(&ExportOptions::default());
    let xml = read_part(&mut archive, "word/styles.xml");
    let doc = roxmltree::Document::parse(&xml).expect("parse");

    for level in 1..=5 {
        let id = format!("Heading{level}");
        let style = w(doc.root(), "style")
            .into_iter()
            .find(|s| s.attribute((WML, "styleId")) == Some(id.as_str()))
            .unwrap_or_else(|| panic!("missing style {id}"));
        assert_eq!(attr_i64(w(style, "outlineLvl")[0], "val"), level - 1);
    }

    let size = w(doc.root(), "sz")[0];
    assert_eq!(attr_i64(size, "val"), 24);
}

#[test]
fn core_properties_carry_title_and_author() {
    let mut archive = export(&ExportOptions::default());
    let xml = read_part(&mut archive, "docProps/core.xml");
    assert!(xml.contains("Estruturação de documentos"));
    assert!(xml.contains("Maria Silva"));
}

#[test]
fn contents_page_is_written_when_requested() {
    let mut archive = export(&ExportOptions {
        include_table_of_contents: true,
        ..ExportOptions::default()
    });
    let xml = read_part(&mut archive, "word/document.xml");
    let doc = roxmltree::Document::parse(&xml).expect("parse");

    assert_eq!(w(doc.root(), "sectPr").len(), 4);
    assert!(xml.contains("SUMÁRIO"));
    let tabs = w(doc.root(), "tabs");
    assert!(!tabs.is_empty());
    assert_eq!(w(tabs[0], "tab")[0].attribute((WML, "leader")), Some("dot"));
}

#[test]
fn export_to_directory_uses_title_file_name() {
    let dir = std::env::temp_dir().join(format!("abnt-docx-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("temp dir");

    let path = export_to_path(&sample_document(), &ExportOptions::default(), &dir).expect("export");
    assert_eq!(path, dir.join("Estruturação de documentos.docx"));

    let bytes = std::fs::read(&path).expect("written file");
    assert!(ZipArchive::new(Cursor::new(bytes)).is_ok());
    assert!(!dir.join("Estruturação de documentos.docx.partial").exists());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn failed_export_leaves_no_file() {
    let dir = std::env::temp_dir().join(format!("abnt-docx-fail-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("temp dir");
    let target = dir.join("out.docx");

    let mut document = sample_document();
    document.metadata.advisors.clear();
    assert!(export_to_path(&document, &ExportOptions::default(), &target).is_err());
    assert!(!target.exists());

    let _ = std::fs::remove_dir_all(&dir);
}

fn export_blocks(document: &Document) -> String {
    let bytes = export_document(document, &ExportOptions::default(), &DocxEncoder::new())
        .expect("export");
    let mut archive = ZipArchive::new(Cursor::new(bytes)).expect("valid zip");
    read_part(&mut archive, "word/document.xml")
}

#[test]
fn pasted_control_characters_become_breaks_and_tabs() {
    let mut document = sample_document();
    document.metadata.title = "Título\u{b}colado".to_string();
    document.blocks = vec![
        paragraph("p1", 1, "colado do Word\u{b}segunda linha"),
        paragraph("p2", 2, "coluna\tvalor\u{1}\u{c}fim"),
    ];

    let bytes = export_document(&document, &ExportOptions::default(), &DocxEncoder::new())
        .expect("export");
    let mut archive = ZipArchive::new(Cursor::new(bytes)).expect("valid zip");
    let names: Vec<String> = archive.file_names().map(str::to_string).collect();
    for name in names {
        let xml = read_part(&mut archive, &name);
        roxmltree::Document::parse(&xml).unwrap_or_else(|e| panic!("{name}: {e}"));
    }

    let xml = read_part(&mut archive, "word/document.xml");
    let doc = roxmltree::Document::parse(&xml).expect("parse");
    let paragraphs = w(doc.root(), "p");
    let text_of = |p: roxmltree::Node| -> Vec<String> {
        w(p, "t").iter().filter_map(|t| t.text()).map(str::to_string).collect()
    };

    let first = paragraphs
        .iter()
        .find(|p| text_of(**p).first().map(String::as_str) == Some("colado do Word"))
        .expect("pasted paragraph");
    assert_eq!(text_of(*first), ["colado do Word", "segunda linha"]);
    assert_eq!(w(*first, "br").len(), 1);

    let second = paragraphs
        .iter()
        .find(|p| text_of(**p).first().map(String::as_str) == Some("coluna"))
        .expect("tabbed paragraph");
    assert_eq!(text_of(*second), ["coluna", "valor", "fim"]);
    assert_eq!(w(*second, "tab").len(), 1);
    assert_eq!(w(*second, "br").len(), 1);

    let core = read_part(&mut archive, "docProps/core.xml");
    assert!(core.contains("Títulocolado"));
}

#[test]
fn edge_whitespace_other_than_space_is_preserved() {
    let mut document = sample_document();
    document.blocks = vec![
        paragraph("p1", 1, "\tRecuo"),
        paragraph("p2", 2, "fim\u{2003}"),
    ];
    let xml = export_blocks(&document);
    let doc = roxmltree::Document::parse(&xml).expect("parse");

    let texts = w(doc.root(), "t");
    let recuo = texts
        .iter()
        .find(|t| t.text() == Some("Recuo"))
        .expect("text after tab");
    let previous = recuo.prev_sibling_element().expect("tab before text");
    assert_eq!(previous.tag_name().name(), "tab");

    let trailing = texts
        .iter()
        .find(|t| t.text() == Some("fim\u{2003}"))
        .expect("text with trailing em space");
    assert_eq!(
        trailing.attribute(("http://www.w3.org/XML/1998/namespace", "space")),
        Some("preserve")
    );
}
