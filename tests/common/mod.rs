#![allow(dead_code)]

use abnt_docx::{Advisor, Block, BlockKind, DocumentMetadata, HeadingLevel};

pub fn init_logging() {
    let _ = env_logger::try_init();
}

pub fn level(n: u8) -> HeadingLevel {
    HeadingLevel::new(n).expect("level in range")
}

pub fn title(id: &str, order: u32, lvl: u8, content: &str) -> Block {
    Block::new_heading(id, BlockKind::Title, order, level(lvl)).with_content(content)
}

pub fn subtitle(id: &str, order: u32, lvl: u8, content: &str) -> Block {
    Block::new_heading(id, BlockKind::Subtitle, order, level(lvl)).with_content(content)
}

pub fn paragraph(id: &str, order: u32, content: &str) -> Block {
    Block::new(id, BlockKind::Paragraph, order).with_content(content)
}

pub fn block(id: &str, kind: BlockKind, order: u32, content: &str) -> Block {
    Block::new(id, kind, order).with_content(content)
}

/// Headings at the given levels, ids "h1", "h2", ... in order.
pub fn headings(levels: &[u8]) -> Vec<Block> {
    levels
        .iter()
        .enumerate()
        .map(|(i, &lvl)| {
            let n = i as u32 + 1;
            title(&format!("h{n}"), n, lvl, &format!("Heading {n}"))
        })
        .collect()
}

pub fn numberings(blocks: &[Block]) -> Vec<Option<String>> {
    blocks.iter().map(|b| b.numbering().map(str::to_string)).collect()
}

pub fn metadata() -> DocumentMetadata {
    DocumentMetadata {
        institution: "Universidade Federal de Exemplo".to_string(),
        course: "Ciência da Computação".to_string(),
        author: "Maria Silva".to_string(),
        title: "Estruturação de documentos".to_string(),
        subtitle: Some("um estudo de caso".to_string()),
        city: "São Paulo".to_string(),
        year: "2024".to_string(),
        work_nature: "Trabalho de Conclusão de Curso".to_string(),
        work_objective: "obtenção do título de Bacharel em Ciência da Computação".to_string(),
        advisors: vec![Advisor::new("a1", "Prof. Dr.", "João Souza")],
    }
}
