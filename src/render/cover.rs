use crate::block::{Advisor, DocumentMetadata};
use crate::model::{Alignment, LineSpacing, Paragraph, Run, cm};

use super::TextStyle;

/// Gap above the city line, pushing it towards the foot of the page.
const CITY_SPACE_BEFORE: f32 = 100.0;

fn centered(run: Run, space_after: f32) -> Paragraph {
    Paragraph {
        runs: vec![run],
        space_after,
        alignment: Alignment::Center,
        ..Paragraph::default()
    }
}

/// "TITLE: SUBTITLE", uppercased.
fn full_title(metadata: &DocumentMetadata) -> String {
    let title = metadata.title.trim();
    match metadata.subtitle() {
        Some(sub) => format!("{title}: {sub}").to_uppercase(),
        None => title.to_uppercase(),
    }
}

/// Institution, course, author and title, shared by the cover and the title page.
fn heading_lines(metadata: &DocumentMetadata, style: TextStyle) -> Vec<Paragraph> {
    let mut paragraphs = vec![centered(
        style.run(metadata.institution.trim().to_uppercase()).bold(),
        20.0,
    )];
    let course = metadata.course.trim();
    if !course.is_empty() {
        paragraphs.push(centered(style.run(course.to_uppercase()).bold(), 40.0));
    }
    paragraphs.push(centered(
        style.run(metadata.author.trim().to_uppercase()).bold(),
        60.0,
    ));
    paragraphs.push(centered(style.run(full_title(metadata)).bold(), 60.0));
    paragraphs
}

fn city_and_year(metadata: &DocumentMetadata, style: TextStyle) -> [Paragraph; 2] {
    [
        Paragraph {
            space_before: CITY_SPACE_BEFORE,
            ..centered(style.run(metadata.city.trim()), 0.0)
        },
        centered(style.run(metadata.year.trim()), 0.0),
    ]
}

pub(super) fn cover_page(metadata: &DocumentMetadata, style: TextStyle) -> Vec<Paragraph> {
    let mut paragraphs = heading_lines(metadata, style);
    paragraphs.extend(city_and_year(metadata, style));
    paragraphs
}

pub(super) fn title_page(metadata: &DocumentMetadata, style: TextStyle) -> Vec<Paragraph> {
    let mut paragraphs = heading_lines(metadata, style);
    paragraphs.push(Paragraph {
        runs: vec![style.run(nature_statement(metadata))],
        space_after: 60.0,
        alignment: Alignment::Justify,
        indent_left: cm(8.0),
        line_spacing: LineSpacing::Auto(1.0),
        ..Paragraph::default()
    });
    paragraphs.extend(city_and_year(metadata, style));
    paragraphs
}

/// Advisor names joined with " e ". Three or more advisors are chained the
/// same way ("A e B e C").
pub fn advisor_conjunction(advisors: &[Advisor]) -> String {
    advisors
        .iter()
        .map(Advisor::display_name)
        .filter(|name| !name.is_empty())
        .collect::<Vec<_>>()
        .join(" e ")
}

fn clause(text: &str) -> &str {
    text.trim().trim_end_matches('.')
}

/// The "nature of work" sentence of the title page, e.g. "Trabalho de
/// Conclusão de Curso apresentado à Universidade X como requisito para
/// obtenção do título de Bacharel, sob orientação de Prof. Dr. Y."
pub fn nature_statement(metadata: &DocumentMetadata) -> String {
    let nature = match clause(&metadata.work_nature) {
        "" => "Trabalho",
        nature => nature,
    };
    let mut sentence = format!("{nature} apresentado à {}", clause(&metadata.institution));

    let objective = clause(&metadata.work_objective);
    if !objective.is_empty() {
        sentence.push_str(" como requisito para ");
        sentence.push_str(objective);
    }

    let advisors = advisor_conjunction(&metadata.advisors);
    if !advisors.is_empty() {
        sentence.push_str(", sob orientação de ");
        sentence.push_str(&advisors);
    }

    sentence.push('.');
    sentence
}
