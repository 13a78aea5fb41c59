use ratatui::style::{Color, Modifier, Style};

use crate::adapters::tui::document::{Block, LinkTarget, TextLine};
use crate::application::pages::{DetailState, ProjectDetail, PROJECT_NOT_FOUND_MESSAGE};
use crate::domain::{Project, Route};

fn back_link(detail: &ProjectDetail) -> Block {
    Block::text(
        TextLine::new("← Back to Projects").style(Style::default().add_modifier(Modifier::UNDERLINED)),
    )
    .link(LinkTarget::Route(detail.back_link()))
}

pub fn blocks(detail: &ProjectDetail) -> Vec<Block> {
    let muted = Style::default().fg(Color::Gray);

    match detail.state() {
        DetailState::Loading => vec![Block::text(TextLine::new("Loading project...").style(muted))],
        DetailState::NotFound => vec![
            Block::text(TextLine::new(PROJECT_NOT_FOUND_MESSAGE).style(muted).centered()),
            back_link(detail).gap(2),
        ],
        DetailState::Failed(message) => vec![
            Block::new(vec![
                TextLine::new(message.as_str()).style(Style::default().fg(Color::Red)),
                TextLine::new("Press r to try again.").style(muted),
            ]),
            back_link(detail).gap(2),
        ],
        DetailState::Found(project) => found(detail, project),
    }
}

fn found(detail: &ProjectDetail, project: &Project) -> Vec<Block> {
    let heading = Style::default().add_modifier(Modifier::BOLD);
    let muted = Style::default().fg(Color::Gray);

    let mut header = Vec::new();
    let date = project.date_display();
    if !date.is_empty() {
        header.push(TextLine::new(date).style(muted));
    }
    header.push(TextLine::new(project.display_name()).style(heading));
    header.push(TextLine::new(project.display_description()));

    let mut blocks = vec![back_link(detail), Block::new(header)];

    if let Some(url) = project.external_url() {
        blocks.push(
            Block::text(TextLine::new("↗ View Live Project").style(Style::default().add_modifier(Modifier::UNDERLINED)))
                .link(LinkTarget::External(url.to_string())),
        );
    }

    let image = match project.image() {
        Some(src) => format!("Image: {src}"),
        None => "No image available".to_string(),
    };
    blocks.push(Block::text(TextLine::new(image).style(muted)).gap(2));

    let sections = [
        ("Technologies Used", project.technologies()),
        ("Methodology", project.methodology()),
        ("Results", project.results()),
    ];
    for (title, body) in sections {
        if let Some(body) = body {
            blocks.push(Block::new(vec![
                TextLine::new(title).style(heading),
                TextLine::new(body),
            ]));
        }
    }

    blocks.push(
        Block::new(vec![
            TextLine::blank(),
            TextLine::new("Interested in Similar Work?").style(heading).centered(),
            TextLine::new("Let's discuss how I can help with your data analysis needs.")
                .style(muted)
                .centered(),
        ])
        .gap(0),
    );
    blocks.push(
        Block::text(TextLine::new("Contact Me").style(Style::default().add_modifier(Modifier::UNDERLINED)).centered())
            .link(LinkTarget::Route(Route::Contact))
            .gap(2),
    );

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(blocks: &[Block]) -> Vec<String> {
        blocks
            .iter()
            .flat_map(|b| b.lines.iter().map(|l| l.text.clone()))
            .collect()
    }

    #[test]
    fn test_not_found_has_back_link() {
        let detail = ProjectDetail::new(None);
        let blocks = blocks(&detail);

        assert!(texts(&blocks).contains(&PROJECT_NOT_FOUND_MESSAGE.to_string()));
        assert_eq!(
            blocks[1].focus,
            Some(crate::adapters::tui::document::Focus::Link(LinkTarget::Route(Route::Projects)))
        );
    }

    #[test]
    fn test_only_present_sections_render() {
        let mut detail = ProjectDetail::new(Some("p1".into()));
        let project: Project = serde_json::from_value(serde_json::json!({
            "_id": "p1",
            "projectName": "Churn Model",
            "methodology": "Gradient boosting",
            "projectDate": "2024-03-01"
        }))
        .unwrap();
        detail.apply(Ok(Some(project)));

        let text = texts(&blocks(&detail));
        assert!(text.contains(&"Churn Model".to_string()));
        assert!(text.contains(&"March 2024".to_string()));
        assert!(text.contains(&"Methodology".to_string()));
        assert!(!text.contains(&"Results".to_string()));
        assert!(!text.contains(&"Technologies Used".to_string()));
        assert!(text.contains(&"No image available".to_string()));
    }
}
