use ratatui::style::{Color, Modifier, Style};

use crate::adapters::tui::document::{Block, LinkTarget, TextLine};
use crate::application::pages::{ProjectList, ProjectListView, EMPTY_PROJECTS_MESSAGE};
use crate::domain::{Project, Route};

pub fn blocks(list: &ProjectList) -> Vec<Block> {
    let mut blocks = vec![Block::new(vec![
        TextLine::new("Portfolio Projects").style(Style::default().add_modifier(Modifier::BOLD)),
        TextLine::new(
            "Explore a curated collection of data analysis projects showcasing methodologies, insights, and measurable outcomes.",
        )
        .style(Style::default().fg(Color::Gray)),
    ])
    .gap(2)];

    match list.view() {
        ProjectListView::Loading => {
            blocks.push(Block::text(
                TextLine::new("Loading projects...").style(Style::default().fg(Color::Gray)),
            ));
        }
        ProjectListView::Empty => {
            blocks.push(
                Block::text(
                    TextLine::new(EMPTY_PROJECTS_MESSAGE)
                        .style(Style::default().fg(Color::Gray))
                        .centered(),
                )
                .gap(2),
            );
        }
        ProjectListView::Failed(message) => {
            blocks.push(Block::new(vec![
                TextLine::new(message).style(Style::default().fg(Color::Red)),
                TextLine::new("Press r to try again.").style(Style::default().fg(Color::Gray)),
            ]));
        }
        ProjectListView::Cards(projects) => {
            for project in projects {
                blocks.extend(card(project));
            }
        }
    }

    blocks
}

fn card(project: &Project) -> Vec<Block> {
    let muted = Style::default().fg(Color::Gray);
    let mut lines = Vec::new();

    let date = project.date_display();
    if !date.is_empty() {
        lines.push(TextLine::new(date).style(muted));
    }
    lines.push(TextLine::new(project.display_name()).style(Style::default().add_modifier(Modifier::BOLD)));
    lines.push(TextLine::new(project.display_description()));
    if let Some(technologies) = project.technologies() {
        lines.push(TextLine::new(format!("Technologies: {technologies}")).style(muted));
    }
    lines.push(
        TextLine::new("View Details →").style(Style::default().add_modifier(Modifier::UNDERLINED)),
    );

    let has_url = project.external_url().is_some();
    let mut blocks = vec![Block::new(lines)
        .link(LinkTarget::Route(Route::ProjectDetail(project.id.clone())))
        .gap(if has_url { 0 } else { 2 })];

    if let Some(url) = project.external_url() {
        blocks.push(
            Block::text(TextLine::new("↗ Live Project").style(muted))
                .link(LinkTarget::External(url.to_string()))
                .gap(2),
        );
    }

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::tui::document::Focus;
    use crate::application::AppError;
    use crate::ports::StoreError;

    fn project(id: &str, url: Option<&str>) -> Project {
        serde_json::from_value(serde_json::json!({
            "_id": id,
            "projectName": format!("Project {id}"),
            "projectUrl": url,
        }))
        .unwrap()
    }

    fn all_text(blocks: &[Block]) -> String {
        blocks
            .iter()
            .flat_map(|b| b.lines.iter().map(|l| l.text.clone()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_empty_list_message() {
        let mut list = ProjectList::new();
        list.apply(Ok(vec![]));
        assert!(all_text(&blocks(&list)).contains(EMPTY_PROJECTS_MESSAGE));
    }

    #[test]
    fn test_cards_link_to_detail_routes() {
        let mut list = ProjectList::new();
        list.apply(Ok(vec![project("a", None), project("b", Some("https://example.com"))]));

        let links: Vec<Focus> = blocks(&list).into_iter().filter_map(|b| b.focus).collect();
        assert_eq!(
            links,
            vec![
                Focus::Link(LinkTarget::Route(Route::ProjectDetail("a".into()))),
                Focus::Link(LinkTarget::Route(Route::ProjectDetail("b".into()))),
                Focus::Link(LinkTarget::External("https://example.com".to_string())),
            ]
        );
    }

    #[test]
    fn test_missing_fields_render_placeholder() {
        let mut list = ProjectList::new();
        list.apply(Ok(vec![project("a", None)]));
        let text = all_text(&blocks(&list));
        assert!(text.contains("Project a"));
        assert!(text.contains("No data"));
    }

    #[test]
    fn test_failure_offers_retry() {
        let mut list = ProjectList::new();
        list.apply(Err(AppError::Store(StoreError::StoreUnavailable("down".to_string()))));
        assert!(all_text(&blocks(&list)).contains("Press r to try again."));
    }
}
