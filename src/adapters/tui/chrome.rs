use ratatui::{
    prelude::*,
    widgets::{self, Borders, Paragraph},
};

use super::document::{Block, LinkTarget, TextLine};
use crate::domain::{Route, SiteProfile};

pub const NAV: [(&str, Route); 3] = [
    ("Home", Route::Home),
    ("Projects", Route::Projects),
    ("Contact", Route::Contact),
];

/// Nav entries with whether each one matches the current route.
pub fn nav_entries(current: &Route) -> Vec<(&'static str, bool)> {
    NAV.iter()
        .map(|(label, target)| (*label, current.is_active(target)))
        .collect()
}

pub fn render_header(frame: &mut Frame, area: Rect, profile: &SiteProfile, current: &Route) {
    let mut spans = Vec::new();
    for (label, active) in nav_entries(current) {
        let style = if active {
            Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(label, style));
        spans.push(Span::raw("   "));
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(30)])
        .split(area);

    let brand = Paragraph::new(Span::styled(
        profile.owner_name.as_str(),
        Style::default().add_modifier(Modifier::BOLD),
    ))
    .block(widgets::Block::default().borders(Borders::BOTTOM));
    let nav = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Right)
        .block(widgets::Block::default().borders(Borders::BOTTOM));

    frame.render_widget(brand, chunks[0]);
    frame.render_widget(nav, chunks[1]);
}

pub fn footer_blocks(profile: &SiteProfile, year: i32) -> Vec<Block> {
    let heading = Style::default().add_modifier(Modifier::BOLD);
    let muted = Style::default().fg(Color::Gray);

    let mut blocks = vec![
        Block::new(vec![
            TextLine::raw("─".repeat(200)).style(muted),
            TextLine::new(profile.owner_name.clone()).style(heading),
            TextLine::new(profile.summary.clone()).style(muted),
        ]),
        Block::text(TextLine::new("Quick Links").style(heading)).gap(0),
    ];

    for (label, route) in NAV {
        blocks.push(
            Block::text(TextLine::new(label).style(muted))
                .link(LinkTarget::Route(route))
                .indent(2)
                .gap(0),
        );
    }
    if let Some(last) = blocks.last_mut() {
        last.gap_after = 1;
    }

    blocks.push(Block::text(TextLine::new("Connect").style(heading)).gap(0));
    let connect = [
        ("LinkedIn", profile.linkedin_url.clone()),
        ("GitHub", profile.github_url.clone()),
        ("Email", profile.mailto()),
    ];
    for (label, url) in connect {
        blocks.push(
            Block::text(TextLine::new(label).style(muted))
                .link(LinkTarget::External(url))
                .indent(2)
                .gap(0),
        );
    }
    if let Some(last) = blocks.last_mut() {
        last.gap_after = 1;
    }

    blocks.push(Block::text(
        TextLine::new(copyright(profile, year))
            .style(muted)
            .centered(),
    ));
    blocks
}

pub fn copyright(profile: &SiteProfile, year: i32) -> String {
    format!("© {} {}. All rights reserved.", year, profile.owner_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::tui::document::Focus;

    #[test]
    fn test_active_nav_is_exact_match() {
        let entries = nav_entries(&Route::Projects);
        assert_eq!(
            entries,
            vec![("Home", false), ("Projects", true), ("Contact", false)]
        );

        let detail = nav_entries(&Route::ProjectDetail("p1".into()));
        assert!(detail.iter().all(|(_, active)| !active));
    }

    #[test]
    fn test_footer_links_and_copyright() {
        let profile = SiteProfile::default();
        let blocks = footer_blocks(&profile, 2026);

        let targets: Vec<&LinkTarget> = blocks
            .iter()
            .filter_map(|b| match &b.focus {
                Some(Focus::Link(target)) => Some(target),
                _ => None,
            })
            .collect();
        assert_eq!(targets.len(), 6);
        assert_eq!(
            targets[5],
            &LinkTarget::External("mailto:dhanuja@example.com".to_string())
        );

        let last = blocks.last().unwrap();
        assert_eq!(last.lines[0].text, "© 2026 Dhanuja. All rights reserved.");
    }
}
