use ratatui::style::{Color, Modifier, Style};
use std::time::Duration;

use crate::adapters::tui::document::{Block, LinkTarget, TextLine};
use crate::application::motion::RevealStyle;
use crate::application::pages::{stagger, HomeContent, COMPETENCIES, HERO_PARALLAX_SPEEDS};
use crate::domain::Route;

const CHART_BACK: [&str; 5] = [
    "  ▂▃▅▆▇█▇▆▅▃▂  ",
    " ▁▂▃▄▅▆▇█▇▆▅▄▃ ",
    "▁▁▂▂▃▃▄▄▅▅▆▆▇▇█",
    "───────────────",
    " Q1  Q2  Q3  Q4",
];

const CHART_FRONT: [&str; 4] = [
    "   ●      ●    ",
    " ●   ●  ●   ●  ",
    "●      ●      ●",
    "───────────────",
];

fn fade_up(block: Block, index: usize) -> Block {
    block.reveal(RevealStyle::FadeUp, stagger(index))
}

fn chart(rows: &[&str], speed: f64) -> Block {
    Block::new(
        rows.iter()
            .map(|row| TextLine::raw(*row).style(Style::default().fg(Color::Cyan)))
            .collect(),
    )
    .parallax(speed)
    .indent(4)
}

pub fn blocks(content: &HomeContent) -> Vec<Block> {
    let heading = Style::default().add_modifier(Modifier::BOLD);
    let muted = Style::default().fg(Color::Gray);
    let link = Style::default().add_modifier(Modifier::UNDERLINED);

    let mut blocks = vec![
        // Hero
        fade_up(
            Block::text(TextLine::new(content.badge.to_uppercase()).style(muted)),
            0,
        ),
        fade_up(
            Block::new(vec![
                TextLine::new(content.headline[0]).style(heading),
                TextLine::new(format!("    {}", content.headline[1]))
                    .style(heading.add_modifier(Modifier::ITALIC)),
            ]),
            1,
        ),
        fade_up(Block::text(TextLine::new(content.tagline)), 2),
        fade_up(
            Block::text(TextLine::new("View Projects →").style(link))
                .link(LinkTarget::Route(Route::Projects))
                .gap(0),
            3,
        ),
        fade_up(
            Block::text(TextLine::new("Contact Me").style(link))
                .link(LinkTarget::Route(Route::Contact)),
            3,
        ),
        chart(&CHART_BACK, HERO_PARALLAX_SPEEDS[0]).gap(0),
        chart(&CHART_FRONT, HERO_PARALLAX_SPEEDS[1]).indent(10).gap(3),
        // About
        fade_up(
            Block::new(vec![
                TextLine::new(content.about_heading).style(heading),
                TextLine::new(content.about_lead).style(muted),
            ]),
            0,
        ),
        fade_up(
            Block::text(TextLine::new(content.about_quote).style(Style::default().add_modifier(Modifier::ITALIC))),
            1,
        ),
    ];

    for (index, pillar) in content.pillars.iter().enumerate() {
        blocks.push(fade_up(
            Block::new(vec![
                TextLine::new(pillar.title).style(heading),
                TextLine::new(pillar.body).style(muted),
            ])
            .indent(2),
            index + 2,
        ));
    }
    if let Some(last) = blocks.last_mut() {
        last.gap_after = 3;
    }

    // Competencies
    blocks.push(
        Block::new(vec![
            TextLine::new(content.competencies_heading).style(heading),
            TextLine::new(content.competencies_lead).style(muted),
        ])
        .reveal(RevealStyle::FadeIn, Duration::ZERO),
    );
    for (index, skill) in COMPETENCIES.iter().enumerate() {
        blocks.push(fade_up(
            Block::new(vec![
                TextLine::new(format!("{:02}  {}", index + 1, skill.title)).style(heading),
                TextLine::new(skill.description).style(muted),
            ])
            .indent(2),
            index,
        ));
    }
    if let Some(last) = blocks.last_mut() {
        last.gap_after = 3;
    }

    // Featured case study
    blocks.push(fade_up(
        Block::text(TextLine::new(content.featured_label.to_uppercase()).style(muted).centered()),
        0,
    ));
    blocks.push(fade_up(
        Block::text(TextLine::new(content.featured_title).style(heading).centered()),
        1,
    ));
    blocks.push(
        fade_up(
            Block::text(TextLine::new("View Case Study →").style(link).centered())
                .link(LinkTarget::Route(Route::Projects)),
            2,
        )
        .gap(3),
    );

    // Call to action
    blocks.push(fade_up(
        Block::text(TextLine::new(content.cta_heading).style(heading).centered()),
        0,
    ));
    blocks.push(fade_up(
        Block::text(TextLine::new(content.cta_body).style(muted).centered()),
        1,
    ));
    blocks.push(
        fade_up(
            Block::text(TextLine::new("Get in Touch →").style(link).centered())
                .link(LinkTarget::Route(Route::Contact)),
            2,
        )
        .gap(2),
    );

    blocks
}
