use ratatui::style::{Color, Modifier, Style};

use crate::adapters::tui::document::{Block, Focus, LinkTarget, TextLine};
use crate::adapters::tui::widgets::TextInput;
use crate::application::pages::{ContactController, SubmitStatus, SUBMIT_SUCCESS_MESSAGE};
use crate::domain::{FormField, SiteProfile};

/// Input state the page needs beyond the controller.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormView<'a> {
    pub focused_field: Option<FormField>,
    /// Validation problem from the last submit attempt
    pub notice: Option<&'a str>,
}

pub fn blocks(
    controller: &ContactController,
    profile: &SiteProfile,
    view: FormView<'_>,
    width: u16,
) -> Vec<Block> {
    let heading = Style::default().add_modifier(Modifier::BOLD);
    let muted = Style::default().fg(Color::Gray);

    let mut blocks = vec![
        Block::new(vec![
            TextLine::new("Let's Connect").style(heading),
            TextLine::new(
                "Have a project in mind or want to discuss data analysis opportunities? I'd love to hear from you.",
            )
            .style(muted),
        ])
        .gap(2),
        Block::text(TextLine::new("Send a Message").style(heading)),
    ];

    match controller.status() {
        SubmitStatus::Success => blocks.push(Block::text(
            TextLine::new(SUBMIT_SUCCESS_MESSAGE).style(Style::default().fg(Color::Green)),
        )),
        SubmitStatus::Error(message) => blocks.push(Block::text(
            TextLine::new(message.as_str()).style(Style::default().fg(Color::Red)),
        )),
        SubmitStatus::Idle | SubmitStatus::Submitting => {}
    }
    if let Some(notice) = view.notice {
        blocks.push(Block::text(
            TextLine::new(notice).style(Style::default().fg(Color::Yellow)),
        ));
    }

    for field in FormField::ALL {
        let input = TextInput::new(field, controller.form().field(field))
            .focused(view.focused_field == Some(field));
        blocks.push(Block::new(input.lines(width)).focus(Focus::Field(field)));
    }

    let button_style = if controller.can_submit() {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    blocks.push(
        Block::text(TextLine::raw(format!("[ {} ]", controller.submit_label())).style(button_style))
            .focus(Focus::Submit)
            .gap(3),
    );

    blocks.push(Block::new(vec![
        TextLine::new("Get in Touch").style(heading),
        TextLine::new(
            "I'm always open to discussing new projects, creative ideas, or opportunities to be part of your vision. Whether you need data analysis expertise or want to collaborate on innovative solutions, feel free to reach out.",
        )
        .style(muted),
    ]));

    blocks.push(Block::text(TextLine::new("Connect Online").style(heading)).gap(0));
    let channels = [
        ("Email", profile.email.clone(), profile.mailto()),
        ("LinkedIn", "Connect with me".to_string(), profile.linkedin_url.clone()),
        ("GitHub", "View my code".to_string(), profile.github_url.clone()),
    ];
    for (label, caption, url) in channels {
        blocks.push(
            Block::new(vec![
                TextLine::new(label).style(muted),
                TextLine::new(caption),
            ])
            .link(LinkTarget::External(url))
            .indent(2),
        );
    }

    blocks.push(
        Block::new(vec![
            TextLine::new("Response Time").style(heading),
            TextLine::new(
                "I typically respond to inquiries within 24-48 hours. For urgent matters, please mention it in your subject line.",
            ),
        ])
        .gap(2),
    );

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn texts(blocks: &[Block]) -> Vec<String> {
        blocks
            .iter()
            .flat_map(|b| b.lines.iter().map(|l| l.text.clone()))
            .collect()
    }

    #[test]
    fn test_form_fields_are_focusable_in_order() {
        let controller = ContactController::new();
        let blocks = blocks(&controller, &SiteProfile::default(), FormView::default(), 60);

        let fields: Vec<Focus> = blocks
            .iter()
            .filter_map(|b| b.focus.clone())
            .take(5)
            .collect();
        assert_eq!(
            fields,
            vec![
                Focus::Field(FormField::Name),
                Focus::Field(FormField::Email),
                Focus::Field(FormField::Subject),
                Focus::Field(FormField::Message),
                Focus::Submit,
            ]
        );
    }

    #[test]
    fn test_button_label_follows_status() {
        let mut controller = ContactController::new();
        let profile = SiteProfile::default();
        assert!(texts(&blocks(&controller, &profile, FormView::default(), 60))
            .contains(&"[ Send Message ]".to_string()));

        for field in FormField::ALL {
            controller.set_field(field, "x@y");
        }
        controller.begin_submit(Utc::now()).unwrap();
        assert!(texts(&blocks(&controller, &profile, FormView::default(), 60))
            .contains(&"[ Sending... ]".to_string()));

        controller.complete_submit(Ok(crate::domain::ContactSubmission::from_form(
            controller.form(),
            Utc::now(),
        )));
        assert!(texts(&blocks(&controller, &profile, FormView::default(), 60))
            .contains(&SUBMIT_SUCCESS_MESSAGE.to_string()));
    }
}
