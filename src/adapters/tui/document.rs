//! Scrollable page model for the terminal.
//!
//! A page is rebuilt as a list of [`Block`]s whenever it is drawn. Blocks are
//! identified by position, so the motion component mounted for a block
//! survives rebuilds as long as the block keeps its position and motion spec.

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::adapters::viewport::TerminalViewport;
use crate::application::motion::{Presentation, RevealStyle, ScrollParallax, ScrollReveal};
use crate::domain::{FormField, Route};
use crate::ports::{ElementId, ElementRect, ViewportEvent, ViewportWatcher};

/// Below this opacity a block is not drawn at all.
const INVISIBLE_BELOW: f64 = 0.1;
/// Below this opacity a block is drawn dimmed.
const DIM_BELOW: f64 = 0.7;

#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub style: Style,
    pub alignment: Alignment,
    /// Word-wrap to the page width; otherwise truncated
    pub wrap: bool,
}

impl TextLine {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: Style::default(),
            alignment: Alignment::Left,
            wrap: true,
        }
    }

    /// A pre-formatted line that is never wrapped.
    pub fn raw(text: impl Into<String>) -> Self {
        Self {
            wrap: false,
            ..Self::new(text)
        }
    }

    pub fn blank() -> Self {
        Self::new("")
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn centered(mut self) -> Self {
        self.alignment = Alignment::Center;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LinkTarget {
    Route(Route),
    /// Leaves the application (web or mail address)
    External(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Focus {
    Link(LinkTarget),
    Field(FormField),
    Submit,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionSpec {
    Static,
    Reveal { style: RevealStyle, delay: Duration },
    Parallax { speed: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub lines: Vec<TextLine>,
    pub motion: MotionSpec,
    pub focus: Option<Focus>,
    pub indent: u16,
    pub gap_after: u16,
}

impl Block {
    pub fn new(lines: Vec<TextLine>) -> Self {
        Self {
            lines,
            motion: MotionSpec::Static,
            focus: None,
            indent: 0,
            gap_after: 1,
        }
    }

    pub fn text(line: TextLine) -> Self {
        Self::new(vec![line])
    }

    pub fn reveal(mut self, style: RevealStyle, delay: Duration) -> Self {
        self.motion = MotionSpec::Reveal { style, delay };
        self
    }

    pub fn parallax(mut self, speed: f64) -> Self {
        self.motion = MotionSpec::Parallax { speed };
        self
    }

    pub fn focus(mut self, focus: Focus) -> Self {
        self.focus = Some(focus);
        self
    }

    pub fn link(self, target: LinkTarget) -> Self {
        self.focus(Focus::Link(target))
    }

    pub fn indent(mut self, indent: u16) -> Self {
        self.indent = indent;
        self
    }

    pub fn gap(mut self, rows: u16) -> Self {
        self.gap_after = rows;
        self
    }
}

enum Motion {
    Reveal(ScrollReveal),
    Parallax(ScrollParallax),
}

struct Mounted {
    spec: MotionSpec,
    motion: Motion,
}

#[derive(Debug, Clone)]
struct Placed {
    top: u16,
    rows: Vec<TextLine>,
}

impl Placed {
    fn height(&self) -> u16 {
        self.rows.len() as u16
    }
}

pub struct Document {
    viewport: Arc<TerminalViewport>,
    blocks: Vec<Block>,
    motions: HashMap<ElementId, Mounted>,
    placed: Vec<Placed>,
    viewport_rows: u16,
}

impl Document {
    pub fn new(viewport: Arc<TerminalViewport>) -> Self {
        Self {
            viewport,
            blocks: Vec::new(),
            motions: HashMap::new(),
            placed: Vec::new(),
            viewport_rows: 0,
        }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Replace the content, keeping motion state for blocks that kept their spec.
    pub fn set_blocks(&mut self, blocks: Vec<Block>) {
        let watcher: Arc<dyn ViewportWatcher> = self.viewport.clone();

        self.motions.retain(|id, mounted| {
            blocks
                .get(id.0)
                .is_some_and(|block| block.motion == mounted.spec)
        });

        for (index, block) in blocks.iter().enumerate() {
            let id = ElementId(index);
            if self.motions.contains_key(&id) {
                continue;
            }
            let motion = match block.motion {
                MotionSpec::Static => continue,
                MotionSpec::Reveal { style, delay } => {
                    Motion::Reveal(ScrollReveal::mount(watcher.clone(), id, style, delay))
                }
                MotionSpec::Parallax { speed } => {
                    Motion::Parallax(ScrollParallax::mount(watcher.clone(), id, speed))
                }
            };
            self.motions.insert(
                id,
                Mounted {
                    spec: block.motion,
                    motion,
                },
            );
        }

        self.blocks = blocks;
    }

    /// Wrap every block to `width` and publish the resulting geometry to the viewport.
    pub fn layout(&mut self, width: u16, viewport_rows: u16) {
        let scale = self.viewport.scale();
        let mut top = 0u16;
        self.placed = self
            .blocks
            .iter()
            .map(|block| {
                let inner = width.saturating_sub(block.indent).max(1) as usize;
                let rows: Vec<TextLine> = block
                    .lines
                    .iter()
                    .flat_map(|line| wrap_line(line, inner))
                    .collect();
                let placed = Placed { top, rows };
                top = top.saturating_add(placed.height()).saturating_add(block.gap_after);
                placed
            })
            .collect();

        for (index, placed) in self.placed.iter().enumerate() {
            self.viewport.set_layout(
                ElementId(index),
                ElementRect::new(
                    scale.rows_to_px(placed.top),
                    scale.rows_to_px(placed.height()),
                ),
            );
        }
        self.viewport_rows = viewport_rows;
        self.viewport.set_viewport_height(scale.rows_to_px(viewport_rows));
    }

    /// Route watcher notifications to the motion components they belong to.
    pub fn dispatch(&mut self, events: &[ViewportEvent], now: Instant) {
        for event in events {
            match event {
                ViewportEvent::Intersection(entry) => {
                    if let Some(Mounted {
                        motion: Motion::Reveal(reveal),
                        ..
                    }) = self.motions.get_mut(&entry.element)
                    {
                        reveal.handle_intersection(entry, now);
                    }
                }
                ViewportEvent::Scroll(entry) => {
                    if let Some(Mounted {
                        motion: Motion::Parallax(parallax),
                        ..
                    }) = self.motions.get_mut(&entry.element)
                    {
                        parallax.handle_scroll(entry);
                    }
                }
            }
        }
    }

    /// Advance delayed reveals. Returns true while any effect is still moving.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut animating = false;
        for mounted in self.motions.values_mut() {
            if let Motion::Reveal(reveal) = &mut mounted.motion {
                reveal.tick(now);
                animating |= reveal.is_animating(now);
            }
        }
        animating
    }

    pub fn presentation(&self, index: usize, now: Instant) -> Presentation {
        match self.motions.get(&ElementId(index)).map(|m| &m.motion) {
            Some(Motion::Reveal(reveal)) => reveal.presentation(now),
            Some(Motion::Parallax(parallax)) => Presentation {
                offset_y: parallax.offset(),
                ..Presentation::SETTLED
            },
            None => Presentation::SETTLED,
        }
    }

    /// Indices of focusable blocks, in page order
    pub fn focusables(&self) -> Vec<usize> {
        self.blocks
            .iter()
            .enumerate()
            .filter(|(_, block)| block.focus.is_some())
            .map(|(index, _)| index)
            .collect()
    }

    pub fn focus_at(&self, index: usize) -> Option<&Focus> {
        self.blocks.get(index).and_then(|block| block.focus.as_ref())
    }

    pub fn content_rows(&self) -> u16 {
        self.placed
            .last()
            .map(|p| p.top + p.height())
            .unwrap_or(0)
    }

    pub fn scroll_rows(&self) -> u16 {
        self.viewport
            .scale()
            .px_to_rows(self.viewport.scroll_top())
            .max(0) as u16
    }

    pub fn scroll_by_rows(&self, rows: i32) {
        let scale = self.viewport.scale();
        self.viewport.scroll_by(f64::from(rows) * scale.px_per_row);
    }

    pub fn scroll_to_row(&self, row: u16) {
        self.viewport.scroll_to(self.viewport.scale().rows_to_px(row));
    }

    /// Scroll the least amount that brings the block fully on screen.
    pub fn ensure_visible(&self, index: usize) {
        let Some(placed) = self.placed.get(index) else {
            return;
        };
        let scroll = self.scroll_rows();
        let bottom = placed.top + placed.height();
        if placed.top < scroll {
            self.scroll_to_row(placed.top);
        } else if bottom > scroll + self.viewport_rows {
            self.scroll_to_row(bottom.saturating_sub(self.viewport_rows));
        }
    }

    pub fn render(&self, buf: &mut Buffer, area: Rect, now: Instant, focused: Option<usize>) {
        let scale = self.viewport.scale();
        let scroll = i32::from(self.scroll_rows());

        for (index, (block, placed)) in self.blocks.iter().zip(&self.placed).enumerate() {
            let presentation = self.presentation(index, now);
            if presentation.opacity < INVISIBLE_BELOW {
                continue;
            }

            let dy = scale.px_to_rows(presentation.offset_y);
            let dx = scale.px_to_cols(presentation.offset_x);
            let mut extra = Modifier::empty();
            if presentation.opacity < DIM_BELOW {
                extra |= Modifier::DIM;
            }
            if focused == Some(index) {
                extra |= Modifier::REVERSED;
            }

            for (row, line) in placed.rows.iter().enumerate() {
                let y = i32::from(area.y) + i32::from(placed.top) + row as i32 - scroll + dy;
                if y < i32::from(area.y) || y >= i32::from(area.bottom()) {
                    continue;
                }

                let text_width = line.text.chars().count() as i32;
                let inner = i32::from(area.width) - i32::from(block.indent);
                let align = match line.alignment {
                    Alignment::Center => ((inner - text_width) / 2).max(0),
                    Alignment::Right => (inner - text_width).max(0),
                    Alignment::Left => 0,
                };
                let x = i32::from(area.x) + i32::from(block.indent) + align + dx;
                if x >= i32::from(area.right()) {
                    continue;
                }
                let x = x.max(i32::from(area.x));
                let max_width = (i32::from(area.right()) - x) as usize;

                buf.set_stringn(
                    x as u16,
                    y as u16,
                    &line.text,
                    max_width,
                    line.style.add_modifier(extra),
                );
            }
        }
    }
}

fn wrap_line(line: &TextLine, width: usize) -> Vec<TextLine> {
    if !line.wrap {
        return vec![line.clone()];
    }
    wrap(&line.text, width)
        .into_iter()
        .map(|text| TextLine {
            text,
            ..line.clone()
        })
        .collect()
}

/// Greedy word wrap; words longer than `width` are split.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut out = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_len = 0;

        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            while word.len() > width {
                if current_len > 0 {
                    out.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                let rest = word.split_off(width);
                out.push(word.into_iter().collect());
                word = rest;
            }

            let needed = if current_len == 0 { word.len() } else { current_len + 1 + word.len() };
            if needed > width {
                out.push(std::mem::take(&mut current));
                current_len = 0;
            }
            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current_len += word.len();
            current.extend(word);
        }

        out.push(current);
    }

    out
}
