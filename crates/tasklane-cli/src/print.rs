use std::io::{self, IsTerminal, Write};

use tasklane_core::Labels;
use tasklane_core::render::{CardActions, DateKind, StatsView, TaskCard, TaskListView};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone)]
pub struct Printer {
    color: bool,
}

impl Printer {
    pub fn new() -> Self {
        let color = std::env::var_os("NO_COLOR").is_none() && io::stdout().is_terminal();
        Self { color }
    }

    pub fn plain() -> Self {
        Self { color: false }
    }

    #[tracing::instrument(skip_all)]
    pub fn print_task_list(&self, view: &TaskListView, labels: &Labels) -> anyhow::Result<()> {
        self.write_task_list(io::stdout().lock(), view, labels)
    }

    pub fn print_task_card(&self, card: &TaskCard, labels: &Labels) -> anyhow::Result<()> {
        self.write_task_card(io::stdout().lock(), card, labels)
    }

    pub fn print_statistics(&self, stats: &StatsView, labels: &Labels) -> anyhow::Result<()> {
        self.write_statistics(io::stdout().lock(), stats, labels)
    }

    pub fn print_notice(&self, message: &str) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();
        writeln!(out, "{}", self.paint(message, "32"))?;
        Ok(())
    }

    pub fn write_task_list<W: Write>(
        &self,
        mut out: W,
        view: &TaskListView,
        labels: &Labels,
    ) -> anyhow::Result<()> {
        let cards = match view {
            TaskListView::Placeholder(text) => {
                writeln!(out, "{text}")?;
                return Ok(());
            }
            TaskListView::Cards(cards) => cards,
        };

        let headers = vec![
            "ID".to_string(),
            labels.field_priority.to_string(),
            labels.field_due_date.to_string(),
            String::new(),
            labels.field_title.to_string(),
            labels.field_tags.to_string(),
        ];

        let rows = cards
            .iter()
            .map(|card| {
                let due = date_text(card, DateKind::Due);
                let (due, state) = if card.overdue {
                    (self.paint(&due, "31"), self.paint(labels.overdue, "31"))
                } else if card.actions == CardActions::Completed {
                    (due, self.paint(labels.completed_badge, "32"))
                } else {
                    (due, String::new())
                };
                vec![
                    self.paint(card.id.as_str(), "33"),
                    card.priority_label.to_string(),
                    due,
                    state,
                    card.title.clone(),
                    card.tags.join(", "),
                ]
            })
            .collect();

        write_table(out, headers, rows)
    }

    pub fn write_task_card<W: Write>(
        &self,
        mut out: W,
        card: &TaskCard,
        labels: &Labels,
    ) -> anyhow::Result<()> {
        writeln!(out, "{}  [{}]", self.paint(&card.title, "1"), card.priority_label)?;
        writeln!(out, "ID: {}", self.paint(card.id.as_str(), "33"))?;
        if !card.description.trim().is_empty() {
            writeln!(out, "{}", card.description)?;
        }
        if !card.tags.is_empty() {
            writeln!(out, "{}: {}", labels.field_tags, card.tags.join(", "))?;
        }
        for line in &card.dates {
            writeln!(out, "{}: {}", line.label, line.text)?;
        }
        match card.actions {
            CardActions::Completed => writeln!(out, "{}", self.paint(labels.completed_badge, "32"))?,
            CardActions::Pending if card.overdue => writeln!(out, "{}", self.paint(labels.overdue, "31"))?,
            CardActions::Pending => {}
        }
        Ok(())
    }

    pub fn write_statistics<W: Write>(
        &self,
        mut out: W,
        stats: &StatsView,
        labels: &Labels,
    ) -> anyhow::Result<()> {
        writeln!(
            out,
            "{} {}  {} {}  {} {}  {}",
            labels.stats_active,
            stats.active,
            labels.stats_completed,
            stats.completed,
            labels.stats_total,
            stats.total,
            self.paint(&stats.rate_text, "36"),
        )?;
        Ok(())
    }

    fn paint(&self, text: &str, code: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        format!("\x1b[{code}m{text}\x1b[0m")
    }
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

fn date_text(card: &TaskCard, kind: DateKind) -> String {
    card.dates
        .iter()
        .find(|line| line.kind == kind)
        .map(|line| line.text.clone())
        .unwrap_or_default()
}

fn write_table<W: Write>(mut writer: W, headers: Vec<String>, rows: Vec<Vec<String>>) -> anyhow::Result<()> {
    let mut widths: Vec<usize> = headers
        .iter()
        .map(|header| UnicodeWidthStr::width(header.as_str()))
        .collect();

    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(UnicodeWidthStr::width(strip_ansi(cell).as_str()));
        }
    }

    write_row(&mut writer, &headers, &widths)?;
    for width in &widths {
        write!(writer, "{:-<width$} ", "", width = *width)?;
    }
    writeln!(writer)?;

    for row in &rows {
        write_row(&mut writer, row, &widths)?;
    }

    Ok(())
}

fn write_row<W: Write>(writer: &mut W, cells: &[String], widths: &[usize]) -> anyhow::Result<()> {
    for (cell, width) in cells.iter().zip(widths) {
        let visible = UnicodeWidthStr::width(strip_ansi(cell).as_str());
        let padding = width.saturating_sub(visible);
        write!(writer, "{}{} ", cell, " ".repeat(padding))?;
    }
    writeln!(writer)?;
    Ok(())
}

fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut escaped = false;

    for ch in s.chars() {
        if escaped {
            if ch == 'm' {
                escaped = false;
            }
            continue;
        }

        if ch == '\x1b' {
            escaped = true;
            continue;
        }

        out.push(ch);
    }

    out
}
