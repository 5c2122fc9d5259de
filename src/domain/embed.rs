//! # Embeds
//!
//! A rich reply (title, description, colour, fields, footer, thumbnail) and its
//! markdown rendering. The chat adapter hands the markdown to the client
//! library, which produces the formatted body.

use crate::domain::types::Invocation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Green,
    Red,
    Gold,
    Yellow,
}

impl Color {
    /// Marker shown in front of the title, since room messages carry no accent colour.
    pub fn marker(&self) -> &'static str {
        match self {
            Color::Green => "🟢",
            Color::Red => "🔴",
            Color::Gold => "🟠",
            Color::Yellow => "🟡",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Embed {
    pub title: String,
    pub description: String,
    pub color: Color,
    pub fields: Vec<EmbedField>,
    pub footer: Option<String>,
    pub thumbnail: Option<String>,
}

impl Embed {
    pub fn new(title: impl Into<String>, description: impl Into<String>, color: Color) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            color,
            fields: Vec::new(),
            footer: None,
            thumbnail: None,
        }
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        self.fields.push(EmbedField {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }

    pub fn footer(mut self, text: impl Into<String>) -> Self {
        self.footer = Some(text.into());
        self
    }

    pub fn requested_by(self, invocation: &Invocation) -> Self {
        self.footer(invocation.footer())
    }

    pub fn thumbnail(mut self, url: impl Into<String>) -> Self {
        self.thumbnail = Some(url.into());
        self
    }

    /// Value of the first field called `name`.
    #[cfg(test)]
    pub fn field_value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }

    pub fn to_markdown(&self) -> String {
        let mut blocks = vec![format!("{} **{}**", self.color.marker(), self.title)];

        if !self.description.is_empty() {
            blocks.push(self.description.clone());
        }

        // Consecutive inline fields share one line.
        let mut inline_run: Vec<String> = Vec::new();
        for field in &self.fields {
            let rendered = render_field(field);
            if field.inline {
                inline_run.push(rendered);
            } else {
                if !inline_run.is_empty() {
                    blocks.push(inline_run.join(" · "));
                    inline_run.clear();
                }
                blocks.push(rendered);
            }
        }
        if !inline_run.is_empty() {
            blocks.push(inline_run.join(" · "));
        }

        if let Some(url) = &self.thumbnail {
            blocks.push(format!("[thumbnail]({url})"));
        }
        if let Some(footer) = &self.footer {
            blocks.push(format!("_{footer}_"));
        }

        blocks.join("\n\n")
    }
}

fn render_field(field: &EmbedField) -> String {
    match (field.name.is_empty(), field.value.is_empty()) {
        (true, _) => field.value.clone(),
        (false, true) => format!("**{}**", field.name),
        (false, false) => format!("**{}**: {}", field.name, field.value),
    }
}
