use std::io::Error;

use crossterm::style::Stylize;

use crate::libs::syntax_highlight::highlight_json;
use crate::libs::terminal::{draw_lock, print_at};

const BORDER: [char; 6] = ['╭', '╮', '╰', '╯', '─', '│'];

pub enum WindowAttr {
    Title(Option<String>),
    Footer(Option<String>),
    Width(usize),
    Height(usize),
    Top(usize),
    Left(usize),
    Content(Vec<String>),
    Highlight(bool),
}

/// A boxed, scrollable block of rows. Geometry includes the border.
#[derive(Default, Clone, Debug)]
pub struct Window {
    pub title: Option<String>,
    pub content: Vec<String>,
    pub footer: Option<String>,
    pub top: usize,
    pub left: usize,
    pub width: usize,
    pub height: usize,
    pub scroll_offset: usize,
    pub highlight: bool,
}

impl Window {
    pub fn with_attrs(attrs: Vec<WindowAttr>) -> Window {
        let mut window = Window::default();
        for attr in attrs {
            window.update_attribute(attr);
        }
        window
    }

    pub fn update_attribute(&mut self, attr: WindowAttr) -> &mut Self {
        match attr {
            WindowAttr::Title(title) => self.title = title,
            WindowAttr::Footer(footer) => self.footer = footer,
            WindowAttr::Content(content) => {
                self.content = content;
                self.scroll_offset = 0;
            }
            WindowAttr::Highlight(highlight) => self.highlight = highlight,
            WindowAttr::Width(width) => self.width = width,
            WindowAttr::Height(height) => self.height = height,
            WindowAttr::Top(top) => self.top = top,
            WindowAttr::Left(left) => self.left = left,
        }
        self
    }

    fn inner_width(&self) -> usize {
        self.width.saturating_sub(3)
    }

    fn inner_height(&self) -> usize {
        self.height.saturating_sub(2)
    }

    pub fn max_scroll(&self) -> usize {
        self.content.len().saturating_sub(self.inner_height())
    }

    pub fn scroll_by(&mut self, offset: isize) -> &mut Self {
        let next = self.scroll_offset as isize + offset;
        self.scroll_offset = next.clamp(0, self.max_scroll() as isize) as usize;
        self
    }

    /// Rows currently in view, cut to the inner width and padded to it.
    pub fn visible_content(&self) -> Vec<String> {
        let width = self.inner_width();
        self.content
            .iter()
            .skip(self.scroll_offset)
            .take(self.inner_height())
            .map(|row| {
                let mut row: String = row.chars().take(width).collect();
                let len = row.chars().count();
                row.push_str(&" ".repeat(width - len));
                row
            })
            .collect()
    }

    /// Row of the scrollbar thumb relative to the first inner row.
    pub fn scrollbar_thumb(&self) -> Option<usize> {
        let inner = self.inner_height();
        let max_scroll = self.max_scroll();
        if max_scroll == 0 || inner == 0 {
            return None;
        }
        Some(self.scroll_offset * (inner - 1) / max_scroll)
    }

    pub fn draw(&self) -> Result<(), Error> {
        if self.width < 4 || self.height < 3 {
            return Ok(());
        }
        let _drawing = draw_lock();
        self.clear()?;
        self.draw_decoration()?;

        for (i, row) in self.visible_content().iter().enumerate() {
            let row = if self.highlight {
                highlight_json(row)
            } else {
                row.clone()
            };
            print_at((self.left + 1) as u16, (self.top + 1 + i) as u16, &row)?;
        }

        if let Some(thumb) = self.scrollbar_thumb() {
            let column = (self.left + self.width - 2) as u16;
            for i in 0..self.inner_height() {
                let mark = if i == thumb { "█" } else { "│" };
                print_at(column, (self.top + 1 + i) as u16, &mark.dark_grey().to_string())?;
            }
        }
        Ok(())
    }

    pub fn clear(&self) -> Result<(), Error> {
        for i in 0..self.height {
            print_at(
                self.left as u16,
                (self.top + i) as u16,
                &" ".repeat(self.width),
            )?;
        }
        Ok(())
    }

    fn draw_decoration(&self) -> Result<(), Error> {
        let [top_left, top_right, bottom_left, bottom_right, horizontal, vertical] = BORDER;
        let span = horizontal.to_string().repeat(self.width - 2);

        print_at(
            self.left as u16,
            self.top as u16,
            &format!("{}{}{}", top_left, span, top_right).dark_grey().to_string(),
        )?;
        for i in 1..self.height - 1 {
            print_at(self.left as u16, (self.top + i) as u16, &vertical.to_string().dark_grey().to_string())?;
            print_at(
                (self.left + self.width - 1) as u16,
                (self.top + i) as u16,
                &vertical.to_string().dark_grey().to_string(),
            )?;
        }
        print_at(
            self.left as u16,
            (self.top + self.height - 1) as u16,
            &format!("{}{}{}", bottom_left, span, bottom_right).dark_grey().to_string(),
        )?;

        if let Some(title) = &self.title {
            let title: String = title.chars().take(self.width.saturating_sub(4)).collect();
            print_at((self.left + 1) as u16, self.top as u16, &format!(" {} ", title).grey().to_string())?;
        }
        if let Some(footer) = &self.footer {
            let footer: String = footer.chars().take(self.width.saturating_sub(4)).collect();
            let x = self.left + self.width - footer.chars().count() - 3;
            print_at(
                x as u16,
                (self.top + self.height - 1) as u16,
                &format!(" {} ", footer).grey().to_string(),
            )?;
        }
        Ok(())
    }
}
