//! Line commands translated into UI events for one screen.

use anyhow::{bail, Result};
use std::cell::RefCell;
use std::fmt::Write;
use std::rc::Rc;
use tileboard_core::command::board::{handle_board_click, handle_board_edit};
use tileboard_core::command::gallery::{
    handle_add_click, handle_recolor_click, handle_shape_click,
};
use tileboard_core::store::StoreOptions;
use tileboard_core::{
    AnyStorage, AppConfig, BoardStore, BoardView, CommandOutcome, ElementMeta, EventPath,
    GalleryStore, GalleryView, VisualTree,
};

pub trait Session {
    /// Applies one command line and reports what the store did.
    fn execute(&mut self, line: &str) -> Result<CommandOutcome>;

    fn render(&self) -> String;
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum GalleryEvent {
    Add(EventPath),
    Recolor(EventPath),
    TileClick(EventPath),
}

fn parse_gallery_line(line: &str) -> Result<GalleryEvent> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let event = match words.as_slice() {
        ["add", kind] => GalleryEvent::Add(button("add", kind)),
        ["recolor", kind] => GalleryEvent::Recolor(button("recolor", kind)),
        ["remove", id] => GalleryEvent::TileClick(
            EventPath::default()
                .then(ElementMeta::new().with("shape-id", *id))
                .then(ElementMeta::new().with("shapes", "")),
        ),
        _ => bail!("unrecognized gallery command `{line}`"),
    };
    Ok(event)
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum BoardEvent {
    Click(EventPath),
    Edit(EventPath, String),
}

fn parse_board_line(line: &str) -> Result<BoardEvent> {
    let (head, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let words: Vec<&str> = rest.split_whitespace().collect();
    let event = match (head, words.as_slice()) {
        ("add", [column]) => BoardEvent::Click(column_button("add", column)),
        ("sort", [column]) => BoardEvent::Click(column_button("sort", column)),
        ("recolor-column", [column]) => {
            BoardEvent::Click(column_button("color-column", column))
        }
        ("recolor", [column, id]) => BoardEvent::Click(card_button("recolor", column, id)),
        ("delete", [column, id]) => BoardEvent::Click(card_button("delete", column, id)),
        ("move", [column, id, direction]) => {
            let action = match *direction {
                "left" => "move-left",
                "right" => "move-right",
                other => bail!("direction must be left or right, got `{other}`"),
            };
            BoardEvent::Click(card_button(action, column, id))
        }
        ("title", [column, id, ..]) => {
            BoardEvent::Edit(card_body(column, id), skip_words(rest, 2).trim_start().to_string())
        }
        _ => bail!("unrecognized board command `{line}`"),
    };
    Ok(event)
}

/// Drops the first `count` words of `text`; the rest is returned untouched.
fn skip_words(text: &str, count: usize) -> &str {
    let mut remainder = text;
    for _ in 0..count {
        remainder = remainder
            .trim_start()
            .split_once(char::is_whitespace)
            .map_or("", |(_, tail)| tail);
    }
    remainder
}

fn button(attribute: &str, value: &str) -> EventPath {
    EventPath::default().then(ElementMeta::new().with(attribute, value))
}

fn column_button(action: &str, column: &str) -> EventPath {
    EventPath::default()
        .then(ElementMeta::new().with("action", action))
        .then(ElementMeta::new().with("column", column))
}

fn card_button(action: &str, column: &str, id: &str) -> EventPath {
    EventPath::default()
        .then(ElementMeta::new().with("action", action))
        .then(card_element(column, id))
}

fn card_body(column: &str, id: &str) -> EventPath {
    EventPath::default()
        .then(ElementMeta::new().with("class", "card__content"))
        .then(card_element(column, id))
}

fn card_element(column: &str, id: &str) -> ElementMeta {
    ElementMeta::new().with("id", id).with("column", column)
}

pub struct GallerySession {
    store: GalleryStore<AnyStorage>,
    view: Rc<RefCell<GalleryView<VisualTree>>>,
}

impl GallerySession {
    pub fn open(storage: AnyStorage, config: &AppConfig) -> Self {
        let store = GalleryStore::with_options(
            storage,
            StoreOptions {
                storage_key: Some(config.gallery_key.clone()),
                rng_seed: config.rng_seed,
            },
        );
        let view = Rc::new(RefCell::new(GalleryView::new(VisualTree::new())));
        GalleryView::attach(&view, &store);
        Self { store, view }
    }
}

impl Session for GallerySession {
    fn execute(&mut self, line: &str) -> Result<CommandOutcome> {
        let outcome = match parse_gallery_line(line)? {
            GalleryEvent::Add(path) => handle_add_click(&self.store, &path)?,
            GalleryEvent::Recolor(path) => handle_recolor_click(&self.store, &path)?,
            GalleryEvent::TileClick(path) => handle_shape_click(&self.store, &path)?,
        };
        Ok(outcome)
    }

    fn render(&self) -> String {
        let view = self.view.borrow();
        let counts = view.counts();
        let mut out = format!(
            "total={} square={} circle={}\n",
            counts.total, counts.square, counts.circle
        );
        if view.empty_visible() {
            out.push_str("(no shapes)\n");
        }
        out.push_str(&view.target().render_text());
        out
    }
}

pub struct BoardSession {
    store: BoardStore<AnyStorage>,
    view: Rc<RefCell<BoardView<VisualTree>>>,
}

impl BoardSession {
    pub fn open(storage: AnyStorage, config: &AppConfig) -> Self {
        let store = BoardStore::with_options(
            storage,
            StoreOptions {
                storage_key: Some(config.board_key.clone()),
                rng_seed: config.rng_seed,
            },
        );
        let view = Rc::new(RefCell::new(BoardView::new(|_| VisualTree::new())));
        BoardView::attach(&view, &store);
        Self { store, view }
    }
}

impl Session for BoardSession {
    fn execute(&mut self, line: &str) -> Result<CommandOutcome> {
        let outcome = match parse_board_line(line)? {
            BoardEvent::Click(path) => handle_board_click(&self.store, &path)?,
            BoardEvent::Edit(path, text) => handle_board_edit(&self.store, &path, &text)?,
        };
        Ok(outcome)
    }

    fn render(&self) -> String {
        let view = self.view.borrow();
        let mut out = String::new();
        for (key, pane) in view.panes() {
            let _ = writeln!(out, "[{}] {}", key.as_str(), pane.count);
            for line in pane.target.render_text().lines() {
                let _ = writeln!(out, "  {line}");
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_board_line, parse_gallery_line, BoardEvent, GalleryEvent};

    #[test]
    fn gallery_lines_become_button_events() {
        let GalleryEvent::Add(path) = parse_gallery_line("add circle").unwrap() else {
            panic!("expected add event");
        };
        assert_eq!(path.closest("add"), Some("circle"));

        let GalleryEvent::TileClick(path) = parse_gallery_line("remove abc").unwrap() else {
            panic!("expected tile click");
        };
        assert_eq!(path.closest("shape-id"), Some("abc"));

        assert!(parse_gallery_line("add").is_err());
    }

    #[test]
    fn board_move_maps_direction_to_action() {
        let BoardEvent::Click(path) = parse_board_line("move todo c-1 right").unwrap() else {
            panic!("expected click event");
        };
        assert_eq!(path.closest("action"), Some("move-right"));
        assert_eq!(path.closest("column"), Some("todo"));
        assert_eq!(path.closest("id"), Some("c-1"));

        assert!(parse_board_line("move todo c-1 up").is_err());
    }

    #[test]
    fn board_title_keeps_remaining_text() {
        let BoardEvent::Edit(path, text) =
            parse_board_line("title doing c-2 Write the  report").unwrap()
        else {
            panic!("expected edit event");
        };
        assert_eq!(path.closest("id"), Some("c-2"));
        assert_eq!(text, "Write the  report");

        let BoardEvent::Edit(path, text) = parse_board_line("title doing  c-2   Report").unwrap()
        else {
            panic!("expected edit event");
        };
        assert_eq!(path.closest("id"), Some("c-2"));
        assert_eq!(text, "Report");

        let BoardEvent::Edit(_, text) = parse_board_line("title doing c-2").unwrap() else {
            panic!("expected edit event");
        };
        assert_eq!(text, "");
    }
}
