use iced::widget::scrollable::{Direction, Scrollbar};
use iced::widget::{column, container, row, scrollable, text, Column};
use iced::{Color, Element, Length};
use std::collections::HashMap;

use super::card::card;
use crate::assets::loader::LoadedImage;
use crate::geometry::AssetScale;
use crate::state::gallery::{FloorGroup, GalleryLoad};
use crate::state::scroll_lock::PageScroll;
use crate::Message;

pub const TITLE: &str = "I-House Whiteboard Gallery";
pub const SUBTITLE: &str = "Fall 2025";

const ERROR_COLOR: Color = Color::from_rgb(0.95, 0.45, 0.45);

/// One floor: heading plus a horizontally scrolling row of cards
fn floor_section<'a>(
    group: &'a FloorGroup,
    images: &'a HashMap<String, LoadedImage>,
    scale: AssetScale,
) -> Element<'a, Message> {
    let cards = row(group
        .boards
        .iter()
        .map(|board| card(board, images.get(&board.file), scale)))
    .spacing(16);

    column![
        text(format!("Floor {}", group.floor)).size(20),
        scrollable(cards)
            .direction(Direction::Horizontal(Scrollbar::default()))
            .width(Length::Fill),
    ]
    .spacing(8)
    .into()
}

fn centered<'a>(content: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}

/// The whole page in its current load state
pub fn page<'a>(
    load: &'a GalleryLoad,
    images: &'a HashMap<String, LoadedImage>,
    scale: AssetScale,
    page_scroll: &PageScroll,
) -> Element<'a, Message> {
    let gallery = match load {
        GalleryLoad::Loading => return centered(text("Loading…").size(18)),
        GalleryLoad::Failed(message) => {
            return centered(text(message.as_str()).size(18).color(ERROR_COLOR))
        }
        GalleryLoad::Ready(gallery) => gallery,
    };

    let header = column![text(TITLE).size(40), text(SUBTITLE).size(18)].spacing(4);

    let sections: Column<Message> = gallery
        .groups
        .iter()
        .map(|group| floor_section(group, images, scale))
        .fold(column![header].spacing(32).padding(32), |col, section| {
            col.push(section)
        });

    // While the viewer is open the page keeps its position but shows no scrollbar
    let scrollbar = if page_scroll.is_suspended() {
        Scrollbar::new().width(0).scroller_width(0)
    } else {
        Scrollbar::default()
    };

    scrollable(sections)
        .direction(Direction::Vertical(scrollbar))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
