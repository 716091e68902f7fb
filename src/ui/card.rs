use iced::mouse::{self, Cursor};
use iced::widget::canvas::{self, Canvas, Program};
use iced::widget::{column, container, mouse_area, text};
use iced::{Color, Element, Point, Rectangle, Renderer, Size, Theme};

use crate::assets::loader::LoadedImage;
use crate::geometry::{AssetScale, CropTransform, CARD_HEIGHT, CARD_WIDTH};
use crate::state::data::Whiteboard;
use crate::Message;

/// Placeholder shown until (or instead of) the photo
const CARD_BACKGROUND: Color = Color::from_rgb(0.16, 0.16, 0.17);

/// Canvas drawing the whiteboard region of a photo stretched to the card box
pub struct CardPicture<'a> {
    /// The decoded asset, once loaded
    pub image: Option<&'a LoadedImage>,
    /// Crop-and-fit transform in the displayed asset's coordinate space
    pub transform: CropTransform,
}

impl<'a> CardPicture<'a> {
    pub fn new(board: &Whiteboard, image: Option<&'a LoadedImage>, scale: AssetScale) -> Self {
        Self {
            image,
            transform: scale.card_transform(&board.corners),
        }
    }

    /// Where the whole asset is drawn, in card coordinates
    pub fn image_bounds(&self) -> Option<Rectangle> {
        let image = self.image?;
        let (x, y, width, height) = self
            .transform
            .place(image.width as f32, image.height as f32);
        Some(Rectangle::new(Point::new(x, y), Size::new(width, height)))
    }
}

impl Program<Message> for CardPicture<'_> {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());
        frame.fill_rectangle(Point::ORIGIN, bounds.size(), CARD_BACKGROUND);

        if let (Some(image), Some(placed)) = (self.image, self.image_bounds()) {
            frame.draw_image(placed, &image.handle);
        }

        vec![frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        _state: &Self::State,
        bounds: Rectangle,
        cursor: Cursor,
    ) -> mouse::Interaction {
        if cursor.is_over(bounds) {
            mouse::Interaction::Pointer
        } else {
            mouse::Interaction::default()
        }
    }
}

/// A clickable card: cropped photo plus room id label
pub fn card<'a>(
    board: &'a Whiteboard,
    image: Option<&'a LoadedImage>,
    scale: AssetScale,
) -> Element<'a, Message> {
    let picture = Canvas::new(CardPicture::new(board, image, scale))
        .width(CARD_WIDTH)
        .height(CARD_HEIGHT);

    let content = column![
        container(picture)
            .width(CARD_WIDTH)
            .height(CARD_HEIGHT)
            .clip(true),
        container(text(board.room_id.as_str()).size(16))
            .width(CARD_WIDTH)
            .center_x(CARD_WIDTH)
            .padding(6),
    ]
    .width(CARD_WIDTH);

    mouse_area(content)
        .on_press(Message::OpenBoard(board.room_id.clone()))
        .interaction(mouse::Interaction::Pointer)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::{Corner, Corners};
    use iced::widget::image::Handle;

    fn board() -> Whiteboard {
        Whiteboard {
            room_id: "F30".to_string(),
            file: "f30.webp".to_string(),
            corners: Corners {
                tl: Corner::new(30.0, 60.0),
                tr: Corner::new(450.0, 60.0),
                br: Corner::new(450.0, 600.0),
                bl: Corner::new(30.0, 600.0),
            },
            floor: Some(3),
        }
    }

    fn loaded(width: u32, height: u32) -> LoadedImage {
        LoadedImage {
            handle: Handle::from_bytes(Vec::<u8>::new()),
            width,
            height,
        }
    }

    #[test]
    fn test_no_bounds_without_image() {
        let board = board();
        let picture = CardPicture::new(&board, None, AssetScale::default());
        assert!(picture.image_bounds().is_none());
    }

    #[test]
    fn test_small_asset_bounds() {
        let board = board();
        // the small asset of a 600x900 photo
        let image = loaded(200, 300);
        let picture = CardPicture::new(&board, Some(&image), AssetScale::default());
        let placed = picture.image_bounds().unwrap();

        // crop box is 140x180 in small space: scale 2x2, origin at (10, 20)
        assert!((placed.x + 20.0).abs() < 1e-3);
        assert!((placed.y + 40.0).abs() < 1e-3);
        assert!((placed.width - 400.0).abs() < 1e-3);
        assert!((placed.height - 600.0).abs() < 1e-3);
    }

    #[test]
    fn test_full_asset_bounds_match_small() {
        let board = board();
        let full = loaded(600, 900);
        let small = loaded(200, 300);
        let a = CardPicture::new(&board, Some(&full), AssetScale::Full)
            .image_bounds()
            .unwrap();
        let b = CardPicture::new(&board, Some(&small), AssetScale::default())
            .image_bounds()
            .unwrap();
        assert!((a.x - b.x).abs() < 1e-3);
        assert!((a.y - b.y).abs() < 1e-3);
        assert!((a.width - b.width).abs() < 1e-3);
        assert!((a.height - b.height).abs() < 1e-3);
    }
}
