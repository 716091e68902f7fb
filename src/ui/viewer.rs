use cgmath::{Point2, Vector2};
use iced::alignment;
use iced::mouse::{self, Cursor};
use iced::widget::canvas::{self, Canvas, Program};
use iced::widget::{button, column, container, horizontal_space, mouse_area, opaque, row, text};
use iced::{Alignment, Color, Element, Length, Point, Rectangle, Renderer, Size, Theme};

use crate::assets::loader::LoadedImage;
use crate::state::viewer::{ClickTarget, PointerButton, Session, ViewerInput, Zoom};
use crate::Message;

const OVERLAY_BACKGROUND: Color = Color::from_rgba(0.0, 0.0, 0.0, 0.92);

/// Rectangle the image occupies inside a `surface`-sized canvas.
///
/// The image is fitted inside the surface (never enlarged), then scaled about
/// the surface centre and shifted by the pan offset.
pub fn image_rect(surface: Size, image: Size, scale: f32, offset: Vector2<f32>) -> Rectangle {
    let fit = if image.width > 0.0 && image.height > 0.0 {
        (surface.width / image.width)
            .min(surface.height / image.height)
            .min(1.0)
    } else {
        1.0
    };

    let width = image.width * fit * scale;
    let height = image.height * fit * scale;
    let center = Point::new(
        surface.width / 2.0 + offset.x,
        surface.height / 2.0 + offset.y,
    );

    Rectangle::new(
        Point::new(center.x - width / 2.0, center.y - height / 2.0),
        Size::new(width, height),
    )
}

/// Canvas showing the full photo with zoom and pan
/// Translates pointer and wheel events into viewer inputs
pub struct ViewerSurface<'a> {
    pub image: Option<&'a LoadedImage>,
    pub scale: f32,
    pub offset: Vector2<f32>,
    pub dragging: bool,
}

impl ViewerSurface<'_> {
    fn placed(&self, size: Size) -> Option<Rectangle> {
        let image = self.image?;
        Some(image_rect(
            size,
            Size::new(image.width as f32, image.height as f32),
            self.scale,
            self.offset,
        ))
    }
}

/// Viewer input for a button press at `local` (canvas space) and `at`
/// (window space), given where the image is drawn.
///
/// Until the image has loaded nothing is drawn, so every press lands on
/// the background.
fn route_press(
    placed: Option<Rectangle>,
    local: Point,
    at: Point,
    button: PointerButton,
) -> Option<ViewerInput> {
    let on_image = placed.map(|r| r.contains(local)).unwrap_or(false);

    match (on_image, button) {
        (true, PointerButton::Primary) => Some(ViewerInput::Press {
            button,
            at: Point2::new(at.x, at.y),
        }),
        (true, PointerButton::Other) => Some(ViewerInput::Click(ClickTarget::Image)),
        (false, PointerButton::Primary) => Some(ViewerInput::Click(ClickTarget::Background)),
        (false, PointerButton::Other) => None,
    }
}

fn input(input: ViewerInput) -> (canvas::event::Status, Option<Message>) {
    (canvas::event::Status::Captured, Some(Message::Viewer(input)))
}

impl Program<Message> for ViewerSurface<'_> {
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

        match (self.image, self.placed(bounds.size())) {
            (Some(image), Some(placed)) => frame.draw_image(placed, &image.handle),
            _ => frame.fill_text(canvas::Text {
                content: "Loading…".to_string(),
                position: frame.center(),
                color: Color::WHITE,
                horizontal_alignment: alignment::Horizontal::Center,
                vertical_alignment: alignment::Vertical::Center,
                ..canvas::Text::default()
            }),
        }

        vec![frame.into_geometry()]
    }

    fn update(
        &self,
        _state: &mut Self::State,
        event: canvas::Event,
        bounds: Rectangle,
        cursor: Cursor,
    ) -> (canvas::event::Status, Option<Message>) {
        let canvas::Event::Mouse(event) = event else {
            return (canvas::event::Status::Ignored, None);
        };

        match event {
            mouse::Event::WheelScrolled { delta } => {
                if !cursor.is_over(bounds) {
                    return (canvas::event::Status::Ignored, None);
                }
                let y = match delta {
                    mouse::ScrollDelta::Lines { y, .. } => y,
                    mouse::ScrollDelta::Pixels { y, .. } => y,
                };
                if y == 0.0 {
                    return (canvas::event::Status::Ignored, None);
                }
                let zoom = if y > 0.0 { Zoom::WheelIn } else { Zoom::WheelOut };
                input(ViewerInput::Zoom(zoom))
            }

            mouse::Event::ButtonPressed(button) => {
                let Some(local) = cursor.position_in(bounds) else {
                    return (canvas::event::Status::Ignored, None);
                };
                let button = match button {
                    mouse::Button::Left => PointerButton::Primary,
                    _ => PointerButton::Other,
                };
                let at = cursor.position().unwrap_or(local);

                match route_press(self.placed(bounds.size()), local, at, button) {
                    Some(routed) => input(routed),
                    None => (canvas::event::Status::Ignored, None),
                }
            }

            mouse::Event::CursorMoved { position } if self.dragging => {
                input(ViewerInput::Move(Point2::new(position.x, position.y)))
            }

            mouse::Event::ButtonReleased(_) if self.dragging => input(ViewerInput::Release),

            mouse::Event::CursorLeft if self.dragging => input(ViewerInput::Leave),

            _ => (canvas::event::Status::Ignored, None),
        }
    }

    fn mouse_interaction(
        &self,
        _state: &Self::State,
        bounds: Rectangle,
        cursor: Cursor,
    ) -> mouse::Interaction {
        if self.dragging {
            return mouse::Interaction::Grabbing;
        }
        let over_image = cursor
            .position_in(bounds)
            .zip(self.placed(bounds.size()))
            .map(|(p, r)| r.contains(p))
            .unwrap_or(false);
        if over_image {
            mouse::Interaction::Grab
        } else {
            mouse::Interaction::default()
        }
    }
}

/// The full-window overlay for an open session
pub fn overlay<'a>(session: &'a Session, image: Option<&'a LoadedImage>) -> Element<'a, Message> {
    let control = |label: &'a str, input: ViewerInput| {
        button(text(label).size(18))
            .padding([4, 12])
            .on_press(Message::Viewer(input))
    };

    let header = row![
        text(session.board().room_id.as_str()).size(22),
        horizontal_space(),
        control("+", ViewerInput::Zoom(Zoom::ButtonIn)),
        control("−", ViewerInput::Zoom(Zoom::ButtonOut)),
        control("Reset", ViewerInput::Reset),
        control("✕", ViewerInput::Close),
    ]
    .spacing(8)
    .padding(12)
    .align_y(Alignment::Center);

    let surface = Canvas::new(ViewerSurface {
        image,
        scale: session.scale(),
        offset: session.offset(),
        dragging: session.is_dragging(),
    })
    .width(Length::Fill)
    .height(Length::Fill);

    // Presses on the bar itself must not reach the background
    let header = mouse_area(header).on_press(Message::Viewer(ViewerInput::Click(ClickTarget::Controls)));

    let content = column![header, surface];

    opaque(
        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_theme| container::Style {
                background: Some(OVERLAY_BACKGROUND.into()),
                text_color: Some(Color::WHITE),
                ..container::Style::default()
            }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_fits_surface() {
        let r = image_rect(
            Size::new(800.0, 600.0),
            Size::new(1600.0, 600.0),
            1.0,
            Vector2::new(0.0, 0.0),
        );
        assert_eq!(r, Rectangle::new(Point::new(0.0, 150.0), Size::new(800.0, 300.0)));
    }

    #[test]
    fn test_small_image_not_enlarged() {
        let r = image_rect(
            Size::new(800.0, 600.0),
            Size::new(200.0, 100.0),
            1.0,
            Vector2::new(0.0, 0.0),
        );
        assert_eq!(r, Rectangle::new(Point::new(300.0, 250.0), Size::new(200.0, 100.0)));
    }

    #[test]
    fn test_scale_about_center_and_offset() {
        let r = image_rect(
            Size::new(800.0, 600.0),
            Size::new(200.0, 100.0),
            2.0,
            Vector2::new(10.0, -5.0),
        );
        assert_eq!(r, Rectangle::new(Point::new(210.0, 195.0), Size::new(400.0, 200.0)));
    }

    fn placed() -> Option<Rectangle> {
        Some(Rectangle::new(Point::new(100.0, 100.0), Size::new(200.0, 100.0)))
    }

    #[test]
    fn test_primary_press_on_image_starts_drag() {
        let routed = route_press(
            placed(),
            Point::new(150.0, 150.0),
            Point::new(150.0, 210.0),
            PointerButton::Primary,
        );
        assert_eq!(
            routed,
            Some(ViewerInput::Press {
                button: PointerButton::Primary,
                at: Point2::new(150.0, 210.0),
            })
        );
    }

    #[test]
    fn test_other_press_on_image_is_image_click() {
        let routed = route_press(
            placed(),
            Point::new(150.0, 150.0),
            Point::new(150.0, 150.0),
            PointerButton::Other,
        );
        assert_eq!(routed, Some(ViewerInput::Click(ClickTarget::Image)));
    }

    #[test]
    fn test_press_outside_image_is_background() {
        let outside = Point::new(20.0, 20.0);
        assert_eq!(
            route_press(placed(), outside, outside, PointerButton::Primary),
            Some(ViewerInput::Click(ClickTarget::Background))
        );
        assert_eq!(route_press(placed(), outside, outside, PointerButton::Other), None);
    }

    #[test]
    fn test_press_while_loading_is_background() {
        let p = Point::new(150.0, 150.0);
        assert_eq!(
            route_press(None, p, p, PointerButton::Primary),
            Some(ViewerInput::Click(ClickTarget::Background))
        );
        assert_eq!(route_press(None, p, p, PointerButton::Other), None);
    }
}
