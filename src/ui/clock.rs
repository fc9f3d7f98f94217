use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Color,
    symbols::Marker,
    widgets::{
        canvas::{Canvas, Circle, Line, Points},
        Block, Widget,
    },
};

use kuromi::clock::ClockFace;

const HOUR_HAND: f64 = 0.5;
const MINUTE_HAND: f64 = 0.75;
const SECOND_HAND: f64 = 0.9;

/// End point of a hand of length `len` at `angle` degrees clockwise from
/// twelve, on a face centred at the origin.
pub fn hand_end(angle: f64, len: f64) -> (f64, f64) {
    let rad = angle.to_radians();
    (len * rad.sin(), len * rad.cos())
}

/// Analog clock face drawn on a braille canvas.
pub struct AnalogClock<'a> {
    pub face: &'a ClockFace,
    pub block: Block<'a>,
    pub rim: Color,
    pub hands: Color,
    pub second_hand: Color,
}

impl Widget for AnalogClock<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let AnalogClock {
            face,
            block,
            rim,
            hands: hand_color,
            second_hand,
        } = self;
        let markers: Vec<(f64, f64)> = (0..12)
            .map(|h| hand_end(f64::from(h) * 30.0, 0.95))
            .collect();
        let hands = [
            (face.hour_angle, HOUR_HAND, hand_color),
            (face.minute_angle, MINUTE_HAND, hand_color),
            (face.second_angle, SECOND_HAND, second_hand),
        ];

        Canvas::default()
            .block(block)
            .marker(Marker::Braille)
            .x_bounds([-1.1, 1.1])
            .y_bounds([-1.1, 1.1])
            .paint(|ctx| {
                ctx.draw(&Circle {
                    x: 0.0,
                    y: 0.0,
                    radius: 1.0,
                    color: rim,
                });
                ctx.draw(&Points {
                    coords: &markers,
                    color: rim,
                });
                for (angle, len, color) in hands {
                    let (x2, y2) = hand_end(angle, len);
                    ctx.draw(&Line {
                        x1: 0.0,
                        y1: 0.0,
                        x2,
                        y2,
                        color,
                    });
                }
            })
            .render(area, buf);
    }
}
