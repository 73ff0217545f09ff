//! Headless demo: draw a few strokes, undo one, and write the export to a
//! PNG file in the current directory.

use inkboard_core::{Color, MemorySlot, PointerEvent, PointerSource};
use inkboard_render::Whiteboard;
use kurbo::Point;
use std::sync::Arc;

fn main() {
    env_logger::init();
    log::info!("Starting Inkboard headless sketch");

    let mut board = Whiteboard::new(640.0, 480.0, 1.0).with_slot(Arc::new(MemorySlot::new()));
    board.restore_persisted();

    // A wavy line across the middle of the board.
    board.handle_pointer(PointerEvent::down(Point::new(40.0, 240.0), PointerSource::Mouse));
    for i in 1..=60 {
        let x = 40.0 + i as f64 * 9.0;
        let y = 240.0 + (i as f64 * 0.35).sin() * 80.0;
        board.handle_pointer(PointerEvent::moved(Point::new(x, y), PointerSource::Mouse));
    }
    board.handle_pointer(PointerEvent::up(PointerSource::Mouse));

    // A second stroke in another color, then take it back.
    board.palette_mut().update_color(Color::opaque(0xef, 0x44, 0x44));
    board.handle_pointer(PointerEvent::down(Point::new(100.0, 100.0), PointerSource::Mouse));
    board.handle_pointer(PointerEvent::moved(Point::new(540.0, 380.0), PointerSource::Mouse));
    board.handle_pointer(PointerEvent::up(PointerSource::Mouse));
    board.undo();

    let name = board.export_file_name();
    match board.export_png() {
        Ok(png) => {
            if let Err(e) = std::fs::write(&name, png) {
                log::error!("failed to write {}: {}", name, e);
            } else {
                log::info!("wrote {}", name);
            }
        }
        Err(e) => log::error!("export failed: {}", e),
    }
}
