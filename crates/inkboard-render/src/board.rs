//! Whiteboard session state and control.
//!
//! `Whiteboard` wires pointer input, the tool palette, the raster surface,
//! snapshot history and the persistence slot together. One instance exists
//! per drawing session; there are no ambient globals.

use crate::codec::{self, CodecError};
use crate::export;
use crate::stroke::StrokeRenderer;
use crate::surface::Surface;
use inkboard_core::slot::{self, SavedBoard, SlotError, SnapshotSlot, LAST_BOARD_KEY};
use inkboard_core::{History, Palette, PointerEvent, Snapshot};
use kurbo::Point;
use std::sync::Arc;
use uuid::Uuid;

/// Live raster state: the surface plus the history that snapshots it.
/// Absent until the board has a non-zero size.
#[derive(Debug, Clone)]
struct CanvasState {
    surface: Surface,
    history: History,
}

/// A single drawing session.
pub struct Whiteboard {
    /// Session identifier; doubles as the persistence key.
    id: String,
    canvas: Option<CanvasState>,
    palette: Palette,
    stroke: Option<StrokeRenderer>,
    slot: Option<Arc<dyn SnapshotSlot>>,
    scale: f64,
}

impl Whiteboard {
    /// Create a board with the given logical size and device pixel ratio.
    ///
    /// A zero-area size yields an inert board that ignores drawing until a
    /// valid `resize` arrives.
    pub fn new(width: f64, height: f64, scale: f64) -> Self {
        let scale = if scale > 0.0 && scale.is_finite() { scale } else { 1.0 };
        Self {
            id: Uuid::new_v4().to_string(),
            canvas: Surface::new(width, height, scale).and_then(Self::seed_canvas),
            palette: Palette::default(),
            stroke: None,
            slot: None,
            scale,
        }
    }

    /// Attach a persistence slot. Every completed stroke (and clear)
    /// autosaves into it.
    pub fn with_slot(mut self, slot: Arc<dyn SnapshotSlot>) -> Self {
        self.slot = Some(slot);
        self
    }

    fn seed_canvas(surface: Surface) -> Option<CanvasState> {
        match codec::encode(&surface) {
            Ok(baseline) => Some(CanvasState {
                history: History::new(baseline),
                surface,
            }),
            Err(e) => {
                log::warn!("could not snapshot blank surface: {}", e);
                None
            }
        }
    }

    /// Session identifier (also the slot key this board saves under).
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn palette_mut(&mut self) -> &mut Palette {
        &mut self.palette
    }

    /// The drawable surface, if the board has a valid size.
    pub fn surface(&self) -> Option<&Surface> {
        self.canvas.as_ref().map(|c| &c.surface)
    }

    /// Whether an undo would change anything (callers gray out the control).
    pub fn can_undo(&self) -> bool {
        self.canvas.as_ref().is_some_and(|c| c.history.can_undo())
    }

    /// Whether a redo would change anything.
    pub fn can_redo(&self) -> bool {
        self.canvas.as_ref().is_some_and(|c| c.history.can_redo())
    }

    /// Whether a stroke is currently in progress.
    pub fn is_drawing(&self) -> bool {
        self.stroke.is_some()
    }

    /// Feed a pointer event; returns `true` when the event drove drawing.
    ///
    /// Hosts use the return value to suppress platform defaults (touch
    /// scrolling) while a gesture is painting.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        match event {
            PointerEvent::Down { position, .. } => {
                self.begin_stroke(position);
                self.stroke.is_some()
            }
            PointerEvent::Moved { position, .. } => {
                if self.stroke.is_some() {
                    self.extend_stroke(position);
                    true
                } else {
                    false
                }
            }
            PointerEvent::Up { .. } => {
                if self.stroke.is_some() {
                    self.end_stroke();
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Begin a stroke at `position` with the palette's effective settings
    /// (the eraser overpaints with the background color at triple width).
    pub fn begin_stroke(&mut self, position: Point) {
        if self.stroke.is_some() {
            // A second Down without an Up in between: finish the dangling
            // stroke before starting over.
            self.end_stroke();
        }
        let color = self.palette.effective_color();
        let width = self.palette.effective_width();
        if let Some(canvas) = self.canvas.as_mut() {
            self.stroke = Some(StrokeRenderer::begin(
                position,
                color,
                width,
                &mut canvas.surface,
            ));
        }
    }

    /// Extend the active stroke. A stray move without a preceding Down is
    /// silently ignored.
    pub fn extend_stroke(&mut self, position: Point) {
        if let (Some(stroke), Some(canvas)) = (self.stroke.as_mut(), self.canvas.as_mut()) {
            stroke.extend(position, &mut canvas.surface);
        }
    }

    /// End the active stroke, then snapshot the result into history and the
    /// slot. A stray Up without an active stroke is silently ignored.
    pub fn end_stroke(&mut self) {
        if self.stroke.take().is_none() {
            return;
        }
        self.commit();
    }

    /// Step back one edit. A stroke in progress is force-ended first; at the
    /// history floor this is a no-op.
    pub fn undo(&mut self) {
        self.end_stroke();
        let Some(canvas) = self.canvas.as_mut() else {
            return;
        };
        if let Some(snapshot) = canvas.history.undo() {
            let snapshot = snapshot.clone();
            Self::apply_snapshot(&mut canvas.surface, &snapshot);
        }
    }

    /// Re-apply the most recently undone edit; no-op when the redo buffer is
    /// empty.
    pub fn redo(&mut self) {
        self.end_stroke();
        let Some(canvas) = self.canvas.as_mut() else {
            return;
        };
        if let Some(snapshot) = canvas.history.redo() {
            let snapshot = snapshot.clone();
            Self::apply_snapshot(&mut canvas.surface, &snapshot);
        }
    }

    /// Wipe the surface and record the blank state like a completed stroke
    /// (it lands in history and in the slot, and can be undone).
    pub fn clear(&mut self) {
        self.end_stroke();
        let Some(canvas) = self.canvas.as_mut() else {
            return;
        };
        canvas.surface.clear();
        self.commit();
    }

    /// Resize the board, preserving content.
    ///
    /// Re-allocating the backing buffer discards its pixels, so the current
    /// history snapshot is redrawn (stretch-to-fit) afterward. A zero-area
    /// size is ignored and the last good raster state is kept.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.end_stroke();
        let Some(mut surface) = Surface::new(width, height, self.scale) else {
            return;
        };

        match self.canvas.as_mut() {
            Some(canvas) => {
                let current = canvas.history.current().clone();
                Self::apply_snapshot(&mut surface, &current);
                canvas.surface = surface;
            }
            None => {
                // First valid size for a board that started inert.
                self.canvas = Self::seed_canvas(surface);
            }
        }
    }

    /// Restore the most recently persisted image and seed history with it.
    ///
    /// Missing or undecodable data falls back to the blank surface, never
    /// an error at this level.
    pub fn restore_persisted(&mut self) {
        let Some(slot) = self.slot.clone() else {
            return;
        };
        if self.canvas.is_none() {
            return;
        }

        let saved = match slot::block_on(slot.load(LAST_BOARD_KEY)) {
            Ok(saved) => saved,
            Err(SlotError::NotFound(_)) => return,
            Err(e) => {
                log::warn!("could not load persisted board: {}", e);
                return;
            }
        };
        let snapshot = match saved.to_snapshot() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                log::warn!("persisted board is corrupt, starting blank: {}", e);
                return;
            }
        };

        let Some(canvas) = self.canvas.as_mut() else {
            return;
        };
        match codec::decode(&snapshot) {
            Ok(img) => {
                canvas.surface.blit_scaled(&img.pixels, img.width, img.height);
                // Re-capture at the current size so the baseline matches the
                // surface exactly even when the persisted size differed.
                match codec::encode(&canvas.surface) {
                    Ok(baseline) => canvas.history.reset(baseline),
                    Err(e) => log::warn!("could not snapshot restored surface: {}", e),
                }
            }
            Err(e) => {
                log::warn!("persisted board is undecodable, starting blank: {}", e);
            }
        }
    }

    /// Encode the current surface content.
    pub fn snapshot(&self) -> Result<Snapshot, CodecError> {
        match &self.canvas {
            Some(canvas) => codec::encode(&canvas.surface),
            None => Err(CodecError::NoSurface),
        }
    }

    /// Export the surface composited over the background color as PNG bytes.
    ///
    /// Succeeds with a solid background-colored image when nothing was drawn.
    pub fn export_png(&self) -> Result<Vec<u8>, CodecError> {
        match &self.canvas {
            Some(canvas) => export::export_png(&canvas.surface, self.palette.background_color),
            None => Err(CodecError::NoSurface),
        }
    }

    /// Suggested download name for an export.
    pub fn export_file_name(&self) -> String {
        export::export_file_name()
    }

    /// Snapshot the surface, push it onto history, and autosave.
    fn commit(&mut self) {
        let snapshot = match self.canvas.as_mut() {
            Some(canvas) => match codec::encode(&canvas.surface) {
                Ok(snapshot) => {
                    canvas.history.push(snapshot.clone());
                    snapshot
                }
                Err(e) => {
                    log::warn!("could not snapshot surface: {}", e);
                    return;
                }
            },
            None => return,
        };
        self.persist(&snapshot);
    }

    /// Write `snapshot` to the slot under this board's id and the well-known
    /// last-board key. Failures are logged, never surfaced.
    fn persist(&self, snapshot: &Snapshot) {
        let Some(slot) = &self.slot else {
            return;
        };
        let saved = SavedBoard::from_snapshot(snapshot);
        for key in [self.id.as_str(), LAST_BOARD_KEY] {
            if let Err(e) = slot::block_on(slot.save(key, &saved)) {
                log::warn!("autosave under {} failed: {}", key, e);
            }
        }
    }

    /// Decode a snapshot and draw it over the whole surface, stretch-to-fit.
    ///
    /// Runs synchronously on the caller, so at most one decode-and-draw is
    /// ever in flight and a stale decode can never land after newer strokes.
    fn apply_snapshot(surface: &mut Surface, snapshot: &Snapshot) {
        match codec::decode(snapshot) {
            Ok(img) => surface.blit_scaled(&img.pixels, img.width, img.height),
            Err(e) => log::warn!("could not render snapshot: {}", e),
        }
    }
}
