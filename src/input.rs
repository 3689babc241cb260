use egui::{Context, Key, LayerId, Modifiers, PointerButton, Pos2, Rect, Vec2};

/// Where an input event occurred
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputLocation {
    /// Position relative to the canvas widget's top-left corner
    pub position: Pos2,
    /// Whether this position is within the canvas bounds
    pub is_in_canvas: bool,
}

/// Input the canvas reacts to, already translated out of egui's raw events
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown {
        location: InputLocation,
        button: PointerButton,
    },
    PointerUp {
        location: InputLocation,
        button: PointerButton,
    },
    /// Mouse moved (with or without buttons pressed)
    PointerMove {
        location: InputLocation,
        /// Buttons that are currently held down
        held_buttons: Vec<PointerButton>,
    },
    /// Wheel or touchpad scroll, in points
    Scroll {
        location: InputLocation,
        delta: Vec2,
        modifiers: Modifiers,
    },
    /// Pinch or Ctrl+wheel; `factor > 1` zooms in
    Zoom {
        location: InputLocation,
        factor: f32,
    },
    KeyDown {
        key: Key,
        modifiers: Modifiers,
    },
}

impl InputEvent {
    /// Helper to check if an input event occurred within the canvas
    pub fn is_in_canvas(&self) -> bool {
        match self {
            InputEvent::PointerDown { location, .. }
            | InputEvent::PointerUp { location, .. }
            | InputEvent::PointerMove { location, .. }
            | InputEvent::Scroll { location, .. }
            | InputEvent::Zoom { location, .. } => location.is_in_canvas,
            InputEvent::KeyDown { .. } => false,
        }
    }
}

const BUTTONS: [PointerButton; 3] = [
    PointerButton::Primary,
    PointerButton::Secondary,
    PointerButton::Middle,
];

/// Converts raw egui input into canvas-local [`InputEvent`]s
#[derive(Debug)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    canvas_rect: Rect,
    /// The egui layer the canvas widget paints on
    canvas_layer: Option<LayerId>,
    /// False while a window or popup sits over the canvas under the pointer
    canvas_on_top: bool,
}

impl InputHandler {
    pub fn new(canvas_rect: Rect) -> Self {
        Self {
            last_pointer_pos: None,
            canvas_rect,
            canvas_layer: None,
            canvas_on_top: true,
        }
    }

    /// Update the canvas rectangle (e.g. if window is resized)
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    pub fn canvas_rect(&self) -> Rect {
        self.canvas_rect
    }

    /// Set the layer the canvas widget lives on. Pointer input over any
    /// other layer (windows, popups) is reported as outside the canvas.
    pub fn set_canvas_layer(&mut self, layer: LayerId) {
        self.canvas_layer = Some(layer);
    }

    /// Creates an InputLocation from an absolute screen position
    fn make_location(&self, pos: Pos2) -> InputLocation {
        InputLocation {
            position: pos - self.canvas_rect.min.to_vec2(),
            is_in_canvas: self.canvas_on_top && self.canvas_rect.contains(pos),
        }
    }

    /// Panels sit on the background layer, which egui reports as no layer.
    fn canvas_is_topmost(&self, topmost: Option<LayerId>) -> bool {
        match (topmost, self.canvas_layer) {
            (None, _) | (_, None) => true,
            (Some(topmost), Some(canvas)) => topmost == canvas,
        }
    }

    /// Collect this frame's events. Keys are skipped while a text field has focus.
    pub fn process_input(&mut self, ctx: &Context) -> Vec<InputEvent> {
        let wants_keyboard = ctx.wants_keyboard_input();
        // Queried outside `ctx.input`, which holds the context lock
        let topmost = ctx
            .pointer_hover_pos()
            .or(self.last_pointer_pos)
            .and_then(|pos| ctx.layer_id_at(pos));
        self.canvas_on_top = self.canvas_is_topmost(topmost);
        let mut events = Vec::new();

        ctx.input(|input| {
            let hover = input.pointer.hover_pos();

            if let Some(pos) = hover {
                if Some(pos) != self.last_pointer_pos {
                    let held_buttons = BUTTONS
                        .into_iter()
                        .filter(|button| input.pointer.button_down(*button))
                        .collect();
                    events.push(InputEvent::PointerMove {
                        location: self.make_location(pos),
                        held_buttons,
                    });
                }
                self.last_pointer_pos = Some(pos);
            }

            // Releases outside the window still finish a drag at the last known spot
            if let Some(pos) = hover.or(self.last_pointer_pos) {
                for button in BUTTONS {
                    if input.pointer.button_pressed(button) {
                        events.push(InputEvent::PointerDown {
                            location: self.make_location(pos),
                            button,
                        });
                    }
                    if input.pointer.button_released(button) {
                        events.push(InputEvent::PointerUp {
                            location: self.make_location(pos),
                            button,
                        });
                    }
                }

                // Ctrl/Cmd+wheel already arrives as `zoom_delta`
                let zooming = input.modifiers.command || input.modifiers.ctrl;
                if input.raw_scroll_delta != Vec2::ZERO && !zooming {
                    events.push(InputEvent::Scroll {
                        location: self.make_location(pos),
                        delta: input.raw_scroll_delta,
                        modifiers: input.modifiers,
                    });
                }

                let factor = input.zoom_delta();
                if factor != 1.0 {
                    events.push(InputEvent::Zoom {
                        location: self.make_location(pos),
                        factor,
                    });
                }
            }

            if hover.is_none() {
                self.last_pointer_pos = None;
            }

            if !wants_keyboard {
                for event in &input.raw.events {
                    if let egui::Event::Key {
                        key,
                        pressed: true,
                        modifiers,
                        ..
                    } = event
                    {
                        events.push(InputEvent::KeyDown {
                            key: *key,
                            modifiers: *modifiers,
                        });
                    }
                }
            }
        });

        events
    }
}
