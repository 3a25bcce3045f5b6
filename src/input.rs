use egui::{Context, Event, Key, Modifiers, PointerButton, Pos2, Rect};

/// Input events in surface-local coordinates, as consumed by the session
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Primary button (or touch) pressed inside the canvas
    PointerDown { pos: Pos2 },
    /// Pointer moved, with or without a button held
    PointerMove { pos: Pos2 },
    /// Primary button (or touch) released
    PointerUp { pos: Pos2 },
    /// Pointer left the canvas
    PointerLeave,
    /// Key was pressed
    KeyDown { key: Key, modifiers: Modifiers },
}

/// Keyboard shortcuts routed to session actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    Undo,
    Export,
}

impl Shortcut {
    /// Ctrl or Cmd plus Z / S.
    pub fn from_key(key: Key, modifiers: Modifiers) -> Option<Self> {
        let primary = modifiers.command || modifiers.ctrl || modifiers.mac_cmd;
        if !primary {
            return None;
        }
        match key {
            Key::Z => Some(Self::Undo),
            Key::S => Some(Self::Export),
            _ => None,
        }
    }
}

/// Handles converting raw egui input into canvas-local [`InputEvent`]s
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    canvas_rect: Rect,
}

impl InputHandler {
    pub fn new(canvas_rect: Rect) -> Self {
        Self {
            last_pointer_pos: None,
            canvas_rect,
        }
    }

    /// Update the canvas rectangle (e.g. if window is resized)
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    fn to_local(&self, pos: Pos2) -> Pos2 {
        (pos - self.canvas_rect.min).to_pos2()
    }

    fn inside(&self, pos: Option<Pos2>) -> bool {
        pos.is_some_and(|p| self.canvas_rect.contains(p))
    }

    /// Moves the tracked pointer to `pos`, emitting a leave when that takes
    /// it off the canvas.
    fn track(&mut self, pos: Option<Pos2>, events: &mut Vec<InputEvent>) {
        if self.inside(self.last_pointer_pos) && !self.inside(pos) {
            events.push(InputEvent::PointerLeave);
        }
        self.last_pointer_pos = pos;
    }

    /// Translates raw egui events in arrival order, one [`InputEvent`] per
    /// pointer event. Presses only count inside the canvas. Leaving the
    /// canvas rect or the window emits [`InputEvent::PointerLeave`].
    pub fn process_events(&mut self, raw: &[Event]) -> Vec<InputEvent> {
        let mut events = Vec::new();
        for event in raw {
            match event {
                Event::PointerMoved(pos) => {
                    let pos = *pos;
                    if self.inside(Some(pos)) && Some(pos) != self.last_pointer_pos {
                        events.push(InputEvent::PointerMove {
                            pos: self.to_local(pos),
                        });
                    }
                    self.track(Some(pos), &mut events);
                }
                Event::PointerButton {
                    pos,
                    button: PointerButton::Primary,
                    pressed,
                    ..
                } => {
                    let pos = *pos;
                    if !*pressed {
                        events.push(InputEvent::PointerUp {
                            pos: self.to_local(pos),
                        });
                    } else if self.inside(Some(pos)) {
                        events.push(InputEvent::PointerDown {
                            pos: self.to_local(pos),
                        });
                    }
                    self.track(Some(pos), &mut events);
                }
                Event::PointerGone => self.track(None, &mut events),
                Event::Key {
                    key,
                    pressed: true,
                    modifiers,
                    ..
                } => events.push(InputEvent::KeyDown {
                    key: *key,
                    modifiers: *modifiers,
                }),
                _ => {}
            }
        }
        events
    }

    /// Process this frame's egui input and generate our InputEvents
    pub fn process_input(&mut self, ctx: &Context) -> Vec<InputEvent> {
        ctx.input(|input| self.process_events(&input.events))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handler() -> InputHandler {
        InputHandler::new(Rect::from_min_size(Pos2::new(100.0, 50.0), egui::vec2(600.0, 380.0)))
    }

    fn moved(x: f32, y: f32) -> Event {
        Event::PointerMoved(Pos2::new(x, y))
    }

    fn button(x: f32, y: f32, pressed: bool) -> Event {
        Event::PointerButton {
            pos: Pos2::new(x, y),
            button: PointerButton::Primary,
            pressed,
            modifiers: Modifiers::NONE,
        }
    }

    #[test]
    fn test_press_inside_is_translated() {
        let mut input = handler();
        assert_eq!(
            input.process_events(&[button(110.0, 70.0, true)]),
            vec![InputEvent::PointerDown {
                pos: Pos2::new(10.0, 20.0)
            }]
        );
    }

    #[test]
    fn test_drag_after_press_moves() {
        let mut input = handler();
        input.process_events(&[moved(110.0, 70.0), button(110.0, 70.0, true)]);
        assert_eq!(
            input.process_events(&[moved(120.0, 70.0)]),
            vec![InputEvent::PointerMove {
                pos: Pos2::new(20.0, 20.0)
            }]
        );
    }

    #[test]
    fn test_press_outside_is_ignored() {
        let mut input = handler();
        assert!(input.process_events(&[button(10.0, 10.0, true)]).is_empty());
    }

    #[test]
    fn test_secondary_button_is_ignored() {
        let mut input = handler();
        let events = input.process_events(&[Event::PointerButton {
            pos: Pos2::new(200.0, 200.0),
            button: PointerButton::Secondary,
            pressed: true,
            modifiers: Modifiers::NONE,
        }]);
        assert!(events.is_empty());
    }

    #[test]
    fn test_stationary_pointer_emits_nothing() {
        let mut input = handler();
        input.process_events(&[moved(200.0, 200.0)]);
        assert!(input.process_events(&[moved(200.0, 200.0)]).is_empty());
    }

    #[test]
    fn test_leaving_canvas_emits_leave() {
        let mut input = handler();
        input.process_events(&[moved(200.0, 200.0)]);
        assert_eq!(
            input.process_events(&[moved(20.0, 200.0)]),
            vec![InputEvent::PointerLeave]
        );

        input.process_events(&[moved(200.0, 200.0)]);
        assert_eq!(
            input.process_events(&[Event::PointerGone]),
            vec![InputEvent::PointerLeave]
        );
    }

    #[test]
    fn test_every_event_in_a_frame_is_kept_in_order() {
        let mut input = handler();
        let events = input.process_events(&[
            button(110.0, 60.0, true),
            moved(150.0, 60.0),
            moved(190.0, 60.0),
            button(190.0, 60.0, false),
        ]);
        assert_eq!(
            events,
            vec![
                InputEvent::PointerDown {
                    pos: Pos2::new(10.0, 10.0)
                },
                InputEvent::PointerMove {
                    pos: Pos2::new(50.0, 10.0)
                },
                InputEvent::PointerMove {
                    pos: Pos2::new(90.0, 10.0)
                },
                InputEvent::PointerUp {
                    pos: Pos2::new(90.0, 10.0)
                },
            ]
        );
    }

    #[test]
    fn test_process_input_reads_a_whole_frame() {
        let ctx = Context::default();
        let mut input = InputHandler::new(Rect::from_min_size(Pos2::ZERO, egui::vec2(600.0, 380.0)));
        let mut frames = Vec::new();

        for raw_events in [
            vec![moved(10.0, 10.0)],
            vec![button(10.0, 10.0, true), moved(50.0, 10.0), moved(90.0, 10.0)],
        ] {
            let raw = egui::RawInput {
                events: raw_events,
                ..Default::default()
            };
            let mut frame = Vec::new();
            let _ = ctx.run(raw, |ctx| frame.extend(input.process_input(ctx)));
            frames.push(frame);
        }

        assert_eq!(
            frames[0],
            vec![InputEvent::PointerMove {
                pos: Pos2::new(10.0, 10.0)
            }]
        );
        assert_eq!(
            frames[1],
            vec![
                InputEvent::PointerDown {
                    pos: Pos2::new(10.0, 10.0)
                },
                InputEvent::PointerMove {
                    pos: Pos2::new(50.0, 10.0)
                },
                InputEvent::PointerMove {
                    pos: Pos2::new(90.0, 10.0)
                },
            ]
        );
    }

    #[test]
    fn test_shortcut_keys_pass_through() {
        let mut input = handler();
        let events = input.process_events(&[Event::Key {
            key: Key::Z,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers: Modifiers::COMMAND,
        }]);
        assert_eq!(
            events,
            vec![InputEvent::KeyDown {
                key: Key::Z,
                modifiers: Modifiers::COMMAND
            }]
        );
    }

    #[test]
    fn test_shortcuts() {
        assert_eq!(Shortcut::from_key(Key::Z, Modifiers::COMMAND), Some(Shortcut::Undo));
        assert_eq!(Shortcut::from_key(Key::S, Modifiers::CTRL), Some(Shortcut::Export));
        assert_eq!(Shortcut::from_key(Key::S, Modifiers::MAC_CMD), Some(Shortcut::Export));
        assert_eq!(Shortcut::from_key(Key::Z, Modifiers::NONE), None);
        assert_eq!(Shortcut::from_key(Key::A, Modifiers::COMMAND), None);
    }
}
