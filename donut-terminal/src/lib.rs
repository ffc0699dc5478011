/// Terminal front end for the wireframe editor
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use donut_core::{Axis, Editor, EditorConfig, InputEvent, Mesh, MeshChange, RotationState};
use std::io::{self, stdout, Write};

pub mod renderer;

pub use renderer::AsciiCanvas;

/// Degrees one key press moves a rotation slider
pub const SLIDER_STEP: f32 = 5.0;

const HELP: &str = "drag=edge  right-click=vertex  x/X y/Y z/Z=rotate  0=reset  q=quit";

/// Canvas size in pixels for the current terminal, leaving a status row
pub fn canvas_size() -> io::Result<(u32, u32)> {
    let (cols, rows) = terminal::size()?;
    Ok(canvas_for(cols, rows).pixel_size())
}

fn canvas_for(cols: u16, rows: u16) -> AsciiCanvas {
    AsciiCanvas::new((cols as usize).max(1), (rows as usize).saturating_sub(1).max(1))
}

/// What a key press asks for
#[derive(Debug, Clone, PartialEq)]
enum KeyAction {
    Quit,
    Rotate(Vec<InputEvent>),
    Ignore,
}

fn key_action(code: KeyCode, rotation: &RotationState) -> KeyAction {
    let nudge = |axis: Axis, delta: f32| {
        KeyAction::Rotate(vec![InputEvent::SliderChanged(axis, rotation.angle(axis) + delta)])
    };
    match code {
        KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,
        KeyCode::Char('x') => nudge(Axis::X, SLIDER_STEP),
        KeyCode::Char('X') => nudge(Axis::X, -SLIDER_STEP),
        KeyCode::Char('y') => nudge(Axis::Y, SLIDER_STEP),
        KeyCode::Char('Y') => nudge(Axis::Y, -SLIDER_STEP),
        KeyCode::Char('z') => nudge(Axis::Z, SLIDER_STEP),
        KeyCode::Char('Z') => nudge(Axis::Z, -SLIDER_STEP),
        KeyCode::Char('0') => KeyAction::Rotate(
            Axis::ALL
                .iter()
                .map(|&axis| InputEvent::SliderChanged(axis, 0.0))
                .collect(),
        ),
        _ => KeyAction::Ignore,
    }
}

/// Translate a terminal mouse report into an editor event
fn mouse_input(mouse: &MouseEvent) -> Option<InputEvent> {
    let at = AsciiCanvas::cell_center(mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(InputEvent::LeftClick(at)),
        MouseEventKind::Down(MouseButton::Right) => Some(InputEvent::RightClick(at)),
        MouseEventKind::Drag(MouseButton::Left) => Some(InputEvent::Drag(at)),
        MouseEventKind::Up(MouseButton::Left) => Some(InputEvent::Release(at)),
        _ => None,
    }
}

/// Main application struct for terminal wireframe editing
pub struct TerminalApp {
    editor: Editor,
    canvas: AsciiCanvas,
    running: bool,
    status: String,
}

impl TerminalApp {
    pub fn new(mesh: Mesh, config: EditorConfig) -> io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        let canvas = canvas_for(cols, rows);
        let (width, height) = canvas.pixel_size();
        let editor = Editor::new(mesh, EditorConfig { width, height, ..config })
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

        Ok(Self {
            editor,
            canvas,
            running: true,
            status: HELP.to_string(),
        })
    }

    pub fn mesh(&self) -> &Mesh {
        self.editor.mesh()
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(
            stdout(),
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show
        )?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        self.editor.redraw(&mut self.canvas);
        self.render()?;

        while self.running {
            self.handle_input()?;
            self.render()?;
        }

        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        match event::read()? {
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            }) => match key_action(code, self.editor.rotation()) {
                KeyAction::Quit => self.running = false,
                KeyAction::Rotate(events) => {
                    for input in events {
                        self.apply(input);
                    }
                }
                KeyAction::Ignore => {}
            },
            Event::Mouse(mouse) => {
                if let Some(input) = mouse_input(&mouse) {
                    self.apply(input);
                }
            }
            Event::Resize(cols, rows) => {
                self.canvas = canvas_for(cols, rows);
                let (width, height) = self.canvas.pixel_size();
                self.editor.resize(width, height, &mut self.canvas);
                queue!(stdout(), terminal::Clear(ClearType::All))?;
            }
            _ => {}
        }
        Ok(())
    }

    fn apply(&mut self, input: InputEvent) {
        match self.editor.handle(input, &mut self.canvas) {
            Ok(Some(MeshChange::EdgeAdded(edge))) => {
                self.status = format!(
                    "edge {:?} | connections: {:?}",
                    edge.indices(),
                    self.editor.mesh().edge_indices()
                );
            }
            Ok(Some(MeshChange::VertexAdded(id))) => {
                if let Some(vertex) = self.editor.mesh().vertex(id) {
                    let p = vertex.initial;
                    self.status = format!("vertex {} at ({:.0}, {:.0}, {:.0})", id, p.x, p.y, p.z);
                }
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(error = %e, "input rejected");
                self.status = e.to_string();
                self.editor.redraw(&mut self.canvas);
            }
        }
    }

    fn render(&mut self) -> io::Result<()> {
        let mut stdout = stdout();
        self.canvas.draw(&mut stdout)?;

        // Draw status line
        let (width, rows) = terminal::size()?;
        let rotation = self.editor.rotation();
        let line = format!(
            "X {:>3.0}  Y {:>3.0}  Z {:>3.0} | {} vertices {} edges | {}",
            rotation.x,
            rotation.y,
            rotation.z,
            self.editor.mesh().vertices().len(),
            self.editor.mesh().edges().len(),
            self.status
        );
        queue!(
            stdout,
            cursor::MoveTo(0, rows.saturating_sub(1)),
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::Yellow),
            Print(line.chars().take(width as usize).collect::<String>()),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
