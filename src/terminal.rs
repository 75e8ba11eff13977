// SPDX-License-Identifier: GPL-3.0-only

//! Terminal phone
//!
//! Draws the phone frame in the terminal and turns mouse and key input into
//! [`Message`]s. Images (camera preview, captured photo, gallery) are rendered
//! with Unicode half-block characters for double vertical resolution.
//!
//! Gestures map onto the mouse: press and hold the fingerprint sensor to
//! unlock, drag upwards anywhere on the screen to lock again.

use crate::app::keyboard::{self, KeyboardEvent};
use crate::app::{Effect, Message, NoticeKind, PhoneModel, PrimaryScreen, status_bar};
use crate::backends::virtual_camera::VirtualCamera;
use crate::config::Config;
use crate::errors::CameraError;
use crate::constants::{browser, notices, status_bar as clock, terminal as consts};
use crate::pipelines::photo::SessionState;
use crate::storage::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore, PhotoRecord};

use chrono::Local;
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyCode, KeyEvent,
        KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use image::RgbaImage;
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Clear, Paragraph, Widget, Wrap},
};
use std::collections::HashMap;
use std::io::{self, stdout};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

type TerminalModel = PhoneModel<VirtualCamera, Box<dyn KeyValueStore>>;

/// Run the terminal phone until the user quits
pub fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run_async(config))
}

async fn run_async(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let backend: Box<dyn KeyValueStore> = match FileKeyValueStore::open_default() {
        Ok(store) => {
            info!(root = %store.root().display(), "Using file photo store");
            Box::new(store)
        }
        Err(e) => {
            warn!(error = %e, "No photo storage directory, photos last for this session");
            Box::new(MemoryKeyValueStore::new())
        }
    };
    let input = VirtualCamera::from_config(&config);
    let (mut model, mut messages) =
        PhoneModel::new(config, input, backend, Config::default_export_dir());

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let result = run_app(&mut terminal, &mut model, &mut messages).await;
    model.shutdown();

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    model: &mut TerminalModel,
    messages: &mut UnboundedReceiver<Message>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut events = EventStream::new();
    let mut clock = tokio::time::interval(clock::CLOCK_TICK);
    let mut preview = tokio::time::interval(consts::PREVIEW_INTERVAL);
    preview.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut ui = PhoneUi::default();

    loop {
        terminal.draw(|f| ui.draw(f, model))?;

        tokio::select! {
            event = events.next() => match event {
                Some(Ok(event)) => {
                    for message in ui.translate(event, model) {
                        apply(model, message);
                    }
                }
                Some(Err(e)) => return Err(e.into()),
                None => break,
            },
            Some(message) = messages.recv() => apply(model, message),
            _ = clock.tick() => apply(model, Message::Tick(Local::now())),
            // Redraw only
            _ = preview.tick(), if model.navigator().camera_visible() => {}
        }

        if ui.quit {
            break;
        }
    }

    Ok(())
}

fn apply(model: &mut TerminalModel, message: Message) {
    if let Effect::OpenExternal(address) = model.update(message) {
        match open::that_detached(&address) {
            Ok(()) => info!(%address, "Opened in system browser"),
            Err(e) => warn!(%address, error = %e, "Failed to open address"),
        }
    }
}

/// What a click on a region does
#[derive(Debug, Clone)]
enum Target {
    Send(Message),
    Fingerprint,
    KeyboardRow(usize),
}

#[derive(Debug, Clone)]
struct Hotspot {
    area: Rect,
    target: Target,
}

/// Per-frame layout and input state
#[derive(Default)]
struct PhoneUi {
    hotspots: Vec<Hotspot>,
    /// Decoded gallery thumbnails by photo id; `None` if the image is unreadable
    thumbnails: HashMap<String, Option<RgbaImage>>,
    /// Decoded full-size image of the photo being viewed
    full_view: Option<(String, Option<RgbaImage>)>,
    fingerprint: Option<Rect>,
    fingerprint_held: bool,
    quit: bool,
}

fn contains(area: Rect, x: u16, y: u16) -> bool {
    x >= area.x && x < area.right() && y >= area.y && y < area.bottom()
}

fn pointer_y(row: u16) -> f32 {
    f32::from(row) * consts::PIXELS_PER_ROW
}

/// Message shown in place of the camera feed
fn unavailable_text(reason: &CameraError) -> String {
    match reason {
        CameraError::PermissionDenied => notices::CAMERA_DENIED.to_string(),
        other => format!("Camera unavailable: {}", other),
    }
}

/// Rows `offset..offset + height` of `area`, clipped to it
fn rows(area: Rect, offset: u16, height: u16) -> Rect {
    let y = area.y.saturating_add(offset).min(area.bottom());
    let height = height.min(area.bottom().saturating_sub(y));
    Rect {
        x: area.x,
        y,
        width: area.width,
        height,
    }
}

/// Centered `width` x `height` rectangle inside `area`
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn dim() -> Style {
    Style::default().fg(Color::DarkGray)
}

impl PhoneUi {
    // ===== Input =====

    fn translate(&mut self, event: Event, model: &TerminalModel) -> Vec<Message> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.translate_key(key, model),
            Event::Mouse(mouse) => self.translate_mouse(mouse),
            _ => Vec::new(),
        }
    }

    fn translate_key(&mut self, key: KeyEvent, model: &TerminalModel) -> Vec<Message> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.quit = true;
            return Vec::new();
        }

        let nav = model.navigator();
        let typing = nav.primary() == PrimaryScreen::Browser
            && nav.keyboard_visible()
            && !nav.overlay_visible();
        if typing {
            let event = match key.code {
                KeyCode::Char(' ') => Some(KeyboardEvent::Space),
                KeyCode::Char(ch) => Some(KeyboardEvent::Char(ch)),
                KeyCode::Backspace => Some(KeyboardEvent::Delete),
                KeyCode::Enter => Some(KeyboardEvent::Enter),
                KeyCode::Esc => return vec![Message::SearchBlurred],
                _ => None,
            };
            return event.map(Message::Keyboard).into_iter().collect();
        }

        if key.code == KeyCode::Char('q') {
            self.quit = true;
            return Vec::new();
        }

        let message = if nav.photos_visible() {
            let selected = model.selected_photo_id().map(str::to_string);
            match (key.code, selected) {
                (KeyCode::Esc, Some(_)) => Some(Message::ClearSelection),
                (KeyCode::Esc, None) => Some(Message::ClosePhotos),
                (KeyCode::Right | KeyCode::Down, _) => Some(Message::SelectNextPhoto),
                (KeyCode::Left | KeyCode::Up, _) => Some(Message::SelectPreviousPhoto),
                (KeyCode::Char('d') | KeyCode::Delete, Some(id)) => Some(Message::DeletePhoto(id)),
                (KeyCode::Char('e'), Some(id)) => Some(Message::ExportPhoto(id)),
                _ => None,
            }
        } else if nav.camera_visible() {
            match key.code {
                KeyCode::Esc => Some(Message::CloseCamera),
                KeyCode::Char(' ') | KeyCode::Enter if model.last_capture().is_none() => {
                    Some(Message::CapturePhoto)
                }
                KeyCode::Char('r') => Some(Message::RetakePhoto),
                _ => None,
            }
        } else {
            match (nav.primary(), key.code) {
                (_, KeyCode::Esc) => Some(Message::DismissNotice),
                (PrimaryScreen::Lock | PrimaryScreen::Home, KeyCode::Char('c')) => {
                    Some(Message::OpenCamera)
                }
                (PrimaryScreen::Home, KeyCode::Char('b')) => Some(Message::LaunchBrowser),
                (PrimaryScreen::Home, KeyCode::Char('p')) => Some(Message::OpenPhotos),
                (PrimaryScreen::Browser, KeyCode::Char('i') | KeyCode::Enter) => {
                    Some(Message::SearchFocused)
                }
                (PrimaryScreen::Browser, KeyCode::Char('o')) => Some(Message::OpenViewerExternally),
                _ => None,
            }
        };
        message.into_iter().collect()
    }

    fn translate_mouse(&mut self, mouse: MouseEvent) -> Vec<Message> {
        let (x, y) = (mouse.column, mouse.row);
        let mut messages = Vec::new();

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                messages.push(Message::PointerDown(pointer_y(y)));
                if self.fingerprint.is_some_and(|area| contains(area, x, y)) {
                    self.fingerprint_held = true;
                    messages.push(Message::FingerprintPressed);
                    return messages;
                }
                let hit = self
                    .hotspots
                    .iter()
                    .rev()
                    .find(|spot| contains(spot.area, x, y))
                    .cloned();
                match hit.map(|spot| (spot.area, spot.target)) {
                    Some((_, Target::Send(message))) => messages.push(message),
                    Some((area, Target::KeyboardRow(row))) => {
                        if let Some(event) = keyboard::key_at(row, x - area.x, area.width) {
                            messages.push(Message::Keyboard(event));
                        }
                    }
                    Some((_, Target::Fingerprint)) | None => {}
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                messages.push(Message::PointerMove(pointer_y(y)));
                let inside = self.fingerprint.is_some_and(|area| contains(area, x, y));
                if self.fingerprint_held && !inside {
                    self.fingerprint_held = false;
                    messages.push(Message::FingerprintReleased);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if self.fingerprint_held {
                    self.fingerprint_held = false;
                    messages.push(Message::FingerprintReleased);
                }
                messages.push(Message::PointerUp);
            }
            _ => {}
        }
        messages
    }

    // ===== Drawing =====

    fn spot(&mut self, area: Rect, target: Target) {
        self.hotspots.push(Hotspot { area, target });
    }

    /// `[label]` at (x, y), clickable; returns the width used
    fn button(&mut self, f: &mut Frame, x: u16, y: u16, label: &str, message: Message) -> u16 {
        let text = format!("[{}]", label);
        let width = text.len() as u16;
        let area = Rect {
            x,
            y,
            width,
            height: 1,
        }
        .intersection(f.area());
        if area.is_empty() {
            return width;
        }
        f.buffer_mut().set_string(
            area.x,
            area.y,
            &text,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        );
        self.spot(area, Target::Send(message));
        width
    }

    /// Bordered tile with a centred label, clickable
    fn tile(&mut self, f: &mut Frame, area: Rect, label: &str, message: Message) {
        let block = Block::bordered().border_type(BorderType::Rounded);
        let inner = block.inner(area);
        f.render_widget(block, area);
        f.render_widget(Paragraph::new(label).alignment(Alignment::Center), inner);
        self.spot(area, Target::Send(message));
    }

    fn draw(&mut self, f: &mut Frame, model: &mut TerminalModel) {
        self.hotspots.clear();
        self.fingerprint = None;

        let area = f.area();
        let phone = centered(area, consts::PHONE_WIDTH, consts::PHONE_HEIGHT);
        let frame = Block::bordered()
            .border_type(BorderType::Thick)
            .border_style(dim());
        let screen = frame.inner(phone);
        f.render_widget(frame, phone);

        if screen.height < 4 {
            return;
        }
        let status = rows(screen, 0, 1);
        let content = rows(screen, 1, screen.height - 2);
        let indicator = rows(screen, screen.height - 1, 1);

        self.draw_status(f, status, model);

        let nav = model.navigator();
        if nav.photos_visible() {
            self.draw_photos(f, content, model);
        } else if nav.camera_visible() {
            self.draw_camera(f, content, model);
        } else {
            match nav.primary() {
                PrimaryScreen::Lock => self.draw_lock(f, content, model),
                PrimaryScreen::Home => self.draw_home(f, content),
                PrimaryScreen::Browser => self.draw_browser(f, content, model),
            }
        }

        f.render_widget(
            Paragraph::new("━━━━━━").alignment(Alignment::Center).style(dim()),
            indicator,
        );
        self.draw_notice(f, content, model);

        let help = rows(area, phone.bottom().saturating_sub(area.y), 1);
        f.render_widget(
            Paragraph::new("drag up to lock | Ctrl+C quit")
                .alignment(Alignment::Center)
                .style(dim()),
            help,
        );
    }

    fn draw_status(&mut self, f: &mut Frame, area: Rect, model: &TerminalModel) {
        let buf = f.buffer_mut();
        buf.set_string(
            area.x + 1,
            area.y,
            status_bar::time_text(&model.now()),
            Style::default().add_modifier(Modifier::BOLD),
        );
        let right = format!("▂▄▆ ≋ {}", status_bar::battery_text());
        let width = right.chars().count() as u16;
        buf.set_string(
            area.right().saturating_sub(width + 1),
            area.y,
            right,
            Style::default(),
        );
    }

    fn draw_lock(&mut self, f: &mut Frame, area: Rect, model: &TerminalModel) {
        let now = model.now();
        f.render_widget(
            Paragraph::new(status_bar::time_text(&now))
                .alignment(Alignment::Center)
                .style(Style::default().add_modifier(Modifier::BOLD)),
            rows(area, 4, 1),
        );
        f.render_widget(
            Paragraph::new(status_bar::date_text(&now)).alignment(Alignment::Center),
            rows(area, 6, 1),
        );

        let sensor = centered(rows(area, area.height.saturating_sub(9), 3), 7, 3);
        let held = model.navigator().hold_pending();
        let style = if held {
            Style::default().fg(Color::Green)
        } else {
            Style::default()
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(style);
        let inner = block.inner(sensor);
        f.render_widget(block, sensor);
        f.render_widget(
            Paragraph::new("@").alignment(Alignment::Center).style(style),
            inner,
        );
        self.fingerprint = Some(sensor);
        self.spot(sensor, Target::Fingerprint);

        let hint = if held { "Keep holding..." } else { "Hold to unlock" };
        f.render_widget(
            Paragraph::new(hint).alignment(Alignment::Center).style(dim()),
            rows(area, area.height.saturating_sub(5), 1),
        );

        let y = area.bottom().saturating_sub(2);
        self.button(f, area.right().saturating_sub(7), y, "Cam", Message::OpenCamera);
    }

    fn draw_home(&mut self, f: &mut Frame, area: Rect) {
        let half = area.width / 2;
        let tile_width = 12.min(half);
        let apps = rows(area, 2, 3);
        self.tile(
            f,
            Rect {
                x: area.x + (half - tile_width) / 2,
                width: tile_width,
                ..apps
            },
            "Browser",
            Message::LaunchBrowser,
        );
        self.tile(
            f,
            Rect {
                x: area.x + half + (half - tile_width) / 2,
                width: tile_width,
                ..apps
            },
            "Photos",
            Message::OpenPhotos,
        );

        let dock = rows(area, area.height.saturating_sub(4), 3);
        self.tile(
            f,
            Rect {
                x: area.x + (half - tile_width) / 2,
                width: tile_width,
                ..dock
            },
            "Call",
            Message::CallPressed,
        );
        self.tile(
            f,
            Rect {
                x: area.x + half + (half - tile_width) / 2,
                width: tile_width,
                ..dock
            },
            "Camera",
            Message::OpenCamera,
        );
    }

    fn draw_browser(&mut self, f: &mut Frame, area: Rect, model: &TerminalModel) {
        let nav = model.navigator();
        let text = nav.search().text();
        let keyboard_visible = nav.keyboard_visible();

        let bar = rows(area, 0, 3);
        let block = Block::bordered().border_type(BorderType::Rounded);
        let inner = block.inner(bar);
        f.render_widget(block, bar);
        let field = if text.is_empty() && !keyboard_visible {
            Paragraph::new(browser::SEARCH_PLACEHOLDER).style(dim())
        } else if keyboard_visible {
            Paragraph::new(format!("{}▏", text))
        } else {
            Paragraph::new(text.to_string())
        };
        f.render_widget(field, inner);
        self.spot(bar, Target::Send(Message::SearchFocused));

        let keyboard_height = if keyboard_visible {
            keyboard::ROW_COUNT as u16 + 1
        } else {
            0
        };
        let viewer = rows(area, 3, area.height.saturating_sub(3 + keyboard_height));
        let address = nav.viewer_address().unwrap_or(browser::BLANK_ADDRESS);
        if address == browser::BLANK_ADDRESS {
            f.render_widget(
                Paragraph::new("about:blank").alignment(Alignment::Center).style(dim()),
                rows(viewer, viewer.height / 2, 1),
            );
        } else {
            f.render_widget(
                Paragraph::new(format!("Results for \"{}\"\n\n{}", text.trim(), address))
                    .wrap(Wrap { trim: false }),
                rows(viewer, 1, viewer.height.saturating_sub(3)),
            );
            let y = viewer.bottom().saturating_sub(1);
            self.button(f, viewer.x + 1, y, "Open in browser", Message::OpenViewerExternally);
        }

        if keyboard_visible {
            let board = rows(
                area,
                area.height.saturating_sub(keyboard_height) + 1,
                keyboard_height - 1,
            );
            self.draw_keyboard(f, board);
        }
    }

    fn draw_keyboard(&mut self, f: &mut Frame, area: Rect) {
        let key_style = Style::default().fg(Color::White).bg(Color::DarkGray);
        for (row, letters) in keyboard::LETTER_ROWS.iter().enumerate() {
            let line = rows(area, row as u16, 1);
            if line.is_empty() {
                continue;
            }
            let offset = keyboard::row_offset(row, line.width);
            for (i, letter) in letters.iter().enumerate() {
                let x = line.x + offset + i as u16 * keyboard::KEY_WIDTH;
                if x + keyboard::KEY_WIDTH <= line.right() {
                    f.buffer_mut()
                        .set_string(x, line.y, format!(" {} ", letter), key_style);
                }
            }
            self.spot(line, Target::KeyboardRow(row));
        }

        let actions = rows(area, keyboard::LETTER_ROWS.len() as u16, 1);
        for ((start, end), (label, _, _)) in keyboard::action_spans(actions.width)
            .iter()
            .zip(keyboard::ACTION_ROW.iter())
        {
            let span = Rect {
                x: actions.x + start,
                width: end - start,
                ..actions
            };
            f.render_widget(
                Paragraph::new(*label)
                    .alignment(Alignment::Center)
                    .style(key_style.add_modifier(Modifier::BOLD)),
                Rect {
                    width: span.width.saturating_sub(1),
                    ..span
                },
            );
        }
        self.spot(actions, Target::KeyboardRow(keyboard::LETTER_ROWS.len()));
    }

    fn draw_camera(&mut self, f: &mut Frame, area: Rect, model: &mut TerminalModel) {
        f.render_widget(Clear, area);
        self.button(f, area.x + 1, area.y, "Close", Message::CloseCamera);
        f.render_widget(
            Paragraph::new("Camera").alignment(Alignment::Center),
            rows(area, 0, 1),
        );

        let view = rows(area, 2, area.height.saturating_sub(6));
        let controls = area.bottom().saturating_sub(2);

        if let SessionState::Denied(reason) = model.session_state() {
            f.render_widget(
                Paragraph::new(unavailable_text(reason))
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(Color::Red))
                    .wrap(Wrap { trim: true }),
                rows(view, (view.height / 2).saturating_sub(1), 3),
            );
            return;
        }

        if let Some(captured) = model.last_capture() {
            let image = captured
                .artifact
                .decode()
                .ok()
                .map(|image| image.to_rgba8());
            ImageWidget::new(image.as_ref(), "Captured").render(view, f.buffer_mut());
            self.button(f, area.x + 2, controls, "Retake", Message::RetakePhoto);
            self.button(f, area.right().saturating_sub(8), controls, "Done", Message::CloseCamera);
            return;
        }

        let frame = model.preview_frame();
        ImageWidget::new(frame.as_ref(), "Starting camera...").render(view, f.buffer_mut());
        let shutter_x = area.x + area.width.saturating_sub(7) / 2;
        self.button(f, shutter_x, controls, " O ", Message::CapturePhoto);
    }

    fn draw_photos(&mut self, f: &mut Frame, area: Rect, model: &mut TerminalModel) {
        f.render_widget(Clear, area);
        let photos = model.photos();
        self.thumbnails
            .retain(|id, _| photos.iter().any(|photo| &photo.id == id));

        if let Some(photo) = model.selected_photo() {
            self.draw_photo_detail(f, area, &photo);
            return;
        }
        self.full_view = None;

        self.button(f, area.x + 1, area.y, "Back", Message::ClosePhotos);
        f.render_widget(
            Paragraph::new(format!("Photos ({})", photos.len())).alignment(Alignment::Center),
            rows(area, 0, 1),
        );

        let grid = rows(area, 2, area.height.saturating_sub(2));
        if photos.is_empty() {
            f.render_widget(
                Paragraph::new("No photos yet").alignment(Alignment::Center).style(dim()),
                rows(grid, grid.height / 2, 1),
            );
            return;
        }

        let columns = consts::GALLERY_COLUMNS as u16;
        let cell_width = grid.width / columns;
        let cell_height = (cell_width / 2).max(2);
        let visible_rows = (grid.height / cell_height) as usize;

        for (index, photo) in photos
            .iter()
            .take(visible_rows * consts::GALLERY_COLUMNS)
            .enumerate()
        {
            let column = (index % consts::GALLERY_COLUMNS) as u16;
            let row = (index / consts::GALLERY_COLUMNS) as u16;
            let cell = Rect {
                x: grid.x + column * cell_width,
                y: grid.y + row * cell_height,
                width: cell_width.saturating_sub(1),
                height: cell_height,
            };
            let thumbnail = self.thumbnail(photo);
            ImageWidget::new(thumbnail, "?").render(cell, f.buffer_mut());
            self.spot(cell, Target::Send(Message::SelectPhoto(photo.id.clone())));
        }
    }

    fn draw_photo_detail(&mut self, f: &mut Frame, area: Rect, photo: &PhotoRecord) {
        self.button(f, area.x + 1, area.y, "Back", Message::ClearSelection);
        let taken = photo
            .created_at
            .with_timezone(&Local)
            .format("%b %-d, %H:%M")
            .to_string();
        let width = taken.len() as u16;
        f.buffer_mut()
            .set_string(area.right().saturating_sub(width + 1), area.y, taken, dim());

        if self.full_view.as_ref().is_none_or(|(id, _)| id != &photo.id) {
            let image = decode_record(photo);
            self.full_view = Some((photo.id.clone(), image));
        }
        let image = self.full_view.as_ref().and_then(|(_, image)| image.as_ref());
        let view = rows(area, 2, area.height.saturating_sub(5));
        ImageWidget::new(image, "Unreadable photo").render(view, f.buffer_mut());

        let y = area.bottom().saturating_sub(2);
        let mut x = area.x + 1;
        x += self.button(f, x, y, "<", Message::SelectPreviousPhoto) + 1;
        x += self.button(f, x, y, "Delete", Message::DeletePhoto(photo.id.clone())) + 1;
        x += self.button(f, x, y, "Export", Message::ExportPhoto(photo.id.clone())) + 1;
        self.button(f, x, y, ">", Message::SelectNextPhoto);
    }

    fn thumbnail(&mut self, photo: &PhotoRecord) -> Option<&RgbaImage> {
        self.thumbnails
            .entry(photo.id.clone())
            .or_insert_with(|| {
                decode_record(photo).map(|image| image::imageops::thumbnail(&image, 48, 48))
            })
            .as_ref()
    }

    fn draw_notice(&mut self, f: &mut Frame, area: Rect, model: &TerminalModel) {
        let Some(notice) = model.notice() else {
            return;
        };
        let color = match notice.kind {
            NoticeKind::Info => Color::Green,
            NoticeKind::Error => Color::Red,
        };
        let boxed = rows(area, 1, 4);
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(color))
            .title(" x ");
        let inner = block.inner(boxed);
        f.render_widget(Clear, boxed);
        f.render_widget(block, boxed);
        f.render_widget(
            Paragraph::new(notice.text.as_str()).wrap(Wrap { trim: true }),
            inner,
        );
        self.spot(boxed, Target::Send(Message::DismissNotice));
    }
}

fn decode_record(photo: &PhotoRecord) -> Option<RgbaImage> {
    let artifact = photo
        .artifact()
        .inspect_err(|e| warn!(id = %photo.id, error = %e, "Stored photo unreadable"))
        .ok()?;
    artifact
        .decode()
        .inspect_err(|e| warn!(id = %photo.id, error = %e, "Stored photo undecodable"))
        .ok()
        .map(|image| image.to_rgba8())
}

/// Widget that renders an image using half-block characters
struct ImageWidget<'a> {
    image: Option<&'a RgbaImage>,
    placeholder: &'a str,
}

impl<'a> ImageWidget<'a> {
    fn new(image: Option<&'a RgbaImage>, placeholder: &'a str) -> Self {
        Self { image, placeholder }
    }
}

impl Widget for ImageWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let image = match self.image {
            Some(image) if image.width() > 0 && image.height() > 0 => image,
            _ => {
                let msg = self.placeholder;
                let x = area.x + (area.width.saturating_sub(msg.len() as u16)) / 2;
                let y = area.y + area.height / 2;
                if y < area.bottom() && x < area.right() {
                    buf.set_string(x, y, msg, dim());
                }
                return;
            }
        };

        // Each terminal cell displays 2 vertical pixels using half-block characters
        let aspect = f64::from(image.width()) / f64::from(image.height());
        let term_width = f64::from(area.width);
        let term_height = f64::from(area.height) * 2.0;

        let (display_width, display_height) = if term_width / term_height > aspect {
            // Area is wider - fit to height
            let w = term_height * aspect;
            (w as u16, (term_height / 2.0) as u16)
        } else {
            // Area is taller - fit to width
            let h = term_width / aspect;
            (term_width as u16, (h / 2.0) as u16)
        };
        if display_width == 0 || display_height == 0 {
            return;
        }

        // Center the image
        let x_offset = area.x + (area.width.saturating_sub(display_width)) / 2;
        let y_offset = area.y + (area.height.saturating_sub(display_height)) / 2;

        let x_scale = f64::from(image.width()) / f64::from(display_width);
        let y_scale = f64::from(image.height()) / (f64::from(display_height) * 2.0);

        // Upper pixel in the foreground (▀), lower pixel in the background
        for ty in 0..display_height {
            for tx in 0..display_width {
                let src_x = (f64::from(tx) * x_scale) as u32;
                let src_top = (f64::from(ty) * 2.0 * y_scale) as u32;
                let src_bottom = ((f64::from(ty) * 2.0 + 1.0) * y_scale) as u32;

                if let Some(cell) = buf.cell_mut((x_offset + tx, y_offset + ty)) {
                    cell.set_char('▀');
                    cell.set_fg(sample_pixel(image, src_x, src_top));
                    cell.set_bg(sample_pixel(image, src_x, src_bottom));
                }
            }
        }
    }
}

fn sample_pixel(image: &RgbaImage, x: u32, y: u32) -> Color {
    let x = x.min(image.width() - 1);
    let y = y.min(image.height() - 1);
    let [r, g, b, _] = image.get_pixel(x, y).0;
    Color::Rgb(r, g, b)
}
