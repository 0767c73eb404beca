use std::cell::{Cell, RefCell};
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use clap::Parser;
use crossterm::event::{Event, KeyCode, KeyModifiers};
use indoc::indoc;
use tracing::{info, warn};

use term_widgets::components::Frame;
use term_widgets::drivers::{ConsoleInputDriver, ConsoleOutputDriver, InputDriver, OutputDriver};
use term_widgets::event_loop::{ControlFlow, EventLoop};
use term_widgets::render::render_scene;
use term_widgets::{
    EventKind, InputEvent, NodeId, PointerButton, Size, SystemClipboard, UiConfig, UiContext,
    UiError, UiEvent, clipboard, tracing_sub,
};

/// Floating-frame widget demo: a scrolling list and a small form.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Number of rows in the list frame.
    #[arg(long, default_value_t = 200)]
    items: usize,
    /// Milliseconds between idle ticks.
    #[arg(long, default_value_t = 16)]
    tick_ms: u64,
    /// Write logs here instead of stderr, which the alternate screen hides.
    #[arg(long)]
    log_file: Option<PathBuf>,
    /// Leave mouse capture off; keyboard only.
    #[arg(long)]
    no_mouse: bool,
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    if let Some(path) = &args.log_file {
        tracing_sub::init_with_file(path)?;
    } else {
        tracing_sub::init_default();
    }

    let mut output = ConsoleOutputDriver::new()?;
    let (cols, rows) = output.size()?;
    let mut ui = UiContext::new(
        UiConfig::terminal(),
        Size::new(f32::from(cols), f32::from(rows)),
    );
    if clipboard::available() {
        ui = ui.with_clipboard(SystemClipboard);
    }
    let status = build_scene(&mut ui, args.items).map_err(io::Error::other)?;

    output.enter()?;
    let mut driver = ConsoleInputDriver::new();
    if !args.no_mouse {
        driver.set_mouse_capture(true)?;
    }
    info!(items = args.items, cols, rows, "demo started");

    let tick = Duration::from_millis(args.tick_ms);
    let mut event_loop = EventLoop::new(driver, tick);
    let result = event_loop.run(|_, event| {
        let Some(event) = event else {
            ui.tick(tick);
            status.flush(&mut ui);
            output.draw(|mut frame| render_scene(&ui, &mut frame))?;
            return Ok(ControlFlow::Continue);
        };
        if let Event::Key(key) = &event
            && key.code == KeyCode::Char('q')
            && key.modifiers.contains(KeyModifiers::CONTROL)
        {
            return Ok(ControlFlow::Quit);
        }
        if let Some(input) = InputEvent::from_terminal(&event) {
            ui.handle_input(&input);
            if let InputEvent::PointerDown {
                pos,
                button: PointerButton::Right,
            } = input
                && let Err(err) = ui.show_menu(status.menu, pos)
            {
                warn!(error = %err, "context menu unavailable");
            }
        }
        Ok(ControlFlow::Continue)
    });

    output.exit()?;
    result
}

/// A label that shows the latest message raised by the form. Handlers can't
/// reach the context while it dispatches, so they park the text here, along
/// with a request to open the about box.
struct Status {
    label: NodeId,
    pending: Rc<RefCell<Option<String>>>,
    menu: NodeId,
    about: NodeId,
    show_about: Rc<Cell<bool>>,
}

impl Status {
    fn post(&self) -> impl FnMut(String) + 'static {
        let pending = self.pending.clone();
        move |text| *pending.borrow_mut() = Some(text)
    }

    fn flush(&self, ui: &mut UiContext) {
        if let Some(text) = self.pending.borrow_mut().take() {
            let _ = ui.set_label_text(self.label, text);
        }
        if self.show_about.take()
            && let Err(err) = ui.show_dialog(self.about)
        {
            warn!(error = %err, "about box unavailable");
        }
    }
}

fn build_scene(ui: &mut UiContext, items: usize) -> term_widgets::Result<Status> {
    let root = ui.root();

    let list = ui.create_frame(format!("{items} items"));
    ui.set_size(list, 32.0, 14.0)?;
    ui.set_manual_resize_enabled(list, true)?;
    ui.set_center_on_attach(list, false)?;
    ui.set_position(list, 2.0, 1.0)?;
    let list_content = ui
        .frame(list)
        .map(Frame::content)
        .ok_or(UiError::UnknownNode)?;
    let pane = ui.create_scroll_pane();
    ui.attach(list_content, pane)?;
    for i in 0..items {
        let row = ui.create_label(format!("row {i:>4}"));
        ui.add_item(pane, row)?;
    }
    let _ = ui.set_scroll_position(pane, 0)?;
    let fill = ui.bounds(list_content).unwrap_or_default();
    ui.set_size(pane, fill.width, fill.height)?;
    ui.attach(root, list)?;

    let form = ui.create_frame("Form");
    ui.set_size(form, 34.0, 12.0)?;
    ui.set_manual_resize_enabled(form, true)?;
    ui.set_center_on_attach(form, false)?;
    ui.set_position(form, 38.0, 3.0)?;
    let content = ui
        .frame(form)
        .map(Frame::content)
        .ok_or(UiError::UnknownNode)?;

    let name = ui.create_text_input();
    ui.set_width(name, 30.0)?;
    ui.attach(content, name)?;
    ui.set_position(name, 1.0, 1.0)?;
    ui.set_tooltip(
        name,
        indoc! {"
            Type, then Enter to submit.
            Ctrl+W deletes a word."},
    )?;

    let remember = ui.create_checkbox("Remember me");
    ui.attach(content, remember)?;
    ui.set_position(remember, 1.0, 3.0)?;

    let color = ui.create_dropdown();
    ui.set_width(color, 16.0)?;
    for (key, label) in [("red", "Red"), ("green", "Green"), ("blue", "Blue")] {
        ui.add_dropdown_item(color, key, label)?;
    }
    ui.select_dropdown(color, "green")?;
    ui.attach(content, color)?;
    ui.set_position(color, 1.0, 5.0)?;

    let send = ui.create_button("Send");
    ui.set_width(send, 8.0)?;
    ui.attach(content, send)?;
    ui.set_position(send, 1.0, 7.0)?;
    ui.set_tooltip(send, "Submits the name field")?;

    let label = ui.create_label("Right-click menu, Ctrl+Q quits");
    ui.set_width(label, 30.0)?;
    ui.attach(content, label)?;
    ui.set_position(label, 1.0, 9.0)?;
    ui.attach(root, form)?;

    let menu = ui.create_menu();
    ui.add_menu_item(menu, "about", "About")?;
    ui.add_menu_separator(menu)?;
    let colors = ui.create_menu();
    for (key, label) in [("red", "Red"), ("green", "Green"), ("blue", "Blue")] {
        ui.add_menu_item(colors, key, label)?;
    }
    ui.add_submenu(menu, "Color", colors)?;
    let about = ui.create_alert(
        "About",
        indoc! {"
            Floating frames in a terminal.
            Enter closes this box."},
    );

    let status = Status {
        label,
        pending: Rc::new(RefCell::new(None)),
        menu,
        about,
        show_about: Rc::new(Cell::new(false)),
    };
    let mut post = status.post();
    let show_about = status.show_about.clone();
    let _ = ui.subscribe(menu, EventKind::MenuSelect, move |n| {
        if let UiEvent::MenuSelect { key } = &n.event {
            show_about.set(key == "about");
            post(format!("menu {key}"));
        }
    });
    let mut post = status.post();
    let _ = ui.subscribe(name, EventKind::Submit, move |n| {
        if let UiEvent::Submit { text, .. } = &n.event {
            post(format!("submitted {text:?}"));
        }
    });
    let mut post = status.post();
    let _ = ui.subscribe(send, EventKind::Action, move |_| post("sent".to_owned()));
    let mut post = status.post();
    let _ = ui.subscribe(remember, EventKind::Change, move |_| post("toggled".to_owned()));
    let mut post = status.post();
    let _ = ui.subscribe_any(EventKind::ResizeComplete, move |n| {
        post(format!("resized {:?}", n.target))
    });

    ui.activate_frame(form)?;
    Ok(status)
}
