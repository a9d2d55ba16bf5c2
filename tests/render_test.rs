// Rendering tests: draw AppState into a TestBackend and read the buffer back.

use airline_customer_manager::app::keymap::Keymap;
use airline_customer_manager::app::{AppState, Notice, Theme};
use airline_customer_manager::customer::Customer;
use airline_customer_manager::ui::render;
use airline_customer_manager::ui::table::COLUMNS;
use ratatui::{Terminal, backend::TestBackend};

fn app() -> AppState {
    AppState::new("http://test/customerapi", Theme::dark(), Keymap::default())
}

fn ada() -> Customer {
    Customer {
        id: Some(1),
        name: "Ada".into(),
        age: Some(36),
        gender: "F".into(),
        passport_number: "P1".into(),
        status: "active".into(),
        flight_booked: "AC101".into(),
    }
}

/// Draw one frame and return the screen as text, one line per row.
fn draw(app: &mut AppState, width: u16, height: u16) -> String {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).expect("create terminal");
    terminal
        .draw(|f| {
            render(f, app);
        })
        .expect("render frame");
    let buffer = terminal.backend().buffer();
    let mut screen = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            screen.push_str(buffer[(x, y)].symbol());
        }
        screen.push('\n');
    }
    screen
}

#[test]
fn one_row_list_shows_headers_and_values() {
    let mut app = app();
    app.customers = vec![ada()];
    let screen = draw(&mut app, 180, 30);

    assert!(screen.contains("All Customers"));
    for header in COLUMNS {
        assert!(screen.contains(header), "missing header {header}\n{screen}");
    }
    let row = screen
        .lines()
        .find(|l| l.contains("Ada"))
        .expect("customer row drawn");
    for value in ["36", "P1", "active", "AC101"] {
        assert!(row.contains(value), "missing {value} in {row:?}");
    }
    assert!(!screen.contains("No customers found."));
}

#[test]
fn last_column_fits_at_120_columns() {
    let mut app = app();
    app.customers = vec![ada()];
    let screen = draw(&mut app, 120, 30);
    assert!(screen.contains("flightBooked"), "{screen}");
    let row = screen
        .lines()
        .find(|l| l.contains("Ada"))
        .expect("customer row drawn");
    assert!(row.contains("AC101"), "{row:?}");
}

#[test]
fn empty_list_shows_placeholder() {
    let mut app = app();
    let screen = draw(&mut app, 100, 30);
    assert!(screen.contains("No customers found."));
}

#[test]
fn form_title_follows_mode() {
    let mut app = app();
    app.customers = vec![ada()];
    let screen = draw(&mut app, 100, 30);
    assert!(screen.contains("Add Customer"));
    assert!(!screen.contains("Edit Customer"));

    assert!(app.begin_edit(0));
    let screen = draw(&mut app, 100, 30);
    assert!(screen.contains("Edit Customer"));
    assert!(!screen.contains("Add Customer"));
}

#[test]
fn fetched_customer_panel_lists_fields() {
    let mut app = app();
    app.fetched = Some(Customer {
        name: "Grace".into(),
        ..ada()
    });
    let screen = draw(&mut app, 120, 40);
    assert!(screen.contains("Customer Found"));
    assert!(screen.contains("Grace"));
    assert!(screen.contains("passportNumber"));
}

#[test]
fn banner_shows_current_message() {
    let mut app = app();
    let screen = draw(&mut app, 100, 30);
    assert!(screen.contains("Airline Customer Management"));

    app.notice = Some(Notice::error("Failed to fetch customers."));
    let screen = draw(&mut app, 100, 30);
    assert!(screen.contains("Failed to fetch customers."));
}

#[test]
fn help_overlay_explains_typing_in_inputs() {
    let mut app = app();
    app.show_help = true;
    let screen = draw(&mut app, 100, 30);
    assert!(screen.contains("Keybindings"));
    assert!(screen.contains("plain characters are typed"));
    assert!(screen.contains("work in every panel"));
}

#[test]
fn tiny_terminals_do_not_panic() {
    for (w, h) in [(1, 1), (5, 3), (20, 6), (40, 4)] {
        let mut app = app();
        app.customers = vec![ada()];
        app.fetched = Some(ada());
        app.notice = Some(Notice::info("Customer added successfully!"));
        app.show_help = true;
        draw(&mut app, w, h);
    }
}
