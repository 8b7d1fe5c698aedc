use std::fs;

use flight_ticket::{render_ticket, TicketParams};

fn fixture_path(name: &str) -> String {
    format!("{}/tests/data/{name}", env!("CARGO_MANIFEST_DIR"))
}

#[test]
fn ticket_matches_golden() {
    let params = TicketParams {
        confirmation_code: "ABCDEFGH".to_string(),
        booking_reference: "IJKL1234".to_string(),
    };

    let actual = render_ticket(&params);

    let expected = fs::read_to_string(fixture_path("e_ticket_ABCDEFGH_IJKL1234.html"))
        .expect("Không đọc được golden ticket");

    assert_eq!(normalize_line_endings(&actual), normalize_line_endings(&expected));
}

fn normalize_line_endings(value: &str) -> String {
    value.replace("\r\n", "\n")
}
