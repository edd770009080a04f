use libris_core::{LibraryService, PipelineSummary, RecordHandle, TextSink};

const BOOKS: &str = "\
F Apple, Apple, 2001
F Banana, Banana, 2002
";

fn fiction_stock(service: &LibraryService, title: &str) -> i32 {
    let mut stock = None;
    service
        .store()
        .shelf('F')
        .unwrap()
        .traverse_in_order(|record| {
            if record.title() == title {
                stock = Some(record.stock());
            }
        });
    stock.unwrap()
}

fn history_len(service: &LibraryService, key: i32) -> usize {
    service.store().patron(key).unwrap().history().len()
}

fn service() -> LibraryService {
    let mut service = LibraryService::with_defaults().unwrap();
    service.load_records_from_str(BOOKS);
    service.load_patrons_from_str("1001 Duck Donald\n");
    service
}

#[test]
fn checkout_then_return_restores_stock_and_grows_history() {
    let mut service = service();
    assert_eq!(fiction_stock(&service, "Apple"), 5);

    service.accept_commands_from_str("C 1001 F H Apple, Apple,\n");
    assert_eq!(fiction_stock(&service, "Apple"), 4);
    assert_eq!(history_len(&service, 1001), 1);
    assert_eq!(service.store().patron(1001).unwrap().held().len(), 1);

    service.accept_commands_from_str("R 1001 F H Apple, Apple,\n");
    assert_eq!(fiction_stock(&service, "Apple"), 5);
    assert_eq!(history_len(&service, 1001), 2);
    assert!(service.store().patron(1001).unwrap().held().is_empty());
    assert_eq!(fiction_stock(&service, "Banana"), 5);
}

#[test]
fn unknown_patron_changes_nothing() {
    let mut service = service();
    let summary = service.accept_commands_from_str("C 9999 F H Apple, Apple,\n");

    assert_eq!(
        summary,
        PipelineSummary {
            kept: 0,
            discarded: 1,
            unsupported: 0,
            malformed: 0
        }
    );
    assert_eq!(fiction_stock(&service, "Apple"), 5);
    assert_eq!(history_len(&service, 1001), 0);
    assert!(service
        .output()
        .contains("ERROR: Cannot checkout for invalid Patron ID: 9999"));
}

#[test]
fn history_lists_kept_commands_in_order() {
    let mut service = service();
    service.accept_commands_from_str(
        "C 1001 F H Apple, Apple,\nC 1001 F H Banana, Banana,\nR 1001 F H Apple, Apple,\nH 1001\n",
    );

    let output = service.take_output();
    let lines: Vec<&str> = output.lines().collect();
    let start = lines
        .iter()
        .position(|line| *line == "History for Patron: 1001 Duck Donald")
        .unwrap();
    assert_eq!(
        &lines[start + 1..start + 4],
        &["Checked out Apple", "Checked out Banana", "Returned Apple"]
    );
}

#[test]
fn history_without_kept_commands_says_so() {
    let mut service = service();
    service.accept_commands_from_str("H 1001\n");
    assert_eq!(
        service.output(),
        "\nPatron has no transaction history to display.\n"
    );
}

#[test]
fn display_command_renders_current_stock() {
    let mut service = service();
    service.accept_commands_from_str("C 1001 F H Banana, Banana,\nD\n");

    let output = service.take_output();
    let banana_row = output
        .lines()
        .find(|line| line.contains("Banana") && !line.starts_with("History"))
        .unwrap();
    assert!(banana_row.starts_with("4      Banana"));
}

#[test]
fn history_survives_cleared_shelves_as_unavailable() {
    let mut service = service();
    service.accept_commands_from_str("C 1001 F H Apple, Apple,\n");

    let held: RecordHandle = service.store().patron(1001).unwrap().held()[0];
    assert!(service.store().resolve(held).is_some());

    service.store_mut().clear_shelves();
    assert!(service.store().resolve(held).is_none());

    let store = service.store();
    let mut sink = TextSink::new();
    store.patron(1001).unwrap().render_history(store, &mut sink);
    assert!(sink.as_str().contains("Checked out <unavailable>"));
}
