use libris_core::{LibraryService, LoadSummary, ServiceError, StoreConfig};
use std::fs;

const BOOKS: &str = "\
C Sendak, Where the Wild Things Are, 1963
C Dahl, Matilda, 1988
F Tolkien, The Hobbit, 1937
P Analog Computing, 4 1984
Q Misfiled, Not A Real Kind, 1999
";

#[test]
fn loads_records_and_patrons_from_files() {
    let dir = tempfile::tempdir().unwrap();
    let books = dir.path().join("books.txt");
    let patrons = dir.path().join("patrons.txt");
    fs::write(&books, BOOKS).unwrap();
    fs::write(&patrons, "1000 Mouse Mickey\n1001 Duck Donald\n").unwrap();

    let mut service = LibraryService::with_defaults().unwrap();
    let records = service.load_records_from_file(&books).unwrap();
    let loaded_patrons = service.load_patrons_from_file(&patrons).unwrap();

    assert_eq!(
        records,
        LoadSummary {
            accepted: 4,
            rejected: 0,
            skipped: 1
        }
    );
    assert_eq!(loaded_patrons.accepted, 2);
    assert!(service
        .output()
        .contains("ERROR: Q is not a valid item type."));
}

#[test]
fn children_shelf_is_ordered_by_title() {
    let mut service = LibraryService::with_defaults().unwrap();
    service.load_records_from_str(BOOKS);

    let mut titles = Vec::new();
    service
        .store()
        .shelf('C')
        .unwrap()
        .traverse_in_order(|record| titles.push(record.title().to_string()));
    assert_eq!(titles, vec!["Matilda", "Where the Wild Things Are"]);
}

#[test]
fn library_display_matches_column_layout() {
    let mut service = LibraryService::with_defaults().unwrap();
    service.load_records_from_str("P Analog Computing, 4 1984\n");
    service.render_library();

    let output = service.take_output();
    let lines: Vec<&str> = output.lines().collect();
    let periodicals = lines.iter().position(|line| *line == "PERIODICALS").unwrap();
    assert_eq!(
        lines[periodicals + 1],
        "AVAIL  TITLE                              MONTH                    YEAR"
    );
    assert_eq!(
        lines[periodicals + 2],
        "1      Analog Computing                   4                        1984"
    );
}

#[test]
fn missing_command_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut service = LibraryService::with_defaults().unwrap();
    let err = service
        .accept_commands_from_file(dir.path().join("absent.txt"))
        .unwrap_err();
    assert!(matches!(err, ServiceError::Io { .. }));
}

#[test]
fn custom_config_file_drives_shelves_and_commands() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("store.json");
    fs::write(
        &config_path,
        r#"{
            "patron_table_size": 3,
            "shelves": [
                { "discriminant": "M", "kind": "periodical", "name": "MAGAZINES",
                  "header": ["AVAIL", "TITLE", "MONTH", "YEAR"] }
            ],
            "commands": [
                { "discriminant": "B", "kind": "checkout" },
                { "discriminant": "S", "kind": "display" }
            ]
        }"#,
    )
    .unwrap();

    let config = StoreConfig::load(&config_path).unwrap();
    let mut service = LibraryService::new(&config).unwrap();
    service.load_records_from_str("M Byte, 9 1985\nF Austen, Emma, 1815\n");
    service.load_patrons_from_str("7 Ada Lovelace\n");
    let summary = service.accept_commands_from_str("B 7 M H 1985 9 Byte,\nC 7\nS\n");

    assert_eq!(summary.kept, 1);
    assert_eq!(summary.unsupported, 1);
    assert_eq!(summary.discarded, 1);
    assert_eq!(service.store().patrons().table_size(), 3);
    let output = service.output();
    assert!(output.contains("ERROR: F is not a valid item type."));
    assert!(output.contains("ERROR: C is not a valid transaction type."));
    assert!(output.contains("MAGAZINES"));
}
