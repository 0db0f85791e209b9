//! 仕分けログの読み戻しテスト
//!
//! 生成したブックを calamine で開き、シート構成と値を検証

use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};
use organizer_common::export::log_book::{
    DUPLICATES_SHEET, NO_HALL_SHEET, SORTED_HEADERS, SORTED_SHEET,
};
use organizer_common::{generate_log_buffer, SortReport, SortedApplicant};
use std::io::Cursor;

fn sample_report() -> SortReport {
    SortReport {
        sorted: vec![
            SortedApplicant {
                name: "John Doe".into(),
                survey_id: Some(123),
                hall_key: "Main".into(),
                survey_saved: true,
            },
            SortedApplicant {
                name: "Jane Roe".into(),
                survey_id: None,
                hall_key: "DX".into(),
                survey_saved: false,
            },
        ],
        hall_not_found: vec!["Unknown.pdf".into()],
        duplicates: vec!["Sam Poe 4 Main.pdf".into(), "Zed 5 DX.pdf".into()],
        aborted: None,
    }
}

fn open(buffer: Vec<u8>) -> Xlsx<Cursor<Vec<u8>>> {
    open_workbook_from_rs(Cursor::new(buffer)).expect("ブックを開けない")
}

#[test]
fn test_sheet_names_in_order() {
    let workbook = open(generate_log_buffer(&sample_report()).unwrap());
    assert_eq!(
        workbook.sheet_names(),
        vec![SORTED_SHEET, NO_HALL_SHEET, DUPLICATES_SHEET]
    );
}

#[test]
fn test_sorted_sheet_values() {
    let mut workbook = open(generate_log_buffer(&sample_report()).unwrap());
    let range = workbook.worksheet_range(SORTED_SHEET).unwrap();

    for (col, header) in SORTED_HEADERS.iter().enumerate() {
        assert_eq!(
            range.get_value((0, col as u32)),
            Some(&Data::String(header.to_string()))
        );
    }

    assert_eq!(range.get_value((1, 0)), Some(&Data::String("John Doe".into())));
    assert_eq!(range.get_value((1, 1)), Some(&Data::Float(123.0)));
    assert_eq!(range.get_value((1, 2)), Some(&Data::String("Main".into())));
    assert_eq!(range.get_value((1, 3)), Some(&Data::String("Yes".into())));

    // 調査番号なしは -1
    assert_eq!(range.get_value((2, 1)), Some(&Data::Float(-1.0)));
}

#[test]
fn test_unsorted_sheets_values() {
    let mut workbook = open(generate_log_buffer(&sample_report()).unwrap());

    let no_hall = workbook.worksheet_range(NO_HALL_SHEET).unwrap();
    assert_eq!(no_hall.height(), 2);
    assert_eq!(no_hall.get_value((1, 0)), Some(&Data::String("Unknown.pdf".into())));

    let dupes = workbook.worksheet_range(DUPLICATES_SHEET).unwrap();
    assert_eq!(dupes.height(), 3);
    assert_eq!(dupes.get_value((2, 0)), Some(&Data::String("Zed 5 DX.pdf".into())));
}

#[test]
fn test_empty_report_has_headers_only() {
    let mut workbook = open(generate_log_buffer(&SortReport::default()).unwrap());
    let range = workbook.worksheet_range(SORTED_SHEET).unwrap();
    assert_eq!(range.height(), 1);
}

#[test]
fn test_large_survey_id_written_as_text() {
    let report = SortReport {
        sorted: vec![SortedApplicant {
            name: "Big Id".into(),
            survey_id: Some(9_007_199_254_740_993),
            hall_key: "DX".into(),
            survey_saved: false,
        }],
        ..Default::default()
    };
    let mut workbook = open(generate_log_buffer(&report).unwrap());
    let range = workbook.worksheet_range(SORTED_SHEET).unwrap();

    // 数値だと …992 に丸められる
    assert_eq!(
        range.get_value((1, 1)),
        Some(&Data::String("9007199254740993".into()))
    );
}
