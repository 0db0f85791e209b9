//! 仕分けログ（Excel）生成
//!
//! 1回の実行につき1ブック、3シート構成:
//! - Sorted Applicants: 仕分け済みの応募者
//! - Unsorted Files - No Hall: 食堂キーが見つからなかったファイル
//! - Unsorted Files - Duplicates: 移動先に同名ファイルがあったファイル

use crate::error::{Error, Result};
use crate::types::SortReport;
use rust_xlsxwriter::*;
use std::path::Path;

pub const SORTED_SHEET: &str = "Sorted Applicants";
pub const NO_HALL_SHEET: &str = "Unsorted Files - No Hall";
pub const DUPLICATES_SHEET: &str = "Unsorted Files - Duplicates";

pub const SORTED_HEADERS: [&str; 4] = [
    "Name",
    "Scheduling Survey Number",
    "Dining Hall",
    "Survey Saved",
];
pub const NO_HALL_HEADER: &str = "Dining Hall Not Found";
pub const DUPLICATES_HEADER: &str = "Duplicate Files";

fn xlsx_error(e: XlsxError) -> Error {
    Error::Excel(e.to_string())
}

/// ログをバッファに生成
pub fn generate_log_buffer(report: &SortReport) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::RGB(0xAAAAAA));

    // 仕分け済み
    let sheet = workbook.add_worksheet();
    sheet.set_name(SORTED_SHEET).map_err(xlsx_error)?;
    for (col, header) in SORTED_HEADERS.iter().enumerate() {
        sheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .map_err(xlsx_error)?;
    }
    for (idx, applicant) in report.sorted.iter().enumerate() {
        let row = idx as u32 + 1;
        let saved = match applicant.survey_id {
            Some(_) if applicant.survey_saved => "Yes",
            Some(_) => "No",
            None => "",
        };
        sheet.write_string(row, 0, &applicant.name).map_err(xlsx_error)?;
        match applicant.survey_number() {
            Some(number) => sheet.write_number(row, 1, number),
            // 丸めを避けて文字列で書く
            None => sheet.write_string(row, 1, applicant.survey_id.unwrap_or_default().to_string()),
        }
        .map_err(xlsx_error)?;
        sheet.write_string(row, 2, &applicant.hall_key).map_err(xlsx_error)?;
        sheet.write_string(row, 3, saved).map_err(xlsx_error)?;
    }
    sheet.set_column_width(0, 30).map_err(xlsx_error)?;
    sheet.set_column_width(1, 26).map_err(xlsx_error)?;
    sheet.set_column_width(2, 20).map_err(xlsx_error)?;
    sheet.set_column_width(3, 14).map_err(xlsx_error)?;

    write_single_column(&mut workbook, NO_HALL_SHEET, NO_HALL_HEADER, &report.hall_not_found, &header_format)?;
    write_single_column(&mut workbook, DUPLICATES_SHEET, DUPLICATES_HEADER, &report.duplicates, &header_format)?;

    workbook.save_to_buffer().map_err(xlsx_error)
}

/// ログをファイルに書き出す
pub fn generate_log(report: &SortReport, output_path: &Path) -> Result<()> {
    let buffer = generate_log_buffer(report)?;
    std::fs::write(output_path, buffer)?;
    Ok(())
}

fn write_single_column(
    workbook: &mut Workbook,
    sheet_name: &str,
    header: &str,
    values: &[String],
    header_format: &Format,
) -> Result<()> {
    let sheet = workbook.add_worksheet();
    sheet.set_name(sheet_name).map_err(xlsx_error)?;
    sheet
        .write_string_with_format(0, 0, header, header_format)
        .map_err(xlsx_error)?;
    for (idx, value) in values.iter().enumerate() {
        sheet
            .write_string(idx as u32 + 1, 0, value)
            .map_err(xlsx_error)?;
    }
    sheet.set_column_width(0, 50).map_err(xlsx_error)?;
    Ok(())
}
