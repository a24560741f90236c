//! 스프레드시트 읽기/쓰기
//!
//! 읽기는 calamine(xlsx, xlsm, xlsb, xls, ods), 쓰기는 rust_xlsxwriter(xlsx)를 사용한다.

use crate::models::table::{CellValue, Table};
use crate::utils::error::{Result, SheetMergeError};
use calamine::{open_workbook_auto, Data, Reader};
use rust_xlsxwriter::{ColNum, Format, FormatBorder, RowNum, Workbook, Worksheet, XlsxError};
use std::path::Path;

/// 날짜 셀 표시 형식
const DATETIME_NUM_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

/// 파일의 첫 번째 시트를 표로 읽는다 (첫 행 = 열 이름)
pub fn read_table(path: &Path) -> Result<Table> {
    let mut workbook = open_workbook_auto(path).map_err(|source| SheetMergeError::SpreadsheetRead {
        path: path.to_path_buf(),
        source,
    })?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| SheetMergeError::EmptyWorkbook {
            path: path.to_path_buf(),
        })?
        .map_err(|source| SheetMergeError::SpreadsheetRead {
            path: path.to_path_buf(),
            source,
        })?;

    // range 는 데이터가 있는 첫 셀부터 시작한다. 앞쪽 빈 열은 A열부터 다시 채운다.
    let leading_cols = range.start().map_or(0, |(_, col)| col as usize);
    let grid: Vec<Vec<CellValue>> = range
        .rows()
        .map(|row| {
            std::iter::repeat(CellValue::Empty)
                .take(leading_cols)
                .chain(row.iter().map(cell_value))
                .collect()
        })
        .collect();

    Ok(Table::from_grid(grid))
}

/// calamine 셀 → CellValue
fn cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(s) => {
            if s.is_empty() {
                CellValue::Empty
            } else {
                CellValue::Text(s.clone())
            }
        }
        Data::Float(n) => CellValue::Number(*n),
        Data::Int(n) => CellValue::Int(*n),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => CellValue::DateTime(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Error(e.to_string()),
    }
}

/// 표 하나를 단일 시트(`Sheet1`) 파일로 저장
pub fn write_single_sheet(table: &Table, path: &Path) -> Result<()> {
    write_sheets(std::slice::from_ref(table), path)
}

/// 표마다 시트를 하나씩 만들어 저장 (`Sheet1`, `Sheet2`, … 입력 순서)
pub fn write_sheets(tables: &[Table], path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold().set_border(FormatBorder::Thin);
    let datetime_format = Format::new().set_num_format(DATETIME_NUM_FORMAT);

    for (index, table) in tables.iter().enumerate() {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet_name(index))?;
        write_table(worksheet, table, &header_format, &datetime_format)?;
    }

    workbook.save(path)?;
    Ok(())
}

/// 0-based 인덱스 → 시트 이름
pub fn sheet_name(index: usize) -> String {
    format!("Sheet{}", index + 1)
}

fn write_table(
    worksheet: &mut Worksheet,
    table: &Table,
    header_format: &Format,
    datetime_format: &Format,
) -> std::result::Result<(), XlsxError> {
    for (col, name) in table.columns.iter().enumerate() {
        worksheet.write_string_with_format(0, col_num(col)?, name, header_format)?;
    }

    for (row_idx, row) in table.rows.iter().enumerate() {
        let row_num = row_num(row_idx + 1)?;
        for (col, value) in row.iter().enumerate() {
            let col = col_num(col)?;
            match value {
                CellValue::Empty => {}
                CellValue::Text(s) | CellValue::Error(s) => {
                    worksheet.write_string(row_num, col, s)?;
                }
                CellValue::Number(n) => {
                    worksheet.write_number(row_num, col, *n)?;
                }
                CellValue::Int(n) => {
                    worksheet.write_number(row_num, col, *n as f64)?;
                }
                CellValue::Bool(b) => {
                    worksheet.write_boolean(row_num, col, *b)?;
                }
                CellValue::DateTime(serial) => {
                    worksheet.write_number_with_format(row_num, col, *serial, datetime_format)?;
                }
            }
        }
    }
    Ok(())
}

fn row_num(index: usize) -> std::result::Result<RowNum, XlsxError> {
    RowNum::try_from(index).map_err(|_| XlsxError::RowColumnLimitError)
}

fn col_num(index: usize) -> std::result::Result<ColNum, XlsxError> {
    ColNum::try_from(index).map_err(|_| XlsxError::RowColumnLimitError)
}
