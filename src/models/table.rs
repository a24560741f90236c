//! 표 형식 데이터 모델
//!
//! 입력 파일 하나를 읽은 결과. 첫 행은 열 이름, 나머지는 데이터 행이다.

use std::collections::{HashMap, HashSet};

/// 셀 값
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// 빈 셀 (열 합집합으로 생긴 누락 값 포함)
    Empty,
    Text(String),
    Number(f64),
    Int(i64),
    Bool(bool),
    /// 엑셀 날짜 일련번호
    DateTime(f64),
    /// `#DIV/0!` 등 오류 값의 표시 문자열
    Error(String),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// 헤더 이름으로 쓸 문자열
    fn header_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) | CellValue::Error(s) => s.trim().to_string(),
            CellValue::Number(n) | CellValue::DateTime(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    n.to_string()
                }
            }
            CellValue::Int(n) => n.to_string(),
            CellValue::Bool(b) => (if *b { "True" } else { "False" }).to_string(),
        }
    }
}

/// 열 이름 + 데이터 행
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl Table {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self { columns, rows }
    }

    /// 원시 셀 격자에서 표 생성 (첫 행 = 헤더)
    ///
    /// 빈 헤더는 `Unnamed: <열>`, 중복 헤더는 `이름.1`, `이름.2`…로 바꾼다.
    /// 데이터 행은 열 수에 맞춰 빈 셀로 채운다.
    pub fn from_grid(mut grid: Vec<Vec<CellValue>>) -> Self {
        if grid.is_empty() {
            return Self::default();
        }
        let header = grid.remove(0);
        let width = grid
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(header.len()))
            .max()
            .unwrap_or(0);

        let raw_names: Vec<String> = (0..width)
            .map(|col| {
                let text = header.get(col).map(CellValue::header_text).unwrap_or_default();
                if text.is_empty() {
                    format!("Unnamed: {}", col)
                } else {
                    text
                }
            })
            .collect();
        let columns = dedupe_columns(raw_names);

        let rows = grid
            .into_iter()
            .map(|mut row| {
                row.resize(width, CellValue::Empty);
                row
            })
            .collect();

        Self { columns, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// 여러 표를 행 방향으로 이어 붙인다 (입력 순서 유지)
    ///
    /// 결과 열은 모든 열 이름의 합집합(처음 등장 순서)이며,
    /// 해당 열이 없는 행은 `CellValue::Empty`로 채운다.
    pub fn concat(tables: &[Table]) -> Table {
        let mut columns: Vec<String> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();
        for table in tables {
            for name in &table.columns {
                if !positions.contains_key(name) {
                    positions.insert(name.clone(), columns.len());
                    columns.push(name.clone());
                }
            }
        }

        let total_rows = tables.iter().map(Table::row_count).sum();
        let mut rows = Vec::with_capacity(total_rows);
        for table in tables {
            let mapping: Vec<usize> = table.columns.iter().map(|name| positions[name]).collect();
            for row in &table.rows {
                let mut projected = vec![CellValue::Empty; columns.len()];
                for (value, &target) in row.iter().zip(&mapping) {
                    projected[target] = value.clone();
                }
                rows.push(projected);
            }
        }

        Table { columns, rows }
    }
}

/// 중복 열 이름에 `.1`, `.2`… 접미사 부여
fn dedupe_columns(names: Vec<String>) -> Vec<String> {
    let mut counters: HashMap<String, usize> = HashMap::new();
    let mut used: HashSet<String> = HashSet::new();
    let mut result: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        let mut candidate = name.clone();
        if used.contains(&candidate) {
            let counter = counters.entry(name.clone()).or_insert(0);
            loop {
                *counter += 1;
                candidate = format!("{}.{}", name, counter);
                if !used.contains(&candidate) {
                    break;
                }
            }
        }
        used.insert(candidate.clone());
        result.push(candidate);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    #[test]
    fn test_from_grid_uses_first_row_as_header() {
        let table = Table::from_grid(vec![
            vec![text("name"), text("qty")],
            vec![text("apple"), CellValue::Int(3)],
            vec![text("pear")],
        ]);
        assert_eq!(table.columns, vec!["name", "qty"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows[1], vec![text("pear"), CellValue::Empty]);
    }

    #[test]
    fn test_from_grid_names_blank_and_duplicate_headers() {
        let table = Table::from_grid(vec![
            vec![text("id"), CellValue::Empty, text("id"), text("id"), CellValue::Number(2024.0)],
            vec![CellValue::Int(1)],
        ]);
        assert_eq!(
            table.columns,
            vec!["id", "Unnamed: 1", "id.1", "id.2", "2024"]
        );
    }

    #[test]
    fn test_dedupe_columns_skips_taken_suffixes() {
        let columns = dedupe_columns(vec!["a.1".into(), "a".into(), "a".into()]);
        assert_eq!(columns, vec!["a.1", "a", "a.2"]);
    }

    #[test]
    fn test_from_grid_wider_data_than_header() {
        let table = Table::from_grid(vec![vec![text("a")], vec![text("x"), text("y")]]);
        assert_eq!(table.columns, vec!["a", "Unnamed: 1"]);
    }

    #[test]
    fn test_from_grid_empty() {
        let table = Table::from_grid(Vec::new());
        assert_eq!(table.column_count(), 0);
        assert_eq!(table.row_count(), 0);
    }

    #[test]
    fn test_concat_same_columns_sums_rows() {
        let a = Table::new(
            vec!["k".into(), "v".into()],
            vec![vec![text("a"), CellValue::Int(1)]],
        );
        let b = Table::new(
            vec!["k".into(), "v".into()],
            vec![
                vec![text("b"), CellValue::Int(2)],
                vec![text("c"), CellValue::Int(3)],
            ],
        );
        let merged = Table::concat(&[a, b]);
        assert_eq!(merged.columns, vec!["k", "v"]);
        assert_eq!(merged.row_count(), 3);
        assert_eq!(merged.rows[0][0], text("a"));
        assert_eq!(merged.rows[2][1], CellValue::Int(3));
    }

    #[test]
    fn test_concat_mismatched_columns_fills_gaps() {
        let a = Table::new(
            vec!["id".into(), "name".into()],
            vec![vec![CellValue::Int(1), text("ann")]],
        );
        let b = Table::new(
            vec!["id".into(), "score".into()],
            vec![vec![CellValue::Int(2), CellValue::Number(9.5)]],
        );
        let merged = Table::concat(&[a, b]);
        assert_eq!(merged.columns, vec!["id", "name", "score"]);
        assert_eq!(
            merged.rows[0],
            vec![CellValue::Int(1), text("ann"), CellValue::Empty]
        );
        assert_eq!(
            merged.rows[1],
            vec![CellValue::Int(2), CellValue::Empty, CellValue::Number(9.5)]
        );
    }

    #[test]
    fn test_concat_reordered_columns_align_by_name() {
        let a = Table::new(vec!["x".into(), "y".into()], vec![vec![text("1"), text("2")]]);
        let b = Table::new(vec!["y".into(), "x".into()], vec![vec![text("4"), text("3")]]);
        let merged = Table::concat(&[a, b]);
        assert_eq!(merged.rows[1], vec![text("3"), text("4")]);
    }
}
