use crate::utils::error::{Result, SudokuError};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

pub const GRID_SIZE: usize = 9;

/// Session store 中使用的鍵
pub const URL_KEY: &str = "url";
pub const INPUT_SUDOKU_KEY: &str = "input-sudoku";
pub const OUTPUT_SUDOKU_KEY: &str = "output-sudoku";

/// 解題完成後導向的結果頁
pub const SOLVED_VIEW: &str = "solved.html";

/// 9x9 數獨盤面，0 代表空格
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Grid {
    cells: [[u8; GRID_SIZE]; GRID_SIZE],
}

impl Grid {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_cells(cells: [[u8; GRID_SIZE]; GRID_SIZE]) -> Result<Self> {
        for (row, values) in cells.iter().enumerate() {
            for (col, value) in values.iter().enumerate() {
                if *value > 9 {
                    return Err(SudokuError::malformed(format!(
                        "cell [{}][{}] = {} is out of range",
                        row, col, value
                    )));
                }
            }
        }
        Ok(Self { cells })
    }

    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.cells[row][col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: u8) -> Result<()> {
        if value > 9 {
            return Err(SudokuError::malformed(format!(
                "cell [{}][{}] = {} is out of range",
                row, col, value
            )));
        }
        self.cells[row][col] = value;
        Ok(())
    }

    pub fn rows(&self) -> &[[u8; GRID_SIZE]; GRID_SIZE] {
        &self.cells
    }

    pub fn filled_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|value| **value != 0)
            .count()
    }

    /// 嚴格驗證：必須剛好 9 列、每列 9 個 0..=9 的整數
    pub fn from_value(value: &serde_json::Value) -> Result<Self> {
        let rows = value
            .as_array()
            .ok_or_else(|| SudokuError::malformed(format!("expected an array of rows, got {}", value)))?;

        if rows.len() != GRID_SIZE {
            return Err(SudokuError::malformed(format!(
                "expected {} rows, got {}",
                GRID_SIZE,
                rows.len()
            )));
        }

        let mut grid = Self::empty();
        for (row, row_value) in rows.iter().enumerate() {
            let cells = row_value
                .as_array()
                .ok_or_else(|| SudokuError::malformed(format!("row {} is not an array", row)))?;

            if cells.len() != GRID_SIZE {
                return Err(SudokuError::malformed(format!(
                    "row {} has {} cells",
                    row,
                    cells.len()
                )));
            }

            for (col, cell) in cells.iter().enumerate() {
                grid.cells[row][col] = match cell.as_i64() {
                    Some(n) if (0..=9).contains(&n) => n as u8,
                    Some(n) => {
                        return Err(SudokuError::malformed(format!(
                            "cell [{}][{}] = {} is out of range",
                            row, col, n
                        )))
                    }
                    None => {
                        return Err(SudokuError::malformed(format!(
                            "cell [{}][{}] is not an integer: {}",
                            row, col, cell
                        )))
                    }
                };
            }
        }

        Ok(grid)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(text)
            .map_err(|e| SudokuError::malformed(format!("invalid JSON: {}", e)))?;
        Self::from_value(&value)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// 解析 9 行數字字串（例如 `026000000`），不足 9 碼的行尾補 0，非數字字元視為 0
    pub fn from_rows_text<S: AsRef<str>>(lines: &[S]) -> Result<Self> {
        if lines.len() != GRID_SIZE {
            return Err(SudokuError::malformed(format!(
                "expected {} rows, got {}",
                GRID_SIZE,
                lines.len()
            )));
        }

        let mut grid = Self::empty();
        for (row, line) in lines.iter().enumerate() {
            let chars: Vec<char> = line.as_ref().trim().chars().collect();
            if chars.len() > GRID_SIZE {
                return Err(SudokuError::malformed(format!(
                    "row {} has {} cells",
                    row,
                    chars.len()
                )));
            }
            for (col, ch) in chars.iter().enumerate() {
                grid.cells[row][col] = ch.to_digit(10).map(|d| d as u8).unwrap_or(0);
            }
        }

        Ok(grid)
    }
}

/// 將表單文字轉為格子數值：與 JS `Number(value) || 0` 相同，再限制在 0..=9
pub fn coerce_cell(text: &str) -> u8 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0;
    }

    match trimmed.parse::<f64>() {
        Ok(n) if n.fract() == 0.0 && (1.0..=9.0).contains(&n) => n as u8,
        _ => 0,
    }
}

impl Serialize for Grid {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.cells.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Grid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Grid::from_value(&value).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", "_".repeat(25))?;

        for (i, row) in self.cells.iter().enumerate() {
            for (j, value) in row.iter().enumerate() {
                if j == 0 {
                    write!(f, "|")?;
                }
                if *value == 0 {
                    write!(f, " .")?;
                } else {
                    write!(f, " {}", value)?;
                }
                if j % 3 == 2 {
                    write!(f, " |")?;
                }
            }
            writeln!(f)?;
            if i % 3 == 2 && i != GRID_SIZE - 1 {
                writeln!(f, "|-------|-------|-------|")?;
            }
        }

        write!(f, "{}", "\u{203e}".repeat(25))
    }
}
