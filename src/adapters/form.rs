use crate::domain::model::GRID_SIZE;
use crate::domain::ports::GridForm;
use crate::utils::error::{Result, SudokuError};

/// 純文字的 9x9 輸入表單，對應頁面上的 `cell-{row}{col}` 欄位
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextForm {
    cells: Vec<String>,
}

impl Default for TextForm {
    fn default() -> Self {
        Self {
            cells: vec![String::new(); GRID_SIZE * GRID_SIZE],
        }
    }
}

impl TextForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// 由 81 個原始字串（row-major）建立
    pub fn from_cells<S: AsRef<str>>(values: &[S]) -> Result<Self> {
        if values.len() != GRID_SIZE * GRID_SIZE {
            return Err(SudokuError::malformed(format!(
                "expected {} cells, got {}",
                GRID_SIZE * GRID_SIZE,
                values.len()
            )));
        }

        Ok(Self {
            cells: values.iter().map(|v| v.as_ref().to_string()).collect(),
        })
    }

    /// 由 9 行文字建立，每個字元填入一格，不足的格子留空
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Result<Self> {
        if lines.len() != GRID_SIZE {
            return Err(SudokuError::malformed(format!(
                "expected {} rows, got {}",
                GRID_SIZE,
                lines.len()
            )));
        }

        let mut form = Self::new();
        for (row, line) in lines.iter().enumerate() {
            let chars: Vec<char> = line.as_ref().trim().chars().collect();
            if chars.len() > GRID_SIZE {
                return Err(SudokuError::malformed(format!(
                    "row {} has {} cells",
                    row,
                    chars.len()
                )));
            }
            for (col, ch) in chars.into_iter().enumerate() {
                form.write_cell(row, col, &ch.to_string());
            }
        }

        Ok(form)
    }

    pub fn render(&self) -> String {
        let mut out = String::with_capacity(GRID_SIZE * (GRID_SIZE + 1));
        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                let value = self.read_cell(row, col);
                match value.trim() {
                    "" | "0" => out.push('.'),
                    v => out.push_str(v),
                }
            }
            out.push('\n');
        }
        out
    }
}

impl GridForm for TextForm {
    fn read_cell(&self, row: usize, col: usize) -> String {
        self.cells[row * GRID_SIZE + col].clone()
    }

    fn write_cell(&mut self, row: usize, col: usize, value: &str) {
        self.cells[row * GRID_SIZE + col] = value.to_string();
    }
}
