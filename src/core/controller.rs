use crate::core::{GridForm, Navigator, SessionStore, SolverService};
use crate::domain::model::{
    coerce_cell, Grid, GRID_SIZE, INPUT_SUDOKU_KEY, OUTPUT_SUDOKU_KEY, SOLVED_VIEW, URL_KEY,
};
use crate::utils::error::{Result, SudokuError};
use tokio_util::sync::CancellationToken;
use url::Url;

/// 頁面與遠端解題服務之間的膠合層
pub struct ClientController<S: SessionStore, F: GridForm, N: Navigator, V: SolverService> {
    store: S,
    form: F,
    navigator: N,
    solver: V,
}

impl<S: SessionStore, F: GridForm, N: Navigator, V: SolverService> ClientController<S, F, N, V> {
    pub fn new(store: S, form: F, navigator: N, solver: V) -> Self {
        Self {
            store,
            form,
            navigator,
            solver,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut F {
        &mut self.form
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// 清空 session 並記住服務位址
    pub fn start(&self, page_url: &str) -> Result<()> {
        self.store.clear()?;

        tracing::info!("Saving service URL. {}", page_url);
        self.set_url(page_url)
    }

    pub fn reset(&self) -> Result<()> {
        match self.get_url()? {
            Some(url) => {
                self.navigator.replace(&url);
                Ok(())
            }
            None => {
                tracing::warn!("No service URL stored, reset ignored");
                Ok(())
            }
        }
    }

    pub async fn solve(&self) -> Result<Grid> {
        self.solve_with_cancel(&CancellationToken::new()).await
    }

    pub async fn solve_with_cancel(&self, cancel: &CancellationToken) -> Result<Grid> {
        self.save_input_sudoku()?;

        let input = self
            .get_input_sudoku()?
            .ok_or_else(|| SudokuError::MissingKey {
                key: INPUT_SUDOKU_KEY.to_string(),
            })?;
        let output = self.solve_sudoku_internal(&input, cancel).await?;

        self.set_output_sudoku(&output)?;
        self.navigator.assign(&self.solved_view_url()?);

        Ok(output)
    }

    pub async fn solve_sudoku_internal(
        &self,
        grid: &Grid,
        cancel: &CancellationToken,
    ) -> Result<Grid> {
        let url = self.get_url()?.ok_or_else(|| SudokuError::MissingKey {
            key: URL_KEY.to_string(),
        })?;

        self.solver.solve(&url, grid, cancel).await
    }

    pub fn solved(&mut self) -> Result<()> {
        self.print_output_sudoku()
    }

    /// 讀取 81 格輸入，無效值一律視為 0
    pub fn save_input_sudoku(&self) -> Result<Grid> {
        let mut grid = Grid::empty();
        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                grid.set(row, col, coerce_cell(&self.form.read_cell(row, col)))?;
            }
        }

        tracing::info!("Saving input sudoku. {}", grid.to_json()?);
        self.set_input_sudoku(&grid)?;
        Ok(grid)
    }

    pub fn print_output_sudoku(&mut self) -> Result<()> {
        let grid = self
            .get_output_sudoku()?
            .ok_or_else(|| SudokuError::MissingKey {
                key: OUTPUT_SUDOKU_KEY.to_string(),
            })?;

        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                self.form
                    .write_cell(row, col, &grid.get(row, col).to_string());
            }
        }
        Ok(())
    }

    fn solved_view_url(&self) -> Result<String> {
        let base = self.get_url()?.unwrap_or_default();
        Ok(Url::parse(&base)
            .and_then(|url| url.join(SOLVED_VIEW))
            .map(|url| url.to_string())
            .unwrap_or_else(|_| SOLVED_VIEW.to_string()))
    }

    pub fn set_url(&self, url: &str) -> Result<()> {
        self.store.set(URL_KEY, url)
    }

    pub fn get_url(&self) -> Result<Option<String>> {
        self.store.get(URL_KEY)
    }

    pub fn set_input_sudoku(&self, grid: &Grid) -> Result<()> {
        self.store.set(INPUT_SUDOKU_KEY, &grid.to_json()?)
    }

    pub fn get_input_sudoku(&self) -> Result<Option<Grid>> {
        self.read_grid(INPUT_SUDOKU_KEY)
    }

    pub fn set_output_sudoku(&self, grid: &Grid) -> Result<()> {
        self.store.set(OUTPUT_SUDOKU_KEY, &grid.to_json()?)
    }

    pub fn get_output_sudoku(&self) -> Result<Option<Grid>> {
        self.read_grid(OUTPUT_SUDOKU_KEY)
    }

    fn read_grid(&self, key: &str) -> Result<Option<Grid>> {
        self.store
            .get(key)?
            .map(|text| Grid::from_json(&text))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::form::TextForm;
    use crate::adapters::navigator::{Navigation, RecordingNavigator};
    use crate::adapters::storage::MemoryStore;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    /// 回傳固定盤面並記錄收到的請求
    #[derive(Clone, Default)]
    struct MockSolver {
        calls: Arc<Mutex<Vec<(String, Grid)>>>,
        answer: Grid,
    }

    #[async_trait]
    impl SolverService for MockSolver {
        async fn solve(
            &self,
            service_url: &str,
            grid: &Grid,
            _cancel: &CancellationToken,
        ) -> Result<Grid> {
            self.calls
                .lock()
                .unwrap()
                .push((service_url.to_string(), *grid));
            Ok(self.answer)
        }
    }

    fn solved_grid() -> Grid {
        let mut grid = Grid::empty();
        for row in 0..9 {
            for col in 0..9 {
                grid.set(row, col, ((row * 3 + row / 3 + col) % 9 + 1) as u8)
                    .unwrap();
            }
        }
        grid
    }

    fn controller(
        form: TextForm,
    ) -> ClientController<MemoryStore, TextForm, RecordingNavigator, MockSolver> {
        ClientController::new(
            MemoryStore::new(),
            form,
            RecordingNavigator::new(),
            MockSolver {
                answer: solved_grid(),
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_start_clears_previous_session() {
        let ctrl = controller(TextForm::new());
        ctrl.set_input_sudoku(&Grid::empty()).unwrap();
        ctrl.set_output_sudoku(&solved_grid()).unwrap();

        ctrl.start("http://localhost:3001/").unwrap();

        assert_eq!(
            ctrl.get_url().unwrap().as_deref(),
            Some("http://localhost:3001/")
        );
        assert_eq!(ctrl.get_input_sudoku().unwrap(), None);
        assert_eq!(ctrl.get_output_sudoku().unwrap(), None);
    }

    #[test]
    fn test_save_input_sudoku_coerces_invalid_cells() {
        let mut form = TextForm::new();
        form.write_cell(0, 0, "5");
        form.write_cell(0, 1, "abc");
        form.write_cell(4, 4, "12");
        form.write_cell(8, 8, "9");

        let ctrl = controller(form);
        let grid = ctrl.save_input_sudoku().unwrap();

        assert_eq!(grid.get(0, 0), 5);
        assert_eq!(grid.get(0, 1), 0);
        assert_eq!(grid.get(4, 4), 0);
        assert_eq!(grid.get(8, 8), 9);
        assert_eq!(grid.filled_count(), 2);
        assert_eq!(ctrl.get_input_sudoku().unwrap(), Some(grid));
    }

    #[test]
    fn test_non_numeric_form_scrapes_to_zero_grid() {
        let ctrl = controller(TextForm::from_cells(&["x"; 81]).unwrap());
        assert_eq!(ctrl.save_input_sudoku().unwrap(), Grid::empty());
    }

    #[tokio::test]
    async fn test_solve_stores_output_and_navigates() {
        let mut form = TextForm::new();
        form.write_cell(0, 0, "5");
        let ctrl = controller(form);
        ctrl.start("http://localhost:3001/").unwrap();

        let output = ctrl.solve().await.unwrap();

        assert_eq!(output, solved_grid());
        assert_eq!(ctrl.get_output_sudoku().unwrap(), Some(solved_grid()));

        let calls = ctrl.solver.calls.lock().unwrap().clone();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "http://localhost:3001/");
        assert_eq!(calls[0].1.get(0, 0), 5);

        assert_eq!(
            ctrl.navigator().last(),
            Some(Navigation::Assign(
                "http://localhost:3001/solved.html".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_solve_without_url_fails_before_request() {
        let ctrl = controller(TextForm::new());

        let err = ctrl.solve().await.unwrap_err();

        assert!(matches!(err, SudokuError::MissingKey { ref key } if key == "url"));
        assert!(ctrl.solver.calls.lock().unwrap().is_empty());
        assert_eq!(ctrl.get_output_sudoku().unwrap(), None);
        assert!(ctrl.navigator().history().is_empty());
    }

    #[test]
    fn test_reset_navigates_or_is_noop() {
        let ctrl = controller(TextForm::new());
        tokio_test::assert_ok!(ctrl.reset());
        assert!(ctrl.navigator().history().is_empty());

        ctrl.start("http://localhost:3001/").unwrap();
        tokio_test::assert_ok!(ctrl.reset());
        assert_eq!(
            ctrl.navigator().last(),
            Some(Navigation::Replace("http://localhost:3001/".to_string()))
        );
    }

    #[test]
    fn test_solved_writes_output_into_form() {
        let mut ctrl = controller(TextForm::new());
        ctrl.set_output_sudoku(&solved_grid()).unwrap();

        ctrl.solved().unwrap();

        let expected = solved_grid();
        for row in 0..9 {
            for col in 0..9 {
                assert_eq!(
                    ctrl.form().read_cell(row, col),
                    expected.get(row, col).to_string()
                );
            }
        }
    }

    #[test]
    fn test_malformed_stored_grid_is_reported() {
        let ctrl = controller(TextForm::new());
        ctrl.store().set(OUTPUT_SUDOKU_KEY, "[[1,2,3]]").unwrap();

        assert!(matches!(
            ctrl.get_output_sudoku(),
            Err(SudokuError::MalformedGrid { .. })
        ));
    }
}
