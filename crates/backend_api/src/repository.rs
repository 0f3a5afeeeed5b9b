use async_trait::async_trait;
use models::Expense;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Read access to the stored expenses.
/// File-backed in production, in-memory for tests and demos.
#[async_trait]
pub trait ExpenseRepository: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<Expense>>;
}

/// Reads a JSON array of expenses from disk on every request, so edits to the
/// file show up without a restart.
pub struct FileExpenseRepository {
    expenses_path: PathBuf,
}

impl FileExpenseRepository {
    pub fn new<P: AsRef<Path>>(expenses_path: P) -> Self {
        Self {
            expenses_path: expenses_path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl ExpenseRepository for FileExpenseRepository {
    async fn fetch_all(&self) -> Result<Vec<Expense>> {
        if !tokio::fs::try_exists(&self.expenses_path).await? {
            tracing::warn!(path = %self.expenses_path.display(), "expenses file missing, serving empty data");
            return Ok(Vec::new());
        }

        let content = tokio::fs::read_to_string(&self.expenses_path).await?;
        let expenses: Vec<Expense> = serde_json::from_str(&content)?;
        tracing::debug!(count = expenses.len(), "loaded expenses");
        Ok(expenses)
    }
}

#[derive(Default)]
pub struct InMemoryExpenseRepository {
    expenses: Vec<Expense>,
}

impl InMemoryExpenseRepository {
    pub fn new(expenses: Vec<Expense>) -> Self {
        Self { expenses }
    }
}

#[async_trait]
impl ExpenseRepository for InMemoryExpenseRepository {
    async fn fetch_all(&self) -> Result<Vec<Expense>> {
        Ok(self.expenses.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_file_repository_reads_expenses() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": 1, "name": "Tea", "expense_type": "Food", "amount": 1.2,
                 "date": "2025-05-02", "creation_date": "2025-05-02T10:00:00"}}]"#
        )
        .unwrap();

        let repo = FileExpenseRepository::new(file.path());
        let expenses = repo.fetch_all().await.unwrap();
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].name, "Tea");
    }

    #[tokio::test]
    async fn test_file_repository_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileExpenseRepository::new(dir.path().join("expenses.json"));
        assert!(repo.fetch_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_file_repository_malformed_json_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let repo = FileExpenseRepository::new(file.path());
        assert!(repo.fetch_all().await.is_err());
    }
}
