/// Test utilities with RAII cleanup for storage tests
///
/// The temporary data directory is removed when the environment is dropped,
/// even if the test panics.
use std::path::PathBuf;
use tempfile::TempDir;
use anyhow::Result;

use super::connection::CsvConnection;
use super::availability_repository::AvailabilityRepository;

pub struct TestEnvironment {
    /// Kept alive so the directory survives until drop
    _temp_dir: TempDir,
    pub connection: CsvConnection,
    pub base_path: PathBuf,
}

impl TestEnvironment {
    pub async fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let base_path = temp_dir.path().to_path_buf();
        let connection = CsvConnection::new(&base_path)?;

        Ok(TestEnvironment {
            _temp_dir: temp_dir,
            connection,
            base_path,
        })
    }

    /// Repository over this environment's data directory
    pub fn availability_repository(&self) -> AvailabilityRepository {
        AvailabilityRepository::new(self.connection.clone())
    }

    pub fn base_directory(&self) -> &std::path::Path {
        &self.base_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_environment_cleanup() -> Result<()> {
        let base_path;

        {
            let env = TestEnvironment::new().await?;
            base_path = env.base_directory().to_path_buf();
            assert!(base_path.exists());

            std::fs::write(base_path.join("test_file.txt"), "test data")?;
            assert!(base_path.join("test_file.txt").exists());
        }

        assert!(!base_path.exists());
        Ok(())
    }
}
