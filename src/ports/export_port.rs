//! Transaction export port trait.

use crate::domain::error::MockstreetError;
use crate::domain::transaction::Transaction;
use std::path::Path;

/// Port for writing a transaction history out of the process.
pub trait ExportPort {
    fn export_transactions(
        &self,
        transactions: &[Transaction],
        output_path: &Path,
    ) -> Result<(), MockstreetError>;
}
