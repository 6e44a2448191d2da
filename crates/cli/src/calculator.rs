//! External calculator invocation.

use std::path::Path;
use tokio::process::Command;

/// Runs `<executable_dir>/calc <symbol>` once a symbol's files are written.
///
/// Fire and forget: the exit status is awaited so the child is reaped, but
/// neither the status nor the output is consumed, and failure to launch is
/// only logged. The calculator never fails a symbol.
pub async fn invoke(executable_dir: &str, symbol: &str) {
    let program = Path::new(executable_dir).join("calc");
    match Command::new(&program).arg(symbol).status().await {
        Ok(status) => {
            tracing::debug!(symbol, code = ?status.code(), "Calculator finished");
        }
        Err(e) => {
            tracing::warn!(symbol, program = %program.display(), "Calculator invocation failed: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_invoke_missing_binary_does_not_panic() {
        invoke("/nonexistent/dir", "AAPL").await;
    }
}
