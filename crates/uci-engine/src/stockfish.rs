//! Stockfish engine wrapper using UCI protocol (async I/O)

use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::error::EngineError;
use crate::{Difficulty, MoveAdvisor};

/// Limits applied to every best-move search.
#[derive(Debug, Clone)]
pub struct SearchLimits {
    /// Nodes searched per query.
    pub nodes: u32,
    /// Wall-clock bound on a query; an overrun counts as an engine
    /// failure instead of blocking the request forever.
    pub timeout: Duration,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            nodes: 100_000,
            timeout: Duration::from_secs(10),
        }
    }
}

/// Stockfish engine instance, bound to one request at a time.
pub struct StockfishEngine {
    process: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
    limits: SearchLimits,
}

impl StockfishEngine {
    /// Spawn a new engine process, initialize UCI and apply the tier.
    pub async fn new(
        path: &str,
        difficulty: Difficulty,
        limits: SearchLimits,
    ) -> Result<Self, EngineError> {
        let mut process = Command::new(path)
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::null())
            .spawn()
            .map_err(|e| EngineError::Process(format!("Failed to spawn engine '{path}': {e}")))?;

        let stdin = process.stdin.take().unwrap();
        let stdout = BufReader::new(process.stdout.take().unwrap());

        let mut engine = Self {
            process,
            stdin,
            stdout,
            limits,
        };

        // Initialize UCI
        engine.send("uci").await?;
        engine.wait_for("uciok").await?;

        // Single-threaded play at the requested strength
        engine.send("setoption name Threads value 1").await?;
        engine
            .send(&format!(
                "setoption name Skill Level value {}",
                difficulty.skill_level()
            ))
            .await?;
        engine.send("isready").await?;
        engine.wait_for("readyok").await?;

        Ok(engine)
    }

    /// Send a command to the engine
    async fn send(&mut self, cmd: &str) -> Result<(), EngineError> {
        debug!(cmd, "SF <");
        self.stdin
            .write_all(format!("{cmd}\n").as_bytes())
            .await
            .map_err(|e| EngineError::Process(format!("Failed to write to engine: {e}")))?;
        self.stdin
            .flush()
            .await
            .map_err(|e| EngineError::Process(format!("Failed to flush stdin: {e}")))?;
        Ok(())
    }

    /// Wait for a specific response line, bounded by the search timeout.
    async fn wait_for(&mut self, expected: &str) -> Result<(), EngineError> {
        let deadline = self.limits.timeout;
        timeout(deadline, async {
            let mut line = String::new();
            loop {
                line.clear();
                let n = self
                    .stdout
                    .read_line(&mut line)
                    .await
                    .map_err(|e| EngineError::Process(format!("Failed to read from engine: {e}")))?;
                if n == 0 {
                    return Err(EngineError::Process("engine closed its output".into()));
                }
                let trimmed = line.trim();
                debug!(line = trimmed, "SF >");
                if trimmed == expected {
                    return Ok(());
                }
            }
        })
        .await
        .map_err(|_| EngineError::Protocol(format!("timed out waiting for '{expected}'")))?
    }

    /// Read lines until the `bestmove` answer of an in-flight search.
    async fn read_best_move(&mut self) -> Result<Option<String>, EngineError> {
        let mut line = String::new();
        loop {
            line.clear();
            let n = self
                .stdout
                .read_line(&mut line)
                .await
                .map_err(|e| EngineError::Process(format!("Failed to read from engine: {e}")))?;
            if n == 0 {
                return Err(EngineError::Process("engine closed its output".into()));
            }
            let trimmed = line.trim();
            debug!(line = trimmed, "SF >");
            if trimmed.starts_with("bestmove") {
                return Ok(parse_best_move(trimmed));
            }
        }
    }

    /// Send quit command and wait for the process to exit
    pub async fn quit(&mut self) {
        let _ = self.send("quit").await;
        let _ = self.process.wait().await;
    }
}

#[async_trait]
impl MoveAdvisor for StockfishEngine {
    async fn set_strength(&mut self, difficulty: Difficulty) -> Result<(), EngineError> {
        self.send(&format!(
            "setoption name Skill Level value {}",
            difficulty.skill_level()
        ))
        .await?;
        self.send("isready").await?;
        self.wait_for("readyok").await
    }

    async fn best_move(&mut self, fen: &str) -> Result<Option<String>, EngineError> {
        // The engine keeps no game state between calls; re-sync the
        // full position before every search.
        self.send(&format!("position fen {fen}")).await?;
        self.send(&format!("go nodes {}", self.limits.nodes)).await?;

        match timeout(self.limits.timeout, self.read_best_move()).await {
            Ok(result) => result,
            Err(_) => {
                warn!(fen, "engine search timed out");
                Ok(None)
            }
        }
    }
}

impl Drop for StockfishEngine {
    fn drop(&mut self) {
        // Best-effort synchronous kill in drop
        let _ = self.process.start_kill();
    }
}

/// Parse the move out of a `bestmove` line. "(none)" means the engine
/// had no legal reply.
fn parse_best_move(line: &str) -> Option<String> {
    let mut parts = line.split_whitespace();
    let _ = parts.next(); // "bestmove"
    match parts.next() {
        None | Some("(none)") => None,
        Some(mv) => Some(mv.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_best_move() {
        assert_eq!(
            parse_best_move("bestmove e2e4 ponder e7e5"),
            Some("e2e4".to_string())
        );
        assert_eq!(parse_best_move("bestmove g8f6"), Some("g8f6".to_string()));
    }

    #[test]
    fn test_parse_best_move_none() {
        assert_eq!(parse_best_move("bestmove (none)"), None);
        assert_eq!(parse_best_move("bestmove"), None);
    }

    #[test]
    fn test_parse_best_move_promotion() {
        assert_eq!(parse_best_move("bestmove e7e8q"), Some("e7e8q".to_string()));
    }

    #[test]
    fn default_limits() {
        let limits = SearchLimits::default();
        assert_eq!(limits.nodes, 100_000);
        assert_eq!(limits.timeout, Duration::from_secs(10));
    }
}
