//! Sync/async execution bridge
//!
//! The engine trait is async, but callers are often plain synchronous code,
//! and sometimes synchronous code that is itself running inside an async
//! application. [`run_sync`] reconciles the two: it detects whether a tokio
//! runtime is already active in the caller's context, submits the operation
//! to it when so, and otherwise drives a dedicated single-use runtime.
//!
//! Timeouts here bound the *wait*, not the work: expiry abandons the result,
//! but an in-flight HTTP request is only cancelled best-effort when its
//! task is dropped.

use crate::error::{TcError, TcResult};
use std::future::Future;
use std::time::Duration;
use tokio::runtime::{Builder, Handle};

/// How much longer than the operation's own timer the parked thread waits,
/// covering task scheduling latency on a busy runtime
const SCHEDULING_GRACE: Duration = Duration::from_secs(1);

/// Run an async operation to completion from synchronous code
///
/// Two branches:
///
/// * a runtime is already running in this thread's context: the operation
///   is spawned onto it and the calling thread parks until the result
///   arrives or the bound expires. The runtime must have capacity to make
///   progress while this thread is parked (a multi-thread runtime, or a
///   call from outside the runtime's own worker threads).
/// * no runtime: a dedicated current-thread runtime is built, drives the
///   single operation, and is torn down afterwards.
///
/// Expiry of `timeout` yields `TcError::EngineTimeout`, never conflated
/// with an engine failure.
pub fn run_sync<T, F>(operation: F, timeout: Duration) -> TcResult<T>
where
    F: Future<Output = TcResult<T>> + Send + 'static,
    T: Send + 'static,
{
    match Handle::try_current() {
        Ok(handle) => {
            let (tx, rx) = std::sync::mpsc::channel();
            handle.spawn(async move {
                let outcome = tokio::time::timeout(timeout, operation).await;
                // receiver may have given up already
                let _ = tx.send(outcome);
            });
            match rx.recv_timeout(timeout + SCHEDULING_GRACE) {
                Ok(Ok(result)) => result,
                Ok(Err(_elapsed)) => Err(TcError::EngineTimeout(timeout)),
                Err(_) => Err(TcError::EngineTimeout(timeout)),
            }
        }
        Err(_) => {
            let runtime = Builder::new_current_thread()
                .enable_all()
                .build()
                .map_err(|e| {
                    TcError::Configuration(format!("Failed to create runtime: {}", e))
                })?;
            match runtime.block_on(async move { tokio::time::timeout(timeout, operation).await }) {
                Ok(result) => result,
                Err(_elapsed) => Err(TcError::EngineTimeout(timeout)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runs_without_ambient_runtime() {
        let result = run_sync(async { Ok(21 * 2) }, Duration::from_secs(5));
        assert_eq!(result.unwrap(), 42);
    }

    #[test]
    fn test_error_propagates() {
        let result: TcResult<()> = run_sync(
            async { Err(TcError::EngineCommunication("down".to_string())) },
            Duration::from_secs(5),
        );
        assert!(matches!(result, Err(TcError::EngineCommunication(_))));
    }

    #[test]
    fn test_timeout_is_distinct_error() {
        let result: TcResult<()> = run_sync(
            async {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok(())
            },
            Duration::from_millis(50),
        );
        match result {
            Err(TcError::EngineTimeout(limit)) => {
                assert_eq!(limit, Duration::from_millis(50));
            }
            other => panic!("expected EngineTimeout, got {:?}", other),
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_runs_inside_ambient_runtime() {
        // A parked caller thread must not starve the operation
        let result = tokio::task::spawn_blocking(|| {
            run_sync(
                async {
                    tokio::time::sleep(Duration::from_millis(10)).await;
                    Ok("done")
                },
                Duration::from_secs(5),
            )
        })
        .await
        .unwrap();
        assert_eq!(result.unwrap(), "done");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_timeout_inside_ambient_runtime() {
        let result: TcResult<()> = tokio::task::spawn_blocking(|| {
            run_sync(
                async {
                    tokio::time::sleep(Duration::from_secs(30)).await;
                    Ok(())
                },
                Duration::from_millis(50),
            )
        })
        .await
        .unwrap();
        assert!(matches!(result, Err(TcError::EngineTimeout(_))));
    }
}
