use std::sync::{Arc, Mutex};
use std::time::Duration;

use mailpool::modules::codes::{run_ticker, CodeBoard};
use mailpool::Liveness;

#[tokio::test(start_paused = true)]
async fn ticker_stops_once_liveness_is_revoked() {
    let board = Arc::new(Mutex::new(CodeBoard::new()));
    let liveness = Liveness::new();

    let handle = tokio::spawn(run_ticker(board.clone(), liveness.clone()));
    liveness.revoke();
    tokio::time::advance(Duration::from_secs(3)).await;

    // No tick after revocation mutates the board, and the task winds down.
    handle.await.expect("ticker task completed");
}

#[tokio::test(start_paused = true)]
async fn ticker_keeps_running_while_live() {
    let board = Arc::new(Mutex::new(CodeBoard::new()));
    {
        let mut b = board.lock().unwrap();
        b.show(1, "JBSWY3DPEHPK3PXP", 0);
    }
    let liveness = Liveness::new();
    let handle = tokio::spawn(run_ticker(board.clone(), liveness.clone()));

    tokio::time::advance(Duration::from_secs(2)).await;
    assert!(board.lock().unwrap().is_shown(1));

    liveness.revoke();
    tokio::time::advance(Duration::from_secs(2)).await;
    handle.await.expect("ticker task completed");
}
