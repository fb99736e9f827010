//! Terminal stand-in for the search screen.
//!
//! Positional queries behave like typing each one and pressing search, one
//! after the other. Standard input behaves like a text field that can be
//! submitted again while earlier searches are still waiting on the network:
//! every line starts a search immediately, and the controller's sequence
//! numbers decide which result becomes the current region.

use futures::stream::FuturesUnordered;
use futures::StreamExt;
use log::{info, warn};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::controller::LocationSearchController;
use crate::map::MapView;
use crate::region::Region;

/// Summary of a session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionReport {
    /// Submissions made (including blank ones, which are ignored)
    pub submitted: usize,
    /// Submissions that replaced the current region
    pub applied: usize,
    /// Region shown when the session ended
    pub final_region: Region,
}

/// Submits each query in order, waiting for one to finish before the next.
pub async fn run_queries<M: MapView>(
    controller: &LocationSearchController<M>,
    queries: &[String],
) -> SessionReport {
    let mut applied = 0;
    for query in queries {
        if controller.is_shut_down() {
            break;
        }
        if controller.submit(query).await.is_some() {
            applied += 1;
        }
    }
    SessionReport {
        submitted: queries.len(),
        applied,
        final_region: controller.current_region(),
    }
}

/// Submits every line of `reader` as soon as it is read.
///
/// Searches overlap freely; the loop ends once input is exhausted and every
/// in-flight search has completed, or as soon as the controller is shut down.
pub async fn run_lines<M, R>(controller: &LocationSearchController<M>, reader: R) -> SessionReport
where
    M: MapView,
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut in_flight = FuturesUnordered::new();
    let mut input_open = true;
    let mut submitted = 0;
    let mut applied = 0;
    let cancel = controller.cancellation_token();

    loop {
        if !input_open && in_flight.is_empty() {
            break;
        }
        tokio::select! {
            _ = cancel.cancelled() => {
                info!("Session stopped with {} search(es) in flight", in_flight.len());
                break;
            }
            line = lines.next_line(), if input_open => match line {
                Ok(Some(text)) => {
                    submitted += 1;
                    in_flight.push(async move { controller.submit(&text).await });
                }
                Ok(None) => input_open = false,
                Err(e) => {
                    warn!("Failed to read search input: {}", e);
                    input_open = false;
                }
            },
            Some(outcome) = in_flight.next(), if !in_flight.is_empty() => {
                if outcome.is_some() {
                    applied += 1;
                }
            }
        }
    }

    SessionReport {
        submitted,
        applied,
        final_region: controller.current_region(),
    }
}
