//! Checkout orchestration.
//!
//! The cart is turned into an ordered list of [`CheckoutLine`]s and each line
//! becomes one purchase call. Calls are made strictly one at a time; the first
//! failure stops the run and nothing already committed is rolled back.
//!
//! [`CheckoutRun`] holds the position and outcome so the stopping point can be
//! exercised without a network; [`execute`] drives it against a
//! [`RemoteInventory`].

use sweetshop_auth::Credential;
use sweetshop_client::RemoteInventory;
use sweetshop_core::{CheckoutId, ItemId, ShopError};
use sweetshop_inventory::InventorySnapshot;

use crate::cart::Cart;

/// A cart line resolved against the snapshot at checkout start.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutLine {
    pub item_id: ItemId,
    pub name: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub line_total: f64,
}

/// Resolve `cart` against `snapshot` in cart order.
///
/// Lines whose item is no longer in the snapshot are dropped silently.
pub fn checkout_lines(cart: &Cart, snapshot: &InventorySnapshot) -> Vec<CheckoutLine> {
    cart.lines()
        .iter()
        .filter_map(|line| {
            let item = snapshot.get(&line.item_id)?;
            Some(CheckoutLine {
                item_id: line.item_id.clone(),
                name: item.name().to_string(),
                quantity: line.quantity,
                unit_price: item.price(),
                line_total: item.price() * f64::from(line.quantity),
            })
        })
        .collect()
}

/// The line that stopped a checkout, with the reason.
#[derive(Debug, Clone, PartialEq)]
pub struct LineFailure {
    pub line: CheckoutLine,
    pub error: ShopError,
}

/// Per-line result of a finished run.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutReport {
    pub checkout_id: CheckoutId,
    /// Lines the service accepted, in call order.
    pub committed: Vec<CheckoutLine>,
    pub failure: Option<LineFailure>,
    /// Lines after the failing one; no call was made for them.
    pub not_attempted: Vec<CheckoutLine>,
}

impl CheckoutReport {
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }

    /// Total of the committed lines.
    pub fn committed_total(&self) -> f64 {
        self.committed.iter().map(|l| l.line_total).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// `next` indexes the line to purchase next.
    InProgress,
    Succeeded,
    Failed,
}

/// Sequential purchase state machine.
#[derive(Debug, Clone)]
pub struct CheckoutRun {
    id: CheckoutId,
    lines: Vec<CheckoutLine>,
    next: usize,
    state: RunState,
    failure: Option<ShopError>,
}

impl CheckoutRun {
    pub fn new(lines: Vec<CheckoutLine>) -> Self {
        let state = if lines.is_empty() {
            RunState::Succeeded
        } else {
            RunState::InProgress
        };
        Self {
            id: CheckoutId::new(),
            lines,
            next: 0,
            state,
            failure: None,
        }
    }

    pub fn id(&self) -> CheckoutId {
        self.id
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state != RunState::InProgress
    }

    /// Line whose purchase must be issued next; `None` once finished.
    pub fn next_line(&self) -> Option<&CheckoutLine> {
        match self.state {
            RunState::InProgress => self.lines.get(self.next),
            _ => None,
        }
    }

    /// Record the outcome of the purchase for [`next_line`](Self::next_line).
    ///
    /// Ignored once the run is finished.
    pub fn record(&mut self, outcome: Result<(), ShopError>) {
        if self.is_finished() {
            return;
        }

        match outcome {
            Ok(()) => {
                self.next += 1;
                if self.next == self.lines.len() {
                    self.state = RunState::Succeeded;
                }
            }
            Err(error) => {
                self.failure = Some(error);
                self.state = RunState::Failed;
            }
        }
    }

    pub fn into_report(self) -> CheckoutReport {
        let Self {
            id,
            mut lines,
            next,
            failure,
            ..
        } = self;

        let mut rest = lines.split_off(next.min(lines.len()));
        let failure = failure.map(|error| LineFailure {
            line: rest.remove(0),
            error,
        });

        CheckoutReport {
            checkout_id: id,
            committed: lines,
            failure,
            not_attempted: rest,
        }
    }
}

/// Purchase every line in order, stopping at the first failure.
///
/// Each call is awaited to completion before the next one starts.
pub async fn execute(remote: &dyn RemoteInventory, credential: &Credential, lines: Vec<CheckoutLine>) -> CheckoutReport {
    let mut run = CheckoutRun::new(lines);
    let checkout_id = run.id();

    while let Some(line) = run.next_line() {
        let item_id = line.item_id.clone();
        let quantity = line.quantity;
        tracing::info!(%checkout_id, %item_id, quantity, "purchasing line");

        let outcome = remote
            .purchase(credential, &item_id, quantity)
            .await
            .map(|_| ())
            .map_err(ShopError::from);

        if let Err(e) = &outcome {
            tracing::warn!(%checkout_id, %item_id, error = %e, "purchase failed; stopping checkout");
        }
        run.record(outcome);
    }

    let report = run.into_report();
    tracing::info!(
        %checkout_id,
        committed = report.committed.len(),
        not_attempted = report.not_attempted.len(),
        success = report.is_success(),
        "checkout finished"
    );
    report
}
