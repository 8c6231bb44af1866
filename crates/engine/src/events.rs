//! In-process domain events.
//!
//! The bus is a `tokio::sync::broadcast` channel: every subscriber gets every
//! event published after it subscribed. Publishing with no subscriber is not
//! an error, the event is simply dropped.

use std::sync::Arc;

use tokio::{
    sync::broadcast::{self, error::RecvError},
    task::JoinHandle,
};

use crate::{Engine, Expense, installments::materialize_movements_for_new_expense};

const DEFAULT_CAPACITY: usize = 64;

#[derive(Clone, Debug)]
pub enum LedgerEvent {
    ExpenseCreated(Expense),
}

impl LedgerEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ExpenseCreated(_) => "expense_created",
        }
    }
}

#[derive(Clone, Debug)]
pub struct EventBus {
    sender: broadcast::Sender<LedgerEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<LedgerEvent> {
        self.sender.subscribe()
    }

    /// Returns how many subscribers received the event.
    pub fn publish(&self, event: LedgerEvent) -> usize {
        let name = event.name();
        match self.sender.send(event) {
            Ok(receivers) => receivers,
            Err(_) => {
                tracing::debug!("no subscriber for {name}");
                0
            }
        }
    }
}

/// Materialize the movements of every created expense.
///
/// The subscription is taken before returning, so expenses created right
/// after this call are not missed. Failures are logged, the task keeps
/// running until the bus is dropped.
pub fn spawn_expense_created_handler(engine: Arc<Engine>) -> JoinHandle<()> {
    let mut receiver = engine.events().subscribe();
    tokio::spawn(async move {
        loop {
            match receiver.recv().await {
                Ok(LedgerEvent::ExpenseCreated(expense)) => {
                    if let Err(err) =
                        materialize_movements_for_new_expense(engine.as_ref(), &expense).await
                    {
                        tracing::error!(
                            "failed to materialize movements for expense {}: {err}",
                            expense.id
                        );
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("expense handler lagged, {skipped} event(s) skipped");
                }
                Err(RecvError::Closed) => break,
            }
        }
        tracing::debug!("expense handler stopped");
    })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::{ExpenseCmd, ExpenseType, PaymentMethod};

    fn expense() -> Expense {
        Expense::new(ExpenseCmd::new(
            "coffee",
            4.5,
            ExpenseType::Single,
            PaymentMethod::Pix,
            10,
            NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
        ))
        .unwrap()
    }

    #[tokio::test]
    async fn subscribers_receive_published_events() {
        let bus = EventBus::default();
        let mut first = bus.subscribe();
        let mut second = bus.subscribe();
        let expense = expense();

        assert_eq!(bus.publish(LedgerEvent::ExpenseCreated(expense.clone())), 2);

        for receiver in [&mut first, &mut second] {
            let LedgerEvent::ExpenseCreated(received) = receiver.recv().await.unwrap();
            assert_eq!(received.id, expense.id);
        }
    }

    #[test]
    fn publish_without_subscribers_is_dropped() {
        let bus = EventBus::new(4);
        assert_eq!(bus.publish(LedgerEvent::ExpenseCreated(expense())), 0);
    }
}
