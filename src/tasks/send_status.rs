//! Send-status task
//!
//! Logs the on-air delivery result of every accepted ESP-NOW frame. The
//! telemetry loop never waits on these notifications.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Receiver};
use log::info;

use crate::config::link::STATUS_QUEUE_DEPTH;
use crate::link::SendCompletion;

/// Channel carrying delivery notifications from the link to the logger
pub static SEND_STATUS_CHANNEL: Channel<CriticalSectionRawMutex, SendCompletion, STATUS_QUEUE_DEPTH> =
    Channel::new();

/// Type alias for the send-status receiver
pub type StatusReceiver = Receiver<'static, CriticalSectionRawMutex, SendCompletion, STATUS_QUEUE_DEPTH>;

/// Task that logs delivery notifications as they arrive
pub async fn send_status_task(receiver: StatusReceiver) {
    loop {
        let completion = receiver.receive().await;
        info!(
            "Last packet send status to {}: {}",
            completion.peer,
            completion.status()
        );
    }
}
