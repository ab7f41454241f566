use futures_util::future::join_all;
use tracing::warn;

use crate::api::dtos::DeliveryReport;
use crate::domain::Notification;
use crate::infrastructure::repositories::NotificationRepository;

/// Inserts every notification concurrently. A failed insert is logged and counted; it does
/// not stop or undo the others.
pub async fn deliver_all(
    repo: &dyn NotificationRepository,
    notifications: Vec<Notification>,
) -> DeliveryReport {
    let recipients = notifications.len();
    let results = join_all(notifications.iter().map(|notification| repo.create(notification))).await;

    let mut report = DeliveryReport {
        recipients,
        ..DeliveryReport::default()
    };
    for (notification, result) in notifications.iter().zip(results) {
        match result {
            Ok(_) => report.delivered += 1,
            Err(error) => {
                report.failed += 1;
                warn!(
                    user_id = %notification.user_id,
                    notification_type = %notification.notification_type,
                    error = %error,
                    "notification delivery failed"
                );
            }
        }
    }
    report
}
