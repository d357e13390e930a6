use base::notifier::{LogNotifier, NotificationLevel, Notifier};
use log::Level;

#[test]
fn should_log_notifications_with_matching_levels() {
    testing_logger::setup();

    let notifier = LogNotifier::new("test");
    notifier
        .send_message(NotificationLevel::Success, "order created")
        .unwrap();
    notifier
        .send_message(NotificationLevel::Warning, "not enough stock")
        .unwrap();
    notifier
        .send_message(NotificationLevel::Error, "payment failed")
        .unwrap();

    testing_logger::validate(|captured_logs| {
        assert_eq!(captured_logs.len(), 3);

        assert_eq!(captured_logs[0].level, Level::Info);
        assert_eq!(captured_logs[0].target, "test");
        assert_eq!(captured_logs[0].body, "[success] order created");

        assert_eq!(captured_logs[1].level, Level::Warn);
        assert_eq!(captured_logs[2].level, Level::Error);
    });
}
