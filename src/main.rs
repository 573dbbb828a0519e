use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use econoflow_notification_server::adapter::repository::{
    AttachmentPostgresRepository, NotificationPostgresRepository,
};
use econoflow_notification_server::domain::repository::{
    AttachmentRepository, AttachmentStorage, NotificationRepository,
};
use econoflow_notification_server::domain::service::NotificationChannel;
use econoflow_notification_server::infrastructure::cleanup_engine::AttachmentCleanupEngine;
use econoflow_notification_server::infrastructure::config::Config;
use econoflow_notification_server::infrastructure::delivery::{
    ChannelFactory, EmailChannel, PushChannel, SmsChannel, WebPushChannel,
};
use econoflow_notification_server::infrastructure::email::{
    EmailComposer, SmtpMailer, TemplateStore,
};
use econoflow_notification_server::infrastructure::email_consumer::EmailQueueConsumer;
use econoflow_notification_server::infrastructure::local_fs_storage::LocalFsStorage;
use econoflow_notification_server::infrastructure::notification_consumer::NotificationQueueConsumer;
use econoflow_notification_server::infrastructure::database;
use econoflow_notification_server::infrastructure::queue::{EmailQueue, NotificationQueue};
use econoflow_notification_server::usecase::{
    CleanupAttachmentsUseCase, DispatchNotificationUseCase,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "econoflow_notification_server=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_path =
        std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config/config.yaml".to_string());
    let cfg = Config::load(&config_path)?;

    info!(
        app_name = %cfg.app.name,
        version = %cfg.app.version,
        environment = %cfg.app.environment,
        "starting notification server"
    );

    let pool = Arc::new(database::connect(&cfg.database).await?);
    let notification_repo: Arc<dyn NotificationRepository> =
        Arc::new(NotificationPostgresRepository::new(pool.clone()));
    let attachment_repo: Arc<dyn AttachmentRepository> =
        Arc::new(AttachmentPostgresRepository::new(pool.clone()));
    let storage: Arc<dyn AttachmentStorage> =
        Arc::new(LocalFsStorage::new(cfg.storage.root.clone()));

    let (email_queue, email_rx) = EmailQueue::channel();
    let template_store = TemplateStore::new(
        cfg.email.templates_path.clone(),
        cfg.email.default_culture.clone(),
    );
    let composer = Arc::new(EmailComposer::new(
        template_store,
        email_queue.clone(),
        cfg.smtp.from_address.clone(),
    ));

    let email_channel: Arc<dyn NotificationChannel> = Arc::new(EmailChannel::new(composer));
    let sms_channel: Arc<dyn NotificationChannel> = Arc::new(SmsChannel);
    let push_channel: Arc<dyn NotificationChannel> = match &cfg.notifier.web_push_endpoint {
        Some(endpoint) => Arc::new(WebPushChannel::new(endpoint.clone())),
        None => Arc::new(PushChannel),
    };
    let factory = ChannelFactory::new(email_channel, sms_channel, push_channel);

    let (notification_queue, notification_rx) = NotificationQueue::channel();
    let dispatch_uc = Arc::new(DispatchNotificationUseCase::new(
        notification_repo.clone(),
        factory,
    ));
    let cleanup_uc = Arc::new(CleanupAttachmentsUseCase::new(
        attachment_repo,
        storage,
        chrono::Duration::hours(i64::from(cfg.cleanup.expiration_hours)),
        cfg.cleanup.batch_size,
    ));

    let mailer = Arc::new(SmtpMailer::new(
        &cfg.smtp.host,
        cfg.smtp.port,
        &cfg.smtp.username,
        &cfg.smtp.password,
    )?);

    let cancel_token = CancellationToken::new();

    let email_consumer = EmailQueueConsumer::new(email_rx, mailer, cancel_token.clone());
    let notification_consumer =
        NotificationQueueConsumer::new(notification_rx, dispatch_uc, cancel_token.clone());
    let cleanup_engine = AttachmentCleanupEngine::new(
        cleanup_uc,
        Duration::from_secs(cfg.cleanup.interval_secs),
        cancel_token.clone(),
    );

    let email_handle = tokio::spawn(email_consumer.run());
    let notifier_handle = tokio::spawn(notification_consumer.run());
    let cleanup_handle = cleanup_engine.start();

    info!("notification server running, press Ctrl-C to stop");

    // the producer halves stay alive here so the consumer loops keep
    // waiting; domain actions reach them through the library API
    let _producers: (NotificationQueue, EmailQueue) = (notification_queue, email_queue);

    tokio::signal::ctrl_c().await?;
    info!("shutdown signal received");

    cancel_token.cancel();
    let _ = email_handle.await;
    let _ = notifier_handle.await;
    let _ = cleanup_handle.await;

    Ok(())
}
