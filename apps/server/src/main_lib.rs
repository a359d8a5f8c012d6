//! Application state and composition root.

use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;
use billfold_ai::GeminiMessageGenerator;
use billfold_channels::{BlandVoiceSender, TwilioWhatsAppSender};
use billfold_core::bills::{BillService, BillServiceTrait};
use billfold_core::loans::{LoanService, LoanServiceTrait};
use billfold_core::reminders::{ReminderService, ReminderServiceTrait};
use billfold_core::settings::{ReminderSettingsService, ReminderSettingsServiceTrait};
use billfold_storage_sqlite::bills::BillRepository;
use billfold_storage_sqlite::loans::LoanRepository;
use billfold_storage_sqlite::settings::ReminderSettingsRepository;
use billfold_storage_sqlite::users::UserRepository;
use billfold_storage_sqlite::{create_pool, db, init, run_migrations};

pub struct AppState {
    pub bill_service: Arc<dyn BillServiceTrait>,
    pub loan_service: Arc<dyn LoanServiceTrait>,
    pub settings_service: Arc<dyn ReminderSettingsServiceTrait>,
    pub reminder_service: Arc<dyn ReminderServiceTrait>,
}

pub fn init_tracing() {
    let log_format = std::env::var("BILLFOLD_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = init(&config.db_path)?;
    tracing::info!("Database path in use: {db_path}");

    let pool = create_pool(&db_path)?;
    run_migrations(&pool)?;
    let writer = db::spawn_writer((*pool).clone());

    // Repositories
    let user_repository = Arc::new(UserRepository::new(pool.clone()));
    let settings_repository = Arc::new(ReminderSettingsRepository::new(
        pool.clone(),
        writer.clone(),
    ));
    let bill_repository = Arc::new(BillRepository::new(pool.clone(), writer.clone()));
    let loan_repository = Arc::new(LoanRepository::new(pool.clone(), writer.clone()));

    // Outbound collaborators
    let whatsapp_sender = Arc::new(TwilioWhatsAppSender::new(config.twilio.clone()));
    let voice_sender = Arc::new(BlandVoiceSender::new(config.bland.clone()));
    let generator = Arc::new(GeminiMessageGenerator::new(config.gemini.clone()));

    // Services
    let bill_service = Arc::new(BillService::new(bill_repository.clone()));
    let loan_service = Arc::new(LoanService::new(loan_repository));
    let settings_service = Arc::new(ReminderSettingsService::new(settings_repository.clone()));
    let reminder_service = Arc::new(ReminderService::new(
        user_repository,
        settings_repository,
        bill_repository,
        generator,
        whatsapp_sender,
        voice_sender,
        config.reminder_window_mode,
    ));

    Ok(Arc::new(AppState {
        bill_service,
        loan_service,
        settings_service,
        reminder_service,
    }))
}
